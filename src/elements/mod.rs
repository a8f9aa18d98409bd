//! Structural elements module

mod element;
mod material;
mod section;
mod support;

pub use element::BeamElement;
pub use material::Material;
pub use section::Section;
pub use support::SupportType;
