//! Load types and load combinations
//!
//! Span loads are described on a span temporarily clamped at both ends:
//! each one yields its fixed end reactions plus the shear and bending moment
//! it would produce on the same span simply supported. The analysis adds the
//! end-force correction recovered from the solved displacements.

mod distributed;
mod load_combo;
mod moment;
mod node_load;
mod point_load;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};
use crate::math::Vec4;

pub use distributed::DistributedLoad;
pub use load_combo::{LoadCombination, DEFAULT_COMBO};
pub use moment::ConcentratedMoment;
pub use node_load::NodalLoad;
pub use point_load::PointLoad;

/// Load case assigned to loads created without one
pub const DEFAULT_CASE: &str = "Case 1";

/// Relative slack allowed when checking a position against a span end
const POSITION_TOLERANCE: f64 = 1e-9;

/// A load acting on a single span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    Point(PointLoad),
    Distributed(DistributedLoad),
    Moment(ConcentratedMoment),
}

impl Load {
    /// Load case this load belongs to
    pub fn case(&self) -> &str {
        match self {
            Load::Point(load) => &load.case,
            Load::Distributed(load) => &load.case,
            Load::Moment(load) => &load.case,
        }
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            Load::Point(load) => Load::Point(load.scaled(factor)),
            Load::Distributed(load) => Load::Distributed(load.scaled(factor)),
            Load::Moment(load) => Load::Moment(load.scaled(factor)),
        }
    }

    /// Check that the load fits on a span of the given length
    pub fn validate(&self, length: f64) -> BeamResult<()> {
        match self {
            Load::Point(load) => load.validate(length),
            Load::Distributed(load) => load.validate(length),
            Load::Moment(load) => load.validate(length),
        }
    }

    /// Fixed end reactions [V_i, M_i, V_j, M_j] with both span ends clamped
    pub fn equivalent_nodal_reactions(&self, length: f64) -> Vec4 {
        match self {
            Load::Point(load) => load.equivalent_nodal_reactions(length),
            Load::Distributed(load) => load.equivalent_nodal_reactions(length),
            Load::Moment(load) => load.equivalent_nodal_reactions(length),
        }
    }

    /// Shear contribution at `x` measured from the left end
    pub fn shear(&self, x: f64, length: f64) -> f64 {
        match self {
            Load::Point(load) => load.shear(x, length),
            Load::Distributed(load) => load.shear(x, length),
            Load::Moment(load) => load.shear(x, length),
        }
    }

    /// Simply supported bending moment at `x` measured from the left end
    pub fn moment(&self, x: f64, length: f64) -> f64 {
        match self {
            Load::Point(load) => load.moment(x, length),
            Load::Distributed(load) => load.moment(x, length),
            Load::Moment(load) => load.moment(x, length),
        }
    }

    /// Resultant vertical force (downward positive)
    pub fn vertical_force(&self) -> f64 {
        match self {
            Load::Point(load) => load.magnitude,
            Load::Distributed(load) => load.total_force(),
            Load::Moment(_) => 0.0,
        }
    }
}

impl From<PointLoad> for Load {
    fn from(load: PointLoad) -> Self {
        Load::Point(load)
    }
}

impl From<DistributedLoad> for Load {
    fn from(load: DistributedLoad) -> Self {
        Load::Distributed(load)
    }
}

impl From<ConcentratedMoment> for Load {
    fn from(load: ConcentratedMoment) -> Self {
        Load::Moment(load)
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Point(load) => fmt::Display::fmt(load, f),
            Load::Distributed(load) => fmt::Display::fmt(load, f),
            Load::Moment(load) => fmt::Display::fmt(load, f),
        }
    }
}

fn check_magnitude(name: &str, value: f64) -> BeamResult<()> {
    if !value.is_finite() {
        return Err(BeamError::InvalidGeometry(format!(
            "{} magnitude must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_position(name: &str, value: f64, length: f64) -> BeamResult<()> {
    let slack = POSITION_TOLERANCE * length;
    if !(value >= -slack && value <= length + slack) {
        return Err(BeamError::InvalidGeometry(format!(
            "{} {} lies outside the span [0, {}]",
            name, value, length
        )));
    }
    Ok(())
}
