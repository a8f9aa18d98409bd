//! Error types for the beam solver

use thiserror::Error;

/// Main error type for beam analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeamError {
    /// Non-positive span length, stiffness property, or a load that does not fit its span
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Support code or name that does not map to a known support type
    #[error("Invalid support configuration: {0}")]
    InvalidSupportConfiguration(String),

    /// Reduced stiffness matrix is singular - the beam is insufficiently restrained
    #[error("Structure is unstable: {0}")]
    StructurallyUnstable(String),

    /// Element, span, load, or vector counts that do not agree
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),
}

impl BeamError {
    /// Prefix the message with the node, span, or load it concerns
    pub fn context(self, location: &str) -> Self {
        match self {
            BeamError::InvalidGeometry(msg) => {
                BeamError::InvalidGeometry(format!("{}: {}", location, msg))
            }
            BeamError::InvalidSupportConfiguration(msg) => {
                BeamError::InvalidSupportConfiguration(format!("{}: {}", location, msg))
            }
            BeamError::StructurallyUnstable(msg) => {
                BeamError::StructurallyUnstable(format!("{}: {}", location, msg))
            }
            BeamError::DimensionMismatch(msg) => {
                BeamError::DimensionMismatch(format!("{}: {}", location, msg))
            }
            other => other,
        }
    }
}

/// Result type for beam analysis operations
pub type BeamResult<T> = Result<T, BeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = BeamError::InvalidGeometry("span 2 has length -1".to_string());
        assert_eq!(err.to_string(), "Invalid geometry: span 2 has length -1");

        let err = BeamError::LoadCombinationNotFound("1.4D".to_string());
        assert_eq!(err.to_string(), "Load combination '1.4D' not found in model");
    }

    #[test]
    fn test_context_prefixes_message() {
        let err = BeamError::InvalidGeometry("position 5 outside [0, 4]".to_string())
            .context("load 1 on span 0");
        assert_eq!(
            err,
            BeamError::InvalidGeometry("load 1 on span 0: position 5 outside [0, 4]".to_string())
        );
    }
}
