use thiserror::Error;

/// Failures reported while aligning a scan to the map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// The correspondences do not constrain all six degrees of freedom, so
    /// the normal equations have no unique solution. An empty correspondence
    /// set always ends up here.
    #[error("degenerate alignment system from {correspondences} correspondences")]
    DegenerateSystem { correspondences: usize },

    #[error("correspondence set has {sources} sources but {targets} targets")]
    CorrespondenceMismatch { sources: usize, targets: usize },

    #[error("kernel scale must be finite and > 0, got {0}")]
    InvalidKernelScale(f64),
}

#[cfg(test)]
mod tests {
    use super::RegistrationError;

    #[test]
    fn messages_name_the_offending_values() {
        let err = RegistrationError::DegenerateSystem { correspondences: 2 };
        assert_eq!(err.to_string(), "degenerate alignment system from 2 correspondences");

        let err = RegistrationError::CorrespondenceMismatch {
            sources: 3,
            targets: 1,
        };
        assert_eq!(err.to_string(), "correspondence set has 3 sources but 1 targets");

        let err = RegistrationError::InvalidKernelScale(-1.0);
        assert!(err.to_string().contains("-1"));
    }
}
