//! Unified error handling for profile derivation.
//!
//! Every public operation returns [`Result`]. Failures are local to a single
//! call and never retried: the same input always fails the same way.
//! Use [`ProfileError::kind`] to decide whether a failure should degrade to
//! "no elevation data" or abort as a logic defect.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Coarse classification of a [`ProfileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty path, missing elevation where the contract needs it, or an
    /// unusable requested resolution.
    InvalidGeometry,
    /// Fewer than two elevation-bearing vertices to interpolate between, or
    /// an elevation source that did not return one height per sample point.
    InsufficientReferenceData,
    /// An internal invariant was broken. Always a defect.
    SequenceViolation,
    /// A stored profile no longer matches its geometry.
    ProfileMismatch,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("path has no vertices")]
    EmptyPath,

    #[error("vertex {index} has no elevation")]
    MissingElevation { index: usize },

    #[error("invalid resolution: {0} m (must be finite and positive)")]
    InvalidResolution(f64),

    #[error("interpolation needs at least 2 reference points, found {found}")]
    InsufficientReferenceData { found: usize },

    #[error("elevation source returned {actual} heights for {expected} sample points")]
    SourceCountMismatch { expected: usize, actual: usize },

    #[error("synthetic vertex {index} already has elevation {elevation} m")]
    AlreadyElevated { index: usize, elevation: f64 },

    #[error("reference point at vertex {index} lies before its predecessor")]
    ReferenceOrder { index: usize },

    #[error(
        "stored profile does not match geometry: expected {expected_points} points \
         at {expected_resolution} m, \
         geometry yields {actual_points} points at {actual_resolution} m"
    )]
    ProfileMismatch {
        expected_points: usize,
        actual_points: usize,
        expected_resolution: f64,
        actual_resolution: f64,
    },
}

impl ProfileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::EmptyPath
            | ProfileError::MissingElevation { .. }
            | ProfileError::InvalidResolution(_) => ErrorKind::InvalidGeometry,
            ProfileError::InsufficientReferenceData { .. }
            | ProfileError::SourceCountMismatch { .. } => ErrorKind::InsufficientReferenceData,
            ProfileError::AlreadyElevated { .. } | ProfileError::ReferenceOrder { .. } => {
                ErrorKind::SequenceViolation
            }
            ProfileError::ProfileMismatch { .. } => ErrorKind::ProfileMismatch,
        }
    }

    /// True when the error indicates a logic defect rather than bad input.
    pub fn is_defect(&self) -> bool {
        self.kind() == ErrorKind::SequenceViolation
    }
}

/// Extension for turning an absent elevation into a typed error.
pub trait OptionExt<T> {
    fn ok_or_missing_elevation(self, index: usize) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_elevation(self, index: usize) -> Result<T> {
        self.ok_or(ProfileError::MissingElevation { index })
    }
}
