use thiserror::Error;

/// Validation failures surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    #[error("Please add a task")]
    EmptyDescription,

    #[error("{name} length must be a whole number of minutes between {min} and {max} minutes, got {seconds}s")]
    InvalidLength {
        name: &'static str,
        seconds: u32,
        min: u32,
        max: u32,
    },

    #[error("volume must be between 0.0 and 1.0")]
    InvalidVolume,
}
