//! mixreel Core Library
//!
//! This library provides the input data structures for a DJ mix set list,
//! the timecode normalizer that turns wall-clock timecodes into frame counts,
//! and the mapping from DJ transition kinds to video editor effect names.

pub mod mix;
pub mod timecode;
pub mod transition;

pub use mix::{Mix, Track, Transition};
#[cfg(feature = "serde")]
pub use mix::MixFile;
pub use timecode::{timecode_to_frames, Timecode, TIMEBASE};
pub use transition::{map_transition_type, TransitionKind, FALLBACK_EFFECT_NAME};

/// Result type for mixreel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mixreel-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timecode '{value}': {reason}")]
    InvalidTimecode { value: String, reason: String },

    #[error("Mix has an empty track list")]
    EmptyTrackList,
}

impl Error {
    /// Creates an invalid timecode error
    pub fn invalid_timecode(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimecode {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_timecode("00:01", "expected 4 segments, found 2");
        assert_eq!(
            err.to_string(),
            "Invalid timecode '00:01': expected 4 segments, found 2"
        );

        assert_eq!(Error::EmptyTrackList.to_string(), "Mix has an empty track list");
    }
}
