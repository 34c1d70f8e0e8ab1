//! Transition kinds and their editor effect names

use std::fmt;

/// Effect used when the editor has no native equivalent for a transition
pub const FALLBACK_EFFECT_NAME: &str = "Cross Dissolve";

/// Transition kinds a DJ set list can describe
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum TransitionKind {
    Crossfade,
    IrisWipe,
    Heart,
    Glitch,
    /// Any label outside the known set, kept verbatim
    Other(String),
}

impl TransitionKind {
    /// Label as it appears in set list files
    pub fn label(&self) -> &str {
        match self {
            Self::Crossfade => "Crossfade",
            Self::IrisWipe => "Iris wipe",
            Self::Heart => "Heart",
            Self::Glitch => "Glitch",
            Self::Other(label) => label,
        }
    }

    /// Name of the matching transition effect in the editor.
    ///
    /// Total over every kind: Glitch and unknown labels map to
    /// [`FALLBACK_EFFECT_NAME`] since the editor ships no equivalent.
    pub fn effect_name(&self) -> &'static str {
        match self {
            Self::Crossfade => "Cross Dissolve",
            Self::IrisWipe => "Circle Iris",
            Self::Heart => "Heart Wipe",
            Self::Glitch | Self::Other(_) => FALLBACK_EFFECT_NAME,
        }
    }
}

impl From<&str> for TransitionKind {
    fn from(label: &str) -> Self {
        match label {
            "Crossfade" => Self::Crossfade,
            "Iris wipe" => Self::IrisWipe,
            "Heart" => Self::Heart,
            "Glitch" => Self::Glitch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TransitionKind {
    fn from(label: String) -> Self {
        match Self::from(label.as_str()) {
            Self::Other(_) => Self::Other(label),
            known => known,
        }
    }
}

impl From<TransitionKind> for String {
    fn from(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a raw transition label to the editor's effect name
pub fn map_transition_type(label: &str) -> &'static str {
    TransitionKind::from(label).effect_name()
}
