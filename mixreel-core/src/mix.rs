//! DJ mix set list data structures

use crate::{Error, Result, TransitionKind};

/// Transition out of a track into the next one
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Transition {
    /// Timecode where the transition starts
    pub start_time: String,
    /// Timecode where the transition ends; the track's clip ends here too
    pub end_time: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TransitionKind,
}

impl Transition {
    /// Creates a new transition
    pub fn new(
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        kind: impl Into<TransitionKind>,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            kind: kind.into(),
        }
    }
}

/// A single track in the set list
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Track {
    /// Timecode where the track starts in the mix
    pub start_time: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub track_number: u32,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub artist: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bpm: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub beat_number: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: String,
    /// Path of the video shown while the track plays
    pub video_placeholder: String,
    pub transition: Transition,
}

impl Track {
    /// Creates a track with empty artist/tempo metadata
    pub fn new(
        track_number: u32,
        title: impl Into<String>,
        start_time: impl Into<String>,
        video_placeholder: impl Into<String>,
        transition: Transition,
    ) -> Self {
        Self {
            start_time: start_time.into(),
            track_number,
            title: title.into(),
            artist: String::new(),
            bpm: 0.0,
            beat_number: 0,
            position: String::new(),
            video_placeholder: video_placeholder.into(),
            transition,
        }
    }
}

/// A complete DJ mix: the recorded audio plus the ordered set list
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Mix {
    /// Path of the full mix recording
    pub complete_mix_audio_file: String,
    /// Tracks in performance order
    pub set_track_list: Vec<Track>,
}

impl Mix {
    /// Creates a new mix
    pub fn new(complete_mix_audio_file: impl Into<String>, set_track_list: Vec<Track>) -> Self {
        Self {
            complete_mix_audio_file: complete_mix_audio_file.into(),
            set_track_list,
        }
    }

    /// Returns the number of tracks in the set list
    pub fn track_count(&self) -> usize {
        self.set_track_list.len()
    }

    /// Returns the final track, whose transition end closes the mix
    pub fn last_track(&self) -> Result<&Track> {
        self.set_track_list.last().ok_or(Error::EmptyTrackList)
    }

    /// Tracks that hand over to a following track (every track but the last)
    pub fn outgoing_tracks(&self) -> &[Track] {
        match self.set_track_list.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

/// On-disk JSON envelope: `{ "djMix": { ... } }`
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixFile {
    pub dj_mix: Mix,
}

#[cfg(feature = "serde")]
impl MixFile {
    /// Parses a set list from a JSON reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parses a set list from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Unwraps the envelope
    pub fn into_mix(self) -> Mix {
        self.dj_mix
    }
}
