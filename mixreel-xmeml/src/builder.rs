//! Timeline document builder
//!
//! Walks the set list once and assembles the sequence: one video clip per
//! track, one transition per adjacent pair of tracks, and a single audio clip
//! carrying the full mix recording.

use crate::document::{
    AudioCharacteristics, ClipItem, Effect, FileMedia, FileRef, Filter, Parameter,
    ParameterValue, Rate, Sequence, SourceTrack, TimecodeInfo, Track, TransitionItem,
    VideoCharacteristics, VideoFormat, XmemlDocument,
};
use crate::{ExportConfig, Result};
use mixreel_core::{timecode_to_frames, Mix, Track as MixTrack, TIMEBASE};
use tracing::{debug, info};

/// Rate written at every rate-bearing node
pub const PROJECT_RATE: Rate = Rate {
    timebase: TIMEBASE,
    ntsc: true,
};

/// Square frame used for placeholders and the sequence format
pub const FRAME_SIZE: VideoCharacteristics = VideoCharacteristics {
    width: 1080,
    height: 1080,
};

const MIX_AUDIO: AudioCharacteristics = AudioCharacteristics {
    depth: 16,
    sample_rate: 48000,
};

const STEREO: u32 = 2;

/// Sequences start one hour in, by editing convention
const SEQUENCE_START_TIMECODE: &str = "01:00:00:00";
const SEQUENCE_START_FRAME: u64 = 3600 * TIMEBASE;
const SOURCE_START_TIMECODE: &str = "00:00:00:00";
const NON_DROP_FRAME: &str = "NDF";

const AUDIO_CLIP_ID: &str = "audio_mix";
const AUDIO_FILE_ID: &str = "audio_file";
const AUDIO_SOURCE_TRACK_INDEX: u32 = 1;

const FILE_URL_PREFIX: &str = "file://";

/// Builds the full timeline document for a mix.
///
/// Fails with `EmptyTrackList` when the set list is empty and with
/// `InvalidTimecode` on the first malformed timecode; nothing is produced in
/// either case.
pub fn build_document(mix: &Mix, config: &ExportConfig) -> Result<XmemlDocument> {
    let last_track = mix.last_track()?;
    let total_duration = timecode_to_frames(&last_track.transition.end_time)?;

    let clip_items = mix
        .set_track_list
        .iter()
        .enumerate()
        .map(|(index, track)| video_clip_item(index, track))
        .collect::<Result<Vec<_>>>()?;

    let transition_items = mix
        .outgoing_tracks()
        .iter()
        .map(transition_item)
        .collect::<Result<Vec<_>>>()?;

    let audio_clip = audio_clip_item(
        &config.audio_clip_name,
        &mix.complete_mix_audio_file,
        total_duration,
    );

    info!(
        clips = clip_items.len(),
        transitions = transition_items.len(),
        duration = total_duration,
        "built timeline for {}",
        config.sequence_name
    );

    Ok(XmemlDocument::new(sequence(
        &config.sequence_name,
        total_duration,
        enabled_track(clip_items, transition_items),
        enabled_track(vec![audio_clip], Vec::new()),
    )))
}

fn sequence(name: &str, duration: u64, video_track: Track, audio_track: Track) -> Sequence {
    Sequence {
        name: name.to_string(),
        duration,
        rate: PROJECT_RATE,
        in_point: -1,
        out_point: -1,
        timecode: TimecodeInfo {
            string: SEQUENCE_START_TIMECODE.to_string(),
            frame: Some(SEQUENCE_START_FRAME),
            display_format: NON_DROP_FRAME.to_string(),
            rate: PROJECT_RATE,
        },
        video_track,
        video_format: VideoFormat {
            width: FRAME_SIZE.width,
            height: FRAME_SIZE.height,
            pixel_aspect_ratio: "square".to_string(),
            rate: PROJECT_RATE,
        },
        audio_track,
    }
}

fn enabled_track(clip_items: Vec<ClipItem>, transition_items: Vec<TransitionItem>) -> Track {
    Track {
        clip_items,
        transition_items,
        enabled: true,
        locked: false,
    }
}

/// Video clip for the track at `index` in the set list.
///
/// The clip runs from the track start to its transition end. Duration and
/// out point both equal the end frame, and the source is used from frame 0.
pub fn video_clip_item(index: usize, track: &MixTrack) -> Result<ClipItem> {
    let start = timecode_to_frames(&track.start_time)?;
    let end = timecode_to_frames(&track.transition.end_time)?;

    debug!(index, start, end, title = %track.title, "video clip");

    Ok(ClipItem {
        id: format!("clip_{index}"),
        name: track.title.clone(),
        duration: end,
        rate: PROJECT_RATE,
        start,
        end,
        enabled: true,
        in_point: 0,
        out_point: end,
        file: placeholder_file(index, &track.video_placeholder, end),
        composite_mode: Some("normal".to_string()),
        source_track: None,
        filters: vec![basic_motion_filter(end)],
    })
}

fn placeholder_file(index: usize, path: &str, duration: u64) -> FileRef {
    FileRef {
        id: format!("file_{index}"),
        name: path.to_string(),
        path_url: file_url(path),
        rate: PROJECT_RATE,
        duration,
        timecode: Some(TimecodeInfo {
            string: SOURCE_START_TIMECODE.to_string(),
            frame: None,
            display_format: NON_DROP_FRAME.to_string(),
            rate: PROJECT_RATE,
        }),
        media: FileMedia {
            video: Some(FRAME_SIZE),
            audio_samples: None,
            audio_channels: STEREO,
        },
    }
}

/// Transition from `track` into the next one in the set list
pub fn transition_item(track: &MixTrack) -> Result<TransitionItem> {
    let start = timecode_to_frames(&track.transition.start_time)?;
    let end = timecode_to_frames(&track.transition.end_time)?;
    let effect_name = track.transition.kind.effect_name();

    debug!(start, end, kind = %track.transition.kind, effect_name, "transition");

    Ok(TransitionItem {
        rate: PROJECT_RATE,
        start,
        end,
        alignment: "center".to_string(),
        effect: Effect {
            name: effect_name.to_string(),
            effect_id: effect_name.to_string(),
            effect_type: "transition".to_string(),
            media_type: "video".to_string(),
            // every mapped transition is filed under Dissolve
            effect_category: Some("Dissolve".to_string()),
            parameters: Vec::new(),
        },
    })
}

/// Audio clip carrying the full mix recording over the whole sequence
pub fn audio_clip_item(name: &str, path: &str, duration: u64) -> ClipItem {
    ClipItem {
        id: AUDIO_CLIP_ID.to_string(),
        name: name.to_string(),
        duration,
        rate: PROJECT_RATE,
        start: 0,
        end: duration,
        enabled: true,
        in_point: 0,
        out_point: duration,
        file: FileRef {
            id: AUDIO_FILE_ID.to_string(),
            name: path.to_string(),
            path_url: file_url(path),
            rate: PROJECT_RATE,
            duration,
            timecode: None,
            media: FileMedia {
                video: None,
                audio_samples: Some(MIX_AUDIO),
                audio_channels: STEREO,
            },
        },
        composite_mode: None,
        source_track: Some(SourceTrack {
            media_type: "audio".to_string(),
            track_index: AUDIO_SOURCE_TRACK_INDEX,
        }),
        filters: vec![audio_levels_filter(duration)],
    }
}

/// Static "Basic Motion" filter: scale 100, centered, no rotation
pub fn basic_motion_filter(end: u64) -> Filter {
    Filter {
        enabled: true,
        start: 0,
        end,
        effect: Effect {
            name: "Basic Motion".to_string(),
            effect_id: "basic".to_string(),
            effect_type: "motion".to_string(),
            media_type: "video".to_string(),
            effect_category: None,
            parameters: vec![
                scalar_parameter("Scale", "100"),
                Parameter {
                    name: "Center".to_string(),
                    value: ParameterValue::Point { horiz: 0, vert: 0 },
                },
                scalar_parameter("Rotation", "0"),
            ],
        },
    }
}

/// Static "Audio Levels" filter at unity level
pub fn audio_levels_filter(end: u64) -> Filter {
    Filter {
        enabled: true,
        start: 0,
        end,
        effect: Effect {
            name: "Audio Levels".to_string(),
            effect_id: "audiolevels".to_string(),
            effect_type: "audiolevels".to_string(),
            media_type: "audio".to_string(),
            effect_category: None,
            parameters: vec![scalar_parameter("Level", "1")],
        },
    }
}

fn scalar_parameter(name: &str, value: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        value: ParameterValue::Scalar(value.to_string()),
    }
}

/// Turns a local path into the `file://` URL the editor expects
pub fn file_url(path: &str) -> String {
    format!("{FILE_URL_PREFIX}{path}")
}
