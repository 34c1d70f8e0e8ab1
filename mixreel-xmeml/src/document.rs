//! Typed xmeml (Final Cut Pro 7 XML, version 5) timeline nodes
//!
//! Each node keeps the fields the editor requires and lowers itself into an
//! [`Element`] in the child order the editor expects. All numeric values are
//! written as decimal text.

use crate::element::{flag, Element, ToElement};
use crate::{writer, Result};
use std::io::Write;

/// Schema version written on the root element
pub const XMEML_VERSION: u32 = 5;

/// Frame rate descriptor repeated at every rate-bearing node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    pub timebase: u64,
    pub ntsc: bool,
}

impl ToElement for Rate {
    fn to_element(&self) -> Element {
        Element::parent(
            "rate",
            vec![
                Element::text("timebase", self.timebase),
                Element::text("ntsc", flag(self.ntsc)),
            ],
        )
    }
}

/// Timecode metadata of a sequence or source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecodeInfo {
    pub string: String,
    /// Absolute frame; only sequences carry it
    pub frame: Option<u64>,
    pub display_format: String,
    pub rate: Rate,
}

impl ToElement for TimecodeInfo {
    fn to_element(&self) -> Element {
        let mut children = vec![Element::text("string", &self.string)];
        if let Some(frame) = self.frame {
            children.push(Element::text("frame", frame));
        }
        children.push(Element::text("displayformat", &self.display_format));
        children.push(self.rate.to_element());
        Element::parent("timecode", children)
    }
}

/// Value of an effect parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Scalar(String),
    Point { horiz: i64, vert: i64 },
}

/// A named effect parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

impl ToElement for Parameter {
    fn to_element(&self) -> Element {
        let value = match &self.value {
            ParameterValue::Scalar(value) => Element::text("value", value),
            ParameterValue::Point { horiz, vert } => Element::parent(
                "value",
                vec![Element::text("horiz", horiz), Element::text("vert", vert)],
            ),
        };
        Element::parent("parameter", vec![Element::text("name", &self.name), value])
    }
}

/// An effect applied by a filter or a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub name: String,
    pub effect_id: String,
    pub effect_type: String,
    pub media_type: String,
    pub effect_category: Option<String>,
    pub parameters: Vec<Parameter>,
}

impl ToElement for Effect {
    fn to_element(&self) -> Element {
        let mut children = vec![
            Element::text("name", &self.name),
            Element::text("effectid", &self.effect_id),
            Element::text("effecttype", &self.effect_type),
            Element::text("mediatype", &self.media_type),
        ];
        if let Some(category) = &self.effect_category {
            children.push(Element::text("effectcategory", category));
        }
        children.extend(self.parameters.iter().map(ToElement::to_element));
        Element::parent("effect", children)
    }
}

/// A clip filter: an effect active over a frame range of the clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub enabled: bool,
    pub start: u64,
    pub end: u64,
    pub effect: Effect,
}

impl ToElement for Filter {
    fn to_element(&self) -> Element {
        Element::parent(
            "filter",
            vec![
                Element::text("enabled", flag(self.enabled)),
                Element::text("start", self.start),
                Element::text("end", self.end),
                self.effect.to_element(),
            ],
        )
    }
}

/// Video sample characteristics of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoCharacteristics {
    pub width: u32,
    pub height: u32,
}

/// Audio sample characteristics of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCharacteristics {
    pub depth: u32,
    pub sample_rate: u32,
}

/// Media streams described by a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMedia {
    pub video: Option<VideoCharacteristics>,
    pub audio_samples: Option<AudioCharacteristics>,
    pub audio_channels: u32,
}

impl ToElement for FileMedia {
    fn to_element(&self) -> Element {
        let mut children = Vec::new();
        if let Some(video) = self.video {
            children.push(Element::parent(
                "video",
                vec![Element::parent(
                    "samplecharacteristics",
                    vec![
                        Element::text("width", video.width),
                        Element::text("height", video.height),
                    ],
                )],
            ));
        }

        let mut audio = Vec::new();
        if let Some(samples) = self.audio_samples {
            audio.push(Element::parent(
                "samplecharacteristics",
                vec![
                    Element::text("depth", samples.depth),
                    Element::text("samplerate", samples.sample_rate),
                ],
            ));
        }
        audio.push(Element::text("channelcount", self.audio_channels));
        children.push(Element::parent("audio", audio));

        Element::parent("media", children)
    }
}

/// Source media file referenced by a clip item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
    pub name: String,
    pub path_url: String,
    pub rate: Rate,
    pub duration: u64,
    pub timecode: Option<TimecodeInfo>,
    pub media: FileMedia,
}

impl ToElement for FileRef {
    fn to_element(&self) -> Element {
        let mut children = vec![
            Element::text("name", &self.name),
            Element::text("pathurl", &self.path_url),
            self.rate.to_element(),
            Element::text("duration", self.duration),
        ];
        if let Some(timecode) = &self.timecode {
            children.push(timecode.to_element());
        }
        children.push(self.media.to_element());
        Element::parent("file", children).with_attr("id", &self.id)
    }
}

/// Which source track of a file an audio clip plays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    pub media_type: String,
    pub track_index: u32,
}

impl ToElement for SourceTrack {
    fn to_element(&self) -> Element {
        Element::parent(
            "sourcetrack",
            vec![
                Element::text("mediatype", &self.media_type),
                Element::text("trackindex", self.track_index),
            ],
        )
    }
}

/// A clip placed on a track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipItem {
    pub id: String,
    pub name: String,
    pub duration: u64,
    pub rate: Rate,
    pub start: u64,
    pub end: u64,
    pub enabled: bool,
    pub in_point: u64,
    pub out_point: u64,
    pub file: FileRef,
    pub composite_mode: Option<String>,
    pub source_track: Option<SourceTrack>,
    pub filters: Vec<Filter>,
}

impl ToElement for ClipItem {
    fn to_element(&self) -> Element {
        let mut children = vec![
            Element::text("name", &self.name),
            Element::text("duration", self.duration),
            self.rate.to_element(),
            Element::text("start", self.start),
            Element::text("end", self.end),
            Element::text("enabled", flag(self.enabled)),
            Element::text("in", self.in_point),
            Element::text("out", self.out_point),
            self.file.to_element(),
        ];
        if let Some(mode) = &self.composite_mode {
            children.push(Element::text("compositemode", mode));
        }
        if let Some(source_track) = &self.source_track {
            children.push(source_track.to_element());
        }
        children.extend(self.filters.iter().map(ToElement::to_element));
        Element::parent("clipitem", children).with_attr("id", &self.id)
    }
}

/// A transition between two adjacent clips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionItem {
    pub rate: Rate,
    pub start: u64,
    pub end: u64,
    pub alignment: String,
    pub effect: Effect,
}

impl ToElement for TransitionItem {
    fn to_element(&self) -> Element {
        Element::parent(
            "transitionitem",
            vec![
                self.rate.to_element(),
                Element::text("start", self.start),
                Element::text("end", self.end),
                Element::text("alignment", &self.alignment),
                self.effect.to_element(),
            ],
        )
    }
}

/// A video or audio track of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub clip_items: Vec<ClipItem>,
    pub transition_items: Vec<TransitionItem>,
    pub enabled: bool,
    pub locked: bool,
}

impl ToElement for Track {
    fn to_element(&self) -> Element {
        let mut children: Vec<Element> =
            self.clip_items.iter().map(ToElement::to_element).collect();
        children.extend(self.transition_items.iter().map(ToElement::to_element));
        children.push(Element::text("enabled", flag(self.enabled)));
        children.push(Element::text("locked", flag(self.locked)));
        Element::parent("track", children)
    }
}

/// Output format of the sequence's video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFormat {
    pub width: u32,
    pub height: u32,
    pub pixel_aspect_ratio: String,
    pub rate: Rate,
}

impl ToElement for VideoFormat {
    fn to_element(&self) -> Element {
        Element::parent(
            "format",
            vec![Element::parent(
                "samplecharacteristics",
                vec![
                    Element::text("width", self.width),
                    Element::text("height", self.height),
                    Element::text("pixelaspectratio", &self.pixel_aspect_ratio),
                    self.rate.to_element(),
                ],
            )],
        )
    }
}

/// The sequence: one video track and one audio track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub duration: u64,
    pub rate: Rate,
    /// -1 marks an unset in/out point
    pub in_point: i64,
    pub out_point: i64,
    pub timecode: TimecodeInfo,
    pub video_track: Track,
    pub video_format: VideoFormat,
    pub audio_track: Track,
}

impl ToElement for Sequence {
    fn to_element(&self) -> Element {
        let media = Element::parent(
            "media",
            vec![
                Element::parent(
                    "video",
                    vec![self.video_track.to_element(), self.video_format.to_element()],
                ),
                Element::parent("audio", vec![self.audio_track.to_element()]),
            ],
        );

        Element::parent(
            "sequence",
            vec![
                Element::text("name", &self.name),
                Element::text("duration", self.duration),
                self.rate.to_element(),
                Element::text("in", self.in_point),
                Element::text("out", self.out_point),
                self.timecode.to_element(),
                media,
            ],
        )
    }
}

/// A complete xmeml document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmemlDocument {
    pub version: u32,
    pub sequence: Sequence,
}

impl XmemlDocument {
    /// Creates a document around a sequence
    pub fn new(sequence: Sequence) -> Self {
        Self {
            version: XMEML_VERSION,
            sequence,
        }
    }

    /// Total sequence duration in frames
    pub fn duration(&self) -> u64 {
        self.sequence.duration
    }

    /// Clip items on the video track
    pub fn video_clip_items(&self) -> &[ClipItem] {
        &self.sequence.video_track.clip_items
    }

    /// Transition items on the video track
    pub fn transition_items(&self) -> &[TransitionItem] {
        &self.sequence.video_track.transition_items
    }

    /// Clip items on the audio track
    pub fn audio_clip_items(&self) -> &[ClipItem] {
        &self.sequence.audio_track.clip_items
    }

    /// Renders the document as XML text
    pub fn to_xml_string(&self) -> Result<String> {
        writer::render_document(&self.to_element())
    }

    /// Renders the document and writes it out
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let xml = self.to_xml_string()?;
        writer.write_all(xml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl ToElement for XmemlDocument {
    fn to_element(&self) -> Element {
        Element::parent("xmeml", vec![self.sequence.to_element()]).with_attr("version", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: Rate = Rate {
        timebase: 30,
        ntsc: true,
    };

    #[test]
    fn test_rate_element() {
        let element = RATE.to_element();
        assert_eq!(element.text_at(&["timebase"]), Some("30"));
        assert_eq!(element.text_at(&["ntsc"]), Some("TRUE"));
    }

    #[test]
    fn test_timecode_frame_is_optional() {
        let mut timecode = TimecodeInfo {
            string: "01:00:00:00".to_string(),
            frame: Some(108000),
            display_format: "NDF".to_string(),
            rate: RATE,
        };
        let names: Vec<_> = timecode.to_element().children().iter().map(|c| c.name).collect();
        assert_eq!(names, ["string", "frame", "displayformat", "rate"]);

        timecode.frame = None;
        let names: Vec<_> = timecode.to_element().children().iter().map(|c| c.name).collect();
        assert_eq!(names, ["string", "displayformat", "rate"]);
    }

    #[test]
    fn test_point_parameter() {
        let parameter = Parameter {
            name: "Center".to_string(),
            value: ParameterValue::Point { horiz: 0, vert: -12 },
        };
        let element = parameter.to_element();
        assert_eq!(element.text_at(&["value", "horiz"]), Some("0"));
        assert_eq!(element.text_at(&["value", "vert"]), Some("-12"));
    }

    #[test]
    fn test_effect_category_placement() {
        let effect = Effect {
            name: "Circle Iris".to_string(),
            effect_id: "Circle Iris".to_string(),
            effect_type: "transition".to_string(),
            media_type: "video".to_string(),
            effect_category: Some("Dissolve".to_string()),
            parameters: Vec::new(),
        };
        let names: Vec<_> = effect.to_element().children().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["name", "effectid", "effecttype", "mediatype", "effectcategory"]
        );
    }

    #[test]
    fn test_audio_only_file_media() {
        let media = FileMedia {
            video: None,
            audio_samples: Some(AudioCharacteristics {
                depth: 16,
                sample_rate: 48000,
            }),
            audio_channels: 2,
        };
        let element = media.to_element();
        assert!(element.child("video").is_none());
        assert_eq!(
            element.text_at(&["audio", "samplecharacteristics", "samplerate"]),
            Some("48000")
        );
        assert_eq!(element.text_at(&["audio", "channelcount"]), Some("2"));
    }
}
