//! mixreel xmeml Library
//!
//! Builds Final Cut Pro 7 XML (xmeml version 5) timelines from DJ mix set
//! lists and renders them as XML text.

pub mod builder;
pub mod document;
pub mod element;
pub mod writer;

pub use builder::build_document;
pub use document::XmemlDocument;
pub use element::{Element, ToElement};

/// Result type for mixreel-xmeml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mixreel-xmeml operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("mixreel core error: {0}")]
    Core(#[from] mixreel_core::Error),

    #[error("XML serialization error: {0}")]
    Serialization(#[from] std::fmt::Error),

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),
}

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Name of the generated sequence
    pub sequence_name: String,
    /// Name of the clip carrying the full mix recording
    pub audio_clip_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sequence_name: "DJ Mix Sequence".to_string(),
            audio_clip_name: "Complete Mix".to_string(),
        }
    }
}

/// Builds the timeline for `mix` and writes it as XML
pub fn export<W: std::io::Write>(
    mix: &mixreel_core::Mix,
    config: &ExportConfig,
    writer: W,
) -> Result<XmemlDocument> {
    let document = build_document(mix, config)?;
    document.write(writer)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixreel_core::{Mix, Track, Transition};

    fn sample_mix() -> Mix {
        Mix::new(
            "/mixes/set & encore.wav",
            vec![
                Track::new(
                    1,
                    "Opener",
                    "00:00:00:000",
                    "/videos/a.mp4",
                    Transition::new("00:05:00:000", "00:05:15:000", "Crossfade"),
                ),
                Track::new(
                    2,
                    "Closer",
                    "00:05:15:000",
                    "/videos/b.mp4",
                    Transition::new("00:10:15:000", "00:10:30:000", "Iris wipe"),
                ),
            ],
        )
    }

    #[test]
    fn test_export_writes_xml() {
        let mut buffer = Vec::new();
        let document = export(&sample_mix(), &ExportConfig::default(), &mut buffer).unwrap();
        let xml = String::from_utf8(buffer).unwrap();

        assert_eq!(xml, document.to_xml_string().unwrap());
        assert!(xml.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE xmeml>\n<xmeml version=\"5\">\n"
        ));
        assert!(xml.ends_with("</xmeml>\n"));
        assert!(xml.contains("    <duration>18900</duration>\n"));
        assert!(xml.contains("<clipitem id=\"clip_0\">"));
        assert!(xml.contains("<clipitem id=\"clip_1\">"));
        assert!(xml.contains("<file id=\"file_1\">"));
        assert!(xml.contains("<clipitem id=\"audio_mix\">"));
        assert!(xml.contains("<pathurl>file:///mixes/set &amp; encore.wav</pathurl>"));
        assert_eq!(xml.matches("<transitionitem>").count(), 1);
        assert!(!xml.contains("CDATA"));
    }

    #[test]
    fn test_video_track_order() {
        let document = build_document(&sample_mix(), &ExportConfig::default()).unwrap();
        let track = document.sequence.video_track.to_element();
        let names: Vec<_> = track.children().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["clipitem", "clipitem", "transitionitem", "enabled", "locked"]
        );
    }

    #[test]
    fn test_every_rate_is_ntsc_30() {
        let document = build_document(&sample_mix(), &ExportConfig::default()).unwrap();

        fn collect_rates<'a>(element: &'a Element, rates: &mut Vec<&'a Element>) {
            if element.name == "rate" {
                rates.push(element);
            }
            for child in element.children() {
                collect_rates(child, rates);
            }
        }

        let root = document.to_element();
        let mut rates = Vec::new();
        collect_rates(&root, &mut rates);

        // sequence, sequence timecode, video format, 2 clips with file and
        // file timecode each, 1 transition, audio clip and its file
        assert_eq!(rates.len(), 3 + 2 * 3 + 1 + 2);
        for rate in rates {
            assert_eq!(rate.text_at(&["timebase"]), Some("30"));
            assert_eq!(rate.text_at(&["ntsc"]), Some("TRUE"));
        }
    }

    #[test]
    fn test_write_error_surfaces() {
        struct FailingWriter;

        impl std::io::Write for FailingWriter {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = export(&sample_mix(), &ExportConfig::default(), FailingWriter).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }
}
