//! Timecode normalization
//!
//! Set lists carry wall-clock positions as `hours:minutes:seconds:milliseconds`.
//! Editors want frame numbers, so every timecode is normalized to a frame count
//! at the fixed project rate.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Project frame rate in frames per second
pub const TIMEBASE: u64 = 30;

const MILLIS_PER_SECOND: u64 = 1000;

/// A wall-clock position within the mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Not range-checked; `1500` is accepted and counts as 1.5 seconds
    pub milliseconds: u64,
}

impl Timecode {
    /// Creates a new timecode
    pub fn new(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Total position in milliseconds, or `None` on overflow
    pub fn total_milliseconds(&self) -> Option<u64> {
        let seconds = self
            .hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)?;
        seconds
            .checked_mul(MILLIS_PER_SECOND)?
            .checked_add(self.milliseconds)
    }

    /// Converts to a frame count at [`TIMEBASE`], rounding half frames up.
    ///
    /// Integer arithmetic keeps the result exact:
    /// `round(total_ms / 1000 * 30) == (total_ms * 30 + 500) / 1000`.
    pub fn to_frames(&self) -> Option<u64> {
        let scaled = self.total_milliseconds()?.checked_mul(TIMEBASE)?;
        Some(scaled.checked_add(MILLIS_PER_SECOND / 2)? / MILLIS_PER_SECOND)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl FromStr for Timecode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();

        if parts.len() != 4 {
            return Err(Error::invalid_timecode(
                s,
                format!(
                    "expected hours:minutes:seconds:milliseconds, found {} segment(s)",
                    parts.len()
                ),
            ));
        }

        let segment = |index: usize, label: &str| -> Result<u64> {
            let part = parts[index];
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::invalid_timecode(
                    s,
                    format!("{label} segment '{part}' is not a decimal integer"),
                ));
            }
            part.parse()
                .map_err(|_| Error::invalid_timecode(s, format!("{label} segment '{part}' is too large")))
        };

        Ok(Self {
            hours: segment(0, "hours")?,
            minutes: segment(1, "minutes")?,
            seconds: segment(2, "seconds")?,
            milliseconds: segment(3, "milliseconds")?,
        })
    }
}

/// Normalizes a `hours:minutes:seconds:milliseconds` string to a frame count
/// at 30 fps.
///
/// Malformed strings fail with [`Error::InvalidTimecode`] instead of producing
/// a bogus frame number.
pub fn timecode_to_frames(timecode: &str) -> Result<u64> {
    timecode
        .parse::<Timecode>()?
        .to_frames()
        .ok_or_else(|| Error::invalid_timecode(timecode, "frame count out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_frames(h: u64, m: u64, s: u64, ms: u64) -> u64 {
        let seconds = (h * 3600 + m * 60 + s) as f64 + ms as f64 / 1000.0;
        (seconds * TIMEBASE as f64).round() as u64
    }

    #[test]
    fn test_parse() {
        let tc: Timecode = "01:02:03:456".parse().unwrap();
        assert_eq!(tc, Timecode::new(1, 2, 3, 456));
        assert_eq!(tc.to_string(), "01:02:03:456");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(timecode_to_frames("00:00:00:000").unwrap(), 0);
        assert_eq!(timecode_to_frames("00:05:15:000").unwrap(), 9450);
        assert_eq!(timecode_to_frames("00:10:30:000").unwrap(), 18900);
        assert_eq!(timecode_to_frames("01:00:00:000").unwrap(), 108000);
    }

    #[test]
    fn test_rounding() {
        // 1 frame = 33.33 ms
        assert_eq!(timecode_to_frames("00:00:00:016").unwrap(), 0);
        assert_eq!(timecode_to_frames("00:00:00:017").unwrap(), 1);
        assert_eq!(timecode_to_frames("00:00:00:033").unwrap(), 1);
        assert_eq!(timecode_to_frames("00:00:00:050").unwrap(), 2);
        // exactly half a frame rounds up
        assert_eq!(timecode_to_frames("00:00:01:050").unwrap(), 32);
    }

    #[test]
    fn test_matches_formula() {
        for &(h, m, s, ms) in &[
            (0, 0, 0, 1),
            (0, 3, 27, 999),
            (0, 59, 59, 500),
            (1, 12, 5, 250),
            (2, 0, 0, 333),
        ] {
            let tc = format!("{h:02}:{m:02}:{s:02}:{ms:03}");
            assert_eq!(
                timecode_to_frames(&tc).unwrap(),
                reference_frames(h, m, s, ms),
                "timecode {tc}"
            );
        }
    }

    #[test]
    fn test_milliseconds_not_range_checked() {
        assert_eq!(timecode_to_frames("00:00:00:1500").unwrap(), 45);
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(timecode_to_frames(" 00:00:02:000\n").unwrap(), 60);
    }

    #[test]
    fn test_invalid_segment_count() {
        for input in ["", "00:05:15", "00:00:05:15:000", "garbage"] {
            let err = timecode_to_frames(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidTimecode { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_segments() {
        for input in ["00:05:xx:000", "00::15:000", "-1:00:00:000", "00:00:01.5:000"] {
            match timecode_to_frames(input) {
                Err(Error::InvalidTimecode { value, .. }) => assert_eq!(value, input),
                other => panic!("{input:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_overflow() {
        let err = timecode_to_frames("18446744073709551615:00:00:000").unwrap_err();
        assert!(matches!(err, Error::InvalidTimecode { .. }));
    }
}
