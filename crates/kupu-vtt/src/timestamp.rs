use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("empty timestamp")]
    Empty,
    #[error("expected MM:SS.mmm or HH:MM:SS.mmm, got '{0}'")]
    Shape(String),
    #[error("bad {field} in '{raw}'")]
    Component { field: &'static str, raw: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimingError {
    #[error("missing '-->' in timing line")]
    MissingArrow,
    #[error("invalid start time: {0}")]
    Start(#[source] TimestampError),
    #[error("invalid end time: {0}")]
    End(#[source] TimestampError),
    #[error("cue ends ({end}s) before it starts ({start}s)")]
    Reversed { start: f64, end: f64 },
}

/// Parse a WebVTT/SRT timestamp into seconds.
///
/// Accepts `HH:MM:SS.mmm` and the hour-less `MM:SS.mmm`, with `.` or `,`
/// before the fraction. The fraction is optional and may have any number of
/// digits.
pub fn parse_timestamp(raw: &str) -> Result<f64, TimestampError> {
    let t = raw.trim();
    if t.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = t.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(TimestampError::Shape(t.to_string())),
    };

    let hours = parse_digits(hours, "hours", t)?;
    let minutes = parse_digits(minutes, "minutes", t)?;
    let seconds = parse_seconds(seconds, t)?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Parse a full `start --> end [settings]` line into `(start, end)` seconds.
pub fn parse_timing_line(line: &str) -> Result<(f64, f64), TimingError> {
    let (start_raw, end_raw) = line.split_once("-->").ok_or(TimingError::MissingArrow)?;
    // Cue settings (`align:start position:10%`) trail the end timestamp.
    let end_raw = end_raw.split_whitespace().next().unwrap_or("");

    let start = parse_timestamp(start_raw).map_err(TimingError::Start)?;
    let end = parse_timestamp(end_raw).map_err(TimingError::End)?;
    if end < start {
        return Err(TimingError::Reversed { start, end });
    }
    Ok((start, end))
}

/// Render seconds as `HH:MM:SS.mmm`. Negative and non-finite inputs clamp to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = to_millis(seconds);
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let sec = total_secs % 60;
    let min = (total_secs / 60) % 60;
    let hour = total_secs / 3600;
    format!("{hour:02}:{min:02}:{sec:02}.{ms:03}")
}

/// Short `m:ss` label used next to each line of a transcript listing.
pub fn format_clock(seconds: f64) -> String {
    let total_secs = to_millis(seconds) / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

fn to_millis(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

fn parse_digits(part: &str, field: &'static str, raw: &str) -> Result<u64, TimestampError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(component(field, raw));
    }
    part.parse().map_err(|_| component(field, raw))
}

fn parse_seconds(part: &str, raw: &str) -> Result<f64, TimestampError> {
    let (whole, frac) = match part.split_once(['.', ',']) {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (part, None),
    };
    let whole = parse_digits(whole, "seconds", raw)? as f64;
    let Some(frac) = frac else {
        return Ok(whole);
    };
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(component("fraction", raw));
    }
    let frac_value: f64 = format!("0.{frac}")
        .parse()
        .map_err(|_| component("fraction", raw))?;
    Ok(whole + frac_value)
}

fn component(field: &'static str, raw: &str) -> TimestampError {
    TimestampError::Component {
        field,
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_forms() {
        assert_eq!(parse_timestamp("00:00:01.000").unwrap(), 1.0);
        assert_eq!(parse_timestamp("00:00:04.500").unwrap(), 4.5);
        assert_eq!(parse_timestamp("01:02:03.250").unwrap(), 3723.25);
        assert_eq!(parse_timestamp("02:03.250").unwrap(), 123.25);
        assert_eq!(parse_timestamp(" 00:00:08,250 ").unwrap(), 8.25);
        assert_eq!(parse_timestamp("00:00:07").unwrap(), 7.0);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert_eq!(parse_timestamp(""), Err(TimestampError::Empty));
        assert!(matches!(
            parse_timestamp("12"),
            Err(TimestampError::Shape(_))
        ));
        assert!(parse_timestamp("aa:00:01.000").is_err());
        assert!(parse_timestamp("00:00:01.").is_err());
        assert!(parse_timestamp("00:-1:01.000").is_err());
        assert!(parse_timestamp("00:00:1e3").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());
    }

    #[test]
    fn timing_line_ignores_cue_settings() {
        let (start, end) =
            parse_timing_line("00:00:01.000 --> 00:00:04.500 align:start position:10%").unwrap();
        assert_eq!((start, end), (1.0, 4.5));
    }

    #[test]
    fn timing_line_errors_are_specific() {
        assert_eq!(
            parse_timing_line("00:00:01.000 00:00:02.000"),
            Err(TimingError::MissingArrow)
        );
        assert!(matches!(
            parse_timing_line("bogus --> 00:00:02.000"),
            Err(TimingError::Start(_))
        ));
        assert!(matches!(
            parse_timing_line("00:00:01.000 -->"),
            Err(TimingError::End(TimestampError::Empty))
        ));
        assert_eq!(
            parse_timing_line("00:00:05.000 --> 00:00:02.000"),
            Err(TimingError::Reversed {
                start: 5.0,
                end: 2.0
            })
        );
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(format_timestamp(0.0), "00:00:00.000");
        assert_eq!(format_timestamp(3723.25), "01:02:03.250");
        assert_eq!(format_timestamp(-4.0), "00:00:00.000");
        assert_eq!(format_timestamp(f64::NAN), "00:00:00.000");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(4.5), "0:04");
    }
}
