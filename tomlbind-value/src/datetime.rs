//! Datetime value type for representing temporal data.
//!
//! [`Datetime`] supports the four datetime categories from TOML:
//! - Offset Date-Time: `1979-05-27T07:32:00Z` or `1979-05-27T07:32:00+01:30`
//! - Local Date-Time: `1979-05-27T07:32:00`
//! - Local Date: `1979-05-27`
//! - Local Time: `07:32:00`

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

/// The kind of datetime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatetimeKind {
    /// Offset date-time with UTC offset in minutes.
    /// e.g., `1979-05-27T07:32:00Z` (offset=0) or `1979-05-27T07:32:00+05:30` (offset=330)
    Offset {
        /// Offset from UTC in minutes. Range: -1440 to +1440 (±24 hours).
        offset_minutes: i16,
    },

    /// Local date-time without offset (civil time).
    /// e.g., `1979-05-27T07:32:00`
    LocalDatetime,

    /// Local date only.
    /// e.g., `1979-05-27`
    LocalDate,

    /// Local time only.
    /// e.g., `07:32:00`
    LocalTime,
}

/// A datetime value.
///
/// Components that do not apply to the [`DatetimeKind`] are zero: a local time
/// has year/month/day of 0, a local date has hour/minute/second/nanos of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datetime {
    /// Year. For LocalTime, this is 0.
    pub year: u16,
    /// Month (1-12). For LocalTime, this is 0.
    pub month: u8,
    /// Day (1-31). For LocalTime, this is 0.
    pub day: u8,
    /// Hour (0-23). For LocalDate, this is 0.
    pub hour: u8,
    /// Minute (0-59). For LocalDate, this is 0.
    pub minute: u8,
    /// Second (0-59, or 60 for leap second). For LocalDate, this is 0.
    pub second: u8,
    /// Nanoseconds (0-999_999_999). For LocalDate, this is 0.
    pub nanos: u32,
    /// The kind of datetime
    pub kind: DatetimeKind,
}

impl Default for Datetime {
    /// `0000-00-00`, the zero value used for unset datetime fields.
    ///
    /// Month and day 0 are out of range for TOML, so no parsed document or
    /// literal produces this value.
    fn default() -> Self {
        Self::local_date(0, 0, 0)
    }
}

impl Datetime {
    /// Creates a new offset date-time.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn offset(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
        offset_minutes: i16,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            kind: DatetimeKind::Offset { offset_minutes },
        }
    }

    /// Creates a new local date-time (no offset).
    #[must_use]
    pub const fn local_datetime(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            kind: DatetimeKind::LocalDatetime,
        }
    }

    /// Creates a new local date.
    #[must_use]
    pub const fn local_date(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanos: 0,
            kind: DatetimeKind::LocalDate,
        }
    }

    /// Creates a new local time.
    #[must_use]
    pub const fn local_time(hour: u8, minute: u8, second: u8, nanos: u32) -> Self {
        Self {
            year: 0,
            month: 0,
            day: 0,
            hour,
            minute,
            second,
            nanos,
            kind: DatetimeKind::LocalTime,
        }
    }

    /// Returns true if this datetime has a date component.
    #[must_use]
    pub fn has_date(&self) -> bool {
        !matches!(self.kind, DatetimeKind::LocalTime)
    }

    /// Returns true if this datetime has a time component.
    #[must_use]
    pub fn has_time(&self) -> bool {
        !matches!(self.kind, DatetimeKind::LocalDate)
    }

    /// Returns the UTC offset in minutes, if any.
    #[must_use]
    pub fn offset_minutes(&self) -> Option<i16> {
        match self.kind {
            DatetimeKind::Offset { offset_minutes } => Some(offset_minutes),
            _ => None,
        }
    }
}

impl Display for Datetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.has_date() {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        }
        if self.has_date() && self.has_time() {
            f.write_str("T")?;
        }
        if self.has_time() {
            write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
            if self.nanos > 0 {
                let frac = format!("{:09}", self.nanos);
                write!(f, ".{}", frac.trim_end_matches('0'))?;
            }
        }
        if let Some(offset_minutes) = self.offset_minutes() {
            if offset_minutes == 0 {
                f.write_str("Z")?;
            } else {
                let sign = if offset_minutes >= 0 { '+' } else { '-' };
                let abs = offset_minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)?;
            }
        }
        Ok(())
    }
}

/// Error returned when a string is not a valid TOML datetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatetimeParseError {
    input: String,
    reason: &'static str,
}

impl DatetimeParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl Display for DatetimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid datetime `{}`: {}", self.input, self.reason)
    }
}

impl core::error::Error for DatetimeParseError {}

impl FromStr for Datetime {
    type Err = DatetimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| DatetimeParseError::new(s, reason);

        // Local time: no date part at all.
        if s.len() >= 3 && s.as_bytes()[2] == b':' {
            let (hour, minute, second, nanos, rest) = parse_time(s).ok_or_else(|| err("bad time"))?;
            if !rest.is_empty() {
                return Err(err("trailing characters after time"));
            }
            return Ok(Datetime::local_time(hour, minute, second, nanos));
        }

        let (year, month, day) = parse_date(s).ok_or_else(|| err("bad date"))?;
        let rest = &s[10..];
        if rest.is_empty() {
            return Ok(Datetime::local_date(year, month, day));
        }

        let rest = match rest.as_bytes()[0] {
            b'T' | b't' | b' ' => &rest[1..],
            _ => return Err(err("expected `T` between date and time")),
        };
        let (hour, minute, second, nanos, rest) = parse_time(rest).ok_or_else(|| err("bad time"))?;

        if rest.is_empty() {
            return Ok(Datetime::local_datetime(
                year, month, day, hour, minute, second, nanos,
            ));
        }

        let offset_minutes = parse_offset(rest).ok_or_else(|| err("bad offset"))?;
        Ok(Datetime::offset(
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            offset_minutes,
        ))
    }
}

fn digits<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_date(s: &str) -> Option<(u16, u8, u8)> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year = digits::<u16>(s.get(0..4)?)?;
    let month = digits::<u8>(s.get(5..7)?)?;
    let day = digits::<u8>(s.get(8..10)?)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

fn parse_time(s: &str) -> Option<(u8, u8, u8, u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = digits::<u8>(s.get(0..2)?)?;
    let minute = digits::<u8>(s.get(3..5)?)?;
    let second = digits::<u8>(s.get(6..8)?)?;
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }

    let mut rest = &s[8..];
    let mut nanos = 0;
    if let Some(frac) = rest.strip_prefix('.') {
        let len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return None;
        }
        // Precision beyond nanoseconds is truncated.
        let mut padded = frac[..len.min(9)].to_string();
        while padded.len() < 9 {
            padded.push('0');
        }
        nanos = digits::<u32>(&padded)?;
        rest = &frac[len..];
    }
    Some((hour, minute, second, nanos, rest))
}

fn parse_offset(s: &str) -> Option<i16> {
    if s == "Z" || s == "z" {
        return Some(0);
    }
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let body = &s[1..];
    if body.len() != 5 || body.as_bytes()[2] != b':' {
        return None;
    }
    let hours = digits::<i16>(body.get(0..2)?)?;
    let minutes = digits::<i16>(body.get(3..5)?)?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_kinds() {
        let odt: Datetime = "1979-05-27T07:32:00Z".parse().unwrap();
        assert_eq!(odt.kind, DatetimeKind::Offset { offset_minutes: 0 });
        assert_eq!(odt.year, 1979);

        let odt: Datetime = "1979-05-27T00:32:00.999999-07:00".parse().unwrap();
        assert_eq!(odt.offset_minutes(), Some(-420));
        assert_eq!(odt.nanos, 999_999_000);

        let ldt: Datetime = "1979-05-27 07:32:00".parse().unwrap();
        assert_eq!(ldt.kind, DatetimeKind::LocalDatetime);

        let ld: Datetime = "1979-05-27".parse().unwrap();
        assert_eq!(ld, Datetime::local_date(1979, 5, 27));

        let lt: Datetime = "07:32:00".parse().unwrap();
        assert_eq!(lt, Datetime::local_time(7, 32, 0, 0));
    }

    #[test]
    fn display_matches_toml_text() {
        for text in [
            "1979-05-27T07:32:00Z",
            "1979-05-27T07:32:00+05:30",
            "1979-05-27T07:32:00.5",
            "1979-05-27",
            "07:32:00",
        ] {
            let dt: Datetime = text.parse().unwrap();
            assert_eq!(dt.to_string(), text);
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Datetime>().is_err());
        assert!("1979-13-01".parse::<Datetime>().is_err());
        assert!("1979-05-27X07:32:00".parse::<Datetime>().is_err());
        assert!("25:00:00".parse::<Datetime>().is_err());
        assert!("1979-05-27T07:32:00+5".parse::<Datetime>().is_err());
    }
}
