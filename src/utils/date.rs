//! W3C datetime utilities without timezone database dependencies.
//!
//! Sitemaps carry `<lastmod>` values in the W3C Datetime profile of
//! ISO 8601. This module parses the common input shapes and always emits the
//! full form with an explicit UTC offset.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTime::parse("2024-06-15").unwrap();
//! assert_eq!(dt.to_w3c(), "2024-06-15T00:00:00+00:00");
//!
//! let dt = DateTime::parse("2024-06-15T14:30:45+02:00").unwrap();
//! assert_eq!(dt.to_w3c(), "2024-06-15T14:30:45+02:00");
//! ```

use anyhow::{Result, bail};
use std::fmt;
use std::time::SystemTime;

/// Calendar datetime with a fixed UTC offset (in minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub offset_minutes: i16,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes: 0,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    pub const fn with_offset(mut self, offset_minutes: i16) -> Self {
        self.offset_minutes = offset_minutes;
        self
    }

    /// Current wall-clock time in UTC.
    pub fn now_utc() -> Self {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix(secs)
    }

    /// Convert seconds since the Unix epoch to a UTC datetime.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn from_unix(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;

        // Civil-from-days over 400-year eras
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self::new(
            year as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    /// Parse a W3C datetime.
    ///
    /// Accepted shapes:
    /// - `YYYY-MM-DD`
    /// - `YYYY-MM-DDTHH:MM:SS` followed by `Z` or `±HH:MM`
    /// - the same with fractional seconds (`.123`), which are dropped
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        if bytes.len() == 10 {
            let dt = Self::from_ymd(year, month, day);
            dt.validate().ok()?;
            return Some(dt);
        }

        if bytes.len() < 20 || bytes[10] != b'T' || bytes[13] != b':' || bytes[16] != b':' {
            return None;
        }
        let hour = parse_u8(&bytes[11..13])?;
        let minute = parse_u8(&bytes[14..16])?;
        let second = parse_u8(&bytes[17..19])?;

        // Skip fractional seconds
        let mut rest = &bytes[19..];
        if rest.first() == Some(&b'.') {
            let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            rest = &rest[1 + digits..];
        }

        let offset_minutes = parse_offset(rest)?;
        let dt = Self::new(year, month, day, hour, minute, second).with_offset(offset_minutes);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }
        if offset_minutes.abs() > 14 * 60 {
            bail!("offset is invalid: {offset_minutes} minutes");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as a full W3C datetime with an explicit offset.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SS±HH:MM`
    pub fn to_w3c(self) -> String {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let offset = self.offset_minutes.unsigned_abs();
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            offset / 60,
            offset % 60
        )
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_w3c())
    }
}

/// Parse `Z`, `+HH:MM` or `-HH:MM` into minutes east of UTC.
fn parse_offset(bytes: &[u8]) -> Option<i16> {
    match bytes {
        [b'Z'] => Some(0),
        [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2] => {
            let hours = i16::from(parse_u8(&[*h1, *h2])?);
            let minutes = i16::from(parse_u8(&[*m1, *m2])?);
            if minutes > 59 {
                return None;
            }
            let total = hours * 60 + minutes;
            Some(if *sign == b'-' { -total } else { total })
        }
        _ => None,
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
