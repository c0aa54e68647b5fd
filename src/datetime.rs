//! W3C date and time format (`NOTE-datetime`) used by `dc:date`.
//!
//! Unlike general ISO 8601 parsing, the grammar here is strict:
//! - `YYYY`
//! - `YYYY-MM`
//! - `YYYY-MM-DD`
//! - `YYYY-MM-DDThh[:mm[:ss[.s+]]][Z|±hh:mm]`
//!
//! Components are validated against the proleptic Gregorian calendar,
//! and years must fit in four digits.

use std::fmt::Display;
use std::iter::Peekable;

const DELIMITERS: &[char] = &['-', 'T', ':', '.', '+', 'Z'];

/// A `dc:date` value that does not follow the W3C date and time format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct InvalidDate {
    detail: String,
}

impl InvalidDate {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Explanation of what is wrong with the value.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// A parsed W3C date with an optional time component.
///
/// # Examples
/// ```
/// # use opfcheck::DateTime;
/// let date = DateTime::parse("2011-09-27T14:05:33.25+02:00").unwrap();
///
/// assert_eq!(2011, date.year());
/// assert_eq!(Some(9), date.month());
/// assert_eq!(Some(27), date.day());
/// assert_eq!(Some(120), date.time().and_then(|time| time.offset()));
///
/// assert!(DateTime::parse("2011-").is_err());
/// assert!(DateTime::parse("20110").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
    time: Option<Time>,
}

/// The time portion of a [`DateTime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    /// Offset from UTC in minutes; [`None`] if no zone designator is present.
    offset: Option<i16>,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

/// Splits on [`DELIMITERS`], yielding delimiters as their own tokens.
struct Tokens<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let end = match self.remaining.find(DELIMITERS) {
            // The delimiter itself (all are one byte)
            Some(0) => 1,
            Some(position) => position,
            None => self.remaining.len(),
        };
        let (token, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        Some(token)
    }
}

type TokenStream<'a> = Peekable<Tokens<'a>>;

fn integer(token: Option<&str>) -> Result<u32, InvalidDate> {
    let token = token.ok_or_else(|| InvalidDate::new("Incomplete date."))?;

    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidDate::new(format!("[{token}] is not an integer")));
    }
    token
        .parse()
        .map_err(|_| InvalidDate::new(format!("[{token}] is not an integer")))
}

/// Consumes the next token, which must be `expected` and must be followed
/// by at least one more token.
///
/// Returns `false` if the stream is exhausted.
fn expect_then_more(tokens: &mut TokenStream<'_>, expected: &str) -> Result<bool, InvalidDate> {
    let Some(token) = tokens.next() else {
        return Ok(false);
    };
    if token != expected {
        return Err(InvalidDate::new(format!("Unexpected: {token}")));
    }
    if tokens.peek().is_none() {
        return Err(InvalidDate::new("Incomplete date."));
    }
    Ok(true)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn in_range(value: u32, max: u32, field: &str) -> Result<u8, InvalidDate> {
    u8::try_from(value)
        .ok()
        .filter(|v| u32::from(*v) <= max)
        .ok_or_else(|| InvalidDate::new(format!("{field} value {value} is out of range")))
}

impl DateTime {
    fn parse_tokens(tokens: &mut TokenStream<'_>) -> Result<Self, InvalidDate> {
        let year = integer(tokens.next())?;
        if year > 9999 {
            return Err(InvalidDate::new(year.to_string()));
        }
        if year == 0 {
            return Err(InvalidDate::new("year value 0 is out of range"));
        }
        // Checked above
        let year = year as u16;
        let mut date = Self {
            year,
            month: None,
            day: None,
            time: None,
        };

        if !expect_then_more(tokens, "-")? {
            return Ok(date);
        }
        let month = in_range(integer(tokens.next())?, 12, "month")?;
        if month == 0 {
            return Err(InvalidDate::new("month value 0 is out of range"));
        }
        date.month = Some(month);

        if !expect_then_more(tokens, "-")? {
            return Ok(date);
        }
        let day = in_range(integer(tokens.next())?, days_in_month(year, month).into(), "day")?;
        if day == 0 {
            return Err(InvalidDate::new("day value 0 is out of range"));
        }
        date.day = Some(day);

        if !expect_then_more(tokens, "T")? {
            return Ok(date);
        }
        date.time = Some(Time::parse_tokens(tokens)?);
        Ok(date)
    }

    /// Parses `raw` (surrounding whitespace ignored).
    ///
    /// # Errors
    /// [`InvalidDate`] describing the first offending component.
    pub fn parse(raw: &str) -> Result<Self, InvalidDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InvalidDate::new("zero-length string"));
        }
        Self::parse_tokens(&mut Tokens { remaining: raw }.peekable())
    }
}

impl Time {
    fn parse_tokens(tokens: &mut TokenStream<'_>) -> Result<Self, InvalidDate> {
        let mut time = Self {
            hour: in_range(integer(tokens.next())?, 23, "hour")?,
            minute: 0,
            second: 0,
            millisecond: 0,
            offset: None,
        };

        if !expect_then_more(tokens, ":")? {
            return Ok(time);
        }
        time.minute = in_range(integer(tokens.next())?, 59, "minute")?;

        let Some(mut token) = tokens.next() else {
            return Ok(time);
        };
        if token == ":" {
            if tokens.peek().is_none() {
                return Err(InvalidDate::new("No seconds specified"));
            }
            time.second = in_range(integer(tokens.next())?, 59, "second")?;

            let Some(next) = tokens.next() else {
                return Ok(time);
            };
            token = next;

            if token == "." {
                time.millisecond = Self::parse_fraction(tokens.next())?;

                let Some(next) = tokens.next() else {
                    return Ok(time);
                };
                token = next;
            }
        }

        time.offset = Some(Self::parse_zone(token, tokens)?);
        if let Some(extra) = tokens.next() {
            return Err(InvalidDate::new(format!(
                "Unexpected field at the end of the date field: {extra}"
            )));
        }
        Ok(time)
    }

    /// Only the first three digits are significant; the rest must still be digits.
    fn parse_fraction(token: Option<&str>) -> Result<u16, InvalidDate> {
        let token = token.ok_or_else(|| InvalidDate::new("Incomplete date."))?;

        if let Some(c) = token.chars().skip(3).find(|c| !c.is_ascii_digit()) {
            return Err(InvalidDate::new(format!(
                "Invalid digit in the decimal fraction of a second: {c}"
            )));
        }
        let mut millis = token.chars().take(3).collect::<String>();
        while millis.len() < 3 {
            millis.push('0');
        }
        Ok(integer(Some(millis.as_str()))? as u16)
    }

    fn parse_zone(designator: &str, tokens: &mut TokenStream<'_>) -> Result<i16, InvalidDate> {
        let sign = match designator {
            "Z" => return Ok(0),
            "+" => 1,
            "-" => -1,
            _ => return Err(InvalidDate::new("only Z, + or - allowed")),
        };
        if tokens.peek().is_none() {
            return Err(InvalidDate::new("Missing hour field"));
        }
        let hours = in_range(integer(tokens.next())?, 23, "zone hour")?;

        if !expect_then_more(tokens, ":")? {
            return Err(InvalidDate::new("Missing minute field"));
        }
        let minutes = in_range(integer(tokens.next())?, 59, "zone minute")?;

        Ok(sign * (i16::from(hours) * 60 + i16::from(minutes)))
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl DateTime {
    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    pub fn day(&self) -> Option<u8> {
        self.day
    }

    pub fn time(&self) -> Option<Time> {
        self.time
    }
}

impl Time {
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// The UTC offset in minutes, if a zone designator was given.
    pub fn offset(&self) -> Option<i16> {
        self.offset
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.year)?;

        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        if let Some(time) = self.time {
            write!(f, "T{time}")?;
        }
        Ok(())
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;

        if self.millisecond > 0 {
            write!(f, ".{:03}", self.millisecond)?;
        }
        match self.offset {
            Some(0) => f.write_str("Z"),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let offset = offset.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", offset / 60, offset % 60)
            }
            None => Ok(()),
        }
    }
}
