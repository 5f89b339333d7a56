//! Calendar values of the eight XSD date/time primitives

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Which of the date/time primitives a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemporalKind {
    /// `xs:dateTime`
    DateTime,
    /// `xs:time`
    Time,
    /// `xs:date`
    Date,
    /// `xs:gYearMonth`
    GYearMonth,
    /// `xs:gYear`
    GYear,
    /// `xs:gMonthDay`
    GMonthDay,
    /// `xs:gDay`
    GDay,
    /// `xs:gMonth`
    GMonth,
}

impl TemporalKind {
    /// Whether values of this kind carry a time of day
    pub fn has_time(&self) -> bool {
        matches!(self, TemporalKind::DateTime | TemporalKind::Time)
    }
}

const TZ: &str = r"(?P<tz>Z|[+-][0-9]{2}:[0-9]{2})?";
const YEAR: &str = r"(?P<sign>-?)(?P<year>[0-9]{4,})";
const CLOCK: &str =
    r"(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})(?:\.(?P<frac>[0-9]+))?";

fn compile(body: String) -> Regex {
    Regex::new(&format!("^{}{}$", body, TZ)).expect("temporal grammar is a valid regex")
}

static DATETIME: Lazy<Regex> = Lazy::new(|| {
    compile(format!(
        "{}-(?P<month>[0-9]{{2}})-(?P<day>[0-9]{{2}})T{}",
        YEAR, CLOCK
    ))
});
static TIME: Lazy<Regex> = Lazy::new(|| compile(CLOCK.to_string()));
static DATE: Lazy<Regex> =
    Lazy::new(|| compile(format!("{}-(?P<month>[0-9]{{2}})-(?P<day>[0-9]{{2}})", YEAR)));
static GYEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| compile(format!("{}-(?P<month>[0-9]{{2}})", YEAR)));
static GYEAR: Lazy<Regex> = Lazy::new(|| compile(YEAR.to_string()));
static GMONTH_DAY: Lazy<Regex> =
    Lazy::new(|| compile("--(?P<month>[0-9]{2})-(?P<day>[0-9]{2})".to_string()));
static GDAY: Lazy<Regex> = Lazy::new(|| compile("---(?P<day>[0-9]{2})".to_string()));
static GMONTH: Lazy<Regex> = Lazy::new(|| compile("--(?P<month>[0-9]{2})--".to_string()));

fn grammar(kind: TemporalKind) -> &'static Regex {
    match kind {
        TemporalKind::DateTime => &DATETIME,
        TemporalKind::Time => &TIME,
        TemporalKind::Date => &DATE,
        TemporalKind::GYearMonth => &GYEAR_MONTH,
        TemporalKind::GYear => &GYEAR,
        TemporalKind::GMonthDay => &GMONTH_DAY,
        TemporalKind::GDay => &GDAY,
        TemporalKind::GMonth => &GMONTH,
    }
}

/// Whether `year` is a leap year in the proleptic Gregorian calendar
pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` of `year`; February has 29 days when the year is unknown
pub fn days_in_month(year: Option<i64>, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => match year {
            Some(y) if !is_leap_year(y) => 28,
            _ => 29,
        },
        _ => 0,
    }
}

/// A date/time value with an optional timezone offset
///
/// Fields that the kind does not have are `None`. Fractional seconds are kept
/// as a digit string without trailing zeros.
#[derive(Debug, Clone)]
pub struct XsdDateTime {
    kind: TemporalKind,
    year: Option<i64>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
    fraction: String,
    timezone: Option<i16>,
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Option<Option<T>> {
    match caps.name(name) {
        Some(m) => m.as_str().parse().ok().map(Some),
        None => Some(None),
    }
}

fn parse_year(sign: &str, digits: &str) -> Option<i64> {
    if digits.len() > 4 && digits.starts_with('0') {
        return None;
    }
    let year: i64 = digits.parse().ok()?;
    if year == 0 {
        return None;
    }
    Some(if sign == "-" { -year } else { year })
}

fn parse_timezone(tz: &str) -> Option<i16> {
    if tz == "Z" {
        return Some(0);
    }
    let sign: i16 = if tz.starts_with('-') { -1 } else { 1 };
    let hours: i16 = tz[1..3].parse().ok()?;
    let minutes: i16 = tz[4..6].parse().ok()?;
    if minutes > 59 || hours > 14 || (hours == 14 && minutes != 0) {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

impl XsdDateTime {
    /// Parse the lexical form of `kind`
    ///
    /// Hour 24 is accepted only as `24:00:00` and is rolled over to midnight
    /// of the following day. A rollover past the largest representable year
    /// fails like any other invalid value.
    pub fn parse(kind: TemporalKind, text: &str) -> Option<Self> {
        let caps = grammar(kind).captures(text)?;

        let year = match caps.name("year") {
            Some(m) => Some(parse_year(
                caps.name("sign").map_or("", |s| s.as_str()),
                m.as_str(),
            )?),
            None => None,
        };
        let month: Option<u8> = number(&caps, "month")?;
        let day: Option<u8> = number(&caps, "day")?;
        let hour: Option<u8> = number(&caps, "hour")?;
        let minute: Option<u8> = number(&caps, "minute")?;
        let second: Option<u8> = number(&caps, "second")?;
        let fraction = caps
            .name("frac")
            .map_or("", |m| m.as_str())
            .trim_end_matches('0')
            .to_string();
        let timezone = match caps.name("tz") {
            Some(m) => Some(parse_timezone(m.as_str())?),
            None => None,
        };

        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return None;
            }
        }
        if let Some(d) = day {
            let max = match month {
                Some(m) => days_in_month(year, m),
                None => 31,
            };
            if d < 1 || d > max {
                return None;
            }
        }
        if minute.map_or(false, |m| m > 59) || second.map_or(false, |s| s > 59) {
            return None;
        }

        let mut value = Self {
            kind,
            year,
            month,
            day,
            hour,
            minute,
            second,
            fraction,
            timezone,
        };

        match hour {
            Some(24) => {
                if minute != Some(0) || second != Some(0) || !value.fraction.is_empty() {
                    return None;
                }
                value.hour = Some(0);
                if kind == TemporalKind::DateTime {
                    value.add_days(1)?;
                }
            }
            Some(h) if h > 24 => return None,
            _ => {}
        }

        Some(value)
    }

    /// The primitive this value belongs to
    pub fn kind(&self) -> TemporalKind {
        self.kind
    }

    /// Year, negative for BCE years
    pub fn year(&self) -> Option<i64> {
        self.year
    }

    /// Month (1-12)
    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// Day of month
    pub fn day(&self) -> Option<u8> {
        self.day
    }

    /// Hour (0-23)
    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    /// Minute
    pub fn minute(&self) -> Option<u8> {
        self.minute
    }

    /// Whole seconds
    pub fn second(&self) -> Option<u8> {
        self.second
    }

    /// Fractional second digits without trailing zeros
    pub fn fraction(&self) -> &str {
        &self.fraction
    }

    /// Timezone offset in minutes east of UTC
    pub fn timezone(&self) -> Option<i16> {
        self.timezone
    }

    /// Move the date by `days`, skipping year zero. `None` when the year
    /// leaves the range of `i64`.
    fn add_days(&mut self, days: i64) -> Option<()> {
        let (Some(mut year), Some(mut month), Some(day)) = (self.year, self.month, self.day)
        else {
            return Some(());
        };
        let mut day = i64::from(day).checked_add(days)?;
        while day > i64::from(days_in_month(Some(year), month)) {
            day -= i64::from(days_in_month(Some(year), month));
            month += 1;
            if month > 12 {
                month = 1;
                year = year.checked_add(1)?;
                if year == 0 {
                    year = 1;
                }
            }
        }
        while day < 1 {
            month -= 1;
            if month < 1 {
                month = 12;
                year = year.checked_sub(1)?;
                if year == 0 {
                    year = -1;
                }
            }
            day += i64::from(days_in_month(Some(year), month));
        }
        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day as u8);
        Some(())
    }

    /// The same instant expressed in UTC, for kinds with a time of day.
    /// Values without a timezone are taken as UTC. `None` when the shift
    /// carries the year out of range.
    fn normalized(&self) -> Option<XsdDateTime> {
        let mut out = self.clone();
        let (Some(offset), Some(hour), Some(minute)) = (self.timezone, self.hour, self.minute)
        else {
            return Some(out);
        };
        let total = i64::from(hour) * 60 + i64::from(minute) - i64::from(offset);
        let day_shift = total.div_euclid(1440);
        let in_day = total.rem_euclid(1440);
        out.hour = Some((in_day / 60) as u8);
        out.minute = Some((in_day % 60) as u8);
        out.timezone = Some(0);
        if self.kind == TemporalKind::DateTime && day_shift != 0 {
            out.add_days(day_shift)?;
        }
        Some(out)
    }

    fn order_key(&self) -> (i64, u8, u8, u8, u8, u8, &str) {
        (
            self.year.unwrap_or(0),
            self.month.unwrap_or(0),
            self.day.unwrap_or(0),
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.fraction.as_str(),
        )
    }

    /// Compare two values of the same kind
    ///
    /// The comparison is lenient: when only one side carries a timezone the
    /// other is taken as UTC instead of reporting the order as indeterminate.
    pub fn compare(&self, other: &XsdDateTime) -> Option<Ordering> {
        if self.kind != other.kind {
            return None;
        }
        if self.kind.has_time() {
            let (a, b) = (self.normalized()?, other.normalized()?);
            Some(a.order_key().cmp(&b.order_key()))
        } else {
            Some(self.order_key().cmp(&other.order_key()))
        }
    }

    /// Value-space equality: same kind, same instant, and timezones either
    /// both absent or both present (and equal for date-only kinds)
    pub fn value_eq(&self, other: &XsdDateTime) -> bool {
        if self.timezone.is_some() != other.timezone.is_some() {
            return false;
        }
        if !self.kind.has_time() && self.timezone != other.timezone {
            return false;
        }
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Convert a `dateTime` to a chrono timestamp (timezone offset dropped)
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        if self.kind != TemporalKind::DateTime {
            return None;
        }
        let nanos: u32 = if self.fraction.is_empty() {
            0
        } else {
            format!("{:0<9}", &self.fraction[..self.fraction.len().min(9)])
                .parse()
                .ok()?
        };
        self.to_naive_date()?.and_hms_nano_opt(
            u32::from(self.hour?),
            u32::from(self.minute?),
            u32::from(self.second?),
            nanos,
        )
    }

    /// Convert a `date` or `dateTime` to a chrono date
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::try_from(self.year?).ok()?,
            u32::from(self.month?),
            u32::from(self.day?),
        )
    }
}

impl fmt::Display for XsdDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            let y = self.year.unwrap_or(0);
            if y < 0 {
                f.write_str("-")?;
            }
            write!(f, "{:04}", y.unsigned_abs())
        };
        let clock = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            write!(
                f,
                "{:02}:{:02}:{:02}",
                self.hour.unwrap_or(0),
                self.minute.unwrap_or(0),
                self.second.unwrap_or(0)
            )?;
            if !self.fraction.is_empty() {
                write!(f, ".{}", self.fraction)?;
            }
            Ok(())
        };
        let month = self.month.unwrap_or(0);
        let day = self.day.unwrap_or(0);

        match self.kind {
            TemporalKind::DateTime => {
                year(f)?;
                write!(f, "-{:02}-{:02}T", month, day)?;
                clock(f)?;
            }
            TemporalKind::Time => clock(f)?,
            TemporalKind::Date => {
                year(f)?;
                write!(f, "-{:02}-{:02}", month, day)?;
            }
            TemporalKind::GYearMonth => {
                year(f)?;
                write!(f, "-{:02}", month)?;
            }
            TemporalKind::GYear => year(f)?,
            TemporalKind::GMonthDay => write!(f, "--{:02}-{:02}", month, day)?,
            TemporalKind::GDay => write!(f, "---{:02}", day)?,
            TemporalKind::GMonth => write!(f, "--{:02}--", month)?,
        }

        match self.timezone {
            Some(0) => f.write_str("Z"),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let abs = offset.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
            None => Ok(()),
        }
    }
}

impl Serialize for XsdDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(kind: TemporalKind, s: &str) -> Option<String> {
        XsdDateTime::parse(kind, s).map(|v| v.to_string())
    }

    #[test]
    fn test_datetime_grammar() {
        use TemporalKind::DateTime;
        let same = |s: &str, canonical: &str| {
            assert_eq!(parse(DateTime, s).as_deref(), Some(canonical), "{}", s);
        };
        same("2024-01-15T10:30:00", "2024-01-15T10:30:00");
        same("2024-01-15T10:30:00.500Z", "2024-01-15T10:30:00.5Z");
        same("2024-01-15T10:30:00+00:00", "2024-01-15T10:30:00Z");
        same("-0044-03-15T12:00:00-05:30", "-0044-03-15T12:00:00-05:30");
        same("12024-01-15T10:30:00", "12024-01-15T10:30:00");

        assert!(parse(DateTime, "2024-01-15").is_none());
        assert!(parse(DateTime, "024-01-15T10:30:00").is_none());
        assert!(parse(DateTime, "02024-01-15T10:30:00").is_none());
        assert!(parse(DateTime, "0000-01-15T10:30:00").is_none());
        assert!(parse(DateTime, "2024-13-15T10:30:00").is_none());
        assert!(parse(DateTime, "2023-02-29T10:30:00").is_none());
        assert!(parse(DateTime, "2024-01-15T10:60:00").is_none());
        assert!(parse(DateTime, "2024-01-15T10:30:00+15:00").is_none());
        assert!(parse(DateTime, "2024-01-15T10:30:00.").is_none());
    }

    #[test]
    fn test_hour_24() {
        use TemporalKind::{DateTime, Time};
        assert_eq!(
            parse(DateTime, "1999-12-31T24:00:00").as_deref(),
            Some("2000-01-01T00:00:00")
        );
        assert_eq!(parse(Time, "24:00:00Z").as_deref(), Some("00:00:00Z"));
        assert!(parse(DateTime, "1999-09-16T24:01:00").is_none());
        assert!(parse(DateTime, "1999-09-16T24:00:01").is_none());
        assert!(parse(DateTime, "1999-09-16T24:00:00.1").is_none());
        assert!(parse(DateTime, "1999-09-16T25:00:00").is_none());
    }

    #[test]
    fn test_partial_kinds() {
        assert_eq!(parse(TemporalKind::GYear, "1999").as_deref(), Some("1999"));
        assert_eq!(parse(TemporalKind::GYearMonth, "1999-05Z").as_deref(), Some("1999-05Z"));
        assert_eq!(parse(TemporalKind::GMonthDay, "--02-29").as_deref(), Some("--02-29"));
        assert_eq!(parse(TemporalKind::GDay, "---31").as_deref(), Some("---31"));
        assert_eq!(parse(TemporalKind::GMonth, "--05--").as_deref(), Some("--05--"));
        assert_eq!(parse(TemporalKind::GMonth, "--05--+09:00").as_deref(), Some("--05--+09:00"));

        assert!(parse(TemporalKind::GMonth, "--05").is_none());
        assert!(parse(TemporalKind::GMonthDay, "--04-31").is_none());
        assert!(parse(TemporalKind::GDay, "---32").is_none());
        assert!(parse(TemporalKind::GYear, "99").is_none());
    }

    #[test]
    fn test_lenient_compare() {
        let a = XsdDateTime::parse(TemporalKind::DateTime, "2000-01-01T12:00:00+01:00").unwrap();
        let b = XsdDateTime::parse(TemporalKind::DateTime, "2000-01-01T11:00:00Z").unwrap();
        let c = XsdDateTime::parse(TemporalKind::DateTime, "2000-01-01T11:30:00").unwrap();
        assert_eq!(a.compare(&b), Some(Ordering::Equal));
        assert!(a.value_eq(&b));
        assert_eq!(a.compare(&c), Some(Ordering::Less));
        let local = XsdDateTime::parse(TemporalKind::DateTime, "2000-01-01T11:00:00").unwrap();
        assert!(!b.value_eq(&local));
    }

    #[test]
    fn test_timezone_crosses_midnight() {
        let late = XsdDateTime::parse(TemporalKind::DateTime, "2000-12-31T23:00:00-02:00").unwrap();
        let utc = XsdDateTime::parse(TemporalKind::DateTime, "2001-01-01T01:00:00Z").unwrap();
        assert!(late.value_eq(&utc));
    }

    #[test]
    fn test_chrono_interop() {
        let v = XsdDateTime::parse(TemporalKind::DateTime, "2024-02-29T08:15:30.25").unwrap();
        let naive = v.to_naive_date_time().unwrap();
        assert_eq!(naive.to_string(), "2024-02-29 08:15:30.250");
        let year = XsdDateTime::parse(TemporalKind::GYear, "2024").unwrap();
        assert!(year.to_naive_date_time().is_none());
    }

    #[test]
    fn test_rollover_at_year_extremes() {
        use TemporalKind::DateTime;
        let max = i64::MAX;
        assert!(parse(DateTime, &format!("{}-12-31T24:00:00", max)).is_none());
        assert_eq!(
            parse(DateTime, &format!("{}-12-30T24:00:00", max)),
            Some(format!("{}-12-31T00:00:00", max))
        );
        assert_eq!(
            parse(DateTime, "-0001-12-31T24:00:00").as_deref(),
            Some("0001-01-01T00:00:00")
        );
    }

    #[test]
    fn test_normalization_out_of_range_is_unordered() {
        let text = format!("{}-12-31T23:00:00-02:00", i64::MAX);
        let edge = XsdDateTime::parse(TemporalKind::DateTime, &text).unwrap();
        assert_eq!(edge.compare(&edge), None);
        assert!(!edge.value_eq(&edge));
    }
}
