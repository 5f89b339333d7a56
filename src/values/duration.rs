//! `xs:duration` values

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<sign>-)?P(?:(?P<y>[0-9]+)Y)?(?:(?P<mo>[0-9]+)M)?(?:(?P<d>[0-9]+)D)?",
        r"(?P<t>T(?:(?P<h>[0-9]+)H)?(?:(?P<mi>[0-9]+)M)?(?:(?P<s>[0-9]+(?:\.[0-9]*)?)S)?)?$",
    ))
    .expect("duration grammar is a valid regex")
});

/// Average number of seconds in a month, used to order durations that mix
/// months and seconds
const SECONDS_PER_MONTH: i64 = 2_629_746;

/// An `xs:duration` held as a signed (months, seconds) pair
#[derive(Debug, Clone)]
pub struct XsdDuration {
    negative: bool,
    months: u64,
    seconds: Decimal,
}

fn component(caps: &regex::Captures<'_>, name: &str) -> Option<Decimal> {
    match caps.name(name) {
        Some(m) => m.as_str().trim_end_matches('.').parse::<Decimal>().ok(),
        None => Some(Decimal::ZERO),
    }
}

impl XsdDuration {
    /// Parse `PnYnMnDTnHnMnS` with an optional leading `-`
    ///
    /// At least one component must be present, and a `T` must be followed
    /// by at least one time component.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = DURATION.captures(text)?;

        let has_date = ["y", "mo", "d"].iter().any(|n| caps.name(n).is_some());
        let has_time = ["h", "mi", "s"].iter().any(|n| caps.name(n).is_some());
        if caps.name("t").is_some() && !has_time {
            return None;
        }
        if !has_date && !has_time {
            return None;
        }

        let years: u64 = caps.name("y").map_or(Some(0), |m| m.as_str().parse().ok())?;
        let months: u64 = caps.name("mo").map_or(Some(0), |m| m.as_str().parse().ok())?;
        let months = years.checked_mul(12)?.checked_add(months)?;

        let days = component(&caps, "d")?;
        let hours = component(&caps, "h")?;
        let minutes = component(&caps, "mi")?;
        let secs = component(&caps, "s")?;
        let seconds = days
            .checked_mul(Decimal::from(86_400))?
            .checked_add(hours.checked_mul(Decimal::from(3_600))?)?
            .checked_add(minutes.checked_mul(Decimal::from(60))?)?
            .checked_add(secs)?;

        let is_zero = months == 0 && seconds.is_zero();
        Some(Self {
            negative: caps.name("sign").is_some() && !is_zero,
            months,
            seconds,
        })
    }

    /// Whether the duration is negative
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Total months (years folded in), without sign
    pub fn months(&self) -> u64 {
        self.months
    }

    /// Total seconds (days, hours and minutes folded in), without sign
    pub fn seconds(&self) -> Decimal {
        self.seconds
    }

    fn signed_total(&self) -> Option<Decimal> {
        let months = Decimal::from(i64::try_from(self.months).ok()?);
        let total = months
            .checked_mul(Decimal::from(SECONDS_PER_MONTH))?
            .checked_add(self.seconds)?;
        Some(if self.negative { -total } else { total })
    }

    /// Order two durations by their length in seconds, counting a month as
    /// its average length
    pub fn compare(&self, other: &XsdDuration) -> Option<Ordering> {
        Some(self.signed_total()?.cmp(&other.signed_total()?))
    }

    /// Value-space equality: same sign, months and seconds
    pub fn value_eq(&self, other: &XsdDuration) -> bool {
        self.negative == other.negative
            && self.months == other.months
            && self.seconds == other.seconds
    }
}

impl fmt::Display for XsdDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 && self.seconds.is_zero() {
            return f.write_str("PT0S");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        let (years, months) = (self.months / 12, self.months % 12);
        if years > 0 {
            write!(f, "{}Y", years)?;
        }
        if months > 0 {
            write!(f, "{}M", months)?;
        }

        let day = Decimal::from(86_400);
        let days = (self.seconds / day).trunc();
        let mut rest = self.seconds - days * day;
        if !days.is_zero() {
            write!(f, "{}D", days.normalize())?;
        }

        let hours = (rest / Decimal::from(3_600)).trunc();
        rest -= hours * Decimal::from(3_600);
        let minutes = (rest / Decimal::from(60)).trunc();
        rest -= minutes * Decimal::from(60);

        if hours.is_zero() && minutes.is_zero() && rest.is_zero() {
            return Ok(());
        }
        f.write_str("T")?;
        if !hours.is_zero() {
            write!(f, "{}H", hours.normalize())?;
        }
        if !minutes.is_zero() {
            write!(f, "{}M", minutes.normalize())?;
        }
        if !rest.is_zero() {
            write!(f, "{}S", rest.normalize())?;
        }
        Ok(())
    }
}

impl Serialize for XsdDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
