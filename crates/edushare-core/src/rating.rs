//! Rating values on the 1–10 scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of points on the rating scale (and symbols in the widget).
pub const RATING_SCALE: u8 = 10;

/// Rating parse/range errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("Rating out of range: {0} (expected 1..={RATING_SCALE})")]
    OutOfRange(i64),
    #[error("Invalid rating: {0:?}")]
    Invalid(String),
}

/// A committed rating, always in `1..=RATING_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: Rating = Rating(1);
    /// Highest rating.
    pub const MAX: Rating = Rating(RATING_SCALE);

    /// Create a rating, rejecting values outside the scale.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (1..=RATING_SCALE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(i64::from(value)))
        }
    }

    /// Create a rating, pulling out-of-range values onto the nearest end of the scale.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, i64::from(RATING_SCALE)) as u8)
    }

    /// Read a rating the way a submitted review form provides it.
    ///
    /// Unparseable input counts as 0, and the result is clamped, so a form
    /// posted without touching the widget still yields the lowest rating.
    pub fn from_form(raw: &str) -> Self {
        Self::clamped(raw.trim().parse::<i64>().unwrap_or(0))
    }

    /// The numeric value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| RatingError::Invalid(s.to_string()))?;
        u8::try_from(value)
            .map_err(|_| RatingError::OutOfRange(value))
            .and_then(Self::new)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a widget's initial-rating attribute.
///
/// Missing or unparseable values mean "unrated" (0); anything else is clamped
/// into `0..=RATING_SCALE`.
pub fn parse_initial(raw: Option<&str>) -> u8 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|v| v.clamp(0, i64::from(RATING_SCALE)) as u8)
        .unwrap_or(0)
}

/// Mean of a set of ratings rounded to two decimals (ties to even),
/// `None` when empty.
pub fn average<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r.get()), count + 1));
    if count == 0 {
        return None;
    }
    let mean = sum as f64 / count as f64;
    Some((mean * 100.0).round_ties_even() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(11).is_err());
        assert_eq!(Rating::new(7).unwrap().get(), 7);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Rating::clamped(-3), Rating::MIN);
        assert_eq!(Rating::clamped(0), Rating::MIN);
        assert_eq!(Rating::clamped(42), Rating::MAX);
        assert_eq!(Rating::clamped(6).get(), 6);
    }

    #[test]
    fn test_from_form() {
        assert_eq!(Rating::from_form(""), Rating::MIN);
        assert_eq!(Rating::from_form("abc"), Rating::MIN);
        assert_eq!(Rating::from_form("42"), Rating::MAX);
        assert_eq!(Rating::from_form(" 8 ").get(), 8);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("4".parse::<Rating>().unwrap().get(), 4);
        assert!(matches!("x".parse::<Rating>(), Err(RatingError::Invalid(_))));
        assert!(matches!("300".parse::<Rating>(), Err(RatingError::OutOfRange(300))));
        assert!(matches!("-1".parse::<Rating>(), Err(RatingError::OutOfRange(-1))));
    }

    #[test]
    fn test_parse_initial() {
        assert_eq!(parse_initial(None), 0);
        assert_eq!(parse_initial(Some("")), 0);
        assert_eq!(parse_initial(Some("seven")), 0);
        assert_eq!(parse_initial(Some("7")), 7);
        assert_eq!(parse_initial(Some("15")), 10);
        assert_eq!(parse_initial(Some("-2")), 0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(Vec::new()), None);
        let ratings = [3, 4, 4].map(|v| Rating::new(v).unwrap());
        assert_eq!(average(ratings), Some(3.67));
        assert_eq!(average([Rating::MAX]), Some(10.0));
    }

    #[test]
    fn test_average_ties_round_to_even() {
        let ratings = |values: [u8; 8]| values.map(|v| Rating::new(v).unwrap());
        // 9 / 8 = 1.125 and 21 / 8 = 2.625, both exact in binary.
        assert_eq!(average(ratings([2, 1, 1, 1, 1, 1, 1, 1])), Some(1.12));
        assert_eq!(average(ratings([3, 3, 3, 3, 3, 2, 2, 2])), Some(2.62));
        // 3.375 rounds up to the even digit.
        assert_eq!(average(ratings([4, 4, 4, 3, 3, 3, 3, 3])), Some(3.38));
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert_eq!(serde_json::from_str::<Rating>("9").unwrap().get(), 9);
        assert_eq!(serde_json::to_string(&Rating::MAX).unwrap(), "10");
    }
}
