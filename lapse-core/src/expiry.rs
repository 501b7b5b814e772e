//! Expiry evaluation: date parsing, days-remaining arithmetic, and
//! threshold classification.
//!
//! Everything here is pure. The current date is injected by the caller,
//! network and process concerns live elsewhere, and the classifier returns
//! a value instead of exiting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LapseError, Result};

/// One probe invocation: the domain to check plus the two alerting
/// thresholds in days. The evaluator does not enforce
/// `crit_days <= warn_days`; a supervisor that configures them inverted
/// gets the literal first-match semantics of [`ExpiryStatus::classify`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryQuery {
    pub domain: String,
    pub warn_days: i64,
    pub crit_days: i64,
}

impl ExpiryQuery {
    pub fn new(domain: impl Into<String>, warn_days: i64, crit_days: i64) -> Self {
        Self {
            domain: domain.into(),
            warn_days,
            crit_days,
        }
    }
}

/// The expiry cell as extracted from the registrar page: an abbreviated
/// month name plus day and year, still as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExpiryDate {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl RawExpiryDate {
    pub fn new(month: impl Into<String>, day: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            day: day.into(),
            year: year.into(),
        }
    }
}

impl std::fmt::Display for RawExpiryDate {
    /// Renders the literal wire form used by the registrar, e.g. `Dec, 31, 2025`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.month, self.day, self.year)
    }
}

/// Three-level probe status, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Ok,
    Warning,
    Critical,
}

impl ExpiryStatus {
    /// Exit code expected by monitoring supervisors: 0/1/2.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExpiryStatus::Ok => 0,
            ExpiryStatus::Warning => 1,
            ExpiryStatus::Critical => 2,
        }
    }

    /// Classify a positive days-remaining count against the thresholds.
    ///
    /// First match wins:
    /// 1. `days_remaining <= 0` produces `None`: the reference probe never
    ///    evaluated thresholds for a domain already at or past expiry, so
    ///    no status exists for that range. Callers pick the fallback
    ///    policy; see `Evaluation`.
    /// 2. `crit_days > days_remaining` is Critical. The bound is
    ///    exclusive: `days_remaining == crit_days` is not Critical.
    /// 3. `warn_days > days_remaining` is Warning, same exclusivity.
    /// 4. Anything else is Ok.
    pub fn classify(days_remaining: i64, warn_days: i64, crit_days: i64) -> Option<ExpiryStatus> {
        if days_remaining <= 0 {
            return None;
        }
        if crit_days > days_remaining {
            Some(ExpiryStatus::Critical)
        } else if warn_days > days_remaining {
            Some(ExpiryStatus::Warning)
        } else {
            Some(ExpiryStatus::Ok)
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            ExpiryStatus::Ok => "Ok",
            ExpiryStatus::Warning => "Warning",
            ExpiryStatus::Critical => "Critical",
        };
        f.write_str(word)
    }
}

/// Immutable result of one evaluation. Maps directly to one printed line
/// and one exit code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub domain: String,
    pub status: ExpiryStatus,
    pub days_remaining: i64,
    pub expiry_date: NaiveDate,
    pub message: String,
}

/// Parse the raw registrar triplet into a calendar date.
///
/// The month must be a recognizable abbreviated (or full) English month
/// name and day/year must be numeric; anything else, including impossible
/// dates like Feb 30, is a `DateParse` error.
pub fn parse_expiry_date(raw: &RawExpiryDate) -> Result<NaiveDate> {
    let composed = format!("{} {} {}", raw.month, raw.day, raw.year);
    NaiveDate::parse_from_str(&composed, "%b %d %Y")
        .map_err(|_| LapseError::DateParse(raw.to_string()))
}

/// Whole days from `today` to `expiry`. Negative when already past,
/// zero when the domain expires today.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Run the full evaluation for one query against one extracted date.
///
/// Returns `Ok(None)` when `days_remaining <= 0` — the range the
/// classifier declines to judge. `today` is a parameter so the whole
/// path stays deterministic under test.
pub fn evaluate(
    query: &ExpiryQuery,
    raw: &RawExpiryDate,
    today: NaiveDate,
) -> Result<Option<Evaluation>> {
    let expiry_date = parse_expiry_date(raw)?;
    let days_remaining = days_until(expiry_date, today);

    let Some(status) = ExpiryStatus::classify(days_remaining, query.warn_days, query.crit_days)
    else {
        return Ok(None);
    };

    let message = format!(
        "{}: {} Will Expire in {} days. {}",
        status, query.domain, days_remaining, raw
    );

    Ok(Some(Evaluation {
        domain: query.domain.clone(),
        status,
        days_remaining,
        expiry_date,
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_warning_band() {
        assert_eq!(
            ExpiryStatus::classify(45, 60, 30),
            Some(ExpiryStatus::Warning)
        );
    }

    #[test]
    fn test_classify_critical_band() {
        assert_eq!(
            ExpiryStatus::classify(10, 60, 30),
            Some(ExpiryStatus::Critical)
        );
    }

    #[test]
    fn test_classify_ok_band() {
        assert_eq!(ExpiryStatus::classify(90, 60, 30), Some(ExpiryStatus::Ok));
    }

    #[test]
    fn test_classify_critical_bound_is_exclusive() {
        // 30 > 30 is false, so the critical check falls through to the
        // warning check (60 > 30).
        assert_eq!(
            ExpiryStatus::classify(30, 60, 30),
            Some(ExpiryStatus::Warning)
        );
        // Same at the warning bound: 60 > 60 is false.
        assert_eq!(ExpiryStatus::classify(60, 60, 30), Some(ExpiryStatus::Ok));
    }

    #[test]
    fn test_classify_nonpositive_days_yields_no_status() {
        // Known gap carried over from the reference probe: at or past
        // expiry, no status is evaluated at all.
        assert_eq!(ExpiryStatus::classify(0, 60, 30), None);
        assert_eq!(ExpiryStatus::classify(-5, 60, 30), None);
    }

    #[test]
    fn test_classify_band_edges_exhaustively() {
        let (w, c) = (60, 30);
        for d in 1..=120 {
            let status = ExpiryStatus::classify(d, w, c).unwrap();
            let expected = if c > d {
                ExpiryStatus::Critical
            } else if d < w {
                ExpiryStatus::Warning
            } else {
                ExpiryStatus::Ok
            };
            assert_eq!(status, expected, "days_remaining={}", d);
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExpiryStatus::Ok.exit_code(), 0);
        assert_eq!(ExpiryStatus::Warning.exit_code(), 1);
        assert_eq!(ExpiryStatus::Critical.exit_code(), 2);
    }

    #[test]
    fn test_parse_expiry_date() {
        let raw = RawExpiryDate::new("Dec", "31", "2025");
        assert_eq!(parse_expiry_date(&raw).unwrap(), date(2025, 12, 31));

        let raw = RawExpiryDate::new("Feb", "29", "2024");
        assert_eq!(parse_expiry_date(&raw).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_expiry_date_rejects_bad_input() {
        // Unrecognized month token
        assert!(parse_expiry_date(&RawExpiryDate::new("Dic", "31", "2025")).is_err());
        // Non-numeric day / year
        assert!(parse_expiry_date(&RawExpiryDate::new("Dec", "3x", "2025")).is_err());
        assert!(parse_expiry_date(&RawExpiryDate::new("Dec", "31", "20-25")).is_err());
        // Impossible calendar date
        assert!(parse_expiry_date(&RawExpiryDate::new("Feb", "30", "2025")).is_err());
    }

    #[test]
    fn test_raw_date_display_round_trip() {
        let raw = RawExpiryDate::new("Dec", "31", "2025");
        assert_eq!(raw.to_string(), "Dec, 31, 2025");
        let parsed = parse_expiry_date(&raw).unwrap();
        assert_eq!(parsed.format("%b, %-d, %Y").to_string(), raw.to_string());
    }

    #[test]
    fn test_days_until() {
        let today = date(2025, 1, 1);
        assert_eq!(days_until(date(2025, 1, 31), today), 30);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(date(2024, 12, 31), today), -1);
    }

    #[test]
    fn test_days_until_antisymmetry() {
        let a = date(2025, 3, 14);
        let b = date(2026, 7, 2);
        assert_eq!(days_until(a, b), -days_until(b, a));
    }

    #[test]
    fn test_evaluate_message_format() {
        let query = ExpiryQuery::new("finja.pk", 60, 30);
        let raw = RawExpiryDate::new("Dec", "31", "2025");
        let today = date(2025, 11, 16); // 45 days out

        let eval = evaluate(&query, &raw, today).unwrap().unwrap();
        assert_eq!(eval.status, ExpiryStatus::Warning);
        assert_eq!(eval.days_remaining, 45);
        assert_eq!(eval.expiry_date, date(2025, 12, 31));
        assert_eq!(
            eval.message,
            "Warning: finja.pk Will Expire in 45 days. Dec, 31, 2025"
        );
    }

    #[test]
    fn test_evaluate_expired_domain_produces_nothing() {
        let query = ExpiryQuery::new("finja.pk", 60, 30);
        let raw = RawExpiryDate::new("Jan", "1", "2020");
        let today = date(2025, 1, 1);

        // Documented edge case, asserted rather than assumed fixed.
        assert!(evaluate(&query, &raw, today).unwrap().is_none());
    }

    #[test]
    fn test_evaluate_propagates_parse_error() {
        let query = ExpiryQuery::new("finja.pk", 60, 30);
        let raw = RawExpiryDate::new("???", "31", "2025");
        assert!(evaluate(&query, &raw, date(2025, 1, 1)).is_err());
    }
}
