//! Applicant age validation from a date of birth.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Inclusive age range accepted by the fellowship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self { min: 18, max: 25 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeValidation {
    pub is_valid: bool,
    pub age: Option<u32>,
    pub error: Option<String>,
}

impl AgeValidation {
    fn valid(age: u32) -> Self {
        Self {
            is_valid: true,
            age: Some(age),
            error: None,
        }
    }

    fn invalid(age: Option<u32>, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            age,
            error: Some(error.into()),
        }
    }
}

/// Parse the date formats seen in stored records
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
}

/// Full years elapsed between `dob` and `today`; `None` if `dob` is in the future
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    if dob > today {
        return None;
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

pub fn validate_age(dob: Option<&str>, today: NaiveDate) -> AgeValidation {
    validate_age_with(dob, today, AgeBounds::default())
}

pub fn validate_age_with(dob: Option<&str>, today: NaiveDate, bounds: AgeBounds) -> AgeValidation {
    let Some(raw) = dob.filter(|raw| !raw.trim().is_empty()) else {
        return AgeValidation::invalid(None, "Date of birth is required");
    };

    let Some(date) = parse_date_of_birth(raw) else {
        return AgeValidation::invalid(None, format!("Invalid date of birth: {}", raw.trim()));
    };

    let Some(age) = age_on(date, today) else {
        return AgeValidation::invalid(None, "Date of birth cannot be in the future");
    };

    if age < bounds.min {
        AgeValidation::invalid(
            Some(age),
            format!(
                "Applicant must be at least {} years old (currently {})",
                bounds.min, age
            ),
        )
    } else if age > bounds.max {
        AgeValidation::invalid(
            Some(age),
            format!(
                "Applicant must be {} years old or younger (currently {})",
                bounds.max, age
            ),
        )
    } else {
        AgeValidation::valid(age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_age_boundaries() {
        let cases = [
            ("2006-06-16", 17, false),
            ("2006-06-15", 18, true),
            ("1998-06-16", 25, true),
            ("1998-06-15", 26, false),
        ];
        for (dob, age, valid) in cases {
            let result = validate_age(Some(dob), today());
            assert_eq!(result.age, Some(age), "{dob}");
            assert_eq!(result.is_valid, valid, "{dob}");
            assert_eq!(result.error.is_some(), !valid, "{dob}");
        }
    }

    #[test]
    fn test_error_messages() {
        let young = validate_age(Some("2010-01-01"), today());
        assert_eq!(
            young.error.as_deref(),
            Some("Applicant must be at least 18 years old (currently 14)")
        );
        assert_eq!(
            validate_age(None, today()).error.as_deref(),
            Some("Date of birth is required")
        );
        assert_eq!(
            validate_age(Some("  "), today()).error.as_deref(),
            Some("Date of birth is required")
        );
        assert_eq!(
            validate_age(Some("yesterday"), today()).error.as_deref(),
            Some("Invalid date of birth: yesterday")
        );
        assert_eq!(
            validate_age(Some("2030-01-01"), today()).error.as_deref(),
            Some("Date of birth cannot be in the future")
        );
    }

    #[test]
    fn test_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2002, 3, 9);
        assert_eq!(parse_date_of_birth("2002-03-09"), expected);
        assert_eq!(parse_date_of_birth("2002-03-09T00:00:00Z"), expected);
        assert_eq!(parse_date_of_birth("2002-03-09T00:00:00.000"), expected);
        assert_eq!(parse_date_of_birth("09/03/2002"), expected);
    }

    #[test]
    fn test_leap_day_birthday() {
        let dob = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2022, 2, 28).unwrap()), Some(17));
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()), Some(18));
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = AgeBounds { min: 21, max: 30 };
        assert!(!validate_age_with(Some("2004-01-01"), today(), bounds).is_valid);
        assert!(validate_age_with(Some("1996-01-01"), today(), bounds).is_valid);
    }
}
