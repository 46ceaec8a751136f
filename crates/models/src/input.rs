//! Parsing of raw form values into model fields.

use chrono::NaiveDate;

use crate::errors::ModelError;

pub const DATE_PATTERN: &str = "%Y-%m-%d";

fn blank_to_none(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|v| !v.is_empty())
}

/// Blank means absent; anything else must be an integer.
pub fn optional_int(field: &'static str, raw: &str) -> Result<Option<i32>, ModelError> {
    match blank_to_none(raw) {
        None => Ok(None),
        Some(v) => v.parse::<i32>().map(Some).map_err(|_| ModelError::invalid(field, v)),
    }
}

/// Like [`optional_int`], but a blank value is also invalid.
pub fn required_int(field: &'static str, raw: &str) -> Result<i32, ModelError> {
    optional_int(field, raw)?.ok_or_else(|| ModelError::invalid(field, raw))
}

/// Blank or unparseable dates both bind to `None`.
pub fn lenient_date(raw: &str) -> Option<NaiveDate> {
    blank_to_none(raw).and_then(|v| NaiveDate::parse_from_str(v, DATE_PATTERN).ok())
}

pub fn text(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_PATTERN).to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_int_accepts_blank_and_numbers() {
        assert_eq!(optional_int("duration", ""), Ok(None));
        assert_eq!(optional_int("duration", "  "), Ok(None));
        assert_eq!(optional_int("duration", " 117 "), Ok(Some(117)));
    }

    #[test]
    fn optional_int_rejects_garbage() {
        let err = optional_int("releaseDate", "soon").unwrap_err();
        assert_eq!(err.field(), "releaseDate");
        assert_eq!(err.to_string(), "invalid value for releaseDate: \"soon\"");
    }

    #[test]
    fn required_int_rejects_blank() {
        assert_eq!(required_int("actorId", " 12 "), Ok(12));
        assert_eq!(required_int("actorId", "").unwrap_err().field(), "actorId");
        assert!(required_int("actorId", "x1").is_err());
    }

    #[test]
    fn dates_are_lenient() {
        assert_eq!(lenient_date("1940-04-25"), NaiveDate::from_ymd_opt(1940, 4, 25));
        assert_eq!(lenient_date("25/04/1940"), None);
        assert_eq!(lenient_date(""), None);
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2001, 2, 3)), "2001-02-03");
        assert_eq!(format_date(None), "");
    }
}
