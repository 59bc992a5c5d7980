use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::ledger::error::LedgerError;

/// Textual date pattern shared by the ledger columns and every caller-facing
/// date. All salary dates are stored and exchanged in this form.
pub const DATE_PATTERN: &str = "%d/%m/%Y";

/// Parse a ledger date. Anything that does not match the pattern surfaces as
/// `DateFormat`; dates are never silently coerced.
pub fn parse(text: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(text, DATE_PATTERN).map_err(|_| LedgerError::DateFormat {
        text: text.to_owned(),
    })
}

/// Render a date in the ledger pattern. `format(parse(s)) == s` holds for
/// every canonical (zero-padded) string `s`.
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_PATTERN).to_string()
}

/// Chronological comparison of two encoded dates.
pub fn compare(a: &str, b: &str) -> Result<Ordering, LedgerError> {
    Ok(parse(a)?.cmp(&parse(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_strings() {
        for s in ["01/01/2024", "29/02/2024", "31/12/1999", "05/11/2021"] {
            let parsed = parse(s).unwrap();
            assert_eq!(format(parsed), s);
        }
    }

    #[test]
    fn rejects_malformed_text() {
        for s in ["2024-01-01", "32/01/2024", "01/13/2024", "today", ""] {
            match parse(s) {
                Err(LedgerError::DateFormat { text }) => assert_eq!(text, s),
                other => panic!("expected DateFormat for {s:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn compares_chronologically() {
        assert_eq!(compare("01/01/2024", "01/02/2024").unwrap(), Ordering::Less);
        assert_eq!(compare("01/02/2024", "01/01/2024").unwrap(), Ordering::Greater);
        assert_eq!(compare("15/06/2024", "15/06/2024").unwrap(), Ordering::Equal);
        // day-first, not month-first: 02/01 is January 2nd
        assert_eq!(compare("02/01/2024", "01/02/2024").unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_propagates_parse_failure() {
        assert!(matches!(
            compare("01/01/2024", "not a date"),
            Err(LedgerError::DateFormat { .. })
        ));
    }
}
