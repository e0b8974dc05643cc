//! Rule outcomes and the checks shared by every dataset

use crate::{FatalReason, RawRow, SkipReason};

/// Result of running a rule battery over one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome<T> {
    /// Every rule passed
    Pass(T),

    /// A rule rejected the row; the run continues
    Skip(SkipReason),

    /// A rule found a condition that aborts the run
    Fatal(FatalReason),
}

impl<T> RuleOutcome<T> {
    /// Transform the passing value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RuleOutcome<U> {
        match self {
            RuleOutcome::Pass(value) => RuleOutcome::Pass(f(value)),
            RuleOutcome::Skip(reason) => RuleOutcome::Skip(reason),
            RuleOutcome::Fatal(reason) => RuleOutcome::Fatal(reason),
        }
    }
}

/// Early exit of a rule battery, so the rules can chain with `?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rejection {
    Skip(SkipReason),
    Fatal(FatalReason),
}

impl From<SkipReason> for Rejection {
    fn from(reason: SkipReason) -> Self {
        Rejection::Skip(reason)
    }
}

impl From<FatalReason> for Rejection {
    fn from(reason: FatalReason) -> Self {
        Rejection::Fatal(reason)
    }
}

impl Rejection {
    /// Fold a rule chain's result back into the public outcome
    pub(crate) fn outcome<T>(result: Result<T, Rejection>) -> RuleOutcome<T> {
        match result {
            Ok(value) => RuleOutcome::Pass(value),
            Err(Rejection::Skip(reason)) => RuleOutcome::Skip(reason),
            Err(Rejection::Fatal(reason)) => RuleOutcome::Fatal(reason),
        }
    }
}

/// Fatal when the row is wider than the schema
pub(crate) fn check_width(row: &RawRow, expected: usize, enforce: bool) -> Result<(), FatalReason> {
    if enforce && row.len() > expected {
        return Err(FatalReason::TooManyColumns {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

/// Skip unless the (trimmed) value parses as an integer
pub(crate) fn parse_integer(field: &'static str, value: &str) -> Result<i64, SkipReason> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| SkipReason::NotAnInteger {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("MovieID", " 42 "), Ok(42));
        assert_eq!(parse_integer("MovieID", "-3"), Ok(-3));
        assert!(matches!(
            parse_integer("MovieID", "4x"),
            Err(SkipReason::NotAnInteger { field: "MovieID", .. })
        ));
        assert!(parse_integer("MovieID", "").is_err());
    }

    #[test]
    fn test_check_width() {
        let row = RawRow::from_pairs(1, &[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        assert!(check_width(&row, 4, true).is_ok());
        assert_eq!(
            check_width(&row, 3, true),
            Err(FatalReason::TooManyColumns { expected: 3, found: 4 })
        );
        assert!(check_width(&row, 3, false).is_ok());
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Rejection::outcome(Ok(1u8)), RuleOutcome::Pass(1));
        let skip: Result<u8, Rejection> = Err(SkipReason::EmptyTitle.into());
        assert_eq!(Rejection::outcome(skip), RuleOutcome::Skip(SkipReason::EmptyTitle));
    }
}
