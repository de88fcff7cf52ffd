//! Field parsing utilities for harness output
//!
//! Numeric tokens are validated against the signed decimal grammar
//! (`[-+]?\d+(\.\d+)?([eE][-+]?\d+)?`) before conversion, so inputs such as
//! `inf`, `nan`, `.5` or `1e` are rejected even though Rust's float parser
//! would accept some of them.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{INTEGER_PATTERN, NUMBER_PATTERN};
use crate::{Error, Result};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", NUMBER_PATTERN)).expect("static regex must compile")
});

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}$", INTEGER_PATTERN)).expect("static regex must compile")
});

/// Parse a required floating-point field
///
/// `line` is the 0-based position of the line the token came from and is
/// reported in the error.
pub fn parse_number(token: &str, line: usize) -> Result<f64> {
    let token = token.trim();

    if !NUMBER_RE.is_match(token) {
        return Err(Error::malformed_number(token, line));
    }

    token
        .parse::<f64>()
        .map_err(|_| Error::malformed_number(token, line))
}

/// Parse a required integer index field
pub fn parse_index(token: &str, line: usize) -> Result<i64> {
    let token = token.trim();

    if !INTEGER_RE.is_match(token) {
        return Err(Error::malformed_number(token, line));
    }

    token
        .parse::<i64>()
        .map_err(|_| Error::malformed_number(token, line))
}

/// Split a delimited line into trimmed fields
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_grammar() {
        assert_eq!(parse_number("0.10", 0).unwrap(), 0.10);
        assert_eq!(parse_number("-0.1243", 0).unwrap(), -0.1243);
        assert_eq!(parse_number("+3", 0).unwrap(), 3.0);
        assert_eq!(parse_number("42", 0).unwrap(), 42.0);
        assert_eq!(parse_number("1e-8", 0).unwrap(), 1e-8);
        assert_eq!(parse_number("2.5E+03", 0).unwrap(), 2500.0);
        assert_eq!(parse_number("  0.5000 ", 0).unwrap(), 0.5);
    }

    #[test]
    fn test_parse_number_rejects_malformed() {
        for token in ["", "abc", ".5", "5.", "1e", "1.2.3", "inf", "nan", "--1", "1,0", "0x10"] {
            match parse_number(token, 7) {
                Err(Error::MalformedNumber { token: t, line }) => {
                    assert_eq!(t, token.trim());
                    assert_eq!(line, 7);
                }
                other => panic!("expected MalformedNumber for {:?}, got {:?}", token, other),
            }
        }
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("20", 0).unwrap(), 20);
        assert_eq!(parse_index(" 5", 0).unwrap(), 5);
        assert_eq!(parse_index("-1", 0).unwrap(), -1);
        assert!(matches!(
            parse_index("2.0", 3),
            Err(Error::MalformedNumber { line: 3, .. })
        ));
        assert!(parse_index("99999999999999999999", 0).is_err());
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(
            split_fields(" 0, 0.10,  0.1000 ,1.0", ','),
            vec!["0", "0.10", "0.1000", "1.0"]
        );
        assert_eq!(split_fields("", ','), vec![""]);
    }
}
