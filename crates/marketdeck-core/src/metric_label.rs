//! Human-readable labels for camelCase/PascalCase metric identifiers.

use std::sync::OnceLock;

use regex::Regex;

fn boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    // An uppercase letter directly preceded by a non-uppercase word
    // character marks a word boundary. Runs of uppercase (EBIT) stay intact.
    BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9_])([A-Z])").expect("boundary pattern is valid"))
}

/// Insert a space before each lowercase-to-uppercase boundary.
///
/// The first character's case is untouched and already-spaced input passes
/// through unchanged, so the function is idempotent.
pub fn format(identifier: &str) -> String {
    boundary().replace_all(identifier, "$1 $2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_pascal_case() {
        assert_eq!(format("ReturnOnEquity"), "Return On Equity");
    }

    #[test]
    fn splits_camel_case_without_touching_first_char() {
        assert_eq!(format("grossProfit"), "gross Profit");
    }

    #[test]
    fn leaves_acronyms_alone() {
        assert_eq!(format("EBIT"), "EBIT");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(format(""), "");
    }

    #[test]
    fn is_idempotent() {
        for input in ["ReturnOnEquity", "grossProfit", "EBIT", "Total Revenue", ""] {
            let once = format(input);
            assert_eq!(format(&once), once, "format must be idempotent on {input:?}");
        }
    }

    #[test]
    fn splits_after_digits() {
        assert_eq!(format("tier1Capital"), "tier1 Capital");
    }
}
