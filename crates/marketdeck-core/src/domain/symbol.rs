use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Externally supplied list of known symbols.
///
/// The dashboard validates user input only by membership here; the list
/// itself is an input (one symbol per line), not something this crate
/// curates.
#[derive(Debug, Clone, Default)]
pub struct SymbolUniverse {
    members: HashSet<String>,
}

impl SymbolUniverse {
    /// Build a universe from newline-style entries, skipping blanks and
    /// entries that do not parse as symbols.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = lines
            .into_iter()
            .filter_map(|line| Symbol::parse(line.as_ref()).ok())
            .map(String::from)
            .collect();
        Self { members }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.members.contains(symbol.as_str())
    }

    /// Reject symbols outside the universe. An empty universe accepts
    /// everything, so callers without a configured list stay permissive.
    pub fn validate(&self, symbol: &Symbol) -> Result<(), ValidationError> {
        if self.members.is_empty() || self.contains(symbol) {
            Ok(())
        } else {
            Err(ValidationError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
