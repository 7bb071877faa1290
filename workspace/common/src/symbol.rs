use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while turning user text into a [`Symbol`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol must not be empty")]
    Empty,
}

/// Normalized stock ticker.
///
/// Always trimmed and uppercased, never empty. The only way to build one is
/// [`Symbol::parse`] (or its `FromStr`/`TryFrom` equivalents).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trim and uppercase raw text. Whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, SymbolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_uppercases() {
        let symbol = Symbol::parse("aapl ").unwrap();
        assert_eq!(symbol.as_str(), "AAPL");

        let symbol = Symbol::parse("\t msft\n").unwrap();
        assert_eq!(symbol.as_str(), "MSFT");
    }

    #[test]
    fn test_parse_keeps_inner_characters() {
        let symbol = Symbol::parse(" brk.b ").unwrap();
        assert_eq!(symbol.as_str(), "BRK.B");
    }

    #[test]
    fn test_parse_rejects_empty_and_whitespace() {
        assert_eq!(Symbol::parse(""), Err(SymbolError::Empty));
        assert_eq!(Symbol::parse("   "), Err(SymbolError::Empty));
        assert_eq!(Symbol::parse("\n\t"), Err(SymbolError::Empty));
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        let symbol: Symbol = "TSLA".parse().unwrap();
        assert_eq!(symbol.to_string(), "TSLA");
    }

    #[test]
    fn test_serde_goes_through_parse() {
        let symbol: Symbol = serde_json::from_str("\" nvda \"").unwrap();
        assert_eq!(symbol.as_str(), "NVDA");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"NVDA\"");

        let empty: Result<Symbol, _> = serde_json::from_str("\"  \"");
        assert!(empty.is_err());
    }
}
