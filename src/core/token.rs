//! Tokens: the faces that pair cards together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The logical identity shared by exactly two cards in a deck.
///
/// The engine never interprets a token; it only compares them. Hosts
/// typically use image names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token(pub String);

impl Token {
    /// Create a token from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The token's label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Token {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors building a token set or a fixed deck layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokenSetError {
    #[error("token set is empty")]
    Empty,

    #[error("token {0} appears more than once")]
    DuplicateToken(Token),

    #[error("token {token} appears {count} times, expected 2")]
    UnpairedToken { token: Token, count: usize },
}

/// A non-empty set of distinct tokens. Each becomes one pair in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenSet {
    tokens: Vec<Token>,
}

impl TokenSet {
    /// Build a token set, rejecting empty input and duplicates.
    pub fn new<I, T>(tokens: I) -> Result<Self, TokenSetError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for token in tokens.into_iter().map(Into::into) {
            if !seen.insert(token.clone()) {
                return Err(TokenSetError::DuplicateToken(token));
            }
            out.push(token);
        }

        if out.is_empty() {
            return Err(TokenSetError::Empty);
        }

        Ok(Self { tokens: out })
    }

    /// The six classic portrait faces.
    #[must_use]
    pub fn classic() -> Self {
        let tokens = [
            "riley.jpg",
            "ren.jpg",
            "nona.jpg",
            "jonas.jpg",
            "clarrissa.jpg",
            "brother.jpg",
        ];
        Self {
            tokens: tokens.into_iter().map(Token::from).collect(),
        }
    }

    /// Number of tokens, which is also the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the set empty? Never true for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

impl TryFrom<Vec<Token>> for TokenSet {
    type Error = TokenSetError;

    fn try_from(tokens: Vec<Token>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

impl From<TokenSet> for Vec<Token> {
    fn from(set: TokenSet) -> Self {
        set.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::from("ren.jpg");
        assert_eq!(token.as_str(), "ren.jpg");
        assert_eq!(format!("{}", token), "ren.jpg");
    }

    #[test]
    fn test_token_set_new() {
        let set = TokenSet::new(["a", "b", "c"]).unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        let labels: Vec<_> = set.iter().map(Token::as_str).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_token_set_rejects_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(TokenSet::new(empty), Err(TokenSetError::Empty));
    }

    #[test]
    fn test_token_set_rejects_duplicates() {
        assert_eq!(
            TokenSet::new(["a", "b", "a"]),
            Err(TokenSetError::DuplicateToken(Token::from("a")))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<TokenSet>(r#"["x", "x"]"#);
        assert!(err.is_err());

        let set: TokenSet = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_classic_set() {
        let set = TokenSet::classic();
        assert_eq!(set.len(), 6);
        assert!(set.iter().any(|t| t.as_str() == "clarrissa.jpg"));
    }
}
