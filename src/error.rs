//! Error types raised while reading and decoding battle reports.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Class of a report violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong number of cards or lines.
    Shape,
    /// An expected literal prefix, suffix or marker is missing.
    Lexical,
    /// A digit scan or integer parse failed.
    Numeric,
    /// Unknown glyph or team letter, inconsistent census, or a team mismatch.
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shape => "shape",
            Self::Lexical => "lexical",
            Self::Numeric => "numeric",
            Self::Semantic => "semantic",
        })
    }
}

/// Where in the document a violation was found. Fields are filled in as the
/// error travels outward through the card and line parsers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub card: Option<usize>,
    pub line: Option<usize>,
    pub text: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = " in";
        if let Some(card) = self.card {
            write!(f, "{sep} card {card}")?;
            sep = ",";
        }
        if let Some(line) = self.line {
            write!(f, "{sep} line {line}")?;
        }
        if let Some(text) = &self.text {
            write!(f, " ({text:?})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} violation{location}: {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub location: Location,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: Location::default(),
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Shape, message)
    }

    pub fn lexical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical, message)
    }

    pub fn numeric(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Numeric, message)
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic, message)
    }

    /// Attaches the card index unless an inner parser already did.
    pub fn in_card(mut self, card: usize) -> Self {
        self.location.card.get_or_insert(card);
        self
    }

    /// Attaches the line index and its text unless already set.
    pub fn at_line(mut self, line: usize, text: &str) -> Self {
        if self.location.line.is_none() {
            self.location.line = Some(line);
            self.location.text = Some(text.to_string());
        }
        self
    }

    /// Attaches offending text without a line index.
    pub fn with_text(mut self, text: &str) -> Self {
        self.location.text.get_or_insert_with(|| text.to_string());
        self
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors surfaced by the CLI and server around the parser.
#[derive(Debug, Error)]
pub enum BattleLogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
