use serde::Serialize;

use crate::battle::{aggregate, rank_players, Battle, PlayerResume};
use crate::error::{ErrorKind, ParseError};
use crate::parser::{parse_html, ParseOptions};

#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub battle: Battle,
    /// Players ranked by descending damage.
    pub players: Vec<PlayerResume>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseErrorResponse {
    pub status: &'static str,
    pub kind: ErrorKind,
    pub message: String,
    pub location: crate::error::Location,
}

impl From<&ParseError> for ParseErrorResponse {
    fn from(err: &ParseError) -> Self {
        Self {
            status: "error",
            kind: err.kind,
            message: err.to_string(),
            location: err.location.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ParsePayloadError {
    EmptyBody,
    Parse(ParseError),
    Encode(serde_json::Error),
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "battlelog-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Parses the report markup in `body` and returns the battle with its ranked
/// player resume.
pub fn parse_payload(body: &str, options: &ParseOptions) -> Result<String, ParsePayloadError> {
    if body.trim().is_empty() {
        return Err(ParsePayloadError::EmptyBody);
    }
    let battle = parse_html(body, options).map_err(ParsePayloadError::Parse)?;
    let players = aggregate(&battle.turns).map_err(ParsePayloadError::Parse)?;
    let response = ParseResponse {
        players: rank_players(&players),
        battle,
    };
    serde_json::to_string_pretty(&response).map_err(ParsePayloadError::Encode)
}
