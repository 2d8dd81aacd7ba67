//! Battle report grammar.
//!
//! A report is a sequence of `class="card"` containers: the pre-battle census,
//! a timestamp, one card per turn and a trailing footer. Each card is flattened
//! to text lines and decoded by its own parser. Any violation aborts the whole
//! document; callers never see a partially built [`Battle`].

pub mod census;
pub mod dom;
pub mod glyph;
pub mod timestamp;
pub mod turn;

use scraper::Html;
use tracing::debug;

use crate::battle::Battle;
use crate::error::ParseResult;

pub use census::parse_census;
pub use dom::{flatten_lines, segment_cards};
pub use timestamp::parse_timestamp;
pub use turn::parse_turn;

/// Offset of the report's clock from UTC.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 2;

/// Values the report does not carry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub year: i32,
    pub utc_offset_hours: i32,
}

impl ParseOptions {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = hours;
        self
    }
}

/// Parses report markup into a [`Battle`].
pub fn parse_html(markup: &str, options: &ParseOptions) -> ParseResult<Battle> {
    let document = Html::parse_document(markup);
    parse_document(&document, options)
}

pub fn parse_document(document: &Html, options: &ParseOptions) -> ParseResult<Battle> {
    let cards = segment_cards(dom::body(document))?;

    let resume = parse_census(&flatten_lines(cards.census)).map_err(|err| err.in_card(0))?;
    let date = parse_timestamp(&flatten_lines(cards.timestamp), options).map_err(|err| err.in_card(1))?;

    let turns = cards
        .turns
        .iter()
        .enumerate()
        .map(|(offset, card)| {
            parse_turn(&flatten_lines(*card)).map_err(|err| err.in_card(dom::FIRST_TURN_CARD + offset))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    debug!(
        turns = turns.len(),
        factions = resume.teams.len(),
        date = %date,
        "parsed battle report"
    );
    Ok(Battle { date, resume, turns })
}
