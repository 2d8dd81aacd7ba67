//! Turn cards.
//!
//! ```text
//! 🇻🇦Alice turn
//! target: 🇲🇴Bob 120HP, strikes: 2
//! strike! dmg: 42. Pdef was: 7
//! miss!
//! 🇲🇴Bob 78HP left
//! ```

use tracing::trace;

use crate::battle::{Turn, User};
use crate::error::{ParseError, ParseResult};
use crate::parser::glyph::{decode_strike, decode_user, starts_with_team_glyph};

const TURN_SUFFIX: &str = " turn";
const TARGET_PREFIX: &str = "target: ";
const TARGET_MARKER: &str = "HP, strikes: ";
const ARROW_SUFFIX: &str = "retrieved an arrow";

/// Index of the first strike line.
const FIRST_STRIKE_LINE: usize = 2;

pub fn parse_turn(lines: &[String]) -> ParseResult<Turn> {
    let attacker_line = lines
        .first()
        .ok_or_else(|| ParseError::shape("turn card has no lines"))?;
    let attacker = parse_attacker(attacker_line).map_err(|err| err.at_line(0, attacker_line))?;

    // Announcement turns (buffs, skipped actions) stop after the attacker.
    if lines.len() <= FIRST_STRIKE_LINE {
        trace!(%attacker, "announcement turn");
        return Ok(Turn {
            attacker,
            target: None,
            strikes: Vec::new(),
        });
    }

    let target_line = &lines[1];
    let target = parse_target(target_line).map_err(|err| err.at_line(1, target_line))?;

    let strike_lines = trim_trailing_annotations(&lines[FIRST_STRIKE_LINE..]);
    if strike_lines.is_empty() {
        return Err(ParseError::shape(format!(
            "turn of {attacker} has no strike lines before its trailing annotations"
        )));
    }

    let strikes = strike_lines
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            decode_strike(line).map_err(|err| err.at_line(FIRST_STRIKE_LINE + offset, line))
        })
        .collect::<ParseResult<Vec<_>>>()?;

    trace!(%attacker, %target, strikes = strikes.len(), "parsed turn");
    Ok(Turn {
        attacker,
        target: Some(target),
        strikes,
    })
}

fn parse_attacker(line: &str) -> ParseResult<User> {
    let identity = line
        .strip_suffix(TURN_SUFFIX)
        .ok_or_else(|| ParseError::lexical(format!("attacker line must end with {TURN_SUFFIX:?}")))?;
    decode_user(identity)
}

fn parse_target(line: &str) -> ParseResult<User> {
    let rest = line
        .strip_prefix(TARGET_PREFIX)
        .ok_or_else(|| ParseError::lexical(format!("target line must start with {TARGET_PREFIX:?}")))?;
    let marker = rest
        .find(TARGET_MARKER)
        .ok_or_else(|| ParseError::lexical(format!("target line has no {TARGET_MARKER:?} marker")))?;
    let head = &rest[..marker];
    let name_end = head
        .rfind(' ')
        .ok_or_else(|| ParseError::lexical("target line has no space before its HP value"))?;
    decode_user(&head[..name_end])
}

/// Drops trailing footnote lines (starting with a team glyph) and
/// arrow-recovery lines.
fn trim_trailing_annotations(lines: &[String]) -> &[String] {
    let keep = lines
        .iter()
        .rposition(|line| !is_annotation(line))
        .map_or(0, |last| last + 1);
    &lines[..keep]
}

fn is_annotation(line: &str) -> bool {
    starts_with_team_glyph(line) || line.ends_with(ARROW_SUFFIX)
}
