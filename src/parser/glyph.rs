//! Glyph and token primitives shared by the census, turn and timestamp
//! parsers.
//!
//! Glyphs are matched as whole strings (flags are two regional indicators),
//! picking the longest table entry that prefixes the text. A single trailing
//! U+FE0F variation selector after a glyph is ignored.

use crate::battle::{Hit, Strike, Team, User};
use crate::error::{ParseError, ParseResult};

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Identity glyphs. The monster faction shows up with two different glyphs.
pub const TEAM_GLYPHS: &[(&str, Team)] = &[
    ("🇲🇴", Team::Green),
    ("🇻🇦", Team::Yellow),
    ("🇪🇺", Team::Blue),
    ("🇮🇲", Team::Red),
    ("👹", Team::Monster),
    ("🐲", Team::Monster),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Weakness,
    /// Marker glyphs seen in reports whose meaning is not known. They are
    /// stripped and otherwise ignored.
    Unidentified,
    Counter,
}

pub const STRIKE_MODIFIERS: &[(&str, Modifier)] = &[
    ("⚡", Modifier::Weakness),
    ("🔥", Modifier::Unidentified),
    ("❄", Modifier::Unidentified),
    ("⚔", Modifier::Counter),
];

const MISS: &str = "miss!";
const COUNTER_ANCHOR: &str = "strike! dmg:";
const CRIT_WORD: &str = "crit ";
const DEFENSE_SEPARATOR: &str = ". Pdef was: ";

/// Strike announcements, each paired with its crit flag.
const STRIKE_PREFIXES: &[(&str, bool)] = &[
    ("strike! dmg: ", false),
    ("crit strike! dmg: ", true),
    ("💧strike! dmg: ", false),
    ("💧crit strike! dmg: ", true),
];

fn skip_variation_selector(text: &str) -> &str {
    text.strip_prefix(VARIATION_SELECTOR).unwrap_or(text)
}

/// Longest table glyph prefixing `text`, with the remainder after the glyph.
pub fn match_glyph<'a, T: Copy>(table: &[(&str, T)], text: &'a str) -> Option<(T, &'a str)> {
    table
        .iter()
        .filter(|(glyph, _)| text.starts_with(glyph))
        .max_by_key(|(glyph, _)| glyph.len())
        .map(|(glyph, value)| (*value, skip_variation_selector(&text[glyph.len()..])))
}

/// First literal prefix of `table` that `text` starts with, in table order.
pub fn strip_any_prefix<'a, T: Copy>(table: &[(&str, T)], text: &'a str) -> Option<(T, &'a str)> {
    table
        .iter()
        .find_map(|(prefix, value)| text.strip_prefix(prefix).map(|rest| (*value, rest)))
}

pub fn starts_with_team_glyph(text: &str) -> bool {
    match_glyph(TEAM_GLYPHS, text).is_some()
}

/// Splits a leading team glyph off `text`.
pub fn decode_team(text: &str) -> ParseResult<(Team, &str)> {
    match_glyph(TEAM_GLYPHS, text).ok_or_else(|| {
        let glyph = text.chars().next().map_or_else(|| "nothing".to_string(), |c| format!("{c:?}"));
        ParseError::semantic(format!("unrecognized team glyph {glyph}")).with_text(text)
    })
}

/// Decodes a glyph-prefixed identity such as `🇻🇦Alice`.
pub fn decode_user(text: &str) -> ParseResult<User> {
    let (team, rest) = decode_team(text.trim_start())?;
    let name = rest.trim();
    if name.is_empty() {
        return Err(ParseError::lexical("identity has no name after its team glyph").with_text(text));
    }
    Ok(User::new(team, name))
}

/// Strips an optional leading modifier glyph from a strike line.
pub fn strip_modifier(line: &str) -> (Option<Modifier>, &str) {
    match match_glyph(STRIKE_MODIFIERS, line) {
        Some((modifier, rest)) => (Some(modifier), rest.trim_start()),
        None => (None, line),
    }
}

/// Decodes one strike line.
pub fn decode_strike(line: &str) -> ParseResult<Strike> {
    let (modifier, body) = strip_modifier(line);
    if body == MISS {
        return Ok(Strike::Miss);
    }

    let counter = modifier == Some(Modifier::Counter);
    let body = if counter {
        // A counter-attack nests its own strike announcement mid-line.
        let Some(anchor) = body.find(COUNTER_ANCHOR) else {
            return Ok(Strike::UnresolvedCounter);
        };
        if body[..anchor].ends_with(CRIT_WORD) {
            &body[anchor - CRIT_WORD.len()..]
        } else {
            &body[anchor..]
        }
    } else {
        body
    };

    let (crit, rest) = strip_any_prefix(STRIKE_PREFIXES, body)
        .ok_or_else(|| ParseError::lexical("unrecognized strike announcement").with_text(line))?;

    let mut parts = rest.split(DEFENSE_SEPARATOR);
    let (Some(damage), Some(defense), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::lexical(format!(
            "expected exactly one {DEFENSE_SEPARATOR:?} separator"
        ))
        .with_text(line));
    };

    Ok(Strike::Hit(Hit {
        damage: parse_signed(damage, "damage", line)?,
        target_defense: parse_signed(defense, "target defense", line)?,
        crit,
        weakness: modifier == Some(Modifier::Weakness),
        counter,
    }))
}

fn parse_signed(token: &str, field: &str, line: &str) -> ParseResult<i64> {
    token
        .parse::<i64>()
        .map_err(|err| ParseError::numeric(format!("invalid {field} {token:?}: {err}")).with_text(line))
}

/// Parses the space-delimited unsigned number ending at byte offset `end`
/// (exclusive).
pub fn scan_number_backwards(text: &str, end: usize) -> ParseResult<u64> {
    let head = text
        .get(..end)
        .ok_or_else(|| ParseError::numeric(format!("offset {end} is outside the line")).with_text(text))?;
    let token = head.rsplit(' ').next().unwrap_or_default();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(
            ParseError::numeric(format!("expected digits before offset {end}, found {token:?}")).with_text(text),
        );
    }
    token.parse::<u64>().map_err(|err| {
        ParseError::numeric(format!("expected a number before offset {end}, found {token:?}: {err}"))
            .with_text(text)
    })
}
