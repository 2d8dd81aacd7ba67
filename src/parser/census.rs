//! Pre-battle census card.
//!
//! ```text
//! 📯Battle for Green fortress [GR5]
//! <narrative line>
//! 🇲🇴Green Castle: 10 total 7 alive
//! 🇻🇦Yellow Castle: 8 total 8 alive
//! ```

use crate::battle::{Position, Resume, ResumeTeam, Team};
use crate::error::{ParseError, ParseResult};
use crate::parser::glyph::{scan_number_backwards, strip_any_prefix};

pub const PLAIN_BANNER: &str = "📯Battle for";
pub const MONSTER_BANNER: &str = "📯Battle with";

/// Lines skipped between the banner and the first faction line.
const CENSUS_OFFSET: usize = 2;

pub const CENSUS_PREFIXES: &[(&str, Team)] = &[
    ("🇲🇴Green Castle", Team::Green),
    ("🇻🇦Yellow Castle", Team::Yellow),
    ("🇪🇺Blue Castle", Team::Blue),
    ("🇮🇲Red Castle", Team::Red),
    ("👹Creatures", Team::Monster),
];

const TOTAL_MARKER: &str = " total";
const ALIVE_MARKER: &str = " alive";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleKind {
    Plain,
    Monster,
}

pub fn parse_census(lines: &[String]) -> ParseResult<Resume> {
    let banner = lines
        .first()
        .ok_or_else(|| ParseError::shape("census card has no lines"))?;
    let (_, token) = parse_banner(banner).map_err(|err| err.at_line(0, banner))?;
    let position = decode_position(&token).map_err(|err| err.at_line(0, banner))?;

    let mut teams: Vec<ResumeTeam> = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(CENSUS_OFFSET) {
        let Some((team, rest)) = strip_any_prefix(CENSUS_PREFIXES, line) else {
            break;
        };
        if teams.iter().any(|entry| entry.team == team) {
            return Err(ParseError::semantic(format!("{team} appears twice in the census")).at_line(index, line));
        }
        teams.push(parse_team_counts(team, rest).map_err(|err| err.at_line(index, line))?);
    }

    Ok(Resume { position, teams })
}

/// Checks the banner and returns the position token between its trailing
/// brackets, with every `]` and space dropped.
pub fn parse_banner(line: &str) -> ParseResult<(BattleKind, String)> {
    let kind = if line.starts_with(MONSTER_BANNER) {
        BattleKind::Monster
    } else if line.starts_with(PLAIN_BANNER) {
        BattleKind::Plain
    } else {
        return Err(ParseError::shape(format!(
            "census must open with {PLAIN_BANNER:?} or {MONSTER_BANNER:?}"
        )));
    };

    let inner = line
        .strip_suffix(']')
        .ok_or_else(|| ParseError::lexical("census banner must end with ']'"))?;
    let open = inner
        .rfind('[')
        .ok_or_else(|| ParseError::lexical("census banner has no '[' before its position"))?;
    let token = inner[open + 1..]
        .chars()
        .filter(|c| *c != ']' && *c != ' ')
        .collect();
    Ok((kind, token))
}

/// Decodes a board position token.
///
/// Tokens without `#` name one axis: a second letter of `Y`/`B` carries X and
/// `R`/`G` carries Y. `<team><y>#<x>` carries both.
pub fn decode_position(token: &str) -> ParseResult<Position> {
    let mut chars = token.chars();
    let letter = chars
        .next()
        .ok_or_else(|| ParseError::lexical("empty position token"))?;
    let team = Team::from_position_letter(letter)
        .ok_or_else(|| ParseError::semantic(format!("unknown team letter {letter:?} in position {token:?}")))?;
    let coords = chars.as_str();

    if let Some((y, x)) = coords.split_once('#') {
        return Ok(Position {
            team,
            x: parse_coordinate(x, token)?,
            y: parse_coordinate(y, token)?,
        });
    }

    let mut axis_chars = coords.chars();
    let axis = axis_chars
        .next()
        .ok_or_else(|| ParseError::lexical(format!("position {token:?} has no coordinate")))?;
    let value = parse_coordinate(axis_chars.as_str(), token)?;
    match axis {
        'Y' | 'B' => Ok(Position { team, x: value, y: 0 }),
        'R' | 'G' => Ok(Position { team, x: 0, y: value }),
        other => Err(ParseError::semantic(format!(
            "unknown axis letter {other:?} in position {token:?}"
        ))),
    }
}

fn parse_coordinate(digits: &str, token: &str) -> ParseResult<u64> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::numeric(format!(
            "invalid coordinate {digits:?} in position {token:?}: not a decimal number"
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|err| ParseError::numeric(format!("invalid coordinate {digits:?} in position {token:?}: {err}")))
}

fn parse_team_counts(team: Team, rest: &str) -> ParseResult<ResumeTeam> {
    let total = count_before(rest, TOTAL_MARKER)?;
    let alive = count_before(rest, ALIVE_MARKER)?;
    if alive > total {
        return Err(ParseError::semantic(format!(
            "{team} census has {alive} alive out of {total}"
        )));
    }
    Ok(ResumeTeam { team, total, alive })
}

fn count_before(text: &str, marker: &str) -> ParseResult<u64> {
    let end = text
        .find(marker)
        .ok_or_else(|| ParseError::lexical(format!("missing {marker:?} count")))?;
    scan_number_backwards(text, end)
}
