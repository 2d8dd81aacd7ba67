//! Typed battle model produced by the report parser.
//!
//! All values are plain owned records; nothing holds a back-reference into the
//! source document.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// A faction taking part in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Green,
    Yellow,
    Blue,
    Red,
    Monster,
}

impl Team {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Monster => "Monster",
        }
    }

    /// Team encoded by the single letter used in board positions.
    pub fn from_position_letter(letter: char) -> Option<Self> {
        match letter {
            'G' => Some(Self::Green),
            'Y' => Some(Self::Yellow),
            'B' => Some(Self::Blue),
            'R' => Some(Self::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A combatant identity. Two users are the same player only if both team and
/// name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct User {
    pub team: Team,
    pub name: String,
}

impl User {
    pub fn new(team: Team, name: impl Into<String>) -> Self {
        Self {
            team,
            name: name.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.name)
    }
}

/// Contested board coordinate. Only one axis is meaningful for single-axis
/// positions; the other is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub team: Team,
    pub x: u64,
    pub y: u64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}#{}", self.team, self.y, self.x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeTeam {
    pub team: Team,
    pub total: u64,
    pub alive: u64,
}

/// Pre-battle census: contested position and one entry per faction present,
/// in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub position: Position,
    pub teams: Vec<ResumeTeam>,
}

/// A resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub damage: i64,
    pub target_defense: i64,
    pub crit: bool,
    pub weakness: bool,
    /// The hit was delivered as a counter-attack.
    #[serde(default)]
    pub counter: bool,
}

/// Outcome of one strike line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Strike {
    Miss,
    Hit(Hit),
    /// A counter-attack line that carried no damage announcement. The report
    /// does not say whether the counter missed, so it is kept apart from
    /// [`Strike::Miss`] and only tallied as one.
    UnresolvedCounter,
}

impl Strike {
    pub fn hit(&self) -> Option<&Hit> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::Miss | Self::UnresolvedCounter => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit().is_some()
    }

    pub fn is_crit(&self) -> bool {
        self.hit().is_some_and(|hit| hit.crit)
    }

    pub fn damage(&self) -> i64 {
        self.hit().map_or(0, |hit| hit.damage)
    }
}

/// One combat round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub attacker: User,
    /// `None` for announcement turns with no target; such turns never carry
    /// strikes.
    pub target: Option<User>,
    pub strikes: Vec<Strike>,
}

impl Turn {
    /// Damage dealt across every landed strike. Fails if the sum leaves `i64`.
    pub fn damage(&self) -> ParseResult<i64> {
        self.strikes.iter().try_fold(0i64, |total, strike| {
            total.checked_add(strike.damage()).ok_or_else(|| {
                ParseError::numeric(format!("damage dealt by {} overflows", self.attacker))
            })
        })
    }

    pub fn hits(&self) -> usize {
        self.strikes.iter().filter(|strike| strike.is_hit()).count()
    }

    pub fn misses(&self) -> usize {
        self.strikes.len() - self.hits()
    }

    pub fn crits(&self) -> usize {
        self.strikes.iter().filter(|strike| strike.is_crit()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub date: DateTime<Utc>,
    pub resume: Resume,
    pub turns: Vec<Turn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(damage: i64, crit: bool) -> Strike {
        Strike::Hit(Hit {
            damage,
            target_defense: 3,
            crit,
            weakness: false,
            counter: false,
        })
    }

    #[test]
    fn turn_tallies_split_hits_and_misses() {
        let turn = Turn {
            attacker: User::new(Team::Green, "Ann"),
            target: Some(User::new(Team::Yellow, "Bob")),
            strikes: vec![hit(10, false), Strike::Miss, hit(25, true), Strike::UnresolvedCounter],
        };

        assert_eq!(turn.damage(), Ok(35));
        assert_eq!(turn.hits(), 2);
        assert_eq!(turn.misses(), 2);
        assert_eq!(turn.crits(), 1);
        assert_eq!(turn.hits() + turn.misses(), turn.strikes.len());
    }

    #[test]
    fn zero_damage_hit_is_not_a_miss() {
        let turn = Turn {
            attacker: User::new(Team::Red, "Cid"),
            target: Some(User::new(Team::Blue, "Dee")),
            strikes: vec![Strike::Hit(Hit {
                damage: 0,
                target_defense: 0,
                crit: false,
                weakness: false,
                counter: false,
            })],
        };

        assert_eq!(turn.hits(), 1);
        assert_eq!(turn.misses(), 0);
    }

    #[test]
    fn turn_damage_overflow_is_numeric() {
        let turn = Turn {
            attacker: User::new(Team::Green, "Ann"),
            target: Some(User::new(Team::Yellow, "Bob")),
            strikes: vec![hit(i64::MAX, false), hit(1, false)],
        };
        assert_eq!(turn.damage().unwrap_err().kind, crate::error::ErrorKind::Numeric);
    }

    #[test]
    fn strike_serializes_with_outcome_tag() {
        let json = serde_json::to_value(hit(42, true)).expect("serialize strike");
        assert_eq!(json["outcome"], "hit");
        assert_eq!(json["damage"], 42);
        assert_eq!(json["crit"], true);

        let miss = serde_json::to_value(Strike::Miss).expect("serialize miss");
        assert_eq!(miss["outcome"], "miss");
    }

    #[test]
    fn position_letters_map_to_player_teams_only() {
        assert_eq!(Team::from_position_letter('G'), Some(Team::Green));
        assert_eq!(Team::from_position_letter('B'), Some(Team::Blue));
        assert_eq!(Team::from_position_letter('M'), None);
    }
}
