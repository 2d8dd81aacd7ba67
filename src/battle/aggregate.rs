//! Per-player resume folded from a battle's turns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::battle::{Team, Turn, User};
use crate::error::{ParseError, ParseResult};

/// Accumulated statistics for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResume {
    pub team: Team,
    pub name: String,
    /// Damage dealt.
    pub damage: i64,
    /// Damage received while targeted.
    pub tanqued: i64,
    pub hits: i64,
    pub misses: i64,
    pub crits: i64,
}

impl PlayerResume {
    /// Zeroed entry seeded with the identity.
    pub fn new(user: &User) -> Self {
        Self {
            team: user.team,
            name: user.name.clone(),
            damage: 0,
            tanqued: 0,
            hits: 0,
            misses: 0,
            crits: 0,
        }
    }

    /// Increment contributed by `turn` to its attacker.
    pub fn attack_of(turn: &Turn) -> ParseResult<Self> {
        Ok(Self {
            damage: turn.damage()?,
            hits: turn.hits() as i64,
            misses: turn.misses() as i64,
            crits: turn.crits() as i64,
            ..Self::new(&turn.attacker)
        })
    }

    /// Increment contributed by `turn` to `target`.
    pub fn defense_of(turn: &Turn, target: &User) -> ParseResult<Self> {
        Ok(Self {
            tanqued: turn.damage()?,
            ..Self::new(target)
        })
    }

    /// Adds `other` field by field. Both records must belong to the same team
    /// and no counter may overflow.
    pub fn merge(&mut self, other: &PlayerResume) -> ParseResult<()> {
        if self.team != other.team {
            return Err(ParseError::semantic(format!(
                "{} appears as both {} and {}",
                self.name, self.team, other.team
            )));
        }
        let name = &self.name;
        let sum = |field: &str, a: i64, b: i64| {
            a.checked_add(b)
                .ok_or_else(|| ParseError::numeric(format!("{field} total for {name} overflows")))
        };
        let merged = PlayerResume {
            damage: sum("damage", self.damage, other.damage)?,
            tanqued: sum("received damage", self.tanqued, other.tanqued)?,
            hits: sum("hit", self.hits, other.hits)?,
            misses: sum("miss", self.misses, other.misses)?,
            crits: sum("crit", self.crits, other.crits)?,
            team: self.team,
            name: name.clone(),
        };
        *self = merged;
        Ok(())
    }

    pub fn strikes(&self) -> i64 {
        self.hits + self.misses
    }

    /// Share of strikes that landed, in percent. `None` without strikes.
    pub fn accuracy(&self) -> Option<f64> {
        let strikes = self.strikes();
        (strikes > 0).then(|| 100.0 * self.hits as f64 / strikes as f64)
    }
}

/// Folds `turns` into one [`PlayerResume`] per identity.
pub fn aggregate(turns: &[Turn]) -> ParseResult<HashMap<User, PlayerResume>> {
    let mut players: HashMap<User, PlayerResume> = HashMap::new();

    for turn in turns {
        accumulate(&mut players, &turn.attacker, &PlayerResume::attack_of(turn)?)?;
        if let Some(target) = &turn.target {
            accumulate(&mut players, target, &PlayerResume::defense_of(turn, target)?)?;
        }
    }

    Ok(players)
}

fn accumulate(
    players: &mut HashMap<User, PlayerResume>,
    user: &User,
    increment: &PlayerResume,
) -> ParseResult<()> {
    players
        .entry(user.clone())
        .or_insert_with(|| PlayerResume::new(user))
        .merge(increment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn merge_rejects_team_mismatch() {
        let mut green = PlayerResume::new(&User::new(Team::Green, "Ann"));
        let yellow = PlayerResume::new(&User::new(Team::Yellow, "Ann"));
        assert_eq!(green.merge(&yellow).unwrap_err().kind, ErrorKind::Semantic);
    }

    #[test]
    fn merge_adds_every_counter() {
        let user = User::new(Team::Red, "Rex");
        let mut total = PlayerResume::new(&user);
        let increment = PlayerResume {
            damage: 5,
            tanqued: 2,
            hits: 1,
            misses: 3,
            crits: 1,
            ..PlayerResume::new(&user)
        };
        total.merge(&increment).unwrap();
        total.merge(&increment).unwrap();
        assert_eq!((total.damage, total.tanqued, total.hits, total.misses, total.crits), (10, 4, 2, 6, 2));
    }

    #[test]
    fn damage_totals_never_wrap() {
        let user = User::new(Team::Red, "Rex");
        let mut total = PlayerResume {
            damage: i64::MAX,
            ..PlayerResume::new(&user)
        };
        let increment = PlayerResume {
            damage: 1,
            ..PlayerResume::new(&user)
        };
        assert_eq!(total.merge(&increment).unwrap_err().kind, ErrorKind::Numeric);
        assert_eq!(total.damage, i64::MAX);
    }

    #[test]
    fn accuracy_needs_strikes() {
        let mut resume = PlayerResume::new(&User::new(Team::Blue, "Bo"));
        assert_eq!(resume.accuracy(), None);
        resume.hits = 3;
        resume.misses = 1;
        assert_eq!(resume.accuracy(), Some(75.0));
    }
}
