//! Plain-text battle resume, one line per player ranked by damage dealt.

use std::collections::HashMap;

use crate::battle::{Battle, PlayerResume, User};

const NAME_WIDTH: usize = 13;
const DAMAGE_WIDTH: usize = 5;

/// Players by descending damage; ties fall back to team then name.
pub fn rank_players(players: &HashMap<User, PlayerResume>) -> Vec<PlayerResume> {
    let mut ranked: Vec<PlayerResume> = players.values().cloned().collect();
    ranked.sort_by(|a, b| {
        b.damage
            .cmp(&a.damage)
            .then_with(|| a.team.cmp(&b.team))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

/// Pads with spaces or truncates to exactly `width` characters.
pub fn fixed_width(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

pub fn render_player(player: &PlayerResume) -> String {
    let accuracy = player
        .accuracy()
        .map_or_else(|| "-".to_string(), |pct| format!("{pct:.1}%"));
    format!(
        "{} {}\tdmg: {}\treceived: {}\tHits/Total: {}/{} {}\tcrits: {}",
        player.team,
        fixed_width(&player.name, NAME_WIDTH),
        fixed_width(&player.damage.to_string(), DAMAGE_WIDTH),
        player.tanqued,
        player.hits,
        player.strikes(),
        accuracy,
        player.crits
    )
}

pub fn render_report(battle: &Battle, ranked: &[PlayerResume]) -> String {
    let mut out = String::from("Battle resume by player\n");
    for player in ranked {
        out.push_str(&render_player(player));
        out.push('\n');
    }
    out.push_str(&format!(
        "{} ({} turns, position {})\n",
        battle.date.to_rfc3339(),
        battle.turns.len(),
        battle.resume.position
    ));
    out
}
