pub mod aggregate;
pub mod model;
pub mod report;

pub use aggregate::{aggregate, PlayerResume};
pub use model::{Battle, Hit, Position, Resume, ResumeTeam, Strike, Team, Turn, User};
pub use report::{rank_players, render_player, render_report};
