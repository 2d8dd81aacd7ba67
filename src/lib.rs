pub mod battle;
pub mod cli;
pub mod config;
pub mod error;
pub mod parallel;
pub mod parser;
pub mod server;

pub use battle::{aggregate, Battle, PlayerResume};
pub use error::{BattleLogError, ErrorKind, ParseError};
pub use parser::{parse_document, parse_html, ParseOptions};
