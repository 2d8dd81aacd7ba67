use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::battle::{aggregate, rank_players, render_report, Battle, PlayerResume};
use crate::config::AppConfig;
use crate::error::BattleLogError;
use crate::parallel::{parse_files, WorkerPool};
use crate::server;

const USAGE: &str = "usage: battlelog <parse <report.html>... [--json]|serve>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Parse,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("parse") => Some(Command::Parse),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String], config: &AppConfig) -> i32 {
    match parse_command(args) {
        Some(Command::Parse) => handle_parse(args, config),
        Some(Command::Serve) => handle_serve(config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_serve(config: &AppConfig) -> i32 {
    match server::run_server(&config.bind_addr, config.parse_options()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

#[derive(Debug, Serialize)]
struct ParsedReport<'a> {
    path: &'a str,
    battle: &'a Battle,
    players: Vec<PlayerResume>,
}

fn handle_parse(args: &[String], config: &AppConfig) -> i32 {
    let as_json = args.iter().any(|arg| arg == "--json");
    let paths: Vec<&str> = args
        .iter()
        .skip(2)
        .map(String::as_str)
        .filter(|arg| !arg.starts_with("--"))
        .collect();
    if paths.is_empty() {
        eprintln!("usage: battlelog parse <report.html>... [--json]");
        return 2;
    }

    let outcomes = parse_files(&paths, &config.parse_options(), &WorkerPool::with_workers(config.workers));

    let mut failed = false;
    let mut reports = Vec::with_capacity(outcomes.len());
    for (path, outcome) in paths.iter().zip(&outcomes) {
        let summary = outcome
            .result
            .as_ref()
            .map_err(|err| err.to_string())
            .and_then(|battle| {
                aggregate(&battle.turns)
                    .map(|players| (battle, rank_players(&players)))
                    .map_err(|err| BattleLogError::from(err).to_string())
            });
        match summary {
            Ok((battle, players)) => reports.push(ParsedReport { path, battle, players }),
            Err(message) => {
                warn!(path = %Path::new(path).display(), "battle report rejected");
                eprintln!("{path}: {message}");
                failed = true;
            }
        }
    }

    if as_json {
        let encoded = if reports.len() == 1 && paths.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        };
        match encoded {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize battle: {err}");
                return 1;
            }
        }
    } else {
        for report in &reports {
            if paths.len() > 1 {
                println!("== {}", report.path);
            }
            print!("{}", render_report(report.battle, &report.players));
        }
    }

    i32::from(failed)
}
