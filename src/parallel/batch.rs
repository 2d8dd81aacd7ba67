//! Parsing of many independent report files.
//!
//! Each document is parsed on its own; one failing file does not affect the
//! others. Results come back in input order.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::battle::Battle;
use crate::error::BattleLogError;
use crate::parallel::pool::WorkerPool;
use crate::parser::{parse_html, ParseOptions};

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Battle, BattleLogError>,
}

/// Reads and parses a single report file.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<Battle, BattleLogError> {
    let markup = fs::read_to_string(path).map_err(|source| BattleLogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_html(&markup, options)?)
}

/// Parses every file in `paths` on `pool`.
pub fn parse_files<P>(paths: &[P], options: &ParseOptions, pool: &WorkerPool) -> Vec<FileOutcome>
where
    P: AsRef<Path> + Sync,
{
    pool.install(|| {
        paths
            .par_iter()
            .map(|path| FileOutcome {
                path: path.as_ref().to_path_buf(),
                result: parse_file(path.as_ref(), options),
            })
            .collect()
    })
}
