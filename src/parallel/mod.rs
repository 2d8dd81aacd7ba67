pub mod batch;
pub mod pool;

pub use batch::{parse_file, parse_files, FileOutcome};
pub use pool::WorkerPool;
