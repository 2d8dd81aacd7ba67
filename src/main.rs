use std::env;
use std::process::ExitCode;

use battlelog::cli;
use battlelog::config::AppConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    let args: Vec<String> = env::args().collect();
    let code = cli::run_with_args(&args, &config);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
