use std::path::PathBuf;
use std::process::ExitCode;

use arity_macro_gen::config::GeneratorConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "arity_macro_gen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // The only input is an optional config file; the stock layout applies without one.
    // Relative paths in the file are taken relative to the file itself.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => GeneratorConfig::load(&path).map(|config| match path.parent() {
            Some(root) => config.rooted_at(root),
            None => config,
        }),
        None => Ok(GeneratorConfig::default()),
    };

    match config.map_err(Into::into).and_then(|config| arity_macro_gen::run(&config)) {
        Ok(summary) => {
            tracing::info!(
                arities = summary.bound.count(),
                message_bytes = summary.message_bytes,
                no_arity_bytes = summary.no_arity_bytes,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
