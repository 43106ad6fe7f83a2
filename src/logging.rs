use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CATALOGUE_IMPORT_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

/// Logs go to stderr so stdout stays reserved for identifiers and reports.
pub fn init() -> anyhow::Result<()> {
    let filter = filter_from(
        std::env::var(LOG_ENV)
            .ok()
            .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok()),
    )?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}

fn filter_from(directives: Option<String>) -> anyhow::Result<EnvFilter> {
    match directives.filter(|d| !d.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("parse log directives: {directives}")),
        None => EnvFilter::try_new(DEFAULT_DIRECTIVES).context("build default log filter"),
    }
}
