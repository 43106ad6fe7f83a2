use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    catalogue_import::logging::init().context("init logging")?;

    let cli = catalogue_import::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        catalogue_import::cli::Command::Import(args) => {
            catalogue_import::import::run(args).context("import")?;
        }
        catalogue_import::cli::Command::Split(args) => {
            catalogue_import::splitter::run(args).context("split")?;
        }
        catalogue_import::cli::Command::Title(args) => {
            catalogue_import::title::run(args).context("title")?;
        }
    }

    Ok(())
}
