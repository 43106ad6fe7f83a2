use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::catalogue::HttpCatalogueClient;
use crate::cli::ImportArgs;
use crate::config::{CatalogueProfile, ImportConfig};
use crate::pipeline::{ImportOutcome, ImportPipeline};
use crate::writer::XmlDocumentWriter;

pub fn run(args: ImportArgs) -> anyhow::Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => ImportConfig::load(Path::new(path)).context("load config")?,
        None => ImportConfig::default(),
    };
    let profile = resolve_profile(&args, config.catalogue)?;
    let import_folder = args
        .out
        .as_deref()
        .map(PathBuf::from)
        .or(config.import_folder)
        .ok_or_else(|| anyhow::anyhow!("--out is required when the config has no import_folder"))?;
    let collections = if args.collections.is_empty() {
        config.collections
    } else {
        args.collections
    };

    let raw = crate::splitter::read_input(&args.input)?;
    let records = crate::splitter::split_records(&raw, &collections);

    let mut report: Box<dyn Write> = match args.report.as_deref() {
        Some(path) => Box::new(BufWriter::new(
            OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(path)
                .with_context(|| format!("create report: {path}"))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    tracing::info!(
        records = records.len(),
        catalogue = %profile.name,
        out = %import_folder.display(),
        "import: start"
    );

    let client = HttpCatalogueClient::new(&profile).context("create catalogue client")?;
    let total = records.len();
    let done = std::cell::Cell::new(0_usize);
    let pipeline = ImportPipeline::new(client, XmlDocumentWriter, &profile, &import_folder)
        .with_progress(|| {
            done.set(done.get() + 1);
            tracing::debug!(done = done.get(), total, "import: progress");
        });
    let outcomes = pipeline.run(&records);

    write_report(&mut report, &outcomes).context("write import report")?;

    let succeeded = outcomes.iter().filter(|o| o.status.is_success()).count();
    tracing::info!(
        succeeded,
        failed = outcomes.len() - succeeded,
        "import: done"
    );
    Ok(())
}

fn resolve_profile(
    args: &ImportArgs,
    configured: Option<CatalogueProfile>,
) -> anyhow::Result<CatalogueProfile> {
    let mut profile = match (configured, args.catalogue_url.as_deref()) {
        (Some(mut profile), Some(url)) => {
            url.clone_into(&mut profile.base_url);
            profile
        }
        (Some(profile), None) => profile,
        (None, Some(url)) => CatalogueProfile::new(url),
        (None, None) => {
            anyhow::bail!("--catalogue-url is required when the config has no catalogue section")
        }
    };
    if let Some(name) = args.profile.as_deref() {
        name.clone_into(&mut profile.name);
    }
    Ok(profile)
}

fn write_report(out: &mut dyn Write, outcomes: &[ImportOutcome]) -> anyhow::Result<()> {
    for outcome in outcomes {
        serde_json::to_writer(&mut *out, outcome).context("serialize import outcome")?;
        out.write_all(b"\n").context("write outcome newline")?;
    }
    out.flush().context("flush report")?;
    Ok(())
}
