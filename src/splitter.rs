use std::io::Write as _;

use anyhow::Context as _;

use crate::cli::{IdsInput, SplitArgs};
use crate::pipeline::ImportRecord;

pub fn run(args: SplitArgs) -> anyhow::Result<()> {
    let raw = read_input(&args.input)?;
    let mut stdout = std::io::stdout().lock();
    for id in split_ids(&raw) {
        serde_json::to_writer(&mut stdout, &id).context("serialize identifier")?;
        stdout.write_all(b"\n").context("write identifier newline")?;
    }
    stdout.flush().context("flush stdout")?;
    Ok(())
}

/// Raw identifier text from `--ids` or the whole of `--ids-file`, unmodified.
pub fn read_input(input: &IdsInput) -> anyhow::Result<String> {
    match (&input.ids, &input.ids_file) {
        (Some(ids), _) => Ok(ids.clone()),
        (None, Some(path)) => {
            std::fs::read_to_string(path).with_context(|| format!("read ids file: {path}"))
        }
        (None, None) => anyhow::bail!("either --ids or --ids-file is required"),
    }
}

/// Splits a raw identifier blob on the first delimiter kind present:
/// space, then `\r\n`, then `\r`, then `\n`. Only one delimiter kind is
/// applied, and tokens are not trimmed.
///
/// Empty input yields a single empty identifier; the pipeline skips blanks.
/// Trailing empty tokens after a split are dropped, so `" "` yields nothing.
pub fn split_ids(raw: &str) -> Vec<String> {
    let delimiter = [" ", "\r\n", "\r", "\n"]
        .into_iter()
        .find(|delimiter| raw.contains(delimiter));

    let Some(delimiter) = delimiter else {
        return vec![raw.to_owned()];
    };

    let mut ids = raw.split(delimiter).map(str::to_owned).collect::<Vec<_>>();
    // Trailing empty tokens are dropped, interior ones are kept.
    while ids.last().is_some_and(|id| id.is_empty()) {
        ids.pop();
    }
    ids
}

pub fn split_records(raw: &str, collections: &[String]) -> Vec<ImportRecord> {
    split_ids(raw)
        .into_iter()
        .map(|id| ImportRecord::new(id, collections.to_vec()))
        .collect()
}
