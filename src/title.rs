use anyhow::Context as _;

use crate::cli::TitleArgs;
use crate::document::{
    CATALOG_ID_DIGITAL, CURRENT_NO_SORTING, DocType, LogicalNode, SOURCE_CATALOG,
    StructuredDocument,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("{doc_type} record has no child volume to read `{field}` from")]
    MissingChild {
        doc_type: String,
        field: &'static str,
    },
}

pub fn run(args: TitleArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.document)
        .with_context(|| format!("read document: {}", args.document))?;
    let document: StructuredDocument =
        serde_json::from_str(&json).context("parse document json")?;

    let title = match (derive_process_title(&args.short_code, &document), args.identifier) {
        (Ok(title), _) => title,
        (Err(err), Some(identifier)) => {
            tracing::error!(%err, identifier = %identifier, "cannot derive process title; using identifier");
            identifier
        }
        (Err(err), None) => return Err(err).context("derive process title"),
    };
    println!("{title}");
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct TitleParts<'a> {
    identifier: Option<&'a str>,
    source_catalogue: Option<&'a str>,
    sorting: Option<&'a str>,
}

/// Builds the process title `<short_code>_<identifier>_<source>_<sorting>`,
/// leaving out segments whose field is absent or empty.
///
/// The root node is always the document-scoped node; periodicals and
/// multivolume works additionally read from their first child.
pub fn derive_process_title(
    short_code: &str,
    document: &StructuredDocument,
) -> Result<String, TitleError> {
    let logical = &document.logical;
    let mut parts = match &logical.doc_type {
        DocType::Periodical => periodical_parts(logical)?,
        DocType::MultivolumeWork => multivolume_parts(logical)?,
        DocType::Manuscript => manuscript_parts(logical),
        DocType::Monograph | DocType::Other(_) => monograph_parts(logical),
    };
    parts.source_catalogue = logical.first_value(SOURCE_CATALOG);

    let mut title = short_code.to_owned();
    for segment in [parts.identifier, parts.source_catalogue, parts.sorting]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.is_empty())
    {
        title.push('_');
        title.push_str(segment);
    }
    Ok(title)
}

fn first_child<'a>(
    logical: &'a LogicalNode,
    field: &'static str,
) -> Result<&'a LogicalNode, TitleError> {
    logical.first_child().ok_or_else(|| TitleError::MissingChild {
        doc_type: logical.doc_type.name().to_owned(),
        field,
    })
}

// Issue number from the first issue, identifier from the periodical itself.
fn periodical_parts(logical: &LogicalNode) -> Result<TitleParts<'_>, TitleError> {
    let issue = first_child(logical, CURRENT_NO_SORTING)?;
    Ok(TitleParts {
        identifier: logical.first_value(CATALOG_ID_DIGITAL),
        sorting: issue.first_value(CURRENT_NO_SORTING),
        ..TitleParts::default()
    })
}

// Both identifier and volume number come from the first volume.
fn multivolume_parts(logical: &LogicalNode) -> Result<TitleParts<'_>, TitleError> {
    let volume = first_child(logical, CURRENT_NO_SORTING)?;
    Ok(TitleParts {
        identifier: volume.first_value(CATALOG_ID_DIGITAL),
        sorting: volume.first_value(CURRENT_NO_SORTING),
        ..TitleParts::default()
    })
}

fn manuscript_parts(logical: &LogicalNode) -> TitleParts<'_> {
    TitleParts {
        identifier: logical.first_value(CATALOG_ID_DIGITAL),
        ..TitleParts::default()
    }
}

fn monograph_parts(logical: &LogicalNode) -> TitleParts<'_> {
    TitleParts {
        identifier: logical.first_value(CATALOG_ID_DIGITAL),
        ..TitleParts::default()
    }
}
