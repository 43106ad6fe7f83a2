use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up identifiers in the catalogue and write one import file each.
    Import(ImportArgs),
    /// Print the identifiers a raw input would be split into.
    Split(SplitArgs),
    /// Derive the process title for a catalogue record stored as JSON.
    Title(TitleArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct IdsInput {
    /// Identifiers separated by spaces or line breaks.
    #[arg(long)]
    pub ids: Option<String>,

    /// File containing identifiers separated by spaces or line breaks.
    #[arg(long)]
    pub ids_file: Option<String>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: IdsInput,

    /// Import folder for `<identifier>.xml` files (default: from --config).
    #[arg(long)]
    pub out: Option<String>,

    /// Collection label attached to every record (repeatable).
    #[arg(long = "collection")]
    pub collections: Vec<String>,

    /// YAML config with the catalogue profile and import defaults.
    #[arg(long)]
    pub config: Option<String>,

    /// Catalogue base URL (overrides the config file).
    #[arg(long)]
    pub catalogue_url: Option<String>,

    /// Catalogue profile name (overrides the config file).
    #[arg(long)]
    pub profile: Option<String>,

    /// Write outcomes as JSON lines to this file instead of stdout.
    #[arg(long)]
    pub report: Option<String>,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub input: IdsInput,
}

#[derive(Debug, Args)]
pub struct TitleArgs {
    /// Path to a JSON catalogue record (`{"logical": {...}}`).
    #[arg(long)]
    pub document: String,

    /// Author/title short code used as the title prefix.
    #[arg(long, default_value = "")]
    pub short_code: String,

    /// Identifier used as the title when the record is malformed.
    #[arg(long)]
    pub identifier: Option<String>,
}
