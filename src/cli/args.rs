use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use tfquota::SourceConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render main.tf and variables.tf from a quota catalog
    Generate(GenerateArgs),
    /// Print the quota catalog
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Local JSON catalog; repeat or comma-separate to merge several
    #[arg(long = "catalog", env = "TFQUOTA_CATALOG", value_delimiter = ',')]
    pub catalogs: Vec<PathBuf>,

    /// Remote JSON catalog, used when no --catalog is given
    #[arg(long, env = "TFQUOTA_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Ignore any cached copy of --catalog-url
    #[arg(long)]
    pub refresh: bool,

    /// Seconds a cached remote catalog stays fresh
    #[arg(long, env = "TFQUOTA_CACHE_TTL", default_value_t = 86_400)]
    pub cache_ttl: u64,

    /// Only include these service codes
    #[arg(long = "service", value_delimiter = ',')]
    pub services: Vec<String>,
}

impl SourceArgs {
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            catalogs: self.catalogs.clone(),
            catalog_url: self.catalog_url.clone(),
            refresh: self.refresh,
            cache_ttl: Duration::from_secs(self.cache_ttl),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, env = "TFQUOTA_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Fail when two quotas sanitize to the same variable name
    #[arg(long)]
    pub strict: bool,

    /// Print both files instead of writing them
    #[arg(long)]
    pub stdout: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Table,
    Tree,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}
