//! tfquota - Terraform generator for AWS service quotas
//!
//! Turns a catalog of `(service_code, quota_name, quota_code)` definitions into
//! a `main.tf`/`variables.tf` pair that raises only the quotas a user overrides.

pub mod cache;
pub mod output;
pub mod pipeline;
pub mod quota;
pub mod sources;
pub mod terraform;

mod error;

pub use cache::{CacheError, CatalogCache};
pub use error::TfqError;
pub use pipeline::{build_module, load_catalog};
pub use quota::{QuotaCatalog, QuotaDefinition};
pub use sources::{FileSource, HttpSource, QuotaSource, SourceConfig, SourceError};
pub use terraform::{RenderedModule, render_module, write_module};
