use crate::error::TfqError;
use crate::quota::QuotaCatalog;
use crate::sources::{SourceConfig, get_source};
use crate::terraform::{ModuleError, RenderedModule, find_collisions, render_module};

/// Loads, filters and sorts the catalog. Sorting keeps regenerated files stable.
pub async fn load_catalog(
    config: &SourceConfig,
    services: &[String],
) -> Result<QuotaCatalog, TfqError> {
    let source = get_source(config)?;
    let mut catalog = source.load().await?;
    tracing::info!(source = source.name(), count = catalog.len(), "catalog loaded");

    catalog.retain_services(services);
    if catalog.is_empty() && !services.is_empty() {
        return Err(TfqError::Config(format!(
            "no quotas matched --service {}",
            services.join(",")
        )));
    }

    catalog.sort();
    Ok(catalog)
}

/// Renders the module, reporting variable name collisions. With `strict`,
/// any collision is an error instead of a warning.
pub fn build_module(catalog: &QuotaCatalog, strict: bool) -> Result<RenderedModule, TfqError> {
    let collisions = find_collisions(&catalog.quotas);

    for collision in &collisions {
        let codes: Vec<&str> = collision
            .quotas
            .iter()
            .map(|q| q.quota_code.as_str())
            .collect();
        tracing::warn!(
            variable = %collision.variable_name,
            quota_codes = ?codes,
            "quotas share a variable name"
        );
    }

    if strict && !collisions.is_empty() {
        let names = collisions.into_iter().map(|c| c.variable_name).collect();
        return Err(ModuleError::Collisions(names).into());
    }

    Ok(render_module(&catalog.quotas))
}
