use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::quota::QuotaDefinition;

use super::templates;

pub const MAIN_FILE_NAME: &str = "main.tf";
pub const VARIABLES_FILE_NAME: &str = "variables.tf";

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} variable name collision(s): {}", .0.len(), .0.join(", "))]
    Collisions(Vec<String>),
}

/// Contents of the two generated files.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedModule {
    pub main_tf: String,
    pub variables_tf: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleFiles {
    pub main_tf: PathBuf,
    pub variables_tf: PathBuf,
}

/// Distinct quota definitions that sanitize to the same variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub variable_name: String,
    pub quotas: Vec<QuotaDefinition>,
}

/// Renders one variable block and one locals entry per quota, in input order.
pub fn render_module(quotas: &[QuotaDefinition]) -> RenderedModule {
    let mut all_vars = String::new();
    let mut all_quotas = String::new();

    for quota in quotas {
        all_vars.push_str(&quota.render_variable());
        all_quotas.push_str(&quota.render_local());
    }

    tracing::debug!(count = quotas.len(), "rendered quota module");

    RenderedModule {
        main_tf: templates::main_file(&all_quotas),
        variables_tf: templates::variables_file(&all_vars),
    }
}

/// Sorted by variable name. Terraform rejects duplicate variable names, so any
/// entry here means the generated module will not plan.
pub fn find_collisions(quotas: &[QuotaDefinition]) -> Vec<Collision> {
    let mut by_name: BTreeMap<String, Vec<QuotaDefinition>> = BTreeMap::new();
    for quota in quotas {
        by_name
            .entry(quota.variable_name())
            .or_default()
            .push(quota.clone());
    }

    by_name
        .into_iter()
        .filter(|(_, quotas)| quotas.len() > 1)
        .map(|(variable_name, quotas)| Collision {
            variable_name,
            quotas,
        })
        .collect()
}

pub fn write_module(dir: &Path, module: &RenderedModule) -> Result<ModuleFiles, ModuleError> {
    fs::create_dir_all(dir).map_err(|source| ModuleError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = ModuleFiles {
        main_tf: dir.join(MAIN_FILE_NAME),
        variables_tf: dir.join(VARIABLES_FILE_NAME),
    };

    write_file(&files.main_tf, &module.main_tf)?;
    write_file(&files.variables_tf, &module.variables_tf)?;

    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ModuleError> {
    fs::write(path, contents).map_err(|source| ModuleError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
