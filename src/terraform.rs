//! Terraform generation for AWS service quotas.

pub mod module;
pub mod templates;

pub use module::{
    Collision, MAIN_FILE_NAME, ModuleError, ModuleFiles, RenderedModule, VARIABLES_FILE_NAME,
    find_collisions, render_module, write_module,
};
