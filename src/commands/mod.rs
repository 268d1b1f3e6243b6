//! CLI command handlers.
//!
//! Every handler validates its names first, then mutates the project, then
//! reruns the generators it affects and prints one aggregated summary.

pub mod add;
pub mod build;
pub mod list;
pub mod regen;
pub mod remove;
pub mod todo;

mod report;

pub use report::Report;

use crate::manifest::ModuleRef;
use crate::naming;
use crate::project::Project;
use anyhow::Result;
use std::path::Path;

/// Validate a `<domain> <module>` argument pair.
pub(crate) fn module_arg(domain: &str, module: &str) -> Result<ModuleRef> {
    naming::validate_identifier("domain", domain)?;
    naming::validate_identifier("module", module)?;
    Ok(ModuleRef::new(domain, module))
}

/// `path` relative to the project root, for messages.
pub(crate) fn relative(project: &Project, path: &Path) -> String {
    path.strip_prefix(project.root())
        .unwrap_or(path)
        .display()
        .to_string()
}
