//! `seed remove dep` handler.

use super::add::not_found;
use super::regen::{Artifacts, regenerate};
use super::{Report, module_arg};
use crate::graph::{self, RemoveOutcome};
use crate::project::Project;
use anyhow::{Result, bail};
use colored::*;

pub fn handle_remove_dep(
    project: &Project,
    domain: &str,
    module: &str,
    dep_domain: &str,
    dep_module: &str,
) -> Result<()> {
    let module = module_arg(domain, module)?;
    let dep = module_arg(dep_domain, dep_module)?;

    match graph::remove_dependency(project, &module, &dep)? {
        RemoveOutcome::Removed => {
            println!(
                "{} {} no longer depends on {}",
                "✓".green(),
                module,
                dep.to_string().bold()
            );
            let mut report = Report::new();
            regenerate(project, &module, Artifacts::DEPENDENCIES, &mut report);
            report.finish(&format!("Updated {}", module));
        }
        RemoveOutcome::NotPresent => {
            println!("{} {} does not depend on {}", "!".yellow(), module, dep);
        }
        RemoveOutcome::NotFound(missing) => bail!(not_found(&missing)),
    }
    Ok(())
}
