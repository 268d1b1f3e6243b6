//! `seed list ...` handlers.

use super::module_arg;
use crate::graph::{self, ListEntry};
use crate::manifest;
use crate::naming;
use crate::project::Project;
use crate::ui::Table;
use anyhow::{Context, Result, bail};
use colored::*;

pub fn handle_list_domains(project: &Project) -> Result<()> {
    let domains = project
        .domains()
        .with_context(|| format!("Failed to read {}", project.source_dir().display()))?;

    let mut table = Table::new(&["Domain", "Modules"]);
    for domain in &domains {
        let count = project
            .modules(domain)
            .with_context(|| format!("Failed to read domain {}", domain))?
            .len();
        table.add_row(vec![domain.bold().green().to_string(), count.to_string()]);
    }
    if table.is_empty() {
        println!("{} No domains under {}", "!".yellow(), project.config.project.source_dir);
        return Ok(());
    }
    table.print();
    Ok(())
}

pub fn handle_list_modules(project: &Project, domain: &str) -> Result<()> {
    naming::validate_identifier("domain", domain)?;
    if !project.domain_exists(domain) {
        bail!("Domain not found: {}", domain);
    }
    let modules = project
        .modules(domain)
        .with_context(|| format!("Failed to read domain {}", domain))?;

    let mut table = Table::new(&["Module", "Target", "Dependencies"]);
    for module in &modules {
        match manifest::load(project, module) {
            Ok(m) => {
                let deps: Vec<String> = m.dependencies.iter().map(|d| d.to_string()).collect();
                table.add_row(vec![
                    module.module.bold().green().to_string(),
                    m.build_target.to_string(),
                    deps.join(", "),
                ]);
            }
            Err(e) => table.add_row(vec![
                module.module.bold().red().to_string(),
                "?".to_string(),
                e.to_string(),
            ]),
        }
    }
    if table.is_empty() {
        println!("{} No modules in {}", "!".yellow(), domain);
        return Ok(());
    }
    table.print();
    Ok(())
}

fn print_entries(title: String, entries: &[ListEntry], empty: &str) {
    println!("{}", title.bold());
    if entries.is_empty() {
        println!("   {}", empty.dimmed());
        return;
    }
    for line in graph::render_entries(entries) {
        println!("   {}", line);
    }
}

pub fn handle_list_deps(project: &Project, domain: &str, module: &str, recursive: bool) -> Result<()> {
    let module = module_arg(domain, module)?;
    let entries = graph::list_dependencies(project, &module, recursive)?;
    print_entries(format!("Dependencies of {}", module), &entries, "(none)");
    Ok(())
}

pub fn handle_list_refs(project: &Project, domain: &str, module: &str, recursive: bool) -> Result<()> {
    let module = module_arg(domain, module)?;
    let entries = graph::list_references(project, &module, recursive)?;
    print_entries(
        format!("Modules in {} referencing {}", module.domain, module),
        &entries,
        "(none)",
    );
    Ok(())
}
