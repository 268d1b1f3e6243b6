//! `seed add ...` and `seed fill` handlers.

use super::regen::{Artifacts, regenerate, regenerate_index, run_generators};
use super::{Report, module_arg, relative};
use crate::graph::{self, AddOutcome};
use crate::manifest::{BuildTarget, ModuleRef};
use crate::naming;
use crate::project::Project;
use crate::scaffold;
use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;

/// File kinds created by `seed add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Class,
    Header,
    Source,
    Test,
}

impl FileKind {
    fn label(self) -> &'static str {
        match self {
            FileKind::Class => "class",
            FileKind::Header => "header",
            FileKind::Source => "source",
            FileKind::Test => "test",
        }
    }

    /// Generators whose output depends on the new files.
    fn affected(self) -> Artifacts {
        match self {
            FileKind::Class | FileKind::Header => Artifacts::SOURCES,
            FileKind::Source | FileKind::Test => Artifacts::CMAKE,
        }
    }
}

fn print_created(project: &Project, paths: &[PathBuf]) {
    for path in paths {
        println!("{} Created {}", "✓".green(), relative(project, path));
    }
}

pub fn handle_add_module(
    project: &Project,
    domain: &str,
    name: &str,
    target: BuildTarget,
) -> Result<()> {
    let module = module_arg(domain, name)?;

    let manifest = scaffold::create_module(project, &module, target)?;
    println!(
        "{} Created {} module {}",
        "✓".green(),
        target.to_string().to_lowercase(),
        module.to_string().bold()
    );

    let mut report = Report::new();
    run_generators(project, &manifest, Artifacts::ALL, &mut report);
    regenerate_index(project, &mut report);
    report.finish(&format!("Module {} is ready", module));
    Ok(())
}

pub fn handle_add_file(
    project: &Project,
    kind: FileKind,
    domain: &str,
    module: &str,
    name: &str,
    folder: Option<&str>,
) -> Result<()> {
    let module = module_arg(domain, module)?;
    naming::validate_identifier(kind.label(), name)?;
    if let Some(folder) = folder {
        naming::validate_folder(folder)?;
    }

    let created = match kind {
        FileKind::Class => scaffold::add_class(project, &module, name, folder)?,
        FileKind::Header => scaffold::add_header(project, &module, name, folder)?,
        FileKind::Source => scaffold::add_source(project, &module, name, folder)?,
        FileKind::Test => scaffold::add_test(project, &module, name)?,
    };
    print_created(project, &created);

    let mut report = Report::new();
    regenerate(project, &module, kind.affected(), &mut report);
    report.finish(&format!("Added {} {} to {}", kind.label(), name, module));
    Ok(())
}

pub fn handle_add_dep(
    project: &Project,
    domain: &str,
    module: &str,
    dep_domain: &str,
    dep_module: &str,
) -> Result<()> {
    let module = module_arg(domain, module)?;
    let dep = module_arg(dep_domain, dep_module)?;
    if module == dep {
        bail!("A module cannot depend on itself ({})", module);
    }

    match graph::add_dependency(project, &module, &dep)? {
        AddOutcome::Added => {
            println!(
                "{} {} now depends on {}",
                "✓".green(),
                module,
                dep.to_string().bold()
            );
            let mut report = Report::new();
            regenerate(project, &module, Artifacts::DEPENDENCIES, &mut report);
            report.finish(&format!("Updated {}", module));
        }
        AddOutcome::AlreadyExists => {
            println!("{} {} already depends on {}", "!".yellow(), module, dep);
        }
        AddOutcome::NotFound(missing) => bail!(not_found(&missing)),
    }
    Ok(())
}

pub(crate) fn not_found(missing: &[ModuleRef]) -> String {
    let names: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
    format!("Module not found: {}", names.join(", "))
}

pub fn handle_fill(project: &Project) -> Result<()> {
    let result = scaffold::fill_empty_files(project).context("Failed to fill empty files")?;
    for path in &result.skipped {
        println!(
            "{} Skipped {}: name is not a valid identifier",
            "!".yellow(),
            relative(project, path)
        );
    }
    let filled = result.filled;
    if filled.is_empty() {
        println!("{} No empty files found.", "!".yellow());
        return Ok(());
    }
    for path in &filled {
        println!("{} Filled {}", "✓".green(), relative(project, path));
    }
    println!("{} Filled {} file(s)", "✓".green(), filled.len());
    Ok(())
}
