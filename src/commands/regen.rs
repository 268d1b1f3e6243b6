//! `seed regen` / `seed regenall` and the generator runs shared by other handlers.

use super::{Report, module_arg};
use crate::generate::{self, cmake::CMAKE_FILE, headers};
use crate::manifest::{self, Manifest, ModuleRef};
use crate::project::Project;
use anyhow::{Context, Result};
use colored::*;

/// Which generators a command needs to rerun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artifacts {
    pub cmake: bool,
    pub api_header: bool,
    pub composite_header: bool,
}

impl Artifacts {
    pub const ALL: Artifacts = Artifacts {
        cmake: true,
        api_header: true,
        composite_header: true,
    };
    pub const CMAKE: Artifacts = Artifacts {
        cmake: true,
        api_header: false,
        composite_header: false,
    };
    pub const SOURCES: Artifacts = Artifacts {
        cmake: true,
        api_header: false,
        composite_header: true,
    };
    pub const DEPENDENCIES: Artifacts = Artifacts {
        cmake: true,
        api_header: true,
        composite_header: false,
    };
}

/// Run the selected generators for a loaded manifest.
///
/// Headers go first so the build script lists them on a fresh module.
pub fn run_generators(project: &Project, manifest: &Manifest, which: Artifacts, report: &mut Report) {
    let module = manifest.module_ref();
    if which.api_header {
        report.record(
            &headers::api_header_name(&manifest.name),
            &module,
            generate::generate_api_header(project, manifest),
        );
    }
    if which.composite_header {
        report.record(
            &headers::composite_header_name(&manifest.name),
            &module,
            generate::generate_composite_header(project, manifest),
        );
    }
    if which.cmake {
        report.record(CMAKE_FILE, &module, generate::generate_cmake(project, manifest));
    }
}

/// Load the module's manifest and run the selected generators; a broken
/// manifest is recorded as a failure.
pub fn regenerate(project: &Project, module: &ModuleRef, which: Artifacts, report: &mut Report) {
    match manifest::load(project, module) {
        Ok(manifest) => run_generators(project, &manifest, which, report),
        Err(e) => report.fail(format!("{} ({})", manifest::MANIFEST_FILE, module), e),
    }
}

pub fn regenerate_index(project: &Project, report: &mut Report) {
    let label = format!("{}/{}", project.config.project.source_dir, CMAKE_FILE);
    match generate::generate_index(project) {
        generate::GenerateStatus::Success => println!("   {} {}", "✓".green(), label),
        generate::GenerateStatus::Disabled => {}
        generate::GenerateStatus::Failure(reason) => report.fail(label, reason),
    }
}

pub fn handle_regen(project: &Project, domain: &str, module: &str) -> Result<()> {
    let module = module_arg(domain, module)?;
    // Surface a missing or unreadable manifest as a command error.
    let manifest = manifest::load(project, &module)?;

    println!("{} Regenerating {}", "⚙".cyan(), module.to_string().bold());
    let mut report = Report::new();
    run_generators(project, &manifest, Artifacts::ALL, &mut report);
    report.finish(&format!("Regenerated {}", module));
    Ok(())
}

pub fn handle_regenall(project: &Project) -> Result<()> {
    let modules = project
        .all_modules()
        .with_context(|| format!("Failed to list modules under {}", project.source_dir().display()))?;

    println!(
        "{} Regenerating {} module(s)",
        "⚙".cyan(),
        modules.len().to_string().bold()
    );
    let mut report = Report::new();
    for module in &modules {
        regenerate(project, module, Artifacts::ALL, &mut report);
    }
    regenerate_index(project, &mut report);
    report.finish("Regenerated all modules");
    Ok(())
}
