//! `seed build` / `seed run` handlers.

use crate::build::{self, BuildOptions, Profile, SystemRunner};
use crate::project::Project;
use anyhow::{Result, bail};
use colored::*;

pub fn handle_build(project: &Project, options: BuildOptions) -> Result<()> {
    let report = build::build(project, &options, &mut SystemRunner)?;

    if !report.all_succeeded() {
        let failed: Vec<String> = report
            .results
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(p, _)| p.to_string())
            .collect();
        bail!("Build failed for {}", failed.join(", "));
    }
    if let Some(code) = report.test_code.filter(|&c| c != 0) {
        bail!("Tests failed (exit code {})", code);
    }
    println!("{} Build finished", "✓".green());
    Ok(())
}

pub fn handle_run(project: &Project, debug: bool, test: bool) -> Result<()> {
    let profile = if debug { Profile::Debug } else { Profile::Release };
    let mut runner = SystemRunner;
    if test {
        let code = build::run_tests(project, profile, &mut runner)?;
        if code != 0 {
            bail!("Tests failed (exit code {})", code);
        }
    } else {
        build::run_executable(project, profile, &mut runner)?;
    }
    Ok(())
}
