//! CMake configure/build driver plus running the editor and the test suite.
//!
//! Each profile gets its own binary directory, `<build_dir>/<Profile>`.
//! Configuring is skipped while that directory holds a `CMakeCache.txt`,
//! unless a clean build was requested.

use super::clean::clean;
use super::runner::Runner;
use crate::project::Project;
use anyhow::{Context, Result, bail};
use colored::*;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Debug,
    Release,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Debug => "Debug",
            Profile::Release => "Release",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub clean: bool,
    pub exec: bool,
    pub test: bool,
    pub debug: bool,
    pub release: bool,
}

impl BuildOptions {
    /// Selected profiles; both when neither is selected.
    pub fn profiles(&self) -> Vec<Profile> {
        match (self.debug, self.release) {
            (true, false) => vec![Profile::Debug],
            (false, true) => vec![Profile::Release],
            _ => vec![Profile::Debug, Profile::Release],
        }
    }
}

/// Outcome of one `build` invocation, one entry per attempted profile.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub results: Vec<(Profile, bool)>,
    /// Exit code of the test suite when `--test` ran it.
    pub test_code: Option<i32>,
}

impl BuildReport {
    fn succeeded(&self, profile: Profile) -> bool {
        self.results.iter().any(|&(p, ok)| p == profile && ok)
    }

    /// Release if it built, otherwise Debug if it built.
    pub fn preferred(&self) -> Option<Profile> {
        [Profile::Release, Profile::Debug]
            .into_iter()
            .find(|&p| self.succeeded(p))
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|&(_, ok)| ok)
    }
}

pub fn profile_build_dir(project: &Project, profile: Profile) -> PathBuf {
    project
        .root()
        .join(&project.config.build.build_dir)
        .join(profile.as_str())
}

pub fn executable_path(project: &Project, profile: Profile) -> PathBuf {
    project
        .root()
        .join(&project.config.build.bin_dir)
        .join(profile.as_str())
        .join(format!(
            "{}{}",
            project.config.project.executable,
            std::env::consts::EXE_SUFFIX
        ))
}

fn rel_build_dir(project: &Project, profile: Profile) -> String {
    format!("{}/{}", project.config.build.build_dir, profile)
}

/// Run one step and print its exit code. Returns whether it succeeded.
fn step(
    runner: &mut dyn Runner,
    project: &Project,
    label: &str,
    program: &str,
    args: Vec<String>,
) -> Result<bool> {
    println!("{} {} ...", "⚙".cyan(), label);
    let code = runner
        .run(program, &args, project.root())
        .with_context(|| format!("Failed to launch {}", program))?;
    if code == 0 {
        println!("   {} {} (exit code 0)", "✓".green(), label);
        Ok(true)
    } else {
        println!("   {} {} failed (exit code {})", "x".red(), label, code);
        Ok(false)
    }
}

fn configure(runner: &mut dyn Runner, project: &Project, profile: Profile) -> Result<bool> {
    let mut args = vec![
        "-S".to_string(),
        ".".to_string(),
        "-B".to_string(),
        rel_build_dir(project, profile),
        format!("-DCMAKE_BUILD_TYPE={}", profile),
    ];
    args.extend(project.config.build.configure_flags.iter().cloned());
    step(
        runner,
        project,
        &format!("Configuring {}", profile),
        "cmake",
        args,
    )
}

fn compile(runner: &mut dyn Runner, project: &Project, profile: Profile) -> Result<bool> {
    let args = vec![
        "--build".to_string(),
        rel_build_dir(project, profile),
        "--config".to_string(),
        profile.to_string(),
    ];
    step(
        runner,
        project,
        &format!("Building {}", profile),
        "cmake",
        args,
    )
}

/// Configure (when needed) and build each selected profile, then optionally
/// run the editor or the test suite of the preferred profile.
pub fn build(project: &Project, options: &BuildOptions, runner: &mut dyn Runner) -> Result<BuildReport> {
    if options.clean {
        clean(project)?;
    }

    let mut report = BuildReport::default();
    for profile in options.profiles() {
        let cache = profile_build_dir(project, profile).join("CMakeCache.txt");
        let configured = if options.clean || !cache.exists() {
            configure(runner, project, profile)?
        } else {
            true
        };
        let ok = configured && compile(runner, project, profile)?;
        report.results.push((profile, ok));
    }

    if options.exec || options.test {
        match report.preferred() {
            Some(profile) => {
                if options.exec {
                    run_executable(project, profile, runner)?;
                }
                if options.test {
                    report.test_code = Some(run_tests(project, profile, runner)?);
                }
            }
            None => println!(
                "{} No configuration built successfully; nothing to run.",
                "!".yellow()
            ),
        }
    }

    Ok(report)
}

/// Run the built editor binary of `profile`. Returns the child's exit code.
pub fn run_executable(project: &Project, profile: Profile, runner: &mut dyn Runner) -> Result<i32> {
    let path = executable_path(project, profile);
    if !path.is_file() {
        bail!(
            "{} not found. Run 'seed build{}' first.",
            path.display(),
            if profile == Profile::Debug { " --debug" } else { " --release" }
        );
    }
    println!("{} Running {} ({})...\n", "▶".green(), project.config.project.executable, profile);
    let program = path.to_string_lossy();
    let code = runner
        .run(&program, &[], project.root())
        .with_context(|| format!("Failed to launch {}", path.display()))?;
    if code == 0 {
        println!("\n{} Exited with code 0", "✓".green());
    } else {
        println!("\n{} Exited with code {}", "x".red(), code);
    }
    Ok(code)
}

/// Run the CTest suite of `profile`. Returns the ctest exit code.
pub fn run_tests(project: &Project, profile: Profile, runner: &mut dyn Runner) -> Result<i32> {
    if !profile_build_dir(project, profile).is_dir() {
        bail!(
            "{} has not been configured. Run 'seed build' first.",
            rel_build_dir(project, profile)
        );
    }
    let args = vec![
        "--test-dir".to_string(),
        rel_build_dir(project, profile),
        "-C".to_string(),
        profile.to_string(),
        "--output-on-failure".to_string(),
    ];
    println!("{} Running tests ({})...", "🧪".magenta(), profile);
    let code = runner
        .run("ctest", &args, project.root())
        .context("Failed to launch ctest")?;
    if code == 0 {
        println!("{} All tests passed", "✓".green());
    } else {
        println!("{} Tests failed (exit code {})", "x".red(), code);
    }
    Ok(code)
}
