use crate::generate::GenerateStatus;
use crate::manifest::ModuleRef;
use colored::*;
use std::fmt;

/// Aggregates generator results for one command.
#[derive(Debug, Default)]
pub struct Report {
    failed: usize,
    disabled: usize,
    generated: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, artifact: &str, module: &ModuleRef, status: GenerateStatus) {
        match status {
            GenerateStatus::Success => {
                self.generated += 1;
                println!("   {} {} ({})", "✓".green(), artifact, module);
            }
            GenerateStatus::Disabled => {
                self.disabled += 1;
                println!("   {} {} ({}) disabled", "-".dimmed(), artifact, module);
            }
            GenerateStatus::Failure(reason) => {
                self.failed += 1;
                println!("   {} {} ({}): {}", "x".red(), artifact, module, reason);
            }
        }
    }

    /// Record a failure that happened before a generator could run.
    pub fn fail(&mut self, what: impl fmt::Display, reason: impl fmt::Display) {
        self.failed += 1;
        println!("   {} {}: {}", "x".red(), what, reason);
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.disabled == 0
    }

    /// One summary line: a warning when anything failed or was disabled.
    pub fn finish(&self, done: &str) {
        if self.is_clean() {
            println!("{} {}", "✓".green(), done);
        } else {
            println!(
                "{} {} with warnings: {} generated, {} failed, {} disabled",
                "!".yellow(),
                done,
                self.generated,
                self.failed,
                self.disabled
            );
        }
    }
}
