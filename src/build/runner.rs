//! Subprocess seam for the build wrapper.

use std::io;
use std::path::Path;
use std::process::Command;

/// Spawns a program, waits for it and reports its exit code.
///
/// Children inherit stdio. A child killed by a signal reports `-1`.
pub trait Runner {
    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> io::Result<i32>;
}

pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> io::Result<i32> {
        let status = Command::new(program).args(args).current_dir(cwd).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
