//! Build artifact cleanup.
//!
//! Removes the directories listed in `[build] clean_dirs` (by default
//! `bin`, `build`, `lib`, `.vs`) relative to the project root.

use crate::project::Project;
use anyhow::{Context, Result};
use colored::*;
use std::fs;

/// Remove every configured clean directory that exists. Returns how many were removed.
pub fn clean(project: &Project) -> Result<usize> {
    let mut removed = 0;
    for dir in &project.config.build.clean_dirs {
        let path = project.root().join(dir);
        if !path.exists() {
            continue;
        }
        fs::remove_dir_all(&path).with_context(|| format!("Failed to remove {}", dir))?;
        println!("{} Removed {}/", "🗑️".red(), dir);
        removed += 1;
    }
    if removed == 0 {
        println!("{} Nothing to clean.", "!".yellow());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::scratch_project;

    #[test]
    fn test_clean_removes_configured_dirs_only() {
        let (_dir, project) = scratch_project();
        let root = project.root();
        fs::create_dir_all(root.join("build/Debug")).unwrap();
        fs::create_dir_all(root.join("bin/Release")).unwrap();
        fs::create_dir_all(root.join("Engine")).unwrap();

        assert_eq!(clean(&project).unwrap(), 2);
        assert!(!root.join("build").exists());
        assert!(!root.join("bin").exists());
        assert!(root.join("Engine").exists());
        assert_eq!(clean(&project).unwrap(), 0);
    }
}
