//! `// TODO:` comment collection for C++ sources.
//!
//! Results are written to `ToDoLists.txt` at the project root, one line per
//! comment, in the form `TOPDIR: [file line N]: text`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::{DirEntry, WalkDir};

pub const TODO_FILE: &str = "ToDoLists.txt";

/// Directories never descended into.
const EXCLUDED_DIRS: &[&str] = &[
    "extern", ".git", ".vs", "bin", "build", "ci", "lib", "scripts", "spike", "data", "docs",
    "target",
];

static TODO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*//\s*TODO:\s*(.*)$").expect("TODO pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl TodoItem {
    /// First path component, upper-cased.
    pub fn top_dir(&self) -> String {
        self.path
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().to_uppercase())
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let file = self
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}: [{} line {}]: {}", self.top_dir(), file, self.line, self.text)
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && EXCLUDED_DIRS
            .iter()
            .any(|d| entry.file_name().to_str() == Some(*d))
}

fn is_cpp_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "cpp" || ext == "hpp")
}

/// A file or directory that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct TodoScan {
    pub items: Vec<TodoItem>,
    pub skipped: Vec<Skipped>,
}

/// Collect every TODO comment under `root`, sorted by path then line.
///
/// Unreadable entries and non UTF-8 files are reported in `skipped`.
pub fn scan(root: &Path) -> TodoScan {
    let mut result = TodoScan::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                result.skipped.push(Skipped {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_cpp_file(entry.path()) {
            continue;
        }
        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                result.skipped.push(Skipped {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        for (index, line) in content.lines().enumerate() {
            if let Some(caps) = TODO_PATTERN.captures(line) {
                result.items.push(TodoItem {
                    path: rel.to_path_buf(),
                    line: index + 1,
                    text: caps[1].trim_end().to_string(),
                });
            }
        }
    }
    result
        .items
        .sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
    result
}

/// Write the rendered items to `ToDoLists.txt` under `root`.
pub fn write_list(root: &Path, items: &[TodoItem]) -> std::io::Result<PathBuf> {
    let path = root.join(TODO_FILE);
    let mut content = String::new();
    for item in items {
        content.push_str(&item.render());
        content.push('\n');
    }
    fs::write(&path, content)?;
    Ok(path)
}
