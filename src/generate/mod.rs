//! Artifact generators.
//!
//! Each generator recomputes one artifact from a module manifest plus a scan
//! of the module's directories, then overwrites the artifact on disk:
//!
//! - [`cmake`] - the module's `CMakeLists.txt`
//! - [`headers`] - the public API header and composite header
//! - [`index`] - the source-tree `CMakeLists.txt` adding every module
//!
//! Rendering is deterministic: file listings are sorted and no timestamps
//! are emitted, so regenerating with unchanged inputs yields identical bytes.

pub mod cmake;
pub mod headers;
pub mod index;

use crate::manifest::{Manifest, ModuleRef};
use crate::naming;
use crate::project::Project;
use crate::template::{self, Mapping, TemplateError};
use crate::templates::{self, TemplateKind};
use colored::*;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub use cmake::generate_cmake;
pub use headers::{generate_api_header, generate_composite_header};
pub use index::generate_index;

pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx"];
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "inl"];

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read template {name}: {source}")]
    TemplateRead {
        name: &'static str,
        source: std::io::Error,
    },

    #[error("failed to expand template {name}: {source}")]
    TemplateExpand {
        name: &'static str,
        source: TemplateError,
    },

    #[error("failed to scan {path}: {source}")]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to list modules under {path}: {source}")]
    ListModules {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of running one generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateStatus {
    /// Switched off by the manifest; not an error.
    Disabled,
    Success,
    Failure(String),
}

/// Rendered artifact text plus the dependencies that were skipped because
/// their module no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub skipped: Vec<ModuleRef>,
}

/// Expand the template of `kind` with `mapping`.
pub(crate) fn render(
    project: &Project,
    kind: TemplateKind,
    mapping: &Mapping,
) -> Result<String, GenerateError> {
    let name = kind.file_name();
    let body = templates::load(&project.templates_dir(), kind)
        .map_err(|source| GenerateError::TemplateRead { name, source })?;
    template::expand(&body, mapping).map_err(|source| GenerateError::TemplateExpand { name, source })
}

/// Placeholders shared by every template rendered for a module.
pub fn module_mapping(project: &Project, domain: &str, module: &str) -> Mapping {
    let mut m = Mapping::new();
    m.insert("PROJECT_NAME", project.config.project.name.clone());
    m.insert("PROJECT_IDENTIFIER", project.config.project.identifier.clone());
    m.insert("NOTICE", project.config.project.notice());
    m.insert("DOMAIN", domain.to_string());
    m.insert("MODULE", module.to_string());
    m.insert("DOMAIN_UPPER", naming::upper_snake(domain));
    m.insert("MODULE_UPPER", naming::upper_snake(module));
    m.insert("TARGET_NAME", naming::target_name(domain, module));
    m.insert("EXPORT_MACRO", naming::export_macro(domain, module));
    m.insert("OUTPUT_NAME", naming::kebab(module));
    m.insert("BIN_DIR", project.config.build.bin_dir.clone());
    m
}

/// Split the manifest's dependencies into existing modules and dangling edges.
pub(crate) fn partition_dependencies(
    project: &Project,
    manifest: &Manifest,
) -> (Vec<ModuleRef>, Vec<ModuleRef>) {
    manifest
        .dependencies
        .iter()
        .cloned()
        .partition(|dep| project.module_exists(dep))
}

/// Files under `dir` with one of `extensions`, as `/`-separated paths relative to `dir`.
///
/// Within each directory files come before subdirectories, each sorted by
/// name. A missing directory yields an empty listing.
pub fn scan_files(dir: &Path, extensions: &[&str]) -> Result<Vec<String>, GenerateError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(dir).min_depth(1).sort_by(|a, b| {
        match (a.file_type().is_dir(), b.file_type().is_dir()) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            _ => a.file_name().cmp(b.file_name()),
        }
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| GenerateError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry.path().extension().is_some_and(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            extensions.contains(&ext.as_str())
        });
        if !matches {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(dir) {
            let parts: Vec<_> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(parts.join("/"));
        }
    }
    Ok(files)
}

/// Write `content` to `path`, leaving the file untouched when it already matches.
pub(crate) fn write_artifact(path: &Path, content: &str) -> Result<(), GenerateError> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Print a warning per skipped dependency and turn the render result into a status.
pub(crate) fn finish(
    artifact: &str,
    owner: &ModuleRef,
    result: Result<Rendered, GenerateError>,
    path: &Path,
) -> GenerateStatus {
    let rendered = match result {
        Ok(rendered) => rendered,
        Err(e) => return GenerateStatus::Failure(e.to_string()),
    };
    for dep in &rendered.skipped {
        println!(
            "   {} {}: skipping dependency {} of {} (module not found)",
            "!".yellow(),
            artifact,
            dep.to_string().bold(),
            owner
        );
    }
    match write_artifact(path, &rendered.text) {
        Ok(()) => GenerateStatus::Success,
        Err(e) => GenerateStatus::Failure(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_orders_files_before_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "Texture.hpp",
            "OpenGL/OpenGL.hpp",
            "Color.hpp",
            "DirectX/DirectX.hpp",
            "DirectX/Detail/Util.hpp",
            "notes.txt",
        ] {
            touch(&root.join(rel));
        }

        let files = scan_files(root, HEADER_EXTENSIONS).unwrap();
        assert_eq!(
            files,
            vec![
                "Color.hpp",
                "Texture.hpp",
                "DirectX/DirectX.hpp",
                "DirectX/Detail/Util.hpp",
                "OpenGL/OpenGL.hpp",
            ]
        );
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            scan_files(&dir.path().join("Nope"), SOURCE_EXTENSIONS)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_scan_extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Legacy.CPP"));
        assert_eq!(
            scan_files(dir.path(), SOURCE_EXTENSIONS).unwrap(),
            vec!["Legacy.CPP"]
        );
    }

    #[test]
    fn test_write_artifact_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/CMakeLists.txt");
        write_artifact(&path, "x").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }
}
