//! Module and file scaffolding from templates.
//!
//! New files are created with `create_new`, so an existing file is never
//! overwritten. Multi-file operations check every target before writing any.

use crate::generate::{self, GenerateError};
use crate::manifest::{self, BuildTarget, Manifest, ManifestError, ModuleRef};
use crate::naming;
use crate::project::Project;
use crate::template::Mapping;
use crate::templates::TemplateKind;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("module '{0}' not found")]
    ModuleNotFound(ModuleRef),

    #[error("module '{0}' already exists")]
    ModuleExists(ModuleRef),

    #[error("module '{module}' would share the CMake target '{target}' with '{existing}'")]
    TargetClash {
        module: ModuleRef,
        existing: ModuleRef,
        target: String,
    },

    #[error("{} already exists", .0.display())]
    FileExists(PathBuf),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Where a scaffolded file lives and what it is called.
struct FilePlan {
    path: PathBuf,
    kind: TemplateKind,
    mapping: Mapping,
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ScaffoldError + '_ {
    move |source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn require_module(project: &Project, module: &ModuleRef) -> Result<(), ScaffoldError> {
    if project.module_exists(module) {
        Ok(())
    } else {
        Err(ScaffoldError::ModuleNotFound(module.clone()))
    }
}

/// `Render/Passes` + `Blur` -> `Render/Passes/Blur`
fn join_folder(folder: Option<&str>, name: &str) -> String {
    match folder {
        Some(f) => format!("{}/{}", f, name),
        None => name.to_string(),
    }
}

/// Guard suffix for a header: folder segments and name, upper snake case.
fn guard_suffix(folder: Option<&str>, name: &str) -> String {
    join_folder(folder, name)
        .split('/')
        .map(naming::upper_snake)
        .collect::<Vec<_>>()
        .join("_")
}

fn file_mapping(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    file_name: &str,
    guard_suffix: &str,
    include_path: &str,
) -> Mapping {
    let mut m = generate::module_mapping(project, &module.domain, &module.module);
    m.insert("FILE_NAME", file_name.to_string());
    m.insert("CLASS_NAME", name.to_string());
    m.insert("CLASS_UPPER", naming::upper_snake(name));
    m.insert("TEST_NAME", name.to_string());
    m.insert("INCLUDE_PATH", include_path.to_string());
    m.insert(
        "GUARD",
        naming::include_guard(
            &project.config.project.identifier,
            &module.domain,
            &module.module,
            guard_suffix,
        ),
    );
    m
}

fn header_plan(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    folder: Option<&str>,
    kind: TemplateKind,
) -> FilePlan {
    let rel = format!("{}.hpp", join_folder(folder, name));
    FilePlan {
        path: project.public_dir(module).join(&rel),
        kind,
        mapping: file_mapping(
            project,
            module,
            name,
            &format!("{}.hpp", name),
            &guard_suffix(folder, name),
            &rel,
        ),
    }
}

fn source_plan(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    folder: Option<&str>,
    kind: TemplateKind,
    include_path: &str,
) -> FilePlan {
    let rel = format!("{}.cpp", join_folder(folder, name));
    FilePlan {
        path: project.private_dir(module).join(&rel),
        kind,
        mapping: file_mapping(
            project,
            module,
            name,
            &format!("{}.cpp", name),
            &guard_suffix(folder, name),
            include_path,
        ),
    }
}

/// `Test<Domain><Module><Name>.cpp`
pub fn test_file_name(module: &ModuleRef, name: &str) -> String {
    format!("Test{}{}{}.cpp", module.domain, module.module, name)
}

fn test_plan(project: &Project, module: &ModuleRef, name: &str) -> FilePlan {
    let file_name = test_file_name(module, name);
    FilePlan {
        path: project.test_dir(module).join(&file_name),
        kind: TemplateKind::Test,
        mapping: file_mapping(
            project,
            module,
            name,
            &file_name,
            &naming::upper_snake(name),
            &format!("{}.hpp", module.module),
        ),
    }
}

fn render_plan(project: &Project, plan: &FilePlan) -> Result<String, ScaffoldError> {
    Ok(generate::render(project, plan.kind, &plan.mapping)?)
}

/// Render every plan first, then create the files; nothing is written if any target exists.
fn create_files(project: &Project, plans: &[FilePlan]) -> Result<Vec<PathBuf>, ScaffoldError> {
    for plan in plans {
        if plan.path.exists() {
            return Err(ScaffoldError::FileExists(plan.path.clone()));
        }
    }
    let rendered = plans
        .iter()
        .map(|plan| render_plan(project, plan))
        .collect::<Result<Vec<_>, _>>()?;

    let mut created = Vec::with_capacity(plans.len());
    for (plan, content) in plans.iter().zip(rendered) {
        if let Some(parent) = plan.path.parent() {
            fs::create_dir_all(parent).map_err(io_err(&plan.path))?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&plan.path)
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::AlreadyExists {
                    ScaffoldError::FileExists(plan.path.clone())
                } else {
                    ScaffoldError::Io {
                        path: plan.path.clone(),
                        source,
                    }
                }
            })?;
        file.write_all(content.as_bytes())
            .map_err(io_err(&plan.path))?;
        created.push(plan.path.clone());
    }
    Ok(created)
}

/// An existing module whose target name (and so export macro) equals that of `module`.
fn target_clash(project: &Project, module: &ModuleRef) -> Result<Option<ModuleRef>, ScaffoldError> {
    let target = naming::target_name(&module.domain, &module.module);
    let modules = project
        .all_modules()
        .map_err(io_err(&project.source_dir()))?;
    Ok(modules
        .into_iter()
        .find(|m| m != module && naming::target_name(&m.domain, &m.module) == target))
}

/// Create the module directories and its default manifest.
pub fn create_module(
    project: &Project,
    module: &ModuleRef,
    build_target: BuildTarget,
) -> Result<Manifest, ScaffoldError> {
    if project.module_exists(module) {
        return Err(ScaffoldError::ModuleExists(module.clone()));
    }
    if let Some(existing) = target_clash(project, module)? {
        return Err(ScaffoldError::TargetClash {
            target: naming::target_name(&module.domain, &module.module),
            module: module.clone(),
            existing,
        });
    }
    for dir in [
        project.public_dir(module),
        project.private_dir(module),
        project.test_dir(module),
    ] {
        fs::create_dir_all(&dir).map_err(io_err(&dir))?;
    }
    let manifest = Manifest::new(&module.domain, &module.module, build_target);
    manifest::save(project, module, &manifest)?;
    Ok(manifest)
}

/// Header in `Public/` plus source in `Private/`.
pub fn add_class(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    folder: Option<&str>,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    require_module(project, module)?;
    let header = header_plan(project, module, name, folder, TemplateKind::ClassHeader);
    let include = format!("{}.hpp", join_folder(folder, name));
    let source = source_plan(
        project,
        module,
        name,
        folder,
        TemplateKind::ClassSource,
        &include,
    );
    create_files(project, &[header, source])
}

pub fn add_header(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    folder: Option<&str>,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    require_module(project, module)?;
    let plan = header_plan(project, module, name, folder, TemplateKind::Header);
    create_files(project, &[plan])
}

/// A lone source file includes the module's composite header.
pub fn add_source(
    project: &Project,
    module: &ModuleRef,
    name: &str,
    folder: Option<&str>,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    require_module(project, module)?;
    let include = format!("{}.hpp", module.module);
    let plan = source_plan(project, module, name, folder, TemplateKind::Source, &include);
    create_files(project, &[plan])
}

pub fn add_test(
    project: &Project,
    module: &ModuleRef,
    name: &str,
) -> Result<Vec<PathBuf>, ScaffoldError> {
    require_module(project, module)?;
    create_files(project, &[test_plan(project, module, name)])
}

fn is_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() == 0)
}

/// Outcome of [`fill_empty_files`].
#[derive(Debug, Default)]
pub struct Filled {
    pub filled: Vec<PathBuf>,
    /// Empty files left alone because their name or folder is not an identifier.
    pub skipped: Vec<PathBuf>,
}

fn is_valid_stem(folder: Option<&str>, name: &str) -> bool {
    naming::is_identifier(name) && folder.is_none_or(|f| naming::validate_folder(f).is_ok())
}

/// Split `Render/Blur` into `(Some("Render"), "Blur")`.
fn split_rel(rel_without_ext: &str) -> (Option<&str>, &str) {
    match rel_without_ext.rsplit_once('/') {
        Some((folder, name)) => (Some(folder), name),
        None => (None, rel_without_ext),
    }
}

/// Fill zero-byte `.hpp` / `.cpp` files of every module from the matching template.
pub fn fill_empty_files(project: &Project) -> Result<Filled, ScaffoldError> {
    let modules = project
        .all_modules()
        .map_err(io_err(&project.source_dir()))?;

    let mut result = Filled::default();
    for module in &modules {
        let mut plans = Vec::new();

        for rel in generate::scan_files(&project.public_dir(module), &["hpp"])? {
            let path = project.public_dir(module).join(&rel);
            if !is_empty_file(&path) {
                continue;
            }
            let (folder, name) = split_rel(rel.trim_end_matches(".hpp"));
            if !is_valid_stem(folder, name) {
                result.skipped.push(path);
                continue;
            }
            plans.push(header_plan(project, module, name, folder, TemplateKind::Header));
        }

        for rel in generate::scan_files(&project.private_dir(module), &["cpp"])? {
            let path = project.private_dir(module).join(&rel);
            if !is_empty_file(&path) {
                continue;
            }
            let stem = rel.trim_end_matches(".cpp");
            let (folder, name) = split_rel(stem);
            if !is_valid_stem(folder, name) {
                result.skipped.push(path);
                continue;
            }
            let header = format!("{}.hpp", stem);
            let include = if project.public_dir(module).join(&header).is_file() {
                header
            } else {
                format!("{}.hpp", module.module)
            };
            plans.push(source_plan(
                project,
                module,
                name,
                folder,
                TemplateKind::Source,
                &include,
            ));
        }

        let test_prefix = format!("Test{}{}", module.domain, module.module);
        for rel in generate::scan_files(&project.test_dir(module), &["cpp"])? {
            let path = project.test_dir(module).join(&rel);
            if rel.contains('/') || !is_empty_file(&path) {
                continue;
            }
            let stem = rel.trim_end_matches(".cpp");
            let name = stem
                .strip_prefix(&test_prefix)
                .or_else(|| stem.strip_prefix("Test"))
                .filter(|n| !n.is_empty())
                .unwrap_or(stem);
            if !naming::is_identifier(name) {
                result.skipped.push(path);
                continue;
            }
            let mut plan = test_plan(project, module, name);
            // Keep the file where it is even if it does not follow the naming scheme.
            plan.path = path;
            plan.mapping.insert("FILE_NAME", rel.clone());
            plans.push(plan);
        }

        for plan in plans {
            let content = render_plan(project, &plan)?;
            fs::write(&plan.path, content).map_err(io_err(&plan.path))?;
            result.filled.push(plan.path);
        }
    }
    Ok(result)
}
