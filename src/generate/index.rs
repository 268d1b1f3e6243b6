//! Source-tree index: `<source_dir>/CMakeLists.txt` with one `add_subdirectory` per module.

use super::{GenerateError, GenerateStatus, render, write_artifact};
use crate::project::Project;
use crate::template::Mapping;
use crate::templates::TemplateKind;

pub fn render_index(project: &Project) -> Result<String, GenerateError> {
    let modules = project.all_modules().map_err(|source| GenerateError::ListModules {
        path: project.source_dir(),
        source,
    })?;

    let subdirectories = modules
        .iter()
        .map(|m| format!("add_subdirectory({}/{})", m.domain, m.module))
        .collect::<Vec<_>>()
        .join("\n");

    let mut mapping = Mapping::new();
    mapping.insert("PROJECT_NAME", project.config.project.name.clone());
    mapping.insert("SUBDIRECTORIES", subdirectories);
    render(project, TemplateKind::CMakeIndex, &mapping)
}

pub fn generate_index(project: &Project) -> GenerateStatus {
    let path = project.source_dir().join(super::cmake::CMAKE_FILE);
    match render_index(project).and_then(|text| write_artifact(&path, &text)) {
        Ok(()) => GenerateStatus::Success,
        Err(e) => GenerateStatus::Failure(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::{add_module, scratch_project};
    use std::fs;

    #[test]
    fn test_index_lists_modules_sorted() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Math", &[]);
        add_module(&project, "Runtime", "Common", &[]);
        add_module(&project, "Editor", "SeedEngineEditor", &[]);

        assert_eq!(generate_index(&project), GenerateStatus::Success);
        let text = fs::read_to_string(project.source_dir().join("CMakeLists.txt")).unwrap();
        let subdirs: Vec<_> = text
            .lines()
            .filter(|l| l.starts_with("add_subdirectory"))
            .collect();
        assert_eq!(
            subdirs,
            vec![
                "add_subdirectory(Editor/SeedEngineEditor)",
                "add_subdirectory(Runtime/Common)",
                "add_subdirectory(Runtime/Math)",
            ]
        );
        assert!(text.contains("enable_testing()"));
    }
}
