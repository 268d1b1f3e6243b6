//! Module build script (`CMakeLists.txt`) generation.

use super::{
    GenerateError, GenerateStatus, HEADER_EXTENSIONS, Rendered, SOURCE_EXTENSIONS, finish,
    module_mapping, partition_dependencies, render, scan_files,
};
use crate::manifest::{BuildTarget, Manifest};
use crate::naming;
use crate::project::{PRIVATE_DIR, PUBLIC_DIR, Project, TEST_DIR};
use crate::templates::TemplateKind;

pub const CMAKE_FILE: &str = "CMakeLists.txt";

fn file_lines(prefix: &str, files: &[String]) -> String {
    files
        .iter()
        .map(|f| format!("        {}/{}", prefix, f))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_cmake(project: &Project, manifest: &Manifest) -> Result<Rendered, GenerateError> {
    let module = manifest.module_ref();
    let mut mapping = module_mapping(project, &manifest.domain, &manifest.name);

    let (present, skipped) = partition_dependencies(project, manifest);
    let mut links = Vec::with_capacity(present.len());
    for dep in &present {
        let mut dep_mapping = mapping.clone();
        dep_mapping.insert(
            "DEPENDENCY_TARGET",
            naming::target_name(&dep.domain, &dep.module),
        );
        links.push(render(project, TemplateKind::CMakeDependency, &dep_mapping)?);
    }

    let declaration_kind = match manifest.build_target {
        BuildTarget::Shared => TemplateKind::CMakeShared,
        BuildTarget::Static => TemplateKind::CMakeStatic,
        BuildTarget::Executable => TemplateKind::CMakeExecutable,
    };
    let declaration = render(project, declaration_kind, &mapping)?;

    let sources = scan_files(&project.private_dir(&module), SOURCE_EXTENSIONS)?;
    let headers = scan_files(&project.public_dir(&module), HEADER_EXTENSIONS)?;
    let tests = scan_files(&project.test_dir(&module), SOURCE_EXTENSIONS)?;

    let test_section = if tests.is_empty() {
        String::new()
    } else {
        let mut test_mapping = mapping.clone();
        test_mapping.insert("TEST_FILES", file_lines(TEST_DIR, &tests));
        render(project, TemplateKind::CMakeTests, &test_mapping)?
    };

    mapping.insert("TARGET_DECLARATION", declaration);
    mapping.insert("DEPENDENCIES", links.join("\n"));
    mapping.insert("CUSTOM_INSTRUCTIONS", manifest.custom_instructions.join("\n"));
    mapping.insert("SOURCE_FILES", file_lines(PRIVATE_DIR, &sources));
    mapping.insert("HEADER_FILES", file_lines(PUBLIC_DIR, &headers));
    mapping.insert("TESTS", test_section);

    Ok(Rendered {
        text: render(project, TemplateKind::CMakeModule, &mapping)?,
        skipped,
    })
}

pub fn generate_cmake(project: &Project, manifest: &Manifest) -> GenerateStatus {
    if !manifest.generate_cmake {
        return GenerateStatus::Disabled;
    }
    let module = manifest.module_ref();
    let path = project.module_dir(&module).join(CMAKE_FILE);
    finish(CMAKE_FILE, &module, render_cmake(project, manifest), &path)
}
