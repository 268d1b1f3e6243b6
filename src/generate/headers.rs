//! Public API header (`<Module>API.hpp`) and composite header (`<Module>.hpp`).

use super::{
    GenerateError, GenerateStatus, HEADER_EXTENSIONS, Rendered, finish, module_mapping,
    partition_dependencies, render, scan_files,
};
use crate::manifest::Manifest;
use crate::naming;
use crate::project::Project;
use crate::templates::TemplateKind;

pub fn api_header_name(module: &str) -> String {
    format!("{}API.hpp", module)
}

pub fn composite_header_name(module: &str) -> String {
    format!("{}.hpp", module)
}

fn include_lines<I: IntoIterator<Item = String>>(paths: I) -> String {
    paths
        .into_iter()
        .map(|p| format!("#include \"{}\"", p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_api_header(project: &Project, manifest: &Manifest) -> Result<Rendered, GenerateError> {
    let (present, skipped) = partition_dependencies(project, manifest);

    let mut mapping = module_mapping(project, &manifest.domain, &manifest.name);
    mapping.insert("FILE_NAME", api_header_name(&manifest.name));
    mapping.insert(
        "GUARD",
        naming::include_guard(
            &project.config.project.identifier,
            &manifest.domain,
            &manifest.name,
            "API",
        ),
    );
    mapping.insert(
        "INCLUDES",
        include_lines(present.iter().map(|d| composite_header_name(&d.module))),
    );

    Ok(Rendered {
        text: render(project, TemplateKind::ApiHeader, &mapping)?,
        skipped,
    })
}

/// Every public header except the module's own top-level composite and API headers.
pub fn render_composite_header(
    project: &Project,
    manifest: &Manifest,
) -> Result<Rendered, GenerateError> {
    let module = manifest.module_ref();
    let own_composite = composite_header_name(&manifest.name);
    let own_api = api_header_name(&manifest.name);

    let headers = scan_files(&project.public_dir(&module), HEADER_EXTENSIONS)?
        .into_iter()
        .filter(|h| *h != own_composite && *h != own_api);

    let mut mapping = module_mapping(project, &manifest.domain, &manifest.name);
    mapping.insert("FILE_NAME", own_composite.clone());
    mapping.insert(
        "GUARD",
        naming::include_guard(
            &project.config.project.identifier,
            &manifest.domain,
            &manifest.name,
            "MODULE",
        ),
    );
    mapping.insert("INCLUDES", include_lines(headers));

    Ok(Rendered {
        text: render(project, TemplateKind::CompositeHeader, &mapping)?,
        skipped: Vec::new(),
    })
}

pub fn generate_api_header(project: &Project, manifest: &Manifest) -> GenerateStatus {
    if !manifest.generate_api {
        return GenerateStatus::Disabled;
    }
    let module = manifest.module_ref();
    let name = api_header_name(&manifest.name);
    let path = project.public_dir(&module).join(&name);
    finish(&name, &module, render_api_header(project, manifest), &path)
}

pub fn generate_composite_header(project: &Project, manifest: &Manifest) -> GenerateStatus {
    if !manifest.generate_composite_header {
        return GenerateStatus::Disabled;
    }
    let module = manifest.module_ref();
    let name = composite_header_name(&manifest.name);
    let path = project.public_dir(&module).join(&name);
    finish(&name, &module, render_composite_header(project, manifest), &path)
}
