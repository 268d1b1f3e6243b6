//! Dependency graph operations over module manifests.
//!
//! The graph is never held in memory as a whole: every operation re-reads
//! the manifests it needs. Traversals track the path from the query root so
//! a cyclic graph is reported instead of recursing forever.

use crate::manifest::{self, ManifestError, ModuleRef};
use crate::project::Project;
use colored::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
    /// Every side of the edge that does not resolve to a module.
    NotFound(Vec<ModuleRef>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
    NotFound(Vec<ModuleRef>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Present,
    /// The edge points at a module that no longer exists.
    Missing,
    /// The module is already on the current path; not expanded again.
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub depth: usize,
    pub module: ModuleRef,
    pub kind: EntryKind,
}

fn missing_sides(project: &Project, module: &ModuleRef, dep: &ModuleRef) -> Vec<ModuleRef> {
    [module, dep]
        .into_iter()
        .filter(|m| !project.module_exists(m))
        .cloned()
        .collect()
}

pub fn add_dependency(
    project: &Project,
    module: &ModuleRef,
    dep: &ModuleRef,
) -> Result<AddOutcome, ManifestError> {
    let missing = missing_sides(project, module, dep);
    if !missing.is_empty() {
        return Ok(AddOutcome::NotFound(missing));
    }

    let mut manifest = manifest::load(project, module)?;
    if manifest.depends_on(dep) {
        return Ok(AddOutcome::AlreadyExists);
    }

    manifest.dependencies.push(dep.clone());
    manifest::save(project, module, &manifest)?;
    Ok(AddOutcome::Added)
}

pub fn remove_dependency(
    project: &Project,
    module: &ModuleRef,
    dep: &ModuleRef,
) -> Result<RemoveOutcome, ManifestError> {
    // The dependency side may have been deleted since the edge was added;
    // only the owning module has to exist to drop a dangling edge.
    if !project.module_exists(module) {
        return Ok(RemoveOutcome::NotFound(vec![module.clone()]));
    }

    let mut manifest = manifest::load(project, module)?;
    let before = manifest.dependencies.len();
    manifest.dependencies.retain(|d| d != dep);
    if manifest.dependencies.len() == before {
        if !project.module_exists(dep) {
            return Ok(RemoveOutcome::NotFound(vec![dep.clone()]));
        }
        return Ok(RemoveOutcome::NotPresent);
    }

    manifest::save(project, module, &manifest)?;
    Ok(RemoveOutcome::Removed)
}

/// Dependencies of `module` in manifest order, depth-first when `recursive`.
pub fn list_dependencies(
    project: &Project,
    module: &ModuleRef,
    recursive: bool,
) -> Result<Vec<ListEntry>, ManifestError> {
    let mut entries = Vec::new();
    let mut path = vec![module.clone()];
    walk(project, module, recursive, 0, &mut path, &mut entries, |p, m| {
        Ok(manifest::load(p, m)?.dependencies)
    })?;
    Ok(entries)
}

/// Modules in the same domain that depend on `module`, depth-first when `recursive`.
///
/// Only the target's own domain is scanned. Sibling manifests that cannot be
/// read are skipped with a warning.
pub fn list_references(
    project: &Project,
    module: &ModuleRef,
    recursive: bool,
) -> Result<Vec<ListEntry>, ManifestError> {
    if !project.module_exists(module) {
        return Err(ManifestError::NotFound {
            module: module.clone(),
            path: project.manifest_path(module),
        });
    }

    let mut entries = Vec::new();
    let mut path = vec![module.clone()];
    walk(project, module, recursive, 0, &mut path, &mut entries, referrers)?;
    Ok(entries)
}

fn referrers(project: &Project, target: &ModuleRef) -> Result<Vec<ModuleRef>, ManifestError> {
    let candidates = project
        .modules(&target.domain)
        .map_err(|source| ManifestError::Io {
            path: project.domain_dir(&target.domain),
            source,
        })?;

    let mut found = Vec::new();
    for candidate in candidates {
        match manifest::load(project, &candidate) {
            Ok(m) if m.depends_on(target) => found.push(candidate),
            Ok(_) => {}
            Err(e) => println!("   {} Skipping {}: {}", "!".yellow(), candidate, e),
        }
    }
    Ok(found)
}

fn walk<F>(
    project: &Project,
    node: &ModuleRef,
    recursive: bool,
    depth: usize,
    path: &mut Vec<ModuleRef>,
    entries: &mut Vec<ListEntry>,
    neighbours: F,
) -> Result<(), ManifestError>
where
    F: Fn(&Project, &ModuleRef) -> Result<Vec<ModuleRef>, ManifestError> + Copy,
{
    for next in neighbours(project, node)? {
        let kind = if path.contains(&next) {
            EntryKind::Cycle
        } else if !project.module_exists(&next) {
            EntryKind::Missing
        } else {
            EntryKind::Present
        };
        entries.push(ListEntry {
            depth,
            module: next.clone(),
            kind,
        });

        if recursive && kind == EntryKind::Present {
            path.push(next.clone());
            walk(project, &next, recursive, depth + 1, path, entries, neighbours)?;
            path.pop();
        }
    }
    Ok(())
}

/// Indented text rendering, one entry per line.
pub fn render_entries(entries: &[ListEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            let marker = match e.kind {
                EntryKind::Present => "",
                EntryKind::Missing => " (missing)",
                EntryKind::Cycle => " (cycle)",
            };
            format!("{}{}{}", "    ".repeat(e.depth), e.module, marker)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::{add_module, scratch_project};
    use std::fs;

    fn r(domain: &str, module: &str) -> ModuleRef {
        ModuleRef::new(domain, module)
    }

    fn deps_of(project: &Project, m: &ModuleRef) -> Vec<ModuleRef> {
        manifest::load(project, m).unwrap().dependencies
    }

    #[test]
    fn test_add_twice_is_idempotent() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Graphics", &[]);
        add_module(&project, "Runtime", "Common", &[]);
        let (a, b) = (r("Runtime", "Graphics"), r("Runtime", "Common"));

        assert_eq!(add_dependency(&project, &a, &b).unwrap(), AddOutcome::Added);
        assert_eq!(
            add_dependency(&project, &a, &b).unwrap(),
            AddOutcome::AlreadyExists
        );
        assert_eq!(deps_of(&project, &a), vec![b]);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Graphics", &[]);
        add_module(&project, "Runtime", "Math", &[]);
        add_module(&project, "Runtime", "Common", &[]);
        let a = r("Runtime", "Graphics");

        add_dependency(&project, &a, &r("Runtime", "Math")).unwrap();
        add_dependency(&project, &a, &r("Runtime", "Common")).unwrap();
        assert_eq!(
            deps_of(&project, &a),
            vec![r("Runtime", "Math"), r("Runtime", "Common")]
        );
    }

    #[test]
    fn test_add_to_missing_module_leaves_manifest_untouched() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Graphics", &[]);
        let a = r("Runtime", "Graphics");
        let before = fs::read_to_string(project.manifest_path(&a)).unwrap();

        let outcome = add_dependency(&project, &a, &r("Runtime", "Ghost")).unwrap();
        assert_eq!(outcome, AddOutcome::NotFound(vec![r("Runtime", "Ghost")]));
        assert_eq!(fs::read_to_string(project.manifest_path(&a)).unwrap(), before);
    }

    #[test]
    fn test_add_reports_both_missing_sides() {
        let (_dir, project) = scratch_project();
        let outcome =
            add_dependency(&project, &r("Runtime", "A"), &r("Editor", "B")).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::NotFound(vec![r("Runtime", "A"), r("Editor", "B")])
        );
    }

    #[test]
    fn test_remove_then_list() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Common", &[]);
        add_module(&project, "Runtime", "Math", &[]);
        add_module(
            &project,
            "Runtime",
            "Graphics",
            &[("Runtime", "Common"), ("Runtime", "Math")],
        );
        let a = r("Runtime", "Graphics");

        assert_eq!(
            remove_dependency(&project, &a, &r("Runtime", "Common")).unwrap(),
            RemoveOutcome::Removed
        );
        let listed: Vec<_> = list_dependencies(&project, &a, false)
            .unwrap()
            .into_iter()
            .map(|e| e.module)
            .collect();
        assert_eq!(listed, vec![r("Runtime", "Math")]);

        assert_eq!(
            remove_dependency(&project, &a, &r("Runtime", "Common")).unwrap(),
            RemoveOutcome::NotPresent
        );
    }

    #[test]
    fn test_remove_drops_every_duplicate_edge() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Common", &[]);
        add_module(&project, "Runtime", "Graphics", &[]);
        let a = r("Runtime", "Graphics");
        fs::write(
            project.manifest_path(&a),
            r#"{
    "Domain": "Runtime",
    "Name": "Graphics",
    "BuildTarget": "Shared",
    "Dependencies": [
        { "Domain": "Runtime", "Module": "Common" },
        { "Domain": "Runtime", "Module": "Math" },
        { "Domain": "Runtime", "Module": "Common" }
    ],
    "GenerateCMake": "True",
    "GenerateAPI": "True",
    "GenerateCompositeHeader": "True",
    "CustomCMakeInstructions": []
}
"#,
        )
        .unwrap();

        assert_eq!(
            remove_dependency(&project, &a, &r("Runtime", "Common")).unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(deps_of(&project, &a), vec![r("Runtime", "Math")]);
    }

    #[test]
    fn test_remove_drops_dangling_edge() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Graphics", &[("Runtime", "Deleted")]);
        let a = r("Runtime", "Graphics");
        assert_eq!(
            remove_dependency(&project, &a, &r("Runtime", "Deleted")).unwrap(),
            RemoveOutcome::Removed
        );
        assert!(deps_of(&project, &a).is_empty());
    }

    #[test]
    fn test_remove_unknown_edge_to_unknown_module() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Graphics", &[]);
        assert_eq!(
            remove_dependency(&project, &r("Runtime", "Graphics"), &r("Runtime", "Ghost"))
                .unwrap(),
            RemoveOutcome::NotFound(vec![r("Runtime", "Ghost")])
        );
    }

    #[test]
    fn test_recursive_dependencies_are_indented() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "C", &[]);
        add_module(&project, "Runtime", "B", &[("Runtime", "C")]);
        add_module(&project, "Runtime", "D", &[]);
        add_module(&project, "Runtime", "A", &[("Runtime", "B"), ("Runtime", "D")]);

        let entries = list_dependencies(&project, &r("Runtime", "A"), true).unwrap();
        let shape: Vec<_> = entries
            .iter()
            .map(|e| (e.depth, e.module.module.as_str()))
            .collect();
        assert_eq!(shape, vec![(0, "B"), (1, "C"), (0, "D")]);

        let flat = list_dependencies(&project, &r("Runtime", "A"), false).unwrap();
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn test_references_on_chain() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "C", &[]);
        add_module(&project, "Runtime", "B", &[("Runtime", "C")]);
        add_module(&project, "Runtime", "A", &[("Runtime", "B")]);

        let entries = list_references(&project, &r("Runtime", "C"), true).unwrap();
        let shape: Vec<_> = entries
            .iter()
            .map(|e| (e.depth, e.module.module.as_str()))
            .collect();
        assert_eq!(shape, vec![(0, "B"), (1, "A")]);
    }

    #[test]
    fn test_references_are_domain_scoped() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Common", &[]);
        add_module(&project, "Runtime", "Math", &[("Runtime", "Common")]);
        add_module(&project, "Editor", "Tools", &[("Runtime", "Common")]);

        let entries = list_references(&project, &r("Runtime", "Common"), false).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].module, r("Runtime", "Math"));
    }

    #[test]
    fn test_references_skip_broken_sibling() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "Common", &[]);
        add_module(&project, "Runtime", "Math", &[("Runtime", "Common")]);
        add_module(&project, "Runtime", "Broken", &[]);
        fs::write(project.manifest_path(&r("Runtime", "Broken")), "{ \"Domain\": ").unwrap();

        let entries = list_references(&project, &r("Runtime", "Common"), true).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].module, r("Runtime", "Math"));
    }

    #[test]
    fn test_cycle_is_flagged_and_terminates() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "A", &[("Runtime", "B")]);
        add_module(&project, "Runtime", "B", &[("Runtime", "A")]);

        let entries = list_dependencies(&project, &r("Runtime", "A"), true).unwrap();
        assert_eq!(
            entries,
            vec![
                ListEntry {
                    depth: 0,
                    module: r("Runtime", "B"),
                    kind: EntryKind::Present
                },
                ListEntry {
                    depth: 1,
                    module: r("Runtime", "A"),
                    kind: EntryKind::Cycle
                },
            ]
        );

        let refs = list_references(&project, &r("Runtime", "A"), true).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].kind, EntryKind::Cycle);
    }

    #[test]
    fn test_missing_dependency_is_not_expanded() {
        let (_dir, project) = scratch_project();
        add_module(&project, "Runtime", "A", &[("Runtime", "Gone")]);
        let entries = list_dependencies(&project, &r("Runtime", "A"), true).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Missing);
        assert_eq!(render_entries(&entries), vec!["Runtime/Gone (missing)"]);
    }

    #[test]
    fn test_render_indentation() {
        let entries = vec![
            ListEntry {
                depth: 0,
                module: r("Runtime", "B"),
                kind: EntryKind::Present,
            },
            ListEntry {
                depth: 1,
                module: r("Runtime", "A"),
                kind: EntryKind::Present,
            },
        ];
        assert_eq!(
            render_entries(&entries),
            vec!["Runtime/B", "    Runtime/A"]
        );
    }
}
