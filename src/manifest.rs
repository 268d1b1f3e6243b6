//! Module manifests (`Module.json`).
//!
//! One manifest per module records its build target, its dependencies on
//! other modules, and which artifacts the generators should maintain.
//!
//! ```json
//! {
//!     "Domain": "Runtime",
//!     "Name": "Graphics",
//!     "BuildTarget": "Shared",
//!     "Dependencies": [
//!         { "Domain": "Runtime", "Module": "Common" }
//!     ],
//!     "GenerateCMake": "True",
//!     "GenerateAPI": "True",
//!     "GenerateCompositeHeader": "True",
//!     "CustomCMakeInstructions": []
//! }
//! ```
//!
//! Booleans are stored as the strings `"True"`/`"False"`; anything else is a
//! decode error rather than a silent default.

use crate::project::Project;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const MANIFEST_FILE: &str = "Module.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("module '{module}' not found ({path} does not exist)")]
    NotFound { module: ModuleRef, path: PathBuf },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A `(domain, module)` pair. Equality is by both names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Module")]
    pub module: String,
}

impl ModuleRef {
    pub fn new(domain: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.module)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildTarget {
    Shared,
    Static,
    Executable,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildTarget::Shared => "Shared",
            BuildTarget::Static => "Static",
            BuildTarget::Executable => "Executable",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "BuildTarget")]
    pub build_target: BuildTarget,
    #[serde(rename = "Dependencies")]
    pub dependencies: Vec<ModuleRef>,
    #[serde(rename = "GenerateCMake", with = "flag")]
    pub generate_cmake: bool,
    #[serde(rename = "GenerateAPI", with = "flag")]
    pub generate_api: bool,
    #[serde(rename = "GenerateCompositeHeader", with = "flag")]
    pub generate_composite_header: bool,
    #[serde(rename = "CustomCMakeInstructions")]
    pub custom_instructions: Vec<String>,
}

impl Manifest {
    /// Default manifest for a freshly created module.
    pub fn new(domain: &str, name: &str, build_target: BuildTarget) -> Self {
        Self {
            domain: domain.to_string(),
            name: name.to_string(),
            build_target,
            dependencies: Vec::new(),
            generate_cmake: true,
            generate_api: true,
            generate_composite_header: true,
            custom_instructions: Vec::new(),
        }
    }

    pub fn module_ref(&self) -> ModuleRef {
        ModuleRef::new(&self.domain, &self.name)
    }

    pub fn depends_on(&self, dep: &ModuleRef) -> bool {
        self.dependencies.iter().any(|d| d == dep)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Serialize with four-space indentation and a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// `"True"` / `"False"` string encoding of booleans.
mod flag {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "True" => Ok(true),
            "False" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"\"True\" or \"False\"",
            )),
        }
    }
}

/// Read a module's manifest from disk.
pub fn load(project: &Project, module: &ModuleRef) -> Result<Manifest, ManifestError> {
    let path = project.manifest_path(module);
    if !path.is_file() {
        return Err(ManifestError::NotFound {
            module: module.clone(),
            path,
        });
    }
    let content = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;
    Manifest::from_json(&content).map_err(|source| ManifestError::Parse { path, source })
}

/// Overwrite a module's manifest on disk.
pub fn save(project: &Project, module: &ModuleRef, manifest: &Manifest) -> Result<(), ManifestError> {
    let path = project.manifest_path(module);
    let content = manifest.to_json().map_err(|source| ManifestError::Serialize {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, content).map_err(|source| ManifestError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::scratch_project;

    const GRAPHICS: &str = r#"{
    "Domain": "Runtime",
    "Name": "Graphics",
    "BuildTarget": "Static",
    "Dependencies": [
        {
            "Domain": "Runtime",
            "Module": "Common"
        },
        {
            "Domain": "Runtime",
            "Module": "Math"
        }
    ],
    "GenerateCMake": "True",
    "GenerateAPI": "False",
    "GenerateCompositeHeader": "True",
    "CustomCMakeInstructions": [
        "find_package(OpenGL REQUIRED)"
    ]
}
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_json(GRAPHICS).unwrap();
        assert_eq!(manifest.build_target, BuildTarget::Static);
        assert_eq!(
            manifest.dependencies,
            vec![
                ModuleRef::new("Runtime", "Common"),
                ModuleRef::new("Runtime", "Math")
            ]
        );
        assert!(manifest.generate_cmake);
        assert!(!manifest.generate_api);
        assert_eq!(manifest.custom_instructions.len(), 1);
    }

    #[test]
    fn test_serialization_is_byte_stable() {
        let manifest = Manifest::from_json(GRAPHICS).unwrap();
        assert_eq!(manifest.to_json().unwrap(), GRAPHICS);
    }

    #[test]
    fn test_unknown_build_target_is_rejected() {
        let bad = GRAPHICS.replace("\"Static\"", "\"Dynamic\"");
        assert!(Manifest::from_json(&bad).is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let bad = GRAPHICS.replace("\"GenerateAPI\": \"False\"", "\"GenerateAPI\": \"yes\"");
        assert!(Manifest::from_json(&bad).is_err());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let bad = GRAPHICS.replace("\"BuildTarget\": \"Static\",", "");
        assert!(Manifest::from_json(&bad).is_err());
    }

    #[test]
    fn test_load_save_round_trip() {
        let (_dir, project) = scratch_project();
        let module = ModuleRef::new("Runtime", "Graphics");
        fs::create_dir_all(project.module_dir(&module)).unwrap();
        fs::write(project.manifest_path(&module), GRAPHICS).unwrap();

        let manifest = load(&project, &module).unwrap();
        save(&project, &module, &manifest).unwrap();

        let written = fs::read_to_string(project.manifest_path(&module)).unwrap();
        assert_eq!(written, GRAPHICS);
        assert_eq!(load(&project, &module).unwrap(), manifest);
    }

    #[test]
    fn test_save_into_missing_module_is_io_error() {
        let (_dir, project) = scratch_project();
        let module = ModuleRef::new("Runtime", "Nope");
        let manifest = Manifest::new("Runtime", "Nope", BuildTarget::Shared);
        let err = save(&project, &module, &manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_serialize_error_is_not_reported_as_parse() {
        let source = serde_json::from_str::<Manifest>("[").unwrap_err();
        let err = ManifestError::Serialize {
            path: PathBuf::from("Module.json"),
            source,
        };
        assert!(err.to_string().starts_with("failed to serialize Module.json"));
    }

    #[test]
    fn test_load_missing_module() {
        let (_dir, project) = scratch_project();
        let err = load(&project, &ModuleRef::new("Runtime", "Nope")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_load_malformed_manifest() {
        let (_dir, project) = scratch_project();
        let module = ModuleRef::new("Runtime", "Broken");
        fs::create_dir_all(project.module_dir(&module)).unwrap();
        fs::write(project.manifest_path(&module), "{ \"Domain\": ").unwrap();
        let err = load(&project, &module).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }
}
