//! Name validation and derived identifiers.
//!
//! Every user-supplied name passes through here before anything touches the
//! disk. Derived names (include guards, export macros, CMake targets) are
//! computed from the validated PascalCase names.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("invalid {kind} name '{value}': expected a letter or '_' followed by letters, digits or '_'")]
    Identifier { kind: &'static str, value: String },

    #[error("invalid folder '{0}': expected '/'-separated identifiers")]
    Folder(String),
}

pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

/// Validate a domain, module, class, or test name.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), NameError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(NameError::Identifier {
            kind,
            value: value.to_string(),
        })
    }
}

/// Validate a folder path such as `OpenGL` or `Render/Passes`.
///
/// Empty segments (leading, trailing, or doubled slashes) are rejected.
pub fn validate_folder(value: &str) -> Result<(), NameError> {
    if !value.is_empty() && value.split('/').all(is_identifier) {
        Ok(())
    } else {
        Err(NameError::Folder(value.to_string()))
    }
}

/// Split a PascalCase name into its words.
///
/// `GameplayCore` -> `["Gameplay", "Core"]`, `OpenGLWindow` -> `["Open", "GL", "Window"]`.
fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `GameplayCore` -> `GAMEPLAY_CORE`
pub fn upper_snake(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `GameplayCore` -> `gameplay-core`
pub fn kebab(name: &str) -> String {
    words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// CMake target name for a module, e.g. `runtime-gameplay-core`.
pub fn target_name(domain: &str, module: &str) -> String {
    format!("{}-{}", kebab(domain), kebab(module))
}

/// Prefix shared by the export macros of a module, e.g. `RUNTIME_GAMEPLAY_CORE`.
pub fn export_macro(domain: &str, module: &str) -> String {
    format!("{}_{}", upper_snake(domain), upper_snake(module))
}

/// Include guard for a generated or scaffolded header.
///
/// `suffix` distinguishes the artifacts of one module (`API`, `MODULE`, or a class name).
pub fn include_guard(identifier: &str, domain: &str, module: &str, suffix: &str) -> String {
    format!(
        "{}_INCLUDE_{}_{}_{}_H_",
        identifier.to_uppercase(),
        upper_snake(domain),
        upper_snake(module),
        suffix
    )
}
