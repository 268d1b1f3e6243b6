use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "seed.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read seed.toml: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse seed.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SeedConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Prefix of every include guard.
    #[serde(default = "default_identifier")]
    pub identifier: String,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_executable")]
    pub executable: String,
    /// `@copyright` line of scaffolded and generated file banners.
    #[serde(default)]
    pub copyright: Option<String>,
    /// `@license` line of file banners.
    #[serde(default)]
    pub license: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BuildConfig {
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    #[serde(default = "default_bin_dir")]
    pub bin_dir: String,
    #[serde(default = "default_configure_flags")]
    pub configure_flags: Vec<String>,
    #[serde(default = "default_clean_dirs")]
    pub clean_dirs: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            identifier: default_identifier(),
            source_dir: default_source_dir(),
            templates_dir: default_templates_dir(),
            executable: default_executable(),
            copyright: None,
            license: None,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: default_build_dir(),
            bin_dir: default_bin_dir(),
            configure_flags: default_configure_flags(),
            clean_dirs: default_clean_dirs(),
        }
    }
}

impl ProjectConfig {
    /// Banner lines for the configured copyright and license, followed by a
    /// blank comment line; empty when neither is set.
    pub fn notice(&self) -> String {
        let mut notice = String::new();
        if let Some(copyright) = &self.copyright {
            notice.push_str(&format!(" * @copyright {}\n", copyright));
        }
        if let Some(license) = &self.license {
            notice.push_str(&format!(" * @license {}\n", license));
        }
        if !notice.is_empty() {
            notice.push_str(" *\n");
        }
        notice
    }
}

impl SeedConfig {
    /// Load `seed.toml` from `root`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }
}

fn default_name() -> String {
    "SeedEngine".to_string()
}

fn default_identifier() -> String {
    "SEEDENGINE".to_string()
}

fn default_source_dir() -> String {
    "Engine/Source".to_string()
}

fn default_templates_dir() -> String {
    "scripts/templates".to_string()
}

fn default_executable() -> String {
    "seed-engine-editor".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_bin_dir() -> String {
    "bin".to_string()
}

fn default_configure_flags() -> Vec<String> {
    vec![
        "-DGLFW_BUILD_EXAMPLES=OFF".to_string(),
        "-DGLFW_BUILD_TESTS=OFF".to_string(),
        "-DGRAPHICS_API:STRING=OPENGL".to_string(),
    ]
}

fn default_clean_dirs() -> Vec<String> {
    ["bin", "build", "lib", ".vs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
