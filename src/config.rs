use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "automatically-i18n-config.json";

/// Directory (below `i18nFilePath`) that holds one JSON catalog per language.
pub const LOCALE_DIR_NAME: &str = "locale";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Catalog base directory, relative to the project root.
    #[serde(default = "default_i18n_file_path")]
    pub i18n_file_path: String,
    /// Language of the text being extracted; names the source-of-truth catalog.
    #[serde(default = "default_base_language")]
    pub base_language: String,
    #[serde(default = "default_auto_import_i18n")]
    pub auto_import_i18n: bool,
    #[serde(default = "default_i18n_import_path")]
    pub i18n_import_path: String,
    #[serde(default = "default_template_i18n_call")]
    pub template_i18n_call: String,
    #[serde(default = "default_script_i18n_call")]
    pub script_i18n_call: String,
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,
    #[serde(default = "default_excluded_strings")]
    pub excluded_strings: Vec<String>,
    /// External formatter argv, e.g. `["prettier", "--stdin-filepath", "{file}"]`.
    #[serde(default)]
    pub format_command: Vec<String>,
    #[serde(default = "default_free_google")]
    pub free_google: bool,
    #[serde(default)]
    pub baidu: BaiduConfig,
    #[serde(default)]
    pub deepl: DeeplConfig,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaiduConfig {
    #[serde(default)]
    pub appid: String,
    #[serde(default)]
    pub secret_key: String,
}

impl BaiduConfig {
    pub fn is_configured(&self) -> bool {
        !self.appid.is_empty() && !self.secret_key.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeplConfig {
    #[serde(default)]
    pub auth_key: String,
    #[serde(default)]
    pub is_pro: bool,
}

impl DeeplConfig {
    pub fn is_configured(&self) -> bool {
        !self.auth_key.is_empty()
    }
}

fn default_i18n_file_path() -> String {
    "/src/i18n".to_string()
}

fn default_base_language() -> String {
    "zh".to_string()
}

fn default_auto_import_i18n() -> bool {
    true
}

fn default_i18n_import_path() -> String {
    "@/i18n".to_string()
}

fn default_template_i18n_call() -> String {
    "$t".to_string()
}

fn default_script_i18n_call() -> String {
    "i18n.global.t".to_string()
}

fn default_excluded_extensions() -> Vec<String> {
    [
        ".svg", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".md", ".txt", ".json", ".css",
        ".scss", ".less", ".sass", ".styl",
    ]
    .map(String::from)
    .to_vec()
}

fn default_excluded_strings() -> Vec<String> {
    [
        "宋体",
        "黑体",
        "楷体",
        "仿宋",
        "微软雅黑",
        "华文",
        "方正",
        "苹方",
        "思源",
        "YYYY年MM月DD日",
    ]
    .map(String::from)
    .to_vec()
}

fn default_free_google() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n_file_path: default_i18n_file_path(),
            base_language: default_base_language(),
            auto_import_i18n: default_auto_import_i18n(),
            i18n_import_path: default_i18n_import_path(),
            template_i18n_call: default_template_i18n_call(),
            script_i18n_call: default_script_i18n_call(),
            excluded_extensions: default_excluded_extensions(),
            excluded_strings: default_excluded_strings(),
            format_command: Vec::new(),
            free_google: default_free_google(),
            baidu: BaiduConfig::default(),
            deepl: DeeplConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Call names end up verbatim in rewritten source, so they must be dotted
    /// identifier paths (`t`, `$t`, `i18n.global.t`).
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("scriptI18nCall", &self.script_i18n_call),
            ("templateI18nCall", &self.template_i18n_call),
        ] {
            if !is_call_path(value) {
                bail!(
                    "Invalid call name in '{}': \"{}\" (expected an identifier path like i18n.global.t)",
                    field,
                    value
                );
            }
        }

        if self.i18n_import_path.trim().is_empty() {
            bail!("'i18nImportPath' must not be empty");
        }
        if self.i18n_import_path.contains('\'') {
            bail!("'i18nImportPath' must not contain quotes");
        }

        for ext in &self.excluded_extensions {
            if !ext.starts_with('.') {
                bail!(
                    "Invalid extension in 'excludedExtensions': \"{}\" (must start with '.')",
                    ext
                );
            }
        }

        if self.base_language.trim().is_empty() {
            bail!("'baseLanguage' must not be empty");
        }

        Ok(())
    }

    /// Directory holding the per-language catalogs, resolved against `root`.
    ///
    /// A leading separator in `i18nFilePath` is dropped so `/src/i18n` stays
    /// inside the project instead of resolving to the filesystem root.
    pub fn locale_dir(&self, root: &Path) -> PathBuf {
        root.join(normalize_base_path(&self.i18n_file_path))
            .join(LOCALE_DIR_NAME)
    }

    /// Identifier the auto-inserted import binds: the first segment of the
    /// script call name (`i18n.global.t` -> `i18n`).
    pub fn import_binding(&self) -> &str {
        self.script_i18n_call
            .split('.')
            .next()
            .unwrap_or(&self.script_i18n_call)
    }

    pub fn is_excluded_extension(&self, ext: &str) -> bool {
        self.excluded_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn is_call_path(value: &str) -> bool {
    !value.is_empty()
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

/// Strip leading separators and normalize backslashes.
pub fn normalize_base_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Write the default config, pretty-printed with a trailing newline.
pub fn write_default_config(path: &Path) -> Result<()> {
    fs::write(path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Path of the file the config came from.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            path: None,
        }),
    }
}
