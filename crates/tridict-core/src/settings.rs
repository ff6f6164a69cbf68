//! Ingestion settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before the first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
    pub linker: LinkerSettings,
    pub languages: LanguageSettings,
    pub progress: ProgressSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkerSettings {
    pub max_examples_per_word: usize,
    pub candidate_limit: usize,
}

/// Tatoeba language codes for the two source languages and the pivot.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageSettings {
    pub japanese: String,
    pub chinese: String,
    pub english: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressSettings {
    pub interval: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_code {
        ($field:ident) => {
            if s.languages.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!("languages.", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive_usize!(store.batch_size);
    check_positive_usize!(linker.max_examples_per_word);
    check_positive_usize!(linker.candidate_limit);
    check_positive_usize!(progress.interval);

    check_code!(japanese);
    check_code!(chinese);
    check_code!(english);

    let codes = [
        &s.languages.japanese,
        &s.languages.chinese,
        &s.languages.english,
    ];
    if codes[0] == codes[1] || codes[0] == codes[2] || codes[1] == codes[2] {
        return Err(SettingsError::InvalidValue {
            field: "languages".to_string(),
            reason: "language codes must be distinct".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.store.batch_size, 10_000);
        assert_eq!(s.linker.max_examples_per_word, 5);
        assert_eq!(s.linker.candidate_limit, 5000);
        assert_eq!(s.languages.japanese, "jpn");
        assert_eq!(s.languages.chinese, "cmn");
        assert_eq!(s.languages.english, "eng");
        assert_eq!(s.progress.interval, 10_000);
    }

    #[test]
    fn reject_zero_batch_size() {
        let toml = DEFAULT_SETTINGS_TOML.replace("batch_size = 10000", "batch_size = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("store.batch_size"));
    }

    #[test]
    fn reject_zero_example_cap() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_examples_per_word = 5", "max_examples_per_word = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("linker.max_examples_per_word"));
    }

    #[test]
    fn reject_duplicate_language_codes() {
        let toml = DEFAULT_SETTINGS_TOML.replace("chinese = \"cmn\"", "chinese = \"jpn\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn reject_missing_section() {
        let result = parse_settings_toml("[store]\nbatch_size = 10\n");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn settings_singleton_uses_defaults() {
        assert!(settings().store.batch_size > 0);
    }
}
