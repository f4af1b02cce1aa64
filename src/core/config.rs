use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::core::alphabet::{Alphabet, STANDARD_ALPHABET};
use crate::encoders::algorithms::errors::{AlphabetError, ConfigError, find_closest_name};
use crate::features::hashing::HashAlgorithm;

/// Framing variant: which segments a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// `checksum | length | payload`
    #[default]
    Integrity,
    /// `length | payload`
    #[serde(alias = "length-only")]
    LengthOnly,
}

impl Profile {
    /// Number of separator-delimited segments in a frame of this profile.
    pub fn segment_count(&self) -> usize {
        match self {
            Profile::Integrity => 3,
            Profile::LengthOnly => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Integrity => "integrity",
            Profile::LengthOnly => "length_only",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "integrity" => Ok(Profile::Integrity),
            "length_only" | "length-only" => Ok(Profile::LengthOnly),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

/// An inclusive Unicode code-point range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
}

/// A custom alphabet definition loaded from TOML.
///
/// Symbols are taken from `chars` first, then from each range in order.
/// Duplicates keep their first position; the separator and anything in
/// `exclude` is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlphabetConfig {
    #[serde(default)]
    pub chars: String,
    #[serde(default)]
    pub ranges: Vec<CodepointRange>,
    #[serde(default)]
    pub exclude: String,
}

impl AlphabetConfig {
    pub fn build(&self) -> Result<Alphabet, AlphabetError> {
        let mut builder = Alphabet::builder().chars(&self.chars);
        for range in &self.ranges {
            builder = builder.range(range.start, range.end);
        }
        builder.exclude(self.exclude.chars()).build()
    }
}

/// Default codec settings. Every field is optional in a layer so that a
/// user file can override a single value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub alphabet: Option<String>,
}

impl Settings {
    fn merge(&mut self, other: Settings) {
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.hash.is_some() {
            self.hash = other.hash;
        }
        if other.max_length.is_some() {
            self.max_length = other.max_length;
        }
        if other.alphabet.is_some() {
            self.alphabet = other.alphabet;
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile.unwrap_or_default()
    }

    pub fn hash_algorithm(&self) -> Result<HashAlgorithm, ConfigError> {
        match &self.hash {
            Some(name) => HashAlgorithm::from_str(name),
            None => Ok(HashAlgorithm::default()),
        }
    }

    pub fn alphabet_name(&self) -> &str {
        self.alphabet.as_deref().unwrap_or(STANDARD_ALPHABET)
    }
}

/// Codec configuration assembled from TOML layers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub alphabets: HashMap<String, AlphabetConfig>,
}

/// A resolved alphabet: the shared standard one or a freshly built custom one.
#[derive(Debug, Clone)]
pub enum AlphabetRef {
    Standard(&'static Alphabet),
    Custom(Alphabet),
}

impl AsRef<Alphabet> for AlphabetRef {
    fn as_ref(&self) -> &Alphabet {
        match self {
            AlphabetRef::Standard(alphabet) => alphabet,
            AlphabetRef::Custom(alphabet) => alphabet,
        }
    }
}

impl CodecConfig {
    /// Parses one configuration layer from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration bundled with the library.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_toml(include_str!("../../base-chat.toml"))
    }

    /// Loads one configuration layer from a file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in defaults (from library)
    /// 2. `~/.config/base-chat/config.toml` (user overrides)
    /// 3. `./base-chat.toml` (project-local overrides)
    ///
    /// A layer that fails to load is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, ConfigError> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("base-chat").join("config.toml");
            config.merge_file(&user_config_path);
        }

        config.merge_file(Path::new("base-chat.toml"));
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(layer) => {
                tracing::debug!(path = %path.display(), "loaded config layer");
                self.merge(layer);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping config layer");
            }
        }
    }

    /// Merges another configuration into this one.
    ///
    /// Settings present in `other` win; alphabets with the same name are replaced.
    pub fn merge(&mut self, other: CodecConfig) {
        self.settings.merge(other.settings);
        self.alphabets.extend(other.alphabets);
    }

    /// Names of every alphabet that can be resolved, sorted, standard first.
    pub fn alphabet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .alphabets
            .keys()
            .map(String::as_str)
            .filter(|name| *name != STANDARD_ALPHABET)
            .collect();
        names.sort_unstable();
        names.insert(0, STANDARD_ALPHABET);
        names
    }

    /// Resolves an alphabet by name.
    ///
    /// `standard` always refers to the built-in alphabet and cannot be
    /// redefined, since frames already in flight depend on it.
    pub fn alphabet(&self, name: &str) -> Result<AlphabetRef, AlphabetError> {
        if name == STANDARD_ALPHABET {
            return Ok(AlphabetRef::Standard(Alphabet::standard()));
        }

        match self.alphabets.get(name) {
            Some(definition) => Ok(AlphabetRef::Custom(definition.build()?)),
            None => Err(AlphabetError::UnknownAlphabet {
                name: name.to_string(),
                suggestion: find_closest_name(name, self.alphabet_names()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = CodecConfig::load_default().unwrap();
        assert_eq!(config.settings.profile(), Profile::Integrity);
        assert_eq!(config.settings.hash_algorithm().unwrap(), HashAlgorithm::Sha256);
        assert_eq!(config.settings.max_length, None);
        assert_eq!(config.settings.alphabet_name(), "standard");
        assert!(config.alphabets.contains_key("ascii"));
    }

    #[test]
    fn test_builtin_ascii_alphabet() {
        let config = CodecConfig::load_default().unwrap();
        let ascii = config.alphabet("ascii").unwrap();
        let ascii = ascii.as_ref();
        assert!(!ascii.contains('|'));
        assert!(!ascii.contains('l'));
        assert!(ascii.symbols().iter().all(|c| c.is_ascii_graphic()));
        assert_eq!(ascii.size(), 88);
    }

    #[test]
    fn test_standard_cannot_be_redefined() {
        let config = CodecConfig::from_toml(
            r#"
[alphabets.standard]
chars = "01"
"#,
        )
        .unwrap();
        let resolved = config.alphabet("standard").unwrap();
        assert_eq!(resolved.as_ref().size(), 1674);
    }

    #[test]
    fn test_unknown_alphabet_suggests() {
        let config = CodecConfig::load_default().unwrap();
        let err = config.alphabet("asci").unwrap_err();
        assert_eq!(
            err,
            AlphabetError::UnknownAlphabet {
                name: "asci".to_string(),
                suggestion: Some("ascii".to_string()),
            }
        );
    }

    #[test]
    fn test_merge_overrides_single_setting() {
        let mut config = CodecConfig::load_default().unwrap();
        let layer = CodecConfig::from_toml(
            r#"
[settings]
max_length = 2000
"#,
        )
        .unwrap();
        config.merge(layer);

        assert_eq!(config.settings.max_length, Some(2000));
        assert_eq!(config.settings.profile(), Profile::Integrity);
        assert!(config.alphabets.contains_key("ascii"));
    }

    #[test]
    fn test_merge_replaces_alphabet() {
        let mut config = CodecConfig::load_default().unwrap();
        let layer = CodecConfig::from_toml(
            r#"
[alphabets.ascii]
chars = "abc"
"#,
        )
        .unwrap();
        config.merge(layer);
        assert_eq!(config.alphabet("ascii").unwrap().as_ref().size(), 3);
    }

    #[test]
    fn test_load_from_toml_string() {
        let toml_content = r#"
[settings]
profile = "length_only"
hash = "blake3"
alphabet = "hexish"

[alphabets.hexish]
ranges = [{ start = 0x30, end = 0x39 }, { start = 0x61, end = 0x66 }]
"#;
        let config = CodecConfig::from_toml(toml_content).unwrap();
        assert_eq!(config.settings.profile(), Profile::LengthOnly);
        assert_eq!(config.settings.hash_algorithm().unwrap(), HashAlgorithm::Blake3);

        let alphabet = config.alphabet(config.settings.alphabet_name()).unwrap();
        assert_eq!(alphabet.as_ref().preview(16), "0123456789abcdef");
    }

    #[test]
    fn test_profile_accepts_hyphenated_alias() {
        let config = CodecConfig::from_toml("[settings]\nprofile = \"length-only\"\n").unwrap();
        assert_eq!(config.settings.profile(), Profile::LengthOnly);
        assert_eq!(Profile::from_str("Length-Only").unwrap(), Profile::LengthOnly);
        assert!(Profile::from_str("checksum").is_err());
    }

    #[test]
    fn test_invalid_alphabet_definition() {
        let config = CodecConfig::from_toml(
            r#"
[alphabets.broken]
ranges = [{ start = 0xD800, end = 0xD801 }]
"#,
        )
        .unwrap();
        assert_eq!(
            config.alphabet("broken").unwrap_err(),
            AlphabetError::InvalidCodepoint(0xD800)
        );
    }

    #[test]
    fn test_unknown_hash_in_settings() {
        let config = CodecConfig::from_toml("[settings]\nhash = \"rot13\"\n").unwrap();
        assert!(matches!(
            config.settings.hash_algorithm(),
            Err(ConfigError::UnknownHash(_))
        ));
    }

    #[test]
    fn test_alphabet_names_standard_first() {
        let config = CodecConfig::load_default().unwrap();
        let names = config.alphabet_names();
        assert_eq!(names[0], "standard");
        assert!(names.contains(&"ascii"));
    }
}
