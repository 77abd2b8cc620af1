//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Read a YAML (default) or TOML document
//! - Normalize keys so lookups are case-insensitive
//! - Coerce scalars of any shape to text or integers at lookup time
//!
//! # Design Decisions
//! - Lookups never fail: absent or mistyped values read as `""` / `0`
//! - Only reading the document can fail; callers decide how to recover

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// File names searched, in order, when no explicit file is given.
pub const DEFAULT_CANDIDATES: &[&str] = &["config.yaml", "config.yml"];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("configuration document must be a mapping, found {0}")]
    InvalidDocument(&'static str),

    #[error("no configuration file found (searched {searched:?})")]
    NoCandidate { searched: Vec<PathBuf> },
}

/// Document format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Toml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// A loaded configuration document with case-insensitive key lookup.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: Option<PathBuf>,
    document: Value,
}

impl ConfigSource {
    /// Load a document from `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;

        let mut source = match SourceFormat::from_path(path) {
            SourceFormat::Yaml => Self::from_yaml_str(&content)?,
            SourceFormat::Toml => Self::from_toml_str(&content)?,
        };
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    /// Load the first candidate that exists.
    ///
    /// A candidate that exists but fails to parse is an error; the search
    /// does not continue past it.
    pub fn discover<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, ConfigError> {
        for candidate in candidates {
            let path: &Path = candidate.as_ref();
            if path.is_file() {
                return Self::from_file(path);
            }
        }

        Err(ConfigError::NoCandidate {
            searched: candidates
                .iter()
                .map(|candidate| candidate.as_ref().to_path_buf())
                .collect(),
        })
    }

    /// Search [`DEFAULT_CANDIDATES`] in the working directory.
    pub fn discover_default() -> Result<Self, ConfigError> {
        Self::discover(DEFAULT_CANDIDATES)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_yaml::from_str(content)?;
        Self::from_document(document)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let document: Value = toml::from_str(content)?;
        Self::from_document(document)
    }

    fn from_document(document: Value) -> Result<Self, ConfigError> {
        let document = match document {
            // An empty file is an empty configuration.
            Value::Null => Value::Mapping(Mapping::new()),
            Value::Mapping(_) => normalize_keys(document),
            other => return Err(ConfigError::InvalidDocument(kind_name(&other))),
        };

        Ok(Self {
            path: None,
            document,
        })
    }

    /// File this source was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw node at a dotted key path (`Emby.url`), matched case-insensitively.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        key.split('.').try_fold(&self.document, |node, segment| {
            node.get(segment.to_lowercase().as_str())
        })
    }

    /// Text at `key`. Numbers and booleans are formatted; absent, null,
    /// list and map values read as `""`.
    pub fn get_string(&self, key: &str) -> String {
        self.get_value(key)
            .and_then(scalar_text)
            .unwrap_or_default()
    }

    /// Integer at `key`. Floats truncate, numeric text parses, booleans read
    /// as 1/0; anything else reads as 0.
    pub fn get_int(&self, key: &str) -> i64 {
        match self.get_value(key).map(untag) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => 0,
        }
    }
}

/// Canonical text of a scalar node. `None` for lists and maps.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match untag(value) {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (key, normalize_keys(value))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize_keys).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = normalize_keys(std::mem::take(&mut tagged.value));
            Value::Tagged(tagged)
        }
        other => other,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
LogLevel: DEBUG
StreamSourceType: link
Emby:
  url: "http://emby.local"
  port: 8920
  apiKey: 0123abc
Server:
  port: "60010"
PlayURLMaxAliveTime: 3600.9
Flags:
  enabled: true
  list: [1, 2]
"#;

    fn sample() -> ConfigSource {
        ConfigSource::from_yaml_str(SAMPLE).expect("sample parses")
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let source = sample();
        assert_eq!(source.get_string("Emby.url"), "http://emby.local");
        assert_eq!(source.get_string("emby.URL"), "http://emby.local");
        assert_eq!(source.get_string("LOGLEVEL"), "DEBUG");
    }

    #[test]
    fn test_get_string_coerces_scalars() {
        let source = sample();
        assert_eq!(source.get_string("Emby.port"), "8920");
        assert_eq!(source.get_string("Flags.enabled"), "true");
        assert_eq!(source.get_string("Flags.list"), "");
        assert_eq!(source.get_string("Emby"), "");
        assert_eq!(source.get_string("Missing.key"), "");
    }

    #[test]
    fn test_get_int_coerces_scalars() {
        let source = sample();
        assert_eq!(source.get_int("Emby.port"), 8920);
        assert_eq!(source.get_int("Server.port"), 60010);
        assert_eq!(source.get_int("PlayURLMaxAliveTime"), 3600);
        assert_eq!(source.get_int("Flags.enabled"), 1);
        assert_eq!(source.get_int("Emby.url"), 0);
        assert_eq!(source.get_int("Missing"), 0);
    }

    #[test]
    fn test_empty_document_is_empty_mapping() {
        let source = ConfigSource::from_yaml_str("").expect("empty YAML parses");
        assert_eq!(source.get_string("LogLevel"), "");
        assert!(source.get_value("LogLevel").is_none());
    }

    #[test]
    fn test_non_mapping_document_is_rejected() {
        let err = ConfigSource::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDocument("a sequence")));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = ConfigSource::from_yaml_str("Emby: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_toml_document() {
        let source = ConfigSource::from_toml_str(
            r#"
StreamSourceType = "link"

[Emby]
url = "http://emby.local"
port = 8920
"#,
        )
        .expect("TOML parses");
        assert_eq!(source.get_string("StreamSourceType"), "link");
        assert_eq!(source.get_int("emby.port"), 8920);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.toml")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("a.TOML")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("a.yml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("config")), SourceFormat::Yaml);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = ConfigSource::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_from_file_records_path() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"LogLevel: WARN\n").unwrap();

        let source = ConfigSource::from_file(file.path()).unwrap();
        assert_eq!(source.path(), Some(file.path()));
        assert_eq!(source.get_string("LogLevel"), "WARN");
    }

    #[test]
    fn test_discover_picks_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("config.yaml");
        let second = dir.path().join("config.yml");
        fs::write(&second, "LogLevel: ERROR\n").unwrap();

        let source = ConfigSource::discover(&[&first, &second]).unwrap();
        assert_eq!(source.path(), Some(second.as_path()));

        fs::remove_file(&second).unwrap();
        let err = ConfigSource::discover(&[&first, &second]).unwrap_err();
        assert!(matches!(err, ConfigError::NoCandidate { searched } if searched.len() == 2));
    }
}
