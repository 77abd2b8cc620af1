//! Configuration schema definitions.
//!
//! `Config` is the fully resolved configuration of the frontend. Fields
//! serialize under their long-standing setting names (`EmbyURL`,
//! `PlayURLMaxAliveTime`, ...).

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::loader::scalar_text;
use crate::config::value::StreamSourceType;
use crate::util::build_full_url;

/// Log level used when neither the caller nor a file provides one.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Key material used when no configuration file is loadable.
pub const DEFAULT_ENCIPHER: &str = "vPQC5LWCN2CW2opz";

/// Default Emby server address.
pub const DEFAULT_EMBY_URL: &str = "http://127.0.0.1";

/// Default Emby server port.
pub const DEFAULT_EMBY_PORT: i64 = 8096;

/// Default lifetime of a play URL, in seconds (6 hours).
pub const DEFAULT_PLAY_URL_MAX_ALIVE_TIME: i64 = 6 * 60 * 60;

/// Default listening port of the frontend.
pub const DEFAULT_SERVER_PORT: i64 = 60002;

const REDACTED: &str = "********";

/// Root configuration for the streaming frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Log level (e.g. INFO, DEBUG, ERROR). Free-form.
    #[serde(rename = "LogLevel")]
    pub log_level: String,

    /// Key used for encryption and obfuscation.
    #[serde(rename = "Encipher")]
    pub encipher: String,

    /// Where playback is served from.
    #[serde(rename = "StreamSourceType")]
    pub stream_source_type: StreamSourceType,

    #[serde(rename = "EmbyURL")]
    pub emby_url: String,

    #[serde(rename = "EmbyPort")]
    pub emby_port: i64,

    #[serde(rename = "EmbyAPIKey")]
    pub emby_api_key: String,

    /// Base path the frontend's symlinks live under.
    #[serde(rename = "FrontendSymlinkBasePath")]
    pub frontend_symlink_base_path: String,

    /// Backend streaming server URL.
    #[serde(rename = "BackendURL")]
    pub backend_url: String,

    /// Storage base path on the backend streaming server.
    #[serde(rename = "BackendStorageBasePath")]
    pub backend_storage_base_path: String,

    /// Maximum lifetime of a play URL, in seconds.
    #[serde(rename = "PlayURLMaxAliveTime")]
    pub play_url_max_alive_time: i64,

    #[serde(rename = "ServerPort")]
    pub server_port: i64,

    /// Curated per-item overrides, in file order.
    #[serde(rename = "SpecialMedias")]
    pub special_medias: Vec<SpecialMediaConfig>,
}

impl Config {
    /// The built-in default set, with the log level taken from `log_level`
    /// when it is non-empty.
    pub fn defaults(log_level: Option<&str>) -> Self {
        Self {
            log_level: log_level
                .filter(|level| !level.is_empty())
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
            encipher: DEFAULT_ENCIPHER.to_string(),
            stream_source_type: StreamSourceType::Backend,
            emby_url: DEFAULT_EMBY_URL.to_string(),
            emby_port: DEFAULT_EMBY_PORT,
            emby_api_key: String::new(),
            frontend_symlink_base_path: String::new(),
            backend_url: String::new(),
            backend_storage_base_path: String::new(),
            play_url_max_alive_time: DEFAULT_PLAY_URL_MAX_ALIVE_TIME,
            server_port: DEFAULT_SERVER_PORT,
            special_medias: Vec::new(),
        }
    }

    /// Emby URL with the configured port appended.
    pub fn full_emby_url(&self) -> String {
        build_full_url(&self.emby_url, self.emby_port)
    }

    /// Backend URL as configured. Never carries a port.
    pub fn full_backend_url(&self) -> String {
        build_full_url(&self.backend_url, 0)
    }

    /// First special media entry whose `Key` equals `key`.
    pub fn find_special_media(&self, key: &str) -> Option<&SpecialMediaConfig> {
        self.special_medias.iter().find(|media| media.key == key)
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mask = |secret: &str| {
            if secret.is_empty() {
                String::new()
            } else {
                REDACTED.to_string()
            }
        };

        Self {
            encipher: mask(&self.encipher),
            emby_api_key: mask(&self.emby_api_key),
            ..self.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults(None)
    }
}

/// A manually curated override mapping a media item to a specific source.
///
/// Decoding is weakly typed: numbers and booleans become their text, absent
/// fields become empty strings. Field names are matched against the
/// lowercased keys produced by [`ConfigSource`](crate::config::loader::ConfigSource).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialMediaConfig {
    /// Unique key for the special media.
    #[serde(
        rename(serialize = "Key", deserialize = "key"),
        deserialize_with = "weak_string"
    )]
    pub key: String,

    /// Description of the special media.
    #[serde(
        rename(serialize = "Name", deserialize = "name"),
        deserialize_with = "weak_string"
    )]
    pub name: String,

    /// Path to the media file.
    #[serde(
        rename(serialize = "MediaPath", deserialize = "mediapath"),
        deserialize_with = "weak_string"
    )]
    pub media_path: String,

    #[serde(
        rename(serialize = "ItemId", deserialize = "itemid"),
        deserialize_with = "weak_string"
    )]
    pub item_id: String,

    #[serde(
        rename(serialize = "MediaSourceID", deserialize = "mediasourceid"),
        deserialize_with = "weak_string"
    )]
    pub media_source_id: String,
}

impl SpecialMediaConfig {
    /// True iff every field is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty()
            && !self.name.is_empty()
            && !self.media_path.is_empty()
            && !self.item_id.is_empty()
            && !self.media_source_id.is_empty()
    }
}

fn weak_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| serde::de::Error::custom("expected a scalar value"))
}
