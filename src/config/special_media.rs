//! Decoding of the `SpecialMedias` section.

use serde_yaml::Value;

use crate::config::loader::ConfigSource;
use crate::config::schema::SpecialMediaConfig;

/// Key of the special media list in the configuration document.
pub const SPECIAL_MEDIAS_KEY: &str = "SpecialMedias";

/// Decode the special media list from `source`.
///
/// Never fails: an absent section or one that does not decode as a list of
/// records yields an empty list. Entries are returned in file order and are
/// not checked with [`SpecialMediaConfig::is_valid`].
pub fn load_special_medias(source: &ConfigSource) -> Vec<SpecialMediaConfig> {
    match source.get_value(SPECIAL_MEDIAS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(node) => decode(node),
    }
}

fn decode(node: &Value) -> Vec<SpecialMediaConfig> {
    match serde_yaml::from_value::<Vec<SpecialMediaConfig>>(node.clone()) {
        Ok(medias) => medias,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed {} section", SPECIAL_MEDIAS_KEY);
            Vec::new()
        }
    }
}
