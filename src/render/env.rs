/// Environment snapshot used as the template context.
use std::collections::BTreeMap;

use serde::Serialize;

/// Immutable name → value view of the process environment.
///
/// Serializes as a flat map, so every variable is reachable from templates
/// as `{{ NAME }}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvData(BTreeMap<String, String>);

#[allow(clippy::len_without_is_empty)]
impl EnvData {
    /// Value of `name`, if set.
    #[cfg(test)]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Later pairs replace earlier ones with the same name.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Snapshot every environment variable visible to the process.
///
/// Non-Unicode names or values are converted lossily.
#[must_use]
pub fn load_env() -> EnvData {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}
