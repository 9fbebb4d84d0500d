//! Helpers for reading adapter settings during construction

use crate::domain::ports::AdapterSettings;
use crate::error::ConfigurationError;

/// Reads trimmed values out of an [`AdapterSettings`] map for one adapter kind
pub(crate) struct SettingsReader<'a> {
    adapter: &'static str,
    settings: &'a AdapterSettings,
}

impl<'a> SettingsReader<'a> {
    pub(crate) fn new(adapter: &'static str, settings: &'a AdapterSettings) -> Self {
        Self { adapter, settings }
    }

    /// Non-blank value, or `None`
    pub(crate) fn optional(&self, key: &str) -> Option<String> {
        self.settings
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn required(&self, key: &str) -> Result<String, ConfigurationError> {
        self.optional(key)
            .ok_or_else(|| ConfigurationError::missing(self.adapter, key))
    }

    pub(crate) fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Build a settings map from `(key, value)` pairs, skipping `None` values
pub(crate) fn settings_of<const N: usize>(pairs: [(&str, Option<&str>); N]) -> AdapterSettings {
    pairs
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        let settings = settings_of([("url", Some("  ")), ("home", Some(" /opt/tomcat "))]);
        let reader = SettingsReader::new("tomcat8x", &settings);

        assert_eq!(reader.optional("url"), None);
        assert_eq!(reader.required("home").unwrap(), "/opt/tomcat");
        assert_eq!(
            reader.required("url").unwrap_err(),
            ConfigurationError::missing("tomcat8x", "url")
        );
        assert_eq!(reader.or_default("hostname", "localhost"), "localhost");
    }
}
