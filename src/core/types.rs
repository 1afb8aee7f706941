//! Common types used across vigil modules.

use std::collections::HashMap;

/// Arbitrary options attached to plugins, groups and collaborators.
pub type OptionsMap = HashMap<String, serde_json::Value>;

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

/// Read a boolean value out of an options map.
pub fn bool_option(options: &OptionsMap, key: &str) -> Option<bool> {
    options.get(key).and_then(serde_json::Value::as_bool)
}

/// Read a string value out of an options map.
pub fn string_option(options: &OptionsMap, key: &str) -> Option<String> {
    options
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_option() {
        let mut options = OptionsMap::new();
        options.insert("halt_on_failure".to_string(), serde_json::json!(true));
        options.insert("group".to_string(), serde_json::json!("backend"));

        assert_eq!(bool_option(&options, "halt_on_failure"), Some(true));
        assert_eq!(bool_option(&options, "group"), None);
        assert_eq!(bool_option(&options, "missing"), None);
    }

    #[test]
    fn test_string_option() {
        let mut options = OptionsMap::new();
        options.insert("group".to_string(), serde_json::json!("backend"));

        assert_eq!(string_option(&options, "group"), Some("backend".to_string()));
        assert_eq!(string_option(&options, "missing"), None);
    }
}
