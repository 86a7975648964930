//! INI file configuration adapter.
//!
//! Sections: [data] for the storage directory, [cache] for memoization,
//! [analysis] for metric parameter overrides. Every key is optional;
//! missing or unparsable values fall back to the caller's default.

use std::path::Path;

use configparser::ini::Ini;

use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[data]
dir = /var/lib/stocklens

[cache]
enabled = true
ttl_secs = 600

[analysis]
rsi_period = 21
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/var/lib/stocklens".to_string())
        );
        assert_eq!(adapter.get_int("cache", "ttl_secs", 300), 600);
        assert_eq!(adapter.get_int("analysis", "rsi_period", 14), 21);
    }

    #[test]
    fn missing_key_returns_none() {
        let adapter = FileConfigAdapter::from_string("[data]\ndir = data\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "dir"), None);
    }

    #[test]
    fn int_falls_back_on_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[cache]\nttl_secs = soon\n").unwrap();
        assert_eq!(adapter.get_int("cache", "ttl_secs", 300), 300);
        assert_eq!(adapter.get_int("cache", "absent", 42), 42);
    }

    #[test]
    fn double_reads_value_and_falls_back() {
        let adapter =
            FileConfigAdapter::from_string("[analysis]\nbollinger_k = 2.5\nbad = x\n").unwrap();
        assert_eq!(adapter.get_double("analysis", "bollinger_k", 2.0), 2.5);
        assert_eq!(adapter.get_double("analysis", "bad", 2.0), 2.0);
        assert_eq!(adapter.get_double("analysis", "absent", 0.02), 0.02);
    }

    #[test]
    fn bool_accepts_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[cache]\na = true\nb = yes\nc = 1\nd = no\n").unwrap();
        assert!(adapter.get_bool("cache", "a", false));
        assert!(adapter.get_bool("cache", "b", false));
        assert!(adapter.get_bool("cache", "c", false));
        assert!(!adapter.get_bool("cache", "d", true));
    }

    #[test]
    fn bool_falls_back_on_missing_or_garbage() {
        let adapter = FileConfigAdapter::from_string("[cache]\nenabled = maybe\n").unwrap();
        assert!(adapter.get_bool("cache", "enabled", true));
        assert!(!adapter.get_bool("cache", "absent", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[data]\ndir = /tmp/bars\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/tmp/bars".to_string())
        );
    }

    #[test]
    fn from_file_errors_on_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/stocklens.ini").is_err());
    }
}
