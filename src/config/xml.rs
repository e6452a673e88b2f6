//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; nothing is written on the user's behalf.
//!
//! Example:
//! <config>
//!   <session_file>/var/tmp/fm-session.json</session_file>
//!   <log_level>info</log_level>
//!   <log_file>/home/me/.local/share/file_mover/fm.log</log_file>
//! </config>
//!
//! Notes:
//! - Unknown XML fields are a hard error to surface misconfigurations early.
//! - Empty elements are treated as absent.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "session_file")]
    session_file: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config, keeping defaults for anything unset.
fn xml_to_config(parsed: XmlConfig, path: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.session_file.as_deref()) {
        cfg.session_file = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("log_level in '{}'", path.display()))?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Load the config from `explicit` or the default location.
/// Returns defaults when the file does not exist; errors if it exists but is invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return Ok(Config::default()),
    };

    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }

    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_all_fields() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <session_file> /srv/fm.json </session_file>\n  <log_level>debug</log_level>\n  <log_file>/srv/fm.log</log_file>\n</config>\n",
        )
        .unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.session_file, PathBuf::from("/srv/fm.json"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/srv/fm.log")));
    }

    #[test]
    fn empty_elements_keep_defaults() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><session_file></session_file><log_file>  </log_file></config>").unwrap();
        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><download_base>/x</download_base></config>").unwrap();
        assert!(load_config_from_xml_path(&p).is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><log_level>loud</log_level></config>").unwrap();
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("invalid log level"));
    }

    #[test]
    fn explicit_missing_file_means_defaults() {
        let td = tempdir().unwrap();
        let cfg = load_config(Some(&td.path().join("absent.xml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
