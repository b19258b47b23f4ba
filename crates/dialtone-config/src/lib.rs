use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dialtone_core::settings::{resolve_country, validate_digits_to_match};
use dialtone_core::{CompanySettings, DialSettings};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "dialtone";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub company: CompanySettings,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid company_country value: {0}")]
    InvalidCountry(String),
    #[error("invalid digits_to_match_from_end value: {0}")]
    InvalidDigitsToMatch(i64),
    #[error("invalid dial.{field} value: {value:?}")]
    InvalidDialPrefix { field: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    company_country: Option<String>,
    digits_to_match_from_end: Option<i64>,
    dial: Option<DialFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DialFile {
    international_prefix: Option<String>,
    outgoing_prefix: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(code) = parsed.company_country {
        let country = resolve_country(&code).map_err(|_| ConfigError::InvalidCountry(code))?;
        config.company.country = Some(country);
    }

    if let Some(digits) = parsed.digits_to_match_from_end {
        config.company.digits_to_match_from_end = validate_digits_to_match(digits)
            .map_err(|_| ConfigError::InvalidDigitsToMatch(digits))?;
    }

    if let Some(dial) = parsed.dial {
        config.company.dial = DialSettings {
            international_prefix: validate_dial_prefix(
                "international_prefix",
                dial.international_prefix,
            )?,
            outgoing_prefix: validate_dial_prefix("outgoing_prefix", dial.outgoing_prefix)?,
        };
    }

    Ok(config)
}

fn validate_dial_prefix(field: &'static str, value: Option<String>) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '*' | '#'));
    if !valid {
        return Err(ConfigError::InvalidDialPrefix { field, value });
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile, DialFile};
    use dialtone_core::settings::DEFAULT_DIGITS_TO_MATCH_FROM_END;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            company_country: Some("fr".to_string()),
            digits_to_match_from_end: Some(10),
            dial: Some(DialFile {
                international_prefix: Some("00".to_string()),
                outgoing_prefix: Some(" 9 ".to_string()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.company.country.map(|c| c.code), Some("FR"));
        assert_eq!(merged.company.digits_to_match_from_end, 10);
        assert_eq!(
            merged.company.dial.international_prefix.as_deref(),
            Some("00")
        );
        assert_eq!(merged.company.dial.outgoing_prefix.as_deref(), Some("9"));
    }

    #[test]
    fn merge_config_keeps_defaults() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert!(merged.company.country.is_none());
        assert_eq!(
            merged.company.digits_to_match_from_end,
            DEFAULT_DIGITS_TO_MATCH_FROM_END
        );
    }

    #[test]
    fn merge_config_rejects_bad_values() {
        let err = merge_config(ConfigFile {
            company_country: Some("Atlantis".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCountry(_)));

        let err = merge_config(ConfigFile {
            digits_to_match_from_end: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDigitsToMatch(0)));

        let err = merge_config(ConfigFile {
            dial: Some(DialFile {
                international_prefix: Some("zero".to_string()),
                outgoing_prefix: None,
            }),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDialPrefix { .. }));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "company_country = \"CH\"\ndigits_to_match_from_end = 10\n[dial]\noutgoing_prefix = \"0\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.company.country.map(|c| c.code), Some("CH"));
        assert_eq!(config.company.digits_to_match_from_end, 10);
        assert_eq!(config.company.dial.outgoing_prefix.as_deref(), Some("0"));
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "due_soon_days = 3\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "company_country = \"FR\"\n").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
