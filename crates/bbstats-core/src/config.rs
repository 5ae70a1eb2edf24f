// Configuration loading and parsing (bbstats.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up under `config/` (and copied from `defaults/`).
pub const CONFIG_FILE: &str = "bbstats.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// bbstats.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file; stderr when absent.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

fn default_log_filter() -> String {
    "bbstats=info,warn".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// CSV (`playerId,playerName`) upserted into the member table at startup.
    #[serde(default)]
    pub seed_csv: Option<String>,
}

impl Config {
    /// Socket address string the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/bbstats.toml` relative to
/// `base_dir`.
///
/// This is the lower-level primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Seed `config/bbstats.toml` from `defaults/` when it does not exist yet.
/// Returns the path written, or `None` when a config was already present.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let copy_error = |message: String| ConfigError::DefaultsCopyError { message };
    let content = std::fs::read(&source).map_err(|e| {
        copy_error(format!(
            "no config/{CONFIG_FILE} and cannot read {}: {e}",
            source.display()
        ))
    })?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| copy_error(format!("failed to create {}: {e}", dir.display())))?;
    }

    // Never overwrite a config that appeared after the check above.
    match std::fs::OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &content)
                .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(copy_error(format!("failed to create {}: {e}", target.display()))),
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds `config/bbstats.toml` from `defaults/` before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.host.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.host".into(),
            message: "must not be empty".into(),
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.database.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config
        .roster
        .seed_csv
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "roster.seed_csv".into(),
            message: "must be a path when set".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root holding the shipped `defaults/` directory.
    fn project_root() -> PathBuf {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let root = manifest.join("../..");
        assert!(
            root.join("defaults").join(CONFIG_FILE).exists(),
            "cannot locate defaults/{CONFIG_FILE} from {:?}",
            manifest
        );
        root
    }

    /// Fresh scratch directory with an empty `config/`.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("bbstats_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_config(dir: &Path, body: &str) {
        fs::write(dir.join("config").join(CONFIG_FILE), body).unwrap();
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE)).unwrap()
    }

    #[test]
    fn load_shipped_defaults() {
        let tmp = scratch("shipped_defaults");
        write_config(&tmp, &default_text());

        let config = load_config_from(&tmp).expect("shipped defaults should load");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 52002);
        assert_eq!(config.database.path, "bbstats.db");
        assert_eq!(config.logging.filter, "bbstats=info,warn");
        assert!(config.logging.file.is_none());
        assert!(config.roster.seed_csv.is_none());
        assert_eq!(config.bind_addr(), "127.0.0.1:52002");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_default() {
        let tmp = scratch("optional_sections");
        write_config(
            &tmp,
            r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
path = ":memory:"
"#,
        );

        let config = load_config_from(&tmp).expect("minimal config should load");
        assert_eq!(config.logging.filter, "bbstats=info,warn");
        assert!(config.roster.seed_csv.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn roster_and_log_file_are_read() {
        let tmp = scratch("roster_and_log");
        write_config(
            &tmp,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
path = "x.db"

[logging]
filter = "debug"
file = "logs/bbstats.log"

[roster]
seed_csv = "data/members.csv"
"#,
        );

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("logs/bbstats.log"));
        assert_eq!(config.roster.seed_csv.as_deref(), Some("data/members.csv"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_port_zero() {
        let tmp = scratch("port_zero");
        write_config(&tmp, &default_text().replace("port = 52002", "port = 0"));

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_database_path() {
        let tmp = scratch("empty_db_path");
        write_config(
            &tmp,
            &default_text().replace("path = \"bbstats.db\"", "path = \"  \""),
        );

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "database.path"),
            other => panic!("expected ValidationError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = scratch("missing_config");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch("invalid_toml");
        write_config(&tmp, "this is not valid [[[ toml");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    /// Scratch directory holding only `defaults/bbstats.toml`.
    fn with_defaults(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("bbstats_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), default_text()).unwrap();
        tmp
    }

    #[test]
    fn ensure_config_file_copies_default() {
        let tmp = with_defaults("ensure_copies");
        fs::write(tmp.join("defaults/members.csv.example"), "playerId,playerName\n").unwrap();

        let copied = ensure_config_file(&tmp).expect("should succeed");
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE)));
        assert!(!tmp.join("config/members.csv.example").exists());
        assert!(load_config_from(&tmp).is_ok());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = with_defaults("ensure_keeps");
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE), "# custom\n").unwrap();

        assert_eq!(ensure_config_file(&tmp).expect("should succeed"), None);
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_defaults() {
        let tmp = std::env::temp_dir().join(format!("bbstats_no_defaults_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_file(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no config/bbstats.toml"), "{message}");
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }
        assert!(!tmp.join("config").exists());

        let _ = fs::remove_dir_all(&tmp);
    }
}
