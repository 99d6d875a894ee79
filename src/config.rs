//! Startup configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) yields the stock
//! 800x600 "gltest" window reading `vs.glsl` and `fs.glsl` from the working directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name looked up in the working directory when no path is passed on the command line.
pub const LOCAL_CONFIG_FILE: &str = "spincube.json";

/// Environment variable that overrides [`Config::log_level`].
pub const LOG_ENV_VAR: &str = "SPINCUBE_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    /// Requested `[major, minor]` core-profile context version.
    pub gl_version: [u8; 2],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: [f32; 4],
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`. `warn`, `error` and `off`
    /// drop the driver banner from stderr.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "gltest".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
            gl_version: [3, 0],
            vertex_shader: PathBuf::from("vs.glsl"),
            fragment_shader: PathBuf::from("fs.glsl"),
            clear_color: [0.25, 0.25, 0.25, 1.0],
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Resolves the configuration for this run.
    ///
    /// An explicit path must load. Otherwise the first existing file among the candidates is
    /// used, and the defaults when there is none.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::resolve_from(explicit, &Self::candidates())
    }

    fn resolve_from(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_owned())));
        }

        for candidate in candidates {
            if candidate.is_file() {
                return Ok((Self::load(candidate)?, Some(candidate.clone())));
            }
        }

        Ok((Self::default(), None))
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("spincube").join("config.json"));
        }
        paths
    }

    /// The log level to use, with [`LOG_ENV_VAR`] taking precedence over the file.
    ///
    /// Every diagnostic goes through the logger. The driver banner is logged at `info`, so
    /// `warn` hides it, and `off` also hides shader and OpenGL errors.
    pub fn effective_log_level(&self) -> String {
        std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| self.log_level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let config = Config::default();
        assert_eq!(config.title, "gltest");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gl_version, [3, 0]);
        assert_eq!(config.vertex_shader, PathBuf::from("vs.glsl"));
        assert_eq!(config.fragment_shader, PathBuf::from("fs.glsl"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "width": 1024, "title": "cube" }"#).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.title, "cube");
        assert_eq!(config.clear_color, [0.25, 0.25, 0.25, 1.0]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Config::from_json(r#"{ "widht": 1024 }"#).is_err());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.json");
        std::fs::write(&path, r#"{ "vertex_shader": "shaders/vs.glsl" }"#).unwrap();

        let (config, used) = Config::resolve(Some(path.as_path())).unwrap();
        assert_eq!(config.vertex_shader, PathBuf::from("shaders/vs.glsl"));
        assert_eq!(used.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let local = dir.path().join("spincube.json");
        let user = dir.path().join("config.json");
        std::fs::write(&local, r#"{ "title": "local" }"#).unwrap();
        std::fs::write(&user, r#"{ "title": "user" }"#).unwrap();

        let candidates = [missing, local.clone(), user.clone()];
        let (config, used) = Config::resolve_from(None, &candidates).unwrap();
        assert_eq!(config.title, "local");
        assert_eq!(used, Some(local));

        let (config, used) = Config::resolve_from(None, &candidates[2..]).unwrap();
        assert_eq!(config.title, "user");
        assert_eq!(used, Some(user));
    }

    #[test]
    fn test_no_candidate_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = [dir.path().join("a.json"), dir.path().join("b.json")];

        let (config, used) = Config::resolve_from(None, &candidates).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(used, None);
    }

    #[test]
    fn test_explicit_path_beats_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.json");
        let local = dir.path().join("spincube.json");
        std::fs::write(&explicit, r#"{ "width": 320 }"#).unwrap();
        std::fs::write(&local, r#"{ "width": 640 }"#).unwrap();

        let (config, _) = Config::resolve_from(Some(explicit.as_path()), &[local]).unwrap();
        assert_eq!(config.width, 320);
    }

    #[test]
    fn test_default_level_shows_driver_banner() {
        let (level, recognised) = crate::logging::parse_level(&Config::default().log_level);
        assert!(recognised);
        assert!(level >= log::LevelFilter::Info);
    }

    #[test]
    fn test_resolve_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
