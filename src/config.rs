//! Process configuration: one explicit struct built at startup and handed
//! to constructors, no module-level globals.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Directory uploaded bytes are written to; its final component is also
    /// the public URL prefix the files are served under.
    pub upload_dir: PathBuf,
    /// The flat JSON-array metadata file.
    pub db_file: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            upload_dir: PathBuf::from("uploads"),
            db_file: PathBuf::from("database.json"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    /// Read overrides from the environment; anything unset keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("VIDEO_WALL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            upload_dir: env::var("VIDEO_WALL_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            db_file: env::var("VIDEO_WALL_DB_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_file),
            static_dir: env::var("VIDEO_WALL_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}
