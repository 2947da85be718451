// SPDX-License-Identifier: GPL-3.0-or-later

//! This module defines the configuration of the application.
//!
//! The configuration is either loaded from a file or used with default
//! values, which are defined in the code. The configuration file syntax is
//! based on the YAML format and the default file name is `makelog.yml`.
//!
//! The configuration file location is searched in the following order:
//! 1. The current working directory
//! 2. The local configuration directory of the user
//! 3. The configuration directory of the user
//!
//! ```yaml
//! compilers: [gcc, clang, cc]
//!
//! toolchain:
//!   compiler: clang
//!   probe: true
//! ```

use directories::BaseDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "makelog.yml";

/// Represents the application configuration.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct Main {
    /// Compiler front-end names recognized in log lines.
    #[serde(default = "default_compilers")]
    pub compilers: Vec<String>,
    #[serde(default)]
    pub toolchain: Toolchain,
}

impl Default for Main {
    fn default() -> Self {
        Self {
            compilers: default_compilers(),
            toolchain: Toolchain::default(),
        }
    }
}

/// Controls the include-path probe that produces the baseline flag.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct Toolchain {
    /// The compiler binary that is asked for its include directory.
    #[serde(default = "default_toolchain_compiler")]
    pub compiler: String,
    /// Disabling the probe skips the subprocess call and the baseline flag.
    #[serde(default = "default_probe")]
    pub probe: bool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: default_toolchain_compiler(),
            probe: default_probe(),
        }
    }
}

fn default_compilers() -> Vec<String> {
    vec![String::from("gcc"), String::from("clang")]
}

fn default_toolchain_compiler() -> String {
    String::from("clang")
}

fn default_probe() -> bool {
    true
}

pub struct Loader {}

impl Loader {
    /// Loads the configuration from the specified file or the default
    /// locations.
    ///
    /// If the configuration file is specified, it will be used. Otherwise
    /// the default locations are searched, and when no file is found the
    /// default configuration is returned.
    pub fn load(filename: &Option<String>) -> Result<Main, ConfigError> {
        if let Some(path) = filename {
            Self::from_file(Path::new(path))
        } else {
            for location in Self::file_locations() {
                debug!("Checking configuration file: {}", location.display());
                if location.exists() {
                    return Self::from_file(location.as_path());
                }
            }
            debug!("Configuration file not found. Using the default configuration.");
            Ok(Main::default())
        }
    }

    fn file_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();

        if let Ok(current) = env::current_dir() {
            locations.push(current);
        }
        if let Some(base_dirs) = BaseDirs::new() {
            locations.push(base_dirs.config_local_dir().to_path_buf());
            locations.push(base_dirs.config_dir().to_path_buf());
        }

        locations.dedup();
        locations.iter().map(|p| p.join(CONFIG_FILE_NAME)).collect()
    }

    /// Loads the configuration from the specified file.
    pub fn from_file(path: &Path) -> Result<Main, ConfigError> {
        info!("Loading configuration file: {}", path.display());

        let reader = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| ConfigError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;

        let content: Main =
            serde_yml::from_reader(reader).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(content)
    }
}

/// Represents all possible configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access configuration file '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration from file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Main::default();
        assert_eq!(config.compilers, vec!["gcc", "clang"]);
        assert_eq!(config.toolchain.compiler, "clang");
        assert!(config.toolchain.probe);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Main = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, Main::default());
    }

    #[test]
    fn test_partial_configuration() {
        let content = "compilers: [gcc, clang, cc]\n";
        let config: Main = serde_yml::from_str(content).unwrap();
        assert_eq!(config.compilers, vec!["gcc", "clang", "cc"]);
        assert_eq!(config.toolchain, Toolchain::default());
    }

    #[test]
    fn test_toolchain_section() {
        let content = "toolchain:\n  compiler: gcc\n  probe: false\n";
        let config: Main = serde_yml::from_str(content).unwrap();
        assert_eq!(config.toolchain.compiler, "gcc");
        assert!(!config.toolchain.probe);
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let result = Loader::from_file(Path::new("/no/such/makelog.yml"));
        assert!(matches!(result, Err(ConfigError::FileAccess { .. })));
    }
}
