use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::prompt::DEFAULT_SUFFIX;
use crate::tokenizer::{Overflow, TokenLimit};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt_suffix: String,
    pub exit_message: String,
    /// Environment variable holding the search path.
    pub path_var: String,
    pub token_limit: TokenLimit,
    pub verify_absolute: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt_suffix: DEFAULT_SUFFIX.to_string(),
            exit_message: "exit".to_string(),
            path_var: "PATH".to_string(),
            token_limit: TokenLimit::default(),
            verify_absolute: false,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::load_from_str(&src)
    }

    /// `key=value` lines; blank lines and `#` comments are ignored. Values are
    /// taken verbatim after the first `=` so a suffix may keep its trailing space.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(parse_error(lineno, format!("No '=' found: {}", line)));
            };

            match key.trim() {
                "prompt_suffix" => config.prompt_suffix = value.to_string(),
                "exit_message" => config.exit_message = value.to_string(),
                "path_var" => {
                    let value = value.trim();
                    if value.is_empty() {
                        return Err(parse_error(lineno, "path_var is empty".to_string()));
                    }
                    config.path_var = value.to_string();
                }
                "max_args" => match value.trim().parse::<usize>() {
                    Ok(n) => config.token_limit.max = n,
                    Err(_) => return Err(parse_error(lineno, format!("Invalid usize: {}", line))),
                },
                "overflow" => {
                    config.token_limit.overflow = match value.trim() {
                        "drop" => Overflow::Drop,
                        "error" => Overflow::Error,
                        other => {
                            let msg = format!("Invalid overflow policy: {}", other);
                            return Err(parse_error(lineno, msg));
                        }
                    };
                }
                "verify_absolute" => {
                    config.verify_absolute = match value.trim() {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(parse_error(lineno, format!("Invalid bool: {}", other)));
                        }
                    };
                }
                other => return Err(parse_error(lineno, format!("Unknown key: {}", other))),
            }
        }

        Ok(config)
    }
}

fn parse_error(lineno: usize, msg: String) -> ConfigError {
    ConfigError::Parse(format!("Line {}: {}", lineno, msg))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
