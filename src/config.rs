use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(about = "Runs the shelfmark favorites service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".shelfmark")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_database")]
    database: String,
    #[serde(default = "default_port")]
    port: i32,
    #[serde(default = "default_cors_origin")]
    cors_origin: String,
    #[serde(default)]
    pub turso_url: Option<String>,
    #[serde(default)]
    pub turso_auth_token: Option<String>,
}

fn default_database() -> String {
    "shelfmark.db".to_string()
}

fn default_port() -> i32 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Default for App {
    fn default() -> Self {
        App {
            database: default_database(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            turso_url: None,
            turso_auth_token: None,
        }
    }
}

impl App {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    pub fn get_port(&self) -> i32 {
        self.port
    }

    pub fn get_cors_origin(&self) -> &str {
        &self.cors_origin
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        let yaml_with_env = Config::substitute_env_vars(&yaml_str);
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    /// Expands `${VAR}` and `${VAR:-default}` references against the process
    /// environment before the YAML is parsed.
    fn substitute_env_vars(yaml_str: &str) -> String {
        let mut out = String::with_capacity(yaml_str.len());
        let mut rest = yaml_str;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match tail.find('}') {
                Some(end) => {
                    let var_name = &tail[2..end];
                    let value = match var_name.split_once(":-") {
                        Some((name, default)) => {
                            env::var(name).unwrap_or_else(|_| default.to_string())
                        }
                        None => env::var(var_name).unwrap_or_else(|_| {
                            tracing::warn!("environment variable '{}' not found", var_name);
                            String::new()
                        }),
                    };
                    out.push_str(&value);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_env_vars_with_defaults() {
        let yaml = "port: ${SHELFMARK_TEST_UNSET_PORT:-9090}";
        assert_eq!("port: 9090", Config::substitute_env_vars(yaml));
    }

    #[test]
    fn leaves_plain_yaml_untouched() {
        let yaml = "app:\n  database: shelfmark.db\n";
        assert_eq!(yaml, Config::substitute_env_vars(yaml));
    }

    #[test]
    fn parses_partial_config_with_defaults() {
        let cfg: Config = serde_yaml::from_str("app:\n  port: 4000\n").unwrap();
        assert_eq!(4000, cfg.app.get_port());
        assert_eq!("shelfmark.db", cfg.app.get_db());
        assert_eq!("http://localhost:3000", cfg.app.get_cors_origin());
    }
}
