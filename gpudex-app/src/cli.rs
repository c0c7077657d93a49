//! Command-line arguments and configuration resolution.

use clap::{ArgAction, Parser};
use gpudex_core::{AppConfig, ConfigResult};
use std::path::PathBuf;

/// Command-line arguments accepted by the `gpudex` binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "gpudex",
    version,
    about = "Search a GPU catalogue and curate named comparison lists"
)]
pub struct CliArgs {
    /// Configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "GPUDEX_CONFIG",
        help = "Configuration file to load (default: platform config directory)"
    )]
    pub config: Option<PathBuf>,

    /// Catalogue file override
    #[arg(
        long,
        value_name = "FILE",
        help = "GPU catalogue JSON file (overrides config and GPUDEX_CATALOG)"
    )]
    pub catalog: Option<PathBuf>,

    /// Lists directory override
    #[arg(
        long = "lists-dir",
        value_name = "DIR",
        help = "Directory holding saved lists (overrides config and GPUDEX_LISTS_DIR)"
    )]
    pub lists_dir: Option<PathBuf>,

    /// Export directory override
    #[arg(
        long = "export-dir",
        value_name = "DIR",
        help = "Directory exports are written to (overrides config and GPUDEX_EXPORT_DIR)"
    )]
    pub export_dir: Option<PathBuf>,

    /// Commands to run instead of the interactive prompt
    #[arg(
        short = 'e',
        long = "execute",
        value_name = "COMMAND",
        action = ArgAction::Append,
        help = "Run a command and exit; repeat to run several in order"
    )]
    pub execute: Vec<String>,
}

impl CliArgs {
    /// Resolve the effective configuration.
    ///
    /// Precedence, lowest first: defaults, config file, environment, flags.
    ///
    /// # Errors
    /// Returns error if an explicit config file is missing, any config file
    /// is malformed, or the result fails validation.
    pub fn load_config(&self) -> ConfigResult<AppConfig> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        let config = self.apply_overrides(config.with_env_overrides());
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = &self.catalog {
            config.catalog.path.clone_from(path);
        }
        if let Some(dir) = &self.lists_dir {
            config.lists.directory.clone_from(dir);
        }
        if let Some(dir) = &self.export_dir {
            config.export.output_dir.clone_from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_execute_is_repeatable() {
        let args = CliArgs::try_parse_from([
            "gpudex",
            "--lists-dir",
            "/tmp/lists",
            "-e",
            "list new Gaming",
            "-e",
            "list all",
        ])
        .expect("parse args");

        assert_eq!(args.lists_dir, Some(PathBuf::from("/tmp/lists")));
        assert_eq!(args.execute, vec!["list new Gaming", "list all"]);
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let mut file_config = AppConfig::default();
        file_config.lists.directory = temp_dir.path().join("from_file");
        file_config.search.result_limit = 10;
        file_config.save_to(&config_path).expect("save config");

        let args = CliArgs {
            config: Some(config_path),
            lists_dir: Some(temp_dir.path().join("from_flag")),
            ..CliArgs::default()
        };

        let config = args.load_config().expect("load config");
        assert_eq!(config.lists.directory, temp_dir.path().join("from_flag"));
        assert_eq!(config.search.result_limit, 10);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let args = CliArgs {
            config: Some(temp_dir.path().join("absent.toml")),
            ..CliArgs::default()
        };
        assert!(args.load_config().is_err());
    }
}
