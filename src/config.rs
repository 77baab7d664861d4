//! Run configuration: CLI flags, then environment (`.env` included), then defaults.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::domain::RunConfig;

pub const DEFAULT_INPUT_DIR: &str = "./useful data/1 tagged data/";
pub const DEFAULT_OUTPUT_DIR: &str = "./useful data/2 processed data/";

pub const ENV_INPUT_DIR: &str = "ROUGHEN_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "ROUGHEN_OUTPUT_DIR";

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Resolve a run configuration. `env` looks up a variable; empty values count as unset.
pub fn run_config_from_args(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> RunConfig {
    RunConfig {
        input_dir: resolve_dir(cli.input_dir.clone(), env(ENV_INPUT_DIR), DEFAULT_INPUT_DIR),
        output_dir: resolve_dir(cli.output_dir.clone(), env(ENV_OUTPUT_DIR), DEFAULT_OUTPUT_DIR),
        fail_fast: cli.fail_fast,
        dry_run: cli.dry_run,
        manifest: cli.manifest.clone(),
    }
}

fn resolve_dir(flag: Option<PathBuf>, env_value: Option<String>, default: &str) -> PathBuf {
    flag.or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = run_config_from_args(&Cli::parse_from(["roughen"]), no_env);
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(!config.fail_fast);
        assert_eq!(config.manifest, None);
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = |key: &str| match key {
            ENV_INPUT_DIR => Some("/data/in".to_string()),
            ENV_OUTPUT_DIR => Some("  ".to_string()),
            _ => None,
        };
        let config = run_config_from_args(&Cli::parse_from(["roughen"]), env);
        assert_eq!(config.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));

        let cli = Cli::parse_from(["roughen", "--input-dir", "local"]);
        let config = run_config_from_args(&cli, env);
        assert_eq!(config.input_dir, PathBuf::from("local"));
    }
}
