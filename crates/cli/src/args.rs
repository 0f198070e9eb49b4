use std::path::PathBuf;

use clap::Parser;

use repo_owners_core::{Config, RunOptions};

/// Environment variable holding the GitHub access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Dotfile looked up in the home directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".find_repo_owner.toml";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "find_repo_owner",
    about = "Gather the owners based on CODEOWNERS on github",
    long_about = "A tool to get the owners for all repos in the organization in github\n\n\
                  Example:\n  find_repo_owner -o eRaMvn\n  \
                  find_repo_owner -o eRaMvn -f owners_to_watch.txt --of result",
    version
)]
pub struct Args {
    #[arg(short = 'o', long, value_name = "ORG", help = "Specify the owner for the organization")]
    pub owner: String,

    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        help = "Specify the list of owners of interest"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        long = "of",
        value_name = "NAME",
        help = "Specify the name of the output file. Default is 'results_from_repos'"
    )]
    pub output_file: Option<String>,

    #[arg(long, value_name = "FILE", help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N",
        help = "Maximum repositories looked up at the same time",
        value_parser = clap::value_parser!(usize)
    )]
    pub concurrency: Option<usize>,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(name) = self.output_file.as_deref().filter(|n| !n.is_empty()) {
            config.output.base_name = name.to_string();
        }
        if let Some(n) = self.concurrency {
            config.collector.max_concurrent = n;
        }
    }

    pub fn run_options(&self) -> RunOptions {
        let options = RunOptions::new(self.owner.clone());
        match &self.file {
            Some(path) => options.with_known_owners_file(path),
            None => options,
        }
    }
}

/// Default config location: `$HOME/.find_repo_owner.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_FILE))
}
