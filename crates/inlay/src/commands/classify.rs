//! `inlay classify` command implementation.

use std::path::PathBuf;

use clap::Args;
use inlay_config::{CliSettings, Config};
use inlay_rewriter::BlockRewriter;
use inlay_rules::{MatchResult, classify, classify_paired};

use super::ConfiguredResolver;
use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the classify command.
#[derive(Args)]
pub(crate) struct ClassifyArgs {
    /// Link or two-line block to classify.
    text: String,

    /// Path to configuration file (default: auto-discover inlay.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Look up embed ids for itch.io profile links.
    #[arg(long)]
    resolve: bool,

    /// User agent sent with lookups (overrides config).
    #[arg(long, env = "INLAY_USER_AGENT")]
    user_agent: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ClassifyArgs {
    /// Execute the classify command.
    ///
    /// Match details go to stderr and the widget HTML to stdout.
    ///
    /// # Errors
    ///
    /// Returns `CliError::NoMatch` if no rule matches the text.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = self.text.trim();
        let matches = matches_for(text);
        if matches.is_empty() {
            return Err(CliError::NoMatch(self.text));
        }
        for found in &matches {
            output.highlight(&format!("kind: {}", found.kind));
            for (name, value) in &found.fields {
                output.info(&format!("  {name}: {value}"));
            }
        }

        let rewriter = BlockRewriter::new(ConfiguredResolver::from_config(&config.resolver));
        match rewriter.widget_for(text).await {
            Some(element) => write_stdout(&element.to_html())?,
            None if rewriter.resolver().is_enabled() => {
                output.warning("No widget: embed id lookup failed");
            }
            None => output.warning("No widget: pass --resolve to look up the embed id"),
        }
        Ok(())
    }

    /// Config overrides given on the command line.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            resolver_enabled: (!self.resolve).then_some(false),
            user_agent: self.user_agent.clone(),
            ..CliSettings::default()
        }
    }
}

/// Matches for `text`: both lines of a paired block, or the single-link match.
fn matches_for(text: &str) -> Vec<MatchResult> {
    match classify_paired(text) {
        Some((first, second)) => vec![first, second],
        None => classify(text).into_iter().collect(),
    }
}
