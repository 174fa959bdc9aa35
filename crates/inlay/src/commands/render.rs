//! `inlay render` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use inlay_config::{CliSettings, Config};
use inlay_rewriter::{BlockRewriter, Document, RenderSummary};

use super::ConfiguredResolver;
use crate::error::CliError;
use crate::output::{Output, write_stdout};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover inlay.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not look up embed ids for itch.io profile links.
    #[arg(long)]
    no_resolve: bool,

    /// Lookup timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// User agent sent with lookups (overrides config).
    #[arg(long, env = "INLAY_USER_AGENT")]
    user_agent: Option<String>,

    /// Render plain CommonMark without tables, strikethrough and task lists.
    #[arg(long)]
    no_gfm: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or
    /// written.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            config = ?config.config_path,
            resolve = config.resolver.enabled,
            gfm = config.render.gfm,
            "Configuration loaded"
        );

        let markdown = std::fs::read_to_string(&self.file)?;
        let resolver = ConfiguredResolver::from_config(&config.resolver);
        match &resolver {
            ConfiguredResolver::Http(http) => output.info(&format!(
                "Embed id lookups: enabled ({}s timeout)",
                http.configured_timeout().as_secs()
            )),
            ConfiguredResolver::Disabled(_) => {
                output.warning("Embed id lookups disabled; itch.io profile links stay as links");
            }
        }

        let mut document = Document::parse(&markdown, config.render.gfm);
        let rewriter = Arc::new(BlockRewriter::new(resolver));
        let summary = document.rewrite_all(&rewriter).await;
        let html = document.into_html();

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.info(&format!("Output: {}", path.display()));
            }
            None => write_stdout(&html)?,
        }

        output.success(&summary_line(&summary));
        Ok(())
    }

    /// Config overrides given on the command line.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            resolver_enabled: self.no_resolve.then_some(false),
            timeout_secs: self.timeout,
            user_agent: self.user_agent.clone(),
            gfm: self.no_gfm.then_some(false),
        }
    }
}

/// One-line description of a render.
fn summary_line(summary: &RenderSummary) -> String {
    let mut line = format!(
        "Embedded {} of {} blocks",
        summary.replaced, summary.blocks
    );
    if summary.paired > 0 {
        line.push_str(&format!(" ({} paired)", summary.paired));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_line() {
        let summary = RenderSummary {
            blocks: 5,
            replaced: 2,
            paired: 0,
        };
        assert_eq!(summary_line(&summary), "Embedded 2 of 5 blocks");
    }

    #[test]
    fn test_summary_line_with_paired() {
        let summary = RenderSummary {
            blocks: 3,
            replaced: 3,
            paired: 1,
        };
        assert_eq!(summary_line(&summary), "Embedded 3 of 3 blocks (1 paired)");
    }

    #[test]
    fn test_cli_settings_from_flags() {
        let args = RenderArgs {
            file: PathBuf::from("note.md"),
            output: None,
            config: None,
            no_resolve: true,
            timeout: Some(3),
            user_agent: Some("notes-bot/2".to_owned()),
            no_gfm: true,
            verbose: false,
        };

        let settings = args.cli_settings();

        assert_eq!(settings.resolver_enabled, Some(false));
        assert_eq!(settings.timeout_secs, Some(3));
        assert_eq!(settings.user_agent.as_deref(), Some("notes-bot/2"));
        assert_eq!(settings.gfm, Some(false));
    }

    #[tokio::test]
    async fn test_execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.md");
        let config = dir.path().join("inlay.toml");
        let out = dir.path().join("note.html");
        std::fs::write(&input, "# Tracks\n\nhttps://youtu.be/XYZ987\n").unwrap();
        std::fs::write(&config, "[resolver]\nenabled = false\n").unwrap();

        let args = RenderArgs {
            file: input,
            output: Some(out.clone()),
            config: Some(config),
            no_resolve: false,
            timeout: None,
            user_agent: None,
            no_gfm: false,
            verbose: false,
        };
        args.execute().await.unwrap();

        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.starts_with("<h1>Tracks</h1>\n"));
        assert!(html.contains(r#"src="https://www.youtube.com/embed/XYZ987""#));
        assert!(!html.contains("<p>"));
    }

    #[tokio::test]
    async fn test_execute_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("inlay.toml");
        std::fs::write(&config, "").unwrap();

        let args = RenderArgs {
            file: dir.path().join("missing.md"),
            output: None,
            config: Some(config),
            no_resolve: true,
            timeout: None,
            user_agent: None,
            no_gfm: false,
            verbose: false,
        };
        let err = args.execute().await.unwrap_err();

        assert!(matches!(err, CliError::Io(_)));
    }
}
