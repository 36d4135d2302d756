//! `ft build` command implementation.

use std::path::PathBuf;

use clap::Args;
use ft_config::{CliSettings, Config};
use ft_site::SiteBuilder;
use ft_tabs::TargetFormat;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output format: html or text (overrides config).
    #[arg(short, long)]
    format: Option<TargetFormat>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Highlight color of the selected tab (overrides config).
    #[arg(long, env = "FT_HIGHLIGHT_COLOR")]
    highlight_color: Option<String>,

    /// Log every resolved tab group.
    #[arg(long)]
    debug: bool,

    /// Fail if any tab block was dropped because of an authoring error.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover filter-tabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the build cannot read or
    /// write files, or `--strict` is set and any document had errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");
        let build = &config.build_resolved;
        output.setting("Source", build.source_dir.display());
        output.setting("Output", build.output_dir.display());
        output.setting("Format", build.format);

        let report = SiteBuilder::from_config(&config).build()?;
        output.diagnostics(&report);

        if self.strict && report.error_count() > 0 {
            return Err(CliError::Validation(format!(
                "{} tab block(s) failed to build",
                report.error_count()
            )));
        }

        output.done(&format!(
            "Built {} page(s) with {} tab group(s) to {}",
            report.pages.len(),
            report.groups(),
            build.output_dir.display()
        ));
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            format: self.format,
            highlight_color: self.highlight_color.clone(),
            debug: self.debug.then_some(true),
        }
    }
}
