//! CLI route: single route table and run context. Dispatches to the integrity API and presentation.

use crate::api::{CheckOutcome, IntegrityMonitor, IntegrityState};
use crate::cli::output::{EXIT_CHANGES, EXIT_OK};
use crate::cli::parse::{Cli, Commands, OutputFormat};
use crate::cli::presentation::{
    format_check_json, format_check_text, format_diff_text, format_init_summary,
    format_resolution_note, format_scan_json, format_scan_text,
};
use crate::config::{ConfigLoader, FileguardConfig, IntegrityConfig};
use crate::error::ApiError;
use crate::reconcile::DiffResult;
use dialoguer::console::Term;
use std::io::IsTerminal;
use tracing::info;

/// What the binary prints and how it exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

/// How `check` decides about promoting detected changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdatePolicy {
    Accept,
    Decline,
    Ask,
}

/// Answer from an update prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptReply {
    /// The report was shown and the changes were accepted
    Accept,
    /// The report was shown and the changes were declined
    Decline,
    /// Nobody is there to answer; the report was not shown
    Unattended,
}

/// Asks whether detected changes become the new baseline
pub trait ChangePrompt {
    /// Show `report` and ask about the changes in `diff`.
    fn ask(&self, report: &str, diff: &DiffResult) -> Result<PromptReply, ApiError>;
}

/// Prompt on the controlling terminal; unattended when stdin is not a TTY
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl ChangePrompt for TerminalPrompt {
    fn ask(&self, report: &str, diff: &DiffResult) -> Result<PromptReply, ApiError> {
        if !std::io::stdin().is_terminal() {
            info!("stdin is not a terminal, leaving baseline unchanged");
            return Ok(PromptReply::Unattended);
        }
        let prompt_failed = |e: std::io::Error| ApiError::PromptFailed(e.to_string());
        let term = Term::stdout();
        term.write_line(report).map_err(prompt_failed)?;
        term.write_line("").map_err(prompt_failed)?;

        let accepted = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Accept {} change(s) as the new baseline?",
                diff.change_count()
            ))
            .default(false)
            .interact()
            .map_err(|e| ApiError::PromptFailed(e.to_string()))?;
        Ok(if accepted {
            PromptReply::Accept
        } else {
            PromptReply::Decline
        })
    }
}

/// Runtime context for CLI execution: resolved configuration and the monitor.
pub struct RunContext {
    monitor: IntegrityMonitor,
    color: bool,
    prompt: Box<dyn ChangePrompt>,
}

impl RunContext {
    /// Build the context from parsed CLI arguments, loading configuration
    /// and applying CLI overrides on top.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let config = load_config(cli)?;
        let integrity = apply_overrides(config.integrity, cli).resolve(&cli.workspace);
        integrity.validate().map_err(ApiError::ConfigError)?;

        info!(
            target = %integrity.target_dir.display(),
            baseline = %integrity.baseline_path.display(),
            algorithm = %integrity.algorithm,
            "Run context initialized"
        );

        Ok(Self::from_config(integrity, std::io::stdout().is_terminal()))
    }

    /// Build a context from an already resolved configuration.
    pub fn from_config(config: IntegrityConfig, color: bool) -> Self {
        Self {
            monitor: IntegrityMonitor::new(config),
            color,
            prompt: Box::new(TerminalPrompt),
        }
    }

    /// Replace the prompt used when `check` has to ask about changes.
    pub fn with_prompt(mut self, prompt: impl ChangePrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn monitor(&self) -> &IntegrityMonitor {
        &self.monitor
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Init { force } => self.handle_init(*force),
            Commands::Check {
                update,
                no_update,
                format,
            } => {
                let policy = if *update {
                    UpdatePolicy::Accept
                } else if *no_update || *format == OutputFormat::Json {
                    UpdatePolicy::Decline
                } else {
                    UpdatePolicy::Ask
                };
                self.handle_check(policy, *format)
            }
            Commands::Scan { format } => {
                let report = self.monitor.scan_current();
                let text = match format {
                    OutputFormat::Text => format_scan_text(&report),
                    OutputFormat::Json => format_scan_json(&report)?,
                };
                Ok(CommandOutput {
                    text,
                    exit_code: EXIT_OK,
                })
            }
        }
    }

    fn handle_init(&self, force: bool) -> Result<CommandOutput, ApiError> {
        let config = self.monitor.config();
        if !force && self.monitor.baseline_state().is_usable() {
            return Err(ApiError::BaselineExists(config.baseline_path.clone()));
        }

        let created_target = self.monitor.bootstrap()?;
        let snapshot = self.monitor.establish_baseline()?;
        Ok(CommandOutput {
            text: format_init_summary(
                &snapshot,
                &config.target_dir,
                &config.baseline_path,
                created_target,
                force,
            ),
            exit_code: EXIT_OK,
        })
    }

    fn handle_check(
        &self,
        policy: UpdatePolicy,
        format: OutputFormat,
    ) -> Result<CommandOutput, ApiError> {
        let config = self.monitor.config();
        let mut report_shown = false;

        let resolution = self.monitor.check_and_resolve(|diff| match policy {
            UpdatePolicy::Accept => Ok(true),
            UpdatePolicy::Decline => Ok(false),
            UpdatePolicy::Ask => {
                let report = format_diff_text(diff, &config.target_dir, self.color);
                let reply = self.prompt.ask(&report, diff)?;
                report_shown = reply != PromptReply::Unattended;
                Ok(reply == PromptReply::Accept)
            }
        })?;

        let state = resolution.outcome.state();
        let exit_code = if state == IntegrityState::ChangesDetected {
            EXIT_CHANGES
        } else {
            EXIT_OK
        };

        let text = match format {
            OutputFormat::Json => {
                format_check_json(&resolution.outcome, resolution.baseline_updated)?
            }
            OutputFormat::Text => {
                let mut parts = Vec::new();
                if !report_shown {
                    parts.push(format_check_text(
                        &resolution.outcome,
                        &config.target_dir,
                        self.color,
                    ));
                }
                if let CheckOutcome::Compared { diff, .. } = &resolution.outcome {
                    if diff.has_changes() {
                        parts.push(format_resolution_note(
                            resolution.baseline_updated,
                            &config.baseline_path,
                        ));
                    }
                }
                parts.join("\n")
            }
        };

        Ok(CommandOutput { text, exit_code })
    }
}

fn load_config(cli: &Cli) -> Result<FileguardConfig, ApiError> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.workspace),
    }
}

/// CLI flags override whatever the configuration sources produced.
pub(crate) fn apply_overrides(mut config: IntegrityConfig, cli: &Cli) -> IntegrityConfig {
    if let Some(target) = &cli.target {
        config.target_dir = target.clone();
    }
    if let Some(baseline) = &cli.baseline {
        config.baseline_path = baseline.clone();
    }
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if cli.follow_symlinks {
        config.follow_symlinks = true;
    }
    if cli.parallel {
        config.parallel = true;
    }
    config
}
