use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::buffer::SourceBuffer;
use crate::excise::Policy;
use crate::parse::ClassScanner;
use crate::pipeline::{Config, process_source, report_outcome};
use crate::run_report::RewriteRunReport;
use crate::ui::Ui;

const EXIT_ERROR: i32 = 1;

/// Top-level CLI arguments for the `deco-strip` binary.
#[derive(Debug, Parser)]
#[command(
    name = "deco-strip",
    version,
    about = "Strip decorator-marked method bodies from class-based sources"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands supported by `deco-strip`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report matched decorators without rewriting anything.
    Inspect {
        /// Source files to inspect.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Substring identifying decorators of interest.
        #[arg(long, default_value = "remote")]
        marker: String,
    },

    /// Strip the bodies of matched methods and emit the rewritten text.
    ///
    /// Without a placement flag the rewritten text goes to stdout and
    /// diagnostics to stderr.
    Rewrite {
        /// Source files to rewrite.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Substring identifying decorators of interest.
        #[arg(long, default_value = "remote")]
        marker: String,

        /// Overwrite the input files with the rewritten text.
        #[arg(long)]
        in_place: bool,

        /// Write rewritten files (by file name) into this directory.
        #[arg(long, conflicts_with = "in_place")]
        out_dir: Option<PathBuf>,

        /// Emit a machine-readable JSON report to stdout
        /// (suppresses rewritten text on stdout).
        #[arg(long)]
        json: bool,
    },
}

/// Parse CLI arguments and dispatch the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { files, marker } => {
            let mut ui = Ui::new(false);
            ui.title("deco-strip: inspect");
            ui.line(format!("marker: {marker}"));

            let config = Config {
                marker: marker.clone(),
                policy: Policy::Inspect,
            };
            let mut report = RewriteRunReport::new(marker);

            for file in &files {
                match fs::read_to_string(file) {
                    Ok(text) => {
                        let buffer = SourceBuffer::new(text);
                        let outcome = process_source(file, &buffer, &config, &ClassScanner);
                        report_outcome(&buffer, &outcome, &mut ui);
                        report.push(&outcome);
                    }
                    Err(e) => {
                        ui.file_error(format!("failed to read {}: {e}", file.display()));
                        report.push_read_failure(file.clone(), e.to_string());
                    }
                }
            }

            print_summary(&ui, "inspect", "matches", &report);

            if report.any_failed() {
                std::process::exit(EXIT_ERROR);
            }
            Ok(())
        }

        Command::Rewrite {
            files,
            marker,
            in_place,
            out_dir,
            json,
        } => {
            // Stdout is reserved for rewritten text (or the JSON report);
            // all human output goes to stderr.
            let mut ui = Ui::new(true);
            ui.title("deco-strip: rewrite");
            ui.line(format!("marker: {marker}"));

            if let Some(dir) = &out_dir {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create out dir {:?}", dir))?;
            }

            let config = Config {
                marker: marker.clone(),
                policy: Policy::Strip,
            };
            let mut report = RewriteRunReport::new(marker);
            let mut write_failures = 0usize;

            for file in &files {
                let text = match fs::read_to_string(file) {
                    Ok(t) => t,
                    Err(e) => {
                        ui.file_error(format!("failed to read {}: {e}", file.display()));
                        report.push_read_failure(file.clone(), e.to_string());
                        continue;
                    }
                };

                let buffer = SourceBuffer::new(text);
                let outcome = process_source(file, &buffer, &config, &ClassScanner);
                report_outcome(&buffer, &outcome, &mut ui);

                if let Some(output) = &outcome.output {
                    if in_place {
                        if let Err(e) = fs::write(file, output) {
                            ui.file_error(format!("failed to write {}: {e}", file.display()));
                            write_failures += 1;
                        }
                    } else if let Some(dir) = &out_dir {
                        match file.file_name() {
                            Some(name) => {
                                let target = dir.join(name);
                                if let Err(e) = fs::write(&target, output) {
                                    ui.file_error(format!(
                                        "failed to write {}: {e}",
                                        target.display()
                                    ));
                                    write_failures += 1;
                                }
                            }
                            None => {
                                ui.file_error(format!(
                                    "cannot derive a file name from {}",
                                    file.display()
                                ));
                                write_failures += 1;
                            }
                        }
                    } else if !json {
                        print!("{output}");
                    }
                }

                report.push(&outcome);
            }

            print_summary(&ui, "rewrite", "bodies stripped", &report);

            if json {
                let json_text =
                    serde_json::to_string_pretty(&report).context("serialize report to json")?;
                println!("{json_text}");
            }

            if report.any_failed() || write_failures > 0 {
                std::process::exit(EXIT_ERROR);
            }
            Ok(())
        }
    }
}

fn print_summary(ui: &Ui, mode: &str, rewrites_label: &str, report: &RewriteRunReport) {
    let processed = report.summary.files_ok + report.summary.files_failed;
    ui.line(format!("--- {mode} summary ---"));
    ui.line(format!("files processed: {processed}"));
    ui.line(format!("files failed:    {}", report.summary.files_failed));
    ui.line(format!("{rewrites_label}: {}", report.summary.rewrites));
    ui.line(format!("errors reported: {}", report.summary.errors));
}
