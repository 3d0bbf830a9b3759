mod assemble;
mod buffer;
mod cli;
mod errors;
mod excise;
mod marker;
mod parse;
mod pipeline;
mod report;
mod run_report;
mod span;
mod tree;
mod ui;
mod walk;

/// Entry point for the `deco-strip` binary.
fn main() -> anyhow::Result<()> {
    cli::run()
}
