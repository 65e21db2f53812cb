//! CLI argument parsing for driving element hooks against a state file.
//!
//! Each command loads one element's attributes plus a JSON request state and
//! runs a single hook, the same way a host would during one request.
use clap::{Args, Parser, Subcommand};
use file_upload_element::Panel;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "fue",
    version,
    about = "Declare, render and validate file upload answers",
    after_help = "Examples:\n  fue identity --attr 'file-names=a.txt, b.txt'\n  fue prepare --attr 'file-names=a.txt, b.txt' --state state.json\n  fue render --attr 'file-names=a.txt, b.txt' --state state.json\n  fue parse --attr 'file-names=a.txt, b.txt' --state state.json --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log hook decisions to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the answer identity for an element
    Identity(IdentityArgs),
    /// Add an element's file names to the request's required list
    Prepare(PrepareArgs),
    /// Print the widget view model for the current panel
    Render(RenderArgs),
    /// Reconcile a submission and record format errors
    Parse(ParseArgs),
}

/// Element attributes shared by every command.
#[derive(Args, Debug)]
pub struct ElementArgs {
    /// Element attribute as KEY=VALUE (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE", required = true)]
    pub attrs: Vec<String>,
}

/// Request state input and output.
#[derive(Args, Debug)]
pub struct StateArgs {
    /// JSON request state (panel, params, submitted_answers, format_errors)
    #[arg(long, value_name = "PATH")]
    pub state: PathBuf,

    /// Write updated state here instead of replacing --state
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

impl StateArgs {
    pub fn output_path(&self) -> &Path {
        self.out.as_deref().unwrap_or(&self.state)
    }
}

#[derive(Parser, Debug)]
pub struct IdentityArgs {
    #[command(flatten)]
    pub element: ElementArgs,
}

#[derive(Parser, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub element: ElementArgs,

    #[command(flatten)]
    pub state: StateArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub element: ElementArgs,

    /// JSON request state (read only)
    #[arg(long, value_name = "PATH")]
    pub state: PathBuf,

    /// Override the panel recorded in the state file
    #[arg(long, value_enum)]
    pub panel: Option<Panel>,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub element: ElementArgs,

    #[command(flatten)]
    pub state: StateArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
