use anyhow::{Context, Result};
use clap::Parser;
use file_upload_element::{
    hooks, load_context, write_context, ElementConfig, FormatError, RequestContext,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Command, ElementArgs, IdentityArgs, ParseArgs, PrepareArgs, RenderArgs, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Identity(args) => cmd_identity(args),
        Command::Prepare(args) => cmd_prepare(args),
        Command::Render(args) => cmd_render(args),
        Command::Parse(args) => cmd_parse(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn element_config(args: &ElementArgs) -> Result<ElementConfig> {
    let attributes = file_upload_element::element::parse_attributes(&args.attrs)?;
    let config = ElementConfig::from_attributes(&attributes).context("configure element")?;
    Ok(config)
}

fn cmd_identity(args: IdentityArgs) -> Result<()> {
    let config = element_config(&args.element)?;
    println!("{}", config.answer_identity());
    Ok(())
}

#[derive(Serialize)]
struct PrepareReport<'a> {
    declared: &'a [String],
    required_file_names: &'a [String],
}

fn cmd_prepare(args: PrepareArgs) -> Result<()> {
    let config = element_config(&args.element)?;
    let mut context = load_context(&args.state.state)?;
    let declared = hooks::prepare(&config, &mut context);
    write_context(args.state.output_path(), &context)?;

    if args.json {
        let report = PrepareReport {
            declared: &declared,
            required_file_names: &context.params.required_file_names,
        };
        let text = serde_json::to_string_pretty(&report).context("serialize prepare report")?;
        println!("{text}");
    } else {
        for name in &declared {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let config = element_config(&args.element)?;
    let mut context = load_context(&args.state)?;
    if let Some(panel) = args.panel {
        context.panel = panel;
    }
    if let Some(view) = hooks::render(&config, &context)? {
        let text = serde_json::to_string_pretty(&view).context("serialize view model")?;
        println!("{text}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ParseReport<'a> {
    answer: String,
    errors: Vec<String>,
    format_errors: &'a [String],
}

fn cmd_parse(args: ParseArgs) -> Result<()> {
    let config = element_config(&args.element)?;
    let mut context: RequestContext = load_context(&args.state.state)?;
    let errors = hooks::parse(&config, &mut context);
    write_context(args.state.output_path(), &context)?;

    let messages: Vec<String> = errors.iter().map(FormatError::to_string).collect();
    if args.json {
        let all_errors = context.file_errors();
        let report = ParseReport {
            answer: config.answer_identity().to_string(),
            errors: messages,
            format_errors: &all_errors,
        };
        let text = serde_json::to_string_pretty(&report).context("serialize parse report")?;
        println!("{text}");
    } else if messages.is_empty() {
        println!("ok: all required files submitted");
    } else {
        for message in &messages {
            println!("error: {message}");
        }
    }
    Ok(())
}
