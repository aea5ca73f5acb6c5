//! tex-filter - CLI entry point

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tex_filter::cli::{Cli, Settings};
use tex_filter::{Config, FilterConfig, FixedRoot, Kpsewhich, LineFilter, RootResolver};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "tex-filter", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let file = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = cli
        .settings(&file)
        .context("Invalid filter configuration")?;

    if cli.list_filters {
        print_filters(&settings.filters);
        return Ok(ExitCode::SUCCESS);
    }

    run(&settings)
}

/// Log to stderr; stdout carries the transcript.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TEX_FILTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn run(settings: &Settings) -> Result<ExitCode> {
    let root = resolve_root(settings)?;
    let filter = LineFilter::with_root(settings.filters, &root)
        .context("Failed to build the line filter")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = filter
        .run(stdin.lock(), stdout.lock())
        .context("Failed to filter TeX output")?;

    Ok(ExitCode::from(result.exit_code(settings.detect_error)))
}

/// Installation root for path stubbing. Only looked up when `paths` is on.
fn resolve_root(settings: &Settings) -> Result<String> {
    if !settings.filters.paths {
        return Ok(String::new());
    }
    let root = match &settings.texmf_root {
        Some(root) => FixedRoot(root.clone()).resolve(),
        None => Kpsewhich::default().resolve(),
    };
    root.context("Could not locate the TeX installation (use --texmf-root or --paths 0)")
}

fn print_filters(filters: &FilterConfig) {
    let width = tex_filter::filter::REGISTRY
        .iter()
        .map(|spec| spec.flag.len())
        .max()
        .unwrap_or(0);
    for (rule, enabled) in filters.iter() {
        let marker = if enabled == rule.default_enabled() {
            " "
        } else {
            "*"
        };
        println!(
            "--{:<width$} {}{} {}",
            rule.flag(),
            u8::from(enabled),
            marker,
            rule.help(),
            width = width
        );
    }
}
