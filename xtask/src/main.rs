//! xtask - Build tasks for tex-filter
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man page, FILTERS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use tex_filter::cli::Cli;
use tex_filter::filter::REGISTRY;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for tex-filter")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate the man page
        #[arg(long)]
        man: bool,

        /// Generate FILTERS.md
        #[arg(long)]
        markdown: bool,

        /// Generate all formats (default if no specific format is specified)
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
            all,
        } => {
            // If no specific format is specified, generate all
            let gen_all = all || (!man && !markdown);

            if gen_all || man {
                generate_man_page(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Generate the man page using clap_mangen
fn generate_man_page(output: &Path) -> Result<()> {
    use clap_mangen::Man;

    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let man = Man::new(Cli::command());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("tex-filter.1"), buffer)?;
    println!("Generated: {}/tex-filter.1", man_dir.display());

    Ok(())
}

/// Generate FILTERS.md from the rule registry
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    markdown.push_str("# tex-filter Filter Reference\n\n");
    markdown.push_str("This document is auto-generated from the rule registry.\n\n");
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{}\n\n", about));
    }

    markdown.push_str("## Filters\n\n");
    markdown.push_str("| Flag | Config key | Default | Description |\n");
    markdown.push_str("|------|------------|---------|-------------|\n");
    for spec in REGISTRY {
        markdown.push_str(&format!(
            "| `--{} <0|1>` | `{}` | {} | {} |\n",
            spec.flag,
            spec.name,
            u8::from(spec.default),
            spec.help
        ));
    }
    markdown.push('\n');

    markdown.push_str("## Other options\n\n");
    let rule_ids: Vec<&str> = REGISTRY.iter().map(|spec| spec.name).collect();
    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_str();
        if arg.is_hide_set() || id == "help" || id == "version" || rule_ids.contains(&id) {
            continue;
        }
        let Some(long) = arg.get_long() else {
            continue;
        };
        markdown.push_str(&format!("- `--{}`: ", long));
        if let Some(help) = arg.get_help() {
            markdown.push_str(&format!("{}", help));
        }
        markdown.push('\n');
    }
    markdown.push('\n');

    markdown.push_str("## Configuration file\n\n");
    markdown.push_str("`~/.config/tex-filter/config.toml` uses the config keys above:\n\n");
    markdown.push_str("```toml\ndetect_error = true\n\n[filters]\n");
    for spec in REGISTRY {
        markdown.push_str(&format!("{} = {}\n", spec.name, spec.default));
    }
    markdown.push_str("```\n");

    // Footer
    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("FILTERS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}
