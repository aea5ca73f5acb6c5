//! CLI definitions for tex-filter
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).
//!
//! The per-rule `--<flag> <0|1>` options are generated from the rule registry
//! by [`FilterFlags`], so adding a rule to the registry adds its flag.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::builder::{PossibleValuesParser, TypedValueParser, ValueParser};
use clap::{Arg, ArgMatches, Args, Command, FromArgMatches, Parser};
use clap_complete::Shell as CompletionShell;

use crate::config::Config;
use crate::filter::{ConfigError, FilterConfig, REGISTRY};

/// Build clap styles using our theme colors.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default()) // Light gray for value names
        .valid(AnsiColor::White.on_default()) // Light gray for accepted values
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Parser for `0|1` toggle values.
pub fn toggle_parser() -> ValueParser {
    PossibleValuesParser::new(["0", "1"])
        .map(|s| s == "1")
        .into()
}

#[derive(Parser, Debug)]
#[command(name = "tex-filter")]
#[command(about = "Remove unneeded info from TeX's stdout")]
#[command(
    long_about = "tex-filter - Remove unneeded info from TeX's stdout.

Reads the console output of pdfTeX, LuaTeX or XeTeX on stdin and writes a
stable, diffable transcript to stdout: banners and boilerplate are dropped,
installation paths are replaced by a stub, page numbers are removed.

The exit status is 1 if TeX reported an error (a line starting with '! '),
unless --detect-error 0 is given.

EXAMPLES:
    pdflatex -interaction=nonstopmode main.tex | tex-filter
    lualatex main.tex | tex-filter --citeref 1 --empty-lines 0
    tex-filter --texmf-root /usr/local/texlive/2020 < main.out

CONFIGURATION:
    Defaults can be changed in ~/.config/tex-filter/config.toml:

        detect_error = true
        [filters]
        citeref = true

    Command-line flags take precedence over the config file.

LOGGING:
    Set TEX_FILTER_LOG (e.g. TEX_FILTER_LOG=debug) to log to stderr."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    #[command(flatten)]
    pub filters: FilterFlags,

    /// Detect error messages and change exit status accordingly
    #[arg(
        long,
        value_name = "0|1",
        value_parser = toggle_parser(),
        help = "detect error messages and change exit status accordingly (default: 1)"
    )]
    pub detect_error: Option<bool>,

    /// TeX installation root (skips the kpsewhich lookup)
    #[arg(
        long,
        value_name = "PATH",
        help = "TeX installation root, e.g. /usr/local/texlive/2020 (default: ask kpsewhich)"
    )]
    pub texmf_root: Option<String>,

    /// Read settings from this config file instead of the default location
    #[arg(long, value_name = "PATH", help = "Config file to use")]
    pub config: Option<PathBuf>,

    /// Print the available filters and their effective values, then exit
    #[arg(long, help = "List filters with their effective values and exit")]
    pub list_filters: bool,

    /// Generate shell completions (internal use)
    #[arg(long, value_enum, hide = true)]
    pub completions: Option<CompletionShell>,
}

/// Fully resolved run settings: registry defaults, then the config file,
/// then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub filters: FilterConfig,
    pub detect_error: bool,
    pub texmf_root: Option<String>,
}

impl Cli {
    /// Layer the command-line flags over `file`.
    pub fn settings(&self, file: &Config) -> Result<Settings, ConfigError> {
        let mut filters = file.filter_config()?;
        filters.apply_overrides(self.filters.overrides())?;
        Ok(Settings {
            filters,
            detect_error: self.detect_error.unwrap_or(file.detect_error),
            texmf_root: self.texmf_root.clone().or_else(|| file.texmf_root.clone()),
        })
    }
}

/// One `--<flag> <0|1>` option per registry rule.
///
/// Only flags given on the command line are recorded, so that unset flags
/// fall through to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFlags {
    overrides: BTreeMap<String, bool>,
}

impl FilterFlags {
    /// Rule name -> value for every flag that was given.
    pub fn overrides(&self) -> &BTreeMap<String, bool> {
        &self.overrides
    }
}

impl FromArgMatches for FilterFlags {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut flags = Self::default();
        flags.update_from_arg_matches(matches)?;
        Ok(flags)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        for spec in REGISTRY {
            if let Some(enabled) = matches.get_one::<bool>(spec.name) {
                self.overrides.insert(spec.name.to_string(), *enabled);
            }
        }
        Ok(())
    }
}

impl Args for FilterFlags {
    fn augment_args(cmd: Command) -> Command {
        REGISTRY.iter().fold(cmd, |cmd, spec| {
            cmd.arg(
                Arg::new(spec.name)
                    .long(spec.flag)
                    .value_name("0|1")
                    .value_parser(toggle_parser())
                    .help(format!(
                        "{} (default: {})",
                        spec.help,
                        u8::from(spec.default)
                    )),
            )
        })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}
