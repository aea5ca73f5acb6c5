//! The streaming line filter.
//!
//! [`LineFilter::step`] is a pure function of the previous [`LineState`] and
//! the raw input line. It decides whether the line is suppressed, rewrites it
//! otherwise, applies the blank-line policy and returns the state for the
//! next line. [`LineFilter::run`] drives it over a reader, writing and
//! flushing every surviving line before the next one is read.
//!
//! Per line, in order:
//!
//! 1. fatal error detection on the raw line (`! ` prefix), always
//! 2. trim and classify
//! 3. suppression (any enabled rule matching discards the line)
//! 4. rewrite chain: substrings/patterns, vbox notices, absolute paths,
//!    relative paths, stub cleanup, page numbers, stub cleanup again,
//!    paren-only remnants, trim
//! 5. blank-line policy
//! 6. lookback state update

use std::io::{BufRead, Write};

use regex::Regex;

use super::blacklist::Blacklist;
use super::error::{compile, FilterError};
use super::paths::{PathPatterns, STUB};
use super::rules::{FilterConfig, Rule};
use super::state::{BoxAxis, BoxKind, BoxWarning, LineClass, LineState};

/// Lines starting with this are TeX errors.
pub const FATAL_SENTINEL: &str = "! ";

/// Parenthesis groups made only of stubs, parens and spaces.
const STUB_GROUP: &str = r"\(#[\(#\) ]*\)";

const PAGE_NUMBER: &str = r"\s*\[\d+(?:\.\d+)*\]";

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line survived and must be written.
    Emit(String),
    /// Discarded before rewriting by the given rule.
    Suppressed(Rule),
    /// Reduced to nothing and dropped by the blank-line policy.
    BlankDropped,
}

/// Result of processing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub outcome: LineOutcome,
    /// The raw line started with [`FATAL_SENTINEL`].
    pub fatal: bool,
    pub next: LineState,
}

/// Line counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub lines_written: usize,
    pub lines_suppressed: usize,
    pub blanks_dropped: usize,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Set once any line started with [`FATAL_SENTINEL`]. Never cleared.
    pub fatal_error: bool,
    pub stats: FilterStats,
}

impl RunResult {
    /// Process exit code: 1 if a fatal line was seen and detection is on.
    pub fn exit_code(&self, detect_error: bool) -> u8 {
        if detect_error && self.fatal_error {
            1
        } else {
            0
        }
    }
}

/// The line filter engine.
///
/// Owns its configuration, blacklist and path patterns; all of them are
/// read-only once the filter is built.
#[derive(Debug, Clone)]
pub struct LineFilter {
    config: FilterConfig,
    blacklist: Blacklist,
    paths: PathPatterns,
    stub_group: Regex,
    page_number: Regex,
}

impl LineFilter {
    pub fn new(
        config: FilterConfig,
        blacklist: Blacklist,
        paths: PathPatterns,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            config,
            blacklist,
            paths,
            stub_group: compile(STUB_GROUP)?,
            page_number: compile(PAGE_NUMBER)?,
        })
    }

    /// Filter with the built-in blacklist and paths under `texmf_root`.
    pub fn with_root(config: FilterConfig, texmf_root: &str) -> Result<Self, FilterError> {
        let blacklist = Blacklist::builtin()?;
        let paths = PathPatterns::new(texmf_root, config.relative_paths)?;
        Self::new(config, blacklist, paths)
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Process one raw input line (without its line terminator).
    pub fn step(&self, prev: LineState, raw: &str) -> Step {
        let fatal = raw.starts_with(FATAL_SENTINEL);
        let line = raw.trim();
        let class = LineClass::of(line, &self.blacklist);

        if let Some(rule) = self.suppressed_by(line, class, prev) {
            tracing::trace!(rule = rule.name(), line, "suppressed");
            return Step {
                outcome: LineOutcome::Suppressed(rule),
                fatal,
                next: LineState::next(class, prev.last_emitted_blank),
            };
        }

        let rewritten = self.rewrite(line);
        let blank = rewritten.is_empty();
        let (outcome, last_emitted_blank) =
            if blank && (self.config.empty_lines || prev.last_emitted_blank) {
                (LineOutcome::BlankDropped, prev.last_emitted_blank)
            } else {
                (LineOutcome::Emit(rewritten), blank)
            };

        Step {
            outcome,
            fatal,
            next: LineState::next(class, last_emitted_blank),
        }
    }

    /// First enabled rule that discards the line, if any.
    pub fn suppressed_by(&self, line: &str, class: LineClass, prev: LineState) -> Option<Rule> {
        let c = &self.config;
        if c.box_details && prev.box_warning_open {
            return Some(Rule::BoxDetails);
        }
        if let Some(warning) = class.box_warning {
            let rule = box_rule(warning);
            if c.get(rule) {
                return Some(rule);
            }
        }
        if c.fonts && self.blacklist.is_font_warning(line) {
            return Some(Rule::Fonts);
        }
        if c.citeref && self.blacklist.is_citeref_warning(line) {
            return Some(Rule::Citeref);
        }
        if c.bad_lines && self.blacklist.is_bad_line(line) {
            return Some(Rule::BadLines);
        }
        if c.node_memory && (class.node_memory || prev.node_memory) {
            return Some(Rule::NodeMemory);
        }
        None
    }

    /// Apply the rewrite chain to a trimmed line.
    pub fn rewrite(&self, line: &str) -> String {
        let c = &self.config;
        let mut line = line.to_string();

        if c.bad_strs {
            line = self.blacklist.scrub(&line);
        }
        for (kind, enabled) in [
            (BoxKind::Overfull, c.overfull_vbox),
            (BoxKind::Underfull, c.underfull_vbox),
        ] {
            if enabled {
                line = self.blacklist.strip_vbox_output(&line, kind);
            }
        }
        if c.paths {
            line = self.paths.stub_absolute(&line);
        }
        if c.relative_paths {
            line = self.paths.stub_relative(&line);
        }
        if c.path_stubs {
            line = self.clean_stubs(&line);
        }
        if c.page_numbers {
            line = self.page_number.replace_all(&line, "").into_owned();
        }
        // A page number can be all that separated a stub group from the end
        // of the line, so clean again.
        if c.path_stubs {
            line = self.clean_stubs(&line);
        }
        if is_paren_remnant(&line) {
            line.clear();
        }

        line.trim().to_string()
    }

    /// Remove stub-only groups, unwrap stub-opened groups, drop `<#>` and
    /// `{#}` annotations. A line left with nothing but stubs and parens is
    /// blanked.
    fn clean_stubs(&self, line: &str) -> String {
        let line = self.stub_group.replace_all(line, "");
        let line = unwrap_stub_groups(&line);
        if is_stub_remnant(&line) {
            return String::new();
        }
        line.replace(&format!("<{STUB}>"), "")
            .replace(&format!("{{{STUB}}}"), "")
    }

    /// Filter `input` to `output` until end of input.
    ///
    /// Every surviving line is written with a trailing `\n` and flushed
    /// immediately. Invalid UTF-8 is decoded lossily.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<RunResult, FilterError> {
        let mut state = LineState::default();
        let mut result = RunResult::default();
        let mut buf = Vec::with_capacity(256);

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let decoded = String::from_utf8_lossy(&buf);
            let raw = decoded.strip_suffix('\n').unwrap_or(decoded.as_ref());

            let step = self.step(state, raw);
            result.stats.lines_read += 1;
            if step.fatal && !result.fatal_error {
                tracing::debug!(line = result.stats.lines_read, "fatal error line");
                result.fatal_error = true;
            }

            match step.outcome {
                LineOutcome::Emit(line) => {
                    output.write_all(line.as_bytes())?;
                    output.write_all(b"\n")?;
                    output.flush()?;
                    result.stats.lines_written += 1;
                }
                LineOutcome::Suppressed(_) => result.stats.lines_suppressed += 1,
                LineOutcome::BlankDropped => result.stats.blanks_dropped += 1,
            }
            state = step.next;
        }

        tracing::debug!(
            read = result.stats.lines_read,
            written = result.stats.lines_written,
            suppressed = result.stats.lines_suppressed,
            blanks_dropped = result.stats.blanks_dropped,
            fatal_error = result.fatal_error,
            "filter finished"
        );
        Ok(result)
    }

    /// Filter a complete string. Convenience wrapper around [`LineFilter::run`].
    pub fn filter_str(&self, input: &str) -> Result<(String, RunResult), FilterError> {
        let mut out = Vec::new();
        let result = self.run(input.as_bytes(), &mut out)?;
        Ok((String::from_utf8_lossy(&out).into_owned(), result))
    }
}

fn box_rule(warning: BoxWarning) -> Rule {
    match (warning.kind, warning.axis) {
        (BoxKind::Overfull, BoxAxis::Horizontal) => Rule::OverfullHbox,
        (BoxKind::Underfull, BoxAxis::Horizontal) => Rule::UnderfullHbox,
        (BoxKind::Overfull, BoxAxis::Vertical) => Rule::OverfullVbox,
        (BoxKind::Underfull, BoxAxis::Vertical) => Rule::UnderfullVbox,
    }
}

/// Drop every `(` directly followed by a standalone stub, together with the
/// `)` that closes it on the same line. The group contents are kept.
fn unwrap_stub_groups(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut open: Vec<bool> = Vec::new();
    let mut chars = line.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '(' if opens_stub_group(&line[i + 1..]) => {
                for _ in STUB.chars() {
                    chars.next();
                }
                open.push(true);
            }
            '(' => {
                open.push(false);
                out.push(c);
            }
            ')' => {
                if open.pop() != Some(true) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn opens_stub_group(rest: &str) -> bool {
    match rest.strip_prefix(STUB) {
        Some(after) => !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

fn is_stub_remnant(line: &str) -> bool {
    line.chars()
        .all(|c| c == '(' || c == ')' || c.is_whitespace() || STUB.contains(c))
}

fn is_paren_remnant(line: &str) -> bool {
    line.chars()
        .all(|c| c == '(' || c == ')' || c.is_whitespace())
}
