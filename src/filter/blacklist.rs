//! Built-in tables of known TeX boilerplate.
//!
//! [`Blacklist`] holds everything the engine matches against besides the
//! installation paths: line prefixes, literal substrings, erasable patterns
//! and the shapes of the warnings that individual rules suppress. The tables
//! are constant; the regexes are compiled once when the blacklist is built.

use regex::Regex;

use super::error::{compile, FilterError};
use super::state::BoxKind;

/// Lines starting with one of these (after trimming) are dropped by
/// `bad_lines`.
pub const BAD_LINE_PREFIXES: &[&str] = &[
    "This is pdfTeX, Version",
    "This is LuaTeX, Version",
    "This is LuaHBTeX, Version",
    "This is XeTeX, Version",
    "restricted \\write18 enabled.",
    "\\write18 enabled.",
    "LaTeX2e <",
    "entering extended mode",
    "L3 programming layer",
    "Document Class:",
    "For additional information on amsmath, use the `?' option.",
    "Document Style algorithmicx 1.2 - a greatly improved `algorithmic' style",
    "Document Style - pseudocode environments for use with the `algorithmicx' style",
    "*geometry* driver: auto-detecting",
    "*geometry* detected driver: pdftex",
    "[Loading MPS to PDF converter",
    "(see the transcript file for additional information)",
    "Output written on",
    "Transcript written on",
    "avail lists:",
];

/// Literal substrings removed by `bad_strs`.
pub const BAD_STRS: &[&str] = &[
    "Excluding comment 'comment'",
    "Excluding 'comment' comment.",
    "ABD: EveryShipout initializing macros",
];

/// Regex patterns erased by `bad_strs`, after the literal substrings.
pub const BAD_PATTERNS: &[&str] = &[
    // luaotfload and friends announce themselves with a dated version stamp
    r"Lua module: \S+ \d{4}[-/]\d{2}[-/]\d{2}[^()\[\]]*",
    r"pdfTeX warning \(dest\): name\{[^}]*\} has been referenced but does not exist, replaced by a fixed one",
];

const FONT_WARNING: &str = r"^(LaTeX Font Warning: |\(Font\)\s)";

const CITEREF_WARNING: &str = r"^LaTeX Warning: (Citation|Reference|Hyper reference) `[^']+' on page \d+ undefined on input line \d+\.";

const NODE_MEMORY: &str = "node memory still in use";

/// Immutable matching tables injected into the engine.
#[derive(Debug, Clone)]
pub struct Blacklist {
    line_prefixes: Vec<String>,
    substrings: Vec<String>,
    patterns: Vec<Regex>,
    font_warning: Regex,
    citeref_warning: Regex,
    overfull_vbox_output: Regex,
    underfull_vbox_output: Regex,
}

impl Blacklist {
    /// The built-in tables.
    pub fn builtin() -> Result<Self, FilterError> {
        Self::new(BAD_LINE_PREFIXES, BAD_STRS, BAD_PATTERNS)
    }

    /// Build a blacklist from custom prefix, substring and pattern tables.
    /// Warning shapes are always the built-in ones.
    pub fn new(
        prefixes: &[&str],
        substrings: &[&str],
        patterns: &[&str],
    ) -> Result<Self, FilterError> {
        Ok(Self {
            line_prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
            substrings: substrings.iter().map(|s| s.to_string()).collect(),
            patterns: patterns
                .iter()
                .map(|p| compile(p))
                .collect::<Result<_, _>>()?,
            font_warning: compile(FONT_WARNING)?,
            citeref_warning: compile(CITEREF_WARNING)?,
            overfull_vbox_output: compile(&vbox_output_pattern(BoxKind::Overfull))?,
            underfull_vbox_output: compile(&vbox_output_pattern(BoxKind::Underfull))?,
        })
    }

    pub fn is_bad_line(&self, line: &str) -> bool {
        self.line_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    pub fn is_font_warning(&self, line: &str) -> bool {
        self.font_warning.is_match(line)
    }

    pub fn is_citeref_warning(&self, line: &str) -> bool {
        self.citeref_warning.is_match(line)
    }

    pub fn mentions_node_memory(&self, line: &str) -> bool {
        line.contains(NODE_MEMORY)
    }

    /// Remove blacklisted substrings, then erase blacklisted patterns.
    pub fn scrub(&self, line: &str) -> String {
        let mut out = line.to_string();
        for s in &self.substrings {
            if out.contains(s.as_str()) {
                out = out.replace(s.as_str(), "");
            }
        }
        for re in &self.patterns {
            if re.is_match(&out) {
                out = re.replace_all(&out, "").into_owned();
            }
        }
        out
    }

    /// Erase "`<kind>` \vbox (...) has occurred while \output is active"
    /// wherever it appears in the line.
    pub fn strip_vbox_output(&self, line: &str, kind: BoxKind) -> String {
        let re = match kind {
            BoxKind::Overfull => &self.overfull_vbox_output,
            BoxKind::Underfull => &self.underfull_vbox_output,
        };
        re.replace_all(line, "").into_owned()
    }
}

fn vbox_output_pattern(kind: BoxKind) -> String {
    format!(
        r"{} \\vbox \([^)]*\) has occurred while \\output is active",
        kind.label()
    )
}
