//! Per-line classification and one-line lookback state.

use super::blacklist::Blacklist;

/// Whether a box is overfull or underfull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Overfull,
    Underfull,
}

impl BoxKind {
    pub fn label(self) -> &'static str {
        match self {
            BoxKind::Overfull => "Overfull",
            BoxKind::Underfull => "Underfull",
        }
    }
}

/// Horizontal (`\hbox`) or vertical (`\vbox`) box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxAxis {
    Horizontal,
    Vertical,
}

/// Header of an overfull/underfull box warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxWarning {
    pub kind: BoxKind,
    pub axis: BoxAxis,
}

impl BoxWarning {
    /// Parse the header at the start of a trimmed line.
    pub fn detect(line: &str) -> Option<Self> {
        let (kind, rest) = if let Some(rest) = line.strip_prefix("Overfull ") {
            (BoxKind::Overfull, rest)
        } else if let Some(rest) = line.strip_prefix("Underfull ") {
            (BoxKind::Underfull, rest)
        } else {
            return None;
        };
        let axis = if rest.starts_with("\\hbox") {
            BoxAxis::Horizontal
        } else if rest.starts_with("\\vbox") {
            BoxAxis::Vertical
        } else {
            return None;
        };
        Some(Self { kind, axis })
    }
}

/// Facts about the current (trimmed) line that two-line rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClass {
    pub box_warning: Option<BoxWarning>,
    pub node_memory: bool,
}

impl LineClass {
    pub fn of(line: &str, blacklist: &Blacklist) -> Self {
        Self {
            box_warning: BoxWarning::detect(line),
            node_memory: blacklist.mentions_node_memory(line),
        }
    }
}

/// What the engine remembers about the previous line.
///
/// Replaced after every line, never updated in place. The initial value
/// (before the first line) is all-false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    /// The previous input line was an `\hbox` warning header, so the
    /// current line is its detail line. `\vbox` warnings print no detail
    /// line on the terminal.
    pub box_warning_open: bool,
    /// The previous input line mentioned "node memory still in use".
    pub node_memory: bool,
    /// The last line actually written was blank.
    pub last_emitted_blank: bool,
}

impl LineState {
    /// State to carry into the next line.
    pub fn next(class: LineClass, last_emitted_blank: bool) -> Self {
        Self {
            box_warning_open: class
                .box_warning
                .is_some_and(|w| w.axis == BoxAxis::Horizontal),
            node_memory: class.node_memory,
            last_emitted_blank,
        }
    }
}
