//! Installation and project path normalization.
//!
//! TeX prints the full path of every package, font and map file it opens.
//! These paths depend on where TeX Live is installed, so they are replaced
//! by [`STUB`] before the output is compared across machines.

use regex::{Captures, NoExpand, Regex};

use super::error::{compile, FilterError};

/// Placeholder substituted for a recognized path.
pub const STUB: &str = "#";

/// File suffixes of sources, packages and fonts that get stubbed.
pub const FILE_FORMATS: &[&str] = &[
    "sty", "tex", "cfg", "def", "clo", "fd", "mkii", "pfb", "enc", "map", "cls", "ldf", "lua",
    "otf", "ttf", "tfm",
];

const PATH_CHARS: &str = r"[a-zA-Z0-9\-/.]+";

/// What may precede a relative path: start of line, whitespace or an
/// opening bracket. Keeps `./` inside `../` or `a/./b` from matching.
const RELATIVE_LEAD: &str = r"(?P<lead>^|[\s(<{\[])";

/// Compiled path patterns for one installation root.
#[derive(Debug, Clone)]
pub struct PathPatterns {
    absolute: Regex,
    relative: Option<Regex>,
}

impl PathPatterns {
    /// Build the patterns for `root` (e.g. `/usr/local/texlive/2020`).
    ///
    /// The root is matched literally. The relative pattern is only built
    /// when `relative` is set.
    pub fn new(root: &str, relative: bool) -> Result<Self, FilterError> {
        let absolute = compile(&absolute_pattern(root))?;
        let relative = if relative {
            Some(compile(&relative_pattern())?)
        } else {
            None
        };
        tracing::debug!(root, pattern = absolute.as_str(), "path pattern");
        Ok(Self { absolute, relative })
    }

    pub fn absolute(&self) -> &Regex {
        &self.absolute
    }

    pub fn relative(&self) -> Option<&Regex> {
        self.relative.as_ref()
    }

    /// Replace installation paths with the stub.
    pub fn stub_absolute(&self, line: &str) -> String {
        stub(&self.absolute, line)
    }

    /// Replace project-relative paths with the stub, keeping the character
    /// in front of each path. No-op when the relative pattern was not built.
    pub fn stub_relative(&self, line: &str) -> String {
        match &self.relative {
            Some(re) => re
                .replace_all(line, |caps: &Captures| format!("{}{STUB}", &caps["lead"]))
                .into_owned(),
            None => line.to_string(),
        }
    }
}

fn stub(re: &Regex, line: &str) -> String {
    re.replace_all(line, NoExpand(STUB)).into_owned()
}

fn suffix_group() -> String {
    format!(r"\.({})\b", FILE_FORMATS.join("|"))
}

/// `<root>/texmf-{dist,var}/<segments>.<suffix>`
pub fn absolute_pattern(root: &str) -> String {
    let root = root.trim_end_matches('/');
    format!(
        r"{}/texmf-(dist|var)/{}{}",
        regex::escape(root),
        PATH_CHARS,
        suffix_group()
    )
}

/// `./<segments>.<suffix>`, preceded by [`RELATIVE_LEAD`]
pub fn relative_pattern() -> String {
    format!(r"{}\./{}{}", RELATIVE_LEAD, PATH_CHARS, suffix_group())
}
