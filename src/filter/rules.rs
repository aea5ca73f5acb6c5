//! Rule registry and resolved filter configuration.
//!
//! The registry is a fixed, ordered table of every toggleable rule. It drives
//! the CLI surface (one `--<flag> <0|1>` option per rule), the `[filters]`
//! table of the config file, and the defaults of [`FilterConfig`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A toggleable filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    Paths,
    RelativePaths,
    PathStubs,
    BadLines,
    BadStrs,
    BoxDetails,
    OverfullHbox,
    UnderfullHbox,
    OverfullVbox,
    UnderfullVbox,
    Fonts,
    Citeref,
    NodeMemory,
    PageNumbers,
    EmptyLines,
}

/// Registry entry for a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    pub rule: Rule,
    /// Config-file key (snake_case)
    pub name: &'static str,
    /// CLI long option (kebab-case)
    pub flag: &'static str,
    pub default: bool,
    pub help: &'static str,
}

/// Every rule, in registry order.
pub const REGISTRY: &[RuleSpec] = &[
    RuleSpec {
        rule: Rule::Paths,
        name: "paths",
        flag: "paths",
        default: true,
        help: "replace paths of pre-installed fonts, packages, etc. by a stub",
    },
    RuleSpec {
        rule: Rule::RelativePaths,
        name: "relative_paths",
        flag: "relative-paths",
        default: false,
        help: "replace project-relative paths (./...) by a stub",
    },
    RuleSpec {
        rule: Rule::PathStubs,
        name: "path_stubs",
        flag: "path-stubs",
        default: true,
        help: "remove path stubs",
    },
    RuleSpec {
        rule: Rule::BadLines,
        name: "bad_lines",
        flag: "bad-lines",
        default: true,
        help: "remove lines whose prefix belongs to a blacklist",
    },
    RuleSpec {
        rule: Rule::BadStrs,
        name: "bad_strs",
        flag: "bad-strs",
        default: true,
        help: "remove blacklisted substrings and patterns",
    },
    RuleSpec {
        rule: Rule::BoxDetails,
        name: "box_details",
        flag: "box-details",
        default: true,
        help: "remove the detail line following overfull/underfull box warnings",
    },
    RuleSpec {
        rule: Rule::OverfullHbox,
        name: "overfull_hbox",
        flag: "overfull-hbox",
        default: false,
        help: "remove overfull \\hbox warnings",
    },
    RuleSpec {
        rule: Rule::UnderfullHbox,
        name: "underfull_hbox",
        flag: "underfull-hbox",
        default: false,
        help: "remove underfull \\hbox warnings",
    },
    RuleSpec {
        rule: Rule::OverfullVbox,
        name: "overfull_vbox",
        flag: "overfull-vbox",
        default: false,
        help: "remove overfull \\vbox warnings",
    },
    RuleSpec {
        rule: Rule::UnderfullVbox,
        name: "underfull_vbox",
        flag: "underfull-vbox",
        default: false,
        help: "remove underfull \\vbox warnings",
    },
    RuleSpec {
        rule: Rule::Fonts,
        name: "fonts",
        flag: "fonts",
        default: false,
        help: "remove warnings about missing font shapes and sizes",
    },
    RuleSpec {
        rule: Rule::Citeref,
        name: "citeref",
        flag: "citeref",
        default: false,
        help: "remove warnings about missing citations/references",
    },
    RuleSpec {
        rule: Rule::NodeMemory,
        name: "node_memory",
        flag: "node-memory",
        default: true,
        help: "remove LuaTeX's \"node memory still in use\" report",
    },
    RuleSpec {
        rule: Rule::PageNumbers,
        name: "page_numbers",
        flag: "page-numbers",
        default: true,
        help: "remove page-numbers",
    },
    RuleSpec {
        rule: Rule::EmptyLines,
        name: "empty_lines",
        flag: "empty-lines",
        default: true,
        help: "remove empty lines",
    },
];

impl Rule {
    /// All rules in registry order.
    pub fn all() -> impl Iterator<Item = Rule> {
        REGISTRY.iter().map(|spec| spec.rule)
    }

    /// Registry entry for this rule.
    pub fn spec(self) -> &'static RuleSpec {
        // REGISTRY is laid out in variant order.
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn flag(self) -> &'static str {
        self.spec().flag
    }

    pub fn default_enabled(self) -> bool {
        self.spec().default
    }

    pub fn help(self) -> &'static str {
        self.spec().help
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = ConfigError;

    /// Accepts the config-file name (`full_name`) or the CLI flag
    /// (`full-name`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|spec| spec.name == s || spec.flag == s)
            .map(|spec| spec.rule)
            .ok_or_else(|| ConfigError::UnknownRule {
                name: s.to_string(),
            })
    }
}

/// Errors raised while resolving the filter configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown filter '{name}'. Run with --list-filters to see the available filters.")]
    UnknownRule { name: String },
}

/// Fully resolved rule toggles, one field per registry entry.
///
/// Built once before the run and never mutated while processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    pub paths: bool,
    pub relative_paths: bool,
    pub path_stubs: bool,
    pub bad_lines: bool,
    pub bad_strs: bool,
    pub box_details: bool,
    pub overfull_hbox: bool,
    pub underfull_hbox: bool,
    pub overfull_vbox: bool,
    pub underfull_vbox: bool,
    pub fonts: bool,
    pub citeref: bool,
    pub node_memory: bool,
    pub page_numbers: bool,
    pub empty_lines: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let mut config = Self::all_disabled();
        for rule in Rule::all() {
            config.set(rule, rule.default_enabled());
        }
        config
    }
}

impl FilterConfig {
    /// Every rule switched off. The engine then only trims lines, blanks
    /// lines made of nothing but parens and collapses consecutive blank
    /// lines.
    pub fn all_disabled() -> Self {
        Self {
            paths: false,
            relative_paths: false,
            path_stubs: false,
            bad_lines: false,
            bad_strs: false,
            box_details: false,
            overfull_hbox: false,
            underfull_hbox: false,
            overfull_vbox: false,
            underfull_vbox: false,
            fonts: false,
            citeref: false,
            node_memory: false,
            page_numbers: false,
            empty_lines: false,
        }
    }

    pub fn get(&self, rule: Rule) -> bool {
        match rule {
            Rule::Paths => self.paths,
            Rule::RelativePaths => self.relative_paths,
            Rule::PathStubs => self.path_stubs,
            Rule::BadLines => self.bad_lines,
            Rule::BadStrs => self.bad_strs,
            Rule::BoxDetails => self.box_details,
            Rule::OverfullHbox => self.overfull_hbox,
            Rule::UnderfullHbox => self.underfull_hbox,
            Rule::OverfullVbox => self.overfull_vbox,
            Rule::UnderfullVbox => self.underfull_vbox,
            Rule::Fonts => self.fonts,
            Rule::Citeref => self.citeref,
            Rule::NodeMemory => self.node_memory,
            Rule::PageNumbers => self.page_numbers,
            Rule::EmptyLines => self.empty_lines,
        }
    }

    pub fn set(&mut self, rule: Rule, enabled: bool) {
        let field = match rule {
            Rule::Paths => &mut self.paths,
            Rule::RelativePaths => &mut self.relative_paths,
            Rule::PathStubs => &mut self.path_stubs,
            Rule::BadLines => &mut self.bad_lines,
            Rule::BadStrs => &mut self.bad_strs,
            Rule::BoxDetails => &mut self.box_details,
            Rule::OverfullHbox => &mut self.overfull_hbox,
            Rule::UnderfullHbox => &mut self.underfull_hbox,
            Rule::OverfullVbox => &mut self.overfull_vbox,
            Rule::UnderfullVbox => &mut self.underfull_vbox,
            Rule::Fonts => &mut self.fonts,
            Rule::Citeref => &mut self.citeref,
            Rule::NodeMemory => &mut self.node_memory,
            Rule::PageNumbers => &mut self.page_numbers,
            Rule::EmptyLines => &mut self.empty_lines,
        };
        *field = enabled;
    }

    /// Builder-style [`FilterConfig::set`].
    pub fn with(mut self, rule: Rule, enabled: bool) -> Self {
        self.set(rule, enabled);
        self
    }

    /// Apply a `name -> bool` map on top of this configuration.
    ///
    /// Every key is validated before anything is applied, so an unknown
    /// name leaves `self` untouched.
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<String, bool>,
    ) -> Result<(), ConfigError> {
        let resolved = overrides
            .iter()
            .map(|(name, enabled)| name.parse::<Rule>().map(|rule| (rule, *enabled)))
            .collect::<Result<Vec<_>, _>>()?;

        for (rule, enabled) in resolved {
            tracing::debug!(rule = rule.name(), enabled, "filter override");
            self.set(rule, enabled);
        }
        Ok(())
    }

    /// `(rule, enabled)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, bool)> + '_ {
        Rule::all().map(move |rule| (rule, self.get(rule)))
    }
}
