use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    constants::{LOCAL_PATH_MARKER, REQUIRE_MARKER, REQUIRE_SUFFIX},
    usage::UsageTable,
};

/// `from "x"` / `from 'x'` or `import "x"` / `import 'x'`; exactly one of the
/// two groups participates in each match.
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from\s*["']([^"']+)["']|import\s*["']([^"']+)["']"#)
        .expect("import pattern is a valid regex")
});

/// Extracts module names from a single line.
///
/// This is line-local text matching, not parsing. Require-style references
/// only count when written as `require("name");` on one line with double
/// quotes; anything after the closing quote other than `);` stays attached to
/// the name, which then simply matches no declared dependency.
pub fn references_in_line(line: &str) -> Vec<&str> {
    let mut names = require_references(line);
    names.extend(import_references(line));
    names
}

/// Extracts references from `line` and marks each one in `table`. Returns the
/// number of names extracted, declared or not.
pub fn scan_line(line: &str, table: &UsageTable) -> usize {
    let names = references_in_line(line);
    for name in &names {
        debug!("Found a package: {}", name);
        table.mark_used(name);
    }
    names.len()
}

fn require_references(line: &str) -> Vec<&str> {
    if !line.contains(REQUIRE_MARKER) {
        return Vec::new();
    }
    line.split(REQUIRE_MARKER)
        .skip(1)
        .filter(|fragment| !fragment.starts_with(LOCAL_PATH_MARKER))
        .map(|fragment| fragment.strip_suffix(REQUIRE_SUFFIX).unwrap_or(fragment))
        .collect()
}

fn import_references(line: &str) -> Vec<&str> {
    IMPORT_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .collect()
}
