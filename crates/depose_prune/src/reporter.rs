use std::{
    env,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;

use crate::types::CheckResult;

/// Shows `path` relative to the working directory when it lives below it
fn display_path(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|rel| rel.display().to_string()))
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_nothing_to_remove<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    debug!("Nothing to remove");
    writeln!(
        writer,
        "{} All {} declared dependencies are referenced.",
        "✓".green().bold(),
        result.declared.len()
    )?;
    print_script_kept(writer, result)?;
    writer.flush()?;
    Ok(())
}

pub fn print_removed<W: Write>(
    writer: &mut W,
    result: &CheckResult,
    dry_run: bool,
) -> io::Result<()> {
    debug!("Printing {} removed dependencies", result.removed.len());
    let verb = if dry_run { "Would remove" } else { "Removed" };
    writeln!(
        writer,
        "{} {} {} of {} declared dependencies\n",
        "⚠".yellow().bold(),
        verb,
        result.removed.len().to_string().yellow(),
        result.declared.len()
    )?;

    for (idx, name) in result.removed.iter().enumerate() {
        let prefix = if idx == result.removed.len() - 1 { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), name.red())?;
    }

    print_script_kept(writer, result)?;

    if let Some(backup) = &result.backup {
        writeln!(
            writer,
            "\npackage.json has been changed. Refer to {} for the original file.",
            display_path(backup).blue()
        )?;
    }

    writer.flush()?;
    Ok(())
}

fn print_script_kept<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    if result.always_keep.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = result.always_keep.iter().map(String::as_str).collect();
    writeln!(writer, "\n{} {}", "Kept (used by scripts):".dimmed(), names.join(", "))?;
    Ok(())
}
