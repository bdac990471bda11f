//! Output formatting for one-shot recipe searches

use crate::search::Snapshot;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print accumulated search results as a numbered list
pub fn print_results(snapshot: &Snapshot, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    if snapshot.recipes.is_empty() {
        writeln!(stdout, "No recipes found for your search.")?;
        return Ok(());
    }

    let width = snapshot.recipes.len().to_string().len();
    for (index, recipe) in snapshot.recipes.iter().enumerate() {
        // Rank number
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{:>width$}.", index + 1)?;
        stdout.reset()?;

        // Title
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(stdout, " {}", recipe.title)?;
        stdout.reset()?;

        // Ready time, when known
        if let Some(minutes) = recipe.ready_in_minutes {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(stdout, "  ({minutes} min)")?;
            stdout.reset()?;
        }

        writeln!(stdout)?;
    }

    print_footer(&mut stdout, snapshot)?;
    Ok(())
}

/// Summary line after the list: shown count, reported total, and whether
/// more pages exist
fn print_footer(stdout: &mut StandardStream, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(stdout)?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    match snapshot.total_results {
        Some(total) => write!(
            stdout,
            "Showing {} of {} recipes",
            snapshot.recipes.len(),
            total
        )?,
        None => write!(stdout, "Showing {} recipes", snapshot.recipes.len())?,
    }
    stdout.reset()?;

    if snapshot.has_more {
        write!(stdout, " (more available, pass --pages to fetch them)")?;
    }
    writeln!(stdout)?;

    Ok(())
}
