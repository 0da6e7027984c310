use eyre::Result;
use std::io::Write;

use crate::check::Outcome;
use crate::config::Format;

/// Write every outcome to `out` in the requested format
pub fn write_report<W: Write>(out: &mut W, format: Format, outcomes: &[Outcome]) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, outcomes)?;
            writeln!(out)?;
        }
        Format::Pretty => {
            for outcome in outcomes {
                write_pretty(out, outcome)?;
            }
            let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
            writeln!(
                out,
                "{accepted} accepted, {} rejected",
                outcomes.len() - accepted
            )?;
        }
    }
    Ok(())
}

fn write_pretty<W: Write>(out: &mut W, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Accepted { source, event } => writeln!(
            out,
            "ACCEPTED  {source}: event {} \"{}\" (free: {}, offline: {})",
            event.id, event.name, event.free, event.offline
        )?,
        Outcome::Rejected { source, errors } => {
            writeln!(out, "REJECTED  {source}")?;
            for error in errors {
                match &error.rejected_value {
                    Some(value) => writeln!(out, "  - {error} [rejected: {value}]")?,
                    None => writeln!(out, "  - {error}")?,
                }
            }
        }
        Outcome::Malformed { source, message } => {
            writeln!(out, "MALFORMED {source}: {message}")?
        }
    }
    Ok(())
}
