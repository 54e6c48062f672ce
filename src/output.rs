use std::io::{self, Write};

use crate::report::Report;
use crate::slack::NEXT_BATCH_PRETEXT;

pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}

/// Prints a report the way it would appear in the channel, one attachment
/// block after the other.
pub fn print_report(report: &Report, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    println(report.text.trim_end(), writer)?;
    for (index, block) in report.attachments.iter().enumerate() {
        if index > 0 {
            println(NEXT_BATCH_PRETEXT, writer)?;
        }
        println(block.trim_end(), writer)?;
    }
    Ok(())
}
