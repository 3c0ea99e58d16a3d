//! Terminal playback of a loaded session.

use parley_core::display_action;
use parley_error::{ParleyResult, TerminalError};
use parley_script::{Advance, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Renders one playback step as terminal text.
///
/// The agent line comes first, followed by its actions with brackets stripped,
/// then the suggested reply if there is one.
pub fn render_step(step: &Advance) -> String {
    let mut out = String::new();
    let Some(current) = step.current() else {
        out.push_str("-- end of conversation --\n");
        return out;
    };

    out.push_str(&format!("{}: {}\n", current.role(), current.text()));
    for action in current.actions() {
        out.push_str(&format!("    * {}\n", display_action(action)));
    }
    if let Some(preview) = step.preview() {
        out.push_str(&format!("  suggested reply ({}): {}\n", preview.role(), preview.text()));
    }
    out
}

/// Plays `session` to the end, waiting for a line of input between steps.
///
/// Entering `r` rewinds, `q` (or end of input) stops early. Returns the number
/// of agent turns shown.
///
/// # Errors
///
/// Returns `InvalidSessionState` if nothing is loaded, or a terminal error if
/// reading or writing fails.
pub async fn play<R, W>(session: &mut Session, input: R, output: &mut W) -> ParleyResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut shown = 0;

    loop {
        let step = session.advance()?;
        write(output, &render_step(&step)).await?;
        if step.current().is_none() {
            break;
        }
        shown += 1;
        if !*step.has_more() {
            write(output, "-- end of conversation --\n").await?;
            break;
        }

        write(output, "[Enter] next  [r] restart  [q] quit > ").await?;
        let line = lines
            .next_line()
            .await
            .map_err(|e| TerminalError::new(format!("Failed to read input: {}", e)))?;
        match line.as_deref().map(str::trim) {
            None | Some("q") => break,
            Some("r") => {
                session.reset();
                write(output, "\n-- restarted --\n").await?;
            }
            Some(_) => write(output, "\n").await?,
        }
    }

    tracing::debug!(shown, "Playback finished");
    Ok(shown)
}

async fn write<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> ParleyResult<()> {
    output
        .write_all(text.as_bytes())
        .await
        .map_err(|e| TerminalError::new(format!("Failed to write output: {}", e)))?;
    output
        .flush()
        .await
        .map_err(|e| TerminalError::new(format!("Failed to flush output: {}", e)))?;
    Ok(())
}
