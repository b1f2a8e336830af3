//! Interactive command loop over a line-oriented reader.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::session::{Command, Flow, Session};

const PROMPT: &str = "\nHR User > ";

/// Reads commands until `quit`/`exit` or end of input. Command failures are printed and the
/// loop continues; only I/O errors on the terminal itself end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "\nWelcome to the AI Recruiting Assistant!")?;
    writeln!(out, "Type 'help' to see available commands. Type 'quit' to exit.")?;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out, "\nGoodbye!")?;
            break;
        };

        match session.execute(Command::parse(&line), out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Ok(Flow::PromptJobDescription) => {
                writeln!(out, "Enter the new job description:")?;
                writeln!(out, "New Job Description:")?;
                out.flush()?;
                let text = lines.next_line().await?.unwrap_or_default();
                if let Err(e) = session.set_job_description(text, out) {
                    writeln!(out, "{}", e.user_message())?;
                }
            }
            Err(e) => writeln!(out, "{}", e.user_message())?,
        }
    }

    info!(
        session = %session.id(),
        cached_candidates = session.state().cached_candidates.len(),
        "Session ended"
    );
    Ok(())
}
