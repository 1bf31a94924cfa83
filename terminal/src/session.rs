//! Line input and the command loop driving the app.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::thread;

use anyhow::Context;
use mozik_app::{App, AppError};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::command::{Command, HELP};

const INPUT_BUFFER: usize = 16;

/// Read lines from `reader` on a detached thread. A read blocked there never
/// holds up runtime shutdown. The channel closes on end of input or after the
/// first read error.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(INPUT_BUFFER);
    let spawned = thread::Builder::new()
        .name("mozik-input".into())
        .spawn(move || {
            for line in BufReader::new(reader).lines() {
                let failed = line.is_err();
                if sender.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("input reader finished");
        });
    if let Err(error) = spawned {
        warn!(%error, "failed to start input reader");
    }
    receiver
}

enum Step {
    Line(Option<io::Result<String>>),
    Settled(Result<(), AppError>),
}

/// Run commands from `input` until `quit` or end of input, writing the view
/// after each one. A pending auth request is raced against the next line.
pub async fn run_session<W: Write>(
    app: &mut App,
    input: &mut mpsc::Receiver<io::Result<String>>,
    out: &mut W,
) -> anyhow::Result<()> {
    print(out, &format!("{}\n{HELP}\n", app.view()))?;

    loop {
        let step = if app.has_pending_request() {
            tokio::select! {
                line = input.recv() => Step::Line(line),
                settled = app.settle() => Step::Settled(settled),
            }
        } else {
            Step::Line(input.recv().await)
        };

        let line = match step {
            Step::Settled(settled) => {
                report_settled(app, settled, out)?;
                continue;
            }
            Step::Line(Some(line)) => line.context("failed to read input")?,
            Step::Line(None) => {
                if app.has_pending_request() {
                    let settled = app.settle().await;
                    report_settled(app, settled, out)?;
                }
                break;
            }
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                print(out, &format!("! {error}\n"))?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                print(out, &format!("{HELP}\n"))?;
                continue;
            }
            Command::Action(action) => {
                if let Err(error) = app.dispatch(action).await {
                    warn!(%error, "action failed");
                    print(out, &format!("! {error}\n"))?;
                }
            }
        }

        print(out, &app.view().to_string())?;
    }

    Ok(())
}

fn report_settled<W: Write>(
    app: &App,
    settled: Result<(), AppError>,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Err(error) = settled {
        warn!(%error, "auth result could not be applied");
        print(out, &format!("! {error}\n"))?;
    }
    print(out, &app.view().to_string())
}

fn print<W: Write>(out: &mut W, text: &str) -> anyhow::Result<()> {
    out.write_all(text.as_bytes())
        .context("failed to write output")?;
    out.flush().context("failed to flush output")
}
