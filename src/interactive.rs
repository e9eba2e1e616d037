//! Interactive mode: stdin commands stand in for slider events.
//!
//! A reader thread turns each line into a `RenderRequest` and hands it to the
//! `RedrawQueue`; this thread renders whatever is newest and rewrites the PNG.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};

use morphtype_core::config::CanvasConfig;
use morphtype_core::{RedrawQueue, Session};

use crate::controls::{Command, Controls};
use crate::output;

/// Render the initial state, then one frame per accepted command until `quit`
/// or end of input.
pub fn run(session: &mut Session, controls: Controls, canvas: &CanvasConfig, path: &Path) -> Result<()> {
    let queue = Arc::new(RedrawQueue::new());
    queue.request(controls.request());

    let producer = Arc::clone(&queue);
    let reader = thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || read_commands(io::stdin().lock(), controls, &producer))
        .context("failed to start stdin reader")?;

    eprintln!("commands: weight N | width N | shaping on|off | text ... | quit");
    while let Some(request) = queue.wait() {
        session.apply_request(request);
        let (frame, report) = output::render_frame(session, canvas);
        output::save_png(&frame, path)?;
        println!("{}", output::summary(&report, path));
    }

    log::debug!("interactive: {} requests superseded", queue.superseded());
    if reader.join().is_err() {
        log::error!("interactive: stdin reader panicked");
    }
    Ok(())
}

/// Parse commands from `input` and queue a redraw after each valid one.
///
/// Closes the queue on `quit`, end of input, or a read error.
fn read_commands(input: impl BufRead, mut controls: Controls, queue: &RedrawQueue) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("interactive: reading stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                controls.apply(command);
                queue.request(controls.request());
            }
            Err(e) => eprintln!("{e}"),
        }
    }
    queue.close();
}
