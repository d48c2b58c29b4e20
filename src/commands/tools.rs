//! Timing tools in the terminal

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tokio::io::AsyncReadExt;

use crate::content::FrontMatter;
use crate::layout::SidebarHandle;
use crate::timer::driver::{drive, DriveOutcome};
use crate::timer::{
    Bell, Countdown, Metronome, ReaderConfig, SpeedReader, Tick, TimerQueue, Widget,
};

/// An entry on the tools page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub slug: &'static str,
    pub name: &'static str,
    /// Subcommand that runs it
    pub command: &'static str,
    pub description: &'static str,
}

pub const TOOLS: &[Tool] = &[
    Tool {
        slug: "speed-reader",
        name: "Speed Reader",
        command: "read",
        description: "Reveal a passage a few words at a time",
    },
    Tool {
        slug: "metronome",
        name: "Metronome",
        command: "metronome",
        description: "Keep a steady beat",
    },
    Tool {
        slug: "timer",
        name: "Timer",
        command: "timer",
        description: "Count down and ring when time is up",
    },
];

/// Print the tools catalogue
pub fn list() {
    println!("Tools");
    println!();
    for tool in TOOLS {
        println!(
            "  {:<14} folio {:<10} {} (/tools/{})",
            tool.name, tool.command, tool.description, tool.slug
        );
    }
}

/// Redraw the status line in place
fn status_line(text: &str) {
    let mut out = std::io::stdout();
    if let Err(e) = write!(out, "\r\x1b[2K{}", text).and_then(|_| out.flush()) {
        tracing::debug!("Status line write failed: {}", e);
    }
}

fn finish(outcome: DriveOutcome, done: &str) {
    println!();
    match outcome {
        DriveOutcome::Finished => println!("{}", done),
        DriveOutcome::Stopped => {}
        DriveOutcome::Interrupted => println!("Interrupted."),
    }
}

/// Read `source` (a file, or `-` for stdin) with the speed reader.
/// Front-matter at the top of an article is skipped.
pub async fn read(source: &str, config: ReaderConfig) -> Result<()> {
    let raw = if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stdin")?;
        buf
    } else {
        let path = Path::new(source);
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?
    };
    let (_, passage) = FrontMatter::parse(&raw);

    let queue = Rc::new(TimerQueue::new());
    let mut reader = SpeedReader::new(queue.clone(), SidebarHandle::default());
    reader.configure(config)?;
    reader.set_passage(passage)?;
    reader.start()?;

    let draw = |reader: &SpeedReader| {
        let chunk = reader.current_chunk().unwrap_or_default();
        let label = reader.progress_label().unwrap_or_default();
        status_line(&format!("{:<40} {}", chunk, label));
    };
    draw(&reader);

    let outcome = drive(&queue, &mut reader, |reader, _| draw(&*reader)).await;
    finish(outcome, "Done.");
    Ok(())
}

/// Run the metronome, optionally for a fixed number of beats
pub async fn metronome(bpm: u32, beats: Option<u64>, sound: bool) -> Result<()> {
    let queue = Rc::new(TimerQueue::new());
    let mut metronome = Metronome::new(queue.clone(), SidebarHandle::default(), Box::new(Bell));
    metronome.set_bpm(bpm)?;
    metronome.set_sound(sound);
    metronome.start()?;
    status_line(&format!(
        "{} bpm ({} ms)",
        metronome.bpm(),
        metronome.interval().as_millis()
    ));

    let outcome = drive(&queue, &mut metronome, |m, _| {
        status_line(&format!("{} bpm  beat {}", m.bpm(), m.beat()));
        if beats.is_some_and(|limit| m.beat() >= limit) {
            m.stop();
        }
    })
    .await;
    finish(outcome, "");
    Ok(())
}

/// Count down from `minutes:seconds`
pub async fn timer(minutes: u32, seconds: u32, sound: bool) -> Result<()> {
    let queue = Rc::new(TimerQueue::new());
    let mut countdown = Countdown::new(queue.clone(), SidebarHandle::default(), Box::new(Bell));
    countdown.configure(minutes, seconds)?;
    countdown.set_sound(sound);
    countdown.start()?;
    status_line(&countdown.display());

    let outcome = drive(&queue, &mut countdown, |c, tick| {
        status_line(&c.display());
        if tick == Tick::Finished {
            tracing::debug!("Countdown status: {}", c.status());
        }
    })
    .await;
    finish(outcome, "Time's up!");
    Ok(())
}
