//! Real-time driver for a [`TimerQueue`]

use tokio::signal;
use tokio::time::{sleep_until, Instant};

use super::{Tick, TimerQueue, TimerStatus, Widget};

/// How a driven session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The widget reached `Done`
    Finished,
    /// The widget left `Running` some other way, or had nothing armed
    Stopped,
    /// Ctrl-C
    Interrupted,
}

/// Run `widget` against the wall clock until it stops running.
///
/// The queue's virtual time is mapped onto real time from the moment this
/// is called. After each delivered tick `render` sees the widget and the
/// outcome, and may stop the widget to end the session early. The widget
/// is torn down before returning.
pub async fn drive<W, F>(queue: &TimerQueue, widget: &mut W, mut render: F) -> DriveOutcome
where
    W: Widget + ?Sized,
    F: FnMut(&mut W, Tick),
{
    let origin = Instant::now() - queue.now();

    let outcome = loop {
        match widget.status() {
            TimerStatus::Running => {}
            TimerStatus::Done => break DriveOutcome::Finished,
            _ => break DriveOutcome::Stopped,
        }
        let Some(due) = queue.next_due() else {
            break DriveOutcome::Stopped;
        };

        tokio::select! {
            _ = sleep_until(origin + due) => {}
            _ = signal::ctrl_c() => break DriveOutcome::Interrupted,
        }

        while let Some(id) = queue.fire_next(due) {
            let tick = widget.on_tick(id);
            if tick != Tick::Ignored {
                render(widget, tick);
            }
        }
    };

    widget.teardown();
    tracing::debug!("Timer session ended: {:?}", outcome);
    outcome
}
