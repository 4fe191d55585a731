//! Input events and the single-threaded event loop.
//!
//! Every handler runs to completion before the next one starts. There are
//! three sources of work:
//!
//! - **input events** ([`Event`]) dispatched by the host in arrival order
//! - **animation frames**: callbacks queued with
//!   [`Scheduler::request_animation_frame`], flushed once per rendering cycle
//! - **timers**: callbacks queued with [`Scheduler::set_timeout`], fired when
//!   the virtual clock passes their due time
//!
//! The clock only moves when the host calls [`EventLoop::advance`], which
//! keeps transitions reproducible in tests and scripted sessions.

use super::Viewer;
use std::str::FromStr;
use std::time::Duration;

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A thumbnail in the gallery grid, by manifest index.
    Thumbnail(usize),
    /// The "previous" control inside the overlay.
    Prev,
    /// The "next" control inside the overlay.
    Next,
    /// The dedicated close control (`data-close`).
    Close,
    /// The dimmed area around the dialog.
    Backdrop,
    /// Anywhere inside the dialog that isn't a control. Stops propagation.
    Dialog,
}

/// Keyboard keys, named as in `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        })
    }
}

/// A user input delivered to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click(ClickTarget),
    KeyDown(Key),
    /// Horizontal coordinate of the first touch point, in CSS pixels.
    TouchStart { x: f64 },
    /// Horizontal coordinate of the lifted touch point, in CSS pixels.
    TouchEnd { x: f64 },
}

/// Deferred work the viewer schedules for itself.
///
/// Both variants carry the transition generation they were scheduled under;
/// the viewer drops them if another transition has happened since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Add the visible state after the open state has been rendered.
    Reveal { generation: u64 },
    /// Drop the open and closing states once the exit transition is over.
    FinishClose { generation: u64 },
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Frame and timer queues plus the virtual clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    frames: Vec<Task>,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the loop started.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` during the next rendering cycle.
    pub fn request_animation_frame(&mut self, task: Task) {
        self.frames.push(task);
    }

    /// Run `task` once `delay` has elapsed. A zero delay still waits for the
    /// clock to be advanced (by any amount, including zero).
    pub fn set_timeout(&mut self, delay: Duration, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due: self.now + delay,
            seq,
            task,
        });
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && self.timers.is_empty()
    }

    fn take_frames(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
    }

    fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Remove the earliest timer due at or before `until`, ties in scheduling order.
    fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(self.timers.swap_remove(pos))
    }
}

/// Owns a [`Viewer`] and feeds it events, frames and timers in order.
#[derive(Debug)]
pub struct EventLoop {
    viewer: Viewer,
    scheduler: Scheduler,
}

impl EventLoop {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            scheduler: Scheduler::new(),
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Run the handler for one input event.
    pub fn dispatch(&mut self, event: Event) {
        log::trace!("dispatch {event:?} at {:?}", self.scheduler.now());
        self.viewer.handle(event, &mut self.scheduler);
    }

    /// Run one rendering cycle. Frames requested while it runs wait for the
    /// next cycle. Returns how many callbacks ran.
    pub fn run_frame(&mut self) -> usize {
        let frames = self.scheduler.take_frames();
        let count = frames.len();
        for task in frames {
            self.viewer.run_task(task);
        }
        count
    }

    /// Move the clock forward by `by`, firing every timer that comes due, each
    /// followed by a rendering cycle.
    pub fn advance(&mut self, by: Duration) {
        let target = self.scheduler.now + by;
        while let Some(timer) = self.scheduler.pop_due(target) {
            self.scheduler.now = self.scheduler.now.max(timer.due);
            self.viewer.run_task(timer.task);
            self.run_frame();
        }
        self.scheduler.now = target;
    }

    /// Run frames and timers until nothing is pending.
    pub fn settle(&mut self) {
        loop {
            if self.scheduler.pending_frames() > 0 {
                self.run_frame();
            } else if let Some(due) = self.scheduler.next_due() {
                let wait = due.saturating_sub(self.scheduler.now);
                self.advance(wait);
            } else {
                break;
            }
        }
    }
}
