/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Playback state machine with an owned, cancellable repeating tick.
//!
//! Scheduling goes through the [`TickScheduler`] trait. Two implementations
//! are provided: [`TokioTickScheduler`] spawns an interval task on a Tokio
//! runtime and delivers [`PlaybackTick`]s over an mpsc channel, and
//! [`ManualTickScheduler`] only records schedules so a caller (or a test)
//! can feed ticks by hand.
//!
//! Ticks carry the generation of the schedule that produced them. Once
//! [`PlaybackController::stop`] returns, ticks from the cancelled schedule
//! that are still queued are ignored, so the index can no longer advance.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No tick is scheduled
    #[default]
    Stopped,
    /// A repeating tick advances the frame index
    Running,
}

/// One firing of a repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTick {
    /// Generation of the schedule that fired
    pub generation: u64,
}

/// Handle to a scheduled repeating tick. Cancelling it stops further firings.
pub trait ScheduledTick {
    /// Cancels the schedule.
    fn cancel(self);
}

/// Something that can run a repeating tick.
pub trait TickScheduler {
    /// Handle returned for each schedule
    type Handle: ScheduledTick + std::fmt::Debug;

    /// Starts firing [`PlaybackTick`]s tagged with `generation` every `period`.
    fn schedule_repeating(&mut self, period: Duration, generation: u64) -> Self::Handle;
}

/// Scheduler backed by a Tokio interval task.
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    runtime: tokio::runtime::Handle,
    sender: mpsc::UnboundedSender<PlaybackTick>,
}

impl TokioTickScheduler {
    /// Creates a scheduler spawning on `runtime`, plus the receiver ticks arrive on.
    pub fn new(runtime: tokio::runtime::Handle) -> (Self, mpsc::UnboundedReceiver<PlaybackTick>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { runtime, sender }, receiver)
    }
}

/// Handle to a running Tokio interval task; dropping it aborts the task.
#[derive(Debug)]
pub struct TokioTickHandle {
    task: tokio::task::JoinHandle<()>,
}

impl ScheduledTick for TokioTickHandle {
    fn cancel(self) {
        drop(self);
    }
}

impl Drop for TokioTickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TickScheduler for TokioTickScheduler {
    type Handle = TokioTickHandle;

    fn schedule_repeating(&mut self, period: Duration, generation: u64) -> Self::Handle {
        let sender = self.sender.clone();
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(PlaybackTick { generation }).is_err() {
                    trace!("tick receiver dropped, ending schedule {}", generation);
                    break;
                }
            }
        });
        TokioTickHandle { task }
    }
}

/// A schedule recorded by [`ManualTickScheduler`].
#[derive(Debug, Clone)]
pub struct ManualSchedule {
    /// Requested period
    pub period: Duration,
    /// Generation the ticks must carry
    pub generation: u64,
    active: Arc<AtomicBool>,
}

impl ManualSchedule {
    /// Whether the schedule has not been cancelled.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Handle to a [`ManualSchedule`].
#[derive(Debug)]
pub struct ManualTickHandle {
    active: Arc<AtomicBool>,
}

impl ScheduledTick for ManualTickHandle {
    fn cancel(self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Scheduler that records schedules without running anything.
///
/// Ticks are produced on demand with [`ManualTickScheduler::next_tick`].
#[derive(Debug, Default)]
pub struct ManualTickScheduler {
    schedules: Vec<ManualSchedule>,
}

impl ManualTickScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every schedule ever requested, oldest first.
    pub fn schedules(&self) -> &[ManualSchedule] {
        &self.schedules
    }

    /// Number of schedules ever requested.
    pub fn schedule_count(&self) -> usize {
        self.schedules.len()
    }

    /// Number of schedules not yet cancelled.
    pub fn active_count(&self) -> usize {
        self.schedules.iter().filter(|s| s.is_active()).count()
    }

    /// A tick from the newest active schedule, as if its period had elapsed.
    pub fn next_tick(&self) -> Option<PlaybackTick> {
        self.schedules
            .iter()
            .rev()
            .find(|schedule| schedule.is_active())
            .map(|schedule| PlaybackTick {
                generation: schedule.generation,
            })
    }
}

impl TickScheduler for ManualTickScheduler {
    type Handle = ManualTickHandle;

    fn schedule_repeating(&mut self, period: Duration, generation: u64) -> Self::Handle {
        let active = Arc::new(AtomicBool::new(true));
        self.schedules.push(ManualSchedule {
            period,
            generation,
            active: Arc::clone(&active),
        });
        ManualTickHandle { active }
    }
}

/// Owns the current frame index and the Stopped/Running state.
#[derive(Debug)]
pub struct PlaybackController<S: TickScheduler> {
    scheduler: S,
    period: Duration,
    state: PlaybackState,
    current_index: usize,
    frame_count: usize,
    generation: u64,
    active: Option<S::Handle>,
}

impl<S: TickScheduler> PlaybackController<S> {
    /// Creates a stopped controller with no frames.
    pub fn new(scheduler: S, period: Duration) -> Self {
        Self {
            scheduler,
            period,
            state: PlaybackState::Stopped,
            current_index: 0,
            frame_count: 0,
            generation: 0,
            active: None,
        }
    }

    /// Stopped → Running. Returns `false` (and schedules nothing) when
    /// already running or when there are no frames.
    pub fn start(&mut self) -> bool {
        if self.state == PlaybackState::Running {
            return false;
        }
        if self.frame_count == 0 {
            debug!("playback start ignored: no frames");
            return false;
        }

        self.generation = self.generation.wrapping_add(1);
        self.active = Some(
            self.scheduler
                .schedule_repeating(self.period, self.generation),
        );
        self.state = PlaybackState::Running;
        info!(
            "playback started at frame {} of {} (every {:?})",
            self.current_index, self.frame_count, self.period
        );
        true
    }

    /// Running → Stopped, cancelling the schedule. Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == PlaybackState::Stopped {
            return false;
        }

        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
        self.state = PlaybackState::Stopped;
        info!("playback stopped at frame {}", self.current_index);
        true
    }

    /// Play/pause: starts when stopped, stops when running. Returns the new state.
    pub fn toggle(&mut self) -> PlaybackState {
        match self.state {
            PlaybackState::Running => {
                self.stop();
            }
            PlaybackState::Stopped => {
                self.start();
            }
        }
        self.state
    }

    /// Stops playback and jumps to `index`, clamped to the last frame. Returns the new index.
    pub fn seek(&mut self, index: usize) -> usize {
        self.stop();
        self.current_index = index.min(self.frame_count.saturating_sub(1));
        debug!("seek to frame {}", self.current_index);
        self.current_index
    }

    /// Applies a tick: advances and wraps the index when it belongs to the
    /// live schedule. Returns the new index, or `None` for a stale tick.
    pub fn on_tick(&mut self, tick: PlaybackTick) -> Option<usize> {
        if self.state != PlaybackState::Running || tick.generation != self.generation {
            trace!("ignoring stale tick from schedule {}", tick.generation);
            return None;
        }
        if self.frame_count == 0 {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.frame_count;
        Some(self.current_index)
    }

    /// Replaces the number of frames after a wholesale reload.
    ///
    /// The index is clamped into the new range; with zero frames playback stops.
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        if frame_count == 0 {
            self.stop();
            self.current_index = 0;
        } else if self.current_index >= frame_count {
            self.current_index = frame_count - 1;
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether a tick is scheduled.
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Index of the current frame.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of frames being played.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Generation of the most recent schedule.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Range a scrub control should offer, `None` without frames.
    pub fn slider_range(&self) -> Option<RangeInclusive<usize>> {
        (self.frame_count > 0).then(|| 0..=self.frame_count - 1)
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
