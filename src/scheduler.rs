//! Periodic tick source
//!
//! An active scheduler owns one background thread that posts a [`Tick`]
//! into a channel every interval. The thread never touches application
//! state; whoever drains the channel does the work. Starting a scheduler
//! always stops and joins the previous thread first, and every tick carries
//! the generation of the thread that sent it so late ticks from a stopped
//! thread can be told apart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace, warn};

/// One periodic wake-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Active,
}

struct Worker {
    generation: u64,
    stop: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

pub struct TimerScheduler {
    interval: Duration,
    sender: Sender<Tick>,
    receiver: Receiver<Tick>,
    generation: u64,
    worker: Option<Worker>,
}

impl TimerScheduler {
    pub fn new(interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            interval: interval.max(Duration::from_millis(1)),
            sender,
            receiver,
            generation: 0,
            worker: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.worker.is_some() {
            SchedulerState::Active
        } else {
            SchedulerState::Idle
        }
    }

    /// Generation of the running thread, if any
    pub fn current_generation(&self) -> Option<u64> {
        self.worker.as_ref().map(|worker| worker.generation)
    }

    /// Whether `tick` came from the running thread
    pub fn is_current(&self, tick: Tick) -> bool {
        self.current_generation() == Some(tick.generation)
    }

    /// Channel the ticks arrive on
    pub fn ticks(&self) -> &Receiver<Tick> {
        &self.receiver
    }

    /// Stop any running thread, then start a fresh one
    pub fn start(&mut self) {
        self.stop();

        self.generation += 1;
        let generation = self.generation;
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);
        let sender = self.sender.clone();
        let interval = self.interval;

        let join = thread::spawn(move || run_ticker(generation, interval, sender, stop_for_thread));
        debug!(generation, interval_ms = interval.as_millis() as u64, "scheduler started");

        self.worker = Some(Worker {
            generation,
            stop,
            join,
        });
    }

    /// Stop the running thread and wait for it; no-op when idle
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Relaxed);
            worker.join.thread().unpark();
            if worker.join.join().is_err() {
                warn!(generation = worker.generation, "ticker thread panicked");
            }
            debug!(generation = worker.generation, "scheduler stopped");
        }
    }
}

impl Drop for TimerScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_ticker(generation: u64, interval: Duration, sender: Sender<Tick>, stop: Arc<AtomicBool>) {
    loop {
        let deadline = std::time::Instant::now() + interval;
        // Parking can wake early; keep waiting until the deadline or a stop
        loop {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            let now = std::time::Instant::now();
            if now >= deadline {
                break;
            }
            thread::park_timeout(deadline - now);
        }

        if stop.load(Ordering::Relaxed) {
            return;
        }
        trace!(generation, "tick");
        if sender.send(Tick { generation }).is_err() {
            return;
        }
    }
}
