//! Bounded readiness polling for the backend.
//!
//! Already healthy -> AlreadyReady, nothing is spawned. Otherwise spawn, then
//! up to `max_attempts` rounds of sleep-then-check at a fixed interval. When
//! the rounds run out, or Ctrl-C arrives through [`Interrupt`], the spawned
//! process is terminated once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::client::HealthCheck;
use crate::launcher::{LaunchError, LaunchSpec, Launcher};

/// Longest uninterrupted sleep between interrupt checks.
const SLICE: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum PollOutcome {
    AlreadyReady,
    BecameReady { attempts: u32 },
    TimedOut,
    /// Ctrl-C while waiting; anything spawned has been terminated.
    Interrupted,
    LaunchFailed(LaunchError),
}

/// Hands Ctrl-C from the signal handler to a wait in progress.
#[derive(Debug, Default)]
pub struct Interrupt {
    waiting: AtomicBool,
    requested: AtomicBool,
}

impl Interrupt {
    /// Called from the signal handler. `true` when a wait picked the request
    /// up and will clean up after itself; `false` when nothing is waiting.
    pub fn request(&self) -> bool {
        if !self.waiting.load(Ordering::SeqCst) {
            return false;
        }
        self.requested.store(true, Ordering::SeqCst);
        true
    }

    fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Waiting<'_> {
        self.requested.store(false, Ordering::SeqCst);
        self.waiting.store(true, Ordering::SeqCst);
        Waiting(self)
    }
}

struct Waiting<'a>(&'a Interrupt);

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        self.0.waiting.store(false, Ordering::SeqCst);
        self.0.requested.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReadinessPoller {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl ReadinessPoller {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        ReadinessPoller {
            max_attempts,
            interval,
        }
    }

    /// Upper bound on the time spent waiting after a spawn.
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts
    }

    #[cfg(test)]
    pub fn wait_until_ready<H: HealthCheck + ?Sized>(
        &self,
        health: &H,
        launcher: &dyn Launcher,
        spec: &LaunchSpec,
    ) -> PollOutcome {
        self.wait_until_ready_notify(health, launcher, spec, &Interrupt::default(), |_| {})
    }

    /// Same as `wait_until_ready`, but stops early on `interrupt`; `on_spawned`
    /// runs once, right after a successful spawn and before the first sleep.
    pub fn wait_until_ready_notify<H: HealthCheck + ?Sized>(
        &self,
        health: &H,
        launcher: &dyn Launcher,
        spec: &LaunchSpec,
        interrupt: &Interrupt,
        on_spawned: impl FnOnce(Option<u32>),
    ) -> PollOutcome {
        let _waiting = interrupt.enter();
        if health.check_health() {
            return PollOutcome::AlreadyReady;
        }
        if interrupt.is_requested() {
            return PollOutcome::Interrupted;
        }

        let mut handle = match launcher.spawn_detached(spec) {
            Ok(h) => h,
            Err(e) => return PollOutcome::LaunchFailed(e),
        };
        on_spawned(handle.id());

        for attempt in 1..=self.max_attempts {
            if !sleep_unless_interrupted(self.interval, interrupt) {
                tracing::info!(pid = ?handle.id(), "interrupted while waiting; terminating backend");
                handle.terminate();
                return PollOutcome::Interrupted;
            }
            if health.check_health() {
                tracing::debug!(attempt, "backend became ready");
                return PollOutcome::BecameReady { attempts: attempt };
            }
            tracing::trace!(attempt, max = self.max_attempts, "backend not ready yet");
        }

        tracing::info!(
            pid = ?handle.id(),
            ceiling_ms = self.ceiling().as_millis() as u64,
            "backend never became ready; terminating it"
        );
        handle.terminate();
        PollOutcome::TimedOut
    }
}

/// `false` as soon as an interrupt is seen, `true` once `total` has passed.
fn sleep_unless_interrupted(total: Duration, interrupt: &Interrupt) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if interrupt.is_requested() {
            return false;
        }
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return true;
        }
        std::thread::sleep(left.min(SLICE));
    }
}
