//! Wall clock and fixed-interval cadences.
//!
//! `draw_web()` calls at ~60fps. The game does not advance per frame; instead
//! each frame asks a `Cadence` whether its interval has elapsed (accrual tick
//! every 500ms, autosave every 30s). Accrual itself integrates real elapsed
//! time, so a late or skipped firing never loses points.

use crate::cat::state::Millis;

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// `Date.now()` in the browser, the system clock natively.
pub struct WallClock;

impl Clock for WallClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> Millis {
        js_sys::Date::now() as Millis
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> Millis {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Millis)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock(std::rc::Rc<std::cell::Cell<Millis>>);

#[cfg(test)]
impl ManualClock {
    pub fn at(now: Millis) -> Self {
        Self(std::rc::Rc::new(std::cell::Cell::new(now)))
    }

    pub fn set(&self, now: Millis) {
        self.0.set(now);
    }

    pub fn advance(&self, ms: Millis) {
        self.0.set(self.0.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.0.get()
    }
}

/// Fires at most once per `interval_ms` of wall-clock time.
pub struct Cadence {
    interval_ms: Millis,
    /// Timestamp of the last firing, None until the first frame.
    last_fire: Option<Millis>,
}

impl Cadence {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            interval_ms,
            last_fire: None,
        }
    }

    /// Feed the current timestamp. Returns true when the interval has elapsed.
    ///
    /// The first call only arms the cadence. A timestamp earlier than the last
    /// firing (clock went backwards) re-arms without firing.
    pub fn due(&mut self, now: Millis) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                false
            }
            Some(prev) if now < prev => {
                self.last_fire = Some(now);
                false
            }
            Some(prev) if now - prev >= self.interval_ms => {
                self.last_fire = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Restart the interval from `now` (e.g. after a manual save).
    pub fn restart(&mut self, now: Millis) {
        self.last_fire = Some(now);
    }
}
