use std::time::Instant;

/// Components that can be frozen and thawed
pub trait Pausable {
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
}

/// Monotonic tick clock producing capped delta times.
///
/// While paused the clock holds no reference time, so the first tick after
/// `resume` yields zero instead of the paused duration.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    paused: bool,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            last: None,
            paused: false,
            max_dt,
        }
    }

    /// Seconds since the previous tick, capped at `max_dt`
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f64 {
        if self.paused {
            return 0.0;
        }
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }

    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }
}

impl Pausable for FrameClock {
    fn pause(&mut self) {
        self.paused = true;
        self.last = None;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
