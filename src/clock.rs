use std::{
    thread,
    time::{Duration, Instant},
};

/// paces a loop at a fixed number of ticks per second.
#[derive(Debug)]
pub struct Clock {
    period: Duration,
    last_tick: Instant,
}

impl Clock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            period,
            last_tick: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// sleeps until a full period has passed since the previous tick, returns
    /// the time elapsed since then.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        delta
    }
}

#[test]
fn test_period() {
    assert_eq!(Clock::new(60).period(), Duration::from_secs(1) / 60);
    assert_eq!(Clock::new(1).period(), Duration::from_secs(1));
    assert_eq!(Clock::new(0).period(), Duration::from_secs(1));
}

#[test]
fn test_tick_waits_for_the_period() {
    let mut clock = Clock::new(200);
    clock.tick();
    let delta = clock.tick();
    assert!(delta >= clock.period());
}
