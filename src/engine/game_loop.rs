/// Fixed timestep driver and tick-based timers
///
/// The battle advances in whole ticks at `TICK_RATE`. Real frame time is
/// accumulated and converted into a number of ticks to run, and the
/// leftover fraction becomes the render interpolation factor.
use std::time::{Duration, Instant};

/// Simulation ticks per second
pub const TICK_RATE: u32 = 30;

/// Length of one tick in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / TICK_RATE as f32;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Convert a duration in seconds to whole ticks (truncating)
pub fn seconds_to_ticks(seconds: f64) -> u32 {
    (seconds * TICK_RATE as f64).max(0.0) as u32
}

/// Accumulator for the fixed timestep loop
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,
    /// Time of last frame
    last_frame_time: Instant,
    paused: bool,
    frame_count: u64,
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame using the wall clock, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Feed an explicit frame duration, returns the number of ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop whatever could not be caught up on
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::warn!("Simulation fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Interpolation factor in `[0, 1)` between the previous and current tick
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a burst of ticks
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// A window of ticks, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickTimer {
    pub start: u32,
    pub end: u32,
}

impl TickTimer {
    pub fn new(start: u32, duration: u32) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Timer starting at `now` and lasting `seconds`
    pub fn from_seconds(now: u32, seconds: f64) -> Self {
        Self::new(now, seconds_to_ticks(seconds))
    }

    pub fn expired(&self, now: u32) -> bool {
        now >= self.end
    }

    /// Fraction of the window elapsed; 1.0 for empty windows
    pub fn progress(&self, now: u32) -> f64 {
        if self.end <= self.start {
            return 1.0;
        }
        now.saturating_sub(self.start) as f64 / (self.end - self.start) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_fixed_timestep() {
        assert_relative_eq!(FIXED_TIMESTEP, 1.0 / 30.0);
    }

    #[test]
    fn test_advance_counts_ticks() {
        let mut game_loop = GameLoop::new();
        let ticks = game_loop.advance(FIXED_TIMESTEP_DURATION * 2 + Duration::from_millis(5));
        assert_eq!(ticks, 2);
        assert_eq!(game_loop.tick_count(), 2);
        assert!(game_loop.alpha() > 0.0 && game_loop.alpha() < 1.0);
    }

    #[test]
    fn test_advance_caps_ticks() {
        let mut game_loop = GameLoop::new();
        let ticks = game_loop.advance(Duration::from_secs(2));
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);
        assert_eq!(game_loop.alpha(), 0.0);
    }

    #[test]
    fn test_paused_no_ticks() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert_eq!(game_loop.advance(Duration::from_millis(500)), 0);
        game_loop.resume();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION), 1);
    }

    #[test]
    fn test_seconds_to_ticks() {
        assert_eq!(seconds_to_ticks(1.0), 30);
        assert_eq!(seconds_to_ticks(0.1), 3);
        assert_eq!(seconds_to_ticks(-1.0), 0);
    }

    #[test]
    fn test_timer_expiry_and_progress() {
        let timer = TickTimer::new(10, 20);
        assert!(!timer.expired(29));
        assert!(timer.expired(30));
        assert_relative_eq!(timer.progress(10), 0.0);
        assert_relative_eq!(timer.progress(20), 0.5);
        assert_relative_eq!(timer.progress(30), 1.0);
    }

    #[test]
    fn test_timer_from_seconds() {
        let timer = TickTimer::from_seconds(100, 3.0);
        assert_eq!(timer, TickTimer { start: 100, end: 190 });
    }

    #[test]
    fn test_empty_timer() {
        let timer = TickTimer::new(5, 0);
        assert!(timer.expired(5));
        assert_relative_eq!(timer.progress(5), 1.0);
    }
}
