//! Adaptive seek controller for frame-accurate scrubbing.
//!
//! Repeated seeks in one direction jump by the full current step; reversing
//! direction halves the step, so alternating over/undershoots converge on a
//! target frame ("skip forward 3min, back 1:30, forward 45s, ..."). The step
//! is kept an integer multiple of the frame granularity so the search cannot
//! converge on a non-frame-aligned time.

/// Default jump size before convergence narrowing, in seconds.
pub const DEFAULT_PERIOD: f64 = 180.0;

/// Default frame granularity, in seconds.
pub const DEFAULT_STEP: f64 = 1.0;

/// Scrub-speed state for the adaptive bidirectional search.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekController {
    /// User-configured default seek size
    pub period: f64,
    /// Smallest addressable time granularity
    pub step: f64,
    find_period: f64,
    find_forward: bool,
}

impl SeekController {
    /// Create a controller starting at coarse granularity.
    pub fn new(period: f64, step: f64) -> Self {
        Self {
            period,
            step,
            find_period: period,
            find_forward: true,
        }
    }

    /// Current adaptive jump size.
    pub fn find_period(&self) -> f64 {
        self.find_period
    }

    /// Direction of the last adaptive seek.
    pub fn find_forward(&self) -> bool {
        self.find_forward
    }

    /// Advance the search one seek and return the signed time delta to move
    /// the cursor by.
    ///
    /// The jump size shrinks only when the direction flips or a previous
    /// search is already converging (`find_period < period`); repeating the
    /// same direction at coarse granularity keeps the full period.
    pub fn find_next(&mut self, forward: bool) -> f64 {
        if forward != self.find_forward || self.find_period < self.period {
            self.find_period = quantized_half(self.find_period, self.step);
            self.find_forward = forward;
        }
        if self.find_forward {
            self.find_period
        } else {
            -self.find_period
        }
    }

    /// Restart the search at coarse granularity. Called on every explicit
    /// jump.
    pub fn reset(&mut self) {
        self.find_period = self.period;
        self.find_forward = true;
    }
}

impl Default for SeekController {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_STEP)
    }
}

/// Halve a time value in whole-step units: convert to a step count, halve
/// that count, convert back. The result is always an integer multiple of
/// `step`, reaching zero once the count drops below two.
fn quantized_half(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return (value / 2.0).floor();
    }
    let count = (value / step).round() as i64;
    (count / 2) as f64 * step
}
