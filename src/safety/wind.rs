//! Wind-speed cutoff.
//!
//! The anemometer produces pulses counted elsewhere (typically in an
//! interrupt). This monitor samples the running total once per window and
//! latches a trigger when the rate exceeds the configured threshold.

use crate::config::limits::{clamp_wind_threshold, DEFAULT_WIND_THRESHOLD, WIND_WINDOW_MS};
use crate::config::units::Millis;

/// Pulses-per-minute evaluator with a latched safety trigger.
#[derive(Debug, Clone)]
pub struct WindMonitor {
    /// Trigger threshold in pulses per minute; 0 disables the cutoff.
    threshold: u32,
    /// Evaluation window length.
    window_ms: u32,
    /// Counter value at the start of the current window.
    last_total: Option<u32>,
    /// Start of the current window.
    window_start: Millis,
    /// Rate measured over the last complete window.
    pulses_per_minute: u32,
    /// Latched trigger.
    triggered: bool,
}

impl Default for WindMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_WIND_THRESHOLD)
    }
}

impl WindMonitor {
    /// Create a monitor with a one-minute window.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: clamp_wind_threshold(threshold),
            window_ms: WIND_WINDOW_MS,
            last_total: None,
            window_start: Millis::default(),
            pulses_per_minute: 0,
            triggered: false,
        }
    }

    /// Override the evaluation window (at least 1 ms).
    ///
    /// The measured count is scaled to pulses per minute.
    pub fn with_window(mut self, window_ms: u32) -> Self {
        self.window_ms = window_ms.max(1);
        self
    }

    /// Feed the running pulse total.
    ///
    /// The first call only establishes the baseline. Afterwards, once per
    /// window, the rate is recomputed and the trigger latched or cleared.
    /// Returns whether the trigger is set.
    pub fn update(&mut self, now: Millis, total_pulses: u32) -> bool {
        let Some(last_total) = self.last_total else {
            self.last_total = Some(total_pulses);
            self.window_start = now;
            return self.triggered;
        };

        let elapsed = now.elapsed_since(self.window_start);
        if elapsed < self.window_ms {
            return self.triggered;
        }

        let pulses = total_pulses.wrapping_sub(last_total);
        self.pulses_per_minute = scale_to_minute(pulses, elapsed);
        self.last_total = Some(total_pulses);
        self.window_start = now;

        if self.threshold > 0 && self.pulses_per_minute > self.threshold {
            if !self.triggered {
                warn!(
                    "wind: safety triggered, {} > {} pulses/min",
                    self.pulses_per_minute,
                    self.threshold
                );
            }
            self.triggered = true;
        } else {
            self.triggered = false;
        }

        self.triggered
    }

    /// Whether the trigger is latched.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Clear the trigger after it has been acted on.
    #[inline]
    pub fn reset_trigger(&mut self) {
        self.triggered = false;
    }

    /// Rate measured over the last complete window.
    #[inline]
    pub fn pulses_per_minute(&self) -> u32 {
        self.pulses_per_minute
    }

    /// Get the threshold in pulses per minute.
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Set the threshold in pulses per minute (clamped, 0 disables).
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = clamp_wind_threshold(threshold);
    }
}

fn scale_to_minute(pulses: u32, elapsed_ms: u32) -> u32 {
    let scaled = u64::from(pulses) * 60_000 / u64::from(elapsed_ms.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_sets_baseline() {
        let mut wind = WindMonitor::new(100);
        assert!(!wind.update(Millis(0), 5_000));
        assert_eq!(wind.pulses_per_minute(), 0);
    }

    #[test]
    fn test_triggers_above_threshold() {
        let mut wind = WindMonitor::new(100);
        wind.update(Millis(0), 0);

        assert!(!wind.update(Millis(30_000), 500));
        assert!(wind.update(Millis(60_000), 150));
        assert_eq!(wind.pulses_per_minute(), 150);
        assert!(wind.is_triggered());
    }

    #[test]
    fn test_at_threshold_does_not_trigger() {
        let mut wind = WindMonitor::new(100);
        wind.update(Millis(0), 0);
        assert!(!wind.update(Millis(60_000), 100));
    }

    #[test]
    fn test_clears_when_calm() {
        let mut wind = WindMonitor::new(100);
        wind.update(Millis(0), 0);
        assert!(wind.update(Millis(60_000), 300));
        assert!(!wind.update(Millis(120_000), 310));
    }

    #[test]
    fn test_zero_threshold_disables() {
        let mut wind = WindMonitor::new(0);
        wind.update(Millis(0), 0);
        assert!(!wind.update(Millis(60_000), 100_000));
    }

    #[test]
    fn test_counter_wraparound() {
        let mut wind = WindMonitor::new(100);
        wind.update(Millis(0), u32::MAX - 10);
        assert!(wind.update(Millis(60_000), 189));
        assert_eq!(wind.pulses_per_minute(), 200);
    }

    #[test]
    fn test_short_window_scaled_to_minute() {
        let mut wind = WindMonitor::new(100).with_window(10_000);
        wind.update(Millis(0), 0);
        assert!(wind.update(Millis(10_000), 30));
        assert_eq!(wind.pulses_per_minute(), 180);
    }

    #[test]
    fn test_threshold_clamped() {
        let mut wind = WindMonitor::default();
        assert_eq!(wind.threshold(), 100);
        wind.set_threshold(50_000);
        assert_eq!(wind.threshold(), 1_000);
    }
}
