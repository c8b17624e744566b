//! Humidity reader for HS1101-style frequency-output sensors.
//!
//! [`Hs1101`] owns the capture timer and the sample sequencer. The
//! foreground loop arms a measurement cycle, forwards capture interrupts
//! through [`Hs1101::on_capture`], and polls [`Hs1101::read_humidity`];
//! the poll returns immediately with [`Error::TimerNotReady`] until the
//! cycle completes, so the node never blocks while waiting for edges.

use crate::capture::{CaptureTimer, SampleSequencer, SequencerState};
use crate::conversions::frequency_to_percent_rh;
use crate::error::Error;
use crate::types::Config;

/// Driver for a frequency-output humidity sensor read via timer capture.
pub struct Hs1101<T: CaptureTimer> {
    timer: T,
    sequencer: SampleSequencer,
    pub config: Config,
}

impl<T: CaptureTimer> Hs1101<T> {
    pub fn new(timer: T, config: Config) -> Self {
        Self {
            timer,
            sequencer: SampleSequencer::new(),
            config,
        }
    }

    /// Release the timer peripheral.
    pub fn destroy(self) -> T {
        self.timer
    }

    /// Start a measurement cycle. The sample buffer fills as capture
    /// interrupts arrive; poll [`read_humidity`] for the result.
    ///
    /// [`read_humidity`]: Hs1101::read_humidity
    pub fn arm(&mut self) -> Result<(), Error<T::Error>> {
        self.sequencer.arm(&mut self.timer)
    }

    /// Forward one capture interrupt to the sequencer. Call from the
    /// timer's capture interrupt handler, once per external-trigger edge.
    pub fn on_capture(&mut self) {
        self.sequencer.handle_capture(&mut self.timer);
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Non-blocking poll for the result of the current measurement cycle.
    ///
    /// Returns [`Error::TimerNotReady`] without touching the sample buffer
    /// while the cycle is still collecting (or the timer reports busy);
    /// the caller retries on a later cycle. On success the averaged
    /// oscillator frequency is interpolated to %RH and the sequencer is
    /// re-armed for the next cycle.
    pub fn read_humidity(&mut self) -> Result<f32, Error<T::Error>> {
        if !self.timer.is_ready() {
            return Err(Error::TimerNotReady);
        }
        let samples = self.sequencer.samples().ok_or(Error::TimerNotReady)?;
        let freq = average_frequency(samples, self.config.timer_clock_hz)
            .ok_or(Error::TimerNotReady)?;
        let rh = frequency_to_percent_rh(freq);
        self.sequencer.arm(&mut self.timer)?;
        Ok(rh)
    }
}

/// Elapsed ticks between two readings of the free-running 32-bit counter.
///
/// The counter wraps at `2^32`, so plain subtraction of the raw values
/// would produce a huge spurious delta when a wrap lands between two
/// captures. Wrapping subtraction yields the true elapsed count whenever
/// fewer than `2^32` ticks passed between the edges.
fn elapsed_ticks(previous: u32, current: u32) -> u32 {
    current.wrapping_sub(previous)
}

/// Mean oscillator frequency over the sample buffer.
///
/// Each adjacent pair of samples spans one period of the external signal,
/// giving `clock_hz / delta` as an instantaneous frequency; those are
/// averaged arithmetically. Returns `None` when two captures carry the
/// same counter value (a glitch that admits no frequency) or when the
/// buffer holds fewer than two samples.
fn average_frequency(samples: &[u32], clock_hz: u32) -> Option<f32> {
    let mut sum = 0.0f32;
    let mut pairs = 0u32;
    for pair in samples.windows(2) {
        let delta = elapsed_ticks(pair[0], pair[1]);
        if delta == 0 {
            return None;
        }
        sum += clock_hz as f32 / delta as f32;
        pairs += 1;
    }
    (pairs > 0).then(|| sum / pairs as f32)
}
