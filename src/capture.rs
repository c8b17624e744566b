//! Timer seam and the capture sample sequencer.
//!
//! The oscillator's edges are asynchronous to program flow, so samples are
//! collected by the timer's external-trigger capture interrupt rather than
//! by polling. [`SampleSequencer`] is the state machine driven by that
//! interrupt: [`SampleSequencer::handle_capture`] is the single dispatch
//! point, called once per capture event from interrupt context, while the
//! foreground reader only looks at the buffer once the sequencer reports
//! `Complete`. Capture events are disabled again before `Complete` is
//! entered, which is what makes the lock-free handoff to the foreground
//! sound.

use heapless::Vec;

use crate::error::Error;

/// Number of raw counter values captured per measurement cycle.
pub const MAX_TIMER_SAMPLES: usize = 3;

/// Interface to the timer peripheral used for external-trigger capture.
///
/// The driver only consumes these operations; configuring clock trees and
/// pin muxing stays with the board support code.
pub trait CaptureTimer {
    type Error;

    /// Configure the external-trigger input, enable capture events and
    /// start the counter.
    fn start_capture(&mut self) -> Result<(), Self::Error>;

    /// Disable capture events. No further captures may be delivered to
    /// [`SampleSequencer::handle_capture`] after this returns.
    fn stop_capture(&mut self);

    /// Current value of the free-running counter. Wraps at `2^32`.
    fn counter(&self) -> u32;

    /// Whether the peripheral is idle and can start a new capture run.
    fn is_ready(&self) -> bool;
}

/// Where the sequencer is in its measurement cycle.
///
/// `Complete` and `Failed` are transient per cycle; the next
/// [`SampleSequencer::arm`] leaves them implicitly.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// No measurement cycle started yet.
    Idle,
    /// Armed, waiting for the first capture event.
    Arming,
    /// Collecting capture samples.
    Collecting,
    /// All samples collected; the buffer may be read.
    Complete,
    /// The timer refused to start a capture run.
    Failed,
}

/// Collects [`MAX_TIMER_SAMPLES`] raw counter values, one per capture
/// event, then signals completion.
///
/// The sample buffer is owned here and mutated only from
/// [`handle_capture`]; there is deliberately no way to observe it before
/// the sequencer is `Complete`.
///
/// [`handle_capture`]: SampleSequencer::handle_capture
pub struct SampleSequencer {
    samples: Vec<u32, MAX_TIMER_SAMPLES>,
    state: SequencerState,
}

impl SampleSequencer {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            state: SequencerState::Idle,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SequencerState::Complete
    }

    /// The collected samples, once the cycle is complete.
    pub fn samples(&self) -> Option<&[u32]> {
        self.is_complete().then_some(self.samples.as_slice())
    }

    /// Start a new measurement cycle.
    ///
    /// Clears the sample buffer and starts the capture run. If the timer
    /// is busy or refuses to start, the sequencer enters `Failed` and the
    /// cause is returned.
    pub fn arm<T: CaptureTimer>(&mut self, timer: &mut T) -> Result<(), Error<T::Error>> {
        self.samples.clear();
        if !timer.is_ready() {
            self.state = SequencerState::Failed;
            return Err(Error::TimerNotReady);
        }
        if let Err(e) = timer.start_capture() {
            self.state = SequencerState::Failed;
            return Err(Error::Timer(e));
        }
        self.state = SequencerState::Arming;
        Ok(())
    }

    /// Record one capture event. Call from the capture interrupt, once per
    /// external-trigger edge.
    ///
    /// Capture events are disabled via [`CaptureTimer::stop_capture`] when
    /// the final sample lands, so the buffer cannot change once the
    /// foreground observes `Complete`.
    pub fn handle_capture<T: CaptureTimer>(&mut self, timer: &mut T) {
        match self.state {
            SequencerState::Arming | SequencerState::Collecting => {
                // The buffer is sized to the cycle; a push before Complete
                // cannot fail.
                let _ = self.samples.push(timer.counter());
                if self.samples.is_full() {
                    timer.stop_capture();
                    self.state = SequencerState::Complete;
                } else {
                    self.state = SequencerState::Collecting;
                }
            }
            // A capture event in any other state is a spurious edge and
            // must not disturb the buffer.
            _ => {}
        }
    }
}

impl Default for SampleSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::{CaptureTimer, MAX_TIMER_SAMPLES, SampleSequencer, SequencerState};
    use crate::error::Error;

    struct FakeTimer {
        counter: u32,
        ready: bool,
        capturing: bool,
        refuse_start: bool,
    }

    impl FakeTimer {
        fn new() -> Self {
            Self {
                counter: 0,
                ready: true,
                capturing: false,
                refuse_start: false,
            }
        }
    }

    impl CaptureTimer for FakeTimer {
        type Error = u8;

        fn start_capture(&mut self) -> Result<(), u8> {
            if self.refuse_start {
                return Err(0xE1);
            }
            self.capturing = true;
            Ok(())
        }

        fn stop_capture(&mut self) {
            self.capturing = false;
        }

        fn counter(&self) -> u32 {
            self.counter
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn full_cycle_transitions() {
        let mut timer = FakeTimer::new();
        let mut seq = SampleSequencer::new();
        assert_eq!(seq.state(), SequencerState::Idle);

        seq.arm(&mut timer).unwrap();
        assert_eq!(seq.state(), SequencerState::Arming);
        assert!(timer.capturing);

        timer.counter = 1_000;
        seq.handle_capture(&mut timer);
        assert_eq!(seq.state(), SequencerState::Collecting);
        assert!(seq.samples().is_none());

        timer.counter = 2_000;
        seq.handle_capture(&mut timer);
        assert_eq!(seq.state(), SequencerState::Collecting);

        timer.counter = 3_000;
        seq.handle_capture(&mut timer);
        assert_eq!(seq.state(), SequencerState::Complete);
        assert!(!timer.capturing, "capture events must stop at Complete");
        assert_eq!(seq.samples(), Some(&[1_000, 2_000, 3_000][..]));
    }

    #[test]
    fn arm_fails_when_timer_busy() {
        let mut timer = FakeTimer::new();
        timer.ready = false;

        let mut seq = SampleSequencer::new();
        assert_eq!(seq.arm(&mut timer), Err(Error::TimerNotReady));
        assert_eq!(seq.state(), SequencerState::Failed);
    }

    #[test]
    fn arm_surfaces_timer_error() {
        let mut timer = FakeTimer::new();
        timer.refuse_start = true;

        let mut seq = SampleSequencer::new();
        assert_eq!(seq.arm(&mut timer), Err(Error::Timer(0xE1)));
        assert_eq!(seq.state(), SequencerState::Failed);
    }

    #[test]
    fn spurious_captures_do_not_disturb_buffer() {
        let mut timer = FakeTimer::new();
        let mut seq = SampleSequencer::new();

        // Before arming.
        seq.handle_capture(&mut timer);
        assert_eq!(seq.state(), SequencerState::Idle);

        seq.arm(&mut timer).unwrap();
        for n in 0..MAX_TIMER_SAMPLES {
            timer.counter = (n as u32 + 1) * 500;
            seq.handle_capture(&mut timer);
        }
        assert!(seq.is_complete());

        // After completion.
        timer.counter = 9_999;
        seq.handle_capture(&mut timer);
        assert_eq!(seq.samples(), Some(&[500, 1_000, 1_500][..]));
    }

    #[test]
    fn rearm_clears_previous_cycle() {
        let mut timer = FakeTimer::new();
        let mut seq = SampleSequencer::new();

        seq.arm(&mut timer).unwrap();
        for n in 0..MAX_TIMER_SAMPLES {
            timer.counter = n as u32;
            seq.handle_capture(&mut timer);
        }
        assert!(seq.is_complete());

        seq.arm(&mut timer).unwrap();
        assert_eq!(seq.state(), SequencerState::Arming);
        assert!(seq.samples().is_none());
    }
}
