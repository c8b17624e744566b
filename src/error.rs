/// Errors reported by the humidity reader.
///
/// Every fallible operation returns one of these statuses; the driver
/// never panics and never blocks waiting for the hardware. `TimerNotReady`
/// in particular is expected during normal operation and means "poll again
/// on a later cycle", not that anything is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<TimerError> {
    /// The capture sequence has not completed yet, or the timer peripheral
    /// reported busy. Retry on a later foreground cycle.
    TimerNotReady,
    /// The interpolated %RH fell below the configured plausibility band,
    /// suggesting a hardware fault rather than genuinely dry air.
    ReadingTooLow,
    /// The interpolated %RH rose above the configured plausibility band,
    /// suggesting a hardware fault rather than saturation.
    ReadingTooHigh,
    /// Error reported by the timer peripheral.
    Timer(TimerError),
}

impl<TimerError> From<TimerError> for Error<TimerError> {
    fn from(value: TimerError) -> Self {
        Error::Timer(value)
    }
}

impl<TimerError> core::fmt::Display for Error<TimerError>
where
    TimerError: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::TimerNotReady => write!(f, "capture timer not ready"),
            Error::ReadingTooLow => write!(f, "humidity reading below plausible band"),
            Error::ReadingTooHigh => write!(f, "humidity reading above plausible band"),
            Error::Timer(e) => write!(f, "timer peripheral error: {:?}", e),
        }
    }
}

impl<T> core::error::Error for Error<T> where T: core::fmt::Debug {}

/// Combined node status as a set of fault flags.
///
/// Each failing sensor sets its own bit, so simultaneous temperature and
/// humidity faults are both visible to the control panel.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFaults(u8);

impl SensorFaults {
    /// No faults recorded.
    pub const ALL_OK: Self = Self(0);
    /// The temperature collaborator failed to produce a reading.
    pub const TEMP_SENSOR_FAIL: Self = Self(1 << 0);
    /// The humidity pipeline failed to produce a plausible reading.
    pub const HUM_SENSOR_FAIL: Self = Self(1 << 1);

    pub const fn is_all_ok(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl core::ops::BitOr for SensorFaults {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for SensorFaults {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
