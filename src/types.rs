/// Driver configuration.
///
/// The defaults match the reference board: a 48 MHz timer input clock and
/// a plausibility band spanning the whole physical %RH range (so no
/// reading is rejected as implausible until the band is narrowed).
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Timer input clock in Hz. Tick deltas between capture events divide
    /// this rate to recover the oscillator frequency.
    pub timer_clock_hz: u32,
    /// Readings below this %RH are rejected as [`ReadingTooLow`].
    ///
    /// [`ReadingTooLow`]: crate::error::Error::ReadingTooLow
    pub min_plausible_rh: f32,
    /// Readings above this %RH are rejected as [`ReadingTooHigh`].
    ///
    /// [`ReadingTooHigh`]: crate::error::Error::ReadingTooHigh
    pub max_plausible_rh: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer_clock_hz: 48_000_000,
            min_plausible_rh: 0.0,
            max_plausible_rh: 100.0,
        }
    }
}
