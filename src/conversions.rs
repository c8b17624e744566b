//! Oscillator frequency to percent relative humidity.
//!
//! The HS1101's capacitance rises with humidity, so the frequency of the
//! 555-style oscillator built around it falls as humidity rises. The
//! characterisation table below maps each 5 %RH step to the oscillator
//! frequency observed at that humidity; measured frequencies are converted
//! back to %RH by linear interpolation between the two bracketing entries.
//!
//! The conversion in the root of this module works with and returns `f32`s.
//! If you prefer to work with fixed- rather than floating-point numbers,
//! use the `fixed` feature and the [`fixed_point`] submodule.

/// Number of entries in the frequency lookup table.
pub const FREQ_LUT_SIZE: usize = 21;

/// %RH spacing between adjacent table entries.
pub const FREQ_LUT_INTERVAL: f32 = 5.0;

/// Marker for table entries outside the sensor's measurable band.
const SENTINEL: f32 = -1.0;

/// `(percent RH, oscillator frequency in Hz)` for each 5 %RH step.
///
/// Frequency strictly decreases as %RH increases. The characterisation
/// data stops at 85 %RH; the remaining entries carry the sentinel and any
/// frequency below the 85 %RH value is reported as fully saturated.
const FREQ_LUT: [(f32, f32); FREQ_LUT_SIZE] = [
    (0.0, 7155.0),
    (5.0, 7080.0),
    (10.0, 7010.0),
    (15.0, 6945.0),
    (20.0, 6880.0),
    (25.0, 6820.0),
    (30.0, 6760.0),
    (35.0, 6705.0),
    (40.0, 6650.0),
    (45.0, 6600.0),
    (50.0, 6550.0),
    (55.0, 6500.0),
    (60.0, 6450.0),
    (65.0, 6400.0),
    (70.0, 6355.0),
    (75.0, 6305.0),
    (80.0, 6260.0),
    (85.0, 6210.0),
    (90.0, SENTINEL),
    (95.0, SENTINEL),
    (100.0, SENTINEL),
];

/// Table entries with a real frequency, in decreasing frequency order.
fn measurable_entries() -> &'static [(f32, f32)] {
    let real = FREQ_LUT.iter().take_while(|(_, f)| *f != SENTINEL).count();
    &FREQ_LUT[..real]
}

/// Convert a measured oscillator frequency to percent relative humidity.
///
/// Frequencies above the driest table entry clamp to 0 %RH, and
/// frequencies below the wettest entry clamp to 100 %RH (the sentinel
/// region of the table, where the sensor reads as saturated). Exact table
/// frequencies convert without interpolation error.
pub fn frequency_to_percent_rh(freq_hz: f32) -> f32 {
    let lut = measurable_entries();
    let (driest_rh, highest_freq) = lut[0];
    let (_, lowest_freq) = lut[lut.len() - 1];

    if freq_hz > highest_freq {
        return driest_rh;
    }
    if freq_hz < lowest_freq {
        return 100.0;
    }

    for pair in lut.windows(2) {
        let (rh_lo, freq_hi) = pair[0];
        let (rh_hi, freq_lo) = pair[1];
        if freq_hz <= freq_hi && freq_hz >= freq_lo {
            if freq_hi == freq_lo {
                // Duplicate adjacent frequencies would divide by zero;
                // treat the bracket as a clamping boundary instead.
                return rh_lo;
            }
            return rh_lo + (freq_hz - freq_hi) * (rh_hi - rh_lo) / (freq_lo - freq_hi);
        }
    }

    // Only reachable for NaN input, which matches no bracket.
    driest_rh
}

/// Fixed-point conversion from oscillator frequency to %RH.
///
/// Same table and interpolation as the parent module, operating on
/// `I16F16` values. The table frequencies and %RH steps are exactly
/// representable with 16 fractional bits, so results at the table knots
/// are exact here too.
#[cfg(feature = "fixed")]
pub mod fixed_point {
    use fixed::types::I16F16;

    use super::measurable_entries;

    /// Convert a measured oscillator frequency to percent relative humidity.
    pub fn frequency_to_percent_rh(freq_hz: I16F16) -> I16F16 {
        let lut = measurable_entries();
        let (driest_rh, highest_freq) = lut[0];
        let (_, lowest_freq) = lut[lut.len() - 1];

        if freq_hz > I16F16::from_num(highest_freq) {
            return I16F16::from_num(driest_rh);
        }
        if freq_hz < I16F16::from_num(lowest_freq) {
            return I16F16::from_num(100);
        }

        for pair in lut.windows(2) {
            let rh_lo = I16F16::from_num(pair[0].0);
            let freq_hi = I16F16::from_num(pair[0].1);
            let rh_hi = I16F16::from_num(pair[1].0);
            let freq_lo = I16F16::from_num(pair[1].1);
            if freq_hz <= freq_hi && freq_hz >= freq_lo {
                if freq_hi == freq_lo {
                    return rh_lo;
                }
                return rh_lo + (freq_hz - freq_hi) * (rh_hi - rh_lo) / (freq_lo - freq_hi);
            }
        }

        I16F16::from_num(driest_rh)
    }
}
