//! Sensor node aggregation.
//!
//! The node pairs the humidity pipeline with an externally supplied
//! temperature source and folds both outcomes into a single fault bitmask
//! for the control panel. Temperature acquisition itself (ADC scaling,
//! reference voltages) lives behind [`TemperatureSensor`]; this module
//! adds no logic beyond composition and the %RH plausibility check.

use crate::capture::CaptureTimer;
use crate::error::{Error, SensorFaults};
use crate::hs1101::Hs1101;

/// External temperature collaborator.
pub trait TemperatureSensor {
    type Error;

    /// Temperature in degrees Celsius.
    fn read_temperature(&mut self) -> Result<f32, Self::Error>;
}

/// Temperature source with a standby fallback.
///
/// The standby is consulted only when the primary fails, the way an
/// ADC-based sensor is backed by the MCU's internal temperature sensor.
/// Only a failure of both sources surfaces as an error.
pub struct FallbackTemperature<P, S> {
    primary: P,
    standby: S,
}

impl<P, S> FallbackTemperature<P, S> {
    pub fn new(primary: P, standby: S) -> Self {
        Self { primary, standby }
    }
}

impl<P, S> TemperatureSensor for FallbackTemperature<P, S>
where
    P: TemperatureSensor,
    S: TemperatureSensor,
{
    type Error = S::Error;

    fn read_temperature(&mut self) -> Result<f32, S::Error> {
        match self.primary.read_temperature() {
            Ok(celsius) => Ok(celsius),
            Err(_) => self.standby.read_temperature(),
        }
    }
}

/// Per-cycle readings from the node; a sensor that failed this cycle
/// reports `None` and sets its flag in the accompanying [`SensorFaults`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeReadings {
    /// Degrees Celsius.
    pub temperature: Option<f32>,
    /// Percent relative humidity.
    pub relative_humidity: Option<f32>,
}

/// The environmental sensor node: humidity pipeline plus temperature
/// collaborator.
pub struct SensorNode<T: CaptureTimer, S: TemperatureSensor> {
    humidity: Hs1101<T>,
    temperature: S,
}

impl<T, S> SensorNode<T, S>
where
    T: CaptureTimer,
    S: TemperatureSensor,
{
    pub fn new(humidity: Hs1101<T>, temperature: S) -> Self {
        Self {
            humidity,
            temperature,
        }
    }

    /// Start the first humidity measurement cycle. Later cycles re-arm
    /// themselves as a side effect of each successful read.
    pub fn arm(&mut self) -> Result<(), Error<T::Error>> {
        self.humidity.arm()
    }

    /// Forward one capture interrupt to the humidity pipeline.
    pub fn on_capture(&mut self) {
        self.humidity.on_capture();
    }

    /// Humidity poll with the plausibility band applied.
    ///
    /// A result outside the configured band strongly suggests a hardware
    /// fault rather than genuinely extreme air, and is reported as
    /// [`Error::ReadingTooLow`] or [`Error::ReadingTooHigh`].
    pub fn read_humidity(&mut self) -> Result<f32, Error<T::Error>> {
        let rh = self.humidity.read_humidity()?;
        if rh < self.humidity.config.min_plausible_rh {
            return Err(Error::ReadingTooLow);
        }
        if rh > self.humidity.config.max_plausible_rh {
            return Err(Error::ReadingTooHigh);
        }
        Ok(rh)
    }

    /// Read both sensors and fold the outcomes into a fault bitmask.
    pub fn read_sensors(&mut self) -> (NodeReadings, SensorFaults) {
        let mut faults = SensorFaults::ALL_OK;

        let temperature = match self.temperature.read_temperature() {
            Ok(celsius) => Some(celsius),
            Err(_) => {
                faults |= SensorFaults::TEMP_SENSOR_FAIL;
                None
            }
        };

        let relative_humidity = match self.read_humidity() {
            Ok(rh) => Some(rh),
            Err(_) => {
                faults |= SensorFaults::HUM_SENSOR_FAIL;
                None
            }
        };

        (
            NodeReadings {
                temperature,
                relative_humidity,
            },
            faults,
        )
    }
}
