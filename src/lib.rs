//! Driver for frequency-output relative humidity sensors (HS1101 family)
//! measured through a timer's external-trigger input capture.
//!
//! A measurement cycle captures three free-running counter values, one per
//! oscillator edge, from interrupt context; the foreground loop polls for
//! the completed cycle, recovers the oscillator frequency from the
//! wraparound-safe tick deltas and interpolates it to %RH through the
//! sensor's characterisation table. [`node::SensorNode`] combines the
//! result with an external temperature source into a per-sensor fault
//! bitmask for reporting.
//!
//! The hardware seams are [`capture::CaptureTimer`] and
//! [`node::TemperatureSensor`]; board bring-up, CAN transport and the
//! outer polling loop stay with the integrator.

#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod conversions;
pub mod error;
pub mod hs1101;
pub mod node;
pub mod types;
