//! Full pipeline through the public API: arm, capture interrupts, poll,
//! aggregate — the shape of the node's foreground loop.

use std::cell::Cell;
use std::rc::Rc;

use hs1101_capture::capture::CaptureTimer;
use hs1101_capture::error::SensorFaults;
use hs1101_capture::hs1101::Hs1101;
use hs1101_capture::node::{SensorNode, TemperatureSensor};
use hs1101_capture::types::Config;

/// Capture timer fed by a shared counter handle, so the test can stand in
/// for the external oscillator between interrupts.
struct FakeTimer {
    counter: Rc<Cell<u32>>,
}

impl CaptureTimer for FakeTimer {
    type Error = ();

    fn start_capture(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn stop_capture(&mut self) {}

    fn counter(&self) -> u32 {
        self.counter.get()
    }

    fn is_ready(&self) -> bool {
        true
    }
}

struct ConstTemperature(f32);

impl TemperatureSensor for ConstTemperature {
    type Error = ();

    fn read_temperature(&mut self) -> Result<f32, ()> {
        Ok(self.0)
    }
}

#[test]
fn measurement_cycles_through_the_node() {
    let counter = Rc::new(Cell::new(0xFFFF_FB00_u32));
    let timer = FakeTimer {
        counter: Rc::clone(&counter),
    };

    // 6_977_500 Hz clock over 1_000-tick edges: a 6977.5 Hz oscillator,
    // midway between the 10 % and 15 % knots of the table.
    let config = Config {
        timer_clock_hz: 6_977_500,
        ..Config::default()
    };
    let mut node = SensorNode::new(Hs1101::new(timer, config), ConstTemperature(24.6));

    node.arm().unwrap();

    // Polling before any edges arrived reports a humidity fault and
    // leaves the cycle running.
    let (readings, faults) = node.read_sensors();
    assert_eq!(faults, SensorFaults::HUM_SENSOR_FAIL);
    assert_eq!(readings.temperature, Some(24.6));
    assert_eq!(readings.relative_humidity, None);

    // Three oscillator edges, crossing the counter wrap mid-cycle.
    for _ in 0..3 {
        node.on_capture();
        counter.set(counter.get().wrapping_add(1_000));
    }

    let (readings, faults) = node.read_sensors();
    assert!(faults.is_all_ok());
    assert_eq!(readings.temperature, Some(24.6));
    assert_eq!(readings.relative_humidity, Some(12.5));

    // The successful read re-armed the sequencer: the next poll is not
    // ready yet, and the next three edges produce a fresh reading.
    let (_, faults) = node.read_sensors();
    assert_eq!(faults, SensorFaults::HUM_SENSOR_FAIL);

    for _ in 0..3 {
        node.on_capture();
        counter.set(counter.get().wrapping_add(1_000));
    }

    let (readings, faults) = node.read_sensors();
    assert!(faults.is_all_ok());
    assert_eq!(readings.relative_humidity, Some(12.5));
}
