//! Canned sensor scripts and a loop driver

use medtag_core::{
    time::Timestamp, traits::Advertiser, AdvertisingController, Broadcast, DeviceIdentity, TagConfig,
};

use super::{ScriptedSource, Step, AT_REST, MAC, SHAKEN};

/// Picked up at 5 s, carried for 3 s, put back on the shelf
pub fn carried_then_shelved() -> ScriptedSource {
    ScriptedSource::new()
        .at(5_000, Step::Acceleration(SHAKEN))
        .at(8_000, Step::Acceleration(AT_REST))
}

/// Probe stops answering after the first period, then recovers warmer
pub fn flaky_probe() -> ScriptedSource {
    ScriptedSource::new()
        .at(20_000, Step::Temperature(f32::NAN))
        .at(70_000, Step::Temperature(37.2))
}

/// Cell sagging from full to empty, reported in millivolts
pub fn discharging() -> ScriptedSource {
    ScriptedSource::with_readings(36.55, 4200.0, AT_REST)
        .at(15_000, Step::Voltage(3900.0))
        .at(25_000, Step::Voltage(3000.0))
}

/// Controller booted at tick 0 with `config`
pub fn boot(config: TagConfig, source: &mut ScriptedSource) -> AdvertisingController {
    AdvertisingController::boot(DeviceIdentity::new(MAC), config, source.advance_to(0), source)
}

/// Tick every `step_ms` from `from` up to and including `until`, pushing
/// each broadcast to `radio`
pub fn drive<A: Advertiser>(
    controller: &mut AdvertisingController,
    source: &mut ScriptedSource,
    radio: &mut A,
    from: Timestamp,
    until: Timestamp,
    step_ms: u32,
) -> Vec<Broadcast> {
    let mut broadcasts = Vec::new();
    let mut now = from;
    while now <= until {
        let tick = source.advance_to(now);
        if let Some(broadcast) = controller.run(tick, source, radio) {
            broadcasts.push(broadcast);
        }
        now += step_ms;
    }
    broadcasts
}
