//! Tag controller on one side, scanner on the other

use medtag_core::{
    traits::{Acceleration, SampleSource},
    AdvertisingController, Broadcast, DeviceIdentity, FrameFormat, TagConfig,
};
use medtag_scanner::{Scanner, ScannerError, Sighting, TagReport};
use pretty_assertions::assert_eq;

const MAC: [u8; 6] = [0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2];

struct Bench {
    celsius: f32,
}

impl SampleSource for Bench {
    fn read_temperature(&mut self) -> f32 {
        self.celsius
    }

    fn read_voltage(&mut self) -> f32 {
        3912.0
    }

    fn read_acceleration(&mut self) -> Acceleration {
        Acceleration::new(0.0, 0.0, 1.0)
    }
}

fn first_broadcast(config: TagConfig) -> (AdvertisingController, Bench, Broadcast) {
    let mut bench = Bench { celsius: 4.5 };
    let mut controller = AdvertisingController::boot(DeviceIdentity::new(MAC), config, 0, &mut bench);
    let broadcast = controller.tick(1, &mut bench).expect("boot broadcast");
    (controller, bench, broadcast)
}

#[test]
fn scan_response_becomes_json_report() {
    let (_, _, broadcast) = first_broadcast(TagConfig::default());
    let mut scanner = Scanner::new();

    // The receiver sees the tag under a random address; the frame knows better
    let random = DeviceIdentity::new([0xC0, 0, 0, 0, 0, 1]);
    let sighting = Sighting::from_ad_structures(random, broadcast.scan_response.as_bytes());
    let report = scanner.observe(&sighting).unwrap().unwrap();

    assert_eq!(
        report.to_json().unwrap(),
        r#"{"mac":"4C:75:25:CB:80:A2","medicine":"PANADOL","temperature":4.5,"battery":76,"moving":false,"sequence_number":0}"#
    );

    let parsed: TagReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn stripped_company_id_is_accepted() {
    let (_, _, broadcast) = first_broadcast(TagConfig::default());
    let mut scanner = Scanner::new();

    let sighting = Sighting {
        address: DeviceIdentity::new(MAC),
        local_name: Some("MED_TAG"),
        manufacturer_data: Some(&broadcast.frame[2..]),
    };
    let report = scanner.observe(&sighting).unwrap().unwrap();
    assert_eq!(report.medicine.as_deref(), Some("PANADOL"));
    assert_eq!(report.sequence_number, Some(0));
}

#[test]
fn repeats_are_dropped_until_the_next_broadcast() {
    let (mut controller, mut bench, first) = first_broadcast(TagConfig::default());
    let mut scanner = Scanner::new();

    let seen = |scanner: &mut Scanner, broadcast: &Broadcast| {
        let sighting = Sighting::from_ad_structures(DeviceIdentity::new(MAC), broadcast.scan_response.as_bytes());
        scanner.observe(&sighting).unwrap()
    };

    assert!(seen(&mut scanner, &first).is_some());
    assert!(seen(&mut scanner, &first).is_none());

    bench.celsius = 8.0;
    let second = controller.tick(30_000, &mut bench).unwrap();
    let report = seen(&mut scanner, &second).unwrap();
    assert_eq!(report.temperature, Some(8.0));
    assert_eq!(report.sequence_number, Some(1));
    assert_eq!(scanner.filter().last_sequence("4C:75:25:CB:80:A2"), Some(1));
}

#[test]
fn name_format_reports_without_label() {
    let config = TagConfig::default().with_format(FrameFormat::NameEmbedded);
    let (_, _, broadcast) = first_broadcast(config);
    let mut scanner = Scanner::new();

    let sighting = Sighting::from_ad_structures(DeviceIdentity::new(MAC), broadcast.advertisement.as_bytes());
    assert_eq!(sighting.local_name, Some("MT450_76_0"));

    let report = scanner.observe(&sighting).unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "mac": "4C:75:25:CB:80:A2",
            "temperature": 4.5,
            "battery": 76,
            "sequence_number": 0,
        })
    );
}

#[test]
fn plain_advertisement_is_not_a_report() {
    let (_, _, broadcast) = first_broadcast(TagConfig::default());
    let mut scanner = Scanner::new();

    // Flags and "MED_TAG" only; the frame is in the scan response
    let sighting = Sighting::from_ad_structures(DeviceIdentity::new(MAC), broadcast.advertisement.as_bytes());
    assert_eq!(scanner.observe(&sighting), Err(ScannerError::NotATag));
}

#[test]
fn tag_config_loads_from_json() {
    let mut value = serde_json::to_value(TagConfig::default()).unwrap();
    value["format"] = serde_json::json!("NameEmbedded");
    value["intervals"]["idle_ms"] = serde_json::json!(2_000);

    let config: TagConfig = serde_json::from_value(value).unwrap();
    assert_eq!(config.format, FrameFormat::NameEmbedded);
    assert_eq!(config.intervals.idle_ms, 2_000);
    assert_eq!(config.device_name.as_str(), "MED_TAG");
    assert_eq!(config.temperature, TagConfig::default().temperature);
}

#[test]
fn scanner_follows_configured_company_id() {
    let config = TagConfig { company_id: 0x0059, ..TagConfig::default() };
    let (_, _, broadcast) = first_broadcast(config);
    let sighting = Sighting::from_ad_structures(DeviceIdentity::new(MAC), broadcast.scan_response.as_bytes());

    assert!(Scanner::new().observe(&sighting).is_err());

    let mut scanner = Scanner::with_company(0x0059);
    assert_eq!(scanner.company_id(), 0x0059);
    let report = scanner.observe(&sighting).unwrap().unwrap();
    assert_eq!(report.medicine.as_deref(), Some("PANADOL"));
    assert_eq!(report.sequence_number, Some(0));
}
