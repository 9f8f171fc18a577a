//! Simulated Tag
//!
//! Runs the control loop for one minute of simulated time against a fake
//! board that gets picked up, carried and put down, and prints every
//! broadcast the tag would send.
//!
//! ```bash
//! cargo run --example simulated_tag
//! ```

use medtag_core::{
    traits::{Acceleration, Advertiser, SampleSource},
    AdvertisingController, DeviceIdentity, TagConfig,
};

struct Board {
    now: u32,
}

impl SampleSource for Board {
    fn read_temperature(&mut self) -> f32 {
        // Slow warm-up after leaving the fridge
        4.0 + self.now as f32 / 4_000.0
    }

    fn read_voltage(&mut self) -> f32 {
        3950.0
    }

    fn read_acceleration(&mut self) -> Acceleration {
        if (5_000..9_000).contains(&self.now) {
            Acceleration::new(0.4, 0.8, 1.1)
        } else {
            Acceleration::new(0.0, 0.0, 1.0)
        }
    }
}

struct ConsoleRadio;

impl Advertiser for ConsoleRadio {
    type Error = ();

    fn stop(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn set_advertisement_data(&mut self, data: &[u8]) -> Result<(), ()> {
        println!("    adv  {:02X?}", data);
        Ok(())
    }

    fn set_scan_response_data(&mut self, data: &[u8]) -> Result<(), ()> {
        println!("    scan {:02X?}", data);
        Ok(())
    }

    fn set_interval(&mut self, min_units: u16, _max_units: u16) -> Result<(), ()> {
        println!("    interval {} units ({} ms)", min_units, min_units as u32 * 625 / 1000);
        Ok(())
    }

    fn start(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

fn main() {
    println!("MedTag Simulated Tag");
    println!("====================\n");

    let mut board = Board { now: 0 };
    let mut radio = ConsoleRadio;
    let identity = DeviceIdentity::new([0x4C, 0x75, 0x25, 0xCB, 0x80, 0xA2]);
    let mut controller = AdvertisingController::boot(identity, TagConfig::default(), 0, &mut board);

    for now in (0..=60_000).step_by(50) {
        board.now = now;
        if now == 20_000 {
            // Nurse presses the button
            controller.toggle_label();
        }

        if let Some(broadcast) = controller.run(now, &mut board, &mut radio) {
            println!("[{:>6} ms] {} every {} units", now, controller.state().status(), broadcast.interval_units);
        }
    }
}
