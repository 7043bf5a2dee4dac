//! Simulated control loop.
//!
//! Runs the awning device against in-memory relay pins and a simulated clock:
//! open to 60 %, a gust of wind, then a manual long press.
//!
//! Run with: `cargo run --example simulated_loop`

use std::cell::Cell;
use std::rc::Rc;

use awning_control::{
    parse_config, AwningDevice, ButtonAction, Command, DeviceInputs, Millis, PinRelays, Result,
    TimeSource,
};

const CONFIG: &str = r#"
[awning]
travel_time_ms = 12000
position_percent = 0.0
wind_threshold_ppm = 150

[timing]
wind_window_ms = 10000
"#;

/// Relay pin that prints its transitions.
struct LoggingPin {
    name: &'static str,
    state: bool,
}

impl LoggingPin {
    fn new(name: &'static str) -> Self {
        Self { name, state: false }
    }
}

impl embedded_hal::digital::ErrorType for LoggingPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for LoggingPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        if !self.state {
            println!("    {} relay ON", self.name);
        }
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        if self.state {
            println!("    {} relay OFF", self.name);
        }
        self.state = false;
        Ok(())
    }
}

/// Millisecond clock advanced by the delay it hands out.
#[derive(Clone, Default)]
struct SimClock {
    ms: Rc<Cell<u32>>,
}

impl SimClock {
    fn advance(&self, ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(ms));
    }
}

impl TimeSource for SimClock {
    fn now(&self) -> Millis {
        Millis(self.ms.get())
    }
}

impl embedded_hal::delay::DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

fn main() -> Result<()> {
    println!("=== Simulated Awning Loop ===\n");

    let config = parse_config(CONFIG)?;
    let clock = SimClock::default();
    let relays = PinRelays::new(LoggingPin::new("extend"), LoggingPin::new("retract"))?;

    let mut device = AwningDevice::builder()
        .from_config(&config)?
        .pulse_motor(relays, clock.clone(), clock.clone())
        .build()?;

    // Anemometer pulses counted since boot.
    let mut wind_total: u32 = 0;

    for step in 0..400u32 {
        let mut inputs = DeviceInputs::default();

        match step {
            1 => {
                println!("[{:>6} ms] command: move to 60 %", clock.now().value());
                inputs.command = Some(Command::SetPosition(60.0));
            }
            150 => println!("[{:>6} ms] gust starts", clock.now().value()),
            300 => {
                println!("[{:>6} ms] long press on extend", clock.now().value());
                inputs.extend_button = ButtonAction::LongPress;
            }
            320 => {
                println!("[{:>6} ms] short press, stop", clock.now().value());
                inputs.retract_button = ButtonAction::ShortPress;
            }
            _ => {}
        }

        // Calm air gives 1 pulse every 10 ticks (60/min), the gust 5 per tick.
        let pulses = if (150..250).contains(&step) {
            5
        } else {
            u32::from(step % 10 == 0)
        };
        wind_total = wind_total.wrapping_add(pulses);
        inputs.wind_pulses = Some(wind_total);

        let outcome = device.poll(clock.now(), inputs);

        if outcome.wind_retract {
            println!(
                "[{:>6} ms] wind cutoff at {} pulses/min",
                clock.now().value(),
                device.wind().pulses_per_minute()
            );
        }

        if outcome.persist {
            let snapshot = device.snapshot();
            println!(
                "[{:>6} ms] {} at {:.1} %, saving (travel {} ms, wind {} ppm)",
                clock.now().value(),
                outcome.state.name(),
                snapshot.position,
                snapshot.travel_time_ms,
                snapshot.wind_threshold
            );
        }

        clock.advance(100);
    }

    println!("\nFinal position: {:.1} %", device.awning().current_position());
    Ok(())
}
