//! Light manager host simulator
//!
//! Runs the command session and transmitter on a desktop. The transmitter
//! pin is simulated and traced at `trace` level; connect with
//! `telnet <host> <port>` or the `lm` client.

use std::error::Error;
use std::thread;
use std::time::Duration;

use clap::Parser;

use lightmgr::hal::host::{SpinDelay, TcpPeerListener, TracePin};
use lightmgr::prelude::*;

#[derive(Parser)]
#[command(
    name = "lightmgr-host",
    about = "Telnet-controlled 433 MHz socket switch, simulated on the host"
)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value_t = format!("0.0.0.0:{TELNET_PORT}"))]
    bind: String,

    /// Width of one timing unit in microseconds
    #[arg(long, default_value_t = PULSE_WIDTH_US)]
    pulse_width_us: u32,

    /// Frames per burst
    #[arg(short, long, default_value_t = NUM_TRANSMITS)]
    repeats: u8,

    /// Idle sleep between polls in milliseconds
    #[arg(long, default_value_t = POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = TransmitterConfig {
        pulse_width_us: args.pulse_width_us,
        repeats: args.repeats,
    };
    let transmitter = Transmitter::with_config(TracePin::new(), SpinDelay, config);
    let mut controller: Controller<TracePin, SpinDelay> = Controller::new(transmitter);

    let listener = TcpPeerListener::bind(args.bind.as_str())?;
    log::info!(
        "listening on {} ({} us units, {} repeats, {} ms per burst)",
        listener.local_addr()?,
        config.pulse_width_us,
        config.repeats,
        config.burst_duration_us() / 1000
    );

    let mut session: Session<'static, _, _> = Session::new(listener);
    register_commands(&mut session)?;
    controller.log_mut().info(format_args!("controller started"));

    let idle = Duration::from_millis(args.poll_interval_ms);
    loop {
        session.poll(&mut controller);
        thread::sleep(idle);
    }
}
