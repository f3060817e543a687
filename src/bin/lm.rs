//! `lm` - send one command line to a light manager
//!
//! ```text
//! lm on a 1
//! lm --host 127.0.0.1:2323 log
//! ```
//!
//! The words are joined with single spaces and sent as one line. Whatever
//! the controller answers before the timeout is printed to stdout.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

/// Extra wait after a switch command, which blocks the controller for a burst
const REPLY_GRACE_MS: u64 = 500;

#[derive(Parser)]
#[command(name = "lm", about = "Send a command to a light manager controller")]
struct Args {
    /// Controller address
    #[arg(short = 'H', long, default_value = "192.168.1.7:23")]
    host: String,

    /// Connect and reply timeout in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Command and arguments, e.g. `on a 1`
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn resolve(host: &str) -> io::Result<SocketAddr> {
    host.to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no address for host"))
}

/// Send `line` and collect the reply until the peer goes quiet
fn exchange(addr: SocketAddr, line: &str, timeout: Duration) -> io::Result<String> {
    let mut stream = TcpStream::connect_timeout(&addr, timeout)?;
    stream.set_nodelay(true)?;
    stream.write_all(line.as_bytes())?;
    stream.flush()?;

    stream.set_read_timeout(Some(timeout + Duration::from_millis(REPLY_GRACE_MS)))?;
    let mut reply = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                reply.extend_from_slice(&chunk[..n]);
                // Once something arrived, only wait briefly for the rest.
                stream.set_read_timeout(Some(Duration::from_millis(100)))?;
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => break,
            Err(e) => return Err(e),
        }
    }

    Ok(String::from_utf8_lossy(&reply).into_owned())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.command.is_empty() {
        eprintln!("lm: no command to send");
        return ExitCode::FAILURE;
    }

    let mut line = args.command.join(" ");
    line.push('\n');

    let timeout = Duration::from_millis(args.timeout_ms);
    let addr = match resolve(&args.host) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("lm: could not resolve {}: {e}", args.host);
            return ExitCode::FAILURE;
        }
    };

    log::debug!("sending {:?} to {}", line.trim_end(), addr);
    match exchange(addr, &line, timeout) {
        Ok(reply) => {
            print!("{reply}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("lm: could not connect to {addr}: {e}");
            ExitCode::FAILURE
        }
    }
}
