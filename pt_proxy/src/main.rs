use std::net::SocketAddr;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;
use pt_proxy::{ProxyConfig, logging};

const HELP: &str = "\
Relay PokerTH clients to a server and log every message

USAGE:
  pt_proxy [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Address clients connect to      [default: env PROXY_BIND or 127.0.0.1:1234]
  --upstream   HOST:PORT   PokerTH server to relay to      [default: env PROXY_UPSTREAM or 127.0.0.1:7234]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  PROXY_BIND               Proxy bind address
  PROXY_UPSTREAM           PokerTH server address
  RUST_LOG                 Log filter (e.g., debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let upstream: Option<String> = pargs.opt_value_from_str("--upstream")?;
    let config = ProxyConfig::from_env(bind, upstream)?;
    config.validate()?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init()?;
    pt_proxy::run(&config).await
}
