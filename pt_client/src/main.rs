use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use pokerth_proto::{Client, ClientProtocol, HaltAlways, ReconnectOnLoss};
use pt_client::{BotConfig, CheckCallBot};

const HELP: &str = "\
Run a check/call bot against a PokerTH server

USAGE:
  pt_client [OPTIONS]

OPTIONS:
  --server     HOST:PORT   Server address        [default: env POKERTH_SERVER or 127.0.0.1:7234]
  --nick       NAME        Nickname              [default: env POKERTH_NICKNAME or RustBot]
  --game       NAME        Game to join/create   [default: env POKERTH_GAME_NAME or \"Bots only\"]

FLAGS:
  -h, --help               Print help information
  --once                   Do not reconnect after the server drops the connection

ENVIRONMENT:
  POKERTH_SERVER                 Server address
  POKERTH_NICKNAME               Nickname, a random number is appended
  POKERTH_RANDOM_SUFFIX          Set to false to use the nickname as is
  POKERTH_GAME_NAME              Game to join or create
  POKERTH_LOBBY_DELAY_MS         Delay before acting in the lobby
  POKERTH_END_OF_GAME_DELAY_MS   Delay before reacting to the end of a game
  POKERTH_RECONNECT              Set to false to stop after the first connection
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

    let once = pargs.contains("--once");
    let mut config = BotConfig::from_env(
        pargs.opt_value_from_str("--server")?,
        pargs.opt_value_from_str("--nick")?,
        pargs.opt_value_from_str("--game")?,
    )?;
    if once {
        config.reconnect = false;
    }
    config.validate()?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let protocol_config = config.protocol_config();
    info!(
        "Connecting to {} as {} for game {:?}",
        config.server, protocol_config.nickname, config.game_name
    );
    let protocol = ClientProtocol::new(protocol_config, CheckCallBot::new(config.game_name));

    if config.reconnect {
        let mut client = Client::new(config.server, protocol, ReconnectOnLoss::default());
        client.run().await?;
    } else {
        let mut client = Client::new(config.server, protocol, HaltAlways);
        client.run().await?;
    }

    Ok(())
}
