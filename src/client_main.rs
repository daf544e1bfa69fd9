use clap::Parser;
use flexi_logger::{Logger, WriteMode};
use lib_nuggets::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment. Logs share stderr
    // with the terminal UI; redirect with 2> to keep them.
    dotenvy::dotenv().ok();
    let options = ClientOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("warn".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .start()?;

    // Join and play until the server says QUIT.
    let mut client = GameClient::new(options)?;
    client.run()
}
