use clap::Parser;

/// The terminal client: `nuggets-client hostname port [player-name]`.
#[derive(Clone, Debug, Parser)]
pub struct ClientOptions {
    /// Server host name or address.
    pub hostname: String,

    /// Server port.
    pub port: u16,

    /// Join as this player; spectate when omitted.
    pub player_name: Option<String>,

    #[arg(short, long)]
    pub log_level: Option<String>,
}
