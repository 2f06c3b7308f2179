use clap::{Parser, ValueEnum};

/// Which mail transport delivers `send_email` messages
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Deliver through the SMTP relay configured in the environment
    Smtp,
}

/// MCP server exposing send_email and draft_email over stdio
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Mail transport to use
    #[arg(long, value_enum, default_value_t = TransportKind::Mock)]
    pub transport: TransportKind,

    /// Sender address, takes precedence over EMAIL_FROM
    #[arg(long)]
    pub from: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }
}
