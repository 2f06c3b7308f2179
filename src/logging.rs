use std::io;
use tracing_subscriber::EnvFilter;

/// Log to stderr only, stdout carries JSON-RPC
pub fn setup_logging(verbose_level: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let filter_str = match verbose_level {
            0 => "warn,email_gateway=info,mail_transport=info",
            1 => "info,email_gateway=debug,mail_transport=debug",
            _ => "debug,email_gateway=trace,mail_transport=trace",
        };
        EnvFilter::new(filter_str)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
