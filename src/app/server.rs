use crate::cli::Args;
use crate::config::GatewayConfig;
use crate::logging::setup_logging;
use crate::mcp::MCPServer;
use crate::tools::ToolGateway;
use anyhow::Result;
use tracing::info;

pub async fn run(args: Args) -> Result<()> {
    setup_logging(args.verbose);

    let config = GatewayConfig::load(&args)?;
    info!(
        "Sending as {} via {:?} transport",
        config.sender, args.transport
    );
    let transport = config.build_transport()?;

    let mut server = MCPServer::new(ToolGateway::new(transport, config.sender));
    server.run().await
}
