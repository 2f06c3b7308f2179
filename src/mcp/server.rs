use crate::mcp::handler::MessageHandler;
use crate::tools::ToolGateway;
use anyhow::Result;
use std::future::Future;
use tokio::io::{stdin, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, trace, warn};

pub struct MCPServer {
    handler: MessageHandler,
}

impl MCPServer {
    pub fn new(gateway: ToolGateway) -> Self {
        Self {
            handler: MessageHandler::new(gateway, tokio::io::stdout()),
        }
    }

    #[cfg(test)]
    pub fn with_handler(handler: MessageHandler) -> Self {
        Self { handler }
    }

    /// Serve stdio until EOF or Ctrl-C
    pub async fn run(&mut self) -> Result<()> {
        info!("Email MCP Server running on stdio");

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for interrupt: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Interrupt received");
        };
        self.serve(BufReader::new(stdin()), shutdown).await
    }

    /// Handle one message per line from `reader` until it ends or `shutdown`
    /// resolves, then close the server. Lines that are not UTF-8 are skipped.
    pub async fn serve<R, F>(&mut self, mut reader: R, shutdown: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut buf = Vec::new();
        let mut outcome = Ok(());

        loop {
            buf.clear();
            let read = tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => read,
                _ = &mut shutdown => break,
            };
            match read {
                Ok(0) => break, // EOF
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to read from input: {}", e);
                    outcome = Err(anyhow::Error::new(e).context("Failed to read from input"));
                    break;
                }
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping input line that is not valid UTF-8: {}", e);
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            trace!("Received message: {}", trimmed);

            match self.handler.handle_message(trimmed).await {
                Ok(()) => {
                    trace!("Message processed successfully");
                }
                Err(e) => {
                    error!("Error handling message: {}", e);
                }
            }
        }

        let closed = self.close().await;
        outcome.and(closed)
    }

    pub async fn close(&mut self) -> Result<()> {
        debug!("MCP server shutting down");
        self.handler.close().await
    }
}
