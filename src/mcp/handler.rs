use super::types::*;
use crate::tools::ToolGateway;
use crate::utils::{MessageWriter, StdoutWriter};
use anyhow::Result;
use tokio::io::Stdout;
use tracing::{debug, error, info, trace};

pub const SERVER_NAME: &str = "email-mcp-server";

pub struct MessageHandler {
    gateway: ToolGateway,
    message_writer: Box<dyn MessageWriter>,
}

impl MessageHandler {
    pub fn new(gateway: ToolGateway, stdout: Stdout) -> Self {
        Self::with_writer(gateway, Box::new(StdoutWriter::new(stdout)))
    }

    pub fn with_writer(gateway: ToolGateway, message_writer: Box<dyn MessageWriter>) -> Self {
        Self {
            gateway,
            message_writer,
        }
    }

    /// Sends a JSON-RPC response
    async fn send_response<T: serde::Serialize>(&mut self, id: RequestId, result: T) -> Result<()> {
        let response = JSONRPCResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        };
        self.send_message(&serde_json::to_value(response)?).await
    }

    /// Sends a JSON-RPC error response
    async fn send_error(&mut self, id: RequestId, code: i32, message: String) -> Result<()> {
        let error = JSONRPCError {
            jsonrpc: "2.0".to_string(),
            id,
            error: ErrorObject {
                code,
                message,
                data: None,
            },
        };
        self.send_message(&serde_json::to_value(error)?).await
    }

    async fn send_message(&mut self, message: &serde_json::Value) -> Result<()> {
        let message_str = serde_json::to_string(message)?;
        debug!("Sending message: {}", message_str);
        self.message_writer.write_message(&message_str).await
    }

    async fn handle_initialize(&mut self, id: RequestId, params: InitializeParams) -> Result<()> {
        match &params.client_info {
            Some(client) => info!("Client {} {} connected", client.name, client.version),
            None => info!("Client connected without clientInfo"),
        }
        debug!(
            "Protocol {}, client capabilities: {}",
            params.protocol_version, params.capabilities
        );

        self.send_response(
            id,
            InitializeResult {
                capabilities: ServerCapabilities {
                    tools: ToolsCapability::default(),
                },
                protocol_version: params.protocol_version,
                server_info: Implementation {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        )
        .await
    }

    async fn handle_tools_list(&mut self, id: RequestId) -> Result<()> {
        debug!("Handling tools/list request");
        let tools = self.gateway.list_tools();
        self.send_response(id, ListToolsResult { tools }).await
    }

    async fn handle_tool_call(&mut self, id: RequestId, params: ToolCallParams) -> Result<()> {
        debug!("Handling tool call for {}", params.name);
        let result = self.gateway.invoke(&params.name, params.arguments).await;
        self.send_response(id, result).await
    }

    /// Main message handling entry point
    pub async fn handle_message(&mut self, message: &str) -> Result<()> {
        let message: JSONRPCMessage = match serde_json::from_str(message) {
            Ok(msg) => msg,
            Err(e) => {
                error!("Invalid JSON-RPC message: {}", e);
                return Ok(());
            }
        };

        match message {
            JSONRPCMessage::Request {
                method, id, params, ..
            } => {
                trace!("Processing request: method={}, id={:?}", method, id);
                match method.as_str() {
                    "initialize" => {
                        match serde_json::from_value::<InitializeParams>(
                            params.unwrap_or_default(),
                        ) {
                            Ok(params) => self.handle_initialize(id, params).await?,
                            Err(e) => {
                                self.send_error(id, -32602, format!("Invalid params: {e}"))
                                    .await?
                            }
                        }
                    }

                    "ping" => {
                        self.send_response(id, EmptyResult {}).await?;
                    }

                    "tools/list" => {
                        self.handle_tools_list(id).await?;
                    }

                    "tools/call" => {
                        match serde_json::from_value::<ToolCallParams>(params.unwrap_or_default()) {
                            Ok(params) => {
                                self.handle_tool_call(id, params).await?;
                            }
                            Err(e) => {
                                self.send_response(
                                    id,
                                    ToolCallResult {
                                        content: vec![ToolResultContent::Text {
                                            text: format!("Invalid tool parameters: {e}"),
                                        }],
                                        is_error: true,
                                    },
                                )
                                .await?;
                            }
                        }
                    }

                    method => {
                        self.send_error(id, -32601, format!("Method not found: {method}"))
                            .await?;
                    }
                }
            }

            JSONRPCMessage::Notification { method, params, .. } => match method.as_str() {
                "notifications/initialized" => {
                    if let Some(params) = params {
                        debug!("Client initialized with params: {:?}", params);
                    } else {
                        debug!("Client initialized");
                    }
                }
                _ => {
                    debug!("Unknown notification: {}", method);
                }
            },
        }

        Ok(())
    }

    /// Release the output stream
    pub async fn close(&mut self) -> Result<()> {
        self.message_writer.close().await
    }
}
