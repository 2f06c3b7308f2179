mod handler;
mod server;
pub mod types;


pub use server::MCPServer;
