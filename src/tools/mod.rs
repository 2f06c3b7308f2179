pub mod core;
mod gateway;
pub mod impls;

pub use gateway::ToolGateway;
