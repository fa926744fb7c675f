/// JSON-RPC front end
///
/// This module serves the tools over line-delimited JSON-RPC 2.0 on
/// stdin/stdout, so an external terminal UI can drive the tracker.

pub mod protocol;
pub mod server;

// Re-export main types
pub use server::RpcServer;
