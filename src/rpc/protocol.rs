/// JSON-RPC message structures
///
/// This module defines the JSON-RPC 2.0 request and response format used
/// by `hbt serve`, plus the mapping from tracker errors to error codes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::storage::StorageError;
use crate::TrackerError;

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version, must be "2.0"
    pub jsonrpc: String,
    /// Unique identifier for this request; `None` only when the member is
    /// absent (a notification), `Some(Value::Null)` for an explicit null
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    /// The method to call (e.g., "habits/toggle")
    pub method: String,
    /// Parameters for the method call
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Requests without an `id` member get no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response message
///
/// It contains either a successful result or an error.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Request ID that we're responding to
    pub id: Value,
    /// Successful result (if no error occurred)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information (if something went wrong)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code (negative numbers)
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl From<TrackerError> for JsonRpcError {
    fn from(error: TrackerError) -> Self {
        Self::new(error_code(&error), error.to_string())
    }
}

/// Result of the `initialize` method
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub server_info: ServerInfo,
    /// Methods this server answers
    pub methods: Vec<&'static str>,
}

/// Information about the tracker server
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// JSON-RPC error codes
pub mod error_codes {
    /// Parse error - Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid parameters - Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific error codes (-32000 to -32099)
    /// Not found - The referenced habit or category doesn't exist
    pub const NOT_FOUND: i32 = -32001;
    /// Validation error - Input validation failed
    pub const VALIDATION_ERROR: i32 = -32003;
    /// Storage error - Database or storage operation failed
    pub const STORAGE_ERROR: i32 = -32004;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Map tracker errors to JSON-RPC error codes
pub fn error_code(error: &TrackerError) -> i32 {
    match error {
        e if e.is_not_found() => error_codes::NOT_FOUND,
        TrackerError::Domain(_)
        | TrackerError::InvalidInput(_)
        | TrackerError::AmbiguousHabit { .. }
        | TrackerError::Database(StorageError::DuplicateCategory { .. }) => error_codes::VALIDATION_ERROR,
        TrackerError::Database(_) => error_codes::STORAGE_ERROR,
        TrackerError::Io(_) | TrackerError::Json(_) => error_codes::INTERNAL_ERROR,
    }
}
