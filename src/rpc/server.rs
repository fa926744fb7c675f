/// JSON-RPC server that handles line-delimited requests
///
/// This module implements the server behind `hbt serve`:
/// 1. Reads one JSON-RPC request per line from stdin
/// 2. Dispatches it to the matching tool
/// 3. Writes one JSON-RPC response per line to stdout
///
/// Requests are handled one at a time on the calling task.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::rpc::protocol::*;
use crate::storage::HabitStorage;
use crate::tools;
use crate::{HabitTracker, TrackerError};

/// Methods answered by the server, in the order `initialize` lists them
pub const METHODS: [&str; 17] = [
    "initialize",
    "habits/today",
    "habits/list",
    "habits/create",
    "habits/update",
    "habits/archive",
    "habits/unarchive",
    "habits/delete",
    "habits/toggle",
    "habits/complete",
    "stats/overview",
    "stats/habits",
    "categories/list",
    "categories/create",
    "categories/delete",
    "config/get",
    "config/set",
];

/// JSON-RPC server over a habit tracker
pub struct RpcServer {
    tracker: HabitTracker,
}

impl RpcServer {
    pub fn new(tracker: HabitTracker) -> Self {
        Self { tracker }
    }

    /// Get a reference to the underlying tracker
    pub fn tracker(&self) -> &HabitTracker {
        &self.tracker
    }

    /// Serve stdin/stdout until stdin closes
    pub async fn run(&mut self) -> Result<(), TrackerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// Serve requests from `reader`, writing responses to `writer`, until
    /// the reader reaches end of input
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), TrackerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("JSON-RPC server waiting for requests...");

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("JSON-RPC server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input; `None` for blank lines and
    /// notifications
    fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::new(error_codes::PARSE_ERROR, format!("Invalid JSON: {}", e)),
                ));
            }
        };

        let is_notification = request.is_notification();
        let response = self.handle_request(request);
        if is_notification {
            return None;
        }
        Some(response)
    }

    fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.unwrap_or_default();

        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::new(
                    error_codes::INVALID_REQUEST,
                    format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                ),
            );
        }

        match self.dispatch(&request.method, request.params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!("Method '{}' failed: {}", request.method, e.message);
                JsonRpcResponse::error(id, e)
            }
        }
    }

    fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let storage = self.tracker.storage();

        match method {
            "initialize" => {
                info!("JSON-RPC client connected");
                to_result(InitializeResult {
                    server_info: ServerInfo {
                        name: env!("CARGO_PKG_NAME").to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                    methods: METHODS.to_vec(),
                })
            }
            "habits/today" => call(storage, params, tools::today_status),
            "habits/list" => call(storage, params, tools::list_habits),
            "habits/create" => call(storage, params, tools::create_habit),
            "habits/update" => call(storage, params, tools::update_habit),
            "habits/archive" => call(storage, params, tools::archive_habit),
            "habits/unarchive" => call(storage, params, tools::unarchive_habit),
            "habits/delete" => call(storage, params, tools::delete_habit),
            "habits/toggle" => call(storage, params, tools::toggle_habit),
            "habits/complete" => call(storage, params, tools::complete_habit),
            "stats/overview" => call(storage, params, tools::stats_overview),
            "stats/habits" => call(storage, params, tools::habit_stats),
            "categories/list" => call(storage, params, tools::list_categories),
            "categories/create" => call(storage, params, tools::create_category),
            "categories/delete" => call(storage, params, tools::delete_category),
            "config/get" => call(storage, params, tools::get_config),
            "config/set" => call(storage, params, tools::set_config),
            _ => Err(JsonRpcError::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", method),
            )),
        }
    }
}

/// Deserialize the parameters, run the tool and serialize its response
fn call<S, P, R, F>(storage: &S, params: Option<Value>, tool: F) -> Result<Value, JsonRpcError>
where
    S: HabitStorage,
    P: DeserializeOwned,
    R: Serialize,
    F: FnOnce(&S, P) -> Result<R, TrackerError>,
{
    let params = match params {
        None | Some(Value::Null) => json!({}),
        Some(value) => value,
    };

    let params: P = serde_json::from_value(params).map_err(|e| {
        JsonRpcError::new(error_codes::INVALID_PARAMS, format!("Invalid parameters: {}", e))
    })?;

    to_result(tool(storage, params)?)
}

fn to_result<R: Serialize>(response: R) -> Result<Value, JsonRpcError> {
    serde_json::to_value(response)
        .map_err(|e| JsonRpcError::new(error_codes::INTERNAL_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> RpcServer {
        RpcServer::new(HabitTracker::in_memory().unwrap())
    }

    fn request(server: &RpcServer, line: &str) -> Value {
        let response = server.process_line(line).unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_initialize_lists_methods() {
        let server = server();
        let response = request(&server, r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);
        assert_eq!(response["result"]["server_info"]["name"], "hbt");
        assert_eq!(response["result"]["methods"].as_array().unwrap().len(), METHODS.len());
    }

    #[test]
    fn test_create_then_toggle() {
        let server = server();
        let created = request(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"habits/create","params":{"name":"Read"}}"#,
        );
        assert_eq!(created["result"]["success"], true);

        let toggled = request(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"habits/toggle","params":{"habit":"read"}}"#,
        );
        assert_eq!(toggled["id"], 2);
        assert_eq!(toggled["result"]["completed"], true);
    }

    #[test]
    fn test_error_responses() {
        let server = server();

        let parse = request(&server, "{not json");
        assert_eq!(parse["error"]["code"], error_codes::PARSE_ERROR);
        assert!(parse["id"].is_null());

        let unknown = request(&server, r#"{"jsonrpc":"2.0","id":1,"method":"habits/fly"}"#);
        assert_eq!(unknown["error"]["code"], error_codes::METHOD_NOT_FOUND);

        let bad_params = request(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"habits/toggle","params":{"name":1}}"#,
        );
        assert_eq!(bad_params["error"]["code"], error_codes::INVALID_PARAMS);

        let missing = request(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"habits/toggle","params":{"habit":"Swim"}}"#,
        );
        assert_eq!(missing["error"]["code"], error_codes::NOT_FOUND);

        let invalid = request(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"habits/create","params":{"name":"Gym","frequency":"9x"}}"#,
        );
        assert_eq!(invalid["error"]["code"], error_codes::VALIDATION_ERROR);

        let version = request(&server, r#"{"jsonrpc":"1.0","id":5,"method":"initialize"}"#);
        assert_eq!(version["error"]["code"], error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_notifications_and_blank_lines_get_no_reply() {
        let server = server();
        assert!(server.process_line("   \n").is_none());
        assert!(server
            .process_line(r#"{"jsonrpc":"2.0","method":"initialize"}"#)
            .is_none());
    }

    #[test]
    fn test_explicit_null_id_gets_a_reply() {
        let server = server();
        let response = request(&server, r#"{"jsonrpc":"2.0","id":null,"method":"initialize"}"#);
        assert!(response["id"].is_null());
        assert_eq!(response["result"]["server_info"]["name"], "hbt");
    }

    #[tokio::test]
    async fn test_run_with_in_memory_streams() {
        let mut server = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"habits/create","params":{"name":"Read"}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"habits/today"}"#,
            "\n"
        );
        let mut output = Vec::new();

        server.run_with(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let today: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(today["result"]["habits"].as_array().unwrap().len(), 1);
    }
}
