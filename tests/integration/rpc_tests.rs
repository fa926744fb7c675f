/// JSON-RPC sessions driven through in-memory streams
use hbt::*;
use serde_json::Value;

async fn session(requests: &[&str]) -> Vec<Value> {
    let mut server = RpcServer::new(HabitTracker::in_memory().expect("Failed to open tracker"));
    let input = requests.join("\n") + "\n";
    let mut output = Vec::new();

    server
        .run_with(input.as_bytes(), &mut output)
        .await
        .expect("Server loop failed");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[cfg(test)]
mod rpc_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_tracking_session() {
        let responses = session(&[
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"categories/create","params":{"name":"Mind","emoji":"🧠"}}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"habits/create","params":{"name":"Read","category":"mind"}}"#,
            r#"{"jsonrpc":"2.0","id":4,"method":"habits/toggle","params":{"habit":"Read"}}"#,
            r#"{"jsonrpc":"2.0","id":5,"method":"habits/today"}"#,
            r#"{"jsonrpc":"2.0","id":6,"method":"stats/overview","params":{"days":3,"weeks":1}}"#,
            r#"{"jsonrpc":"2.0","id":7,"method":"stats/habits","params":null}"#,
        ])
        .await;

        assert_eq!(responses.len(), 7);
        for (i, response) in responses.iter().enumerate() {
            assert_eq!(response["jsonrpc"], "2.0");
            assert_eq!(response["id"], i as u64 + 1);
            assert!(response.get("error").is_none(), "{}", response);
        }

        let today = &responses[4]["result"];
        assert_eq!(today["completed"], 1);
        assert_eq!(today["habits"][0]["completed_today"], true);
        assert_eq!(today["habits"][0]["category"]["name"], "Mind");

        let overview = &responses[5]["result"]["overview"];
        assert_eq!(overview["daily"].as_array().unwrap().len(), 3);
        assert_eq!(overview["weekly"].as_array().unwrap().len(), 1);

        assert_eq!(responses[6]["result"]["habits"][0]["current_streak"], 1);
    }

    #[tokio::test]
    async fn test_errors_keep_the_session_alive() {
        let responses = session(&[
            "not json at all",
            r#"{"jsonrpc":"2.0","id":1,"method":"habits/create","params":{"name":"Gym"}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"habits/create","params":{"name":"gym"}}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"habits/toggle","params":{"habit":"GYM"}}"#,
            r#"{"jsonrpc":"2.0","id":4,"method":"habits/archive","params":{"habit":"Swim"}}"#,
            r#"{"jsonrpc":"2.0","id":5,"method":"config/set","params":{"key":"trend_days","value":"0"}}"#,
            r#"{"jsonrpc":"2.0","id":6,"method":"habits/list","params":{"include_archived":"yes"}}"#,
            r#"{"jsonrpc":"2.0","id":7,"method":"habits/list"}"#,
        ])
        .await;

        assert_eq!(responses.len(), 8);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert!(responses[1]["result"]["success"].as_bool().unwrap());
        assert!(responses[2]["result"]["success"].as_bool().unwrap());
        // two habits share the name: ambiguous reference
        assert_eq!(responses[3]["error"]["code"], -32003);
        assert_eq!(responses[4]["error"]["code"], -32001);
        assert_eq!(responses[5]["error"]["code"], -32003);
        assert_eq!(responses[6]["error"]["code"], -32602);
        assert_eq!(responses[7]["result"]["habits"].as_array().unwrap().len(), 2);
    }
}
