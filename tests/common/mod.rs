#![allow(dead_code)]

use product_assistant::{Bridge, Credentials, Settings};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "gsk-test";

/// A chat completion whose single choice is a `Product` tool call with `arguments`.
pub fn tool_call_completion(model: &str, arguments: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "Product", "arguments": arguments }
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
    })
}

pub fn bridge_for(server_uri: &str, credentials: Credentials) -> Bridge {
    let settings = Settings {
        base_url: server_uri.to_string(),
        ..Settings::default()
    };
    Bridge::new(credentials, settings)
}

pub fn keyed_bridge(server: &MockServer) -> Bridge {
    bridge_for(&server.uri(), Credentials::new(Some(TEST_KEY.to_string())))
}

/// Mount a completion endpoint that answers every call with `body`, expecting `calls` calls.
pub async fn mount_completion(server: &MockServer, status: u16, body: Value, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// Base URL of a port nothing listens on: connections are refused.
pub fn dead_server_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
