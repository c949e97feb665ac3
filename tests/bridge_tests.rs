mod common;

#[cfg(test)]
mod bridge_tests {
    use crate::common::{
        TEST_KEY, bridge_for, dead_server_uri, keyed_bridge, mount_completion,
        tool_call_completion,
    };
    use product_assistant::{
        ApiErrorKind, AssistantError, Credentials, MISSING_INPUT_WARNING, Outcome, Submission,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_wireless_mouse_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
            .and(body_partial_json(json!({
                "model": "llama-3.1-8b-instant",
                "tool_choice": { "type": "function", "function": { "name": "Product" } },
                "messages": [
                    { "role": "system" },
                    { "role": "user", "content": "wireless mouse" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_completion(
                "llama-3.1-8b-instant",
                r#"{"product_name":"Logitech M185 Wireless Mouse","tentative_price_in_usd":"14.99","category":"electronics","rating":4.5}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let bridge = keyed_bridge(&server);
        let outcome = bridge
            .submit(&Submission::new("llama-3.1-8b-instant", "wireless mouse"))
            .await;

        match outcome {
            Outcome::Success(product) => {
                assert_eq!(
                    product.product_name.as_deref(),
                    Some("Logitech M185 Wireless Mouse")
                );
                assert_eq!(product.tentative_price_in_usd.as_deref(), Some("14.99"));
                assert_eq!(product.rating, Some(4.5));
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_carries_product_schema_tool() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            200,
            tool_call_completion("qwen-qwq-32b", r#"{"product_name":"Kettle"}"#),
            1,
        )
        .await;

        keyed_bridge(&server)
            .submit(&Submission::new("qwen-qwq-32b", "electric kettle"))
            .await;

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let tool = &body["tools"][0];
        assert_eq!(tool["type"], "function");
        assert_eq!(tool["function"]["name"], "Product");
        let params = &tool["function"]["parameters"];
        assert_eq!(params["properties"]["rating"]["maximum"], 5.0);
        assert!(params.get("required").is_none());
        assert_eq!(body["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
    }

    #[tokio::test]
    async fn test_missing_input_makes_no_call() {
        let server = MockServer::start().await;
        mount_completion(&server, 200, tool_call_completion("m", "{}"), 0).await;
        let bridge = keyed_bridge(&server);

        for submission in [
            Submission::new("llama-3.1-8b-instant", ""),
            Submission::new("", "wireless mouse"),
            Submission::new("", ""),
            Submission::new("llama-3.1-8b-instant", "   "),
        ] {
            match bridge.submit(&submission).await {
                Outcome::Warning(msg) => assert_eq!(msg, MISSING_INPUT_WARNING),
                other => panic!("Expected warning for {:?}, got {:?}", submission, other),
            }
        }
    }

    #[tokio::test]
    async fn test_connection_error_is_reported_and_bridge_stays_usable() {
        let bridge = bridge_for(&dead_server_uri(), Credentials::new(Some(TEST_KEY.to_string())));

        for _ in 0..2 {
            match bridge
                .submit(&Submission::new("llama-3.1-8b-instant", "wireless mouse"))
                .await
            {
                Outcome::Error(AssistantError::HttpError(e)) => assert!(e.is_connect()),
                other => panic!("Expected connection error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_unparseable_arguments_are_an_error() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            200,
            tool_call_completion("llama-3.1-8b-instant", "this is not json"),
            1,
        )
        .await;

        let outcome = keyed_bridge(&server)
            .submit(&Submission::new("llama-3.1-8b-instant", "wireless mouse"))
            .await;
        match outcome {
            Outcome::Error(AssistantError::ValidationError(msg)) => {
                assert!(msg.contains("Failed to parse response"))
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_an_error() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            200,
            tool_call_completion(
                "llama-3.1-8b-instant",
                r#"{"product_name":"Mouse","rating":7.5}"#,
            ),
            1,
        )
        .await;

        let outcome = keyed_bridge(&server)
            .submit(&Submission::new("llama-3.1-8b-instant", "mouse"))
            .await;
        assert!(matches!(
            outcome,
            Outcome::Error(AssistantError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_plain_json_content_is_accepted_without_tool_call() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            200,
            json!({
                "model": "llama-3.1-8b-instant",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "```json\n{\"product_name\":\"Desk Lamp\",\"tentative_price_in_usd\":\"35\"}\n```"
                    },
                    "finish_reason": "stop"
                }]
            }),
            1,
        )
        .await;

        let outcome = keyed_bridge(&server)
            .submit(&Submission::new("llama-3.1-8b-instant", "desk lamp"))
            .await;
        match outcome {
            Outcome::Success(product) => {
                assert_eq!(product.product_name.as_deref(), Some("Desk Lamp"))
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_unexpected_response() {
        let server = MockServer::start().await;
        mount_completion(&server, 200, json!({ "choices": [] }), 1).await;

        let outcome = keyed_bridge(&server)
            .submit(&Submission::new("llama-3.1-8b-instant", "mouse"))
            .await;
        match outcome {
            Outcome::Error(AssistantError::ApiError { kind, .. }) => {
                assert!(matches!(kind, ApiErrorKind::UnexpectedResponse { .. }))
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let server = MockServer::start().await;
        mount_completion(
            &server,
            401,
            json!({ "error": { "message": "Invalid API Key", "type": "invalid_request_error" } }),
            1,
        )
        .await;

        let bridge = bridge_for(&server.uri(), Credentials::new(None));
        let outcome = bridge
            .submit(&Submission::new("llama-3.1-8b-instant", "mouse"))
            .await;

        match outcome {
            Outcome::Error(e) => {
                assert_eq!(
                    e,
                    AssistantError::api_error("Groq", ApiErrorKind::AuthenticationFailed)
                );
            }
            other => panic!("Expected auth error, got {:?}", other),
        }

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected_remotely() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "model": "groq-llama-65b-v1" })))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "message": "The model `groq-llama-65b-v1` does not exist or you do not have access to it.",
                    "type": "invalid_request_error",
                    "code": "model_not_found"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = keyed_bridge(&server)
            .submit(&Submission::new("groq-llama-65b-v1", "mouse"))
            .await;
        match outcome {
            Outcome::Error(e) => {
                assert!(e.to_string().contains("does not exist"));
                assert!(matches!(
                    e,
                    AssistantError::ApiError {
                        kind: ApiErrorKind::ModelNotFound { .. },
                        ..
                    }
                ));
            }
            other => panic!("Expected model-not-found error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_identical_submissions_make_independent_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_completion(
                "llama-3.1-8b-instant",
                r#"{"product_name":"Mouse A","tentative_price_in_usd":"10"}"#,
            )))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_completion(
                "llama-3.1-8b-instant",
                r#"{"product_name":"Mouse B","tentative_price_in_usd":"12"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let bridge = keyed_bridge(&server);
        let submission = Submission::new("llama-3.1-8b-instant", "wireless mouse");

        let names: Vec<Option<String>> = {
            let mut names = Vec::new();
            for _ in 0..2 {
                match bridge.submit(&submission).await {
                    Outcome::Success(p) => names.push(p.product_name),
                    other => panic!("Expected success, got {:?}", other),
                }
            }
            names
        };

        assert_eq!(
            names,
            vec![Some("Mouse A".to_string()), Some("Mouse B".to_string())]
        );
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
