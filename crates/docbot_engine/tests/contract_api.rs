use docbot_engine::{ApiSettings, ContractApi, FailureKind, ReqwestContractApi, SettingsPayload};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestContractApi {
    ReqwestContractApi::new(&ApiSettings::new(format!("{}/api", server.uri()))).unwrap()
}

#[tokio::test]
async fn analyze_returns_blocks_and_contract_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({"query": "Draft an NDA"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ner_result": {"entities": [{"text": "Acme", "label": "ORG"}]},
            "clause_result": null,
            "negotiation_result": {
                "key_points": ["Term length"],
                "recommendations": ["Cap liability"],
                "risk_assessment": "Medium"
            },
            "answer_result": {"answer": "Here you go"},
            "contract_text": "NON-DISCLOSURE AGREEMENT"
        })))
        .mount(&server)
        .await;

    let response = api_for(&server).analyze("Draft an NDA").await.unwrap();

    assert_eq!(response.clause_result, None);
    assert_eq!(response.contract_text, "NON-DISCLOSURE AGREEMENT");
    let negotiation = response.negotiation().unwrap();
    assert_eq!(negotiation.key_points, vec!["Term length".to_string()]);
    assert_eq!(negotiation.risk_assessment, "Medium");
}

#[tokio::test]
async fn clause_search_sends_search_term() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clauses/search"))
        .and(body_json(json!({"search_term": "termination"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "category": "Termination",
                "relevance_score": 0.87,
                "text": "Either party may terminate...",
                "risk_type": "Operational"
            }]
        })))
        .mount(&server)
        .await;

    let found = api_for(&server).search_clauses("termination").await.unwrap();
    assert_eq!(found.results.len(), 1);
    assert_eq!(found.results[0].category, "Termination");
    assert!((found.results[0].relevance_score - 0.87).abs() < f64::EPSILON);
}

#[tokio::test]
async fn preview_reads_page_and_word_counts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contract/preview"))
        .and(body_json(json!({"contract_text": "one two three"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contract": "one two three",
            "pages": 1,
            "word_count": 3
        })))
        .mount(&server)
        .await;

    let preview = api_for(&server).preview_contract("one two three").await.unwrap();
    assert_eq!(preview.pages, Some(1));
    assert_eq!(preview.word_count, Some(3));
}

#[tokio::test]
async fn history_items_may_omit_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                {"id": "1", "query": "NDA", "entities_found": 4, "status": "completed",
                 "timestamp": "2024-01-15T10:30:00"},
                {"id": "2", "query": "Lease", "entities_found": 0,
                 "timestamp": "2024-01-16T09:00:00"}
            ]
        })))
        .mount(&server)
        .await;

    let history = api_for(&server).history().await.unwrap();
    assert_eq!(history.history.len(), 2);
    assert_eq!(history.history[0].status.as_deref(), Some("completed"));
    assert_eq!(history.history[1].status, None);
}

#[tokio::test]
async fn settings_round_trip_through_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "embed_model": "nomic-embed-text",
            "ollama_url": "http://localhost:11434",
            "ner_enabled": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/settings"))
        .and(body_json(json!({"model": "mistral", "language": "en", "autoSave": false})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Settings updated"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let loaded = api.settings().await.unwrap();
    assert_eq!(loaded.model.as_deref(), Some("llama3.1"));
    assert_eq!(loaded.language, None);

    api.save_settings(&SettingsPayload {
        model: Some("mistral".to_string()),
        language: Some("en".to_string()),
        auto_save: Some(false),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn backend_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = api_for(&server).analyze("anything").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "HTTP 503: Service Unavailable");
}
