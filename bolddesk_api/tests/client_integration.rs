use std::time::Duration;

use bolddesk_api::types::{ContactCreate, TicketCreate, TicketUpdate, WorklogCreate};
use bolddesk_api::{AgentQuery, AgentStatus, Client, ContactQuery, Error, ListQuery, Query, TicketQuery, WorklogQuery};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), "secret-key").unwrap()
}

#[tokio::test]
async fn list_tickets_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets"))
        .and(header("x-api-key", "secret-key"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("tickets.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = TicketQuery::default().with_per_page(20);
    let resp = client.tickets().list(&query).await.unwrap();
    assert_eq!(resp.count, 2);
    assert_eq!(resp.result.len(), 2);
    assert_eq!(resp.result[0].ticket_id, 1001);
    assert_eq!(resp.result[0].status_name(), "Open");
}

#[tokio::test]
async fn get_ticket_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("ticket.json")))
        .mount(&mock_server)
        .await;

    let ticket = client(&mock_server).tickets().get(1001).await.unwrap();
    assert_eq!(ticket.title, "Printer on floor 3 is jammed");
    assert_eq!(ticket.agent_name(), "Sam Agent");
}

#[tokio::test]
async fn create_ticket_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tickets"))
        .and(body_json(serde_json::json!({
            "subject": "New laptop",
            "description": "Please order one.",
            "brandId": 1,
            "requesterEmailId": "jane@example.com"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_string(r#"{"id": 1003, "message": "Ticket created"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let ticket = TicketCreate {
        subject: "New laptop".to_string(),
        description: "Please order one.".to_string(),
        brand_id: 1,
        requester_email_id: Some("jane@example.com".to_string()),
        ..Default::default()
    };
    let created = client(&mock_server).tickets().create(&ticket).await.unwrap();
    assert_eq!(created.id, 1003);
}

#[tokio::test]
async fn update_ticket_sends_only_set_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/tickets/1001"))
        .and(body_json(serde_json::json!({ "statusId": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"Updated"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = TicketUpdate {
        status_id: Some(3),
        ..Default::default()
    };
    let resp = client(&mock_server).tickets().update(1001, &update).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Updated"));
}

#[tokio::test]
async fn delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/contacts/501"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server).contacts().delete(501).await.unwrap();
    assert!(resp.message.is_none());
}

#[tokio::test]
async fn close_ticket_uses_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/tickets/1001/close"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"Closed"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server).tickets().close(1001).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Closed"));
}

#[tokio::test]
async fn validation_error_carries_field_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contacts"))
        .respond_with(ResponseTemplate::new(400).set_body_string(load_fixture("error_validation.json")))
        .mount(&mock_server)
        .await;

    let contact = ContactCreate {
        contact_name: "Jane".to_string(),
        ..Default::default()
    };
    let err = client(&mock_server).contacts().create(&contact).await.unwrap_err();
    match &err {
        Error::Validation { status, envelope } => {
            assert_eq!(*status, 400);
            assert_eq!(envelope.as_ref().unwrap().messages_for("email"), vec!["required"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(err.field_errors()["email"], vec!["required".to_string()]);
    assert_eq!(err.message(), "Invalid");
}

#[tokio::test]
async fn unauthorized_maps_to_authentication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .brands()
        .list(&ListQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Authentication { status: 401, envelope: None }));
}

#[tokio::test]
async fn not_found_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"message":"Agent not found","statusCode":404,"errors":[]}"#,
        ))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).agents().get(999).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert_eq!(err.message(), "Agent not found");
}

#[tokio::test]
async fn server_error_with_plain_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .tickets()
        .list(&TicketQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));
    assert_eq!(err.message(), "Internal Server Error");
}

#[tokio::test]
async fn rate_limited_response_carries_snapshot() {
    let mock_server = MockServer::start().await;
    let reset = (chrono::Utc::now() + chrono::Duration::seconds(30)).timestamp();

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-rate-limit-limit", "100")
                .insert_header("x-rate-limit-remaining", "0")
                .insert_header("x-rate-limit-reset", reset.to_string().as_str()),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let err = client
        .contacts()
        .list(&ContactQuery::default())
        .await
        .unwrap_err();
    match &err {
        Error::RateLimit { rate_limit, .. } => {
            let snapshot = rate_limit.unwrap();
            assert_eq!(snapshot.limit, Some(100));
            assert_eq!(snapshot.remaining, Some(0));
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }
    let wait = err.retry_after().unwrap();
    assert!(wait <= Duration::from_secs(30));
    assert_eq!(client.rate_limit().unwrap().remaining, Some(0));
}

#[tokio::test]
async fn success_records_rate_limit_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-rate-limit-limit", "120")
                .insert_header("x-rate-limit-remaining", "118")
                .insert_header("x-rate-limit-reset", "2024-05-01T12:30:00Z")
                .set_body_string(load_fixture("agents.json")),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert!(client.rate_limit().is_none());
    let resp = client
        .agents()
        .list(&AgentQuery::default().with_status(AgentStatus::Active))
        .await
        .unwrap();
    assert_eq!(resp.result.len(), 2);

    let snapshot = client.rate_limit().unwrap();
    assert_eq!(snapshot.limit, Some(120));
    assert_eq!(snapshot.remaining, Some(118));
    assert!(snapshot.reset.is_some());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .brands()
        .list(&ListQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("brands.json"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client(&mock_server)
        .with_timeout(Duration::from_millis(50))
        .unwrap();
    let err = client.brands().list(&ListQuery::default()).await.unwrap_err();
    match err {
        Error::Timeout { url, elapsed_ms } => {
            assert!(url.contains("/brands"));
            assert!(elapsed_ms >= 40, "elapsed {}", elapsed_ms);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn ticket_worklogs_use_ticket_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tickets/1001/worklogs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("worklogs.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server)
        .worklogs()
        .for_ticket(1001, &WorklogQuery::default())
        .await
        .unwrap();
    assert_eq!(resp.result[0].time_spent_display(), "1h 30m");
}

#[tokio::test]
async fn add_worklog_posts_to_ticket() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tickets/1001/worklogs"))
        .and(body_json(serde_json::json!({ "timeSpent": 30, "isBillable": false })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 9002}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let worklog = WorklogCreate {
        time_spent: 30,
        ..Default::default()
    };
    let created = client(&mock_server)
        .worklogs()
        .create(1001, &worklog)
        .await
        .unwrap();
    assert_eq!(created.id, 9002);
}

#[tokio::test]
async fn field_options_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ticket_fields/300/options"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"result":[{"id":1,"value":"Widgets"},{"id":2,"value":"Gadgets"}],"count":2}"#,
        ))
        .mount(&mock_server)
        .await;

    let options = client(&mock_server).fields().options(300).await.unwrap();
    let values: Vec<&str> = options.result.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["Widgets", "Gadgets"]);
}
