use std::sync::Mutex;

use bolddesk_api::{CancellationToken, Client, ContactQuery, Error, ListQuery, Query, TicketQuery, WorklogQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tickets_page(ids: std::ops::Range<i64>, count: u64) -> serde_json::Value {
    let result: Vec<_> = ids
        .map(|id| json!({ "ticketId": id, "title": format!("Ticket {}", id) }))
        .collect();
    json!({ "result": result, "count": count })
}

async fn mount_page(server: &MockServer, route: &str, page: u32, body: serde_json::Value, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn stops_when_count_is_reached() {
    let server = MockServer::start().await;
    mount_page(&server, "/tickets", 1, tickets_page(0..10, 25), 1).await;
    mount_page(&server, "/tickets", 2, tickets_page(10..20, 25), 1).await;
    mount_page(&server, "/tickets", 3, tickets_page(20..25, 25), 1).await;
    mount_page(&server, "/tickets", 4, tickets_page(0..0, 25), 0).await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let query = TicketQuery::default().with_per_page(10).with_requires_counts(true);
    let tickets = client.tickets().all(query).collect_all().await.unwrap();

    assert_eq!(tickets.len(), 25);
    assert_eq!(tickets.first().unwrap().ticket_id, 0);
    assert_eq!(tickets.last().unwrap().ticket_id, 24);
}

#[tokio::test]
async fn empty_first_page_makes_one_request() {
    let server = MockServer::start().await;
    mount_page(&server, "/brands", 1, json!({ "result": [], "count": 0 }), 1).await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let mut brands = client.brands().all(ListQuery::default());
    assert!(brands.next().await.unwrap().is_none());
    assert_eq!(brands.pages_fetched(), 1);
    assert!(brands.is_finished());
}

#[tokio::test]
async fn short_page_ends_the_sequence() {
    let server = MockServer::start().await;
    mount_page(&server, "/tickets", 1, tickets_page(0..5, 0), 1).await;
    mount_page(&server, "/tickets", 2, tickets_page(0..0, 0), 0).await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let query = TicketQuery::default().with_per_page(10);
    let mut paginator = client.tickets().all(query);

    let mut seen = Vec::new();
    while let Some(ticket) = paginator.next().await.unwrap() {
        seen.push(ticket.ticket_id);
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(paginator.fetched(), 5);
}

#[tokio::test]
async fn default_page_size_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("perPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [{ "userId": 1 }] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let contacts = client
        .contacts()
        .all(ContactQuery::default())
        .collect_all()
        .await
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].contact_id, 1);
}

#[tokio::test]
async fn worklogs_for_a_ticket_page_under_the_ticket() {
    let server = MockServer::start().await;
    let page = json!({
        "result": [
            { "id": 1, "ticketId": 42, "timeSpent": 15 },
            { "id": 2, "ticketId": 42, "timeSpent": 45 }
        ],
        "count": 2
    });
    mount_page(&server, "/tickets/42/worklogs", 1, page, 1).await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let query = WorklogQuery::default()
        .with_ticket_id(42)
        .with_requires_counts(true);
    let worklogs = client.worklogs().all(query).collect_all().await.unwrap();
    let total: u32 = worklogs.iter().map(|w| w.time_spent).sum();
    assert_eq!(total, 60);
}

#[tokio::test]
async fn error_mid_sequence_propagates() {
    let server = MockServer::start().await;
    mount_page(&server, "/tickets", 1, tickets_page(0..2, 0), 1).await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let query = TicketQuery::default().with_per_page(2);
    let mut paginator = client.tickets().all(query);

    assert!(paginator.next().await.unwrap().is_some());
    assert!(paginator.next().await.unwrap().is_some());
    let err = paginator.next().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
    assert!(paginator.next().await.unwrap().is_none());
}

#[tokio::test]
async fn cancelled_sequence_stops_requesting() {
    let server = MockServer::start().await;
    mount_page(&server, "/tickets", 1, tickets_page(0..3, 0), 1).await;
    mount_page(&server, "/tickets", 2, tickets_page(3..6, 0), 0).await;

    let client = Client::with_base_url(&server.uri(), "key").unwrap();
    let token = CancellationToken::new();
    let messages = Mutex::new(Vec::new());
    let record = |m: &str| messages.lock().unwrap().push(m.to_string());
    let mut paginator = client
        .tickets()
        .all(TicketQuery::default().with_per_page(3))
        .with_cancellation(token.clone())
        .with_progress(&record);

    let first = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(first.len(), 3);
    token.cancel();
    assert!(paginator.next_page().await.unwrap().is_none());
    drop(paginator);

    assert_eq!(
        messages.into_inner().unwrap(),
        vec!["Fetched 3 so far...", "Completed: 3 items fetched"]
    );
}
