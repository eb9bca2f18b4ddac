use bolddesk_api::{
    AgentQuery, ContactQuery, FilterExpression, ListQuery, Query, SortDirection, TicketQuery, WorklogQuery,
};
use url::Url;

fn base() -> Url {
    Url::parse("https://acme.bolddesk.com/api/v1/tickets").unwrap()
}

#[test]
fn default_queries_send_only_the_page() {
    assert_eq!(ListQuery::default().add_to_url(&base()).query(), Some("page=1"));
    assert_eq!(TicketQuery::default().add_to_url(&base()).query(), Some("page=1"));
    assert_eq!(ContactQuery::default().add_to_url(&base()).query(), Some("page=1"));
    assert_eq!(AgentQuery::default().add_to_url(&base()).query(), Some("page=1"));
    assert_eq!(WorklogQuery::default().add_to_url(&base()).query(), Some("page=1"));
}

#[test]
fn add_to_url_does_not_mutate_the_query() {
    let query = TicketQuery::default()
        .with_per_page(50)
        .with_status_id(1)
        .with_tag("vip");
    let first = query.add_to_url(&base());
    let second = query.add_to_url(&base());
    assert_eq!(first, second);
}

#[test]
fn page_and_page_size_are_bounded() {
    let query = ListQuery::default().with_page(0).with_per_page(500);
    assert_eq!(query.common.page, 1);
    assert_eq!(query.common.per_page, Some(100));

    let query = ListQuery::default().with_per_page(0);
    assert_eq!(query.common.per_page, Some(1));
}

#[test]
fn common_parameters_in_order() {
    let query = ListQuery::default()
        .with_page(3)
        .with_per_page(20)
        .with_requires_counts(true)
        .with_filter("printer")
        .with_order_by("lastupdatedon", SortDirection::Asc);
    let url = query.add_to_url(&base());
    assert_eq!(
        url.query(),
        Some("page=3&perPage=20&requiresCounts=true&Filter=printer&OrderBy=lastupdatedon+asc")
    );
}

#[test]
fn each_q_expression_is_its_own_parameter() {
    let expr = FilterExpression::new().eq("category", 12);
    let query = ListQuery::default()
        .with_q("status:[1]")
        .with_filter_expression(&expr)
        .with_filter_expression(&FilterExpression::new());
    let url = query.add_to_url(&base());
    let qs: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "Q")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(qs, vec!["status:[1]", "category:12"]);
}

#[test]
fn ticket_filters_combine_into_one_q() {
    let url = TicketQuery::default()
        .with_brand_id(4)
        .with_agent_id(77)
        .with_priority_ids(&[2, 3])
        .add_to_url(&base());
    let q: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "Q")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(q, vec!["priority:[2,3] AND brand:[4] AND agent:77"]);
}

#[test]
fn sort_direction_parses_case_insensitively() {
    assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
    assert_eq!("ascending".parse::<SortDirection>(), Ok(SortDirection::Asc));
    assert!("sideways".parse::<SortDirection>().is_err());
}
