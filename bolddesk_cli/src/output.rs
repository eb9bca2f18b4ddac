use anyhow::Result;
use bolddesk_lib::bolddesk_api::Error as ApiError;
use bolddesk_lib::types::{
    Agent, Brand, Contact, ContactGroup, CreatedResponse, FieldOption, MessageResponse, Ticket,
    TicketField, TicketMessage, TicketNote, Worklog,
};
use bolddesk_lib::{BoldDeskError, RateLimitSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
    Csv,
}

#[derive(Tabled, Serialize)]
struct TicketRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Subject")]
    #[serde(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    #[serde(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Agent")]
    #[serde(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct ContactRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    #[serde(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Blocked")]
    #[serde(rename = "Blocked")]
    blocked: String,
}

#[derive(Tabled, Serialize)]
struct ContactGroupRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Domains")]
    #[serde(rename = "Domains")]
    domains: String,
    #[tabled(rename = "Contacts")]
    #[serde(rename = "Contacts")]
    contacts: u64,
}

#[derive(Tabled, Serialize)]
struct AgentRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Active")]
    #[serde(rename = "Active")]
    active: String,
    #[tabled(rename = "Roles")]
    #[serde(rename = "Roles")]
    roles: String,
}

#[derive(Tabled, Serialize)]
struct BrandRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    #[serde(rename = "URL")]
    url: String,
    #[tabled(rename = "Default")]
    #[serde(rename = "Default")]
    default: String,
}

#[derive(Tabled, Serialize)]
struct WorklogRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Ticket")]
    #[serde(rename = "Ticket")]
    ticket: i64,
    #[tabled(rename = "Time")]
    #[serde(rename = "Time")]
    time: String,
    #[tabled(rename = "Billable")]
    #[serde(rename = "Billable")]
    billable: String,
    #[tabled(rename = "Agent")]
    #[serde(rename = "Agent")]
    agent: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
    #[tabled(rename = "API Name")]
    #[serde(rename = "API Name")]
    api_name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Required")]
    #[serde(rename = "Required")]
    required: String,
    #[tabled(rename = "Options")]
    #[serde(rename = "Options")]
    options: usize,
}

#[derive(Tabled, Serialize)]
struct FieldOptionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
    #[tabled(rename = "Order")]
    #[serde(rename = "Order")]
    order: i32,
    #[tabled(rename = "Default")]
    #[serde(rename = "Default")]
    default: String,
}

#[derive(Tabled, Serialize)]
struct PostRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Author")]
    #[serde(rename = "Author")]
    author: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
    #[tabled(rename = "Text")]
    #[serde(rename = "Text")]
    text: String,
}

#[derive(Tabled, Serialize)]
struct RateLimitRow {
    #[tabled(rename = "Limit")]
    #[serde(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Remaining")]
    #[serde(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Reset")]
    #[serde(rename = "Reset")]
    reset: String,
}

// -- Row builders --

fn build_ticket_rows(tickets: &[Ticket]) -> Vec<TicketRow> {
    tickets
        .iter()
        .map(|t| TicketRow {
            id: t.ticket_id,
            subject: truncate(&t.title, 60),
            status: t.status_name().to_string(),
            priority: t.priority_name().to_string(),
            agent: t.agent_name().to_string(),
            created: format_date(t.created_on),
        })
        .collect()
}

fn build_contact_rows(contacts: &[Contact]) -> Vec<ContactRow> {
    contacts
        .iter()
        .map(|c| ContactRow {
            id: c.contact_id,
            name: c.contact_name.clone(),
            email: c.email_id.clone().unwrap_or_default(),
            phone: c
                .contact_phone_no
                .clone()
                .or_else(|| c.contact_mobile_no.clone())
                .unwrap_or_default(),
            blocked: yes_no(c.is_blocked),
        })
        .collect()
}

fn build_contact_group_rows(groups: &[ContactGroup]) -> Vec<ContactGroupRow> {
    groups
        .iter()
        .map(|g| ContactGroupRow {
            id: g.contact_group_id,
            name: g.contact_group_name.clone(),
            domains: g.contact_group_domains.join(", "),
            contacts: g.contacts_count,
        })
        .collect()
}

fn build_agent_rows(agents: &[Agent]) -> Vec<AgentRow> {
    agents
        .iter()
        .map(|a| AgentRow {
            id: a.agent_id,
            name: a.name.clone(),
            email: a.email_id.clone().unwrap_or_default(),
            active: yes_no(a.is_active),
            roles: a
                .roles
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn build_brand_rows(brands: &[Brand]) -> Vec<BrandRow> {
    brands
        .iter()
        .map(|b| BrandRow {
            id: b.brand_id,
            name: b.brand_name.clone(),
            url: b.brand_url.clone().unwrap_or_default(),
            default: yes_no(b.is_default),
        })
        .collect()
}

fn build_worklog_rows(worklogs: &[Worklog]) -> Vec<WorklogRow> {
    worklogs
        .iter()
        .map(|w| WorklogRow {
            id: w.id,
            ticket: w.ticket_id,
            time: w.time_spent_display(),
            billable: yes_no(w.is_billable),
            agent: w.agent.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            date: format_date(w.log_date),
        })
        .collect()
}

fn build_field_rows(fields: &[TicketField]) -> Vec<FieldRow> {
    fields
        .iter()
        .map(|f| FieldRow {
            id: f.id,
            label: f.label.clone(),
            api_name: f.api_name.clone(),
            field_type: f.field_type.clone(),
            required: yes_no(f.is_required),
            options: f.options.len(),
        })
        .collect()
}

fn build_field_option_rows(options: &[FieldOption]) -> Vec<FieldOptionRow> {
    options
        .iter()
        .map(|o| FieldOptionRow {
            id: o.id,
            value: o.value.clone(),
            order: o.sort_order,
            default: yes_no(o.is_default),
        })
        .collect()
}

fn build_note_rows(notes: &[TicketNote]) -> Vec<PostRow> {
    notes
        .iter()
        .map(|n| PostRow {
            id: n.note_id,
            author: n.created_by.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            created: format_date(n.created_on),
            text: truncate(&n.description, 80),
        })
        .collect()
}

fn build_message_rows(messages: &[TicketMessage]) -> Vec<PostRow> {
    messages
        .iter()
        .map(|m| PostRow {
            id: m.message_id,
            author: m.updated_by.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            created: format_date(m.created_on),
            text: truncate(&m.description, 80),
        })
        .collect()
}

fn build_rate_limit_rows(snapshot: &RateLimitSnapshot) -> Vec<RateLimitRow> {
    let or_dash = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    vec![RateLimitRow {
        limit: or_dash(snapshot.limit),
        remaining: or_dash(snapshot.remaining),
        reset: snapshot
            .reset
            .map(|r| r.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string()),
    }]
}

// -- Generic renderers --

fn print_rows<T: Serialize, R: Tabled + Serialize>(
    items: &[T],
    rows: Vec<R>,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}

pub fn print_tickets(tickets: &[Ticket], format: &OutputFormat) -> Result<()> {
    print_rows(tickets, build_ticket_rows(tickets), format)
}

pub fn print_contacts(contacts: &[Contact], format: &OutputFormat) -> Result<()> {
    print_rows(contacts, build_contact_rows(contacts), format)
}

pub fn print_contact_groups(groups: &[ContactGroup], format: &OutputFormat) -> Result<()> {
    print_rows(groups, build_contact_group_rows(groups), format)
}

pub fn print_agents(agents: &[Agent], format: &OutputFormat) -> Result<()> {
    print_rows(agents, build_agent_rows(agents), format)
}

pub fn print_brands(brands: &[Brand], format: &OutputFormat) -> Result<()> {
    print_rows(brands, build_brand_rows(brands), format)
}

pub fn print_worklogs(worklogs: &[Worklog], format: &OutputFormat) -> Result<()> {
    print_rows(worklogs, build_worklog_rows(worklogs), format)
}

pub fn print_fields(fields: &[TicketField], format: &OutputFormat) -> Result<()> {
    print_rows(fields, build_field_rows(fields), format)
}

pub fn print_field_options(options: &[FieldOption], format: &OutputFormat) -> Result<()> {
    print_rows(options, build_field_option_rows(options), format)
}

pub fn print_notes(notes: &[TicketNote], format: &OutputFormat) -> Result<()> {
    print_rows(notes, build_note_rows(notes), format)
}

pub fn print_messages(messages: &[TicketMessage], format: &OutputFormat) -> Result<()> {
    print_rows(messages, build_message_rows(messages), format)
}

pub fn print_rate_limit(snapshot: Option<&RateLimitSnapshot>, format: &OutputFormat) -> Result<()> {
    match snapshot {
        Some(snapshot) => print_rows(
            std::slice::from_ref(snapshot),
            build_rate_limit_rows(snapshot),
            format,
        ),
        None => {
            eprintln!("No rate-limit information yet. Run a command that calls the API first.");
            Ok(())
        }
    }
}

/// Reports the outcome of a create call.
pub fn print_created(what: &str, resp: &CreatedResponse, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(resp),
        _ => println!("Created {} {}", what, resp.id),
    }
}

/// Reports the outcome of an update, delete or action call.
pub fn print_done(summary: &str, resp: &MessageResponse, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(resp),
        _ => match resp.message.as_deref().filter(|m| !m.is_empty()) {
            Some(message) => println!("{}: {}", summary, message),
            None => println!("{}", summary),
        },
    }
}

/// Prints a single record: the object itself for JSON, otherwise a one-row table.
pub fn print_one<T: Serialize>(
    item: &T,
    format: &OutputFormat,
    print: fn(&[T], &OutputFormat) -> Result<()>,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(item);
            Ok(())
        }
        _ => print(std::slice::from_ref(item), format),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Errors --

/// Renders a command failure for the terminal, with per-kind detail for API errors.
pub fn render_error(err: &anyhow::Error) -> String {
    let api = err
        .downcast_ref::<ApiError>()
        .or_else(|| err.downcast_ref::<BoldDeskError>().and_then(BoldDeskError::as_api));
    match api {
        Some(api) => render_api_error(api),
        None => format!("Error: {:#}", err),
    }
}

pub fn render_api_error(err: &ApiError) -> String {
    let mut lines = Vec::new();
    match err {
        ApiError::Authentication { .. } => {
            lines.push(format!("Authentication failed: {}", err.message()));
            lines.extend(field_lines(err));
            lines.push("Check BOLDDESK_API_KEY or the api_key in your config file.".to_string());
        }
        ApiError::Validation { .. } => {
            lines.push(format!("Validation failed: {}", err.message()));
            lines.extend(field_lines(err));
        }
        ApiError::RateLimit { .. } => {
            lines.push(format!("Rate limit exceeded: {}", err.message()));
            match err.retry_after() {
                Some(wait) => lines.push(format!("Retry in {}s.", wait.as_secs().max(1))),
                None => lines.push("Retry later.".to_string()),
            }
        }
        ApiError::Timeout { url, elapsed_ms } => {
            lines.push(format!("Request timed out after {} ms ({})", elapsed_ms, url));
        }
        ApiError::Api { status, .. } => {
            lines.push(format!("API error (status {}): {}", status, err.message()));
            lines.extend(field_lines(err));
        }
        other => lines.push(format!("Error: {}", other)),
    }
    lines.join("\n")
}

fn field_lines(err: &ApiError) -> Vec<String> {
    let summary = err.message();
    let mut lines = Vec::new();
    for (field, messages) in err.field_errors() {
        if field.is_empty() {
            // Unnamed entries that only repeat the summary add nothing.
            lines.extend(
                messages
                    .into_iter()
                    .filter(|m| !m.is_empty() && *m != summary)
                    .map(|m| format!("  {}", m)),
            );
        } else {
            lines.push(format!("  {}: {}", field, messages.join("; ")));
        }
    }
    lines
}

// -- Formatting helpers --

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_tickets_fixture() -> Vec<Ticket> {
        let json_str = include_str!("../../bolddesk_api/tests/fixtures/tickets.json");
        let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
        serde_json::from_value(resp["result"].clone()).unwrap()
    }

    fn load_agents_fixture() -> Vec<Agent> {
        let json_str = include_str!("../../bolddesk_api/tests/fixtures/agents.json");
        let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
        serde_json::from_value(resp["result"].clone()).unwrap()
    }

    fn load_worklogs_fixture() -> Vec<Worklog> {
        let json_str = include_str!("../../bolddesk_api/tests/fixtures/worklogs.json");
        let resp: serde_json::Value = serde_json::from_str(json_str).unwrap();
        serde_json::from_value(resp["result"].clone()).unwrap()
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    // -- Row builder tests --

    #[test]
    fn test_build_ticket_rows_mapping() {
        let tickets = load_tickets_fixture();
        let rows = build_ticket_rows(&tickets);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, 1001);
        assert_eq!(row.subject, "Printer on floor 3 is jammed");
        assert_eq!(row.status, "Open");
        assert_eq!(row.priority, "High");
        assert_eq!(row.agent, "Sam Agent");
        assert_eq!(row.created, "2024-03-01 09:15");
        assert_eq!(rows[1].agent, "");
    }

    #[test]
    fn test_build_agent_rows_mapping() {
        let agents = load_agents_fixture();
        let rows = build_agent_rows(&agents);
        assert_eq!(rows[0].roles, "Administrator");
        assert_eq!(rows[0].active, "yes");
        assert_eq!(rows[1].active, "no");
        assert_eq!(rows[1].roles, "");
    }

    #[test]
    fn test_build_worklog_rows_mapping() {
        let worklogs = load_worklogs_fixture();
        let rows = build_worklog_rows(&worklogs);
        assert_eq!(rows[0].time, "1h 30m");
        assert_eq!(rows[0].billable, "yes");
        assert_eq!(rows[0].agent, "Sam Agent");
    }

    #[test]
    fn test_build_rows_empty() {
        assert!(build_ticket_rows(&[]).is_empty());
        assert!(build_contact_rows(&[]).is_empty());
    }

    #[test]
    fn test_rate_limit_row_placeholders() {
        let rows = build_rate_limit_rows(&RateLimitSnapshot {
            remaining: Some(4),
            ..Default::default()
        });
        assert_eq!(rows[0].limit, "-");
        assert_eq!(rows[0].remaining, "4");
        assert_eq!(rows[0].reset, "-");
    }

    // -- CSV output tests --

    #[test]
    fn test_csv_ticket_headers() {
        let rows = build_ticket_rows(&load_tickets_fixture());
        let csv = csv_from_rows(&rows);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "ID,Subject,Status,Priority,Agent,Created");
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_markdown_table_style() {
        let mut table = Table::new(build_ticket_rows(&load_tickets_fixture()));
        table.with(Style::markdown());
        let rendered = table.to_string();
        assert!(rendered.starts_with("| ID"));
        assert!(rendered.contains("|---"));
    }

    // -- Formatting helpers --

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a  b\nc", 10), "a b c");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    // -- Error rendering --

    #[test]
    fn test_render_validation_error() {
        let body = r#"{"message":"Invalid","statusCode":400,"errors":[{"field":"email","errorMessage":"required","errorType":"Required"},{"field":"email","errorMessage":"must be unique","errorType":"Duplicate"}]}"#;
        let err = anyhow::Error::new(ApiError::from_response(400, body, None));
        assert_eq!(
            render_error(&err),
            "Validation failed: Invalid\n  email: required; must be unique"
        );
    }

    #[test]
    fn test_render_authentication_error() {
        let err = anyhow::Error::new(BoldDeskError::Api(ApiError::from_response(401, "", None)));
        let rendered = render_error(&err);
        assert!(rendered.starts_with("Authentication failed: "));
        assert!(rendered.contains("BOLDDESK_API_KEY"));
    }

    #[test]
    fn test_render_rate_limit_error() {
        let snapshot = RateLimitSnapshot {
            remaining: Some(0),
            reset: Some(Utc::now() + chrono::Duration::seconds(90)),
            ..Default::default()
        };
        let err = anyhow::Error::new(ApiError::from_response(429, "", Some(snapshot)));
        let rendered = render_error(&err);
        assert!(rendered.starts_with("Rate limit exceeded"));
        assert!(rendered.contains("Retry in "), "{}", rendered);
    }

    #[test]
    fn test_render_plain_text_api_error() {
        let err = anyhow::Error::new(ApiError::from_response(502, "Bad Gateway", None));
        assert_eq!(render_error(&err), "API error (status 502): Bad Gateway");
    }

    #[test]
    fn test_render_unnamed_server_detail() {
        let body = r#"{"message":"Forbidden","statusCode":403,"errors":[{"field":"","errorMessage":"Agent lacks the Tickets.Delete permission","errorType":"Permission"},{"field":"","errorMessage":"Forbidden","errorType":""}]}"#;
        let err = anyhow::Error::new(ApiError::from_response(403, body, None));
        assert_eq!(
            render_error(&err),
            "API error (status 403): Forbidden\n  Agent lacks the Tickets.Delete permission"
        );
    }

    #[test]
    fn test_render_other_error() {
        let err = anyhow::anyhow!("something broke");
        assert_eq!(render_error(&err), "Error: something broke");
    }
}
