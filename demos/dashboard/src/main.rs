//! Prints the organizer dashboard for the logged-in user.
//!
//! ```text
//! eventdesk-dashboard                    # reuse the stored session
//! eventdesk-dashboard <email> <password> # log in first
//! ```
//!
//! Configuration comes from the environment or `.env`
//! (`EVENTDESK_API_BASE_URL`, `EVENTDESK_API_TIMEOUT_MS`); the session is
//! kept in `EVENTDESK_SESSION_FILE` (default `.eventdesk/session.json`).

use std::sync::Arc;

use eventdesk::prelude::*;
use eventdesk::views::DashboardStats;
use tracing_subscriber::EnvFilter;

const SESSION_FILE_VAR: &str = "EVENTDESK_SESSION_FILE";
const DEFAULT_SESSION_FILE: &str = ".eventdesk/session.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,eventdesk=info")),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;
    let session_file = std::env::var(SESSION_FILE_VAR)
        .unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());
    let session = Arc::new(SessionStore::new(FileStorage::new(session_file)));
    let client = ApiClient::builder()
        .config(config)
        .build(ReqwestTransport::new()?, Arc::clone(&session))?;

    let mut args = std::env::args().skip(1);
    if let (Some(email), Some(password)) = (args.next(), args.next()) {
        client.login(&Credentials::new(email, password)).await?;
    }

    let Some(user) = session.get_user().filter(|_| session.is_authenticated())
    else {
        eprintln!("not logged in: run with <email> <password>");
        return Ok(());
    };

    let now = chrono::Utc::now();
    let dashboard = Dashboard::load(&client, user.id.as_str(), now).await;

    if dashboard
        .stats
        .as_ref()
        .is_err_and(|e| e.kind() == ErrorKind::SessionExpired)
    {
        eprintln!("session expired: log in again");
        return Ok(());
    }

    let name = user.display_name().unwrap_or_else(|| user.id.to_string());
    println!("Dashboard for {name}");
    println!();
    match &dashboard.stats {
        Ok(stats) => print_stats(stats),
        Err(e) => println!("Statistics unavailable: {e}"),
    }
    println!();
    print_section("Recent events", &dashboard.recent);
    println!();
    print_section("Upcoming events", &dashboard.upcoming);
    Ok(())
}

fn print_stats(stats: &DashboardStats) {
    println!("Total events:       {}", stats.total_events);
    println!("Upcoming events:    {}", stats.upcoming_events);
    println!("Total participants: {}", stats.total_participants);
    println!("Revenue:            {}", format_currency(stats.total_revenue));
    match &stats.next_event {
        Some(event) => println!("Next:               {}", describe(event)),
        None => println!("Next:               no upcoming events"),
    }
}

fn print_section(title: &str, events: &Result<Vec<Event>, ApiError>) {
    println!("{title}");
    match events {
        Ok(events) if events.is_empty() => println!("  (none)"),
        Ok(events) => {
            for event in events {
                println!("  {}", describe(event));
            }
        }
        Err(e) => println!("  failed to load: {e}"),
    }
}

/// `Title (status) on 2025-03-01`
fn describe(event: &Event) -> String {
    let title = event.title.as_deref().unwrap_or("Untitled event");
    let mut line = title.to_string();
    if let Some(status) = &event.status {
        line.push_str(&format!(" ({status})"));
    }
    if let Some(start) = event.starts_at() {
        line.push_str(&format!(" on {}", start.format("%Y-%m-%d")));
    }
    line
}

fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}
