//! Event board demo
//!
//! Runs a scripted session against a fresh board:
//! - publish an event with a single seat and a workshop
//! - create two institutional users (and fail a non-institutional one)
//! - register the first user, then watch the second bounce off a full event
//! - edit the workshop, then filter the catalog by category
//!
//! The final page view is printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=event_board=debug cargo run --bin event-board
//! ```

use chrono::{Duration, Utc};
use event_board::calendar::datetime_local_value;
use event_board::{
    BoardApp, BoardConfig, BoardEnvironment, EventForm, FilterForm, Interaction, RegistrationForm, Repository,
    UserForm,
};
use event_board_core::environment::SystemClock;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn event_form(title: &str, category: &str, capacity: u32, days_ahead: i64, config: &BoardConfig) -> EventForm {
    EventForm {
        title: title.to_string(),
        description: format!("{title}, open to every campus member"),
        date: datetime_local_value(Utc::now() + Duration::days(days_ahead), config.offset()),
        place: "Amphitheatre A".to_string(),
        category: category.to_string(),
        capacity: capacity.to_string(),
        creator_email: String::new(),
    }
}

async fn print_board(app: &BoardApp, step: &str) {
    let Some(page) = app.page() else {
        return;
    };
    println!("\n== {step} ==");
    println!("{}", page.events.count_label);
    for card in &page.events.cards {
        println!(
            "  - {} [{}] {} | {}{}{}",
            card.title,
            card.category_label,
            card.date_label,
            card.seats_label,
            if card.is_full { " | full" } else { "" },
            if card.is_passed { " | past" } else { "" },
        );
    }
    if let Some(alert) = page.alerts.last() {
        println!("  alert ({}): {}", alert.kind.as_str(), alert.message);
    }
    let registrations = app.state(|state| state.repository.registrations().len()).await;
    println!("  registrations: {registrations}");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_board=debug,event_board_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BoardConfig::from_env();
    tracing::info!(?config, "Starting event board demo");

    let env = BoardEnvironment::new(Arc::new(SystemClock), config.clone());
    let app = BoardApp::new(Repository::new(), env).await;

    // Step 1: publish events
    app.dispatch(Interaction::SubmitEventForm(event_form("Rust meetup", "conference", 1, 2, &config)))
        .await?;
    app.dispatch(Interaction::SubmitEventForm(event_form("Pottery", "atelier", 8, 5, &config)))
        .await?;
    print_board(&app, "Events published").await;

    // Step 2: users
    for (name, email) in [("Ada", "ada@univ.edu"), ("Grace", "grace@navy.ac.uk"), ("Linus", "linus@gmail.com")] {
        app.dispatch(Interaction::SubmitUserForm(UserForm {
            name: name.to_string(),
            email: email.to_string(),
        }))
        .await?;
        print_board(&app, &format!("User {name}")).await;
    }

    // Step 3: fill the meetup
    let ids: Vec<String> = app
        .state(|state| state.repository.events().iter().map(|event| event.id().to_string()).collect())
        .await;
    let [meetup, pottery] = ids.as_slice() else {
        return Err("expected the two demo events".into());
    };
    for (name, email) in [("Ada", "ada@univ.edu"), ("Grace", "grace@navy.ac.uk")] {
        app.dispatch(Interaction::Button {
            action: "register".to_string(),
            event_id: meetup.clone(),
        })
        .await?;
        app.dispatch(Interaction::SubmitRegistrationForm(RegistrationForm {
            name: name.to_string(),
            email: email.to_string(),
        }))
        .await?;
        print_board(&app, &format!("{name} registers for the meetup")).await;
    }

    // Step 4: a stale id from old markup
    app.dispatch(Interaction::Button {
        action: "detail".to_string(),
        event_id: "deleted-event".to_string(),
    })
    .await?;
    print_board(&app, "Stale button").await;

    // Step 5: edit the workshop
    app.dispatch(Interaction::Button {
        action: "edit".to_string(),
        event_id: pottery.clone(),
    })
    .await?;
    app.dispatch(Interaction::SubmitEditForm(event_form(
        "Pottery for beginners",
        "workshop",
        12,
        6,
        &config,
    )))
    .await?;
    print_board(&app, "Workshop edited").await;

    // Step 6: filter
    app.dispatch(Interaction::FiltersChanged(FilterForm {
        category: "workshop".to_string(),
        ..FilterForm::default()
    }))
    .await?;
    print_board(&app, "Workshops only").await;

    if let Some(page) = app.page() {
        println!("\n{}", serde_json::to_string_pretty(&page)?);
    }

    app.shutdown();
    Ok(())
}
