//!
//! Drops and reseeds the database with a demo catalog.
//! Never part of any request path.
//!

use evently_core::{
    application::ApplicationEnv,
    repository::{
        BookingsRepositoryImpl, EventsRepository, EventsRepositoryImpl, NewEvent, UsersRepository,
        UsersRepositoryImpl,
    },
};
use mongodb::{options::ClientOptions, Client};
use time::{Duration, OffsetDateTime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let env = ApplicationEnv::parse()?;

    tracing_subscriber::fmt().with_target(false).init();

    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("clearing existing data");
    for collection in ["users", "events", "bookings"] {
        db.collection::<bson::Document>(collection).drop().await?;
    }

    let users_repository = UsersRepositoryImpl::new(db.clone()).await?;
    let events_repository = EventsRepositoryImpl::new(db.clone()).await?;
    // bookings start empty, the repository is created for its indexes
    let _bookings_repository = BookingsRepositoryImpl::new(db).await?;

    tracing::info!("seeding users");
    let now = OffsetDateTime::now_utc();
    let admin = users_repository
        .insert(
            "Admin User".to_string(),
            "admin@example.com".to_string(),
            bcrypt::hash("admin123", bcrypt::DEFAULT_COST)?,
            "admin".to_string(),
            now,
        )
        .await?;

    let users = [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
        ("Bob Johnson", "bob@example.com"),
    ];
    for (name, email) in users {
        users_repository
            .insert(
                name.to_string(),
                email.to_string(),
                bcrypt::hash("password123", bcrypt::DEFAULT_COST)?,
                "user".to_string(),
                now,
            )
            .await?;
    }

    tracing::info!("seeding events");
    let events = [
        (
            "Summer Music Festival",
            "Three stages and an open-air night of live acts.",
            "Music",
            "Riverside Park",
            30,
            "18:00",
            150,
        ),
        (
            "Indie Rock Night",
            "Local bands, small stage, loud amps.",
            "Music",
            "The Basement Club",
            45,
            "20:00",
            60,
        ),
        (
            "Tech Innovators Conference",
            "Talks and workshops from engineering teams shipping at scale.",
            "Technology",
            "Convention Center Hall A",
            60,
            "09:00",
            300,
        ),
        (
            "City Marathon",
            "42 kilometers through the old town and along the river.",
            "Sports",
            "Central Square",
            90,
            "07:30",
            40,
        ),
        (
            "Street Food Carnival",
            "Forty kitchens, one square, no reservations.",
            "Food",
            "Market Square",
            20,
            "12:00",
            25,
        ),
        (
            "Modern Art Expo",
            "A juried exhibition of contemporary painting and sculpture.",
            "Art",
            "City Gallery",
            75,
            "10:00",
            80,
        ),
    ];
    let events = events
        .map(
            |(title, description, category, venue, days_ahead, time, ticket_price)| NewEvent {
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                venue: venue.to_string(),
                date: now + Duration::days(days_ahead),
                time: time.to_string(),
                ticket_price,
                image_url: None,
                is_active: true,
                created_by: admin.id,
                created_at: now,
            },
        )
        .into_iter()
        .collect();
    events_repository.insert_many(events).await?;

    tracing::info!("seeding finished");

    db_client.shutdown().await;

    Ok(())
}
