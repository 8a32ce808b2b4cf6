use super::ApplicationEnv;
use crate::{
    repository::{BookingsRepositoryImpl, EventsRepositoryImpl, UsersRepositoryImpl},
    service::{
        accounts_service::{AccountsService, AccountsServiceConfig, AccountsServiceImpl},
        bookings_service::{BookingsService, BookingsServiceConfig, BookingsServiceImpl},
        eticket_service::ETicketServiceImpl,
        events_service::{EventsService, EventsServiceImpl},
        mailer_service::{SmtpMailerService, SmtpMailerServiceConfig},
        recommendations_service::{RecommendationsService, RecommendationsServiceImpl},
    },
};
use axum::extract::FromRef;
use jsonwebtoken::EncodingKey;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub accounts_service: Arc<dyn AccountsService>,
    pub events_service: Arc<dyn EventsService>,
    pub bookings_service: Arc<dyn BookingsService>,
    pub recommendations_service: Arc<dyn RecommendationsService>,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let events_repository = EventsRepositoryImpl::new(db.clone()).await?;
    let events_repository = Arc::new(events_repository);
    let bookings_repository = BookingsRepositoryImpl::new(db.clone()).await?;
    let bookings_repository = Arc::new(bookings_repository);
    let users_repository = UsersRepositoryImpl::new(db).await?;
    let users_repository = Arc::new(users_repository);

    tracing::info!("creating services");
    let config = SmtpMailerServiceConfig {
        relay: env.smtp_relay.clone(),
        username: env.smtp_username.clone(),
        password: env.smtp_password.clone(),
        from: env.smtp_from.clone(),
        timeout: env.smtp_timeout,
    };
    let mailer_service = SmtpMailerService::new(config)?;
    let mailer_service = Arc::new(mailer_service);

    let eticket_service = Arc::new(ETicketServiceImpl::new());

    let config = AccountsServiceConfig {
        jwt_encoding_key: EncodingKey::from_secret(env.jwt_secret.as_bytes()),
        jwt_lifespan: env.jwt_lifespan,
        otp_lifespan: env.otp_lifespan,
    };
    let accounts_service =
        AccountsServiceImpl::new(config, users_repository.clone(), mailer_service.clone());
    let accounts_service = Arc::new(accounts_service);

    let events_service = EventsServiceImpl::new(events_repository.clone());
    let events_service = Arc::new(events_service);

    let config = BookingsServiceConfig {
        max_tickets_per_booking: env.max_tickets_per_booking,
    };
    let bookings_service = BookingsServiceImpl::new(
        config,
        bookings_repository.clone(),
        events_repository.clone(),
        users_repository,
        eticket_service,
        mailer_service,
    );
    let bookings_service = Arc::new(bookings_service);

    let recommendations_service =
        RecommendationsServiceImpl::new(events_repository, bookings_repository);
    let recommendations_service = Arc::new(recommendations_service);

    Ok((
        ApplicationState {
            accounts_service,
            events_service,
            bookings_service,
            recommendations_service,
        },
        ApplicationStateToClose { db_client },
    ))
}
