use anyhow::anyhow;
use std::{net::SocketAddr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_name: String,

    pub max_http_content_len: usize,

    pub jwt_secret: String,
    pub jwt_lifespan: Duration,
    pub otp_lifespan: Duration,

    /// No cap when unset; the catalog carries no seat inventory
    pub max_tickets_per_booking: Option<u32>,

    pub smtp_relay: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
    pub smtp_timeout: Duration,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("EVENTLY_CORE_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("EVENTLY_CORE_LOG_FILENAME")?;
        let bind_address = Self::env_var("EVENTLY_CORE_BIND_ADDRESS")?.parse()?;
        let db_connection_string = Self::env_var("EVENTLY_CORE_DB_CONNECTION_STRING")?;
        let db_name = Self::env_var("EVENTLY_CORE_DB_NAME")?;
        let max_http_content_len =
            Self::env_var("EVENTLY_CORE_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let jwt_secret = Self::env_var("EVENTLY_CORE_JWT_SECRET")?;
        let jwt_lifespan = Self::env_var("EVENTLY_CORE_JWT_LIFESPAN")?.parse()?;
        let jwt_lifespan = Duration::from_secs(jwt_lifespan);
        let otp_lifespan = Self::env_var("EVENTLY_CORE_OTP_LIFESPAN")?.parse()?;
        let otp_lifespan = Duration::from_secs(otp_lifespan);
        let max_tickets_per_booking = Self::optional_env_var("EVENTLY_CORE_MAX_TICKETS_PER_BOOKING")
            .map(|value| value.parse())
            .transpose()?;
        let smtp_relay = Self::env_var("EVENTLY_CORE_SMTP_RELAY")?;
        let smtp_username = Self::env_var("EVENTLY_CORE_SMTP_USERNAME")?;
        let smtp_password = Self::env_var("EVENTLY_CORE_SMTP_PASSWORD")?;
        let smtp_from = Self::env_var("EVENTLY_CORE_SMTP_FROM")?;
        let smtp_timeout = Self::env_var("EVENTLY_CORE_SMTP_TIMEOUT")?.parse()?;
        let smtp_timeout = Duration::from_secs(smtp_timeout);

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_name,
            max_http_content_len,
            jwt_secret,
            jwt_lifespan,
            otp_lifespan,
            max_tickets_per_booking,
            smtp_relay,
            smtp_username,
            smtp_password,
            smtp_from,
            smtp_timeout,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn optional_env_var(name: &'static str) -> Option<String> {
        std::env::var(name).ok()
    }
}
