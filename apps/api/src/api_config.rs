use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use portfolio_application::{DEFAULT_FROM_ADDRESS, RateLimitRule};
use portfolio_core::{AppError, NonEmptyString};
use portfolio_infrastructure::RESEND_API_URL;
use tracing_subscriber::EnvFilter;

/// One day.
const MAX_RATE_LIMIT_WINDOW_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendRuntimeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailProviderConfig {
    Console,
    Resend(ResendRuntimeConfig),
    Smtp(SmtpRuntimeConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub email_provider: EmailProviderConfig,
    pub email_timeout_seconds: u64,
    pub contact_to_email: Option<NonEmptyString>,
    pub from_email: String,
    pub rate_limit_rule: RateLimitRule,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_host = non_empty("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", non_empty("API_PORT"), 3001_u16)?;
        let frontend_url =
            non_empty("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let email_provider = match non_empty("EMAIL_PROVIDER")
            .unwrap_or_else(|| "resend".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "resend" => EmailProviderConfig::Resend(ResendRuntimeConfig {
                api_key: non_empty("RESEND_API_KEY"),
                base_url: non_empty("RESEND_API_URL")
                    .unwrap_or_else(|| RESEND_API_URL.to_owned()),
            }),
            "smtp" => EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                host: required(non_empty("SMTP_HOST"), "SMTP_HOST")?,
                port: parse_or("SMTP_PORT", non_empty("SMTP_PORT"), 587_u16)?,
                username: required(non_empty("SMTP_USERNAME"), "SMTP_USERNAME")?,
                password: non_empty("SMTP_PASSWORD"),
            }),
            other => {
                return Err(AppError::Validation(format!(
                    "EMAIL_PROVIDER must be one of 'resend', 'smtp' or 'console', got '{other}'"
                )));
            }
        };

        let email_timeout_seconds =
            parse_or("EMAIL_TIMEOUT_SECONDS", non_empty("EMAIL_TIMEOUT_SECONDS"), 10_u64)?;
        if email_timeout_seconds == 0 {
            return Err(AppError::Validation(
                "EMAIL_TIMEOUT_SECONDS must be greater than zero".to_owned(),
            ));
        }

        let max_attempts = parse_or(
            "CONTACT_RATE_LIMIT_MAX",
            non_empty("CONTACT_RATE_LIMIT_MAX"),
            RateLimitRule::CONTACT_MAX_ATTEMPTS,
        )?;
        let window_seconds = parse_or(
            "CONTACT_RATE_LIMIT_WINDOW_SECONDS",
            non_empty("CONTACT_RATE_LIMIT_WINDOW_SECONDS"),
            RateLimitRule::CONTACT_WINDOW_SECONDS,
        )?;
        if max_attempts == 0 || window_seconds <= 0 {
            return Err(AppError::Validation(
                "contact rate limit ceiling and window must be positive".to_owned(),
            ));
        }
        if window_seconds > MAX_RATE_LIMIT_WINDOW_SECONDS {
            return Err(AppError::Validation(format!(
                "CONTACT_RATE_LIMIT_WINDOW_SECONDS must be at most {MAX_RATE_LIMIT_WINDOW_SECONDS}"
            )));
        }

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            email_provider,
            email_timeout_seconds,
            contact_to_email: NonEmptyString::from_optional(non_empty("CONTACT_TO_EMAIL")),
            from_email: non_empty("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_owned()),
            rate_limit_rule: RateLimitRule::new("contact", max_attempts, window_seconds),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}
