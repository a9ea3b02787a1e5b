//! Backend entry-point: wires adapters into the HTTP server.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use classfit::inbound::http::health::HealthState;
use classfit::inbound::http::state::{HttpState, HttpStatePorts};
use classfit::outbound::gateway::LocalPaymentGateway;
use classfit::outbound::persistence::{
    InMemoryCartRepository, InMemoryClassRepository, InMemoryInstructorRepository,
    InMemoryPaymentRepository, InMemoryUserRepository,
};
use classfit::outbound::token::JwtTokenCodec;
use classfit::server::{create_server, ServerConfig};

const DEFAULT_TOKEN_TTL_SECS: i64 = 3 * 60 * 60;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let secret = load_token_secret()?;
    let ttl_secs = env::var("TOKEN_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let http_state = web::Data::new(HttpState::new(HttpStatePorts {
        tokens: Arc::new(JwtTokenCodec::new(&secret, ttl_secs)),
        users: Arc::new(InMemoryUserRepository::new()),
        classes: Arc::new(InMemoryClassRepository::new()),
        instructors: Arc::new(InMemoryInstructorRepository::new()),
        cart_items: Arc::new(InMemoryCartRepository::new()),
        payments: Arc::new(InMemoryPaymentRepository::new()),
        gateway: Arc::new(LocalPaymentGateway::new()),
    }));
    let health_state = web::Data::new(HealthState::new());

    let server = create_server(health_state, http_state, ServerConfig::new(bind_addr))?;
    server.await
}

/// Read the credential signing secret from a mounted file or the
/// environment, falling back to an ephemeral secret in dev builds.
fn load_token_secret() -> std::io::Result<Vec<u8>> {
    let path =
        env::var("TOKEN_SECRET_FILE").unwrap_or_else(|_| "/var/run/secrets/token_secret".into());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            if let Ok(secret) = env::var("TOKEN_SECRET") {
                return Ok(secret.into_bytes());
            }
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %path, error = %e, "using temporary token secret (dev only)");
                Ok(uuid::Uuid::new_v4().as_bytes().to_vec())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read token secret at {path}: {e}"
                )))
            }
        }
    }
}
