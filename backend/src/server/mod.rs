//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use crate::domain::DomainError;
use crate::inbound::http::cart::{add_to_cart, list_cart, remove_from_cart};
use crate::inbound::http::classes::{
    create_class, delete_class, get_class, instructor_classes, list_classes, moderate_class,
    replace_class,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::instructors::{get_instructor, list_instructors};
use crate::inbound::http::payments::{confirm_payment, create_payment_intent, list_payments};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tokens::issue_token;
use crate::inbound::http::users::{change_role, list_users, register_user, role_flags};
use crate::inbound::http::ApiError;
use crate::middleware::Trace;

/// Assemble the application with every route and middleware registered.
///
/// Shared by `create_server` and the integration tests, so the routing table
/// under test is exactly the one served in production.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Malformed JSON bodies surface in the same envelope as domain errors.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(DomainError::invalid_request(err.to_string())).into()
    });

    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .app_data(json_config)
        .wrap(Trace)
        .service(issue_token)
        .service(register_user)
        .service(list_users)
        .service(role_flags)
        .service(change_role)
        .service(list_classes)
        .service(instructor_classes)
        .service(get_class)
        .service(create_class)
        .service(replace_class)
        .service(moderate_class)
        .service(delete_class)
        .service(list_instructors)
        .service(get_instructor)
        .service(list_cart)
        .service(add_to_cart)
        .service(remove_from_cart)
        .service(create_payment_intent)
        .service(confirm_payment)
        .service(list_payments)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server over the prepared state.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(http_state.clone(), server_health_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
