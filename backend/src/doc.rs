//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint path, the request and response schemas, and
//! the bearer token security scheme.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::PaymentIntent;
use crate::domain::{ClassStatus, Role};
use crate::inbound::http::cart::CartAddRequest;
use crate::inbound::http::classes::{ClassPayload, ModerationPayload};
use crate::inbound::http::error::ApiErrorBody;
use crate::inbound::http::payments::{ConfirmRequest, IntentRequest};
use crate::inbound::http::tokens::{TokenRequest, TokenResponse};
use crate::inbound::http::users::{
    AlreadyExistsResponse, RegisterRequest, RoleChangeRequest, RoleFlagsResponse,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Classfit backend API",
        description = "HTTP interface for the fitness-class marketplace.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::tokens::issue_token,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::role_flags,
        crate::inbound::http::users::change_role,
        crate::inbound::http::classes::list_classes,
        crate::inbound::http::classes::get_class,
        crate::inbound::http::classes::create_class,
        crate::inbound::http::classes::instructor_classes,
        crate::inbound::http::classes::replace_class,
        crate::inbound::http::classes::moderate_class,
        crate::inbound::http::classes::delete_class,
        crate::inbound::http::instructors::list_instructors,
        crate::inbound::http::instructors::get_instructor,
        crate::inbound::http::cart::list_cart,
        crate::inbound::http::cart::add_to_cart,
        crate::inbound::http::cart::remove_from_cart,
        crate::inbound::http::payments::create_payment_intent,
        crate::inbound::http::payments::confirm_payment,
        crate::inbound::http::payments::list_payments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiErrorBody,
        Role,
        ClassStatus,
        PaymentIntent,
        TokenRequest,
        TokenResponse,
        RegisterRequest,
        AlreadyExistsResponse,
        RoleChangeRequest,
        RoleFlagsResponse,
        ClassPayload,
        ModerationPayload,
        CartAddRequest,
        IntentRequest,
        ConfirmRequest,
    )),
    tags(
        (name = "auth", description = "Credential issuance"),
        (name = "users", description = "Registration and role management"),
        (name = "classes", description = "Class offering catalogue and moderation"),
        (name = "instructors", description = "Public instructor profiles"),
        (name = "cart", description = "Enrollment intents"),
        (name = "payments", description = "Payment intents and booking confirmation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
