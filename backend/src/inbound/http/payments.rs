//! Payment handlers: intent creation and booking confirmation.
//!
//! ```text
//! POST /payment-intent   (authenticated) {"price":20.0}
//! POST /payment          (authenticated + self) -> orchestrator
//! GET  /payment/{email}  (self)
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::PaymentIntent;
use crate::domain::{
    ClassId, ConfirmPayment, DomainError, EmailAddress, PaymentRecord, Price,
};
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /payment-intent`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct IntentRequest {
    pub price: f64,
}

/// Request payload for `POST /payment`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub class_id: Uuid,
    pub email: String,
    pub price: f64,
    /// Gateway transaction reference; generated when the client omits it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_ref: Option<String>,
}

/// Create a payment intent over the minor-unit amount.
#[utoipa::path(
    post,
    path = "/payment-intent",
    request_body = IntentRequest,
    responses(
        (status = 200, description = "Gateway client secret", body = PaymentIntent),
        (status = 400, description = "Malformed price"),
        (status = 401, description = "Missing or invalid credential"),
    ),
    tags = ["payments"],
    operation_id = "createPaymentIntent"
)]
#[post("/payment-intent")]
pub async fn create_payment_intent(
    state: web::Data<HttpState>,
    _identity: BearerIdentity,
    payload: web::Json<IntentRequest>,
) -> ApiResult<web::Json<PaymentIntent>> {
    let price = Price::new(payload.price)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    Ok(web::Json(state.booking.create_intent(price).await?))
}

/// Confirm a payment, reserving a seat atomically before recording it.
///
/// The body e-mail must match the verified caller: payments are authored on
/// behalf of the paying student only.
#[utoipa::path(
    post,
    path = "/payment",
    request_body = ConfirmRequest,
    responses(
        (status = 201, description = "Recorded payment"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Body e-mail is not the caller"),
        (status = 404, description = "Unknown class"),
        (status = 409, description = "Class is fully booked; nothing recorded"),
    ),
    tags = ["payments"],
    operation_id = "confirmPayment"
)]
#[post("/payment")]
pub async fn confirm_payment(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    payload: web::Json<ConfirmRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let email = EmailAddress::parse(body.email)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    state.require_self(&identity, &email).await?;
    let price = Price::new(body.price)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let record = state
        .booking
        .confirm(ConfirmPayment {
            class_id: ClassId::from(body.class_id),
            email,
            price,
            transaction_ref: body
                .transaction_ref
                .unwrap_or_else(|| format!("txn_{}", Uuid::new_v4().simple())),
        })
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// List the caller's payment history. Ownership-gated.
#[utoipa::path(
    get,
    path = "/payment/{email}",
    params(("email" = String, Path, description = "Payer e-mail")),
    responses(
        (status = 200, description = "The payer's records"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Not the caller's history"),
    ),
    tags = ["payments"],
    operation_id = "listPayments"
)]
#[get("/payment/{email}")]
pub async fn list_payments(
    state: web::Data<HttpState>,
    identity: BearerIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PaymentRecord>>> {
    let owner = EmailAddress::parse(path.into_inner())
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    state.require_self(&identity, &owner).await?;
    Ok(web::Json(state.booking.history(&owner).await?))
}
