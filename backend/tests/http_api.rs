//! End-to-end HTTP tests over the full routing table.
//!
//! The app under test is assembled by `server::build_app`, with real
//! in-memory adapters and a real credential codec, so every request crosses
//! the same extractor, gate, and handler chain as production traffic.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test as actix_test, web};
use serde_json::{json, Value};

use classfit::inbound::http::health::HealthState;
use classfit::inbound::http::state::{HttpState, HttpStatePorts};
use classfit::outbound::gateway::LocalPaymentGateway;
use classfit::outbound::persistence::{
    InMemoryCartRepository, InMemoryClassRepository, InMemoryInstructorRepository,
    InMemoryPaymentRepository, InMemoryUserRepository,
};
use classfit::outbound::token::JwtTokenCodec;
use classfit::server::build_app;

async fn spawn_app_over(
    instructors: Arc<InMemoryInstructorRepository>,
) -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let http_state = web::Data::new(HttpState::new(HttpStatePorts {
        tokens: Arc::new(JwtTokenCodec::new(b"integration-secret", 3600)),
        users: Arc::new(InMemoryUserRepository::new()),
        classes: Arc::new(InMemoryClassRepository::new()),
        instructors,
        cart_items: Arc::new(InMemoryCartRepository::new()),
        payments: Arc::new(InMemoryPaymentRepository::new()),
        gateway: Arc::new(LocalPaymentGateway::new()),
    }));
    let health_state = web::Data::new(HealthState::new());
    actix_test::init_service(build_app(http_state, health_state)).await
}

async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    spawn_app_over(Arc::new(InMemoryInstructorRepository::new())).await
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

async fn issue_token<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_test::TestRequest::post()
        .uri("/identity-token")
        .set_json(json!({ "email": email }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(app, req).await;
    body["token"].as_str().expect("token issued").to_owned()
}

async fn register<S, B>(app: &S, email: &str, role: Option<&str>) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut payload = json!({ "email": email });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    let req = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(payload)
        .to_request();
    actix_test::call_and_read_body_json(app, req).await
}

fn class_payload(instructor_email: &str, seats: u32) -> Value {
    json!({
        "name": "Morning Yoga",
        "instructor": "Maya",
        "instructorEmail": instructor_email,
        "totalSeats": seats,
        "availableSeats": seats,
        "price": 20.0,
        "image": "https://img.example/yoga.png"
    })
}

#[actix_web::test]
async fn missing_credential_is_unauthorized() {
    let app = spawn_app().await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/users").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": true, "message": "unauthorized access" }));
}

#[actix_web::test]
async fn garbage_credential_is_unauthorized() {
    let app = spawn_app().await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/users")
            .insert_header(bearer("not-a-real-token"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "unauthorized access");
}

#[actix_web::test]
async fn students_cannot_create_classes() {
    let app = spawn_app().await;
    register(&app, "student@x.com", None).await;
    let token = issue_token(&app, "student@x.com").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/classes")
            .insert_header(bearer(&token))
            .set_json(class_payload("student@x.com", 10))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": true, "message": "forbidden message" }));
}

#[actix_web::test]
async fn instructors_create_and_list_their_own_classes() {
    let app = spawn_app().await;
    register(&app, "maya@x.com", Some("instructor")).await;
    register(&app, "ana@x.com", Some("instructor")).await;
    let maya = issue_token(&app, "maya@x.com").await;
    let ana = issue_token(&app, "ana@x.com").await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/classes")
            .insert_header(bearer(&maya))
            .set_json(class_payload("maya@x.com", 10))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let offering: Value = actix_test::read_body_json(created).await;
    assert_eq!(offering["status"], "pending");

    // The catalogue is public.
    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/classes").to_request(),
    )
    .await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let own: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/classes/instructor/maya@x.com")
            .insert_header(bearer(&maya))
            .to_request(),
    )
    .await;
    assert_eq!(own.as_array().expect("array").len(), 1);

    // Another instructor may not enumerate Maya's classes.
    let foreign = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/classes/instructor/maya@x.com")
            .insert_header(bearer(&ana))
            .to_request(),
    )
    .await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn instructor_profiles_are_publicly_readable() {
    use classfit::domain::ports::InstructorRepository;
    use classfit::domain::{EmailAddress, InstructorProfile};

    let instructors = Arc::new(InMemoryInstructorRepository::new());
    let stored = instructors
        .insert(InstructorProfile::new(
            "Maya".to_owned(),
            EmailAddress::parse("maya@x.com").expect("valid email"),
            "https://img.example/maya.png".to_owned(),
            Some("Vinyasa and mobility coaching.".to_owned()),
        ))
        .await
        .expect("seed profile");
    let app = spawn_app_over(instructors).await;

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/instructors").to_request(),
    )
    .await;
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let profile: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/instructors/{}", stored.id))
            .to_request(),
    )
    .await;
    assert_eq!(profile["name"], "Maya");
    assert_eq!(profile["email"], "maya@x.com");

    let missing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/instructors/{}", uuid::Uuid::new_v4()))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn registration_is_idempotent() {
    let app = spawn_app().await;

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "s@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "s@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "already exists");
}

#[actix_web::test]
async fn promotion_applies_to_credentials_issued_before_it() {
    let app = spawn_app().await;
    register(&app, "admin@x.com", Some("admin")).await;
    let student = register(&app, "s@x.com", None).await;
    let student_id = student["id"].as_str().expect("user id").to_owned();

    let admin_token = issue_token(&app, "admin@x.com").await;
    let student_token = issue_token(&app, "s@x.com").await;

    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/classes")
            .insert_header(bearer(&student_token))
            .set_json(class_payload("s@x.com", 5))
            .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let promoted = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/users/{student_id}/role"))
            .insert_header(bearer(&admin_token))
            .set_json(json!({ "role": "instructor" }))
            .to_request(),
    )
    .await;
    assert_eq!(promoted.status(), StatusCode::OK);

    // Same credential, fresh role read: now admitted.
    let allowed = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/classes")
            .insert_header(bearer(&student_token))
            .set_json(class_payload("s@x.com", 5))
            .to_request(),
    )
    .await;
    assert_eq!(allowed.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn role_flags_are_reported_for_self_only() {
    let app = spawn_app().await;
    register(&app, "admin@x.com", Some("admin")).await;
    let admin_token = issue_token(&app, "admin@x.com").await;

    let own: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/users/admin@x.com/role")
            .insert_header(bearer(&admin_token))
            .to_request(),
    )
    .await;
    assert_eq!(own, json!({ "admin": true, "instructor": false }));

    let other_token = issue_token(&app, "nosy@x.com").await;
    let foreign: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/users/admin@x.com/role")
            .insert_header(bearer(&other_token))
            .to_request(),
    )
    .await;
    assert_eq!(foreign, json!({ "admin": false, "instructor": false }));
}

#[actix_web::test]
async fn cart_flow_enforces_ownership() {
    let app = spawn_app().await;
    let owner_token = issue_token(&app, "owner@x.com").await;
    let intruder_token = issue_token(&app, "intruder@x.com").await;
    let class_id = uuid::Uuid::new_v4();

    let added = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cart")
            .set_json(json!({ "classId": class_id, "email": "owner@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(added.status(), StatusCode::CREATED);
    let item: Value = actix_test::read_body_json(added).await;
    let item_id = item["id"].as_str().expect("item id").to_owned();

    let duplicate = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cart")
            .set_json(json!({ "classId": class_id, "email": "owner@x.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(duplicate).await;
    assert_eq!(body["message"], "already exists");

    // Only the owner may read their cart.
    let foreign_list = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/cart/owner@x.com")
            .insert_header(bearer(&intruder_token))
            .to_request(),
    )
    .await;
    assert_eq!(foreign_list.status(), StatusCode::FORBIDDEN);

    let own_list: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/cart/owner@x.com")
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(own_list.as_array().expect("array").len(), 1);

    // Ownership of a deletion is decided by the stored record.
    let foreign_delete = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cart/{item_id}"))
            .insert_header(bearer(&intruder_token))
            .to_request(),
    )
    .await;
    assert_eq!(foreign_delete.status(), StatusCode::FORBIDDEN);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cart/{item_id}"))
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(deleted).await;
    assert_eq!(body, json!({ "deleted": true }));

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/cart/{item_id}"))
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn payment_intents_require_a_credential() {
    let app = spawn_app().await;

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/payment-intent")
            .set_json(json!({ "price": 19.99 }))
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let token = issue_token(&app, "s@x.com").await;
    let intent: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/payment-intent")
            .insert_header(bearer(&token))
            .set_json(json!({ "price": 19.99 }))
            .to_request(),
    )
    .await;
    let secret = intent["clientSecret"].as_str().expect("client secret");
    assert!(secret.starts_with("pi_"));
}

#[actix_web::test]
async fn the_last_seat_is_sold_once() {
    let app = spawn_app().await;
    register(&app, "maya@x.com", Some("instructor")).await;
    let instructor = issue_token(&app, "maya@x.com").await;

    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/classes")
            .insert_header(bearer(&instructor))
            .set_json(class_payload("maya@x.com", 1))
            .to_request(),
    )
    .await;
    let class_id = created["id"].as_str().expect("class id").to_owned();

    let first_token = issue_token(&app, "first@x.com").await;
    let second_token = issue_token(&app, "second@x.com").await;

    // A student may only pay as themselves.
    let forged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/payment")
            .insert_header(bearer(&first_token))
            .set_json(json!({ "classId": class_id, "email": "second@x.com", "price": 20.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(forged.status(), StatusCode::FORBIDDEN);

    let confirmed = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/payment")
            .insert_header(bearer(&first_token))
            .set_json(json!({ "classId": class_id, "email": "first@x.com", "price": 20.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(confirmed.status(), StatusCode::CREATED);
    let record: Value = actix_test::read_body_json(confirmed).await;
    assert!(record["transactionRef"].as_str().expect("ref").starts_with("txn_"));

    let rejected = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/payment")
            .insert_header(bearer(&second_token))
            .set_json(json!({ "classId": class_id, "email": "second@x.com", "price": 20.0 }))
            .to_request(),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(rejected).await;
    assert_eq!(body["message"], "class is fully booked");

    // The decrement committed exactly once.
    let offering: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/classes/{class_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(offering["availableSeats"], 0);

    // History is ownership-gated and records only the winner's payment.
    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/payment/first@x.com")
            .insert_header(bearer(&first_token))
            .to_request(),
    )
    .await;
    assert_eq!(history.as_array().expect("array").len(), 1);

    let foreign_history = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/payment/first@x.com")
            .insert_header(bearer(&second_token))
            .to_request(),
    )
    .await;
    assert_eq!(foreign_history.status(), StatusCode::FORBIDDEN);

    let empty_history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/payment/second@x.com")
            .insert_header(bearer(&second_token))
            .to_request(),
    )
    .await;
    assert!(empty_history.as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request_in_the_standard_envelope() {
    let app = spawn_app().await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], true);
}

#[actix_web::test]
async fn liveness_succeeds_while_readiness_waits_for_the_server() {
    let app = spawn_app().await;
    let live = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;
    assert!(live.status().is_success());

    // build_app alone never marks ready; create_server does.
    let ready = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
