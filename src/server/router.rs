//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Registers the `bearer` scheme referenced by authenticated routes.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so utoipa documents them as one path
/// item.
///
/// # Registered Endpoints
/// - `POST /token` - Log into the learning platform
/// - `GET|POST /students`, `GET|DELETE /students/{id}` - Stored students
/// - `GET /students/{id}/sessions` - Sessions of a student
/// - `POST /students/{id}/schedule` - Schedule a session with a student
/// - `POST|DELETE /session`, `GET|DELETE /session/{id}` - Schedule, find and cancel sessions
/// - `PUT /session/update_sessions` - Import sessions from the platform
/// - `GET|POST /invoices`, `POST /invoices/batch` - List and create invoices
/// - `GET|PUT|DELETE /invoices/{id}` - Find, regenerate and delete an invoice
/// - `PUT /invoices/{id}/status` - Set invoice status
/// - `GET|PUT /invoices/{id}/pdf` - Download and attach the invoice document
/// - `POST /webhook/session` - Booking tool webhook
///
/// The OpenAPI specification is served at `/api/docs/openapi.json` and browsed through
/// Swagger UI at `/api/docs`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Mentor Billing", description = "Mentor session bookkeeping and invoicing API"),
        modifiers(&BearerSecurity),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Learning platform login"),
            (name = controller::student::STUDENT_TAG, description = "Student API routes"),
            (name = controller::session::SESSION_TAG, description = "Session API routes"),
            (name = controller::invoice::INVOICE_TAG, description = "Invoice API routes"),
            (name = controller::webhook::WEBHOOK_TAG, description = "Booking tool webhook"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(
            controller::student::list_students,
            controller::student::create_student
        ))
        .routes(routes!(
            controller::student::get_student,
            controller::student::delete_student
        ))
        .routes(routes!(controller::student::get_student_sessions))
        .routes(routes!(controller::student::schedule_student_session))
        .routes(routes!(
            controller::session::schedule_session,
            controller::session::cancel_sessions_from
        ))
        .routes(routes!(
            controller::session::get_session,
            controller::session::cancel_session
        ))
        .routes(routes!(controller::session::update_sessions))
        .routes(routes!(
            controller::invoice::list_invoices,
            controller::invoice::add_invoice
        ))
        .routes(routes!(controller::invoice::add_year_invoices))
        .routes(routes!(
            controller::invoice::get_invoice,
            controller::invoice::refresh_invoice,
            controller::invoice::delete_invoice
        ))
        .routes(routes!(controller::invoice::set_invoice_status))
        .routes(routes!(
            controller::invoice::download_invoice_pdf,
            controller::invoice::upload_invoice_pdf
        ))
        .routes(routes!(controller::webhook::scheduling_webhook))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
