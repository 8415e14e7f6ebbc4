//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the fundi API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "fundi API",
        version = "0.1.0",
        description = "Local-services marketplace API"
    ),
    modifiers(&SecurityAddon),
    paths(
        fundi_api_auth::handlers::register::register_handler,
        fundi_api_auth::handlers::me::get_me_handler,
        fundi_api_auth::handlers::me::update_me_handler,
        fundi_api_catalog::handlers::list_categories_handler,
        fundi_api_catalog::handlers::list_workers_handler,
        fundi_api_catalog::handlers::get_worker_handler,
        fundi_api_catalog::handlers::create_feedback_handler,
        fundi_api_catalog::handlers::list_feedback_handler,
        fundi_api_catalog::handlers::home_stats_handler,
        fundi_api_admin::handlers::dashboard_stats_handler,
        fundi_api_admin::handlers::list_clients_handler,
        fundi_api_admin::handlers::delete_client_handler,
        fundi_api_admin::handlers::list_workers_handler,
        fundi_api_admin::handlers::toggle_worker_handler,
        fundi_api_admin::handlers::delete_worker_handler,
        fundi_api_admin::handlers::list_categories_handler,
        fundi_api_admin::handlers::create_category_handler,
        fundi_api_admin::handlers::update_category_handler,
        fundi_api_admin::handlers::delete_category_handler,
        fundi_api_admin::handlers::list_feedback_handler,
        fundi_api_admin::handlers::delete_feedback_handler,
    ),
    components(schemas(
        fundi_api_auth::RegisterRequest,
        fundi_api_auth::UpdateProfileRequest,
        fundi_api_auth::ProfileResponse,
        fundi_api_auth::ClientProfile,
        fundi_api_auth::WorkerProfile,
        fundi_api_catalog::ServiceResponse,
        fundi_api_catalog::WorkerSummary,
        fundi_api_catalog::WorkerDetail,
        fundi_api_catalog::CreateFeedbackRequest,
        fundi_api_catalog::FeedbackResponse,
        fundi_api_catalog::FeedbackAuthor,
        fundi_api_catalog::HomeStats,
        fundi_api_catalog::RatingSummary,
        fundi_api_admin::DashboardStats,
        fundi_api_admin::AdminClientRow,
        fundi_api_admin::AdminFeedbackRow,
        fundi_api_admin::AdminWorkerRow,
        fundi_api_admin::CategoryResponse,
        fundi_api_admin::CreateCategoryRequest,
        fundi_api_admin::UpdateCategoryRequest,
    )),
    tags(
        (name = "Authentication", description = "Registration and profile resolution"),
        (name = "Catalog", description = "Public category and worker browsing"),
        (name = "Feedback", description = "Worker feedback"),
        (name = "Admin", description = "Moderation and catalog management"),
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated spec.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
