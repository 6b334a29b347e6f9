use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exports::{PdfExportRequest, ResultsXlsxQuery};
use crate::models::users::entities::UserRole;
use crate::services::ExportService;
use crate::utils::SafeEnrollmentIdI64;

static EXPORT_SERVICE: Lazy<ExportService> = Lazy::new(ExportService::new_lazy);

pub async fn export_pdf(
    req: HttpRequest,
    body: web::Json<PdfExportRequest>,
) -> ActixResult<HttpResponse> {
    EXPORT_SERVICE.export_pdf(body.into_inner(), &req).await
}

pub async fn result_document(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    EXPORT_SERVICE.result_document(enrollment_id.0, &req).await
}

pub async fn results_xlsx(
    req: HttpRequest,
    query: web::Query<ResultsXlsxQuery>,
) -> ActixResult<HttpResponse> {
    EXPORT_SERVICE.results_xlsx(query.into_inner(), &req).await
}

pub fn configure_export_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/export")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(
                        "/pdf",
                        web::post()
                            .to(export_pdf)
                            .wrap(middlewares::RateLimit::export()),
                    )
                    .route("/results/xlsx", web::get().to(results_xlsx))
                    .route(
                        "/results/{enrollment_id}/document",
                        web::get().to(result_document),
                    ),
            ),
    );
}
