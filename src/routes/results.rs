use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{AcademicYearResultQueryParams, ResultQueryParams};
use crate::models::users::entities::UserRole;
use crate::services::ResultService;
use crate::utils::{SafeEnrollmentIdI64, SafeIDI64, SafeSemesterIdI64};

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultQueryParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(query.into_inner(), &req).await
}

pub async fn get_result(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(enrollment_id.0, &req).await
}

pub async fn recompute_semester(
    req: HttpRequest,
    semester_id: SafeSemesterIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.recompute_semester(semester_id.0, &req).await
}

pub async fn list_academic_year_results(
    req: HttpRequest,
    query: web::Query<AcademicYearResultQueryParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .list_academic_year_results(query.into_inner(), &req)
        .await
}

pub async fn get_academic_year_result(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_academic_year_result(id.0, &req).await
}

pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_results))
                    .route(
                        "/semesters/{semester_id}/recompute",
                        web::post().to(recompute_semester),
                    )
                    .route("/{enrollment_id}", web::get().to(get_result)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/academic-year-results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_academic_year_results))
                    .route("/{id}", web::get().to(get_academic_year_result)),
            ),
    );
}
