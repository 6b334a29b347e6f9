use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentQueryParams, UpdateEnrollmentRequest,
};
use crate::models::grades::requests::UpsertGradeRequest;
use crate::models::users::entities::UserRole;
use crate::services::{EnrollmentService, GradeService};
use crate::utils::{SafeEnrollmentIdI64, SafeSubjectIdI64};

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

pub async fn create_enrollment(
    req: HttpRequest,
    body: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(body.into_inner(), &req)
        .await
}

pub async fn get_enrollment(
    req: HttpRequest,
    id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_enrollment(id.0, &req).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    id: SafeEnrollmentIdI64,
    body: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_enrollment(
    req: HttpRequest,
    id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete_enrollment(id.0, &req).await
}

// 成绩
pub async fn list_grades(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(enrollment_id.0, &req).await
}

pub async fn upsert_grade(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
    body: web::Json<UpsertGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .upsert_grade(enrollment_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_grade(
    req: HttpRequest,
    enrollment_id: SafeEnrollmentIdI64,
    subject_id: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .delete_grade(enrollment_id.0, subject_id.0, &req)
        .await
}

pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_enrollments))
                            .route(web::post().to(create_enrollment)),
                    )
                    .service(
                        web::resource("/{enrollment_id}")
                            .route(web::get().to(get_enrollment))
                            .route(web::put().to(update_enrollment))
                            .route(web::delete().to(delete_enrollment)),
                    )
                    .service(
                        web::resource("/{enrollment_id}/grades")
                            .route(web::get().to(list_grades))
                            .route(web::put().to(upsert_grade)),
                    )
                    .route(
                        "/{enrollment_id}/grades/{subject_id}",
                        web::delete().to(delete_grade),
                    ),
            ),
    );
}
