use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::semesters::requests::{
    CreateSemesterRequest, SemesterQueryParams, UpdateSemesterRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SemesterService;
use crate::utils::SafeSemesterIdI64;

static SEMESTER_SERVICE: Lazy<SemesterService> = Lazy::new(SemesterService::new_lazy);

pub async fn list_semesters(
    req: HttpRequest,
    query: web::Query<SemesterQueryParams>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.list_semesters(query.into_inner(), &req).await
}

pub async fn create_semester(
    req: HttpRequest,
    body: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.create_semester(body.into_inner(), &req).await
}

pub async fn get_semester(req: HttpRequest, id: SafeSemesterIdI64) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.get_semester(id.0, &req).await
}

pub async fn update_semester(
    req: HttpRequest,
    id: SafeSemesterIdI64,
    body: web::Json<UpdateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE
        .update_semester(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_semester(req: HttpRequest, id: SafeSemesterIdI64) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.delete_semester(id.0, &req).await
}

pub async fn set_current_semester(
    req: HttpRequest,
    id: SafeSemesterIdI64,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.set_current_semester(id.0, &req).await
}

pub fn configure_semester_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/semesters")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_semesters))
                    .route("", web::post().to(create_semester))
                    .route("/{semester_id}", web::get().to(get_semester))
                    .route("/{semester_id}", web::put().to(update_semester))
                    .route("/{semester_id}", web::delete().to(delete_semester))
                    .route("/{semester_id}/current", web::post().to(set_current_semester)),
            ),
    );
}
