use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academic_years::requests::{
    AcademicYearQueryParams, CreateAcademicYearRequest, UpdateAcademicYearRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicYearService;
use crate::utils::SafeAcademicYearIdI64;

static ACADEMIC_YEAR_SERVICE: Lazy<AcademicYearService> =
    Lazy::new(AcademicYearService::new_lazy);

pub async fn list_academic_years(
    req: HttpRequest,
    query: web::Query<AcademicYearQueryParams>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .list_academic_years(query.into_inner(), &req)
        .await
}

pub async fn create_academic_year(
    req: HttpRequest,
    body: web::Json<CreateAcademicYearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .create_academic_year(body.into_inner(), &req)
        .await
}

pub async fn get_academic_year(
    req: HttpRequest,
    id: SafeAcademicYearIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE.get_academic_year(id.0, &req).await
}

pub async fn update_academic_year(
    req: HttpRequest,
    id: SafeAcademicYearIdI64,
    body: web::Json<UpdateAcademicYearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .update_academic_year(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_academic_year(
    req: HttpRequest,
    id: SafeAcademicYearIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE.delete_academic_year(id.0, &req).await
}

pub async fn set_current_academic_year(
    req: HttpRequest,
    id: SafeAcademicYearIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .set_current_academic_year(id.0, &req)
        .await
}

pub fn configure_academic_year_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academic-years")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_academic_years))
                            .route(web::post().to(create_academic_year)),
                    )
                    .service(
                        web::resource("/{academic_year_id}")
                            .route(web::get().to(get_academic_year))
                            .route(web::put().to(update_academic_year))
                            .route(
                                web::delete()
                                    .to(delete_academic_year)
                                    // 删除学年仅管理员
                                    .wrap(middlewares::RequireRole::new_any(
                                        UserRole::admin_roles(),
                                    )),
                            ),
                    )
                    .route(
                        "/{academic_year_id}/current",
                        web::post().to(set_current_academic_year),
                    ),
            ),
    );
}
