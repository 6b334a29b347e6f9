use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grade_scales::requests::{CreateGradeScaleRequest, UpdateGradeScaleRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeScaleService;
use crate::utils::SafeGradeScaleIdI64;

static GRADE_SCALE_SERVICE: Lazy<GradeScaleService> = Lazy::new(GradeScaleService::new_lazy);

pub async fn list_grade_scales(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE.list_grade_scales(&req).await
}

pub async fn coverage(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE.coverage(&req).await
}

pub async fn get_grade_scale(
    req: HttpRequest,
    id: SafeGradeScaleIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE.get_grade_scale(id.0, &req).await
}

pub async fn create_grade_scale(
    req: HttpRequest,
    body: web::Json<CreateGradeScaleRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE
        .create_grade_scale(body.into_inner(), &req)
        .await
}

pub async fn update_grade_scale(
    req: HttpRequest,
    id: SafeGradeScaleIdI64,
    body: web::Json<UpdateGradeScaleRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE
        .update_grade_scale(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_grade_scale(
    req: HttpRequest,
    id: SafeGradeScaleIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SCALE_SERVICE.delete_grade_scale(id.0, &req).await
}

// 查询对教务开放，修改仅管理员
pub fn configure_grade_scale_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grade-scales")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_grade_scales))
                    .route(
                        web::post()
                            .to(create_grade_scale)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .route("/coverage", web::get().to(coverage))
            .service(
                web::resource("/{grade_scale_id}")
                    .route(web::get().to(get_grade_scale))
                    .route(
                        web::put()
                            .to(update_grade_scale)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_grade_scale)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
