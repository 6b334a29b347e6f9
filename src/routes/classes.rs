use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{
    AddClassSubjectRequest, ClassQueryParams, CreateClassRequest, UpdateClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::{SafeClassIdI64, SafeSubjectIdI64};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(query.into_inner(), &req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(class_id.0, &req).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(class_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(class_id.0, &req).await
}

pub async fn list_class_subjects(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_class_subjects(class_id.0, &req).await
}

pub async fn add_class_subject(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    body: web::Json<AddClassSubjectRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .add_class_subject(class_id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_class_subject(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    subject_id: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .remove_class_subject(class_id.0, subject_id.0, &req)
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_classes))
                            .route(web::post().to(create_class)),
                    )
                    .service(
                        web::resource("/{class_id}")
                            .route(web::get().to(get_class))
                            .route(web::put().to(update_class))
                            .route(web::delete().to(delete_class)),
                    )
                    // 班级开设的课程
                    .service(
                        web::resource("/{class_id}/subjects")
                            .route(web::get().to(list_class_subjects))
                            .route(web::post().to(add_class_subject)),
                    )
                    .route(
                        "/{class_id}/subjects/{subject_id}",
                        web::delete().to(remove_class_subject),
                    ),
            ),
    );
}
