use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::FileService;
use crate::utils::SafeFileName;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn serve_avatar(request: HttpRequest, filename: SafeFileName) -> ActixResult<HttpResponse> {
    FILE_SERVICE.serve_avatar(&request, filename.0).await
}

// 头像公开访问，文件名已在提取器中校验
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files").route("/avatars/{filename}", web::get().to(serve_avatar)),
    );
}
