pub mod avatar;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 读取学生头像
    pub async fn serve_avatar(
        &self,
        request: &HttpRequest,
        filename: String,
    ) -> ActixResult<HttpResponse> {
        avatar::serve_avatar(self, request, filename).await
    }
}
