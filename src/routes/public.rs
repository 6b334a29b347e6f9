use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::public::PublicResultQuery;
use crate::services::PublicService;

static PUBLIC_SERVICE: Lazy<PublicService> = Lazy::new(PublicService::new_lazy);

pub async fn lookup_results(
    req: HttpRequest,
    query: web::Query<PublicResultQuery>,
) -> ActixResult<HttpResponse> {
    PUBLIC_SERVICE.lookup_results(query.into_inner(), &req).await
}

// 无需登录，按 IP 限流
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/public")
            .wrap(middlewares::RateLimit::public_lookup())
            .route("/results", web::get().to(lookup_results)),
    );
}
