pub mod lookup;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::public::PublicResultQuery;
use crate::storage::Storage;

pub struct PublicService {
    storage: Option<Arc<dyn Storage>>,
}

impl PublicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 公开成绩查询
    pub async fn lookup_results(
        &self,
        query: PublicResultQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lookup::lookup_results(self, query, request).await
    }
}
