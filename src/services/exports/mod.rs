pub mod document;
pub mod pdf;
pub mod xlsx;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exports::{PdfExportRequest, ResultsXlsxQuery};
use crate::storage::Storage;

pub struct ExportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // HTML 转 PDF
    pub async fn export_pdf(
        &self,
        req: PdfExportRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pdf::export_pdf(self, req, request).await
    }

    // 成绩单模板字段
    pub async fn result_document(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        document::result_document(self, enrollment_id, request).await
    }

    pub async fn results_xlsx(
        &self,
        query: ResultsXlsxQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        xlsx::results_xlsx(self, query, request).await
    }
}

/// 下载文件名只保留安全字符
pub(crate) fn sanitize_download_name(raw: Option<&str>, fallback: &str) -> String {
    let cleaned: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.chars().take(100).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_download_name() {
        assert_eq!(sanitize_download_name(Some("report 2024"), "doc"), "report_2024");
        assert_eq!(sanitize_download_name(Some("../../etc"), "doc"), "etc");
        assert_eq!(sanitize_download_name(Some("   "), "doc"), "doc");
        assert_eq!(sanitize_download_name(None, "doc"), "doc");
    }
}
