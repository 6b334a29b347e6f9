//! 通过无头 Chrome/Chromium 把 HTML 渲染为 PDF

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{ExportService, sanitize_download_name};
use crate::config::AppConfig;
use crate::errors::GradeSysError;
use crate::models::exports::PdfExportRequest;
use crate::models::{ApiResponse, ErrorCode};

const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

/// 禁止页面加载外部资源（含 file:// 下的其他本地文件），只允许内联样式和 data: 资源
const RENDER_CSP: &str = "<meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'; \
     style-src 'unsafe-inline'; img-src data:; font-src data:; frame-src 'none'; \
     object-src 'none'; script-src 'none'\">";

/// 把 CSP 写在 `<head>` 最前面，没有 `<head>` 时放在文档开头
pub(crate) fn with_render_policy(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    // 跳过 <header> 之类的标签
    let head_start = lower.match_indices("<head").map(|(i, _)| i).find(|&i| {
        lower.as_bytes().get(i + 5).is_some_and(|b| *b == b'>' || b.is_ascii_whitespace())
    });
    let insert_at = head_start
        .and_then(|start| lower[start..].find('>').map(|end| start + end + 1))
        .unwrap_or(0);

    let mut out = String::with_capacity(html.len() + RENDER_CSP.len());
    out.push_str(&html[..insert_at]);
    out.push_str(RENDER_CSP);
    out.push_str(&html[insert_at..]);
    out
}

/// 渲染结束后删除临时目录
struct TempDirGuard(PathBuf);

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.0) {
            warn!("Failed to clean up {}: {}", self.0.display(), e);
        }
    }
}

/// 配置的路径优先，否则在 PATH 中查找常见名称
pub(crate) fn find_browser(configured: &str) -> Option<PathBuf> {
    let configured = configured.trim();
    if !configured.is_empty() {
        let path = PathBuf::from(configured);
        return path.is_file().then_some(path);
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| BROWSER_CANDIDATES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

async fn render_pdf(
    browser: &Path,
    html: &str,
    timeout_secs: u64,
) -> Result<Vec<u8>, GradeSysError> {
    let work_dir = std::env::temp_dir().join(format!("gradesys-pdf-{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&work_dir).await?;
    let _guard = TempDirGuard(work_dir.clone());

    let input = work_dir.join("input.html");
    let output = work_dir.join("output.pdf");
    tokio::fs::write(&input, with_render_policy(html)).await?;

    let mut command = tokio::process::Command::new(browser);
    command
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--no-pdf-header-footer")
        .arg("--disable-extensions")
        .arg("--disable-background-networking")
        .arg(format!("--user-data-dir={}", work_dir.join("profile").display()))
        .arg(format!("--print-to-pdf={}", output.display()))
        .arg(format!("file://{}", input.display()))
        .kill_on_drop(true);

    debug!("Rendering PDF with {}", browser.display());
    let result = tokio::time::timeout(Duration::from_secs(timeout_secs.max(1)), command.output())
        .await
        .map_err(|_| GradeSysError::export(format!("PDF rendering timed out after {timeout_secs}s")))?
        .map_err(|e| GradeSysError::export(format!("Failed to start browser: {e}")))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(GradeSysError::export(format!(
            "Browser exited with {}: {}",
            result.status,
            stderr.lines().last().unwrap_or_default()
        )));
    }

    let pdf = tokio::fs::read(&output)
        .await
        .map_err(|e| GradeSysError::export(format!("Browser did not produce a PDF: {e}")))?;
    if !pdf.starts_with(b"%PDF") {
        return Err(GradeSysError::export("Browser output is not a PDF"));
    }
    Ok(pdf)
}

pub async fn export_pdf(
    _service: &ExportService,
    req: PdfExportRequest,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if req.html.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "HTML content is required",
        )));
    }

    let config = &AppConfig::get().export;
    let Some(browser) = find_browser(&config.chrome_path) else {
        warn!("PDF export requested but no Chrome/Chromium binary was found");
        return Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
            ErrorCode::ExportUnavailable,
            "PDF export is unavailable: no headless browser installed",
        )));
    };

    match render_pdf(&browser, &req.html, config.timeout).await {
        Ok(pdf) => {
            let filename = sanitize_download_name(req.filename.as_deref(), "document");
            info!("PDF {}.pdf rendered ({} bytes)", filename, pdf.len());
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, "application/pdf"))
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}.pdf\""),
                ))
                .body(pdf))
        }
        Err(e) => {
            error!("PDF export failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ExportFailed,
                format!("PDF export failed: {}", e.message()),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_browser_must_exist() {
        assert_eq!(find_browser("/definitely/not/a/browser"), None);
    }

    #[test]
    fn test_render_policy_blocks_local_files() {
        let html = r#"<html><HEAD><title>r</title></HEAD><body><iframe src="file:///etc/passwd"></iframe></body></html>"#;
        let hardened = with_render_policy(html);
        let csp_at = hardened.find("Content-Security-Policy").unwrap();
        assert!(csp_at > hardened.find("<HEAD>").unwrap());
        assert!(csp_at < hardened.find("<title>").unwrap());
        assert!(hardened.contains("frame-src 'none'"));
        assert!(hardened.contains("default-src 'none'"));
    }

    #[test]
    fn test_render_policy_without_head() {
        let hardened = with_render_policy("<header>x</header>");
        assert!(hardened.starts_with("<meta"));
        let hardened = with_render_policy("<p>GPA 3.30</p>");
        assert!(hardened.starts_with("<meta http-equiv=\"Content-Security-Policy\""));
        assert!(hardened.ends_with("<p>GPA 3.30</p>"));
    }

    #[test]
    fn test_temp_dir_guard_removes_directory() {
        let dir = std::env::temp_dir().join(format!("gradesys-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("input.html"), "<p>x</p>").unwrap();
        drop(TempDirGuard(dir.clone()));
        assert!(!dir.exists());
    }
}
