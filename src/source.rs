//! Where menu text comes from.
//!
//! The OCR engine runs outside this crate and hands over plain text. Printed
//! menus exported as PDF are converted here, and a menu can also be fetched
//! from a URL.

use anyhow::Context;
use reqwest::Client;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Installs the aws-lc-rs provider as the process default for rustls.
/// Later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

pub fn build_client() -> anyhow::Result<Client> {
    install_crypto_provider();
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent(concat!("ebyyard-menu-api/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub fn is_pdf(bytes: &[u8], content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().starts_with("application/pdf"))
        || bytes.starts_with(PDF_MAGIC)
}

/// Menu text from an uploaded body: PDFs go through `pdf-extract`, anything
/// else is read as UTF-8 (invalid sequences replaced).
pub fn extract_text(bytes: &[u8], content_type: Option<&str>) -> anyhow::Result<String> {
    if is_pdf(bytes, content_type) {
        let text = pdf_extract::extract_text_from_mem(bytes).context("failed to extract PDF text")?;
        return Ok(text);
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

pub async fn download_and_extract_text(client: &Client, url: &str) -> anyhow::Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = response.bytes().await?;
    extract_text(&bytes, content_type.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_is_detected_by_header_or_magic() {
        assert!(is_pdf(b"anything", Some("application/pdf")));
        assert!(is_pdf(b"anything", Some("Application/PDF; charset=binary")));
        assert!(is_pdf(b"%PDF-1.7\n...", None));
        assert!(!is_pdf(b"Hoagies\nThe Italian", Some("text/plain")));
        assert!(!is_pdf(b"", None));
    }

    #[test]
    fn plain_text_passes_through() {
        let text = extract_text("Hoagies\nThe Italian\n".as_bytes(), Some("text/plain")).unwrap();
        assert_eq!(text, "Hoagies\nThe Italian\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = extract_text(b"Hoagies \xff\n", None).unwrap();
        assert!(text.starts_with("Hoagies "));
        assert!(text.contains('\u{FFFD}'));
    }
}
