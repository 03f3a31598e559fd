//! Sheet fetch — derives a CSV export URL from a shared spreadsheet link and
//! fetches the body as UTF-8 text. The one outbound network call of an
//! import run; single-shot, non-streaming, bounded by the client timeout.

use reqwest::Client;
use thiserror::Error;

const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("unrecognized spreadsheet URL: {0}")]
    BadUrl(String),

    #[error("failed to fetch sheet: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet fetch returned status {0}")]
    Status(u16),
}

/// HTTP client for spreadsheet CSV exports.
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetches the CSV export of `sheet_url`.
    pub async fn fetch_csv(&self, sheet_url: &str) -> Result<String, SheetError> {
        let export_url = csv_export_url(sheet_url)
            .ok_or_else(|| SheetError::BadUrl(sheet_url.to_string()))?;

        let response = self.client.get(&export_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the CSV export URL from a shared Google Sheets link by extracting
/// the document id from the `/spreadsheets/d/<id>` path segment, carrying an
/// optional `gid` through. Returns `None` when no id can be extracted.
pub fn csv_export_url(sheet_url: &str) -> Option<String> {
    let rest = sheet_url.split("/spreadsheets/d/").nth(1)?;
    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id.is_empty() {
        return None;
    }

    let gid: Option<String> = sheet_url
        .split("gid=")
        .nth(1)
        .map(|g| g.chars().take_while(|c| c.is_ascii_digit()).collect())
        .filter(|g: &String| !g.is_empty());

    let mut export = format!("https://docs.google.com/spreadsheets/d/{id}/export?format=csv");
    if let Some(gid) = gid {
        export.push_str(&format!("&gid={gid}"));
    }
    Some(export)
}
