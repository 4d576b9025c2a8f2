use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{PackageDocument, TripDocument};

/// Errors that can occur when talking to the CRM backend
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or secret")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the CRM's REST resource API
///
/// Handles all communication with the CRM backend including:
/// - Fetching trip documents
/// - Listing the active package catalog
/// - Fetching full package documents with child tables
pub struct CrmClient {
    base_url: String,
    api_key: String,
    api_secret: String,
    client: Client,
}

impl CrmClient {
    /// Create a new CRM client
    pub fn new(base_url: String, api_key: String, api_secret: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            api_secret,
            client,
        }
    }

    fn auth_header(&self) -> String {
        format!("token {}:{}", self.api_key, self.api_secret)
    }

    /// Fetch a trip document by name
    pub async fn get_trip(&self, trip_name: &str) -> Result<TripDocument, CrmError> {
        let url = format!(
            "{}/api/resource/Trip/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(trip_name)
        );

        tracing::debug!("Fetching trip from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let json = self.read_document_response(response, trip_name).await?;
        let data = json
            .get("data")
            .ok_or_else(|| CrmError::InvalidResponse("Missing data object".into()))?;

        serde_json::from_value(data.clone())
            .map_err(|e| CrmError::InvalidResponse(format!("Failed to parse trip: {}", e)))
    }

    /// Fetch a package document by name, child tables included
    pub async fn get_package(&self, package_name: &str) -> Result<PackageDocument, CrmError> {
        let url = format!(
            "{}/api/resource/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode("Standard Package"),
            urlencoding::encode(package_name)
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let json = self.read_document_response(response, package_name).await?;
        let data = json
            .get("data")
            .ok_or_else(|| CrmError::InvalidResponse("Missing data object".into()))?;

        serde_json::from_value(data.clone())
            .map_err(|e| CrmError::InvalidResponse(format!("Failed to parse package: {}", e)))
    }

    /// Fetch every package whose status is Active.
    ///
    /// The listing returns names only; each document is then fetched
    /// in full. A package that fails to fetch or parse is skipped with
    /// a warning rather than failing the whole catalog.
    pub async fn list_active_packages(&self) -> Result<Vec<PackageDocument>, CrmError> {
        let filters = r#"[["status","=","Active"]]"#;
        let fields = r#"["name"]"#;
        let url = format!(
            "{}/api/resource/{}?filters={}&fields={}&limit_page_length=0",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode("Standard Package"),
            urlencoding::encode(filters),
            urlencoding::encode(fields)
        );

        tracing::debug!("Listing active packages from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.status_error(response.status(), "package list"));
        }

        let json: Value = response.json().await?;
        let rows = json
            .get("data")
            .and_then(|d| d.as_array())
            .ok_or_else(|| CrmError::InvalidResponse("Missing data array".into()))?;

        let names: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();

        let mut packages = Vec::with_capacity(names.len());
        for name in names {
            match self.get_package(&name).await {
                Ok(doc) => packages.push(doc),
                Err(err) => tracing::warn!("Skipping package {}: {}", name, err),
            }
        }

        tracing::debug!("Fetched {} active packages", packages.len());

        Ok(packages)
    }

    async fn read_document_response(
        &self,
        response: reqwest::Response,
        name: &str,
    ) -> Result<Value, CrmError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CrmError::NotFound(format!("Document {} not found", name)));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CrmError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("CRM request for {} failed: {} - {}", name, status, body);
            return Err(CrmError::ApiError(format!("Request failed: {}", status)));
        }

        Ok(response.json().await?)
    }

    fn status_error(&self, status: reqwest::StatusCode, what: &str) -> CrmError {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            CrmError::Unauthorized
        } else {
            CrmError::ApiError(format!("Failed to fetch {}: {}", what, status))
        }
    }
}
