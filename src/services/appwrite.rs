use crate::models::{RequestCriteria, SupplierProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the Appwrite backend:
/// - Fetching procurement request documents (search criteria)
/// - Listing supplier profiles from the users collection
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub requests: String,
    pub users: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    /// Fetch the search criteria of one procurement request
    pub async fn get_request(&self, request_id: &str) -> Result<RequestCriteria, AppwriteError> {
        // Appwrite query format: JSON array of query strings
        let query_json = format!(r#"["requestId={}"]"#, request_id);
        let encoded_query = urlencoding::encode(&query_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.requests,
            encoded_query
        );

        tracing::debug!("Fetching request criteria from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch request: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(format!("Request {} not found", request_id)))?;

        // Appwrite nests user payloads under "data" depending on API version
        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse request: {}", e)))
    }

    /// List supplier profiles from the users collection
    ///
    /// Queries on the supplier role server-side; documents that fail to
    /// deserialize are skipped rather than failing the whole pool, since the
    /// store is schemaless and older user documents miss newer fields.
    pub async fn query_suppliers(&self) -> Result<Vec<SupplierProfile>, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.users
        );

        let queries = vec![r#"equal("role", "supplier")"#.to_string()];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let full_url = format!("{}?query={}", url, encoded_queries);

        let response = self
            .client
            .get(&full_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to query suppliers: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let suppliers: Vec<SupplierProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .filter(|s: &SupplierProfile| s.is_supplier())
            .collect();

        tracing::debug!("Queried {} suppliers (total: {})", suppliers.len(), total);

        Ok(suppliers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collections() -> AppwriteCollections {
        AppwriteCollections {
            requests: "requests".to_string(),
            users: "users".to_string(),
        }
    }

    fn client_for(server: &mockito::Server) -> AppwriteClient {
        AppwriteClient::new(
            server.url(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            collections(),
        )
        .expect("client")
    }

    #[tokio::test]
    async fn test_query_suppliers_skips_malformed_documents() {
        let mut server = mockito::Server::new_async().await;

        let body = json!({
            "total": 3,
            "documents": [
                {
                    "userId": "sup_1",
                    "name": "Aceros del Norte",
                    "role": "supplier",
                    "businessType": "distributor",
                    "productCategories": ["materia_prima"],
                    "productTags": ["tornillos M8"],
                    "industries": ["metalmecanica"],
                    "score": 90.0
                },
                { "userId": "buyer_1", "role": "buyer" },
                { "name": "missing ids entirely" }
            ]
        });

        let _mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex("/databases/test_db/collections/users/documents.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let suppliers = client.query_suppliers().await.expect("suppliers");

        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0].user_id, "sup_1");
        assert_eq!(suppliers[0].score, Some(90.0));
    }

    #[tokio::test]
    async fn test_get_request_parses_criteria() {
        let mut server = mockito::Server::new_async().await;

        let body = json!({
            "total": 1,
            "documents": [
                {
                    "requestId": "req_9",
                    "requiredBusinessType": "any",
                    "requiredCategories": ["materia_prima"],
                    "requiredTags": ["tornillo"],
                    "customRequiredTags": ["acero inoxidable"],
                    "industry": "metalmecanica"
                }
            ]
        });

        let _mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(
                    "/databases/test_db/collections/requests/documents.*".to_string(),
                ),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let criteria = client.get_request("req_9").await.expect("criteria");

        assert_eq!(criteria.request_id, "req_9");
        assert_eq!(criteria.required_categories, vec!["materia_prima"]);
        assert_eq!(criteria.request_tags().len(), 2);
    }

    #[tokio::test]
    async fn test_get_request_not_found() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(
                    "/databases/test_db/collections/requests/documents.*".to_string(),
                ),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "total": 0, "documents": [] }).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.get_request("missing").await;

        assert!(matches!(result, Err(AppwriteError::NotFound(_))));
    }
}
