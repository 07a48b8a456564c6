//! Metadata in the `pdf_documents` table behind PostgREST.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::MetadataStore;
use crate::error::MetadataError;
use crate::model::{NewDocument, StoredDocument};
use crate::supabase::{RemoteError, SupabaseClient, TABLE};

/// Row shape of `pdf_documents`. `id` and `created_at` are generated
/// by the database.
#[derive(Debug, Clone, Deserialize)]
struct DocumentRow {
    id: String,
    title: String,
    file_name: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    path: Option<String>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id,
            title: row.title,
            file_name: row.file_name,
            uploaded_at: row.created_at,
            size: row.size,
            path: row.path,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    title: &'a str,
    file_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
}

pub struct SupabaseMetadataStore {
    client: SupabaseClient,
}

impl SupabaseMetadataStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn rows(&self, request: reqwest::RequestBuilder) -> Result<Vec<DocumentRow>, MetadataError> {
        let response = self.client.send(request).await?;
        let rows = response
            .json::<Vec<DocumentRow>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(rows)
    }
}

/// PostgREST equality filter value for `column=eq.<id>`.
fn eq_filter(id: &str) -> String {
    format!("eq.{}", id)
}

/// Newest first; `id` keeps equal timestamps in a stable order.
const LIST_ORDER: &str = "created_at.desc,id.desc";

/// Postgres `invalid_text_representation`, returned when the id does not
/// parse as the column type (e.g. a non-uuid string against a uuid key).
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// True when PostgREST rejected the id itself, which means no row can match.
fn is_malformed_id(err: &MetadataError) -> bool {
    matches!(
        err,
        MetadataError::Remote(RemoteError::Status { status: 400, body })
            if body.contains(INVALID_TEXT_REPRESENTATION)
    )
}

#[async_trait]
impl MetadataStore for SupabaseMetadataStore {
    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, MetadataError> {
        let url = self.client.endpoint(&["rest", "v1", TABLE])?;
        let body = InsertRow {
            title: &doc.title,
            file_name: &doc.file_name,
            size: doc.size,
            path: doc.path.as_deref(),
        };

        let request = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[body]);

        self.rows(request)
            .await?
            .into_iter()
            .next()
            .map(StoredDocument::from)
            .ok_or_else(|| MetadataError::Corrupt("insert returned no row".to_string()))
    }

    async fn delete(&self, id: &str) -> Result<bool, MetadataError> {
        let url = self.client.endpoint(&["rest", "v1", TABLE])?;
        let request = self
            .client
            .request(Method::DELETE, url)
            .query(&[("id", eq_filter(id))])
            .header("Prefer", "return=representation");

        match self.rows(request).await {
            Ok(rows) => Ok(!rows.is_empty()),
            Err(e) if is_malformed_id(&e) => {
                log::debug!("Delete of malformed id treated as missing");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<StoredDocument>, MetadataError> {
        let url = self.client.endpoint(&["rest", "v1", TABLE])?;
        // A plain filtered select returns `[]` for a missing id, so absence
        // stays distinguishable from a failed request.
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("select", "*".to_string()), ("id", eq_filter(id))]);

        match self.rows(request).await {
            Ok(rows) => Ok(rows.into_iter().next().map(StoredDocument::from)),
            Err(e) if is_malformed_id(&e) => {
                log::debug!("Lookup of malformed id treated as missing");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_all(&self) -> Result<Vec<StoredDocument>, MetadataError> {
        let url = self.client.endpoint(&["rest", "v1", TABLE])?;
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("select", "*"), ("order", LIST_ORDER)]);

        Ok(self
            .rows(request)
            .await?
            .into_iter()
            .map(StoredDocument::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_row_deserializes_postgrest_shape() {
        let json = r#"[{
            "id": "7f0c7f6e-5d55-4c2b-9a57-0d7d3c4d8a10",
            "title": "Data Sheet",
            "file_name": "datasheet.pdf",
            "created_at": "2026-02-03T04:05:06.789+00:00",
            "size": 5120,
            "path": "1770091506789_ab12cd34_datasheet.pdf"
        }]"#;
        let rows: Vec<DocumentRow> = serde_json::from_str(json).unwrap();
        let doc = StoredDocument::from(rows[0].clone());
        assert_eq!(doc.file_name, "datasheet.pdf");
        assert_eq!(doc.size, Some(5120));
        assert_eq!(doc.uploaded_at.timestamp_millis(), 1770091506789);
    }

    #[test]
    fn test_row_tolerates_null_optionals() {
        let json = r#"{"id":"1","title":"T","file_name":"t.pdf","created_at":"2026-01-01T00:00:00Z","size":null,"path":null}"#;
        let row: DocumentRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.size, None);
        assert_eq!(row.path, None);
    }

    #[test]
    fn test_insert_row_serialization() {
        let row = InsertRow {
            title: "T",
            file_name: "t.pdf",
            size: Some(3),
            path: None,
        };
        assert_eq!(
            serde_json::to_value([row]).unwrap(),
            serde_json::json!([{ "title": "T", "file_name": "t.pdf", "size": 3 }])
        );
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq_filter("abc"), "eq.abc");
    }

    #[tokio::test]
    async fn test_unconfigured_list_fails_at_first_use() {
        let client = SupabaseClient::new("", SecretString::from(String::new())).unwrap();
        let store = SupabaseMetadataStore::new(client);
        assert!(matches!(
            store.list_all().await,
            Err(MetadataError::Remote(RemoteError::NotConfigured))
        ));
    }

    mod http {
        use super::*;
        use wiremock::matchers::{header, method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const ROWS: &str = "/rest/v1/pdf_documents";

        fn store(server: &MockServer) -> SupabaseMetadataStore {
            let client =
                SupabaseClient::new(server.uri(), SecretString::from("anon".to_string())).unwrap();
            SupabaseMetadataStore::new(client)
        }

        fn invalid_uuid() -> ResponseTemplate {
            ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "22P02",
                "details": null,
                "hint": null,
                "message": "invalid input syntax for type uuid: \"not-a-uuid\""
            }))
        }

        #[tokio::test]
        async fn test_malformed_id_is_missing() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(ROWS))
                .and(query_param("id", "eq.not-a-uuid"))
                .respond_with(invalid_uuid())
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path(ROWS))
                .and(query_param("id", "eq.not-a-uuid"))
                .respond_with(invalid_uuid())
                .mount(&server)
                .await;

            let store = store(&server);
            assert!(store.get("not-a-uuid").await.unwrap().is_none());
            assert!(!store.delete("not-a-uuid").await.unwrap());
        }

        #[tokio::test]
        async fn test_other_bad_request_is_an_error() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(ROWS))
                .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                    "code": "PGRST100",
                    "message": "failed to parse filter"
                })))
                .mount(&server)
                .await;

            assert!(matches!(
                store(&server).get("7f0c7f6e-5d55-4c2b-9a57-0d7d3c4d8a10").await,
                Err(MetadataError::Remote(RemoteError::Status { status: 400, .. }))
            ));
        }

        #[tokio::test]
        async fn test_list_orders_newest_first_with_id_tie_break() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(ROWS))
                .and(query_param("select", "*"))
                .and(query_param("order", "created_at.desc,id.desc"))
                .and(header("apikey", "anon"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
                .expect(1)
                .mount(&server)
                .await;

            assert!(store(&server).list_all().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_empty_insert_response_is_corrupt() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(ROWS))
                .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
                .mount(&server)
                .await;

            let doc = NewDocument {
                title: "T".to_string(),
                file_name: "t.pdf".to_string(),
                size: Some(1),
                path: Some("t.pdf".to_string()),
            };
            assert!(matches!(
                store(&server).insert(doc).await,
                Err(MetadataError::Corrupt(_))
            ));
        }
    }
}
