use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::models::{Report, Selection};

/// Name of the multipart field the endpoint reads the document from.
pub const FILE_FIELD: &str = "file";

/// Sends documents to the notes endpoint.
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Uploads the selected file as multipart and parses the returned report.
    pub async fn upload(&self, selection: &Selection) -> Result<Report, SubmitError> {
        let bytes = tokio::fs::read(&selection.path)
            .await
            .map_err(|source| SubmitError::ReadFile { path: selection.path.clone(), source })?;

        let mime = mime_guess::from_path(&selection.path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(selection.name.clone())
            .mime_str(mime.essence_str())
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(endpoint = %self.endpoint, file = %selection.name, mime = %mime, "uploading");
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "upload rejected");
            let status = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            return Err(SubmitError::Upload { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        debug!(len = body.len(), "response received");
        serde_json::from_str::<Report>(&body).map_err(|e| SubmitError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{"summary":"S","key_points":["A","B"],"quiz":[{"question":"Q1","options":["X","Y"],"answer":"Y"}]}"#;

    fn write_selection(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> Selection {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        Selection::from_path(&path).unwrap()
    }

    #[tokio::test]
    async fn test_upload_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="notes.pdf""#.to_string()),
                Matcher::Regex("(?i)content-type: application/pdf".to_string()),
                Matcher::Regex("lecture text".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let sel = write_selection(&dir, "notes.pdf", b"lecture text");
        let client = UploadClient::new(&format!("{}/api/upload", server.url()), None).unwrap();

        let report = client.upload(&sel).await.unwrap();
        mock.assert_async().await;
        assert_eq!(report, serde_json::from_str::<Report>(SAMPLE).unwrap());
    }

    #[tokio::test]
    async fn test_upload_server_error_carries_status_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let sel = write_selection(&dir, "notes.txt", b"x");
        let client = UploadClient::new(&format!("{}/api/upload", server.url()), None).unwrap();

        let err = client.upload(&sel).await.unwrap_err();
        assert!(matches!(&err, SubmitError::Upload { status } if status == "Internal Server Error"));
        assert_eq!(err.to_string(), "Upload failed: Internal Server Error");
    }

    #[tokio::test]
    async fn test_upload_bad_json_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(200)
            .with_body(r#"{"summary":"S"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let sel = write_selection(&dir, "notes.txt", b"x");
        let client = UploadClient::new(&format!("{}/api/upload", server.url()), None).unwrap();

        let err = client.upload(&sel).await.unwrap_err();
        assert!(matches!(err, SubmitError::Parse(_)));
    }

    #[tokio::test]
    async fn test_upload_unreachable_is_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let sel = write_selection(&dir, "notes.txt", b"x");
        // port 9 (discard) is essentially never listening on localhost
        let client = UploadClient::new("http://127.0.0.1:9/api/upload", Some(Duration::from_secs(5))).unwrap();

        let err = client.upload(&sel).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_read_error() {
        let sel = Selection {
            path: PathBuf::from("/definitely/not/here.pdf"),
            name: "here.pdf".into(),
            size: 0,
        };
        let client = UploadClient::new("http://127.0.0.1:9/api/upload", None).unwrap();
        let err = client.upload(&sel).await.unwrap_err();
        assert!(matches!(err, SubmitError::ReadFile { .. }));
    }
}
