//! Blob-store port and the Pinata pinning-service adapter. The store is
//! content-addressed: upload yields a CID, download is a gateway URL built
//! from it, and unpinning releases the content.

use serde::Deserialize;
use shared_types::AppError;

use crate::config::ClientConfig;

/// A file picked by the user, as handed to the upload flow.
#[derive(Clone, Debug)]
pub struct FileData {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Metadata pinned alongside the file.
#[derive(Clone, Debug)]
pub struct PinMetadata {
    pub name: String,
    pub case_id: String,
}

/// What the pinning service returns for a successful upload.
#[derive(Clone, Debug, PartialEq)]
pub struct PinReceipt {
    pub ipfs_cid: String,
    pub pin_size: i64,
    pub timestamp: String,
}

/// Port for the content-addressed blob store.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    async fn upload_file(&self, file: &FileData, metadata: &PinMetadata) -> Result<PinReceipt, AppError>;
    /// Public gateway URL for a pinned CID.
    fn file_url(&self, cid: &str) -> String;
    async fn unpin(&self, cid: &str) -> Result<(), AppError>;
}

/// Wire shape of the pinning API's upload response.
#[derive(Debug, Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pin_size: i64,
    #[serde(rename = "Timestamp", default)]
    timestamp: String,
}

/// Pinata-backed blob store.
#[derive(Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    api_url: String,
    gateway_url: String,
    jwt: String,
}

impl PinataClient {
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        gateway_url: impl Into<String>,
        jwt: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            gateway_url: gateway_url.into(),
            jwt: jwt.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.pinata_api_url.clone(),
            config.pinata_gateway_url.clone(),
            config.pinata_jwt.clone(),
        )
    }
}

impl BlobStore for PinataClient {
    #[tracing::instrument(skip(self, file), fields(file_name = %file.name, size = file.bytes.len()))]
    async fn upload_file(&self, file: &FileData, metadata: &PinMetadata) -> Result<PinReceipt, AppError> {
        let pinata_metadata = serde_json::json!({
            "name": metadata.name,
            "keyvalues": { "caseId": metadata.case_id },
        })
        .to_string();
        let pinata_options = serde_json::json!({ "cidVersion": 1 }).to_string();

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::bad_request(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("pinataMetadata", pinata_metadata)
            .text("pinataOptions", pinata_options);

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Pinning upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Pinning service rejected upload");
            return Err(AppError::from_status(status.as_u16(), &body));
        }

        let pinned: PinFileResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed pinning response: {}", e)))?;

        tracing::info!(cid = %pinned.ipfs_hash, "File pinned");
        Ok(PinReceipt {
            ipfs_cid: pinned.ipfs_hash,
            pin_size: pinned.pin_size,
            timestamp: pinned.timestamp,
        })
    }

    fn file_url(&self, cid: &str) -> String {
        format!("{}/{}", self.gateway_url, cid)
    }

    #[tracing::instrument(skip(self))]
    async fn unpin(&self, cid: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(format!("{}/pinning/unpin/{}", self.api_url, cid))
            .bearer_auth(&self.jwt)
            .send()
            .await
            .map_err(|e| AppError::transport(format!("Unpin failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_status(status.as_u16(), &body));
        }
        Ok(())
    }
}
