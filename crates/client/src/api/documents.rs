use reqwest::Method;
use shared_types::{
    AppError, Document, DocumentAccessRequest, DocumentListResponse, DocumentLog,
    DocumentLogsResponse, DocumentPermissions, MutationAck, UploadDocumentRequest,
    ViewDocumentResponse, WalletAddress,
};

use super::Endpoint;
use crate::config::ClientConfig;
use crate::session::Session;

/// Port for the case-document endpoints.
#[allow(async_fn_in_trait)]
pub trait DocumentApi {
    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, AppError>;
    /// Fetch one document for viewing; the backend records a VIEWED log
    /// entry as a side effect.
    async fn view_document(&self, doc_id: &str) -> Result<Document, AppError>;
    async fn upload_document(&self, req: &UploadDocumentRequest) -> Result<MutationAck, AppError>;
    async fn delete_document(&self, doc_id: &str) -> Result<MutationAck, AppError>;
    async fn document_logs(&self, doc_id: &str) -> Result<Vec<DocumentLog>, AppError>;
    async fn grant_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError>;
    async fn revoke_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError>;
}

/// reqwest-backed adapter for the case-document endpoints.
#[derive(Clone)]
pub struct HttpDocumentApi {
    endpoint: Endpoint,
}

impl HttpDocumentApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            endpoint: Endpoint::new(http, base_url, session),
        }
    }

    pub fn from_config(config: &ClientConfig, session: Session) -> Self {
        Self::new(reqwest::Client::new(), config.api_base_url.clone(), session)
    }

    fn access_body(target: &WalletAddress, permissions: DocumentPermissions) -> DocumentAccessRequest {
        DocumentAccessRequest {
            target_wallet: target.clone(),
            permissions,
        }
    }
}

impl DocumentApi for HttpDocumentApi {
    async fn list_documents(&self, case_id: &str) -> Result<Vec<Document>, AppError> {
        let req = self
            .endpoint
            .request(Method::GET, &format!("/case-doc/{}", case_id));
        let list: DocumentListResponse = self.endpoint.send(req).await?;
        Ok(list.documents)
    }

    async fn view_document(&self, doc_id: &str) -> Result<Document, AppError> {
        let req = self
            .endpoint
            .request(Method::GET, &format!("/case-doc/{}/view", doc_id));
        let envelope: ViewDocumentResponse = self.endpoint.send(req).await?;
        Ok(envelope.sanitized_document)
    }

    async fn upload_document(&self, req: &UploadDocumentRequest) -> Result<MutationAck, AppError> {
        let builder = self
            .endpoint
            .request(Method::POST, "/case-doc/upload")
            .json(req);
        self.endpoint.send(builder).await
    }

    async fn delete_document(&self, doc_id: &str) -> Result<MutationAck, AppError> {
        let builder = self
            .endpoint
            .request(Method::DELETE, &format!("/case-doc/{}", doc_id));
        self.endpoint.send(builder).await
    }

    async fn document_logs(&self, doc_id: &str) -> Result<Vec<DocumentLog>, AppError> {
        let req = self
            .endpoint
            .request(Method::GET, &format!("/case-doc/{}/logs", doc_id));
        let envelope: DocumentLogsResponse = self.endpoint.send(req).await?;
        Ok(envelope.logs)
    }

    async fn grant_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        let builder = self
            .endpoint
            .request(Method::PATCH, &format!("/case-doc/{}/grant-access", doc_id))
            .json(&Self::access_body(target, permissions));
        self.endpoint.send(builder).await
    }

    async fn revoke_access(
        &self,
        doc_id: &str,
        target: &WalletAddress,
        permissions: DocumentPermissions,
    ) -> Result<MutationAck, AppError> {
        let builder = self
            .endpoint
            .request(Method::PATCH, &format!("/case-doc/{}/revoke-access", doc_id))
            .json(&Self::access_body(target, permissions));
        self.endpoint.send(builder).await
    }
}
