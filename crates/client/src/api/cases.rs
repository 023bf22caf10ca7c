use reqwest::Method;
use shared_types::{
    AppError, Case, CaseEnvelope, CaseListResponse, ChangeAdminRequest, CreateCaseRequest,
    CreateCaseResponse, GrantAccessRequest, MutationAck, Participant, RevokeAccessRequest,
    WalletAddress,
};

use super::Endpoint;
use crate::config::ClientConfig;
use crate::session::Session;

/// Port for the case endpoints. The store is generic over this so tests can
/// substitute a scripted fake.
#[allow(async_fn_in_trait)]
pub trait CaseApi {
    async fn list_cases(&self) -> Result<CaseListResponse, AppError>;
    async fn get_case(&self, case_id: &str) -> Result<Case, AppError>;
    async fn create_case(&self, req: &CreateCaseRequest) -> Result<CreateCaseResponse, AppError>;
    async fn grant_access(&self, case_id: &str, participant: &Participant) -> Result<MutationAck, AppError>;
    async fn revoke_access(&self, case_id: &str, wallet: &WalletAddress) -> Result<MutationAck, AppError>;
    async fn change_admin(&self, case_id: &str, new_admin: &WalletAddress) -> Result<MutationAck, AppError>;
    async fn close_case(&self, case_id: &str) -> Result<MutationAck, AppError>;
}

/// reqwest-backed adapter for the case endpoints.
#[derive(Clone)]
pub struct HttpCaseApi {
    endpoint: Endpoint,
}

impl HttpCaseApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            endpoint: Endpoint::new(http, base_url, session),
        }
    }

    pub fn from_config(config: &ClientConfig, session: Session) -> Self {
        Self::new(reqwest::Client::new(), config.api_base_url.clone(), session)
    }
}

impl CaseApi for HttpCaseApi {
    async fn list_cases(&self) -> Result<CaseListResponse, AppError> {
        let req = self.endpoint.request(Method::GET, "/case");
        self.endpoint.send(req).await
    }

    async fn get_case(&self, case_id: &str) -> Result<Case, AppError> {
        let req = self.endpoint.request(Method::GET, &format!("/case/{}", case_id));
        let envelope: CaseEnvelope = self.endpoint.send(req).await?;
        Ok(envelope.case_record)
    }

    async fn create_case(&self, req: &CreateCaseRequest) -> Result<CreateCaseResponse, AppError> {
        let builder = self.endpoint.request(Method::POST, "/case/create").json(req);
        self.endpoint.send(builder).await
    }

    async fn grant_access(&self, case_id: &str, participant: &Participant) -> Result<MutationAck, AppError> {
        let body = GrantAccessRequest {
            case_id: case_id.to_string(),
            participant: participant.clone(),
        };
        let builder = self
            .endpoint
            .request(Method::PATCH, "/case/grant-access")
            .json(&body);
        self.endpoint.send(builder).await
    }

    async fn revoke_access(&self, case_id: &str, wallet: &WalletAddress) -> Result<MutationAck, AppError> {
        let body = RevokeAccessRequest {
            case_id: case_id.to_string(),
            wallet: wallet.clone(),
        };
        let builder = self
            .endpoint
            .request(Method::PATCH, "/case/revoke-access")
            .json(&body);
        self.endpoint.send(builder).await
    }

    async fn change_admin(&self, case_id: &str, new_admin: &WalletAddress) -> Result<MutationAck, AppError> {
        let body = ChangeAdminRequest {
            case_id: case_id.to_string(),
            new_admin_wallet: new_admin.clone(),
        };
        let builder = self
            .endpoint
            .request(Method::PATCH, "/case/change-admin")
            .json(&body);
        self.endpoint.send(builder).await
    }

    async fn close_case(&self, case_id: &str) -> Result<MutationAck, AppError> {
        let builder = self
            .endpoint
            .request(Method::PATCH, &format!("/case/{}/close", case_id));
        self.endpoint.send(builder).await
    }
}
