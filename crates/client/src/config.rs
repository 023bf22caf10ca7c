use shared_types::AppError;

// --- Environment helpers ---

fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000/api/v1".to_string())
}

fn pinata_api_url() -> String {
    std::env::var("PINATA_API_URL").unwrap_or_else(|_| "https://api.pinata.cloud".to_string())
}

fn pinata_gateway_url() -> String {
    std::env::var("PINATA_GATEWAY_URL")
        .unwrap_or_else(|_| "https://gateway.pinata.cloud/ipfs".to_string())
}

fn pinata_jwt() -> Result<String, AppError> {
    std::env::var("PINATA_JWT").map_err(|_| AppError::internal("PINATA_JWT is not configured"))
}

/// Endpoints and credentials for the external collaborators.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the records API, no trailing slash.
    pub api_base_url: String,
    /// Base URL of the pinning API.
    pub pinata_api_url: String,
    /// Public gateway prefix used to build download URLs.
    pub pinata_gateway_url: String,
    /// Scoped JWT for the pinning service.
    pub pinata_jwt: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: api_base_url(),
            pinata_api_url: pinata_api_url(),
            pinata_gateway_url: pinata_gateway_url(),
            pinata_jwt: pinata_jwt()?,
        })
    }
}
