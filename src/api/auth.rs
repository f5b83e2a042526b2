//! Login Endpoint

use serde::Deserialize;
use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

pub fn login_request(email: &str, password: &str) -> ApiResult<ApiRequest> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Email dan kata sandi wajib diisi".to_string()));
    }
    Ok(ApiRequest::post("/auth/login", json!({ "email": email, "password": password })))
}

/// Exchange credentials for a token and store it in the session
pub async fn login(api: &ApiClient, email: &str, password: &str) -> ApiResult<()> {
    let request = login_request(email, password)?;
    let response: LoginResponse = api.send(&request).await?;
    if response.token.trim().is_empty() {
        return Err(ApiError::Malformed("token kosong".to_string()));
    }
    api.session().set_token(&response.token);
    log::info!("[Auth] Logged in as {}", email.trim());
    Ok(())
}

pub fn logout(api: &ApiClient) {
    api.session().clear();
    log::info!("[Auth] Logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode;

    #[test]
    fn test_login_requires_credentials() {
        assert!(matches!(login_request(" ", "rahasia"), Err(ApiError::Validation(_))));
        assert!(matches!(login_request("admin@desa.id", ""), Err(ApiError::Validation(_))));

        let request = login_request(" admin@desa.id ", "rahasia").unwrap();
        assert_eq!(request.body, Some(json!({ "email": "admin@desa.id", "password": "rahasia" })));
    }

    #[test]
    fn test_login_response_aliases() {
        let response: LoginResponse = decode(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(response.token, "abc");
        let response: LoginResponse = decode(r#"{"data":{"token":"xyz"}}"#).unwrap();
        assert_eq!(response.token, "xyz");
    }
}
