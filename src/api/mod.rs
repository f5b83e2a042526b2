//! REST API Bindings
//!
//! Requests are described as plain `ApiRequest` values by the per-domain
//! modules and executed by `ApiClient`, which adds the bearer token and maps
//! failures into `ApiError`.

mod auth;
mod kelompok;
mod komponen;
mod pelaporan;
mod wilayah;

pub use auth::*;
pub use kelompok::*;
pub use komponen::*;
pub use pelaporan::*;
pub use wilayah::*;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// One backend call, independent of the HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Post, path)
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Patch, path)
        }
    }

    /// Add a query parameter; `None` and blank values are skipped
    pub fn with_query(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value.map(|v| v.to_string()).filter(|v| !v.trim().is_empty()) {
            self.query.push((key, value));
        }
        self
    }
}

/// Bodies arrive either bare or wrapped in `{ "data": ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

/// Decode a 2xx body
pub fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    if body.trim().is_empty() {
        return Err(ApiError::Malformed("respons kosong".to_string()));
    }
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope::Wrapped { data }) | Ok(Envelope::Bare(data)) => Ok(data),
        Err(e) => Err(ApiError::Malformed(e.to_string())),
    }
}

/// Map a status code and body to success or `ApiError::Http`
pub fn check_status(status: u16, body: &str) -> ApiResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::from_response(status, body))
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
    session: Session,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a request, returning the raw body of a 2xx response
    async fn execute(&self, request: &ApiRequest) -> ApiResult<String> {
        let url = self.config.api_url(&request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };
        let builder = match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        log::debug!("[Api] {:?} {}", request.method, request.path);
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if let Err(e) = check_status(status, &body) {
            log::warn!("[Api] {:?} {} failed with {}: {}", request.method, request.path, status, e);
            return Err(e);
        }
        Ok(body)
    }

    /// Execute and decode the response body
    pub async fn send<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Execute a mutation whose response body is not needed
    pub async fn send_unit(&self, request: &ApiRequest) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Fetch a same-origin static JSON file (no token)
    pub async fn fetch_static<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.http.get(self.config.static_url(path)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        check_status(status, &body)?;
        decode(&body)
    }

    /// Download raw bytes of an uploaded file or font
    pub async fn fetch_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &body));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Fail early on a missing identifier rather than calling `/kelompok/undefined`
pub fn require_id(id: Option<u32>, what: &str) -> ApiResult<u32> {
    id.filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation(format!("ID {} tidak tersedia", what)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VillageGroup;

    #[test]
    fn test_decode_bare_and_wrapped() {
        let bare: Vec<u32> = decode("[1,2,3]").unwrap();
        assert_eq!(bare, vec![1, 2, 3]);

        let wrapped: Vec<u32> = decode(r#"{"data":[4,5]}"#).unwrap();
        assert_eq!(wrapped, vec![4, 5]);
    }

    #[test]
    fn test_decode_malformed_shapes() {
        assert!(matches!(decode::<Vec<u32>>(""), Err(ApiError::Malformed(_))));
        assert!(matches!(
            decode::<VillageGroup>(r#"{"data":{"unexpected":true}}"#),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(200, "").is_ok());
        assert!(check_status(204, "").is_ok());
        let err = check_status(500, r#"{"error":"Gagal memperbarui status"}"#).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 500, message: "Gagal memperbarui status".into() });
    }

    #[test]
    fn test_with_query_skips_empty() {
        let request = ApiRequest::get("/pelaporan/all")
            .with_query("kabupaten", Some("Sleman"))
            .with_query("startDate", None::<String>)
            .with_query("endDate", Some(""));
        assert_eq!(request.query, vec![("kabupaten", "Sleman".to_string())]);
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(Some(5), "kelompok"), Ok(5));
        assert!(matches!(require_id(None, "kelompok"), Err(ApiError::Validation(_))));
        assert!(matches!(require_id(Some(0), "kelompok"), Err(ApiError::Validation(_))));
    }
}
