//! Application Configuration
//!
//! Endpoints and UI defaults, baked in at build time from `DESA_PRIMA_*`
//! environment variables.

use log::LevelFilter;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Page origin assumed when no browser window is available
const FALLBACK_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API root, e.g. `https://api.desaprima.id/api`
    pub api_base_url: String,
    /// Root that relative upload paths resolve against
    pub upload_base_url: String,
    /// Root of the static `/data/...` reference files, may be origin-relative
    pub static_base_url: String,
    /// Where the PDF export fonts are served, may be origin-relative
    pub font_base_url: String,
    /// Province whose kabupaten list seeds the region filters
    pub province_id: String,
    /// localStorage key of the bearer token
    pub token_key: String,
    pub page_size: usize,
    pub bulk_concurrency: usize,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            upload_base_url: "http://localhost:5000".to_string(),
            static_base_url: String::new(),
            font_base_url: "/fonts".to_string(),
            province_id: "34".to_string(),
            token_key: "token".to_string(),
            page_size: 10,
            bulk_concurrency: 4,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Configuration from the build environment, relative roots resolved
    /// against the page origin
    pub fn from_env() -> Self {
        Self::from_lookup(build_env).with_origin(&page_origin())
    }

    /// Configuration from any key lookup, missing or invalid keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let number = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        Self {
            api_base_url: text("DESA_PRIMA_API_URL", defaults.api_base_url),
            upload_base_url: text("DESA_PRIMA_UPLOAD_URL", defaults.upload_base_url),
            static_base_url: text("DESA_PRIMA_STATIC_URL", defaults.static_base_url),
            font_base_url: text("DESA_PRIMA_FONT_URL", defaults.font_base_url),
            province_id: text("DESA_PRIMA_PROVINCE_ID", defaults.province_id),
            token_key: text("DESA_PRIMA_TOKEN_KEY", defaults.token_key),
            page_size: number("DESA_PRIMA_PAGE_SIZE", defaults.page_size),
            bulk_concurrency: number("DESA_PRIMA_BULK_CONCURRENCY", defaults.bulk_concurrency),
            log_level: lookup("DESA_PRIMA_LOG_LEVEL")
                .map(|v| console_logger::parse_level(&v))
                .unwrap_or(defaults.log_level),
        }
    }

    /// Prefix every origin-relative root with `origin`. The HTTP client only
    /// accepts absolute URLs.
    pub fn with_origin(mut self, origin: &str) -> Self {
        for base in [
            &mut self.api_base_url,
            &mut self.upload_base_url,
            &mut self.static_base_url,
            &mut self.font_base_url,
        ] {
            if !is_absolute(base) {
                *base = join(origin, base).trim_end_matches('/').to_string();
            }
        }
        self
    }

    /// Absolute URL of an API path (`/kelompok/5`)
    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_base_url, path)
    }

    /// Absolute URL of a static reference file
    pub fn static_url(&self, path: &str) -> String {
        join(&self.static_base_url, path)
    }

    pub fn font_url(&self, file: &str) -> String {
        join(&self.font_base_url, file)
    }

    /// Download URL of an uploaded file. Absolute URLs pass through;
    /// relative paths get each segment percent-encoded.
    pub fn upload_url(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        let encoded = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        join(&self.upload_base_url, &encoded)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .filter(|origin| is_absolute(origin))
        .unwrap_or_else(|| FALLBACK_ORIGIN.to_string())
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// `option_env!` needs literal names, one arm per key
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "DESA_PRIMA_API_URL" => option_env!("DESA_PRIMA_API_URL"),
        "DESA_PRIMA_UPLOAD_URL" => option_env!("DESA_PRIMA_UPLOAD_URL"),
        "DESA_PRIMA_STATIC_URL" => option_env!("DESA_PRIMA_STATIC_URL"),
        "DESA_PRIMA_FONT_URL" => option_env!("DESA_PRIMA_FONT_URL"),
        "DESA_PRIMA_PROVINCE_ID" => option_env!("DESA_PRIMA_PROVINCE_ID"),
        "DESA_PRIMA_TOKEN_KEY" => option_env!("DESA_PRIMA_TOKEN_KEY"),
        "DESA_PRIMA_PAGE_SIZE" => option_env!("DESA_PRIMA_PAGE_SIZE"),
        "DESA_PRIMA_BULK_CONCURRENCY" => option_env!("DESA_PRIMA_BULK_CONCURRENCY"),
        "DESA_PRIMA_LOG_LEVEL" => option_env!("DESA_PRIMA_LOG_LEVEL"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DESA_PRIMA_API_URL", "https://api.desaprima.id/api/"),
            ("DESA_PRIMA_PAGE_SIZE", "25"),
            ("DESA_PRIMA_BULK_CONCURRENCY", "zero"),
            ("DESA_PRIMA_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.api_base_url, "https://api.desaprima.id/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.bulk_concurrency, 4);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.api_url("/kelompok/5/status"), "https://api.desaprima.id/api/kelompok/5/status");
    }

    #[test]
    fn test_upload_url_encodes_segments() {
        let config = AppConfig::default();
        assert_eq!(
            config.upload_url("/uploads/laporan/Laporan Maret #1.pdf"),
            "http://localhost:5000/uploads/laporan/Laporan%20Maret%20%231.pdf"
        );
        assert_eq!(
            config.upload_url("https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
    }

    #[test]
    fn test_relative_roots_resolve_against_origin() {
        let config = AppConfig::default().with_origin("https://admin.desaprima.id");
        assert_eq!(
            config.static_url("/data/kabupaten/34.json"),
            "https://admin.desaprima.id/data/kabupaten/34.json"
        );
        assert_eq!(
            config.font_url("LiberationSans-Regular.ttf"),
            "https://admin.desaprima.id/fonts/LiberationSans-Regular.ttf"
        );
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_default_urls_are_accepted_by_http_client() {
        let config = AppConfig::default().with_origin(FALLBACK_ORIGIN);
        let client = reqwest::Client::new();
        for url in [
            config.static_url("/data/kabupaten/34.json"),
            config.font_url("LiberationSans-Regular.ttf"),
            config.upload_url("uploads/laporan/a.pdf"),
            config.api_url("/kelompok"),
        ] {
            assert!(client.get(&url).build().is_ok(), "rejected {}", url);
        }
    }
}
