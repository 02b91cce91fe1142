//! HTTP client abstraction used by the provisioning engine.
//!
//! The engine depends only on the [`HttpClient`] trait; production code uses
//! the curl-backed [`CurlClient`], tests substitute an in-memory fake. Both
//! calls are blocking and enforce the run's per-request timeout so a hung
//! server cannot stall the process.

use crate::crumb::Crumb;
use crate::Result;
use std::time::Duration;

/// Status code and body of one HTTP exchange. Non-success statuses are
/// returned, not raised; callers interpret them per endpoint.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Basic-auth credentials for the Jenkins API.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub secret: String,
}

/// Minimal blocking HTTP capability the engine needs.
pub trait HttpClient {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse>;
    fn post(&self, url: &str, headers: &[(String, String)], body: &[u8]) -> Result<HttpResponse>;
}

/// Headers for a mutating XML post: content type plus the crumb if present.
pub fn write_headers(crumb: Option<&Crumb>) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/xml".to_string())];
    if let Some(crumb) = crumb {
        headers.push((crumb.header.clone(), crumb.value.clone()));
    }
    headers
}

/// curl-backed client. One `Easy` handle per request; connection reuse is
/// irrelevant at this request volume.
pub struct CurlClient {
    credentials: Credentials,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    fn prepare(&self, url: &str, headers: &[(String, String)]) -> Result<curl::easy::Easy> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(concat!("jjp/", env!("CARGO_PKG_VERSION")))?;
        easy.username(&self.credentials.user)?;
        easy.password(&self.credentials.secret)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if !headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(easy)
    }

    fn perform(easy: &mut curl::easy::Easy) -> Result<HttpResponse> {
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let status = easy.response_code()?;
        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

impl HttpClient for CurlClient {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
        let mut easy = self.prepare(url, headers)?;
        easy.follow_location(true)?;
        tracing::debug!("GET {}", url);
        Self::perform(&mut easy)
    }

    fn post(&self, url: &str, headers: &[(String, String)], body: &[u8]) -> Result<HttpResponse> {
        let mut easy = self.prepare(url, headers)?;
        easy.post(true)?;
        easy.post_fields_copy(body)?;
        tracing::debug!("POST {} ({} bytes)", url, body.len());
        Self::perform(&mut easy)
    }
}
