//! Anti-forgery token (crumb) discovery.
//!
//! Jenkins with CSRF protection enabled requires a crumb header on every
//! mutating request. The crumb is fetched once per run, before any mutation,
//! and is immutable afterwards; it is never persisted or refreshed. A 404
//! from the issuer means CSRF protection is disabled, which is a legitimate
//! configuration and not an error.

use crate::error::ProvisionError;
use crate::http::HttpClient;
use crate::Result;
use serde::Deserialize;

/// Header name/value pair issued by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub header: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct CrumbPayload {
    #[serde(rename = "crumbRequestField")]
    crumb_request_field: String,
    crumb: String,
}

fn crumb_url(base_url: &str) -> String {
    format!("{}/crumbIssuer/api/json", base_url.trim_end_matches('/'))
}

/// Fetches the crumb, returning `None` when the server has CSRF protection
/// disabled (issuer answers 404). Any status other than 200/404 aborts the
/// run before a mutation is attempted.
pub fn fetch_crumb(client: &impl HttpClient, base_url: &str) -> Result<Option<Crumb>> {
    let url = crumb_url(base_url);
    let response = client.get(&url, &[])?;
    match response.status {
        200 => {
            let payload: CrumbPayload =
                serde_json::from_str(&response.body).map_err(|e| {
                    ProvisionError::UnexpectedStatus {
                        url: url.clone(),
                        status: 200,
                        body: format!("malformed crumb payload: {e}"),
                    }
                })?;
            tracing::debug!("crumb issuer returned header {}", payload.crumb_request_field);
            Ok(Some(Crumb {
                header: payload.crumb_request_field,
                value: payload.crumb,
            }))
        }
        404 => {
            tracing::info!("no crumb issuer; assuming CSRF protection is disabled");
            Ok(None)
        }
        status => Err(ProvisionError::from_response(&url, status, response.body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;

    /// Client that answers every GET with one canned response.
    struct Static {
        status: u32,
        body: &'static str,
    }

    impl HttpClient for Static {
        fn get(&self, _url: &str, _headers: &[(String, String)]) -> crate::Result<HttpResponse> {
            Ok(HttpResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }

        fn post(
            &self,
            _url: &str,
            _headers: &[(String, String)],
            _body: &[u8],
        ) -> crate::Result<HttpResponse> {
            unreachable!("crumb discovery never posts")
        }
    }

    #[test]
    fn parses_issuer_payload() {
        let client = Static {
            status: 200,
            body: r#"{"_class":"hudson.security.csrf.DefaultCrumbIssuer","crumb":"abc123","crumbRequestField":"Jenkins-Crumb"}"#,
        };
        let crumb = fetch_crumb(&client, "http://jenkins/").unwrap().unwrap();
        assert_eq!(crumb.header, "Jenkins-Crumb");
        assert_eq!(crumb.value, "abc123");
    }

    #[test]
    fn missing_issuer_is_not_an_error() {
        let client = Static {
            status: 404,
            body: "",
        };
        assert_eq!(fetch_crumb(&client, "http://jenkins").unwrap(), None);
    }

    #[test]
    fn auth_failure_is_fatal() {
        let client = Static {
            status: 403,
            body: "forbidden",
        };
        assert!(matches!(
            fetch_crumb(&client, "http://jenkins").unwrap_err(),
            ProvisionError::Authorization { status: 403, .. }
        ));
    }

    #[test]
    fn server_error_is_fatal() {
        let client = Static {
            status: 500,
            body: "oops",
        };
        assert!(matches!(
            fetch_crumb(&client, "http://jenkins").unwrap_err(),
            ProvisionError::UnexpectedStatus { status: 500, .. }
        ));
    }

    #[test]
    fn malformed_payload_is_fatal() {
        let client = Static {
            status: 200,
            body: "not json",
        };
        assert!(fetch_crumb(&client, "http://jenkins").is_err());
    }
}
