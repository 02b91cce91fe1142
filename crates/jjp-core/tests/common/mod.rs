//! In-memory fake Jenkins implementing the `HttpClient` trait.
//!
//! Remembers created items across calls so idempotence and call ordering
//! can be asserted. Every request is recorded as "METHOD <relative-url>",
//! with " +crumb" appended when the anti-forgery header was attached.

use jjp_core::http::{HttpClient, HttpResponse};
use jjp_core::Result;
use std::cell::RefCell;
use std::collections::HashSet;

pub const BASE: &str = "http://jenkins.test";
pub const CRUMB_HEADER: &str = "Jenkins-Crumb";
pub const CRUMB_VALUE: &str = "abc123";

/// How the fake answers the crumb issuer endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrumbMode {
    /// 200 with a `Jenkins-Crumb` pair.
    Enabled,
    /// 404: CSRF protection disabled.
    Disabled,
}

pub struct FakeJenkins {
    crumb: CrumbMode,
    /// Encoded item paths relative to base ("/job/teams/job/payments").
    items: RefCell<HashSet<String>>,
    calls: RefCell<Vec<String>>,
    /// Item paths whose existence probe answers 500.
    failing_probes: HashSet<String>,
    /// Item paths whose creation answers 500.
    failing_creates: HashSet<String>,
}

impl FakeJenkins {
    pub fn new(crumb: CrumbMode) -> Self {
        Self {
            crumb,
            items: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            failing_probes: HashSet::new(),
            failing_creates: HashSet::new(),
        }
    }

    /// Pre-seeds existing items, e.g. `"/job/teams"`.
    pub fn with_existing(self, items: &[&str]) -> Self {
        self.items
            .borrow_mut()
            .extend(items.iter().map(|s| s.to_string()));
        self
    }

    /// Makes the probe of one item path answer 500.
    pub fn with_failing_probe(mut self, item: &str) -> Self {
        self.failing_probes.insert(item.to_string());
        self
    }

    /// Makes the creation of one item path answer 500.
    pub fn with_failing_create(mut self, item: &str) -> Self {
        self.failing_creates.insert(item.to_string());
        self
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn exists(&self, item: &str) -> bool {
        self.items.borrow().contains(item)
    }

    pub fn post_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("POST"))
            .count()
    }

    fn rel<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(BASE).unwrap_or(url)
    }
}

impl HttpClient for FakeJenkins {
    fn get(&self, url: &str, _headers: &[(String, String)]) -> Result<HttpResponse> {
        let rel = self.rel(url).to_string();
        self.calls.borrow_mut().push(format!("GET {rel}"));

        if rel == "/crumbIssuer/api/json" {
            return Ok(match self.crumb {
                CrumbMode::Enabled => HttpResponse {
                    status: 200,
                    body: format!(
                        r#"{{"crumbRequestField":"{CRUMB_HEADER}","crumb":"{CRUMB_VALUE}"}}"#
                    ),
                },
                CrumbMode::Disabled => HttpResponse {
                    status: 404,
                    body: String::new(),
                },
            });
        }
        if let Some(item) = rel.strip_suffix("/api/json") {
            if self.failing_probes.contains(item) {
                return Ok(HttpResponse {
                    status: 500,
                    body: "simulated server error".to_string(),
                });
            }
            let status = if self.items.borrow().contains(item) {
                200
            } else {
                404
            };
            return Ok(HttpResponse {
                status,
                body: String::new(),
            });
        }
        Ok(HttpResponse {
            status: 404,
            body: format!("unhandled GET {rel}"),
        })
    }

    fn post(&self, url: &str, headers: &[(String, String)], _body: &[u8]) -> Result<HttpResponse> {
        let rel = self.rel(url).to_string();
        let crumbed = headers
            .iter()
            .any(|(k, v)| k == CRUMB_HEADER && v == CRUMB_VALUE);
        self.calls
            .borrow_mut()
            .push(format!("POST {rel}{}", if crumbed { " +crumb" } else { "" }));

        if let Some((parent, name)) = rel.split_once("/createItem?name=") {
            let item = format!("{parent}/job/{name}");
            if self.failing_creates.contains(&item) {
                return Ok(HttpResponse {
                    status: 500,
                    body: "simulated create failure".to_string(),
                });
            }
            self.items.borrow_mut().insert(item);
            return Ok(HttpResponse {
                status: 200,
                body: String::new(),
            });
        }
        if let Some(item) = rel.strip_suffix("/config.xml") {
            let status = if self.items.borrow().contains(item) {
                200
            } else {
                404
            };
            return Ok(HttpResponse {
                status,
                body: String::new(),
            });
        }
        Ok(HttpResponse {
            status: 400,
            body: format!("unhandled POST {rel}"),
        })
    }
}
