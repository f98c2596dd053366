use gloo_net::http::Request;
use serde::Deserialize;

use crate::config;

/// Body of the stats API root endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Connectivity {
    Checking,
    Online(ServiceStatus),
    Offline,
}

impl Connectivity {
    pub fn label(&self) -> String {
        match self {
            Connectivity::Checking => "Checking stats service...".to_string(),
            Connectivity::Online(status) => format!("Stats service: {}", status.message),
            Connectivity::Offline => "Stats service unreachable".to_string(),
        }
    }
}

pub fn status_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

pub async fn fetch_status() -> Result<ServiceStatus, gloo_net::Error> {
    Request::get(&status_url(config::get_backend_url()))
        .send()
        .await?
        .json::<ServiceStatus>()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_has_single_slash() {
        assert_eq!(status_url("http://localhost:8000"), "http://localhost:8000/");
        assert_eq!(status_url("http://localhost:8000/"), "http://localhost:8000/");
        assert_eq!(status_url(""), "/");
    }

    #[test]
    fn labels_describe_the_outcome() {
        let online = Connectivity::Online(ServiceStatus {
            status: "ok".to_string(),
            message: "NFL API running".to_string(),
        });
        assert_eq!(online.label(), "Stats service: NFL API running");
        assert_eq!(Connectivity::Offline.label(), "Stats service unreachable");
    }
}
