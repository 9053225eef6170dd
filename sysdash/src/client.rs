//! HTTP client helpers for requesting telemetry from the backend and issuing actions.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::ClientError;
use crate::types::{
    ActionReply, AlertList, CpuSnapshot, DiskSnapshot, HistorySeries, KillRequest, MemorySnapshot,
    NetworkSnapshot, ProcessList, SystemInfo, Thresholds,
};

// Endpoint paths, relative to the configured base url
pub const SYSTEM_INFO: &str = "api/system-info";
pub const CPU: &str = "api/cpu";
pub const MEMORY: &str = "api/memory";
pub const DISK: &str = "api/disk";
pub const NETWORK: &str = "api/network";
pub const PROCESSES: &str = "api/processes";
pub const ALERTS: &str = "api/alerts";
pub const HISTORY: &str = "api/history";
pub const KILL_PROCESS: &str = "api/kill-process";
pub const UPDATE_THRESHOLDS: &str = "api/update-thresholds";

/// Everything the dashboard needs from the backend, one call per endpoint.
///
/// The futures are not required to be `Send`: the dashboard drives them on a
/// single thread.
#[allow(async_fn_in_trait)]
pub trait MetricsSource {
    async fn system_info(&self) -> Result<SystemInfo, ClientError>;
    async fn cpu(&self) -> Result<CpuSnapshot, ClientError>;
    async fn memory(&self) -> Result<MemorySnapshot, ClientError>;
    async fn disk(&self) -> Result<DiskSnapshot, ClientError>;
    async fn network(&self) -> Result<NetworkSnapshot, ClientError>;
    async fn processes(&self) -> Result<ProcessList, ClientError>;
    async fn alerts(&self) -> Result<AlertList, ClientError>;
    async fn history(&self) -> Result<HistorySeries, ClientError>;
    /// Returns the server's success message.
    async fn kill_process(&self, pid: u32) -> Result<String, ClientError>;
    async fn update_thresholds(&self, thresholds: Thresholds) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base: Url,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: "",
                source,
            })?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, endpoint: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(endpoint)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(self.url(endpoint)?)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })
    }

    // POST a JSON body; returns the decoded reply on 2xx, `Rejected` otherwise.
    async fn post<B: Serialize>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<ActionReply, ClientError> {
        let resp = self
            .http
            .post(self.url(endpoint)?)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let reply: ActionReply = serde_json::from_str(&text).unwrap_or_default();
        if status.is_success() {
            Ok(reply)
        } else {
            Err(ClientError::Rejected {
                endpoint,
                status: status.as_u16(),
                message: reply
                    .error
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            })
        }
    }
}

impl MetricsSource for HttpClient {
    async fn system_info(&self) -> Result<SystemInfo, ClientError> {
        self.get(SYSTEM_INFO).await
    }

    async fn cpu(&self) -> Result<CpuSnapshot, ClientError> {
        self.get(CPU).await
    }

    async fn memory(&self) -> Result<MemorySnapshot, ClientError> {
        self.get(MEMORY).await
    }

    async fn disk(&self) -> Result<DiskSnapshot, ClientError> {
        self.get(DISK).await
    }

    async fn network(&self) -> Result<NetworkSnapshot, ClientError> {
        self.get(NETWORK).await
    }

    async fn processes(&self) -> Result<ProcessList, ClientError> {
        self.get(PROCESSES).await
    }

    async fn alerts(&self) -> Result<AlertList, ClientError> {
        self.get(ALERTS).await
    }

    async fn history(&self) -> Result<HistorySeries, ClientError> {
        self.get(HISTORY).await
    }

    async fn kill_process(&self, pid: u32) -> Result<String, ClientError> {
        let reply = self.post(KILL_PROCESS, &KillRequest { pid }).await?;
        Ok(reply
            .message
            .unwrap_or_else(|| format!("Process {pid} terminated")))
    }

    async fn update_thresholds(&self, thresholds: Thresholds) -> Result<(), ClientError> {
        self.post(UPDATE_THRESHOLDS, &thresholds).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_prefix_path() {
        let c = HttpClient::new("http://host:5000/monitor", Duration::from_secs(1)).unwrap();
        assert_eq!(c.url(CPU).unwrap().as_str(), "http://host:5000/monitor/api/cpu");
        assert_eq!(c.base_url().as_str(), "http://host:5000/monitor/");
        let c = HttpClient::new("http://host:5000", Duration::from_secs(1)).unwrap();
        assert_eq!(c.url(PROCESSES).unwrap().as_str(), "http://host:5000/api/processes");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(
            HttpClient::new("not a url", Duration::from_secs(1)),
            Err(ClientError::Url(_))
        ));
    }
}
