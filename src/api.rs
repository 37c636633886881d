//! Client for the lab backend HTTP API.
//!
//! Every call is a thin pass-through: optimistic JSON shapes, no retries.
//! Callers decide whether a failure means "fall back to simulated data"
//! (the pollers) or "print the error" (the attack and terminal consoles).

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scan::{BluetoothDevice, WifiBand, WifiNetwork};
use crate::spectrum::{RadioConfig, SpectrumPoint};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP agent with bounded timeouts. The connect timeout is short:
/// an offline backend must not stall the dashboard pollers.
fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build()
    })
}

#[derive(Debug, Deserialize)]
struct SpectrumResponse {
    points: Vec<SpectrumPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub uptime_seconds: u64,
    pub packets_captured: u64,
    pub threats_blocked: u32,
    pub active_devices: u32,
    pub storage_usage_percent: u8,
    pub cpu_temp: i32,
}

impl KpiStats {
    /// Telemetry shown when the backend is offline. Derived from local
    /// uptime so the dashboard still moves.
    pub fn simulated(uptime_seconds: u64) -> Self {
        KpiStats {
            uptime_seconds,
            packets_captured: uptime_seconds.saturating_mul(124),
            threats_blocked: 23,
            active_devices: 42,
            storage_usage_percent: 65,
            cpu_temp: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirelessInterface {
    pub name: String,
    pub mac: String,
    #[serde(default)]
    pub monitor_mode: bool,
    #[serde(default)]
    pub status: String,
}

/// Payload of `GET /api/pentest/tools`: which aircrack-style tools are
/// installed and which wireless interfaces exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PentestStatus {
    #[serde(default)]
    pub tools: BTreeMap<String, bool>,
    #[serde(default)]
    pub interfaces: Vec<WirelessInterface>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttackLaunch {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApCreated {
    pub ap_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
struct CredentialsResponse {
    #[serde(default)]
    credentials: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerminalResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub returncode: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeauthRequest {
    pub interface: String,
    pub target_bssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mac: Option<String>,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandshakeRequest {
    pub interface: String,
    pub target_bssid: String,
    pub channel: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WpsRequest {
    pub interface: String,
    pub target_bssid: String,
    pub channel: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvilTwinRequest {
    pub interface: String,
    pub ssid: String,
    pub channel: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_mac: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptivePortalRequest {
    pub interface: String,
    pub ssid: String,
    pub channel: u32,
    pub portal_type: String,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        BackendClient { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cheap reachability probe.
    pub fn health(&self) -> Result<()> {
        agent()
            .get(&self.url("/health"))
            .call()
            .context("backend health check")?;
        Ok(())
    }

    pub fn live_spectrum(
        &self,
        config: &RadioConfig,
        points: usize,
        interference: bool,
    ) -> Result<Vec<SpectrumPoint>> {
        let response: SpectrumResponse = agent()
            .get(&self.url("/api/fft/live"))
            .query("center_freq", &config.center_freq.to_string())
            .query("bandwidth", &config.bandwidth.to_string())
            .query("points", &points.to_string())
            .query("modo_s", if interference { "true" } else { "false" })
            .call()
            .context("fetching live spectrum")?
            .into_json()
            .context("decoding live spectrum")?;
        Ok(response.points)
    }

    pub fn bluetooth_scan(&self) -> Result<Vec<BluetoothDevice>> {
        agent()
            .get(&self.url("/api/bt/scan"))
            .call()
            .context("bluetooth scan")?
            .into_json()
            .context("decoding bluetooth scan")
    }

    pub fn wifi_scan(&self, band: WifiBand) -> Result<Vec<WifiNetwork>> {
        agent()
            .get(&self.url("/api/wifi/scan"))
            .query("band", band.query_value())
            .call()
            .context("wifi scan")?
            .into_json()
            .context("decoding wifi scan")
    }

    pub fn kpi_stats(&self) -> Result<KpiStats> {
        agent()
            .get(&self.url("/api/stats/kpi"))
            .call()
            .context("kpi stats")?
            .into_json()
            .context("decoding kpi stats")
    }

    pub fn pentest_tools(&self) -> Result<PentestStatus> {
        agent()
            .get(&self.url("/api/pentest/tools"))
            .call()
            .context("pentest tool status")?
            .into_json()
            .context("decoding pentest tool status")
    }

    pub fn set_monitor_mode(&self, interface: &str, enable: bool) -> Result<CommandOutcome> {
        agent()
            .post(&self.url("/api/pentest/monitor-mode"))
            .send_json(serde_json::json!({
                "interface": interface,
                "enable": enable,
            }))
            .context("toggling monitor mode")?
            .into_json()
            .context("decoding monitor mode response")
    }

    pub fn deauth_attack(&self, request: &DeauthRequest) -> Result<AttackLaunch> {
        self.launch("/api/pentest/deauth-attack", request)
    }

    pub fn capture_handshake(&self, request: &HandshakeRequest) -> Result<AttackLaunch> {
        self.launch("/api/pentest/capture-handshake", request)
    }

    pub fn wps_attack(&self, request: &WpsRequest) -> Result<AttackLaunch> {
        self.launch("/api/pentest/wps-attack", request)
    }

    fn launch<T: Serialize>(&self, path: &str, request: &T) -> Result<AttackLaunch> {
        agent()
            .post(&self.url(path))
            .send_json(serde_json::to_value(request)?)
            .with_context(|| format!("launching {path}"))?
            .into_json()
            .context("decoding attack launch response")
    }

    pub fn stop_session(&self, session_id: &str) -> Result<CommandOutcome> {
        agent()
            .post(&self.url(&format!("/api/pentest/stop-session/{session_id}")))
            .call()
            .context("stopping attack session")?
            .into_json()
            .context("decoding stop-session response")
    }

    pub fn create_evil_twin(&self, request: &EvilTwinRequest) -> Result<ApCreated> {
        agent()
            .post(&self.url("/api/evil-twin/create"))
            .send_json(serde_json::to_value(request)?)
            .context("creating evil twin AP")?
            .into_json()
            .context("decoding evil twin response")
    }

    pub fn create_captive_portal(&self, request: &CaptivePortalRequest) -> Result<ApCreated> {
        agent()
            .post(&self.url("/api/captive-portal/create"))
            .send_json(serde_json::to_value(request)?)
            .context("creating captive portal")?
            .into_json()
            .context("decoding captive portal response")
    }

    pub fn stop_access_point(&self, ap_id: &str) -> Result<()> {
        agent()
            .delete(&self.url(&format!("/api/evil-twin/{ap_id}")))
            .call()
            .context("stopping access point")?;
        Ok(())
    }

    pub fn portal_credentials(&self, ap_id: &str) -> Result<Vec<String>> {
        let response: CredentialsResponse = agent()
            .get(&self.url(&format!("/api/captive-portal/{ap_id}/credentials")))
            .call()
            .context("fetching portal credentials")?
            .into_json()
            .context("decoding portal credentials")?;
        Ok(response.credentials)
    }

    pub fn execute_command(&self, command: &str, timeout_secs: u32) -> Result<TerminalResult> {
        agent()
            .post(&self.url("/api/terminal/execute"))
            .send_json(serde_json::json!({
                "command": command,
                "user": "root",
                "timeout": timeout_secs,
            }))
            .context("executing terminal command")?
            .into_json()
            .context("decoding terminal output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn serve_once(body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                // Drain the request (headers plus any JSON body) before
                // responding, so POSTs do not race the reply.
                let mut request = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request_complete(&request) {
                                break;
                            }
                        }
                    }
                }
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let body_len = text.len() - (split + 4);
        let content_length = text
            .lines()
            .find_map(|line| line.strip_prefix("Content-Length: "))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body_len >= content_length
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn health_succeeds_against_live_socket() {
        let client = BackendClient::new(serve_once("{\"status\":\"healthy\"}"));
        client.health().unwrap();
    }

    #[test]
    fn health_fails_when_nothing_listens() {
        // Bind-then-drop to get a port with no listener.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = BackendClient::new(format!("http://{}", addr));
        assert!(client.health().is_err());
    }

    #[test]
    fn bluetooth_scan_parses_device_list() {
        let body = r#"[{
            "mac": "A0:EF:4A:83:86:88",
            "name": "JBL Flip 5",
            "rssi": -64,
            "cod": "Audio/Video",
            "vendor": "JBL",
            "lastSeen": 1700000000000,
            "isConnected": true
        }]"#;
        let client = BackendClient::new(serve_once(body));
        let devices = client.bluetooth_scan().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "JBL Flip 5");
    }

    #[test]
    fn terminal_execute_parses_outcome() {
        let body = r#"{"success": true, "stdout": "wlan0\n", "stderr": "", "returncode": 0}"#;
        let client = BackendClient::new(serve_once(body));
        let result = client.execute_command("iwconfig", 30).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "wlan0\n");
        assert_eq!(result.returncode, 0);
    }

    #[test]
    fn pentest_status_tolerates_missing_fields() {
        let client = BackendClient::new(serve_once("{}"));
        let status = client.pentest_tools().unwrap();
        assert!(status.tools.is_empty());
        assert!(status.interfaces.is_empty());
    }

    #[test]
    fn simulated_kpis_track_uptime() {
        let stats = KpiStats::simulated(100);
        assert_eq!(stats.uptime_seconds, 100);
        assert_eq!(stats.packets_captured, 12_400);
    }

    #[test]
    fn kpi_stats_parse_camel_case() {
        let body = r#"{
            "uptimeSeconds": 12450,
            "packetsCaptured": 90210,
            "threatsBlocked": 23,
            "activeDevices": 42,
            "storageUsagePercent": 65,
            "cpuTemp": 48
        }"#;
        let stats: KpiStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.uptime_seconds, 12_450);
        assert_eq!(stats.cpu_temp, 48);
    }
}
