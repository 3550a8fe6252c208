//! Snapshot: the status document describing the whole home lab at one
//! point in time.
//!
//! The document is produced by an external automation and is never
//! validated. Every section and every leaf is optional: missing keys,
//! explicit `null`s and values of the wrong type all fall back to defaults,
//! and unknown keys are ignored.
//! The accessor methods hold the render-time defaults (`0`, `"Unknown"`,
//! empty list) so renderers never decide them ad hoc.

mod loose;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::time::{self, Timestamp};

fn text<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().unwrap_or(default)
}

/// Root status document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// RFC 3339 timestamp set by the producer.
    #[serde(deserialize_with = "loose::string")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "loose::section")]
    pub network: Option<Network>,
    #[serde(deserialize_with = "loose::section")]
    pub proxmox: Option<Proxmox>,
    #[serde(deserialize_with = "loose::section")]
    pub pbs: Option<Pbs>,
    #[serde(deserialize_with = "loose::section")]
    pub services: Option<Services>,
    #[serde(deserialize_with = "loose::section")]
    pub media: Option<Media>,
    #[serde(deserialize_with = "loose::section")]
    pub smart_home: Option<SmartHome>,
}

impl Snapshot {
    /// Decode a snapshot from a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] if the body is not valid JSON or its
    /// root is not an object. Fields of an unexpected type never fail the
    /// decode, they read as absent.
    pub fn from_json(body: &[u8]) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("snapshot root is not an object").into());
        }
        Ok(Self::deserialize(value)?)
    }

    /// Producer timestamp, if present and well-formed.
    #[must_use]
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated.as_deref().and_then(time::parse)
    }
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Network {
    #[serde(deserialize_with = "loose::section")]
    pub wan: Option<Wan>,
    #[serde(deserialize_with = "loose::section")]
    pub wan2: Option<Wan>,
    #[serde(deserialize_with = "loose::section")]
    pub gateway: Option<Gateway>,
    #[serde(deserialize_with = "loose::section")]
    pub speedtest: Option<Speedtests>,
    #[serde(deserialize_with = "loose::section")]
    pub devices: Option<NetworkDevices>,
    #[serde(deserialize_with = "loose::section")]
    pub wifi: Option<Wifi>,
    #[serde(deserialize_with = "loose::list")]
    pub tunnels: Vec<Tunnel>,
}

/// An uplink. `status` is only reported for the primary one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wan {
    #[serde(deserialize_with = "loose::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub isp: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub ip: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub latency: Option<f64>,
}

impl Wan {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }

    #[must_use]
    pub fn isp(&self) -> &str {
        text(&self.isp, "Unknown")
    }

    #[must_use]
    pub fn ip(&self) -> &str {
        text(&self.ip, "N/A")
    }

    #[must_use]
    pub fn latency(&self) -> f64 {
        self.latency.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Gateway {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub firmware: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub cpu: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub mem: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub uptime: Option<u64>,
}

impl Gateway {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Gateway")
    }

    #[must_use]
    pub fn firmware(&self) -> &str {
        text(&self.firmware, "N/A")
    }

    #[must_use]
    pub fn cpu(&self) -> f64 {
        self.cpu.unwrap_or_default()
    }

    #[must_use]
    pub fn mem(&self) -> f64 {
        self.mem.unwrap_or_default()
    }

    #[must_use]
    pub fn uptime(&self) -> u64 {
        self.uptime.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Speedtests {
    #[serde(deserialize_with = "loose::section")]
    pub wan: Option<Speedtest>,
    #[serde(deserialize_with = "loose::section")]
    pub wan2: Option<Speedtest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Speedtest {
    #[serde(deserialize_with = "loose::number")]
    pub down: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub up: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub latency: Option<f64>,
}

impl Speedtest {
    #[must_use]
    pub fn down(&self) -> f64 {
        self.down.unwrap_or_default()
    }

    #[must_use]
    pub fn up(&self) -> f64 {
        self.up.unwrap_or_default()
    }

    #[must_use]
    pub fn latency(&self) -> f64 {
        self.latency.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkDevices {
    #[serde(deserialize_with = "loose::number")]
    pub aps_online: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub aps_total: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub switches_online: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub switches_total: Option<u64>,
    #[serde(deserialize_with = "loose::list")]
    pub list: Vec<UnifiDevice>,
}

/// A managed network device (access point, switch, gateway, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnifiDevice {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "loose::string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub ip: Option<String>,
    /// `1` means connected; anything else is offline.
    #[serde(deserialize_with = "loose::number")]
    pub state: Option<i64>,
    #[serde(deserialize_with = "loose::number")]
    pub satisfaction: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub clients: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub uptime: Option<u64>,
}

impl UnifiDevice {
    /// Below this WiFi experience score a device is flagged.
    pub const POOR_SATISFACTION: f64 = 50.0;

    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        text(&self.kind, "")
    }

    #[must_use]
    pub fn ip(&self) -> &str {
        text(&self.ip, "N/A")
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.state == Some(1)
    }

    #[must_use]
    pub fn has_poor_satisfaction(&self) -> bool {
        self.satisfaction
            .is_some_and(|score| score < Self::POOR_SATISFACTION)
    }

    #[must_use]
    pub fn clients(&self) -> u64 {
        self.clients.unwrap_or_default()
    }

    #[must_use]
    pub fn uptime(&self) -> u64 {
        self.uptime.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wifi {
    #[serde(deserialize_with = "loose::number")]
    pub clients: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub avg_satisfaction: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub poor_count: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub weak_signal: Option<u64>,
}

impl Wifi {
    /// Warning fragments such as `"3 poor"`, `"1 weak"`.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(poor) = self.poor_count.filter(|count| *count > 0) {
            warnings.push(format!("{poor} poor"));
        }
        if let Some(weak) = self.weak_signal.filter(|count| *count > 0) {
            warnings.push(format!("{weak} weak"));
        }
        warnings
    }
}

/// A Cloudflare tunnel connector container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tunnel {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub state: Option<String>,
}

impl Tunnel {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.as_deref() == Some("running")
    }
}

// ---------------------------------------------------------------------------
// Virtualization & backups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Proxmox {
    #[serde(deserialize_with = "loose::list")]
    pub nodes: Vec<ProxmoxNode>,
    #[serde(deserialize_with = "loose::section")]
    pub totals: Option<ProxmoxTotals>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxmoxNode {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub uptime: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub cpu: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub mem_pct: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub disk_pct: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub vms_running: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub cts_running: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub vms_total: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub cts_total: Option<u64>,
    #[serde(deserialize_with = "loose::list")]
    pub guests: Vec<Guest>,
}

impl ProxmoxNode {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }

    #[must_use]
    pub fn uptime(&self) -> u64 {
        self.uptime.unwrap_or_default()
    }

    #[must_use]
    pub fn cpu(&self) -> f64 {
        self.cpu.unwrap_or_default()
    }

    #[must_use]
    pub fn mem_pct(&self) -> f64 {
        self.mem_pct.unwrap_or_default()
    }

    #[must_use]
    pub fn disk_pct(&self) -> f64 {
        self.disk_pct.unwrap_or_default()
    }

    #[must_use]
    pub fn vms_running(&self) -> u64 {
        self.vms_running.unwrap_or_default()
    }

    #[must_use]
    pub fn cts_running(&self) -> u64 {
        self.cts_running.unwrap_or_default()
    }

    #[must_use]
    pub fn vms_total(&self) -> u64 {
        self.vms_total.unwrap_or_default()
    }

    #[must_use]
    pub fn cts_total(&self) -> u64 {
        self.cts_total.unwrap_or_default()
    }
}

/// A VM or container running on a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Guest {
    #[serde(deserialize_with = "loose::number")]
    pub vmid: Option<u64>,
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    /// `"VM"` or `"CT"`.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "loose::string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub cpu_pct: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub mem_pct: Option<f64>,
}

impl Guest {
    /// Above this CPU or memory percentage a running guest is flagged.
    pub const BUSY_PCT: f64 = 80.0;

    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        text(&self.kind, "")
    }

    #[must_use]
    pub fn status(&self) -> &str {
        text(&self.status, "unknown")
    }

    #[must_use]
    pub fn is_vm(&self) -> bool {
        self.kind.as_deref() == Some("VM")
    }

    #[must_use]
    pub fn is_ct(&self) -> bool {
        self.kind.as_deref() == Some("CT")
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("running")
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.cpu_pct() > Self::BUSY_PCT || self.mem_pct() > Self::BUSY_PCT
    }

    #[must_use]
    pub fn cpu_pct(&self) -> f64 {
        self.cpu_pct.unwrap_or_default()
    }

    #[must_use]
    pub fn mem_pct(&self) -> f64 {
        self.mem_pct.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxmoxTotals {
    #[serde(deserialize_with = "loose::number")]
    pub nodes_online: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub vms_running: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub cts_running: Option<u64>,
}

/// Proxmox Backup Server fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pbs {
    #[serde(deserialize_with = "loose::list")]
    pub servers: Vec<BackupServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackupServer {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub version: Option<String>,
    #[serde(deserialize_with = "loose::list")]
    pub datastores: Vec<Datastore>,
}

impl BackupServer {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn version(&self) -> &str {
        text(&self.version, "?")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Datastore {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(rename = "usedGB")]
    #[serde(deserialize_with = "loose::number")]
    pub used_gb: Option<f64>,
    #[serde(rename = "totalGB")]
    #[serde(deserialize_with = "loose::number")]
    pub total_gb: Option<f64>,
    #[serde(deserialize_with = "loose::number")]
    pub used_pct: Option<f64>,
    #[serde(deserialize_with = "loose::string")]
    pub gc_state: Option<String>,
    /// Epoch seconds of the last garbage-collection run.
    #[serde(deserialize_with = "loose::number")]
    pub gc_last_run: Option<i64>,
}

impl Datastore {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn used_gb(&self) -> f64 {
        self.used_gb.unwrap_or_default()
    }

    #[must_use]
    pub fn total_gb(&self) -> f64 {
        self.total_gb.unwrap_or_default()
    }

    #[must_use]
    pub fn used_pct(&self) -> f64 {
        self.used_pct.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Container services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Services {
    #[serde(deserialize_with = "loose::list")]
    pub hosts: Vec<ContainerHost>,
    #[serde(deserialize_with = "loose::section")]
    pub summary: Option<ServicesSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerHost {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::list")]
    pub containers: Vec<Container>,
}

impl ContainerHost {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    /// Docker state: `running`, `exited`, `restarting`, …
    #[serde(deserialize_with = "loose::string")]
    pub state: Option<String>,
    /// Docker status line, e.g. `Up 3 hours (healthy)`.
    #[serde(deserialize_with = "loose::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub version: Option<String>,
    #[serde(deserialize_with = "loose::flag")]
    pub has_update: Option<bool>,
}

impl Container {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn state(&self) -> &str {
        text(&self.state, "unknown")
    }

    #[must_use]
    pub fn status(&self) -> &str {
        text(&self.status, "")
    }

    #[must_use]
    pub fn version(&self) -> &str {
        text(&self.version, "-")
    }

    #[must_use]
    pub fn has_update(&self) -> bool {
        self.has_update.unwrap_or_default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.as_deref() == Some("running")
    }

    #[must_use]
    pub fn is_unhealthy(&self) -> bool {
        self.status().contains("unhealthy")
    }

    /// Stopped or unhealthy containers are pinned to the top of tables.
    #[must_use]
    pub fn is_problem(&self) -> bool {
        !self.is_running() || self.is_unhealthy()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesSummary {
    #[serde(deserialize_with = "loose::number")]
    pub running: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub stopped: Option<u64>,
    #[serde(deserialize_with = "loose::number")]
    pub unhealthy: Option<u64>,
}

// ---------------------------------------------------------------------------
// Media pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    #[serde(deserialize_with = "loose::section")]
    pub tautulli: Option<Tautulli>,
    #[serde(deserialize_with = "loose::section")]
    pub sonarr: Option<Sonarr>,
    #[serde(deserialize_with = "loose::section")]
    pub radarr: Option<Radarr>,
    #[serde(deserialize_with = "loose::section")]
    pub sabnzbd: Option<Sabnzbd>,
    #[serde(deserialize_with = "loose::section")]
    pub overseerr: Option<Overseerr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tautulli {
    #[serde(deserialize_with = "loose::number")]
    pub active_streams: Option<u64>,
    #[serde(deserialize_with = "loose::list")]
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stream {
    #[serde(deserialize_with = "loose::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub user: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub player: Option<String>,
}

impl Stream {
    #[must_use]
    pub fn title(&self) -> &str {
        text(&self.title, "Unknown")
    }

    #[must_use]
    pub fn user(&self) -> &str {
        text(&self.user, "Unknown")
    }

    #[must_use]
    pub fn player(&self) -> &str {
        text(&self.player, "Unknown")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sonarr {
    #[serde(deserialize_with = "loose::number")]
    pub today_count: Option<u64>,
    #[serde(deserialize_with = "loose::list")]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Episode {
    #[serde(deserialize_with = "loose::string")]
    pub series: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub season: Option<u32>,
    #[serde(deserialize_with = "loose::number")]
    pub episode: Option<u32>,
}

impl Episode {
    #[must_use]
    pub fn series(&self) -> &str {
        text(&self.series, "Unknown")
    }

    #[must_use]
    pub fn title(&self) -> &str {
        text(&self.title, "TBA")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Radarr {
    #[serde(deserialize_with = "loose::number")]
    pub queue_count: Option<u64>,
    #[serde(deserialize_with = "loose::list")]
    pub queue: Vec<QueueItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(deserialize_with = "loose::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub progress: Option<f64>,
}

impl QueueItem {
    #[must_use]
    pub fn title(&self) -> &str {
        text(&self.title, "Unknown")
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sabnzbd {
    #[serde(deserialize_with = "loose::flag")]
    pub paused: Option<bool>,
    #[serde(deserialize_with = "loose::number")]
    pub downloading: Option<u64>,
    /// Human-readable transfer rate, e.g. `"12.3 MB"`.
    #[serde(deserialize_with = "loose::string")]
    pub speed: Option<String>,
}

impl Sabnzbd {
    /// One-line downloader status: paused, downloading, or idle.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.paused.unwrap_or_default() {
            return "Paused".to_string();
        }
        match self.downloading {
            Some(count) if count > 0 => {
                format!("{count} downloading @ {}/s", text(&self.speed, "0"))
            }
            _ => "Idle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Overseerr {
    #[serde(deserialize_with = "loose::number")]
    pub pending_requests: Option<u64>,
}

// ---------------------------------------------------------------------------
// Smart home
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartHome {
    #[serde(deserialize_with = "loose::list")]
    pub hubs: Vec<Hub>,
    /// Zigbee/Thread mesh topology, one entry per node.
    #[serde(deserialize_with = "loose::list")]
    pub mesh: Vec<MeshNode>,
    #[serde(deserialize_with = "loose::list")]
    pub devices: Vec<SmartDevice>,
}

impl SmartHome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty() && self.mesh.is_empty() && self.devices.is_empty()
    }
}

/// A controller such as Home Assistant or a Zigbee coordinator bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hub {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::flag")]
    pub online: Option<bool>,
    #[serde(deserialize_with = "loose::string")]
    pub version: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub device_count: Option<u64>,
}

impl Hub {
    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Hub")
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.unwrap_or_default()
    }

    #[must_use]
    pub fn version(&self) -> &str {
        text(&self.version, "?")
    }

    #[must_use]
    pub fn device_count(&self) -> u64 {
        self.device_count.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeshNode {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    /// `coordinator`, `router` or `end_device`.
    #[serde(deserialize_with = "loose::string")]
    pub role: Option<String>,
    /// Name of the node this one routes through.
    #[serde(deserialize_with = "loose::string")]
    pub parent: Option<String>,
    /// Link quality indicator, 0–255.
    #[serde(deserialize_with = "loose::number")]
    pub link_quality: Option<u64>,
    #[serde(deserialize_with = "loose::flag")]
    pub online: Option<bool>,
}

impl MeshNode {
    /// At or below this LQI a link is flagged as weak.
    pub const WEAK_LINK: u64 = 50;

    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn role(&self) -> &str {
        text(&self.role, "end_device")
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        text(&self.parent, "-")
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.unwrap_or_default()
    }

    #[must_use]
    pub fn has_weak_link(&self) -> bool {
        self.link_quality.is_some_and(|lqi| lqi <= Self::WEAK_LINK)
    }

    /// Position of the role in the topology: coordinator, routers, then leaves.
    #[must_use]
    pub fn tier(&self) -> u8 {
        match self.role() {
            "coordinator" => 0,
            "router" => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartDevice {
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub area: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "loose::flag")]
    pub online: Option<bool>,
    /// Battery percentage; absent for mains-powered devices.
    #[serde(deserialize_with = "loose::number")]
    pub battery: Option<f64>,
}

impl SmartDevice {
    /// At or below this battery percentage a device is flagged.
    pub const LOW_BATTERY: f64 = 20.0;

    #[must_use]
    pub fn name(&self) -> &str {
        text(&self.name, "Unknown")
    }

    #[must_use]
    pub fn area(&self) -> &str {
        text(&self.area, "Unassigned")
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        text(&self.kind, "-")
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.unwrap_or_default()
    }

    #[must_use]
    pub fn has_low_battery(&self) -> bool {
        self.battery.is_some_and(|pct| pct <= Self::LOW_BATTERY)
    }
}
