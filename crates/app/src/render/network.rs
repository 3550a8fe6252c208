//! Network section: WAN links, gateway, speedtests, devices & WiFi, tunnels.

use askama::Template;

use labdash_domain::format::{device_type_name, format_uptime, tunnel_name};
use labdash_domain::ordering::{compare_names, problems_first};
use labdash_domain::snapshot::{
    Gateway, Network, NetworkDevices, Snapshot, Speedtest, UnifiDevice, Wan, Wifi,
};

use super::view::{EmptyState, dot, presence, row_class};

/// Primary uplink shown when the document has none.
static NO_WAN: Wan = Wan {
    status: None,
    isp: None,
    ip: None,
    latency: None,
};

#[derive(Template)]
#[template(path = "sections/network.html")]
struct NetworkTemplate<'a> {
    wan: &'a Wan,
    wan_dot: &'static str,
    backup: Option<&'a Wan>,
    gateway: Option<&'a Gateway>,
    gateway_uptime: String,
    has_speedtest: bool,
    speedtests: Vec<SpeedtestRow<'a>>,
    devices: Option<&'a NetworkDevices>,
    wifi: Option<&'a Wifi>,
    wifi_warnings: String,
    device_rows: Vec<DeviceRow<'a>>,
    tunnels: Vec<TunnelChip>,
}

struct SpeedtestRow<'a> {
    label: &'static str,
    result: &'a Speedtest,
}

struct DeviceRow<'a> {
    class: &'static str,
    name: &'a str,
    kind: &'a str,
    ip: &'a str,
    dot: &'static str,
    status: &'static str,
    clients: u64,
    uptime: String,
}

impl<'a> DeviceRow<'a> {
    fn new(device: &'a UnifiDevice) -> Self {
        let online = device.is_online();
        Self {
            class: row_class(!online, device.has_poor_satisfaction()),
            name: device.name(),
            kind: device_type_name(device.kind()),
            ip: device.ip(),
            dot: dot(online),
            status: presence(online),
            clients: device.clients(),
            uptime: format_uptime(device.uptime()),
        }
    }
}

struct TunnelChip {
    up: bool,
    name: String,
}

pub(super) fn render(snapshot: &Snapshot) -> askama::Result<String> {
    match &snapshot.network {
        Some(network) => NetworkTemplate::new(network).render(),
        None => EmptyState::new("No network data").render(),
    }
}

impl<'a> NetworkTemplate<'a> {
    fn new(network: &'a Network) -> Self {
        let wan = network.wan.as_ref().unwrap_or(&NO_WAN);
        let speedtests = network
            .speedtest
            .iter()
            .flat_map(|speedtest| [("WAN", &speedtest.wan), ("WAN2", &speedtest.wan2)])
            .filter_map(|(label, result)| {
                result
                    .as_ref()
                    .map(|result| SpeedtestRow { label, result })
            })
            .collect();

        Self {
            wan,
            wan_dot: dot(wan.is_ok()),
            backup: network.wan2.as_ref(),
            gateway: network.gateway.as_ref(),
            gateway_uptime: network
                .gateway
                .as_ref()
                .map(|gateway| format_uptime(gateway.uptime()))
                .unwrap_or_default(),
            has_speedtest: network.speedtest.is_some(),
            speedtests,
            devices: network.devices.as_ref(),
            wifi: network.wifi.as_ref(),
            wifi_warnings: network
                .wifi
                .as_ref()
                .map(|wifi| wifi.warnings().join(", "))
                .unwrap_or_default(),
            device_rows: device_rows(network),
            tunnels: tunnels(network),
        }
    }
}

fn device_rows(network: &Network) -> Vec<DeviceRow<'_>> {
    let Some(devices) = &network.devices else {
        return Vec::new();
    };

    let mut list: Vec<_> = devices.list.iter().collect();
    problems_first(
        &mut list,
        |device| !device.is_online(),
        |a, b| compare_names(a.name(), b.name()),
    );
    list.into_iter().map(DeviceRow::new).collect()
}

fn tunnels(network: &Network) -> Vec<TunnelChip> {
    let mut tunnels: Vec<_> = network.tunnels.iter().collect();
    problems_first(
        &mut tunnels,
        |tunnel| !tunnel.is_running(),
        |a, b| compare_names(a.name(), b.name()),
    );
    tunnels
        .into_iter()
        .map(|tunnel| TunnelChip {
            up: tunnel.is_running(),
            name: tunnel_name(tunnel.name()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_json(json: &str) -> String {
        let snapshot = Snapshot::from_json(json.as_bytes()).unwrap();
        render(&snapshot).unwrap()
    }

    #[test]
    fn should_render_placeholder_without_network() {
        let html = render_json("{}");
        assert!(html.contains("No network data"));
    }

    #[test]
    fn should_default_wan_fields() {
        let html = render_json(r#"{"network": {}}"#);
        assert!(html.contains("WAN (Unknown)"));
        assert!(html.contains("N/A / 0ms"));
        assert!(html.contains("status-dot error"));
    }

    #[test]
    fn should_render_wan_and_gateway() {
        let html = render_json(
            r#"{"network": {
                "wan": {"status": "ok", "isp": "Fiber Co", "ip": "203.0.113.7", "latency": 4},
                "wan2": {"latency": 21},
                "gateway": {"name": "UDM Pro", "firmware": "4.0.6", "cpu": 12.6, "mem": 48.2, "uptime": 3661}
            }}"#,
        );
        assert!(html.contains("WAN (Fiber Co)"));
        assert!(html.contains("203.0.113.7 / 4ms"));
        assert!(html.contains("WAN2 (Backup)"));
        assert!(html.contains(r#"<span class="stat-value">21ms</span>"#));
        assert!(html.contains("FW 4.0.6"));
        assert!(html.contains("13% / 48% / 1h 1m"));
    }

    #[test]
    fn should_prefix_backup_latency_with_its_address() {
        let html = render_json(r#"{"network": {"wan2": {"ip": "198.51.100.2", "latency": 30}}}"#);
        assert!(html.contains("198.51.100.2 / 30ms"));
    }

    #[test]
    fn should_render_speedtests() {
        let html = render_json(
            r#"{"network": {"speedtest": {"wan": {"down": 940.5, "up": 880, "latency": 3}}}}"#,
        );
        assert!(html.contains("Last Speedtest"));
        assert!(html.contains("940.5&darr; / 880&uarr; Mbps (3ms)"));
        assert!(!html.contains("WAN2</span>"));
    }

    #[test]
    fn should_pin_offline_devices_first() {
        let html = render_json(
            r#"{"network": {"devices": {"apsOnline": 1, "apsTotal": 2, "list": [
                {"name": "AP Garage", "type": "uap", "ip": "10.0.0.3", "state": 1},
                {"name": "AP Attic", "type": "uap", "ip": "10.0.0.4", "state": 0},
                {"name": "Core Switch", "type": "usw", "ip": "10.0.0.2", "state": 1, "satisfaction": 30}
            ]}}}"#,
        );
        assert!(html.contains("1/2 online"));
        assert!(html.contains("3 devices"));
        let attic = html.find("AP Attic").unwrap();
        let garage = html.find("AP Garage").unwrap();
        let switch = html.find("Core Switch").unwrap();
        assert!(attic < garage);
        assert!(garage < switch);
        assert!(html.contains(r#"<tr class="stopped"><td>AP Attic"#));
        assert!(html.contains(r#"<tr class="warn"><td>Core Switch"#));
        assert!(html.contains("<tr><td>AP Garage"));
        assert!(html.contains("<td>Switch</td>"));
    }

    #[test]
    fn should_render_wifi_warnings() {
        let html = render_json(
            r#"{"network": {"wifi": {"clients": 42, "avgSatisfaction": 91, "poorCount": 2, "weakSignal": 1}}}"#,
        );
        assert!(html.contains("42 (91% avg sat)"));
        assert!(html.contains("2 poor, 1 weak"));
    }

    #[test]
    fn should_render_tunnels_with_down_first() {
        let html = render_json(
            r#"{"network": {"tunnels": [
                {"name": "cloudflared-home", "state": "running"},
                {"name": "cloudflare-media", "state": "exited"}
            ]}}"#,
        );
        let media = html.find("media").unwrap();
        let home = html.find("home").unwrap();
        assert!(media < home);
        assert!(html.contains(r#"tunnel-chip down">&cross; media"#));
        assert!(html.contains(r#"tunnel-chip ok">&check; home"#));
    }

    #[test]
    fn should_escape_device_names() {
        let html = render_json(
            r#"{"network": {"devices": {"list": [{"name": "<img>", "state": 1}]}}}"#,
        );
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }
}
