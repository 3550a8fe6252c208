//! Smart-home section: hubs, mesh topology and devices.

use askama::Template;

use labdash_domain::ordering::{compare_names, problems_first};
use labdash_domain::snapshot::{Hub, MeshNode, SmartDevice, SmartHome, Snapshot};

use super::view::{EmptyState, dot, presence, row_class};

#[derive(Template)]
#[template(path = "sections/smart_home.html")]
struct SmartHomeTemplate<'a> {
    hubs: Vec<HubRow<'a>>,
    mesh: Vec<MeshRow<'a>>,
    devices: Vec<DeviceRow<'a>>,
    online: usize,
    low_battery: usize,
}

struct HubRow<'a> {
    hub: &'a Hub,
    dot: &'static str,
}

struct MeshRow<'a> {
    class: &'static str,
    name: &'a str,
    role: &'a str,
    parent: &'a str,
    lqi: String,
    dot: &'static str,
    status: &'static str,
}

impl<'a> MeshRow<'a> {
    fn new(node: &'a MeshNode) -> Self {
        let online = node.is_online();
        Self {
            class: row_class(!online, node.has_weak_link()),
            name: node.name(),
            role: node.role(),
            parent: node.parent(),
            lqi: node
                .link_quality
                .map_or_else(|| "-".to_string(), |lqi| lqi.to_string()),
            dot: dot(online),
            status: presence(online),
        }
    }
}

struct DeviceRow<'a> {
    class: &'static str,
    name: &'a str,
    area: &'a str,
    kind: &'a str,
    battery: String,
    dot: &'static str,
    status: &'static str,
}

impl<'a> DeviceRow<'a> {
    fn new(device: &'a SmartDevice) -> Self {
        let online = device.is_online();
        Self {
            class: row_class(!online, device.has_low_battery()),
            name: device.name(),
            area: device.area(),
            kind: device.kind(),
            battery: device
                .battery
                .map_or_else(|| "-".to_string(), |pct| format!("{pct}%")),
            dot: dot(online),
            status: presence(online),
        }
    }
}

impl<'a> SmartHomeTemplate<'a> {
    fn new(smart_home: &'a SmartHome) -> Self {
        let mut mesh: Vec<_> = smart_home.mesh.iter().collect();
        problems_first(
            &mut mesh,
            |node| !node.is_online(),
            |a, b| {
                a.tier()
                    .cmp(&b.tier())
                    .then_with(|| compare_names(a.name(), b.name()))
            },
        );

        let mut devices: Vec<_> = smart_home.devices.iter().collect();
        problems_first(
            &mut devices,
            |device| !device.is_online(),
            |a, b| {
                compare_names(a.area(), b.area()).then_with(|| compare_names(a.name(), b.name()))
            },
        );

        Self {
            hubs: smart_home
                .hubs
                .iter()
                .map(|hub| HubRow {
                    hub,
                    dot: dot(hub.is_online()),
                })
                .collect(),
            mesh: mesh.into_iter().map(MeshRow::new).collect(),
            online: devices.iter().filter(|device| device.is_online()).count(),
            low_battery: devices
                .iter()
                .filter(|device| device.has_low_battery())
                .count(),
            devices: devices.into_iter().map(DeviceRow::new).collect(),
        }
    }
}

pub(super) fn render(snapshot: &Snapshot) -> askama::Result<String> {
    match snapshot.smart_home.as_ref().filter(|s| !s.is_empty()) {
        Some(smart_home) => SmartHomeTemplate::new(smart_home).render(),
        None => EmptyState::new("No smart-home data").render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_json(json: &str) -> String {
        let snapshot = Snapshot::from_json(json.as_bytes()).unwrap();
        render(&snapshot).unwrap()
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} not found"))
    }

    #[test]
    fn should_render_placeholder_without_smart_home() {
        assert!(render_json("{}").contains("No smart-home data"));
        assert!(render_json(r#"{"smartHome": {"hubs": null}}"#).contains("No smart-home data"));
    }

    #[test]
    fn should_render_hubs() {
        let html = render_json(
            r#"{"smartHome": {"hubs": [{"name": "Home Assistant", "online": true, "version": "2024.5", "deviceCount": 87}]}}"#,
        );
        assert!(html.contains("Home Assistant"));
        assert!(html.contains("v2024.5 &middot; 87 devices"));
        assert!(html.contains("status-dot ok"));
        assert!(html.contains("No mesh nodes"));
        assert!(html.contains("No devices"));
    }

    #[test]
    fn should_order_mesh_by_tier_with_offline_first() {
        let html = render_json(
            r#"{"smartHome": {"mesh": [
                {"name": "Plug Kitchen", "role": "router", "parent": "Coordinator", "linkQuality": 120, "online": true},
                {"name": "Sensor Attic", "role": "end_device", "parent": "Plug Kitchen", "linkQuality": 30, "online": true},
                {"name": "Coordinator", "role": "coordinator", "linkQuality": 255, "online": true},
                {"name": "Bulb Porch", "role": "router", "online": false}
            ]}}"#,
        );
        let porch = position(&html, "<td>Bulb Porch</td>");
        let coordinator = position(&html, "<td>Coordinator</td>");
        let kitchen = position(&html, "<td>Plug Kitchen</td>");
        let attic = position(&html, "<td>Sensor Attic</td>");
        assert!(porch < coordinator);
        assert!(coordinator < kitchen);
        assert!(kitchen < attic);
        assert!(html.contains(r#"<tr class="stopped"><td>Bulb Porch</td>"#));
        assert!(html.contains(r#"<tr class="warn"><td>Sensor Attic</td>"#));
        assert!(html.contains("<td>-</td><td>-</td>"));
    }

    #[test]
    fn should_pin_offline_devices_and_flag_low_battery() {
        let html = render_json(
            r#"{"smartHome": {"devices": [
                {"name": "Motion Hall", "area": "Hallway", "kind": "sensor", "online": true, "battery": 15},
                {"name": "Lamp", "area": "Bedroom", "kind": "light", "online": true},
                {"name": "Door Front", "area": "Hallway", "kind": "contact", "online": false, "battery": 80}
            ]}}"#,
        );
        let door = position(&html, "<td>Door Front</td>");
        let lamp = position(&html, "<td>Lamp</td>");
        let motion = position(&html, "<td>Motion Hall</td>");
        assert!(door < lamp);
        assert!(lamp < motion);
        assert!(html.contains(r#"<tr class="warn"><td>Motion Hall</td>"#));
        assert!(html.contains("<td>15%</td>"));
        assert!(html.contains("2/3 online"));
        assert!(html.contains("1 low battery"));
    }

    #[test]
    fn should_default_missing_device_fields() {
        let html = render_json(r#"{"smartHome": {"devices": [{}]}}"#);
        assert!(html.contains("<td>Unknown</td><td>Unassigned</td><td>-</td><td>-</td>"));
    }
}
