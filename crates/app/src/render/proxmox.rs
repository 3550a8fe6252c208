//! Virtualization section: Proxmox nodes with their guests, and backup
//! servers with their datastores.

use askama::Template;

use labdash_domain::format::{epoch_date, format_uptime};
use labdash_domain::ordering::problems_first;
use labdash_domain::snapshot::{
    BackupServer, Datastore, Guest, ProxmoxNode, ProxmoxTotals, Snapshot,
};

use super::view::{Bar, EmptyState, dot, row_class};

#[derive(Template)]
#[template(path = "sections/proxmox.html")]
struct ProxmoxTemplate<'a> {
    nodes: Vec<NodeView<'a>>,
    servers: Vec<ServerView<'a>>,
    totals: Option<&'a ProxmoxTotals>,
}

struct NodeView<'a> {
    name: &'a str,
    online: bool,
    dot: &'static str,
    uptime: String,
    bars: [Bar; 3],
    guest_counts: Vec<String>,
    guests: Vec<GuestRow<'a>>,
}

impl<'a> NodeView<'a> {
    fn new(node: &'a ProxmoxNode) -> Self {
        let online = node.is_online();

        let mut guests: Vec<_> = node.guests.iter().collect();
        problems_first(
            &mut guests,
            |guest| !guest.is_running(),
            |a, b| a.vmid.cmp(&b.vmid),
        );

        Self {
            name: node.name(),
            online,
            dot: dot(online),
            uptime: if online {
                format_uptime(node.uptime())
            } else {
                "OFFLINE".to_string()
            },
            bars: [
                Bar::new("CPU", "cpu", node.cpu()),
                Bar::new("MEM", "mem", node.mem_pct()),
                Bar::new("DISK", "disk", node.disk_pct()),
            ],
            guest_counts: guest_counts(node),
            guests: guests.into_iter().map(GuestRow::new).collect(),
        }
    }
}

/// `"3/4 VMs"`, `"7/9 CTs"` parts. Counts come from the guest list when
/// there is one, otherwise from the node totals.
fn guest_counts(node: &ProxmoxNode) -> Vec<String> {
    let (vm_count, ct_count) = if node.guests.is_empty() {
        (node.vms_total(), node.cts_total())
    } else {
        let vms = node.guests.iter().filter(|guest| guest.is_vm()).count();
        let cts = node.guests.iter().filter(|guest| guest.is_ct()).count();
        (vms as u64, cts as u64)
    };

    let mut parts = Vec::new();
    if vm_count > 0 {
        parts.push(format!("{}/{vm_count} VMs", node.vms_running()));
    }
    if ct_count > 0 {
        parts.push(format!("{}/{ct_count} CTs", node.cts_running()));
    }
    parts
}

struct GuestRow<'a> {
    class: &'static str,
    vmid: String,
    name: &'a str,
    kind: &'a str,
    dot: &'static str,
    status: &'a str,
    cpu: String,
    mem: String,
}

impl<'a> GuestRow<'a> {
    fn new(guest: &'a Guest) -> Self {
        let stopped = !guest.is_running();
        let (cpu, mem) = if stopped {
            ("-".to_string(), "-".to_string())
        } else {
            (format!("{}%", guest.cpu_pct()), format!("{}%", guest.mem_pct()))
        };
        Self {
            class: row_class(stopped, guest.is_busy()),
            vmid: guest.vmid.map(|id| id.to_string()).unwrap_or_default(),
            name: guest.name(),
            kind: guest.kind(),
            dot: dot(!stopped),
            status: guest.status(),
            cpu,
            mem,
        }
    }
}

struct ServerView<'a> {
    server: &'a BackupServer,
    datastores: Vec<DatastoreView<'a>>,
}

struct DatastoreView<'a> {
    datastore: &'a Datastore,
    bar: Bar,
    /// `"ok (2024-05-01)"`, or empty when no GC state is reported.
    gc: String,
}

impl<'a> ServerView<'a> {
    fn new(server: &'a BackupServer) -> Self {
        let datastores = server
            .datastores
            .iter()
            .map(|datastore| DatastoreView {
                datastore,
                bar: Bar::new("DISK", "disk", datastore.used_pct()),
                gc: datastore
                    .gc_state
                    .as_ref()
                    .map(|state| format!("{state} ({})", epoch_date(datastore.gc_last_run)))
                    .unwrap_or_default(),
            })
            .collect();
        Self { server, datastores }
    }
}

pub(super) fn render(snapshot: &Snapshot) -> askama::Result<String> {
    let proxmox = snapshot.proxmox.as_ref();
    let nodes = proxmox
        .map(|proxmox| proxmox.nodes.as_slice())
        .unwrap_or_default();
    let servers = snapshot
        .pbs
        .as_ref()
        .map(|pbs| pbs.servers.as_slice())
        .unwrap_or_default();

    if nodes.is_empty() && servers.is_empty() {
        return EmptyState::new("No virtualization hosts").render();
    }

    ProxmoxTemplate {
        nodes: nodes.iter().map(NodeView::new).collect(),
        servers: servers.iter().map(ServerView::new).collect(),
        totals: proxmox.and_then(|proxmox| proxmox.totals.as_ref()),
    }
    .render()
}
