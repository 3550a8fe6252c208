//! Services section: container hosts, their containers, and a combined
//! container table whose secondary ordering the user can toggle.

use askama::Template;

use labdash_domain::ordering::{ServiceSort, compare_names, problems_first};
use labdash_domain::snapshot::{Container, ContainerHost, Services, ServicesSummary, Snapshot};

use super::view::{EmptyState, row_class};

/// Form endpoint that switches the container table ordering.
pub const SORT_ACTION: &str = "/services/sort";

#[derive(Template)]
#[template(path = "sections/services.html")]
struct ServicesTemplate<'a> {
    hosts: Vec<HostView<'a>>,
    rows: Vec<ContainerRow<'a>>,
    sort: ServiceSort,
    next: ServiceSort,
    action: &'static str,
    summary: Option<&'a ServicesSummary>,
}

struct HostView<'a> {
    name: &'a str,
    chips: Vec<Chip<'a>>,
}

impl<'a> HostView<'a> {
    fn new(host: &'a ContainerHost) -> Self {
        let mut containers: Vec<_> = host.containers.iter().collect();
        problems_first(
            &mut containers,
            |container| container.is_problem(),
            |a, b| compare_names(a.name(), b.name()),
        );
        Self {
            name: host.name(),
            chips: containers.into_iter().map(Chip::new).collect(),
        }
    }
}

struct Chip<'a> {
    class: &'a str,
    update: bool,
    title: &'a str,
    name: &'a str,
}

impl<'a> Chip<'a> {
    fn new(container: &'a Container) -> Self {
        Self {
            class: if container.is_unhealthy() {
                "unhealthy"
            } else {
                container.state()
            },
            update: container.has_update(),
            title: container.status(),
            name: container.name(),
        }
    }
}

struct ContainerRow<'a> {
    class: &'static str,
    name: &'a str,
    host: &'a str,
    version: &'a str,
    update: bool,
    status: &'a str,
    state: &'a str,
}

impl<'a> ContainerRow<'a> {
    fn new(host: &'a str, container: &'a Container) -> Self {
        Self {
            class: row_class(!container.is_running(), container.is_unhealthy()),
            name: container.name(),
            host,
            version: container.version(),
            update: container.has_update(),
            status: container.status(),
            state: container.state(),
        }
    }
}

fn container_rows(services: &Services, sort: ServiceSort) -> Vec<ContainerRow<'_>> {
    let mut rows: Vec<(&str, &Container)> = services
        .hosts
        .iter()
        .flat_map(|host| {
            host.containers
                .iter()
                .map(move |container| (host.name(), container))
        })
        .collect();

    problems_first(
        &mut rows,
        |&(_, container)| container.is_problem(),
        |&(host_a, a), &(host_b, b)| sort.compare((host_a, a.name()), (host_b, b.name())),
    );
    rows.into_iter()
        .map(|(host, container)| ContainerRow::new(host, container))
        .collect()
}

pub(super) fn render(snapshot: &Snapshot, sort: ServiceSort) -> askama::Result<String> {
    let Some(services) = &snapshot.services else {
        return EmptyState::new("No container hosts").render();
    };

    ServicesTemplate {
        hosts: services.hosts.iter().map(HostView::new).collect(),
        rows: container_rows(services, sort),
        sort,
        next: sort.toggled(),
        action: SORT_ACTION,
        summary: services.summary.as_ref(),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLEET: &str = r#"{"services": {
        "hosts": [
            {"name": "zeus", "containers": [
                {"name": "alpha", "state": "running", "status": "Up 2 days", "version": "1.0"},
                {"name": "nginx", "state": "exited", "status": "Exited (1) 3 hours ago"}
            ]},
            {"name": "apollo", "containers": [
                {"name": "beta", "state": "running", "status": "Up 5 hours (healthy)", "hasUpdate": true},
                {"name": "zulu", "state": "running", "status": "Up 1 hour"}
            ]}
        ],
        "summary": {"running": 3, "stopped": 1, "unhealthy": 0}
    }}"#;

    fn render_json(json: &str, sort: ServiceSort) -> String {
        let snapshot = Snapshot::from_json(json.as_bytes()).unwrap();
        render(&snapshot, sort).unwrap()
    }

    fn table(html: &str) -> &str {
        let start = html.find(r#"<div class="container-table""#).unwrap();
        &html[start..]
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle} not found"))
    }

    #[test]
    fn should_render_placeholder_without_hosts() {
        let html = render_json(
            r#"{"services": {"hosts": [], "summary": {"running": 0}}}"#,
            ServiceSort::Host,
        );
        assert!(html.contains("No container hosts"));
        assert!(html.contains("0 running"));
        assert!(!html.contains("container-table"));
    }

    #[test]
    fn should_mark_stopped_container_row() {
        let html = render_json(FLEET, ServiceSort::Host);
        assert!(table(&html).contains(r#"<tr class="stopped"><td>nginx</td>"#));
    }

    #[test]
    fn should_pin_stopped_container_first_for_every_sort_key() {
        for sort in [ServiceSort::Name, ServiceSort::Host] {
            let html = render_json(FLEET, sort);
            let table = table(&html);
            let nginx = position(table, "<td>nginx</td>");
            for running in ["<td>alpha</td>", "<td>beta</td>", "<td>zulu</td>"] {
                assert!(nginx < position(table, running), "{sort}: {running}");
            }
        }
    }

    #[test]
    fn should_order_by_name_across_hosts() {
        let html = render_json(FLEET, ServiceSort::Name);
        let table = table(&html);
        assert!(position(table, "<td>alpha</td>") < position(table, "<td>beta</td>"));
        assert!(position(table, "<td>beta</td>") < position(table, "<td>zulu</td>"));
        assert!(table.contains(r#"data-sort="name""#));
    }

    #[test]
    fn should_order_by_host_then_name() {
        let html = render_json(FLEET, ServiceSort::Host);
        let table = table(&html);
        assert!(position(table, "<td>beta</td>") < position(table, "<td>zulu</td>"));
        assert!(position(table, "<td>zulu</td>") < position(table, "<td>alpha</td>"));
        assert!(table.contains(r#"data-sort="host""#));
    }

    #[test]
    fn should_offer_the_other_sort_key() {
        let html = render_json(FLEET, ServiceSort::Host);
        assert!(html.contains(r#"action="/services/sort""#));
        assert!(html.contains("Sorted by host"));
        assert!(html.contains(r#"name="sort" value="name""#));
        assert!(html.contains("Sort by name</button>"));

        let html = render_json(FLEET, ServiceSort::Name);
        assert!(html.contains("Sorted by name"));
        assert!(html.contains(r#"name="sort" value="host""#));
    }

    #[test]
    fn should_render_chips_with_update_badge() {
        let html = render_json(FLEET, ServiceSort::Host);
        assert!(html.contains(r#"<span class="chip running has-update" title="Up 5 hours (healthy)">beta<span class="update-badge">"#));
        assert!(html.contains(r#"<span class="chip exited""#));
        assert!(html.contains("2 containers"));
    }

    #[test]
    fn should_flag_unhealthy_container() {
        let html = render_json(
            r#"{"services": {"hosts": [{"name": "h", "containers": [
                {"name": "db", "state": "running", "status": "Up 1 hour (unhealthy)"},
                {"name": "app", "state": "running", "status": "Up 1 hour"}
            ]}]}}"#,
            ServiceSort::Name,
        );
        assert!(html.contains(r#"<span class="chip unhealthy""#));
        let table = table(&html);
        assert!(table.contains(r#"<tr class="warn"><td>db</td>"#));
        assert!(position(table, "<td>db</td>") < position(table, "<td>app</td>"));
    }

    #[test]
    fn should_render_summary_counts() {
        let html = render_json(FLEET, ServiceSort::Host);
        assert!(html.contains("3 running"));
        assert!(html.contains("1 stopped"));
        assert!(!html.contains("unhealthy</span>"));
    }
}
