//! Render an [`Allocation`] as a summary plus the Docker and pfSense reconfiguration steps.

use super::terminal::format_steps;
use crate::models::Allocation;
use std::net::Ipv6Addr;

fn pd_bounds(plan: &Allocation) -> (String, String) {
    let show = |a: Option<Ipv6Addr>| a.map(|a| a.to_string()).unwrap_or_default();
    (show(plan.pd_first()), show(plan.pd_last()))
}

/// The four summary lines.
pub fn render_summary(plan: &Allocation) -> Vec<String> {
    let (pd_first, pd_last) = pd_bounds(plan);
    vec![
        format!("LAN subnet: {}", plan.lan_subnet),
        format!("LAN PD range: {pd_first} - {pd_last}"),
        format!("Docker subnet: {}", plan.service_subnet),
        format!("Docker server: {}", plan.service_host),
    ]
}

/// Steps on the Docker host.
pub fn docker_steps(plan: &Allocation) -> Vec<String> {
    vec![
        format!(
            "Replace IPv6 subnet in /opt/networks-compose.yml with {} and the gateway with {}",
            plan.service_subnet,
            plan.service_gateway()
        ),
        "reboot or `docker compose up -d`".to_string(),
    ]
}

/// Steps in the pfSense web UI.
pub fn pfsense_steps(plan: &Allocation) -> Vec<String> {
    let (pd_first, pd_last) = pd_bounds(plan);
    let host = plan.service_host;
    vec![
        format!("In pfsense Services>DHCPv6 Server>LAN replace the PD range with {pd_first} to {pd_last}"),
        format!(
            "In pfsense System>Routing>Gateways update docker_gw gateway with {}",
            plan.service_subnet.lo()
        ),
        format!(
            "In pfsense System>Routing>Static Routes update destination network for {} via {host}",
            plan.service_subnet
        ),
        format!("In pfsense Firewall>Aliases>Docker update the alias with {host}"),
        format!("In pfsense Services>DNS Resolver>General Settings update the web dns record with {host}"),
    ]
}

/// Everything `ipv6-split` prints, without the trailing newline.
pub fn render_checklist(plan: &Allocation) -> String {
    [
        render_summary(plan).join("\n"),
        format_steps("docker", &docker_steps(plan)),
        format_steps("pfsense", &pfsense_steps(plan)),
    ]
    .join("\n")
}
