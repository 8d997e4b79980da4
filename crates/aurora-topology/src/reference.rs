//! The documented reference network: one attacker foothold, a perimeter
//! firewall, eight internal hosts and a domain controller as crown jewel.
//!
//! ```text
//! attacker ─▶ fw01
//! fw01     ─▶ web01, api01, db01
//! web01    ─▶ app01, api01
//! api01    ─▶ db01, ldap01
//! app01    ─▶ ldap01, wks01
//! db01     ─▶ file01
//! ldap01   ─▶ dc01
//! file01   ─▶ dc01
//! wks01    ─▶ wks02
//! ```

use aurora_core::types::{Edge, ExploitKind, Node, NodeKind, Privilege, Trust, Vulnerability};

use crate::Topology;

/// Synthetic CVE catalogue: (id, description, severity, kind).
const CVE_CATALOGUE: &[(&str, &str, f64, ExploitKind)] = &[
    ("CVE-2023-4863", "WebP heap overflow", 9.6, ExploitKind::Rce),
    ("CVE-2023-36884", "Windows HTML RCE", 8.8, ExploitKind::Rce),
    ("CVE-2022-3786", "OpenSSL buffer overflow", 7.5, ExploitKind::Dos),
    ("CVE-2023-0215", "OpenSSL use-after-free", 7.5, ExploitKind::Dos),
    ("CVE-2022-21824", "Node.js prototype pollution", 8.2, ExploitKind::Privesc),
    ("CVE-2023-28879", "Ghostscript RCE", 9.8, ExploitKind::Rce),
    ("CVE-2021-4034", "Polkit privilege escalation", 7.8, ExploitKind::Privesc),
    ("CVE-2020-1472", "Zerologon Netlogon privesc", 10.0, ExploitKind::Privesc),
    ("CVE-2017-0144", "EternalBlue SMB RCE", 8.1, ExploitKind::Rce),
];

fn cve(id: &str) -> Vulnerability {
    CVE_CATALOGUE
        .iter()
        .find(|(cve_id, ..)| *cve_id == id)
        .map(|&(id, description, severity, kind)| Vulnerability {
            id: id.to_string(),
            description: description.to_string(),
            severity,
            kind,
        })
        .unwrap_or_else(|| Vulnerability {
            id: id.to_string(),
            description: "unclassified".to_string(),
            severity: 5.0,
            kind: ExploitKind::Other,
        })
}

#[allow(clippy::too_many_arguments)]
fn host(
    id: &str,
    label: &str,
    kind: NodeKind,
    os: &str,
    ports: &[u16],
    risk: f64,
    exposure: f64,
    privilege: Privilege,
    cves: &[&str],
) -> Node {
    Node {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        ports: ports.to_vec(),
        os: Some(os.to_string()),
        risk,
        exposure,
        privilege,
        vulnerabilities: cves.iter().map(|id| cve(id)).collect(),
    }
}

fn edge(source: &str, target: &str, trust: Trust) -> Edge {
    Edge {
        source: source.to_string(),
        target: target.to_string(),
        trust,
    }
}

/// Build the 11-node / 14-edge reference enterprise network.
pub fn reference_topology() -> Topology {
    use NodeKind::*;
    use Privilege as P;

    let nodes = vec![
        host("fw01", "Firewall", Firewall, "pfSense 2.7", &[80, 443, 22], 20.0, 15.0, P::Network, &[]),
        host("web01", "Web Server", Server, "Ubuntu 22.04", &[80, 443, 8080], 65.0, 72.0, P::User, &["CVE-2023-4863", "CVE-2022-3786"]),
        host("api01", "API Gateway", Server, "Ubuntu 22.04", &[3000, 8443], 55.0, 60.0, P::User, &["CVE-2023-0215"]),
        host("db01", "Database", Database, "Debian 12", &[5432, 3306], 80.0, 45.0, P::Root, &["CVE-2022-21824"]),
        host("app01", "App Server", Server, "CentOS 8", &[8080, 9090], 70.0, 68.0, P::Admin, &["CVE-2023-28879"]),
        host("ldap01", "LDAP Server", Server, "Windows Server 2019", &[389, 636], 75.0, 55.0, P::Admin, &["CVE-2021-4034"]),
        host("file01", "File Server", Server, "Windows Server 2016", &[445, 139], 60.0, 50.0, P::User, &["CVE-2017-0144"]),
        host("dc01", "Domain Ctrl", Critical, "Windows Server 2022", &[88, 445, 636], 90.0, 40.0, P::Root, &["CVE-2020-1472"]),
        host("wks01", "Workstation A", Client, "Windows 11", &[135, 445], 45.0, 80.0, P::User, &["CVE-2023-36884"]),
        host("wks02", "Workstation B", Client, "Windows 10", &[135, 445], 40.0, 75.0, P::User, &[]),
        host("attacker", "Attacker", Attacker, "Kali Linux 2023", &[], 0.0, 0.0, P::None, &[]),
    ];

    let edges = vec![
        edge("attacker", "fw01", Trust::Untrusted),
        edge("fw01", "web01", Trust::Dmz),
        edge("fw01", "api01", Trust::Dmz),
        edge("fw01", "db01", Trust::Restricted),
        edge("web01", "app01", Trust::Internal),
        edge("web01", "api01", Trust::Internal),
        edge("api01", "db01", Trust::Internal),
        edge("api01", "ldap01", Trust::Internal),
        edge("app01", "ldap01", Trust::Internal),
        edge("app01", "wks01", Trust::Internal),
        edge("ldap01", "dc01", Trust::Trusted),
        edge("file01", "dc01", Trust::Trusted),
        edge("db01", "file01", Trust::Internal),
        edge("wks01", "wks02", Trust::Internal),
    ];

    Topology { nodes, edges }
}
