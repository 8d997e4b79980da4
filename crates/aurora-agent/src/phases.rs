//! The scripted phase table.
//!
//! Nine steps, run strictly in order, one per `advance`. The table fixes each
//! step's phase, timeline kind, confidence-update kind and whether its target
//! counts as compromised; the handler only decides targets and narration.

use rand::Rng;

use aurora_core::events::StepType;
use aurora_core::types::{ExploitKind, Node, Phase, Vulnerability};
use aurora_pathfind::paths::enumerate_and_score;

use crate::agent::{Agent, Narration};
use crate::narrative::{pick, ESCALATION_METHODS, LATERAL_TECHNIQUES};

/// Perimeter host when the entry node has no successors.
pub const DEFAULT_PERIMETER_NODE: &str = "fw01";
/// Vulnerability-scan target and first pivot when nothing better is known.
pub const FALLBACK_ENTRY_PIVOT: &str = "web01";
pub const FALLBACK_ESCALATION_PIVOT: &str = "app01";
pub const FALLBACK_LATERAL_PIVOT: &str = "ldap01";
pub const FALLBACK_FINDING_ID: &str = "MISC-001";
pub const FALLBACK_FINDING_DESCRIPTION: &str = "misconfig";
pub const DEFAULT_SERVICE_PORT: u16 = 443;

/// Simulated seconds per timeline step in the completion summary.
const SECONDS_PER_STEP: f64 = 2.2;

const REASONING: &str = "reasoning";
const ACTION: &str = "action";

/// One row of the script.
pub struct PhaseStep {
    pub name: &'static str,
    pub phase: Phase,
    pub step_type: StepType,
    pub label: &'static str,
    pub icon: &'static str,
    /// Kind fed to the confidence model.
    pub kind: ExploitKind,
    /// Whether the step's target joins the compromised set.
    pub compromise: bool,
    pub(crate) narrate: fn(&mut Agent) -> Narration,
}

pub const PHASE_TABLE: &[PhaseStep] = &[
    PhaseStep {
        name: "recon-passive",
        phase: Phase::Recon,
        step_type: StepType::Recon,
        label: "Passive Recon",
        icon: "🔍",
        kind: ExploitKind::Other,
        compromise: false,
        narrate: recon_passive,
    },
    PhaseStep {
        name: "recon-firewall",
        phase: Phase::Recon,
        step_type: StepType::Recon,
        label: "Firewall Analysis",
        icon: "🛡️",
        kind: ExploitKind::Other,
        compromise: false,
        narrate: recon_perimeter,
    },
    PhaseStep {
        name: "vuln-scan",
        phase: Phase::Analysis,
        step_type: StepType::Vuln,
        label: "Vulnerability Identified",
        icon: "⚠️",
        kind: ExploitKind::Rce,
        compromise: false,
        narrate: vuln_scan,
    },
    PhaseStep {
        name: "path-analysis",
        phase: Phase::Planning,
        step_type: StepType::Plan,
        label: "Attack Path Chosen",
        icon: "🧠",
        kind: ExploitKind::Rce,
        compromise: false,
        narrate: path_analysis,
    },
    PhaseStep {
        name: "exploit-entry",
        phase: Phase::Execution,
        step_type: StepType::Exploit,
        label: "Initial Exploit",
        icon: "💥",
        kind: ExploitKind::Rce,
        compromise: true,
        narrate: exploit_entry,
    },
    PhaseStep {
        name: "privesc",
        phase: Phase::Escalation,
        step_type: StepType::Escalate,
        label: "Privilege Escalation",
        icon: "⬆️",
        kind: ExploitKind::Privesc,
        compromise: true,
        narrate: privilege_escalation,
    },
    PhaseStep {
        name: "lateral",
        phase: Phase::Lateral,
        step_type: StepType::Lateral,
        label: "Lateral Movement",
        icon: "↔️",
        kind: ExploitKind::Privesc,
        compromise: true,
        narrate: lateral_movement,
    },
    PhaseStep {
        name: "domain-compromise",
        phase: Phase::Execution,
        step_type: StepType::Escalate,
        label: "Domain Compromise",
        icon: "👑",
        kind: ExploitKind::Privesc,
        compromise: true,
        narrate: domain_compromise,
    },
    PhaseStep {
        name: "complete",
        phase: Phase::Complete,
        step_type: StepType::Complete,
        label: "Simulation Complete",
        icon: "🏁",
        kind: ExploitKind::Other,
        compromise: false,
        narrate: complete,
    },
];

/// Route used when planning finds no scored path.
pub fn fallback_path(entry: &str, target: &str) -> Vec<String> {
    [
        entry,
        FALLBACK_ENTRY_PIVOT,
        FALLBACK_ESCALATION_PIVOT,
        FALLBACK_LATERAL_PIVOT,
        target,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn host_count(agent: &Agent) -> usize {
    agent.graph.all_nodes().count().saturating_sub(1)
}

fn recon_passive(agent: &mut Agent) -> Narration {
    let hosts = host_count(agent);
    Narration {
        thought: format!(
            "[RECON] Passive sweep of the simulated 192.168.1.0/24 segment. \
             {hosts} live hosts answered. ICMP echo and TCP SYN half-open scan complete."
        ),
        detail: format!(
            "Network sweep complete. Topology inferred from TTL analysis and banner grabbing. \
             Found {hosts} hosts and mapped their trust relationships."
        ),
        target: None,
        action_type: REASONING,
    }
}

fn recon_perimeter(agent: &mut Agent) -> Narration {
    let perimeter = agent
        .graph
        .successors(&agent.entry)
        .first()
        .map_or_else(|| DEFAULT_PERIMETER_NODE.to_string(), |n| n.id.clone());

    let node = agent.graph.attributes(&perimeter);
    let os = node.and_then(|n| n.os.clone()).unwrap_or_else(|| "unknown".to_string());
    let ports = node.map(|n| n.ports.clone()).unwrap_or_default();

    Narration {
        thought: format!(
            "[RECON] {perimeter} ({os}) exposes ports {ports:?}. WAF rules detected, \
             TLS 1.0 still accepted, IDS signatures out of date."
        ),
        detail: format!(
            "{perimeter} runs {os}. Ports {ports:?} reachable. WAF bypass candidates found \
             via HTTP request smuggling. IDS signature gap noted."
        ),
        target: Some(perimeter),
        action_type: REASONING,
    }
}

/// Highest-severity vulnerability on any non-entry node. The first one found wins ties.
fn best_finding<'a>(agent: &'a Agent) -> Option<(&'a Node, &'a Vulnerability)> {
    let mut best: Option<(&Node, &Vulnerability)> = None;
    for node in agent.graph.all_nodes().filter(|n| n.id != agent.entry) {
        for vuln in &node.vulnerabilities {
            let current = best.map_or(0.0, |(_, v)| v.severity);
            if vuln.severity > current {
                best = Some((node, vuln));
            }
        }
    }
    best
}

fn vuln_scan(agent: &mut Agent) -> Narration {
    match best_finding(agent) {
        Some((node, vuln)) => Narration {
            thought: format!(
                "[VULN] Critical finding: {} on {}. CVSS {:.1} ({}). \
                 Exploit code available. Success likelihood HIGH.",
                vuln.id, node.label, vuln.severity, vuln.description
            ),
            detail: format!(
                "{} confirmed on {} (CVSS {:.1}). Exploit chain feasible.",
                vuln.id, node.label, vuln.severity
            ),
            target: Some(node.id.clone()),
            action_type: REASONING,
        },
        None => {
            tracing::warn!(session_id = %agent.session_id, "No scored vulnerability, using fallback finding");
            Narration {
                thought: format!(
                    "[VULN] No scored vulnerability found. Assuming {FALLBACK_FINDING_ID} \
                     misconfiguration on {FALLBACK_ENTRY_PIVOT}."
                ),
                detail: format!(
                    "{FALLBACK_FINDING_ID} confirmed on {FALLBACK_ENTRY_PIVOT} (CVSS 0.0). \
                     Exploit chain feasible."
                ),
                target: Some(FALLBACK_ENTRY_PIVOT.to_string()),
                action_type: REASONING,
            }
        }
    }
}

fn path_analysis(agent: &mut Agent) -> Narration {
    let paths = enumerate_and_score(
        &*agent.graph,
        &agent.entry,
        &agent.target,
        agent.options.planning_max_hops,
        agent.options.max_paths,
    );

    let narration = match paths.first() {
        Some(best) => {
            agent.state.chosen_path = best.path.clone();
            let hops = best.path[1..].join(" → ");
            Narration {
                thought: format!(
                    "[PLAN] Evaluated {} attack chains with the Bayesian path scorer. \
                     Optimal: {}. Breach probability: {}%. Detection exposure: {}%.",
                    paths.len(),
                    best.display_chain(),
                    best.probability,
                    best.total_detection_risk
                ),
                detail: format!(
                    "Best path scored {}% breach probability across {} hops. \
                     Exploitation chain: {hops}.",
                    best.probability, best.path_length
                ),
                target: None,
                action_type: REASONING,
            }
        }
        None => {
            agent.state.chosen_path = fallback_path(&agent.entry, &agent.target);
            tracing::warn!(
                session_id = %agent.session_id,
                entry = %agent.entry,
                target = %agent.target,
                "No scored path, using fallback route"
            );
            Narration {
                thought: format!(
                    "[PLAN] No scored chain reaches {} within {} hops. Falling back to {}.",
                    agent.target,
                    agent.options.planning_max_hops,
                    agent.state.chosen_path.join(" → ")
                ),
                detail: "Fallback path selected via heuristic scoring.".to_string(),
                target: None,
                action_type: REASONING,
            }
        }
    };

    agent.evaluated_paths = paths;
    narration
}

fn exploit_entry(agent: &mut Agent) -> Narration {
    let seconds: u32 = agent.rng.gen_range(1..=8);
    let pivot = agent.pivot(1, FALLBACK_ENTRY_PIVOT);
    let node = agent.graph.attributes(&pivot);

    let (finding, description) = node
        .and_then(|n| n.vulnerabilities.first())
        .map_or((FALLBACK_FINDING_ID, FALLBACK_FINDING_DESCRIPTION), |v| {
            (v.id.as_str(), v.description.as_str())
        });
    let label = node.map_or(pivot.as_str(), |n| n.label.as_str());
    let port = node
        .and_then(|n| n.ports.first().copied())
        .unwrap_or(DEFAULT_SERVICE_PORT);
    let privilege = node.map_or_else(|| "user".to_string(), |n| n.privilege.to_string());

    Narration {
        thought: format!(
            "[EXPLOIT] Triggering {finding} against {label}:{port}. \
             Simulated payload dispatched. Awaiting reverse shell callback."
        ),
        detail: format!(
            "Deployed {finding} ({description}) against {label}. \
             Shell obtained as {privilege}. Duration: {seconds}s"
        ),
        target: Some(pivot.clone()),
        action_type: ACTION,
    }
}

fn privilege_escalation(agent: &mut Agent) -> Narration {
    let method = pick(ESCALATION_METHODS, &mut *agent.rng);
    let pivot = agent.pivot(2, FALLBACK_ESCALATION_PIVOT);
    let foothold = agent.label_of(&agent.pivot(1, FALLBACK_ENTRY_PIVOT));
    let label = agent.label_of(&pivot);

    Narration {
        thought: format!(
            "[PRIVESC] {method} detected. Escalating from www-data to root. \
             Pivoting to {label} over an internal trust relationship."
        ),
        detail: format!(
            "Leveraged {method}. Elevated to root/admin on {foothold}. Pivoting to {label}."
        ),
        target: Some(pivot),
        action_type: ACTION,
    }
}

fn lateral_movement(agent: &mut Agent) -> Narration {
    let technique = pick(LATERAL_TECHNIQUES, &mut *agent.rng);
    let pivot = agent.pivot(3, FALLBACK_LATERAL_PIVOT);
    let node = agent.graph.attributes(&pivot);

    let label = node.map_or(pivot.as_str(), |n| n.label.as_str());
    let os = node
        .and_then(|n| n.os.as_deref())
        .unwrap_or("Windows Server");
    let privilege = node.map_or_else(|| "admin".to_string(), |n| n.privilege.to_string());

    Narration {
        thought: format!(
            "[LATERAL] Executing {technique}. Credential material harvested from memory. \
             Authenticated to {label} successfully."
        ),
        detail: format!(
            "{technique}. Authenticated to {label} ({os}). Current privilege: {privilege}."
        ),
        target: Some(pivot.clone()),
        action_type: ACTION,
    }
}

fn domain_compromise(agent: &mut Agent) -> Narration {
    let target = agent.target.clone();
    let label = agent.label_of(&target);

    Narration {
        thought: format!(
            "[DOMAIN] Executing Zerologon (CVE-2020-1472) against {label}. Netlogon RPC \
             null authentication accepted, machine password reset. DCSync of the directory in progress."
        ),
        detail: format!(
            "CVE-2020-1472 (Zerologon) executed against {target}. Netlogon authentication \
             bypassed. Domain Administrator hash extracted via DCSync. All domain resources now accessible."
        ),
        target: Some(target),
        action_type: ACTION,
    }
}

fn complete(agent: &mut Agent) -> Narration {
    let duration = agent.state.timeline.len() as f64 * SECONDS_PER_STEP;
    let compromised = agent.state.compromised_nodes.len();
    let evasion = 100.0 - agent.state.detection_risk;
    let hosts = host_count(agent);

    Narration {
        thought: format!(
            "[COMPLETE] Simulation finished. {compromised} nodes compromised. \
             Domain access achieved in {duration:.1}s simulated time. \
             Detection evasion: {evasion:.1}%. All actions logged for defensive analysis."
        ),
        detail: format!(
            "Full domain compromise achieved. {compromised}/{hosts} nodes breached. \
             Simulated duration: {duration:.1}s. Report ready for defensive team review."
        ),
        target: None,
        action_type: REASONING,
    }
}
