//! Exploitability scoring for single nodes and single edge transitions.
//!
//! `score_node = risk×0.35 + exposure×0.30 + min(vulns×0.2, 0.6)×0.20 + privilege×0.15`
//! with `risk` and `exposure` normalized to `[0, 1]`. An edge scores its
//! target node scaled by the trust modifier of the edge.

use aurora_core::types::{Edge, Node, Privilege, Trust};

const RISK_WEIGHT: f64 = 0.35;
const EXPOSURE_WEIGHT: f64 = 0.30;
const VULN_WEIGHT: f64 = 0.20;
const PRIVILEGE_WEIGHT: f64 = 0.15;

/// Each known vulnerability adds this much to the vulnerability factor.
const VULN_STEP: f64 = 0.2;
const VULN_FACTOR_CAP: f64 = 0.6;

/// How attractive a privilege level is to an attacker.
pub fn privilege_weight(privilege: Privilege) -> f64 {
    match privilege {
        Privilege::None => 0.0,
        Privilege::User => 0.2,
        Privilege::Admin => 0.5,
        Privilege::Root => 0.8,
        Privilege::Network => 0.3,
    }
}

/// How much a foothold on the source helps reach the target.
pub fn trust_modifier(trust: Trust) -> f64 {
    match trust {
        Trust::Untrusted => 0.40,
        Trust::Dmz => 0.65,
        Trust::Restricted => 0.50,
        Trust::Internal => 0.80,
        Trust::Trusted => 0.92,
        Trust::Unknown => 0.60,
    }
}

/// Exploitability of a single node, in `[0, 1]`, rounded to 4 places.
pub fn score_node(node: &Node) -> f64 {
    let risk = node.risk / 100.0;
    let exposure = node.exposure / 100.0;
    let vulns = (node.vulnerabilities.len() as f64 * VULN_STEP).min(VULN_FACTOR_CAP);
    let privilege = privilege_weight(node.privilege);

    let raw = risk * RISK_WEIGHT
        + exposure * EXPOSURE_WEIGHT
        + vulns * VULN_WEIGHT
        + privilege * PRIVILEGE_WEIGHT;

    round_to(raw.clamp(0.0, 1.0), 4)
}

/// Transition probability across `edge` into `target`, rounded to 4 places.
pub fn score_edge(edge: &Edge, target: &Node) -> f64 {
    round_to(trust_modifier(edge.trust) * score_node(target), 4)
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round the exact binary value to `places` decimals.
///
/// Unlike [`round_to`], `0.0375` (stored as `0.03749…`) rounds down to `0.037`.
pub fn round_decimal(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_core::types::{ExploitKind, NodeKind, Vulnerability};
    use proptest::prelude::*;

    fn node(risk: f64, exposure: f64, vulns: usize, privilege: Privilege) -> Node {
        Node {
            id: "h".to_string(),
            label: "Host".to_string(),
            kind: NodeKind::Server,
            ports: vec![],
            os: None,
            risk,
            exposure,
            privilege,
            vulnerabilities: (0..vulns)
                .map(|i| Vulnerability {
                    id: format!("CVE-{i}"),
                    description: String::new(),
                    severity: 8.0,
                    kind: ExploitKind::Rce,
                })
                .collect(),
        }
    }

    fn edge(trust: Trust) -> Edge {
        Edge {
            source: "a".to_string(),
            target: "h".to_string(),
            trust,
        }
    }

    #[test]
    fn test_zero_node_scores_zero() {
        assert_eq!(score_node(&node(0.0, 0.0, 0, Privilege::None)), 0.0);
    }

    #[test]
    fn test_known_values() {
        // 0.3325 + 0.09 + 0.04 + 0.12
        assert_eq!(score_node(&node(95.0, 30.0, 1, Privilege::Root)), 0.5825);
        // Maxed out: 0.35 + 0.30 + 0.12 + 0.12.
        assert_eq!(score_node(&node(100.0, 100.0, 5, Privilege::Root)), 0.89);
    }

    #[test]
    fn test_vuln_factor_caps_at_three() {
        let three = score_node(&node(50.0, 50.0, 3, Privilege::User));
        let seven = score_node(&node(50.0, 50.0, 7, Privilege::User));
        assert_eq!(three, seven);
    }

    #[test]
    fn test_edge_scales_by_trust() {
        let target = node(100.0, 100.0, 3, Privilege::Root);
        assert_eq!(score_edge(&edge(Trust::Trusted), &target), round_to(0.92 * 0.89, 4));
        assert_eq!(score_edge(&edge(Trust::Untrusted), &target), 0.356);
        assert_eq!(score_edge(&edge(Trust::Unknown), &target), 0.534);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12346, 4), 0.1235);
        assert_eq!(round_to(26.74, 1), 26.7);
        assert_eq!(round_to(0.0, 3), 0.0);
    }

    #[test]
    fn test_round_decimal_uses_stored_value() {
        let detection = 0.03 + 15.0 / 2000.0;
        assert_eq!(round_to(detection * 100.0, 1), 3.8);
        assert_eq!(round_decimal(detection, 3), 0.037);
        assert_eq!(round_decimal(0.1116, 3), 0.112);
    }

    fn any_privilege() -> impl Strategy<Value = Privilege> {
        prop_oneof![
            Just(Privilege::None),
            Just(Privilege::User),
            Just(Privilege::Admin),
            Just(Privilege::Root),
            Just(Privilege::Network),
        ]
    }

    proptest! {
        #[test]
        fn prop_node_score_in_unit_range(
            risk in 0.0f64..=100.0,
            exposure in 0.0f64..=100.0,
            vulns in 0usize..8,
            privilege in any_privilege(),
        ) {
            let score = score_node(&node(risk, exposure, vulns, privilege));
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_node_score_monotone(
            risk in 0.0f64..=90.0,
            exposure in 0.0f64..=90.0,
            vulns in 0usize..6,
            bump in 0.0f64..=10.0,
            privilege in any_privilege(),
        ) {
            let base = score_node(&node(risk, exposure, vulns, privilege));
            prop_assert!(score_node(&node(risk + bump, exposure, vulns, privilege)) >= base);
            prop_assert!(score_node(&node(risk, exposure + bump, vulns, privilege)) >= base);
            prop_assert!(score_node(&node(risk, exposure, vulns + 1, privilege)) >= base);
        }

        #[test]
        fn prop_edge_never_exceeds_node(
            risk in 0.0f64..=100.0,
            exposure in 0.0f64..=100.0,
            vulns in 0usize..5,
        ) {
            let target = node(risk, exposure, vulns, Privilege::Admin);
            for trust in [Trust::Untrusted, Trust::Dmz, Trust::Restricted, Trust::Internal, Trust::Trusted, Trust::Unknown] {
                prop_assert!(score_edge(&edge(trust), &target) <= score_node(&target));
            }
        }
    }
}
