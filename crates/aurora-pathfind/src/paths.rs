//! Path-level breach probability and detection-risk aggregation.
//!
//! Hops chain multiplicatively (`cumulative *= edge_prob`), then the most
//! severe vulnerability on the hop target adds `severity/10 × 0.15`. Detection
//! risk grows by `0.03 + i×0.008 + exposure/2000` per hop `i`.

use aurora_core::types::SeverityLabel;

use crate::graph::AttackGraph;
use crate::scoring::{round_decimal, round_to, score_edge};
use crate::types::{PathStep, ScoredPath};

/// Paths evaluated per enumeration, in discovery order.
pub const DEFAULT_MAX_PATHS: usize = 10;

const DETECTION_PER_HOP: f64 = 0.03;
const DETECTION_PER_INDEX: f64 = 0.008;
const DETECTION_EXPOSURE_DIVISOR: f64 = 2000.0;
const DETECTION_CEILING: f64 = 0.95;

const VULN_BOOST: f64 = 0.15;
const CUMULATIVE_CEILING: f64 = 0.99;

/// Reported probability never reaches 100%.
const PROBABILITY_CEILING: f64 = 99.5;

/// Score one path end to end.
///
/// Hops whose endpoints or edge are missing from the graph are skipped; the
/// rest of the path is still scored.
pub fn score_path<G: AttackGraph + ?Sized>(graph: &G, path: &[String]) -> ScoredPath {
    if path.len() < 2 {
        return ScoredPath::empty(path.to_vec());
    }

    let mut cumulative = 1.0_f64;
    let mut detection = 0.0_f64;
    let mut steps = Vec::with_capacity(path.len() - 1);

    for (i, hop) in path.windows(2).enumerate() {
        let (src, dst) = (&hop[0], &hop[1]);

        let (Some(target), Some(edge)) = (graph.attributes(dst), graph.edge_attributes(src, dst))
        else {
            tracing::debug!(from = %src, to = %dst, "Skipping hop missing from graph");
            continue;
        };

        let edge_prob = score_edge(edge, target);
        cumulative *= edge_prob;

        let increment = DETECTION_PER_HOP
            + i as f64 * DETECTION_PER_INDEX
            + target.exposure / DETECTION_EXPOSURE_DIVISOR;
        detection = (detection + increment).min(DETECTION_CEILING);

        let best = target.most_severe_vulnerability();
        if let Some(vuln) = best {
            cumulative = (cumulative + vuln.severity / 10.0 * VULN_BOOST).min(CUMULATIVE_CEILING);
        }

        steps.push(PathStep {
            from: src.clone(),
            to: dst.clone(),
            edge_probability: round_to(edge_prob, 3),
            cumulative_probability: round_to(cumulative, 3),
            detection_risk: round_to(round_decimal(detection, 3) * 100.0, 1),
            best_vulnerability: best.cloned(),
            trust: edge.trust,
        });
    }

    let probability = round_to((cumulative * 100.0).min(PROBABILITY_CEILING), 1);

    ScoredPath {
        path: path.to_vec(),
        probability,
        steps,
        total_detection_risk: round_to(detection * 100.0, 1),
        path_length: path.len() - 1,
        score_label: SeverityLabel::from_probability(probability),
    }
}

/// Enumerate simple paths of at most `max_hops` edges and score them.
///
/// Only the first `max_paths` paths in discovery order are evaluated. The
/// evaluated set is then stable-sorted by probability, highest first. An
/// unknown endpoint or an unreachable target gives an empty result.
pub fn enumerate_and_score<G: AttackGraph + ?Sized>(
    graph: &G,
    source: &str,
    target: &str,
    max_hops: usize,
    max_paths: usize,
) -> Vec<ScoredPath> {
    let mut scored: Vec<ScoredPath> = graph
        .simple_paths(source, target, max_hops)
        .take(max_paths)
        .map(|path| score_path(graph, &path))
        .collect();

    scored.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    tracing::debug!(
        source,
        target,
        max_hops,
        evaluated = scored.len(),
        best = scored.first().map(|p| p.probability),
        "Scored candidate paths"
    );

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::InMemoryGraph;
    use aurora_core::types::{Edge, ExploitKind, Node, NodeKind, Privilege, Trust, Vulnerability};
    use aurora_topology::Topology;

    fn host(id: &str, risk: f64, exposure: f64, severities: &[f64]) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_uppercase(),
            kind: NodeKind::Server,
            ports: vec![],
            os: None,
            risk,
            exposure,
            privilege: Privilege::User,
            vulnerabilities: severities
                .iter()
                .enumerate()
                .map(|(i, &severity)| Vulnerability {
                    id: format!("{id}-V{i}"),
                    description: String::new(),
                    severity,
                    kind: ExploitKind::Rce,
                })
                .collect(),
        }
    }

    fn link(source: &str, target: &str, trust: Trust) -> Edge {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
            trust,
        }
    }

    fn ids(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| s.to_string()).collect()
    }

    /// A chain `n0 → n1 → … → n{len}` of identical plain hosts.
    fn chain(len: usize) -> InMemoryGraph {
        let nodes = (0..=len).map(|i| host(&format!("n{i}"), 50.0, 40.0, &[])).collect();
        let edges = (0..len)
            .map(|i| link(&format!("n{i}"), &format!("n{}", i + 1), Trust::Internal))
            .collect();
        InMemoryGraph::from_topology(&Topology { nodes, edges })
    }

    #[test]
    fn test_single_node_path_is_zero() {
        let graph = chain(1);
        let scored = score_path(&graph, &ids(&["n0"]));
        assert_eq!(scored.probability, 0.0);
        assert_eq!(scored.path_length, 0);
        assert!(scored.steps.is_empty());
        assert_eq!(scored.score_label, SeverityLabel::Minimal);
    }

    #[test]
    fn test_single_hop_arithmetic() {
        // score_node = 0.175 + 0.12 + 0 + 0.03 = 0.325; internal → 0.26.
        let graph = chain(1);
        let scored = score_path(&graph, &ids(&["n0", "n1"]));

        assert_eq!(scored.steps.len(), 1);
        assert_eq!(scored.steps[0].edge_probability, 0.26);
        assert_eq!(scored.probability, 26.0);
        // 0.03 + 0 + 40/2000 = 0.05
        assert_eq!(scored.total_detection_risk, 5.0);
        assert_eq!(scored.score_label, SeverityLabel::Minimal);
    }

    #[test]
    fn test_vulnerability_boost_uses_most_severe() {
        let topology = Topology {
            nodes: vec![host("a", 0.0, 0.0, &[]), host("b", 50.0, 40.0, &[6.0, 9.0, 9.0])],
            edges: vec![link("a", "b", Trust::Internal)],
        };
        let graph = InMemoryGraph::from_topology(&topology);
        let scored = score_path(&graph, &ids(&["a", "b"]));

        // (0.325 + 0.12) × 0.8 = 0.356, then + 0.9 × 0.15 = 0.491.
        assert_eq!(scored.steps[0].cumulative_probability, 0.491);
        assert_eq!(scored.probability, 49.1);
        assert_eq!(scored.steps[0].best_vulnerability.as_ref().unwrap().id, "b-V1");
    }

    #[test]
    fn test_missing_hop_is_skipped() {
        let graph = chain(2);
        // n0 → n2 has no edge and ghost is not a node: both hops skipped.
        let scored = score_path(&graph, &ids(&["n0", "n2", "ghost"]));
        assert!(scored.steps.is_empty());
        assert_eq!(scored.probability, 99.5);
        assert_eq!(scored.path_length, 2);
    }

    #[test]
    fn test_longer_paths_never_more_likely_without_vulns() {
        let graph = chain(6);
        let mut previous = f64::MAX;
        let mut previous_detection = 0.0;
        for len in 1..=6 {
            let path: Vec<String> = (0..=len).map(|i| format!("n{i}")).collect();
            let scored = score_path(&graph, &path);
            assert!(scored.probability <= previous);
            assert!(scored.total_detection_risk >= previous_detection);
            assert!(scored.total_detection_risk <= 95.0);
            previous = scored.probability;
            previous_detection = scored.total_detection_risk;
        }
    }

    #[test]
    fn test_enumerate_sorts_and_bounds() {
        // Two routes to t: through a weak host and through a strong one.
        let topology = Topology {
            nodes: vec![
                host("s", 0.0, 0.0, &[]),
                host("weak", 10.0, 10.0, &[]),
                host("strong", 90.0, 90.0, &[9.8]),
                host("t", 60.0, 30.0, &[]),
            ],
            edges: vec![
                link("s", "weak", Trust::Internal),
                link("s", "strong", Trust::Internal),
                link("weak", "t", Trust::Internal),
                link("strong", "t", Trust::Internal),
            ],
        };
        let graph = InMemoryGraph::from_topology(&topology);

        let all = enumerate_and_score(&graph, "s", "t", 6, DEFAULT_MAX_PATHS);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].path, ids(&["s", "strong", "t"]));
        assert!(all[0].probability >= all[1].probability);

        // Bound applies before sorting: only the weak route is discovered first.
        let first_only = enumerate_and_score(&graph, "s", "t", 6, 1);
        assert_eq!(first_only.len(), 1);
        assert_eq!(first_only[0].path, ids(&["s", "weak", "t"]));
    }

    #[test]
    fn test_default_cap_drops_late_best_route() {
        // Eleven two-hop routes s → r{i} → t; only the last one discovered is strong.
        let mut nodes = vec![host("s", 0.0, 0.0, &[]), host("t", 60.0, 30.0, &[])];
        let mut edges = Vec::new();
        for i in 0..11 {
            let relay = format!("r{i}");
            nodes.push(if i == 10 {
                host(&relay, 90.0, 90.0, &[9.8])
            } else {
                host(&relay, 10.0, 10.0, &[])
            });
            edges.push(link("s", &relay, Trust::Internal));
        }
        for i in 0..11 {
            edges.push(link(&format!("r{i}"), "t", Trust::Internal));
        }
        let graph = InMemoryGraph::from_topology(&Topology { nodes, edges });

        let capped = enumerate_and_score(&graph, "s", "t", 6, DEFAULT_MAX_PATHS);
        assert_eq!(capped.len(), 10);
        assert!(capped.iter().all(|p| !p.path.contains(&"r10".to_string())));
        assert!(capped.windows(2).all(|w| w[0].probability >= w[1].probability));

        let uncapped = enumerate_and_score(&graph, "s", "t", 6, 11);
        assert_eq!(uncapped.len(), 11);
        assert_eq!(uncapped[0].path, ids(&["s", "r10", "t"]));
        assert!(uncapped[0].probability > capped[0].probability);
    }

    #[test]
    fn test_enumerate_unreachable_is_empty() {
        let graph = chain(3);
        assert!(enumerate_and_score(&graph, "n3", "n0", 6, 10).is_empty());
        assert!(enumerate_and_score(&graph, "n0", "nowhere", 6, 10).is_empty());
        assert!(enumerate_and_score(&graph, "n0", "n3", 2, 10).is_empty());
    }
}
