//! Per-node exploitability intensity for the heat-map view.

use std::collections::BTreeMap;

use crate::graph::AttackGraph;
use crate::scoring::score_node;

/// Intensity of a node already under attacker control.
pub const COMPROMISED_HEAT: f64 = 1.0;

/// Score every node except `entry`, then pin compromised nodes to 1.0.
///
/// Computed fresh on every call. Compromised ids that are not graph nodes are
/// ignored.
pub fn compute_heat_map<G, S>(graph: &G, entry: &str, compromised: &[S]) -> BTreeMap<String, f64>
where
    G: AttackGraph + ?Sized,
    S: AsRef<str>,
{
    let mut heat: BTreeMap<String, f64> = graph
        .all_nodes()
        .filter(|node| node.id != entry)
        .map(|node| (node.id.clone(), score_node(node)))
        .collect();

    for id in compromised {
        if let Some(value) = heat.get_mut(id.as_ref()) {
            *value = COMPROMISED_HEAT;
        }
    }

    heat
}
