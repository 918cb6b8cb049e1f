//! Property tests for the repair step on random graphs.

use std::collections::HashMap;

use dash_heal::{heal, prepare_neighbours, HealingTree, SelfHealingGraph};
use dash_topology::{erdos_renyi, DashId, HealingEdges, NodeId, Topology};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

/// A random graph that has already been through a few deletions, so deltas,
/// dash ids and healing tags are non-trivial. Returns the graph and the node
/// picked for the next deletion.
fn warmed_up(seed: u64, n: usize, p: f64, warmup: usize) -> Option<(Topology, HealingEdges, NodeId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let topology = erdos_renyi(n, p, &mut rng).ok()?;
    let mut graph = SelfHealingGraph::new(topology);

    for _ in 0..warmup {
        let victim = graph.topology().node_ids().choose(&mut rng)?;
        graph.delete_node(victim).ok()?;
    }

    let victim = graph.topology().node_ids().choose(&mut rng)?;
    let (topology, tags) = graph.into_parts();
    Some((topology, tags, victim))
}

fn snapshot(topology: &Topology) -> HashMap<NodeId, (i64, DashId)> {
    topology
        .node_ids()
        .map(|id| {
            let attrs = topology.attrs(id).unwrap();
            (id, (attrs.delta, attrs.dash_id))
        })
        .collect()
}

proptest! {
    /// Every new edge is a parent/child link of the tree built from the same
    /// neighbour list and the deltas seen at call time.
    #[test]
    fn new_edges_are_tree_links(
        seed in any::<u64>(),
        n in 3usize..40,
        p in 0.05f64..0.6,
        warmup in 0usize..6,
    ) {
        let Some((mut topo, tags, victim)) = warmed_up(seed, n, p, warmup) else {
            return Ok(());
        };

        let selected = prepare_neighbours(&mut topo, &tags, victim).unwrap();
        topo.remove_node(victim).unwrap();

        let before = snapshot(&topo);
        let tree = HealingTree::build(&selected, |id| before[&id].0);
        let report = heal(&mut topo, victim, &selected).unwrap();

        let links = tree.edges();
        for edge in &report.edges {
            prop_assert!(links.contains(edge), "{} is not a tree link", edge);
            let (a, b) = edge.endpoints();
            prop_assert!(topo.contains_edge(a, b));
        }
    }

    /// Altered nodes carry the minimum pre-call dash id of the neighbour set;
    /// everyone else keeps theirs.
    #[test]
    fn dash_id_propagation(
        seed in any::<u64>(),
        n in 3usize..40,
        p in 0.05f64..0.6,
        warmup in 0usize..6,
    ) {
        let Some((mut topo, tags, victim)) = warmed_up(seed, n, p, warmup) else {
            return Ok(());
        };

        let selected = prepare_neighbours(&mut topo, &tags, victim).unwrap();
        topo.remove_node(victim).unwrap();

        let before = snapshot(&topo);
        let report = heal(&mut topo, victim, &selected).unwrap();

        if report.is_noop() {
            prop_assert_eq!(snapshot(&topo), before);
            return Ok(());
        }

        let min = selected.iter().map(|id| before[id].1).min().unwrap();
        prop_assert_eq!(report.dash_id, Some(min));
        for id in topo.node_ids() {
            let dash = topo.dash_id(id).unwrap();
            if report.altered.contains(&id) {
                prop_assert_eq!(dash, min);
            } else {
                prop_assert_eq!(dash, before[&id].1);
            }
        }
    }

    /// Each endpoint of each new edge gains exactly one delta.
    #[test]
    fn delta_accounting(
        seed in any::<u64>(),
        n in 3usize..40,
        p in 0.05f64..0.6,
        warmup in 0usize..6,
    ) {
        let Some((mut topo, tags, victim)) = warmed_up(seed, n, p, warmup) else {
            return Ok(());
        };

        let selected = prepare_neighbours(&mut topo, &tags, victim).unwrap();
        topo.remove_node(victim).unwrap();

        let before = snapshot(&topo);
        let report = heal(&mut topo, victim, &selected).unwrap();

        for id in topo.node_ids() {
            let gained = report.edges.iter().filter(|e| e.touches(id)).count() as i64;
            prop_assert_eq!(topo.delta(id).unwrap(), before[&id].0 + gained);
        }
    }

    /// A single neighbour never triggers a repair.
    #[test]
    fn singleton_is_noop(
        seed in any::<u64>(),
        n in 3usize..30,
        p in 0.05f64..0.6,
    ) {
        let Some((mut topo, _, victim)) = warmed_up(seed, n, p, 0) else {
            return Ok(());
        };
        let other = topo.node_ids().find(|&id| id != victim).unwrap();
        topo.remove_node(victim).unwrap();

        let before = snapshot(&topo);
        let edges = topo.edge_count();
        let report = heal(&mut topo, victim, &[other]).unwrap();

        prop_assert!(report.is_noop());
        prop_assert_eq!(topo.edge_count(), edges);
        prop_assert_eq!(snapshot(&topo), before);
    }

    /// If the neighbours are already fully meshed, nothing changes.
    #[test]
    fn meshed_neighbours_are_idempotent(
        k in 2u32..8,
        deltas in prop::collection::vec(-3i64..6, 8),
    ) {
        let mut topo = Topology::new();
        let hub = topo.add_node(DashId(0.0)).unwrap();
        let ids: Vec<_> = (0..k)
            .map(|i| topo.add_node(DashId(1.0 + f64::from(i))).unwrap())
            .collect();
        for (i, &a) in ids.iter().enumerate() {
            topo.attrs_mut(a).unwrap().delta = deltas[i];
            for &b in &ids[i + 1..] {
                topo.add_edge(a, b).unwrap();
            }
        }
        topo.remove_node(hub).unwrap();

        let before = snapshot(&topo);
        let report = heal(&mut topo, hub, &ids).unwrap();

        prop_assert!(report.is_noop());
        prop_assert_eq!(snapshot(&topo), before);
    }

    /// Selection depends on nothing but the topology and tag set.
    #[test]
    fn selection_is_deterministic(
        seed in any::<u64>(),
        n in 3usize..40,
        p in 0.05f64..0.6,
        warmup in 0usize..6,
    ) {
        let Some((topo, tags, victim)) = warmed_up(seed, n, p, warmup) else {
            return Ok(());
        };

        let mut first_topo = topo.clone();
        let mut second_topo = topo.clone();
        let first = prepare_neighbours(&mut first_topo, &tags, victim).unwrap();
        let second = prepare_neighbours(&mut second_topo, &tags, victim).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(snapshot(&first_topo), snapshot(&second_topo));

        // At most one natural neighbour per dash id group
        let mut groups = HashMap::new();
        for id in &first {
            if !tags.contains(victim, *id) {
                let dash = topo.dash_id(*id).unwrap();
                prop_assert!(groups.insert(dash, *id).is_none());
            }
        }
    }
}
