//! Cross-engine integration tests
//!
//! Properties that hold across the three ranking engines, exercised on
//! structured and randomly generated graphs.

use rapid_graphrank::generate;
use rapid_graphrank::{
    CsrGraph, GraphInput, PersonalizedPageRank, PushPageRank, RankError, StandardPageRank,
};

fn l1(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// A mix of shapes: dangling tails, cycles, hubs, random wiring.
fn battery() -> Vec<(&'static str, GraphInput)> {
    vec![
        ("chain", generate::chain(8)),
        ("cycle", generate::cycle(8)),
        ("complete", generate::complete(6)),
        ("star", generate::star(8)),
        ("erdos_renyi", generate::erdos_renyi(30, 0.15, 7).unwrap()),
        (
            "scale_free",
            generate::preferential_attachment(30, 2, 7).unwrap(),
        ),
    ]
}

#[test]
fn test_pagerank_is_a_positive_distribution_on_every_graph() {
    for (name, input) in battery() {
        let graph = CsrGraph::from_input(&input).unwrap();
        let result = StandardPageRank::new().run(&graph).unwrap();

        assert_eq!(result.ranks.len(), graph.num_nodes(), "{name}");
        assert!(
            result.ranks.iter().all(|&score| score > 0.0),
            "{name}: non-positive score"
        );
        assert!(
            (result.total_mass() - 1.0).abs() < 1e-6,
            "{name}: mass {}",
            result.total_mass()
        );
    }
}

#[test]
fn test_ppr_sums_to_one_and_push_never_exceeds_one() {
    for (name, input) in battery() {
        let graph = CsrGraph::from_input(&input).unwrap();
        let seed = input.nodes[0];

        let ppr = PersonalizedPageRank::new().run(&graph, &[seed]).unwrap();
        assert!(
            (ppr.total_mass() - 1.0).abs() < 1e-6,
            "{name}: ppr mass {}",
            ppr.total_mass()
        );

        let push = PushPageRank::new().run(&graph, &[seed]).unwrap();
        assert!(
            push.total_mass() <= 1.0 + 1e-9,
            "{name}: push mass {}",
            push.total_mass()
        );
    }
}

#[test]
fn test_preprocessing_cleanup_does_not_change_results() {
    let clean = GraphInput::new(vec![1, 2, 3, 4], vec![(1, 2), (2, 3), (3, 1), (3, 4)]);
    let dirty = GraphInput::new(
        vec![1, 2, 3, 4],
        vec![
            (1, 1),
            (1, 2),
            (2, 3),
            (1, 2),
            (3, 1),
            (3, 4),
            (4, 4),
            (3, 4),
        ],
    );

    let graph_clean = CsrGraph::from_input(&clean).unwrap();
    let graph_dirty = CsrGraph::from_input(&dirty).unwrap();

    let pr_clean = StandardPageRank::new().run(&graph_clean).unwrap();
    let pr_dirty = StandardPageRank::new().run(&graph_dirty).unwrap();
    assert_eq!(pr_clean.ranks, pr_dirty.ranks);

    let ppr_clean = PersonalizedPageRank::new()
        .run(&graph_clean, &[1])
        .unwrap();
    let ppr_dirty = PersonalizedPageRank::new()
        .run(&graph_dirty, &[1])
        .unwrap();
    assert_eq!(ppr_clean.ranks, ppr_dirty.ranks);

    let push_clean = PushPageRank::new().run(&graph_clean, &[1]).unwrap();
    let push_dirty = PushPageRank::new().run(&graph_dirty, &[1]).unwrap();
    assert_eq!(push_clean.ranks, push_dirty.ranks);
    assert_eq!(push_clean.push_operations, push_dirty.push_operations);
}

#[test]
fn test_single_node_graph_gets_all_the_mass() {
    let graph = CsrGraph::from_input(&GraphInput::new(vec![7], vec![])).unwrap();

    let pagerank = StandardPageRank::new().run(&graph).unwrap();
    assert!((pagerank.ranks[0] - 1.0).abs() < 1e-9);

    let ppr = PersonalizedPageRank::new().run(&graph, &[7]).unwrap();
    assert!((ppr.ranks[0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_two_disconnected_nodes_split_pagerank_evenly() {
    let graph = CsrGraph::from_input(&GraphInput::new(vec![1, 2], vec![])).unwrap();
    let result = StandardPageRank::new().run(&graph).unwrap();

    assert!((result.ranks[0] - 0.5).abs() < 1e-9);
    assert!((result.ranks[1] - 0.5).abs() < 1e-9);
}

#[test]
fn test_chain_sink_wins_globally_but_seed_wins_personalized() {
    let input = generate::chain(3);
    let graph = CsrGraph::from_input(&input).unwrap();

    let global = StandardPageRank::new().run(&graph).unwrap();
    assert!(global.ranks[2] > global.ranks[0]);
    assert!(global.ranks[2] > global.ranks[1]);

    let personal = PersonalizedPageRank::new().run(&graph, &[0]).unwrap();
    assert!(personal.ranks[0] > personal.ranks[1]);
    assert!(personal.ranks[0] > personal.ranks[2]);
}

#[test]
fn test_shrinking_epsilon_strictly_tightens_push_accuracy() {
    let input = generate::erdos_renyi(40, 0.1, 11).unwrap();
    let graph = CsrGraph::from_input(&input).unwrap();
    let seeds = [0i64, 5];

    let exact = PersonalizedPageRank::new()
        .with_tolerance(1e-12)
        .run(&graph, &seeds)
        .unwrap();

    let coarse = PushPageRank::new()
        .with_epsilon(1e-3)
        .run(&graph, &seeds)
        .unwrap();
    let fine = PushPageRank::new()
        .with_epsilon(1e-6)
        .run(&graph, &seeds)
        .unwrap();

    let err_coarse = l1(&coarse.ranks, &exact.ranks);
    let err_fine = l1(&fine.ranks, &exact.ranks);
    assert!(
        err_fine < err_coarse,
        "expected {err_fine} < {err_coarse}"
    );
}

#[test]
fn test_seed_validation_errors() {
    let input = GraphInput::new(vec![0, 1, 2], vec![(0, 1), (1, 2)]);
    let graph = CsrGraph::from_input(&input).unwrap();

    let err = PersonalizedPageRank::new().run(&graph, &[]).unwrap_err();
    assert!(matches!(err, RankError::InvalidInput(_)));

    let err = PersonalizedPageRank::new().run(&graph, &[5]).unwrap_err();
    assert_eq!(err, RankError::NodeNotFound(5));
    assert!(err.to_string().contains('5'));

    let err = PushPageRank::new().run(&graph, &[]).unwrap_err();
    assert!(matches!(err, RankError::InvalidInput(_)));

    let err = PushPageRank::new().run(&graph, &[5]).unwrap_err();
    assert_eq!(err, RankError::NodeNotFound(5));
}

#[test]
fn test_isolated_node_unreachable_from_seeds_scores_zero() {
    // Node 9 participates in no edge.
    let input = GraphInput::new(vec![0, 1, 2, 9], vec![(0, 1), (1, 2), (2, 0)]);
    let graph = CsrGraph::from_input(&input).unwrap();
    let pos = graph.position_of(9).unwrap() as usize;

    let ppr = PersonalizedPageRank::new().run(&graph, &[0]).unwrap();
    assert_eq!(ppr.ranks[pos], 0.0);

    let push = PushPageRank::new().run(&graph, &[0]).unwrap();
    assert_eq!(push.ranks[pos], 0.0);
}

#[test]
fn test_three_cycle_is_uniform_for_every_engine() {
    let input = generate::cycle(3);
    let graph = CsrGraph::from_input(&input).unwrap();
    let all_seeds = [0i64, 1, 2];

    let global = StandardPageRank::new().run(&graph).unwrap();
    for &score in &global.ranks {
        assert!((score - 1.0 / 3.0).abs() < 1e-6);
    }

    let ppr = PersonalizedPageRank::new().run(&graph, &all_seeds).unwrap();
    for &score in &ppr.ranks {
        assert!((score - 1.0 / 3.0).abs() < 1e-6);
    }

    let push = PushPageRank::new().run(&graph, &all_seeds).unwrap();
    let first = push.ranks[0];
    for &score in &push.ranks {
        assert!((score - first).abs() < 1e-3);
    }
}

#[test]
fn test_star_spokes_score_symmetrically_when_all_seeded() {
    let input = generate::star(6);
    let graph = CsrGraph::from_input(&input).unwrap();
    let spokes = [1i64, 2, 3, 4, 5];

    let ppr = PersonalizedPageRank::new().run(&graph, &spokes).unwrap();
    for pos in 2..6 {
        assert!((ppr.ranks[pos] - ppr.ranks[1]).abs() < 1e-6);
    }

    let push = PushPageRank::new().run(&graph, &spokes).unwrap();
    for pos in 2..6 {
        assert!((push.ranks[pos] - push.ranks[1]).abs() < 1e-3);
    }
}

#[test]
fn test_push_closely_tracks_ppr_at_tight_epsilon() {
    let input = generate::preferential_attachment(50, 3, 5).unwrap();
    let graph = CsrGraph::from_input(&input).unwrap();
    let seeds = [0i64];

    let exact = PersonalizedPageRank::new()
        .with_tolerance(1e-12)
        .run(&graph, &seeds)
        .unwrap();
    let local = PushPageRank::new()
        .with_epsilon(1e-8)
        .run(&graph, &seeds)
        .unwrap();

    assert!(l1(&local.ranks, &exact.ranks) < 1e-4);
}

#[test]
fn test_json_wire_format_end_to_end() {
    let raw = r#"{"nodes": [10, -3, 42], "edges": [[10, -3], [-3, 42], [42, 10]]}"#;
    let input = GraphInput::from_json_str(raw).unwrap();
    let graph = CsrGraph::from_input(&input).unwrap();

    let result = StandardPageRank::new().run(&graph).unwrap();
    assert_eq!(result.ranks.len(), 3);
    assert!((result.total_mass() - 1.0).abs() < 1e-9);

    // Identifiers survive the round trip through positions.
    assert_eq!(graph.node_id(0), 10);
    assert_eq!(graph.node_id(1), -3);
    assert_eq!(graph.node_id(2), 42);

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"converged\":true"));
    assert!(json.contains("\"finalDiff\""));
}

#[test]
fn test_edge_derived_node_set_supports_all_engines() {
    let input = GraphInput::from_edges(vec![(100, 200), (200, 300), (300, 100)]);
    let graph = CsrGraph::from_input(&input).unwrap();

    assert_eq!(graph.num_nodes(), 3);

    let global = StandardPageRank::new().run(&graph).unwrap();
    assert!((global.total_mass() - 1.0).abs() < 1e-9);

    let personal = PersonalizedPageRank::new()
        .run(&graph, &[200])
        .unwrap();
    assert!(personal.ranks[graph.position_of(200).unwrap() as usize] > 1.0 / 3.0);

    let local = PushPageRank::new().run(&graph, &[200]).unwrap();
    assert!(local.total_mass() <= 1.0 + 1e-9);
}

#[test]
fn test_malformed_edge_is_rejected_not_silently_indexed() {
    let input = GraphInput::new(vec![1, 2], vec![(1, 2), (2, 99)]);
    let err = CsrGraph::from_input(&input).unwrap_err();

    assert!(matches!(err, RankError::MalformedGraph(_)));
    assert!(err.to_string().contains("99"));
}

#[test]
fn test_graph_file_round_trip() {
    let input = generate::preferential_attachment(20, 2, 9).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, input.to_json_string()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let reloaded = GraphInput::from_json_str(&raw).unwrap();
    assert_eq!(reloaded, input);

    let graph = CsrGraph::from_input(&reloaded).unwrap();
    assert_eq!(graph.num_nodes(), 20);
}

#[test]
fn test_engines_are_deterministic_on_random_graphs() {
    let input = generate::erdos_renyi(25, 0.2, 3).unwrap();
    let graph_a = CsrGraph::from_input(&input).unwrap();
    let graph_b = CsrGraph::from_input(&input).unwrap();

    let pr_a = StandardPageRank::new().run(&graph_a).unwrap();
    let pr_b = StandardPageRank::new().run(&graph_b).unwrap();
    assert_eq!(pr_a.ranks, pr_b.ranks);
    assert_eq!(pr_a.iterations, pr_b.iterations);

    let push_a = PushPageRank::new().run(&graph_a, &[0]).unwrap();
    let push_b = PushPageRank::new().run(&graph_b, &[0]).unwrap();
    assert_eq!(push_a.ranks, push_b.ranks);
    assert_eq!(push_a.push_operations, push_b.push_operations);
}
