use halfhop_core::rng::RngHandle;
use halfhop_graph::{
    canonical_hash, gen_random_graph, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, AttrValue, EdgeIndex, FeatureMatrix, Graph,
};
use proptest::prelude::*;

#[test]
fn attributes_and_mask_survive_json() {
    let x = FeatureMatrix::from_rows(&[vec![1.0f64, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]]).unwrap();
    let mut graph = Graph::new(x, EdgeIndex::from_pairs([(0, 2), (2, 1), (1, 2)]))
        .unwrap()
        .with_attr("name", AttrValue::Text("toy".into()))
        .with_attr("y", AttrValue::Ints(vec![1, 0, 1]));
    graph.slow_node_mask = Some(vec![false, false, true]);

    let json = graph_to_json(&graph).unwrap();
    let restored: Graph<f64> = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn hash_is_sensitive_to_edge_order() {
    let x = FeatureMatrix::<f32>::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
    let a = Graph::new(x.clone(), EdgeIndex::from_pairs([(0, 1), (1, 0)])).unwrap();
    let b = Graph::new(x, EdgeIndex::from_pairs([(1, 0), (0, 1)])).unwrap();
    assert_ne!(canonical_hash(&a), canonical_hash(&b));
}

proptest! {
    #[test]
    fn random_graphs_roundtrip(seed in any::<u64>(), nodes in 1usize..20, edges in 0usize..40, dim in 0usize..4) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_graph::<f32>(nodes, edges, dim, 0.25, &mut rng).unwrap();

        let bytes = graph_to_bytes(&graph).unwrap();
        let restored: Graph<f32> = graph_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_hash(&graph), canonical_hash(&restored));
        prop_assert_eq!(&restored, &graph);

        let json = graph_to_json(&graph).unwrap();
        let restored: Graph<f32> = graph_from_json(&json).unwrap();
        prop_assert_eq!(canonical_hash(&graph), canonical_hash(&restored));
    }
}
