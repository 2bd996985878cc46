use halfhop_core::rng::RngHandle;
use halfhop_graph::{gen_random_graph, Graph};
use halfhop_transform::{sample_active_nodes, HalfHop};
use proptest::prelude::*;

fn is_subsequence(needle: &[(usize, usize)], haystack: &[(usize, usize)]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|edge| rest.any(|candidate| candidate == edge))
}

fn check_rewrite(input: &Graph<f64>, output: &Graph<f64>, alpha: f64, active: Option<&[bool]>) {
    let n = input.num_nodes();
    let non_loops: Vec<_> = input.edge_index.iter().filter(|(s, d)| s != d).collect();
    let loops: Vec<_> = input.edge_index.iter().filter(|(s, d)| s == d).collect();

    let hopped_count = output.num_nodes() - n;
    let mask = output.slow_node_mask.as_ref().unwrap();
    assert_eq!(mask.len(), output.num_nodes());
    assert!(mask[..n].iter().all(|slow| !slow));
    assert!(mask[n..].iter().all(|slow| *slow));
    assert_eq!(output.num_slow_nodes(), hopped_count);

    let kept_count = non_loops.len() - hopped_count;
    assert_eq!(
        output.num_edges(),
        kept_count + loops.len() + 3 * hopped_count
    );

    let edges: Vec<_> = output.edge_index.iter().collect();
    let kept = &edges[..kept_count];
    assert_eq!(&edges[kept_count..kept_count + loops.len()], loops.as_slice());
    assert_eq!(output.edge_index.self_loop_count(), loops.len());

    let base = kept_count + loops.len();
    let mut hopped = Vec::with_capacity(hopped_count);
    for offset in 0..hopped_count {
        let slow = n + offset;
        let (src, s1) = edges[base + offset];
        let (s2, dst) = edges[base + hopped_count + offset];
        let (d2, s3) = edges[base + 2 * hopped_count + offset];
        assert_eq!((s1, s2, s3), (slow, slow, slow));
        assert_eq!(d2, dst);
        hopped.push((src, dst));

        let expected: Vec<f64> = input
            .x
            .row(src)
            .iter()
            .zip(input.x.row(dst))
            .map(|(s, d)| s * alpha + d * (1.0 - alpha))
            .collect();
        assert_eq!(output.x.row(slow), expected.as_slice());
    }

    assert!(is_subsequence(kept, &non_loops));
    assert!(is_subsequence(&hopped, &non_loops));
    let mut merged: Vec<_> = kept.iter().chain(hopped.iter()).copied().collect();
    let mut expected = non_loops.clone();
    merged.sort_unstable();
    expected.sort_unstable();
    assert_eq!(merged, expected);

    if let Some(active) = active {
        assert!(hopped.iter().all(|(_, dst)| active[*dst]));
        assert!(kept.iter().all(|(_, dst)| !active[*dst]));
    }

    assert_eq!(&output.x.as_slice()[..n * input.num_features()], input.x.as_slice());
}

proptest! {
    #[test]
    fn rewrite_preserves_structure(
        seed in any::<u64>(),
        nodes in 1usize..16,
        edges in 0usize..40,
        dim in 0usize..4,
        alpha in 0.0f64..=1.0,
        p in 0.0f64..1.0,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let input = gen_random_graph::<f64>(nodes, edges, dim, 0.2, &mut rng).unwrap();
        let transform = HalfHop::new(alpha, p).unwrap();

        let active = sample_active_nodes(nodes, p, &mut RngHandle::from_seed(seed ^ 1));
        let output = transform
            .apply_to_copy(&input, &mut RngHandle::from_seed(seed ^ 1))
            .unwrap();
        check_rewrite(&input, &output, alpha, Some(&active));
    }

    #[test]
    fn full_probability_hops_every_non_loop(
        seed in any::<u64>(),
        nodes in 1usize..16,
        edges in 0usize..40,
        alpha in 0.0f64..=1.0,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let input = gen_random_graph::<f64>(nodes, edges, 2, 0.3, &mut rng).unwrap();
        let output = HalfHop::new(alpha, 1.0)
            .unwrap()
            .apply_to_copy(&input, &mut rng)
            .unwrap();
        let non_loops = input.num_edges() - input.edge_index.self_loop_count();
        prop_assert_eq!(output.num_nodes() - input.num_nodes(), non_loops);
        check_rewrite(&input, &output, alpha, None);
    }

    #[test]
    fn zero_probability_adds_nothing(seed in any::<u64>(), nodes in 1usize..16, edges in 0usize..40) {
        let mut rng = RngHandle::from_seed(seed);
        let input = gen_random_graph::<f64>(nodes, edges, 2, 0.3, &mut rng).unwrap();
        let output = HalfHop::new(0.5, 0.0)
            .unwrap()
            .apply_to_copy(&input, &mut rng)
            .unwrap();
        prop_assert_eq!(output.num_nodes(), input.num_nodes());
        prop_assert_eq!(output.num_edges(), input.num_edges());
        check_rewrite(&input, &output, 0.5, None);
    }
}
