#![no_main]

use libfuzzer_sys::fuzz_target;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use strand_analysis::{condense, decompose, find_cycle, is_dag, reduce, to_petgraph};
use strand_core::{Snapshot, Successors};

// Each byte pair is an edge over ids 0..32; ids 24.. are never keys, so
// some targets dangle.
fuzz_target!(|data: &[u8]| {
    let mut snapshot: Snapshot = (0..24u64).map(|id| (id, Successors::new())).collect();
    for pair in data.chunks_exact(2) {
        let from = u64::from(pair[0] % 24);
        let to = u64::from(pair[1] % 32);
        let mut succ = snapshot.remove(from).unwrap_or_default();
        succ.insert(to);
        snapshot.insert(from, succ);
    }

    let keys_only: Snapshot = snapshot
        .iter()
        .map(|(id, succ)| {
            let kept: Successors = succ.iter().copied().filter(|to| *to < 24).collect();
            (id, kept)
        })
        .collect();
    let (graph, _) = to_petgraph(&keys_only);

    let partition = decompose(&snapshot);
    assert_eq!(partition.len(), tarjan_scc(&graph).len());
    assert_eq!(is_dag(&snapshot), !is_cyclic_directed(&graph));
    assert_eq!(find_cycle(&snapshot, None).is_none(), is_dag(&snapshot));
    assert!(is_dag(&condense(&snapshot)));

    let reduction = reduce(&snapshot);
    assert_eq!(
        reduction.reduced.edge_count() + reduction.len(),
        snapshot.edge_count()
    );
});
