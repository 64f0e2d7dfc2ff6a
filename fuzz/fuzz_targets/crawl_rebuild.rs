#![no_main]

use libfuzzer_sys::fuzz_target;
use strand_core::{Crawler, GraphStore, SubgraphBuilder};

// First byte picks the origin, then each (op, a, b) triple mutates the store
// and the crawler is checked against a fresh build.
fuzz_target!(|data: &[u8]| {
    let Some((&seed, ops)) = data.split_first() else {
        return;
    };
    let mut store = GraphStore::from_edges((0..16u64).map(|i| (i, (i * 7 + 3) % 16)));
    let origin = u64::from(seed % 16);
    let Ok(mut crawler) = Crawler::new(&store, Some(origin)) else {
        return;
    };

    for op in ops.chunks_exact(3) {
        let a = u64::from(op[1] % 20);
        let b = u64::from(op[2] % 20);
        match op[0] % 5 {
            0 => store.add_node(a, [b]),
            1 => {
                store.delete_nodes([a]);
            }
            2 => {
                store.delete_nodes_scrubbing([a]);
            }
            3 => {
                store.add_edges(a, [b]);
            }
            _ => {
                store.delete_edges(a, [b]);
            }
        }

        crawler.crawl(&store);
        if store.contains(origin) {
            let fresh = SubgraphBuilder::new(&store).build(Some(origin));
            assert_eq!(crawler.snapshot(), &fresh);
        } else {
            assert!(!crawler.snapshot().contains(origin));
        }
    }
});
