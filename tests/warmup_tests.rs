mod common;

use ideorder::optimizer::warmup::warmup_order;
use ideorder::scorer::Scorer;

#[test]
fn test_warmup_is_a_deterministic_permutation() {
    let (k, links) = common::random_genome(12, 90, 17);
    let order: Vec<usize> = (0..k.len()).rev().collect();

    let first = warmup_order(&order, &[], &links, k.len(), false);
    let second = warmup_order(&order, &[], &links, k.len(), false);
    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..k.len()).collect::<Vec<_>>());
}

#[test]
fn test_warmup_keeps_preorder_in_front() {
    let (k, links) = common::random_genome(10, 60, 3);
    let order: Vec<usize> = (0..k.len()).collect();
    let preorder = common::indices(&k, &["c7", "c2"]);

    let out = warmup_order(&order, &preorder, &links, k.len(), false);
    assert_eq!(&out[..2], &preorder[..]);
}

#[test]
fn test_warmup_leaves_unlinked_tail() {
    let k = common::karyotype(
        "\
chr - a a 0 100 x
chr - b b 0 100 x
chr - c c 0 100 x
chr - d d 0 100 x
",
    );
    let links = common::links("a 10 10 c 50 50\nc 20 20 a 90 90\n", &k);
    let order = common::indices(&k, &["b", "a", "d", "c"]);

    let out = warmup_order(&order, &[], &links, k.len(), false);
    // a and c tie on degree; a comes first in the incoming order.
    assert_eq!(out, common::indices(&k, &["a", "c", "b", "d"]));
}

#[test]
fn test_warmup_clusters_linked_pairs() {
    // Two disjoint pairs laid out interleaved cross every time.
    let k = common::karyotype(
        "\
chr - a a 0 100 x
chr - b b 0 100 x
chr - c c 0 100 x
chr - d d 0 100 x
",
    );
    let links = common::links(
        "a 20 20 c 20 20\na 80 80 c 80 80\nb 20 20 d 20 20\nb 80 80 d 80 80\n",
        &k,
    );
    let order = common::indices(&k, &["a", "b", "c", "d"]);
    let scorer = Scorer::new(&links, &order, k.len());

    let out = warmup_order(&order, &[], &links, k.len(), false);
    assert_eq!(out, common::indices(&k, &["a", "c", "b", "d"]));
    assert!(scorer.score(&out) < scorer.score(&order));
}
