#![allow(dead_code)]

use ideorder::core_types::{Karyotype, Link};
use ideorder::loader::{parse_karyotype, parse_links};
use std::io::Cursor;

/// A(0-10), B(0-10), C(0-10): the smallest karyotype with a non-trivial crossing.
pub const ABC_KARYOTYPE: &str = "\
chr - A a 0 10 red
chr - B b 0 10 green
chr - C c 0 10 blue
";

/// Crosses once under A,B,C and not at all under B,A,C.
pub const ABC_LINKS: &str = "\
A 2 2 B 8 8
A 8 8 C 2 2
";

pub fn karyotype(data: &str) -> Karyotype {
    parse_karyotype(Cursor::new(data), "fixture").expect("fixture karyotype")
}

pub fn links(data: &str, k: &Karyotype) -> Vec<Link> {
    parse_links(Cursor::new(data), "fixture", k).expect("fixture links")
}

pub fn abc() -> (Karyotype, Vec<Link>) {
    let k = karyotype(ABC_KARYOTYPE);
    let l = links(ABC_LINKS, &k);
    (k, l)
}

pub fn indices(k: &Karyotype, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .map(|n| k.index_of(n).expect("known ideogram"))
        .collect()
}

/// `n` ideograms `c0..c{n-1}` of length 1000 with pseudo-random links between them.
pub fn random_genome(n: usize, link_count: usize, seed: u64) -> (Karyotype, Vec<Link>) {
    let mut kar = String::new();
    for i in 0..n {
        kar.push_str(&format!("chr - c{} {} 0 1000 grey\n", i, i));
    }
    let k = karyotype(&kar);

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut data = String::new();
    for _ in 0..link_count {
        let a = rng.usize(0..n);
        let mut b = rng.usize(0..n - 1);
        if b >= a {
            b += 1;
        }
        let pa = rng.i64(0..1000);
        let pb = rng.i64(0..1000);
        data.push_str(&format!("c{} {} {} c{} {} {}\n", a, pa, pa, b, pb, pb));
    }
    let l = links(&data, &k);
    (k, l)
}
