use crate::core_types::{IdeoIdx, Link, Order};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Link counts between ideogram pairs.
pub struct Connectivity {
    /// `neighbors[a][b] = (links between a and b, sum of link positions on a)`
    neighbors: Vec<HashMap<IdeoIdx, (usize, f64)>>,
    degree: Vec<usize>,
}

impl Connectivity {
    /// Self-links are left out: they never pull two ideograms together.
    pub fn build(links: &[Link], ideogram_count: usize) -> Self {
        let mut neighbors = vec![HashMap::new(); ideogram_count];
        let mut degree = vec![0; ideogram_count];

        for link in links.iter().filter(|l| !l.is_self_link()) {
            let (a, b) = (link.ideo1, link.ideo2);
            degree[a] += 1;
            degree[b] += 1;

            let e = neighbors[a].entry(b).or_insert((0, 0.0));
            e.0 += 1;
            e.1 += link.frac1;
            let e = neighbors[b].entry(a).or_insert((0, 0.0));
            e.0 += 1;
            e.1 += link.frac2;
        }

        Self { neighbors, degree }
    }

    pub fn degree(&self, idx: IdeoIdx) -> usize {
        self.degree[idx]
    }

    pub fn links_between(&self, a: IdeoIdx, b: IdeoIdx) -> usize {
        self.neighbors[a].get(&b).map_or(0, |e| e.0)
    }

    /// Mean position on `a` of the links joining `a` to `b`.
    pub fn mean_position(&self, a: IdeoIdx, b: IdeoIdx) -> f64 {
        self.neighbors[a]
            .get(&b)
            .map_or(0.0, |&(count, sum)| sum / count as f64)
    }

    pub fn neighbors(&self, idx: IdeoIdx) -> impl Iterator<Item = IdeoIdx> + '_ {
        self.neighbors[idx].keys().copied()
    }
}

struct Placement {
    /// Position in the incoming order, `usize::MAX` for non-members.
    rank: Vec<usize>,
    placed: Vec<bool>,
    out: Order,
}

impl Placement {
    fn new(order: &[IdeoIdx], ideogram_count: usize) -> Self {
        let mut rank = vec![usize::MAX; ideogram_count];
        for (pos, &idx) in order.iter().enumerate() {
            rank[idx] = pos;
        }
        Self {
            rank,
            placed: vec![false; ideogram_count],
            out: Vec::with_capacity(order.len()),
        }
    }

    #[inline]
    fn is_free(&self, idx: IdeoIdx) -> bool {
        self.rank[idx] != usize::MAX && !self.placed[idx]
    }

    fn place(&mut self, idx: IdeoIdx) {
        if self.is_free(idx) {
            self.placed[idx] = true;
            self.out.push(idx);
        }
    }
}

/// Greedy connectivity-driven ordering.
///
/// The pre-order goes first. Then, repeatedly, the unplaced ideogram with
/// the highest degree is placed followed by all of its unplaced neighbors,
/// most-linked first; neighbors with equal link counts go by descending mean
/// link position on the seed. Remaining ties fall back to position in
/// `order`. Ideograms without links keep their relative order at the tail.
///
/// Static flags are ignored: warmup may move any ideogram.
pub fn warmup_order(
    order: &[IdeoIdx],
    preorder: &[IdeoIdx],
    links: &[Link],
    ideogram_count: usize,
    presort: bool,
) -> Order {
    let conn = Connectivity::build(links, ideogram_count);
    let mut p = Placement::new(order, ideogram_count);

    let mut seeds: Order = preorder.to_vec();
    if presort {
        seeds.sort_by_key(|&i| (conn.degree(i), p.rank[i]));
    }
    for idx in seeds {
        p.place(idx);
    }

    loop {
        let seed = order
            .iter()
            .copied()
            .filter(|&i| p.is_free(i) && conn.degree(i) > 0)
            .max_by(|&a, &b| {
                conn.degree(a)
                    .cmp(&conn.degree(b))
                    .then_with(|| p.rank[b].cmp(&p.rank[a]))
            });

        let Some(seed) = seed else { break };
        p.place(seed);

        let mut next: Vec<IdeoIdx> = conn.neighbors(seed).filter(|&n| p.is_free(n)).collect();
        next.sort_by(|&a, &b| neighbor_cmp(&conn, seed, a, b, &p.rank));
        for n in next {
            p.place(n);
        }
    }

    for &idx in order {
        p.place(idx);
    }
    p.out
}

fn neighbor_cmp(
    conn: &Connectivity,
    seed: IdeoIdx,
    a: IdeoIdx,
    b: IdeoIdx,
    rank: &[usize],
) -> Ordering {
    conn.links_between(seed, b)
        .cmp(&conn.links_between(seed, a))
        .then_with(|| {
            conn.mean_position(seed, b)
                .total_cmp(&conn.mean_position(seed, a))
        })
        .then_with(|| rank[a].cmp(&rank[b]))
}
