//! Turns selection directives into the concrete set of ideograms to order,
//! their starting order, and the static/movable partition.
//!
//! All regexes are compiled once here and matched against the karyotype's
//! names; everything downstream works with plain index sets.

use crate::config::SelectionArgs;
use crate::core_types::{IdeoIdx, Karyotype, Link, Order};
use crate::error::{OrderError, OrderResult};
use crate::loader;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Starting order of the shuffled ideograms.
    pub order: Order,
    /// Ideograms explicitly placed by init-order directives, in that order.
    pub preorder: Order,
    /// Indexed by `IdeoIdx`; `true` for ideograms that never move under annealing.
    pub static_mask: Vec<bool>,
}

impl Selection {
    pub fn is_static(&self, idx: IdeoIdx) -> bool {
        self.static_mask.get(idx).copied().unwrap_or(false)
    }

    pub fn static_count(&self) -> usize {
        self.order.iter().filter(|&&i| self.is_static(i)).count()
    }
}

pub fn resolve(
    karyotype: &Karyotype,
    links: &[Link],
    args: &SelectionArgs,
) -> OrderResult<Selection> {
    let file_names = match &args.shuffle_file {
        Some(path) => loader::read_name_list(path)?,
        None => Vec::new(),
    };
    resolve_with_names(karyotype, links, args, &file_names)
}

/// Same as [`resolve`], with the contents of `shuffle_file` already read.
pub fn resolve_with_names(
    karyotype: &Karyotype,
    links: &[Link],
    args: &SelectionArgs,
    file_names: &[String],
) -> OrderResult<Selection> {
    let linked = linked_ideograms(karyotype, links);

    let selected = if args.has_shuffle_directive() {
        let patterns = compile_patterns(&args.shuffle_regex)?;
        let mut wanted: HashSet<IdeoIdx> = HashSet::new();
        wanted.extend(lookup_names(karyotype, file_names));
        wanted.extend(lookup_names(karyotype, &args.shuffle_list));
        wanted.extend(matching(karyotype, &linked, &patterns));

        let selected: Order = linked.iter().copied().filter(|i| wanted.contains(i)).collect();
        debug!(
            "   Selection directives kept {} of {} linked ideograms",
            selected.len(),
            linked.len()
        );
        selected
    } else {
        linked
    };

    if selected.is_empty() {
        return Err(OrderError::Config(
            "No ideograms selected: none of the requested ideograms carry links".to_string(),
        ));
    }

    let mut preorder_set: HashSet<IdeoIdx> = HashSet::new();

    let init_patterns = compile_patterns(&args.init_order_regex)?;
    let mut order = selected;
    if !init_patterns.is_empty() {
        let leaders: Vec<IdeoIdx> = init_patterns
            .iter()
            .flat_map(|re| {
                order
                    .iter()
                    .copied()
                    .filter(|&i| re.is_match(karyotype.name(i)))
                    .collect::<Vec<_>>()
            })
            .collect();
        preorder_set.extend(leaders.iter().copied());
        order = lead_with(&order, leaders);
    }

    if !args.init_order.is_empty() {
        let leaders = lookup_names(karyotype, &args.init_order);
        let members: HashSet<IdeoIdx> = order.iter().copied().collect();
        preorder_set.extend(leaders.iter().copied().filter(|i| members.contains(i)));
        order = lead_with(&order, leaders);
    }

    let preorder: Order = order
        .iter()
        .copied()
        .filter(|i| preorder_set.contains(i))
        .collect();

    let static_patterns = compile_patterns(&args.static_regex)?;
    let mut static_mask = vec![false; karyotype.len()];
    for idx in matching(karyotype, &order, &static_patterns) {
        static_mask[idx] = true;
    }
    for idx in lookup_names(karyotype, &args.static_list) {
        static_mask[idx] = true;
    }

    let selection = Selection {
        order,
        preorder,
        static_mask,
    };
    info!(
        "🧬 Ordering {} ideograms ({} static)",
        selection.order.len(),
        selection.static_count()
    );
    Ok(selection)
}

/// Ideograms touched by at least one link, in karyotype order.
pub fn linked_ideograms(karyotype: &Karyotype, links: &[Link]) -> Order {
    let mut seen = vec![false; karyotype.len()];
    for link in links {
        seen[link.ideo1] = true;
        seen[link.ideo2] = true;
    }
    (0..karyotype.len()).filter(|&i| seen[i]).collect()
}

pub fn compile_patterns(patterns: &[String]) -> OrderResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(OrderError::from)
        })
        .collect()
}

fn matching<'a>(
    karyotype: &'a Karyotype,
    candidates: &'a [IdeoIdx],
    patterns: &'a [Regex],
) -> impl Iterator<Item = IdeoIdx> + 'a {
    candidates
        .iter()
        .copied()
        .filter(move |&i| patterns.iter().any(|re| re.is_match(karyotype.name(i))))
}

fn lookup_names(karyotype: &Karyotype, names: &[String]) -> Vec<IdeoIdx> {
    names
        .iter()
        .filter_map(|n| {
            let idx = karyotype.index_of(n.trim());
            if idx.is_none() {
                debug!("   Ignoring unknown ideogram '{}'", n);
            }
            idx
        })
        .collect()
}

/// Moves `leaders` (restricted to members of `order`, first occurrence wins)
/// to the front, keeping everything else in its prior relative order.
pub fn lead_with<I>(order: &[IdeoIdx], leaders: I) -> Order
where
    I: IntoIterator<Item = IdeoIdx>,
{
    let members: HashSet<IdeoIdx> = order.iter().copied().collect();
    let mut placed: HashSet<IdeoIdx> = HashSet::with_capacity(order.len());
    let mut out = Vec::with_capacity(order.len());

    for idx in leaders {
        if members.contains(&idx) && placed.insert(idx) {
            out.push(idx);
        }
    }
    for &idx in order {
        if placed.insert(idx) {
            out.push(idx);
        }
    }
    out
}
