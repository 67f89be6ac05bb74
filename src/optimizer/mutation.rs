use crate::core_types::{IdeoIdx, Order};
use crate::error::{OrderError, OrderResult};
use fastrand::Rng;

/// Positions in `order` whose occupants may move. Static occupants never
/// change position, so this set is fixed for the lifetime of a round.
pub fn movable_positions(order: &[IdeoIdx], static_mask: &[bool]) -> Vec<usize> {
    order
        .iter()
        .enumerate()
        .filter(|&(_, &idx)| !static_mask.get(idx).copied().unwrap_or(false))
        .map(|(pos, _)| pos)
        .collect()
}

/// Applies `flips` random transpositions between movable positions.
///
/// Flips are drawn independently and applied in sequence, so a later flip
/// may undo an earlier one.
pub fn flip_chromosomes(
    order: &[IdeoIdx],
    flips: usize,
    movable: &[usize],
    rng: &mut Rng,
) -> OrderResult<Order> {
    let mut next = order.to_vec();
    if flips == 0 {
        return Ok(next);
    }

    let m = movable.len();
    if m < 2 {
        return Err(OrderError::InsufficientMovable { movable: m });
    }

    for _ in 0..flips {
        let a = rng.usize(0..m);
        let mut b = rng.usize(0..m - 1);
        if b >= a {
            b += 1;
        }
        next.swap(movable[a], movable[b]);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_positions_excluded() {
        let order = vec![4, 0, 3, 1];
        let mut mask = vec![false; 5];
        mask[3] = true;
        assert_eq!(movable_positions(&order, &mask), vec![0, 1, 3]);
    }

    #[test]
    fn test_flips_preserve_permutation() {
        let order: Vec<usize> = (0..10).collect();
        let movable: Vec<usize> = (0..10).collect();
        let mut rng = Rng::with_seed(7);
        let next = flip_chromosomes(&order, 25, &movable, &mut rng).unwrap();
        let mut sorted = next.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, order);
    }

    #[test]
    fn test_single_flip_is_a_transposition() {
        let order: Vec<usize> = (0..6).collect();
        let movable: Vec<usize> = (0..6).collect();
        let mut rng = Rng::with_seed(11);
        let next = flip_chromosomes(&order, 1, &movable, &mut rng).unwrap();
        let moved = order.iter().zip(&next).filter(|(a, b)| a != b).count();
        assert_eq!(moved, 2);
    }

    #[test]
    fn test_insufficient_movable() {
        let mut rng = Rng::with_seed(1);
        let res = flip_chromosomes(&[0, 1, 2], 3, &[1], &mut rng);
        assert!(matches!(
            res,
            Err(OrderError::InsufficientMovable { movable: 1 })
        ));
        // Zero flips never needs a partner.
        assert!(flip_chromosomes(&[0, 1, 2], 0, &[], &mut rng).is_ok());
    }
}
