//! Move planning
//!
//! Works out which records get which rank when the row at `index` moves one
//! slot. Pure: the caller applies the swap and issues the writes.

use crate::config::RankStrategy;
use crate::error::{ListError, ListResult};
use crate::view::OrderedView;
use shared::Collection;

/// Direction of a one-slot move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Up, towards index 0
    TowardStart,
    /// Down, towards the last index
    TowardEnd,
}

/// New rank for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankAssignment {
    pub id: String,
    pub rank: i64,
}

/// A validated move and the writes it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub index: usize,
    pub target: usize,
    /// Moving record first, then its neighbour, then (contiguous strategy
    /// only) every other record whose rank changes
    pub assignments: Vec<RankAssignment>,
}

impl MovePlan {
    pub fn rank_of(&self, id: &str) -> Option<i64> {
        self.assignments
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.rank)
    }
}

/// Target index of a move, or `None` at the boundary
pub fn target_index(index: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::TowardStart => index.checked_sub(1),
        Direction::TowardEnd => (index + 1 < len).then_some(index + 1),
    }
}

/// Plan moving the record at `index` one slot in `direction`
///
/// `Ok(None)` means the record already sits at the boundary and nothing
/// should happen.
pub fn plan_move<T: Collection>(
    view: &OrderedView<T>,
    index: usize,
    direction: Direction,
    strategy: RankStrategy,
) -> ListResult<Option<MovePlan>> {
    let len = view.len();
    if index >= len {
        return Err(ListError::InvalidIndex { index, len });
    }
    let Some(target) = target_index(index, len, direction) else {
        return Ok(None);
    };

    let items = view.items();
    let moving = &items[index];
    let neighbour = &items[target];

    let assignments = match strategy {
        RankStrategy::SwapPair => {
            let (rank_a, rank_b) = (moving.rank(), neighbour.rank());
            let (new_moving, new_neighbour) = if rank_a != rank_b {
                (rank_b, rank_a)
            } else {
                (target as i64, index as i64)
            };
            vec![
                RankAssignment {
                    id: moving.id().to_string(),
                    rank: new_moving,
                },
                RankAssignment {
                    id: neighbour.id().to_string(),
                    rank: new_neighbour,
                },
            ]
        }
        RankStrategy::Contiguous => {
            let mut assignments = vec![
                RankAssignment {
                    id: moving.id().to_string(),
                    rank: target as i64,
                },
                RankAssignment {
                    id: neighbour.id().to_string(),
                    rank: index as i64,
                },
            ];
            assignments.extend(
                items
                    .iter()
                    .enumerate()
                    .filter(|(i, item)| *i != index && *i != target && item.rank() != *i as i64)
                    .map(|(i, item)| RankAssignment {
                        id: item.id().to_string(),
                        rank: i as i64,
                    }),
            );
            assignments
        }
    };

    Ok(Some(MovePlan {
        index,
        target,
        assignments,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Car;

    fn view(ranks: &[(&str, i64)]) -> OrderedView<Car> {
        OrderedView::from_records(
            ranks
                .iter()
                .map(|(id, rank)| Car::new(*id).with_rank(*rank))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_boundaries_are_noops() {
        let v = view(&[("a", 1), ("b", 2), ("c", 3)]);
        let none = plan_move(&v, 0, Direction::TowardStart, RankStrategy::SwapPair).unwrap();
        assert!(none.is_none());
        let none = plan_move(&v, 2, Direction::TowardEnd, RankStrategy::SwapPair).unwrap();
        assert!(none.is_none());

        let single = view(&[("only", 0)]);
        for dir in [Direction::TowardStart, Direction::TowardEnd] {
            assert!(plan_move(&single, 0, dir, RankStrategy::Contiguous).unwrap().is_none());
        }
    }

    #[test]
    fn test_out_of_range() {
        let v = view(&[("a", 1)]);
        let err = plan_move(&v, 1, Direction::TowardStart, RankStrategy::SwapPair).unwrap_err();
        assert!(matches!(err, ListError::InvalidIndex { index: 1, len: 1 }));

        let empty: OrderedView<Car> = OrderedView::default();
        assert!(plan_move(&empty, 0, Direction::TowardEnd, RankStrategy::SwapPair).is_err());
    }

    #[test]
    fn test_distinct_ranks_are_swapped() {
        let v = view(&[("a", 1), ("b", 2), ("c", 3)]);
        let plan = plan_move(&v, 1, Direction::TowardStart, RankStrategy::SwapPair)
            .unwrap()
            .unwrap();

        assert_eq!(plan.index, 1);
        assert_eq!(plan.target, 0);
        assert_eq!(plan.rank_of("b"), Some(1));
        assert_eq!(plan.rank_of("a"), Some(2));
        assert_eq!(plan.rank_of("c"), None);
        assert_eq!(plan.assignments.len(), 2);
    }

    #[test]
    fn test_tied_ranks_fall_back_to_indices() {
        let v = view(&[("a", 0), ("b", 0), ("c", 0)]);
        let plan = plan_move(&v, 1, Direction::TowardStart, RankStrategy::SwapPair)
            .unwrap()
            .unwrap();

        assert_eq!(plan.rank_of("b"), Some(0));
        assert_eq!(plan.rank_of("a"), Some(1));
    }

    #[test]
    fn test_tied_ranks_moving_down() {
        let v = view(&[("a", 5), ("b", 5), ("c", 5)]);
        let plan = plan_move(&v, 1, Direction::TowardEnd, RankStrategy::SwapPair)
            .unwrap()
            .unwrap();

        assert_eq!(plan.target, 2);
        assert_eq!(plan.rank_of("b"), Some(2));
        assert_eq!(plan.rank_of("c"), Some(1));
    }

    #[test]
    fn test_contiguous_renumbers_whole_collection() {
        let v = view(&[("a", 0), ("b", 0), ("c", 0), ("d", 0), ("e", 0)]);
        let plan = plan_move(&v, 2, Direction::TowardEnd, RankStrategy::Contiguous)
            .unwrap()
            .unwrap();

        // displayed order after the swap: a b d c e
        assert_eq!(plan.rank_of("a"), None); // already 0
        assert_eq!(plan.rank_of("b"), Some(1));
        assert_eq!(plan.rank_of("d"), Some(2));
        assert_eq!(plan.rank_of("c"), Some(3));
        assert_eq!(plan.rank_of("e"), Some(4));
        assert_eq!(plan.assignments[0].id, "c");
        assert_eq!(plan.assignments[1].id, "d");
    }

    #[test]
    fn test_contiguous_skips_records_already_in_place() {
        let v = view(&[("a", 0), ("b", 1), ("c", 2)]);
        let plan = plan_move(&v, 0, Direction::TowardEnd, RankStrategy::Contiguous)
            .unwrap()
            .unwrap();

        assert_eq!(plan.assignments.len(), 2);
        assert_eq!(plan.rank_of("a"), Some(1));
        assert_eq!(plan.rank_of("b"), Some(0));
    }
}
