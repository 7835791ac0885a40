//! Position bookkeeping for sibling groups
//!
//! Every operation here is an in-memory transformation over a slice of
//! siblings loaded by the caller. Operations report the indices of the
//! entities whose position changed so the caller writes back only those.
//!
//! Siblings are totally ordered by `position` ascending, then by `id`
//! ascending; entities that were never persisted sort after persisted ones
//! sharing the same position. After every operation in this module the
//! positions of a group form the contiguous range `0..n`, provided they did
//! before.

use crate::entity::Positioned;
use crate::types::EntityId;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn edge(&self) -> &'static str {
        match self {
            Self::Up => "top",
            Self::Down => "bottom",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Reasons an ordering operation refuses to run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// Target has no neighbor in the requested direction
    #[error("Entity {id} cannot move {direction}: it is already at the {} of its group", .direction.edge())]
    AlreadyAtBoundary { id: EntityId, direction: Direction },

    /// Operation needs a stored entity but got a draft
    #[error("Entity has not been persisted yet")]
    NotPersisted,

    /// Append got an entity that already has an identity
    #[error("Entity {id} has already been persisted")]
    AlreadyPersisted { id: EntityId },

    /// Target is not among the given siblings
    #[error("Entity {id} is not part of the sibling group")]
    NotInGroup { id: EntityId },
}

/// Outcome of removing one entity from its group
#[derive(Debug)]
pub struct Removal<T> {
    /// The entity taken out of the group
    pub removed: T,
    /// Indices (into the remaining siblings) whose position changed
    pub changed: Vec<usize>,
}

/// Total order used for display and neighbor lookup
pub fn compare<T: Positioned>(a: &T, b: &T) -> Ordering {
    a.position()
        .cmp(&b.position())
        .then_with(|| match (a.id(), b.id()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Sorts siblings into display order
pub fn sort_siblings<T: Positioned>(siblings: &mut [T]) {
    siblings.sort_by(compare);
}

/// Returns true when positions are exactly `0..len` with no duplicates
pub fn is_contiguous<T: Positioned>(siblings: &[T]) -> bool {
    let mut positions: Vec<u32> = siblings.iter().map(|e| e.position()).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(index, position)| *position as usize == index)
}

/// Places a new entity after all of its siblings
///
/// The siblings themselves are not touched.
pub fn append<T: Positioned>(siblings: &[T], entity: &mut T) -> Result<(), OrderingError> {
    if let Some(id) = entity.id() {
        return Err(OrderingError::AlreadyPersisted { id });
    }

    entity.set_position(siblings.len() as u32);
    Ok(())
}

/// Swaps the target with its predecessor in display order
///
/// Returns the indices of the entities whose position changed: the target
/// and its neighbor, plus any sibling renumbered because positions were
/// tied.
pub fn move_up<T: Positioned>(
    siblings: &mut [T],
    target: EntityId,
) -> Result<Vec<usize>, OrderingError> {
    swap_with_neighbor(siblings, target, Direction::Up)
}

/// Swaps the target with its successor in display order
///
/// Returns the same indices as [`move_up`].
pub fn move_down<T: Positioned>(
    siblings: &mut [T],
    target: EntityId,
) -> Result<Vec<usize>, OrderingError> {
    swap_with_neighbor(siblings, target, Direction::Down)
}

fn swap_with_neighbor<T: Positioned>(
    siblings: &mut [T],
    target: EntityId,
    direction: Direction,
) -> Result<Vec<usize>, OrderingError> {
    let index = index_of(siblings, target)?;
    let wanted = match direction {
        Direction::Up => Ordering::Less,
        Direction::Down => Ordering::Greater,
    };

    let candidates = siblings
        .iter()
        .enumerate()
        .filter(|(_, e)| compare(*e, &siblings[index]) == wanted);
    let neighbor = match direction {
        Direction::Up => candidates.max_by(|(_, a), (_, b)| compare(*a, *b)),
        Direction::Down => candidates.min_by(|(_, a), (_, b)| compare(*a, *b)),
    }
    .map(|(i, _)| i)
    .ok_or(OrderingError::AlreadyAtBoundary {
        id: target,
        direction,
    })?;

    // Tied positions cannot be swapped, so number the group 0..n first
    let mut changed = if siblings[neighbor].position() == siblings[index].position() {
        renumber_in_place(siblings)
    } else {
        Vec::new()
    };

    let position = siblings[index].position();
    let neighbor_position = siblings[neighbor].position();
    siblings[index].set_position(neighbor_position);
    siblings[neighbor].set_position(position);

    for i in [index, neighbor] {
        if !changed.contains(&i) {
            changed.push(i);
        }
    }
    Ok(changed)
}

/// Rewrites positions to display rank without reordering the slice
fn renumber_in_place<T: Positioned>(siblings: &mut [T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..siblings.len()).collect();
    order.sort_by(|a, b| compare(&siblings[*a], &siblings[*b]));

    let mut changed = Vec::new();
    for (rank, index) in order.into_iter().enumerate() {
        let position = rank as u32;
        if siblings[index].position() != position {
            siblings[index].set_position(position);
            changed.push(index);
        }
    }
    changed
}

/// Takes the target out of its group and closes the gap it leaves
///
/// The remaining siblings are left in display order; every sibling that
/// followed the removed one moves up by one.
pub fn remove<T: Positioned>(
    siblings: &mut Vec<T>,
    target: EntityId,
) -> Result<Removal<T>, OrderingError> {
    sort_siblings(siblings);
    let index = index_of(siblings, target)?;
    let removed = siblings.remove(index);
    let changed = resequence(siblings);

    Ok(Removal { removed, changed })
}

/// Copies the target's content into a new draft appended to the group
pub fn duplicate<T: Positioned + Clone>(siblings: &[T], target: &T) -> Result<T, OrderingError> {
    if target.id().is_none() {
        return Err(OrderingError::NotPersisted);
    }

    let mut copy = target.clone();
    copy.set_id(None);
    append(siblings, &mut copy)?;
    Ok(copy)
}

/// Rewrites one group's positions to `0..n` in display order
///
/// Sorts the slice into display order and returns the indices whose
/// position changed.
pub fn resequence<T: Positioned>(siblings: &mut [T]) -> Vec<usize> {
    sort_siblings(siblings);

    let mut changed = Vec::new();
    for (index, entity) in siblings.iter_mut().enumerate() {
        let position = index as u32;
        if entity.position() != position {
            entity.set_position(position);
            changed.push(index);
        }
    }
    changed
}

/// Rewrites positions of every sibling group found in `entities`
///
/// Groups are formed by parent reference. The slice keeps its order; the
/// returned indices (ascending) point at entities whose position changed.
pub fn resequence_all<T: Positioned>(entities: &mut [T]) -> Vec<usize> {
    let mut groups: BTreeMap<Option<EntityId>, Vec<usize>> = BTreeMap::new();
    for (index, entity) in entities.iter().enumerate() {
        groups.entry(entity.parent()).or_default().push(index);
    }

    let mut changed = Vec::new();
    for indices in groups.values_mut() {
        indices.sort_by(|a, b| compare(&entities[*a], &entities[*b]));

        for (rank, &index) in indices.iter().enumerate() {
            let position = rank as u32;
            if entities[index].position() != position {
                entities[index].set_position(position);
                changed.push(index);
            }
        }
    }

    changed.sort_unstable();
    changed
}

fn index_of<T: Positioned>(siblings: &[T], target: EntityId) -> Result<usize, OrderingError> {
    siblings
        .iter()
        .position(|e| e.id() == Some(target))
        .ok_or(OrderingError::NotInGroup { id: target })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Option<EntityId>,
        position: u32,
        parent: Option<EntityId>,
    }

    impl Positioned for Item {
        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn set_id(&mut self, id: Option<EntityId>) {
            self.id = id;
        }

        fn position(&self) -> u32 {
            self.position
        }

        fn set_position(&mut self, position: u32) {
            self.position = position;
        }

        fn parent(&self) -> Option<EntityId> {
            self.parent
        }
    }

    fn item(id: i64, position: u32) -> Item {
        Item {
            id: Some(EntityId::new(id)),
            position,
            parent: None,
        }
    }

    fn child(id: i64, position: u32, parent: i64) -> Item {
        Item {
            id: Some(EntityId::new(id)),
            position,
            parent: Some(EntityId::new(parent)),
        }
    }

    fn group(count: i64) -> Vec<Item> {
        (1..=count).map(|id| item(id, (id - 1) as u32)).collect()
    }

    fn position_of(siblings: &[Item], id: i64) -> u32 {
        siblings
            .iter()
            .find(|e| e.id == Some(EntityId::new(id)))
            .map(|e| e.position)
            .expect("item present")
    }

    #[test]
    fn test_append_assigns_len() {
        let siblings = group(3);
        let mut draft = Item {
            id: None,
            position: 99,
            parent: None,
        };

        append(&siblings, &mut draft).unwrap();
        assert_eq!(draft.position, 3);
    }

    #[test]
    fn test_append_to_empty_group() {
        let mut draft = Item {
            id: None,
            position: 5,
            parent: None,
        };

        append::<Item>(&[], &mut draft).unwrap();
        assert_eq!(draft.position, 0);
    }

    #[test]
    fn test_append_rejects_persisted() {
        let siblings = group(2);
        let mut stored = item(10, 0);

        let result = append(&siblings, &mut stored);
        assert_eq!(
            result,
            Err(OrderingError::AlreadyPersisted {
                id: EntityId::new(10)
            })
        );
    }

    #[test]
    fn test_move_up_swaps_with_predecessor() {
        let mut siblings = group(3);

        let changed = move_up(&mut siblings, EntityId::new(3)).unwrap();

        assert_eq!(changed, [2, 1]);
        assert_eq!(position_of(&siblings, 1), 0);
        assert_eq!(position_of(&siblings, 3), 1);
        assert_eq!(position_of(&siblings, 2), 2);
        assert!(is_contiguous(&siblings));
    }

    #[test]
    fn test_move_up_at_top_fails_without_changes() {
        let mut siblings = group(3);
        let before = siblings.clone();

        let result = move_up(&mut siblings, EntityId::new(1));

        assert_eq!(
            result,
            Err(OrderingError::AlreadyAtBoundary {
                id: EntityId::new(1),
                direction: Direction::Up,
            })
        );
        assert_eq!(siblings, before);
    }

    #[test]
    fn test_move_down_at_bottom_fails_without_changes() {
        let mut siblings = group(3);
        let before = siblings.clone();

        let result = move_down(&mut siblings, EntityId::new(3));

        assert!(matches!(
            result,
            Err(OrderingError::AlreadyAtBoundary {
                direction: Direction::Down,
                ..
            })
        ));
        assert_eq!(siblings, before);
    }

    #[test]
    fn test_move_single_entity_fails_both_ways() {
        let mut siblings = group(1);
        assert!(move_up(&mut siblings, EntityId::new(1)).is_err());
        assert!(move_down(&mut siblings, EntityId::new(1)).is_err());
        assert_eq!(siblings[0].position, 0);
    }

    #[test]
    fn test_move_up_then_down_restores_assignment() {
        let mut siblings = group(5);
        let before = siblings.clone();

        move_up(&mut siblings, EntityId::new(4)).unwrap();
        move_down(&mut siblings, EntityId::new(4)).unwrap();

        assert_eq!(siblings, before);
    }

    #[test]
    fn test_move_changes_exactly_two_positions() {
        let mut siblings = group(6);
        let before = siblings.clone();

        move_down(&mut siblings, EntityId::new(2)).unwrap();

        let differing = siblings
            .iter()
            .zip(before.iter())
            .filter(|(a, b)| a.position != b.position)
            .count();
        assert_eq!(differing, 2);
        assert!(is_contiguous(&siblings));
    }

    #[test]
    fn test_move_works_on_unsorted_input() {
        let mut siblings = vec![item(7, 2), item(3, 0), item(9, 1)];

        move_up(&mut siblings, EntityId::new(7)).unwrap();

        assert_eq!(position_of(&siblings, 3), 0);
        assert_eq!(position_of(&siblings, 7), 1);
        assert_eq!(position_of(&siblings, 9), 2);
    }

    #[test]
    fn test_move_up_with_tied_positions_passes_display_predecessor_only() {
        // Display order is A(1), B(2), C(3); B and C share position 1
        let mut siblings = vec![item(1, 0), item(2, 1), item(3, 1)];

        let mut changed = move_up(&mut siblings, EntityId::new(3)).unwrap();

        assert_eq!(position_of(&siblings, 1), 0);
        assert_eq!(position_of(&siblings, 3), 1);
        assert_eq!(position_of(&siblings, 2), 2);
        assert!(is_contiguous(&siblings));
        changed.sort_unstable();
        assert_eq!(changed, [1, 2]);
    }

    #[test]
    fn test_move_with_tie_is_not_a_boundary() {
        let mut siblings = vec![item(1, 0), item(2, 0)];
        move_up(&mut siblings, EntityId::new(2)).unwrap();
        assert_eq!(position_of(&siblings, 2), 0);
        assert_eq!(position_of(&siblings, 1), 1);

        let mut siblings = vec![item(1, 0), item(2, 0)];
        move_down(&mut siblings, EntityId::new(1)).unwrap();
        assert_eq!(position_of(&siblings, 2), 0);
        assert_eq!(position_of(&siblings, 1), 1);

        // First in display order is still a real boundary
        let mut siblings = vec![item(1, 0), item(2, 0)];
        assert!(matches!(
            move_up(&mut siblings, EntityId::new(1)),
            Err(OrderingError::AlreadyAtBoundary { .. })
        ));
        assert_eq!(siblings, vec![item(1, 0), item(2, 0)]);
    }

    #[test]
    fn test_move_unknown_target() {
        let mut siblings = group(2);
        assert_eq!(
            move_up(&mut siblings, EntityId::new(42)),
            Err(OrderingError::NotInGroup {
                id: EntityId::new(42)
            })
        );
    }

    #[test]
    fn test_remove_shifts_followers_only() {
        let mut siblings = group(5);

        let removal = remove(&mut siblings, EntityId::new(3)).unwrap();

        assert_eq!(removal.removed.id, Some(EntityId::new(3)));
        assert_eq!(position_of(&siblings, 1), 0);
        assert_eq!(position_of(&siblings, 2), 1);
        assert_eq!(position_of(&siblings, 4), 2);
        assert_eq!(position_of(&siblings, 5), 3);

        let changed_ids: Vec<_> = removal
            .changed
            .iter()
            .map(|i| siblings[*i].id.unwrap().get())
            .collect();
        assert_eq!(changed_ids, vec![4, 5]);
    }

    #[test]
    fn test_remove_last_changes_nothing_else() {
        let mut siblings = group(3);

        let removal = remove(&mut siblings, EntityId::new(3)).unwrap();

        assert!(removal.changed.is_empty());
        assert_eq!(siblings.len(), 2);
        assert!(is_contiguous(&siblings));
    }

    #[test]
    fn test_remove_unknown_target_keeps_group() {
        let mut siblings = group(2);
        assert!(remove(&mut siblings, EntityId::new(9)).is_err());
        assert_eq!(siblings.len(), 2);
    }

    #[test]
    fn test_duplicate_appends_copy() {
        let siblings = group(3);

        let copy = duplicate(&siblings, &siblings[0]).unwrap();

        assert_eq!(copy.id, None);
        assert_eq!(copy.position, 3);
        assert_eq!(copy.parent, siblings[0].parent);
    }

    #[test]
    fn test_duplicate_rejects_draft() {
        let siblings = group(1);
        let draft = Item {
            id: None,
            position: 0,
            parent: None,
        };
        assert_eq!(
            duplicate(&siblings, &draft),
            Err(OrderingError::NotPersisted)
        );
    }

    #[test]
    fn test_documented_scenario() {
        // A=1, B=2, C=3 at positions 0, 1, 2
        let mut siblings = group(3);

        move_up(&mut siblings, EntityId::new(3)).unwrap();
        assert_eq!(position_of(&siblings, 1), 0);
        assert_eq!(position_of(&siblings, 3), 1);
        assert_eq!(position_of(&siblings, 2), 2);

        remove(&mut siblings, EntityId::new(1)).unwrap();
        assert_eq!(position_of(&siblings, 3), 0);
        assert_eq!(position_of(&siblings, 2), 1);

        let c = siblings
            .iter()
            .find(|e| e.id == Some(EntityId::new(3)))
            .cloned()
            .unwrap();
        let copy = duplicate(&siblings, &c).unwrap();
        assert_eq!(copy.position, 2);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let mut first = vec![item(5, 1), item(2, 1), item(9, 0), item(3, 1)];
        let mut second = vec![item(3, 1), item(9, 0), item(5, 1), item(2, 1)];

        sort_siblings(&mut first);
        sort_siblings(&mut second);

        let ids = |v: &[Item]| v.iter().map(|e| e.id.unwrap().get()).collect::<Vec<_>>();
        assert_eq!(ids(&first), vec![9, 2, 3, 5]);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_drafts_sort_after_persisted() {
        let draft = Item {
            id: None,
            position: 0,
            parent: None,
        };
        assert_eq!(compare(&item(1, 0), &draft), Ordering::Less);
        assert_eq!(compare(&draft, &item(1, 0)), Ordering::Greater);
    }

    #[test]
    fn test_resequence_repairs_gaps_and_duplicates() {
        let mut siblings = vec![item(4, 10), item(1, 3), item(2, 3), item(3, 0)];

        let changed = resequence(&mut siblings);

        let ids: Vec<_> = siblings.iter().map(|e| e.id.unwrap().get()).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
        assert!(is_contiguous(&siblings));
        assert_eq!(changed, vec![1, 2, 3]);
    }

    #[test]
    fn test_resequence_all_handles_each_group() {
        let mut entities = vec![
            child(1, 5, 100),
            child(2, 5, 200),
            child(3, 2, 100),
            child(4, 0, 200),
            child(5, 9, 100),
        ];

        let changed = resequence_all(&mut entities);

        assert_eq!(entities[2].position, 0);
        assert_eq!(entities[0].position, 1);
        assert_eq!(entities[4].position, 2);
        assert_eq!(entities[3].position, 0);
        assert_eq!(entities[1].position, 1);
        assert_eq!(changed, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_resequence_all_leaves_consistent_groups_alone() {
        let mut entities = vec![child(1, 0, 1), child(2, 1, 1), child(3, 0, 2)];
        assert!(resequence_all(&mut entities).is_empty());
    }

    #[test]
    fn test_random_operations_keep_positions_contiguous() {
        let mut siblings: Vec<Item> = Vec::new();
        let mut next_id = 1;
        let mut seed: u64 = 0x5eed;

        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let roll = (seed >> 33) as usize;

            if siblings.is_empty() || roll % 5 == 0 {
                let mut draft = Item {
                    id: None,
                    position: 0,
                    parent: None,
                };
                append(&siblings, &mut draft).unwrap();
                draft.id = Some(EntityId::new(next_id));
                next_id += 1;
                siblings.push(draft);
            } else {
                let target = siblings[roll % siblings.len()].id.unwrap();
                match roll % 4 {
                    0 => {
                        let _ = move_up(&mut siblings, target);
                    }
                    1 => {
                        let _ = move_down(&mut siblings, target);
                    }
                    2 => {
                        remove(&mut siblings, target).unwrap();
                    }
                    _ => {
                        let source = siblings
                            .iter()
                            .find(|e| e.id == Some(target))
                            .cloned()
                            .unwrap();
                        let mut copy = duplicate(&siblings, &source).unwrap();
                        copy.id = Some(EntityId::new(next_id));
                        next_id += 1;
                        siblings.push(copy);
                    }
                }
            }

            assert!(is_contiguous(&siblings));
        }
    }

    #[test]
    fn test_boundary_error_message() {
        let err = OrderingError::AlreadyAtBoundary {
            id: EntityId::new(3),
            direction: Direction::Down,
        };
        let message = err.to_string();
        assert!(message.contains("down"));
        assert!(message.contains("bottom"));
    }
}
