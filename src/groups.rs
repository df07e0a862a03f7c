//! Collision-group bookkeeping.
//!
//! Parts of one figure must never collide with each other while still
//! colliding with other figures, boxes and the floor. ncollide offers 30
//! collision groups: the last one is reserved for scenery and the other
//! 29 are handed out to figures in a cycle.

use ncollide::pipeline::CollisionGroups;

/// Group shared by the floor and the boxes.
pub const SCENERY_GROUP: usize = 29;

/// Number of group ids available to figures.
pub const FIGURE_GROUPS: usize = SCENERY_GROUP;

/// Hands out self-collision group ids for figures.
pub struct GroupCycle {
    next: usize,
}

impl GroupCycle {
    pub fn new() -> GroupCycle {
        GroupCycle { next: 0 }
    }

    /// Reserves a group id for one figure. After 29 figures the ids wrap
    /// around and the oldest figures start sharing their filter.
    pub fn reserve(&mut self) -> usize {
        let id = self.next;
        self.next = (self.next + 1) % FIGURE_GROUPS;
        id
    }
}

impl Default for GroupCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups for the parts of the figure owning `id`: members of the figure
/// group which also blacklist it, so intra-figure contacts are filtered
/// while contacts with every other group stay enabled.
pub fn figure_groups(id: usize) -> CollisionGroups {
    let mut groups = CollisionGroups::new();
    groups.set_membership(&[id]);
    groups.set_blacklist(&[id]);
    groups
}

/// Groups for the floor and the boxes: plain members of the scenery group.
pub fn scenery_groups() -> CollisionGroups {
    let mut groups = CollisionGroups::new();
    groups.set_membership(&[SCENERY_GROUP]);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_cycle_through_the_non_scenery_groups() {
        let mut cycle = GroupCycle::new();

        for expected in 0..FIGURE_GROUPS {
            assert_eq!(cycle.reserve(), expected);
        }

        assert_eq!(cycle.reserve(), 0);
    }

    #[test]
    fn figure_ids_never_reach_the_scenery_group() {
        let mut cycle = GroupCycle::new();

        for _ in 0..100 {
            assert_ne!(cycle.reserve(), SCENERY_GROUP);
        }
    }

    #[test]
    fn same_figure_is_filtered_but_everything_else_interacts() {
        let a = figure_groups(3);
        let a_again = figure_groups(3);
        let b = figure_groups(4);
        let scenery = scenery_groups();

        assert!(!a.can_interact_with_groups(&a_again));
        assert!(a.can_interact_with_groups(&b));
        assert!(a.can_interact_with_groups(&scenery));
        assert!(scenery.can_interact_with_groups(&scenery));
    }
}
