//! Collision detection between the kite and the world
//!
//! Everything is axis-aligned. All comparisons are strict, so boxes that
//! merely touch (e.g. the kite's bottom exactly on a gap's bottom edge) do
//! not collide.

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned box in world units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Strict horizontal overlap with the span `[left, right]`
    #[inline]
    pub fn overlaps_horizontally(&self, left: f32, right: f32) -> bool {
        self.right > left && self.left < right
    }
}

/// Horizontal extent and gap of one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBounds {
    pub left: f32,
    pub right: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

/// What the kite ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Top of the kite went above the world
    Ceiling,
    /// Bottom of the kite went below the world
    Floor,
    /// Kite overlapped an obstacle outside its gap
    Obstacle { id: u32 },
}

/// Whether the box leaves the vertical extent `[0, world_height]`
#[inline]
pub fn breaches_world(player: &Aabb, world_height: f32) -> Option<Collision> {
    if player.top < 0.0 {
        Some(Collision::Ceiling)
    } else if player.bottom > world_height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Whether the box hits the solid part of an obstacle
#[inline]
pub fn hits_obstacle(player: &Aabb, obstacle: &ObstacleBounds) -> bool {
    player.overlaps_horizontally(obstacle.left, obstacle.right)
        && (player.top < obstacle.gap_top || player.bottom > obstacle.gap_bottom)
}

/// First collision for this frame, world bounds checked before obstacles
pub fn find_collision(
    player: &Aabb,
    obstacles: &[Obstacle],
    world_height: f32,
) -> Option<Collision> {
    if let Some(hit) = breaches_world(player, world_height) {
        return Some(hit);
    }
    obstacles
        .iter()
        .find(|o| hits_obstacle(player, &o.bounds()))
        .map(|o| Collision::Obstacle { id: o.id })
}

/// True if the kite collides with the world bounds or any obstacle
pub fn check_collision(player: &Aabb, obstacles: &[Obstacle], world_height: f32) -> bool {
    find_collision(player, obstacles, world_height).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WORLD_HEIGHT;

    fn kite_at(x: f32, y: f32) -> Aabb {
        Aabb {
            left: x - 28.0,
            right: x + 28.0,
            top: y - 21.0,
            bottom: y + 21.0,
        }
    }

    fn obstacle(id: u32, x: f32, gap_top: f32) -> Obstacle {
        Obstacle::new(id, x, gap_top, 130.0, 68.0)
    }

    #[test]
    fn test_world_bounds() {
        // Top of the box just above 0
        let mut b = kite_at(140.0, 21.0);
        b.top = -0.001;
        assert_eq!(find_collision(&b, &[], WORLD_HEIGHT), Some(Collision::Ceiling));

        let b = kite_at(140.0, 700.0);
        assert_eq!(find_collision(&b, &[], WORLD_HEIGHT), Some(Collision::Floor));

        // Exactly touching either edge is fine
        let b = kite_at(140.0, 21.0);
        assert!(!check_collision(&b, &[], WORLD_HEIGHT));
        let b = kite_at(140.0, WORLD_HEIGHT - 21.0);
        assert!(!check_collision(&b, &[], WORLD_HEIGHT));
    }

    #[test]
    fn test_ceiling_wins_regardless_of_obstacles() {
        let b = kite_at(140.0, -0.5);
        let obstacles = [obstacle(1, 110.0, 300.0), obstacle(2, 400.0, 60.0)];
        assert_eq!(
            find_collision(&b, &obstacles, WORLD_HEIGHT),
            Some(Collision::Ceiling)
        );
    }

    #[test]
    fn test_inside_gap_is_safe() {
        // Gap spans [300, 430]; kite spans [339, 381]
        let b = kite_at(140.0, 360.0);
        let obstacles = [obstacle(1, 140.0, 300.0)];
        assert!(!check_collision(&b, &obstacles, WORLD_HEIGHT));
    }

    #[test]
    fn test_outside_gap_hits() {
        let obstacles = [obstacle(7, 140.0, 300.0)];

        let above = kite_at(140.0, 310.0);
        assert_eq!(
            find_collision(&above, &obstacles, WORLD_HEIGHT),
            Some(Collision::Obstacle { id: 7 })
        );

        let below = kite_at(140.0, 420.0);
        assert!(check_collision(&below, &obstacles, WORLD_HEIGHT));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let obstacles = [obstacle(1, 140.0, 300.0)];

        // bottom == gap_bottom
        let b = kite_at(140.0, 430.0 - 21.0);
        assert_eq!(b.bottom, 430.0);
        assert!(!check_collision(&b, &obstacles, WORLD_HEIGHT));

        // top == gap_top
        let b = kite_at(140.0, 300.0 + 21.0);
        assert!(!check_collision(&b, &obstacles, WORLD_HEIGHT));

        // Horizontally adjacent: kite right edge == obstacle left edge, way outside the gap
        let b = kite_at(140.0, 100.0);
        let adjacent = [obstacle(2, 168.0, 300.0)];
        assert!(!check_collision(&b, &adjacent, WORLD_HEIGHT));

        // kite left edge == obstacle right edge
        let behind = [obstacle(3, 112.0 - 68.0, 300.0)];
        assert!(!check_collision(&b, &behind, WORLD_HEIGHT));
    }

    #[test]
    fn test_no_horizontal_overlap_no_collision() {
        let b = kite_at(140.0, 100.0);
        let obstacles = [obstacle(1, 300.0, 500.0)];
        assert!(!check_collision(&b, &obstacles, WORLD_HEIGHT));
    }
}
