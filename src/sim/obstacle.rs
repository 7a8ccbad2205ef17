//! Scrolling gated obstacles
//!
//! Obstacles spawn past the right edge on a wall-clock interval, scroll
//! left at a constant speed and are culled once fully off-screen. Since
//! spawn x and speed are uniform, spawn order is also decreasing-x order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::ObstacleBounds;
use crate::consts::WORLD_WIDTH;
use crate::tuning::Tuning;

/// A column with a single passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f32,
    /// Top of the gap; fixed at spawn
    pub gap_top: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Set once the obstacle's centre has moved behind the kite
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_top: f32, gap_height: f32, width: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            gap_height,
            width,
            passed: false,
        }
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn bounds(&self) -> ObstacleBounds {
        ObstacleBounds {
            left: self.x,
            right: self.right(),
            gap_top: self.gap_top,
            gap_bottom: self.gap_bottom(),
        }
    }
}

/// Live obstacles of one round, oldest (leftmost) first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    /// Wall-clock time of the last spawn (or of round start)
    pub last_spawn_ms: f64,
    next_id: u32,
}

impl Default for ObstacleStream {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ObstacleStream {
    /// Empty stream whose spawn timer starts at `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            obstacles: Vec::new(),
            last_spawn_ms: now_ms,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Spawn at most one obstacle if the spawn interval has elapsed.
    /// Missed intervals are not caught up. Returns the new obstacle's id.
    pub fn maybe_spawn<R: Rng>(&mut self, now_ms: f64, rng: &mut R, tuning: &Tuning) -> Option<u32> {
        if now_ms - self.last_spawn_ms < tuning.spawn_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let id = self.next_id;
        self.next_id += 1;
        let gap_top = random_gap_top(rng, tuning);
        self.obstacles.push(Obstacle::new(
            id,
            WORLD_WIDTH + tuning.spawn_margin,
            gap_top,
            tuning.gap_height,
            tuning.obstacle_width,
        ));
        log::trace!("Spawned obstacle {id} with gap top {gap_top}");
        Some(id)
    }

    /// Scroll every obstacle left by `speed * delta`
    pub fn advance(&mut self, delta: f32, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed * delta;
        }
    }

    /// Drop obstacles whose right edge is past `-offscreen_margin`.
    /// Order-preserving; returns how many were removed.
    pub fn cull(&mut self, offscreen_margin: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() >= -offscreen_margin);
        before - self.obstacles.len()
    }
}

/// Whole-unit gap top drawn uniformly from `[min_gap_top, max_gap_top]`
fn random_gap_top<R: Rng>(rng: &mut R, tuning: &Tuning) -> f32 {
    let min = tuning.min_gap_top.ceil() as i32;
    let max = (tuning.max_gap_top().floor() as i32).max(min);
    rng.random_range(min..=max) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_geometry() {
        let o = Obstacle::new(1, 520.0, 300.0, 130.0, 68.0);
        assert_eq!(o.gap_bottom(), 430.0);
        assert_eq!(o.right(), 588.0);
        assert_eq!(o.center_x(), 554.0);
        let b = o.bounds();
        assert_eq!((b.left, b.right, b.gap_top, b.gap_bottom), (520.0, 588.0, 300.0, 430.0));
    }

    #[test]
    fn test_spawn_on_interval_only() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut stream = ObstacleStream::new(1000.0);

        assert_eq!(stream.maybe_spawn(2999.0, &mut rng, &tuning), None);
        assert_eq!(stream.maybe_spawn(3000.0, &mut rng, &tuning), Some(1));
        assert_eq!(stream.last_spawn_ms, 3000.0);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.obstacles[0].x, 520.0);

        // Same frame, interval not elapsed again
        assert_eq!(stream.maybe_spawn(3000.0, &mut rng, &tuning), None);
    }

    #[test]
    fn test_default_stream_numbers_from_one() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut stream = ObstacleStream::default();
        assert_eq!(stream.maybe_spawn(2000.0, &mut rng, &tuning), Some(1));
    }

    #[test]
    fn test_no_catch_up_after_long_gap() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut stream = ObstacleStream::new(0.0);

        // Five intervals missed, still exactly one spawn
        assert!(stream.maybe_spawn(10_000.0, &mut rng, &tuning).is_some());
        assert_eq!(stream.len(), 1);
        assert!(stream.maybe_spawn(10_016.0, &mut rng, &tuning).is_none());
    }

    #[test]
    fn test_gap_top_within_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..2000 {
            let top = random_gap_top(&mut rng, &tuning);
            assert!((60.0..=470.0).contains(&top));
            assert_eq!(top.fract(), 0.0);
        }
    }

    #[test]
    fn test_advance_moves_left() {
        let mut stream = ObstacleStream::new(0.0);
        stream.obstacles.push(Obstacle::new(1, 520.0, 300.0, 130.0, 68.0));
        stream.obstacles.push(Obstacle::new(2, 700.0, 200.0, 130.0, 68.0));
        stream.advance(2.0, 1.5);
        assert_eq!(stream.obstacles[0].x, 517.0);
        assert_eq!(stream.obstacles[1].x, 697.0);
    }

    #[test]
    fn test_cull_offscreen_preserves_order() {
        let mut stream = ObstacleStream::new(0.0);
        // right edges: -41 (gone), -40 (kept), 100, 400
        stream.obstacles.push(Obstacle::new(1, -109.0, 300.0, 130.0, 68.0));
        stream.obstacles.push(Obstacle::new(2, -108.0, 300.0, 130.0, 68.0));
        stream.obstacles.push(Obstacle::new(3, 32.0, 300.0, 130.0, 68.0));
        stream.obstacles.push(Obstacle::new(4, 332.0, 300.0, 130.0, 68.0));

        assert_eq!(stream.cull(40.0), 1);
        let ids: Vec<u32> = stream.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(stream.obstacles[1].x, 32.0);
    }
}
