//! Pass-once scoring

use super::obstacle::Obstacle;

/// Mark every obstacle whose centre has moved behind `player_x` as passed.
///
/// Each obstacle is credited at most once; returns the number newly passed.
pub fn update_scoring(player_x: f32, obstacles: &mut [Obstacle]) -> u32 {
    let mut newly_passed = 0;
    for obstacle in obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.center_x() < player_x {
            obstacle.passed = true;
            newly_passed += 1;
        }
    }
    newly_passed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_once() {
        // centre at 140 + 34 = 174, not behind 140 yet
        let mut obstacles = vec![Obstacle::new(1, 140.0, 300.0, 130.0, 68.0)];
        assert_eq!(update_scoring(140.0, &mut obstacles), 0);
        assert!(!obstacles[0].passed);

        // centre exactly at the kite is not behind it
        obstacles[0].x = 106.0;
        assert_eq!(update_scoring(140.0, &mut obstacles), 0);

        obstacles[0].x = 105.9;
        assert_eq!(update_scoring(140.0, &mut obstacles), 1);
        assert!(obstacles[0].passed);

        // Never again, however far it travels
        for step in 0..100 {
            obstacles[0].x -= step as f32;
            assert_eq!(update_scoring(140.0, &mut obstacles), 0);
        }
    }

    #[test]
    fn test_multiple_in_one_step() {
        let mut obstacles = vec![
            Obstacle::new(1, 0.0, 300.0, 130.0, 68.0),
            Obstacle::new(2, 50.0, 300.0, 130.0, 68.0),
            Obstacle::new(3, 300.0, 300.0, 130.0, 68.0),
        ];
        assert_eq!(update_scoring(140.0, &mut obstacles), 2);
        assert!(obstacles[0].passed && obstacles[1].passed && !obstacles[2].passed);
    }
}
