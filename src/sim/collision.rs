//! Collision detection between the bird, obstacle gaps and the boundaries
//!
//! Everything is axis-aligned: the bird is a square hitbox and each obstacle
//! is a full-height column with one open gap.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Bird, Obstacle, Playfield};
use crate::consts::*;

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Bird hitbox at its current position
    pub fn of_bird(bird: &Bird) -> Self {
        Self::new(Vec2::new(bird.x, bird.y), Vec2::splat(BIRD_SIZE))
    }

    /// Strict overlap with the horizontal span `[left, right)`
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }

    /// Vertical span lies entirely within `[top, bottom]`
    #[inline]
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y >= top && self.max.y <= bottom
    }
}

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Obstacle { id: u64 },
    /// Ceiling or floor
    Boundary,
}

/// Bird overlaps the obstacle column outside its gap
pub fn hits_obstacle(bird: &Aabb, obstacle: &Obstacle) -> bool {
    bird.overlaps_x(obstacle.x, obstacle.right())
        && !bird.within_y(obstacle.gap_y, obstacle.gap_bottom())
}

/// Bird is resting against the ceiling or floor.
///
/// Compared on the clamped top edge so a bird pinned by the clamp always
/// registers.
pub fn touches_boundary(bird: &Bird, playfield: &Playfield) -> bool {
    bird.y <= playfield.boundary_top || bird.y >= playfield.max_bird_y()
}

/// All hits this tick, at most one per cause
pub fn detect_hits(bird: &Bird, obstacles: &[Obstacle], playfield: &Playfield) -> Vec<HitCause> {
    let hitbox = Aabb::of_bird(bird);
    let mut hits = Vec::with_capacity(2);

    if let Some(obstacle) = obstacles.iter().find(|o| hits_obstacle(&hitbox, o)) {
        hits.push(HitCause::Obstacle { id: obstacle.id });
    }
    if touches_boundary(bird, playfield) {
        hits.push(HitCause::Boundary);
    }
    hits
}

/// IDs of obstacles whose trailing edge is fully past the bird and that have
/// not been credited yet
pub fn detect_passes(bird: &Bird, obstacles: &[Obstacle], passed: &BTreeSet<u64>) -> Vec<u64> {
    obstacles
        .iter()
        .filter(|o| o.right() < bird.x && !passed.contains(&o.id))
        .map(|o| o.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Playfield, Bird) {
        let field = Playfield::new(400.0, 800.0);
        let bird = Bird::new(&field);
        (field, bird)
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let (field, bird) = setup();
        let obstacle = Obstacle {
            id: 1,
            x: bird.x,
            gap_y: bird.y - 10.0,
        };
        assert!(detect_hits(&bird, &[obstacle], &field).is_empty());
    }

    #[test]
    fn test_bird_above_gap_hits() {
        let (field, bird) = setup();
        let obstacle = Obstacle {
            id: 4,
            x: bird.x + 10.0,
            gap_y: bird.y + 1.0,
        };
        assert_eq!(
            detect_hits(&bird, &[obstacle], &field),
            vec![HitCause::Obstacle { id: 4 }]
        );
    }

    #[test]
    fn test_bird_below_gap_hits() {
        let (field, bird) = setup();
        let obstacle = Obstacle {
            id: 2,
            x: bird.x - 20.0,
            gap_y: bird.y - GAP_HEIGHT + BIRD_SIZE - 1.0,
        };
        assert!(hits_obstacle(&Aabb::of_bird(&bird), &obstacle));
    }

    #[test]
    fn test_no_horizontal_overlap_no_hit() {
        let (_, bird) = setup();
        // Edges touching is not an overlap
        let ahead = Obstacle {
            id: 1,
            x: bird.x + BIRD_SIZE,
            gap_y: 0.0,
        };
        let behind = Obstacle {
            id: 2,
            x: bird.x - OBSTACLE_WIDTH,
            gap_y: 0.0,
        };
        let hitbox = Aabb::of_bird(&bird);
        assert!(!hits_obstacle(&hitbox, &ahead));
        assert!(!hits_obstacle(&hitbox, &behind));
    }

    #[test]
    fn test_one_hit_per_cause() {
        let (field, mut bird) = setup();
        bird.y = field.max_bird_y();
        let obstacles: Vec<Obstacle> = (1..=3)
            .map(|id| Obstacle {
                id,
                x: bird.x,
                gap_y: field.boundary_top,
            })
            .collect();
        let hits = detect_hits(&bird, &obstacles, &field);
        assert_eq!(
            hits,
            vec![HitCause::Obstacle { id: 1 }, HitCause::Boundary]
        );
    }

    #[test]
    fn test_hitbox_serializes_as_vectors() {
        let (_, bird) = setup();
        let hitbox = Aabb::of_bird(&bird);
        let json = serde_json::to_string(&hitbox).unwrap();
        assert!(json.starts_with(r#"{"min":["#));
        let back: Aabb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hitbox);
    }

    #[test]
    fn test_boundary_contact() {
        let (field, mut bird) = setup();
        assert!(!touches_boundary(&bird, &field));
        bird.y = field.boundary_top;
        assert!(touches_boundary(&bird, &field));
        bird.y = field.max_bird_y();
        assert!(touches_boundary(&bird, &field));
    }

    #[test]
    fn test_pass_requires_trailing_edge_past_bird() {
        let (_, bird) = setup();
        let mut passed = BTreeSet::new();
        let level = Obstacle {
            id: 1,
            x: bird.x - OBSTACLE_WIDTH,
            gap_y: 0.0,
        };
        let past = Obstacle {
            id: 2,
            x: bird.x - OBSTACLE_WIDTH - 1.0,
            gap_y: 0.0,
        };
        assert_eq!(detect_passes(&bird, &[level, past], &passed), vec![2]);

        passed.insert(2);
        assert!(detect_passes(&bird, &[level, past], &passed).is_empty());
    }
}
