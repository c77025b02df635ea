//! Bird physics: constant-acceleration 1D motion
//!
//! All quantities are per tick. Position integrates the velocity from the
//! start of the tick, then gravity is added, so a jump moves the bird by the
//! full impulse on the tick it lands.

use super::state::{Bird, Playfield};
use crate::consts::*;

/// Replace the accumulated velocity with the jump impulse
#[inline]
pub fn apply_jump(bird: &mut Bird) {
    bird.velocity = JUMP_IMPULSE;
}

/// One gravity step: `y' = clamp(y + v)`, `v' = v + g`
pub fn step_gravity(bird: &mut Bird, playfield: &Playfield) {
    bird.y = playfield.clamp_bird_y(bird.y + bird.velocity);
    bird.velocity += GRAVITY_ACCEL;
}

/// Idle "breathing" hover around the starting position
pub fn hover(bird: &mut Bird, playfield: &Playfield, time_ticks: u64, enabled: bool) {
    let offset = if enabled {
        HOVER_AMPLITUDE * (time_ticks as f32 * HOVER_RATE).sin()
    } else {
        0.0
    };
    bird.y = playfield.clamp_bird_y(playfield.initial_bird_y() + offset);
    bird.velocity = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(400.0, 800.0)
    }

    #[test]
    fn test_gravity_accumulates() {
        let field = field();
        let mut bird = Bird::new(&field);
        let y0 = bird.y;

        step_gravity(&mut bird, &field);
        assert_eq!(bird.y, y0);
        assert_eq!(bird.velocity, GRAVITY_ACCEL);

        step_gravity(&mut bird, &field);
        assert_eq!(bird.y, y0 + GRAVITY_ACCEL);
        assert_eq!(bird.velocity, 2.0 * GRAVITY_ACCEL);
    }

    #[test]
    fn test_jump_overrides_velocity_not_position() {
        let field = field();
        let mut bird = Bird::new(&field);
        bird.velocity = 12.0;
        let y0 = bird.y;

        apply_jump(&mut bird);
        assert_eq!(bird.y, y0);
        step_gravity(&mut bird, &field);
        assert_eq!(bird.y, y0 + JUMP_IMPULSE);
        assert_eq!(bird.velocity, JUMP_IMPULSE + GRAVITY_ACCEL);
    }

    #[test]
    fn test_clamps_to_floor_and_ceiling() {
        let field = field();
        let mut bird = Bird::new(&field);

        bird.velocity = 10_000.0;
        step_gravity(&mut bird, &field);
        assert_eq!(bird.y, field.max_bird_y());

        bird.velocity = -10_000.0;
        step_gravity(&mut bird, &field);
        assert_eq!(bird.y, field.boundary_top);
    }

    #[test]
    fn test_hover_stays_near_start() {
        let field = field();
        let mut bird = Bird::new(&field);
        for t in 0..200 {
            hover(&mut bird, &field, t, true);
            assert!((bird.y - field.initial_bird_y()).abs() <= HOVER_AMPLITUDE + 0.001);
            assert_eq!(bird.velocity, 0.0);
        }
    }

    #[test]
    fn test_hover_disabled_is_still() {
        let field = field();
        let mut bird = Bird::new(&field);
        hover(&mut bird, &field, 17, false);
        assert_eq!(bird.y, field.initial_bird_y());
    }
}
