//! Collision predicates for balls, paddles and pickups
//!
//! Pure functions over positions and extents; all mutation happens in `tick`.

use glam::Vec2;

use super::state::{Paddle, Pickup};
use crate::consts::DEFLECT_FACTOR;

/// Ball vs. the left (human) paddle. Triggers when the ball's left edge
/// reaches the paddle's right edge while the ball center is within the
/// paddle's vertical span and the ball is moving leftward.
pub fn ball_hits_left_paddle(pos: Vec2, radius: f32, vel: Vec2, paddle: &Paddle) -> bool {
    pos.x - radius <= paddle.x + paddle.width
        && pos.y >= paddle.y
        && pos.y <= paddle.y + paddle.height
        && vel.x < 0.0
}

/// Ball vs. the right paddle, symmetric rule for rightward motion.
pub fn ball_hits_right_paddle(pos: Vec2, radius: f32, vel: Vec2, paddle: &Paddle) -> bool {
    pos.x + radius >= paddle.x
        && pos.y >= paddle.y
        && pos.y <= paddle.y + paddle.height
        && vel.x > 0.0
}

/// Vertical velocity after a paddle hit: proportional to the offset between
/// the ball and the paddle center, producing an angle-based deflection.
pub fn deflection(ball_y: f32, paddle: &Paddle) -> f32 {
    (ball_y - paddle.center_y()) * DEFLECT_FACTOR
}

/// Axis-aligned overlap between a ball (inflated by its radius) and a
/// pickup rectangle.
pub fn ball_pickup_overlap(pos: Vec2, radius: f32, pickup: &Pickup) -> bool {
    pos.x + radius > pickup.pos.x
        && pos.x - radius < pickup.pos.x + pickup.width
        && pos.y + radius > pickup.pos.y
        && pos.y - radius < pickup.pos.y + pickup.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::powerup::PickupKind;
    use proptest::prelude::*;

    fn left_paddle() -> Paddle {
        Paddle::new(PLAYER_X)
    }

    fn right_paddle() -> Paddle {
        Paddle::new(BOARD_WIDTH - 2.0 * PADDLE_WIDTH)
    }

    #[test]
    fn test_left_paddle_hit_requires_leftward_motion() {
        let paddle = left_paddle();
        let pos = Vec2::new(paddle.x + paddle.width + 2.0, paddle.center_y());

        assert!(ball_hits_left_paddle(
            pos,
            BALL_RADIUS,
            Vec2::new(-4.0, 0.0),
            &paddle
        ));
        // Moving away: no hit even though the edges overlap
        assert!(!ball_hits_left_paddle(
            pos,
            BALL_RADIUS,
            Vec2::new(4.0, 0.0),
            &paddle
        ));
    }

    #[test]
    fn test_left_paddle_hit_requires_vertical_span() {
        let paddle = left_paddle();
        let vel = Vec2::new(-4.0, 0.0);
        let x = paddle.x + paddle.width + 2.0;

        assert!(!ball_hits_left_paddle(
            Vec2::new(x, paddle.y - 1.0),
            BALL_RADIUS,
            vel,
            &paddle
        ));
        assert!(!ball_hits_left_paddle(
            Vec2::new(x, paddle.y + paddle.height + 1.0),
            BALL_RADIUS,
            vel,
            &paddle
        ));
        assert!(ball_hits_left_paddle(
            Vec2::new(x, paddle.y + paddle.height),
            BALL_RADIUS,
            vel,
            &paddle
        ));
    }

    #[test]
    fn test_right_paddle_hit_is_symmetric() {
        let paddle = right_paddle();
        let pos = Vec2::new(paddle.x - 2.0, paddle.center_y());

        assert!(ball_hits_right_paddle(
            pos,
            BALL_RADIUS,
            Vec2::new(4.0, 0.0),
            &paddle
        ));
        assert!(!ball_hits_right_paddle(
            pos,
            BALL_RADIUS,
            Vec2::new(-4.0, 0.0),
            &paddle
        ));
    }

    #[test]
    fn test_deflection_proportional_to_offset() {
        let paddle = left_paddle();
        assert_eq!(deflection(paddle.center_y(), &paddle), 0.0);

        let above = deflection(paddle.center_y() - 20.0, &paddle);
        let below = deflection(paddle.center_y() + 20.0, &paddle);
        assert!((above + 3.0).abs() < 1e-5);
        assert!((below - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_pickup_overlap_inflated_by_radius() {
        let pickup = Pickup::new(Vec2::new(100.0, 100.0), PickupKind::Speed);

        // Center just outside the rect but within one radius
        assert!(ball_pickup_overlap(
            Vec2::new(100.0 - BALL_RADIUS + 1.0, 110.0),
            BALL_RADIUS,
            &pickup
        ));
        // Clearly outside
        assert!(!ball_pickup_overlap(
            Vec2::new(50.0, 110.0),
            BALL_RADIUS,
            &pickup
        ));
        // Touching edges exactly do not overlap (strict inequality)
        assert!(!ball_pickup_overlap(
            Vec2::new(100.0 - BALL_RADIUS, 110.0),
            BALL_RADIUS,
            &pickup
        ));
    }

    proptest! {
        #[test]
        fn prop_paddle_clamp_stays_on_board(y in -1000.0f32..1000.0) {
            let mut paddle = left_paddle();
            paddle.y = y;
            paddle.clamp_to_board();
            prop_assert!(paddle.y >= 0.0);
            prop_assert!(paddle.y <= BOARD_HEIGHT - paddle.height);
        }

        #[test]
        fn prop_deflection_sign_matches_offset(offset in -40.0f32..40.0) {
            let paddle = left_paddle();
            let dy = deflection(paddle.center_y() + offset, &paddle);
            prop_assert!((dy - offset * DEFLECT_FACTOR).abs() < 1e-5);
        }
    }
}
