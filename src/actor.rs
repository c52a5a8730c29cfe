//! Persistent per-subject track state.

use crate::point::Point3;

/// Display colors cycled through as actors are created. Purely cosmetic;
/// matching never looks at them.
const TAG_PALETTE: [[u8; 3]; 8] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
    [255, 128, 0],
    [128, 0, 255],
];

/// A tracked subject: stable id plus location, velocity and acceleration.
///
/// Velocity is the frame-to-frame location delta and acceleration the
/// velocity delta, so both are always derivable from the last two locations
/// alone; the actor keeps no further history.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Stable for the lifetime of the track.
    pub id: u32,
    pub location: Point3,
    pub velocity: Point3,
    pub acceleration: Point3,
    /// Opaque display tag for renderers.
    pub tag: [u8; 3],
    /// Consecutive frames without a matched coordinate.
    pub(crate) missed_frames: u32,
}

impl Actor {
    /// Create a new track at `location` with zero velocity and acceleration.
    pub fn new(id: u32, location: Point3) -> Self {
        Self {
            id,
            location,
            velocity: Point3::zero(),
            acceleration: Point3::zero(),
            tag: TAG_PALETTE[id as usize % TAG_PALETTE.len()],
            missed_frames: 0,
        }
    }

    /// Commit a move to `new_location`.
    ///
    /// The acceleration uses the velocity from before this move, so the
    /// order is: derive new velocity, derive acceleration from the old
    /// velocity, then overwrite all three fields.
    pub fn moved(&mut self, new_location: Point3) {
        let new_velocity = new_location - self.location;
        let new_acceleration = new_velocity - self.velocity;
        self.location = new_location;
        self.velocity = new_velocity;
        self.acceleration = new_acceleration;
        self.missed_frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor_is_at_rest() {
        let actor = Actor::new(0, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(actor.velocity, Point3::zero());
        assert_eq!(actor.acceleration, Point3::zero());
        assert_eq!(actor.missed_frames, 0);
    }

    #[test]
    fn test_constant_motion_has_zero_acceleration() {
        let mut actor = Actor::new(0, Point3::zero());
        actor.moved(Point3::new(1.0, 0.0, 0.0));
        actor.moved(Point3::new(2.0, 0.0, 0.0));
        assert_eq!(actor.velocity, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(actor.acceleration, Point3::zero());
    }

    #[test]
    fn test_acceleration_from_previous_velocity() {
        let mut actor = Actor::new(0, Point3::zero());
        actor.moved(Point3::new(1.0, 0.0, 0.0)); // velocity (1,0,0)
        actor.moved(Point3::new(4.0, 0.0, 0.0)); // velocity (3,0,0)
        assert_eq!(actor.acceleration, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_first_move_acceleration_equals_velocity() {
        let mut actor = Actor::new(0, Point3::zero());
        actor.moved(Point3::new(0.0, 2.0, 0.0));
        assert_eq!(actor.velocity, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(actor.acceleration, Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_tags_cycle_palette() {
        let a = Actor::new(0, Point3::zero());
        let b = Actor::new(8, Point3::zero());
        assert_eq!(a.tag, b.tag);
        assert_ne!(a.tag, Actor::new(1, Point3::zero()).tag);
    }
}
