//! Body blueprints.
//!
//! Spawning goes through explicit property structs rather than positional
//! arguments; a blueprint bundles the rigid-body desc, the collider desc
//! and the display color of one body, ready to be inserted into the sets.

use na::{Point3, Vector2};
use ncollide::pipeline::CollisionGroups;
use ncollide::shape::{Ball, Cuboid, ShapeHandle};
use nphysics::material::{BasicMaterial, MaterialHandle};
use nphysics::object::{
    BodyPartHandle, ColliderDesc, DefaultBodyHandle, DefaultBodySet, DefaultColliderHandle,
    DefaultColliderSet, RigidBodyDesc,
};
use rand::Rng;

use crate::config;
use crate::groups;

/// Properties of a ball-shaped body.
#[derive(Clone)]
pub struct BallProps {
    pub position: Vector2<f32>,
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub groups: CollisionGroups,
    pub color: Point3<f32>,
}

/// Properties of a rectangular body. `extents` are the full width and
/// height, not half-extents.
#[derive(Clone)]
pub struct RectProps {
    pub position: Vector2<f32>,
    pub extents: Vector2<f32>,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub groups: CollisionGroups,
    pub color: Point3<f32>,
}

/// One body ready to be inserted.
pub struct Blueprint {
    pub body: RigidBodyDesc<f32>,
    pub collider: ColliderDesc<f32>,
    pub color: Point3<f32>,
}

impl Blueprint {
    pub fn ball(props: BallProps) -> Blueprint {
        let shape = ShapeHandle::new(Ball::new(props.radius));
        Blueprint {
            body: RigidBodyDesc::new().translation(props.position),
            collider: collider_desc(shape, &props.groups, props.density, props.friction, props.restitution),
            color: props.color,
        }
    }

    pub fn rect(props: RectProps) -> Blueprint {
        let shape = ShapeHandle::new(Cuboid::new(props.extents * 0.5));
        Blueprint {
            body: RigidBodyDesc::new().translation(props.position),
            collider: collider_desc(shape, &props.groups, props.density, props.friction, props.restitution),
            color: props.color,
        }
    }

    /// A box with edge lengths sampled from the configured ranges.
    pub fn random_box<R: Rng>(rng: &mut R, position: Vector2<f32>) -> Blueprint {
        Blueprint::rect(RectProps {
            position,
            extents: random_box_extents(rng),
            density: config::BOX_DENSITY,
            friction: config::BOX_FRICTION,
            restitution: config::BOX_RESTITUTION,
            groups: groups::scenery_groups(),
            color: Point3::from(config::BOX_COLOR),
        })
    }

    /// Inserts the body and its collider, returning both handles.
    pub fn spawn(
        &self,
        bodies: &mut DefaultBodySet<f32>,
        colliders: &mut DefaultColliderSet<f32>,
    ) -> (DefaultBodyHandle, DefaultColliderHandle) {
        let body = bodies.insert(self.body.build());
        let collider = colliders.insert(self.collider.build(BodyPartHandle(body, 0)));
        (body, collider)
    }
}

fn collider_desc(
    shape: ShapeHandle<f32>,
    groups: &CollisionGroups,
    density: f32,
    friction: f32,
    restitution: f32,
) -> ColliderDesc<f32> {
    ColliderDesc::new(shape)
        .density(density)
        .material(MaterialHandle::new(BasicMaterial::new(restitution, friction)))
        .collision_groups(*groups)
        .margin(config::COLLIDER_MARGIN)
}

fn random_box_extents<R: Rng>(rng: &mut R) -> Vector2<f32> {
    Vector2::new(
        rng.gen_range(config::BOX_WIDTH_MIN, config::BOX_WIDTH_MAX),
        rng.gen_range(config::BOX_HEIGHT_MIN, config::BOX_HEIGHT_MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn box_extents_stay_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let extents = random_box_extents(&mut rng);
            assert!(extents.x >= config::BOX_WIDTH_MIN && extents.x < config::BOX_WIDTH_MAX);
            assert!(extents.y >= config::BOX_HEIGHT_MIN && extents.y < config::BOX_HEIGHT_MAX);
        }
    }
}
