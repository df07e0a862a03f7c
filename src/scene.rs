//! Headless simulation context.
//!
//! Owns the physics world, the floor, and the registry of spawned entities.
//! Carries no windowing types so the whole surface can be driven from tests.

use na::{Isometry2, Point2, Vector2};
use ncollide::pipeline::CollisionGroups;
use ncollide::shape::{Cuboid, ShapeHandle};
use nphysics::force_generator::DefaultForceGeneratorSet;
use nphysics::joint::{DefaultJointConstraintHandle, DefaultJointConstraintSet, MouseConstraint};
use nphysics::material::{BasicMaterial, MaterialHandle};
use nphysics::object::{
    BodyPartHandle, ColliderAnchor, ColliderDesc, DefaultBodyHandle, DefaultBodyPartHandle,
    DefaultBodySet, DefaultColliderHandle, DefaultColliderSet, Ground,
};
use nphysics::world::{DefaultGeometricalWorld, DefaultMechanicalWorld};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config;
use crate::factory::Blueprint;
use crate::groups::{self, GroupCycle};
use crate::ragdoll::{self, Ragdoll};

/// Handles of one spawned box.
#[derive(Copy, Clone)]
pub struct SceneBox {
    pub body: DefaultBodyHandle,
    pub collider: DefaultColliderHandle,
}

pub struct Scene {
    mechanical_world: DefaultMechanicalWorld<f32>,
    geometrical_world: DefaultGeometricalWorld<f32>,
    bodies: DefaultBodySet<f32>,
    colliders: DefaultColliderSet<f32>,
    constraints: DefaultJointConstraintSet<f32>,
    forces: DefaultForceGeneratorSet<f32>,
    floor_body: DefaultBodyHandle,
    floor_collider: DefaultColliderHandle,
    figures: Vec<Ragdoll>,
    boxes: Vec<SceneBox>,
    grabbed: Option<DefaultBodyPartHandle>,
    drag_constraint: Option<DefaultJointConstraintHandle>,
    groups: GroupCycle,
    extent: Vector2<f32>,
    rng: StdRng,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        let mechanical_world = DefaultMechanicalWorld::new(Vector2::new(0.0, config::GRAVITY));
        let geometrical_world = DefaultGeometricalWorld::new();
        let mut bodies = DefaultBodySet::new();
        let mut colliders = DefaultColliderSet::new();
        let constraints = DefaultJointConstraintSet::new();
        let forces = DefaultForceGeneratorSet::new();

        // The floor is a ground body pinned at the origin; its collider
        // carries the position so resizes only ever touch the collider.
        let floor_body = bodies.insert(Ground::new());
        let floor_desc = ColliderDesc::new(floor_shape(width))
            .position(floor_position(width))
            .material(MaterialHandle::new(BasicMaterial::new(
                config::FLOOR_RESTITUTION,
                config::FLOOR_FRICTION,
            )))
            .collision_groups(groups::scenery_groups())
            .margin(config::COLLIDER_MARGIN);
        let floor_collider = colliders.insert(floor_desc.build(BodyPartHandle(floor_body, 0)));

        Scene {
            mechanical_world,
            geometrical_world,
            bodies,
            colliders,
            constraints,
            forces,
            floor_body,
            floor_collider,
            figures: Vec::new(),
            boxes: Vec::new(),
            grabbed: None,
            drag_constraint: None,
            groups: GroupCycle::new(),
            extent: Vector2::new(width, height),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// One fixed 1/60s step.
    pub fn step(&mut self) {
        self.mechanical_world.step(
            &mut self.geometrical_world,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.constraints,
            &mut self.forces,
        );
    }

    pub fn spawn_person(&mut self) -> Ragdoll {
        let origin = self.spawn_point();
        self.spawn_person_at(origin.x, origin.y)
    }

    pub fn spawn_person_at(&mut self, x: f32, y: f32) -> Ragdoll {
        let id = self.groups.reserve();
        let figure = ragdoll::assemble(
            Vector2::new(x, y),
            id,
            groups::figure_groups(id),
            &mut self.bodies,
            &mut self.colliders,
            &mut self.constraints,
        );
        debug!("spawned person at ({}, {}) in group {}", x, y, id);
        self.figures.push(figure.clone());
        figure
    }

    pub fn spawn_box(&mut self) -> SceneBox {
        let origin = self.spawn_point();
        self.spawn_box_at(origin.x, origin.y)
    }

    pub fn spawn_box_at(&mut self, x: f32, y: f32) -> SceneBox {
        let blueprint = Blueprint::random_box(&mut self.rng, Vector2::new(x, y));
        let (body, collider) = blueprint.spawn(&mut self.bodies, &mut self.colliders);
        debug!("spawned box at ({}, {})", x, y);
        let spawned = SceneBox { body, collider };
        self.boxes.push(spawned);
        spawned
    }

    /// Removes every spawned figure and box. The floor survives.
    pub fn clear(&mut self) {
        self.release_grab();

        let figures = std::mem::replace(&mut self.figures, Vec::new());
        let boxes = std::mem::replace(&mut self.boxes, Vec::new());
        let removed = figures.len() + boxes.len();

        for figure in figures {
            for joint in figure.joints {
                let _ = self.constraints.remove(joint);
            }
            for collider in figure.colliders {
                self.colliders.remove(collider);
            }
            for body in figure.bodies {
                self.bodies.remove(body);
            }
        }

        for spawned in boxes {
            self.colliders.remove(spawned.collider);
            self.bodies.remove(spawned.body);
        }

        self.geometrical_world
            .maintain(&mut self.bodies, &mut self.colliders);
        debug!("cleared {} spawned entities", removed);
    }

    /// Follows the viewport: the floor collider is reshaped to span the new
    /// width and stays glued to the bottom edge. Bodies are left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.extent = Vector2::new(width, height);

        if let Some(collider) = self.colliders.get_mut(self.floor_collider) {
            collider.set_shape(floor_shape(width));
            collider.set_position(floor_position(width));
        }

        debug!("resized to {}x{}", width, height);
    }

    /// Attaches the drag constraint to the topmost dynamic body under
    /// `point`, if any. The anchor lives on the ground body, so ground-local
    /// anchor coordinates are world coordinates.
    pub fn grab_at(&mut self, point: Point2<f32>) -> Option<DefaultBodyPartHandle> {
        self.release_grab();

        // Point queries only see colliders already known to the broad phase.
        self.geometrical_world
            .maintain(&mut self.bodies, &mut self.colliders);

        let all_groups = CollisionGroups::new();
        let mut grabbed = None;
        for (_, collider) in
            self.geometrical_world
                .interferences_with_point(&self.colliders, &point, &all_groups)
        {
            if !collider.query_type().is_proximity_query() && collider.body() != self.floor_body {
                if let ColliderAnchor::OnBodyPart { body_part, .. } = collider.anchor() {
                    grabbed = Some(*body_part);
                }
            }
        }

        let body_part = grabbed?;
        let body_pos = self.bodies.get(body_part.0)?.part(body_part.1)?.position();
        let attach1 = point;
        let attach2 = body_pos.inverse() * attach1;
        let constraint = MouseConstraint::new(
            BodyPartHandle(self.floor_body, 0),
            body_part,
            attach1,
            attach2,
            config::DRAG_STIFFNESS * config::DRAG_STRENGTH,
        );
        self.drag_constraint = Some(self.constraints.insert(constraint));
        self.grabbed = Some(body_part);
        debug!("grabbed {:?} at ({}, {})", body_part.0, point.x, point.y);
        Some(body_part)
    }

    /// Moves the drag anchor to track the cursor. No-op when nothing is
    /// grabbed.
    pub fn drag_to(&mut self, point: Point2<f32>) {
        if self.grabbed.is_none() {
            return;
        }

        if let Some(constraint) = self
            .drag_constraint
            .and_then(|joint| self.constraints.get_mut(joint))
            .and_then(|joint| joint.downcast_mut::<MouseConstraint<f32, DefaultBodyHandle>>())
        {
            constraint.set_anchor_1(point);
        }
    }

    pub fn release_grab(&mut self) {
        if let Some(joint) = self.drag_constraint.take() {
            let _ = self.constraints.remove(joint);
            debug!("released grab");
        }
        self.grabbed = None;
    }

    pub fn bodies(&self) -> &DefaultBodySet<f32> {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut DefaultBodySet<f32> {
        &mut self.bodies
    }

    pub fn colliders(&self) -> &DefaultColliderSet<f32> {
        &self.colliders
    }

    pub fn constraints(&self) -> &DefaultJointConstraintSet<f32> {
        &self.constraints
    }

    pub fn figures(&self) -> &[Ragdoll] {
        &self.figures
    }

    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    pub fn floor_body(&self) -> DefaultBodyHandle {
        self.floor_body
    }

    pub fn floor_collider(&self) -> DefaultColliderHandle {
        self.floor_collider
    }

    pub fn grabbed(&self) -> Option<DefaultBodyPartHandle> {
        self.grabbed
    }

    pub fn drag_constraint(&self) -> Option<DefaultJointConstraintHandle> {
        self.drag_constraint
    }

    pub fn extent(&self) -> Vector2<f32> {
        self.extent
    }

    pub fn body_count(&self) -> usize {
        self.bodies.iter().count()
    }

    pub fn joint_count(&self) -> usize {
        self.constraints.iter().count()
    }

    fn spawn_point(&mut self) -> Point2<f32> {
        let x = self.rng.gen_range(config::SPAWN_X_MIN, config::SPAWN_X_MAX);
        Point2::new(x, self.extent.y - config::SPAWN_DROP)
    }
}

fn floor_position(width: f32) -> Isometry2<f32> {
    Isometry2::new(Vector2::new(width * 0.5, config::FLOOR_HEIGHT * 0.5), 0.0)
}

fn floor_shape(width: f32) -> ShapeHandle<f32> {
    ShapeHandle::new(Cuboid::new(Vector2::new(
        width * 0.5,
        config::FLOOR_HEIGHT * 0.5,
    )))
}
