use kiss3d::window::Window;
use na::Point3;
use nphysics::math::{Isometry, Vector};
use nphysics::object::{DefaultColliderHandle, DefaultColliderSet};

use crate::objects::node::{self, GraphicsNode};

pub struct Rect {
    color: Point3<f32>,
    base_color: Point3<f32>,
    delta: Isometry<f32>,
    gfx: GraphicsNode,
    collider: DefaultColliderHandle,
}

impl Rect {
    pub fn new(
        collider: DefaultColliderHandle,
        colliders: &DefaultColliderSet<f32>,
        delta: Isometry<f32>,
        half_extents: Vector<f32>,
        color: Point3<f32>,
        window: &mut Window,
    ) -> Rect {
        let extents = half_extents * 2.0;
        let node = window.add_rectangle(extents.x, extents.y);

        let mut res = Rect {
            color,
            base_color: color,
            delta,
            gfx: node,
            collider,
        };

        res.gfx.set_color(color.x, color.y, color.z);
        res.update(colliders);

        res
    }

    pub fn select(&mut self) {
        self.color = Point3::new(1.0, 0.0, 0.0);
    }

    pub fn unselect(&mut self) {
        self.color = self.base_color;
    }

    pub fn set_color(&mut self, color: Point3<f32>) {
        self.gfx.set_color(color.x, color.y, color.z);
        self.color = color;
        self.base_color = color;
    }

    pub fn update(&mut self, colliders: &DefaultColliderSet<f32>) {
        node::update_scene_node(
            &mut self.gfx,
            colliders,
            self.collider,
            &self.color,
            &self.delta,
        );
    }

    pub fn scene_node(&self) -> &GraphicsNode {
        &self.gfx
    }

    pub fn scene_node_mut(&mut self) -> &mut GraphicsNode {
        &mut self.gfx
    }

    pub fn object(&self) -> DefaultColliderHandle {
        self.collider
    }
}
