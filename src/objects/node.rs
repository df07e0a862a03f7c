use na::Point3;
use nphysics::math::Isometry;
use nphysics::object::{DefaultColliderHandle, DefaultColliderSet};

use crate::objects::ball::Ball;
use crate::objects::rect::Rect;

pub type GraphicsNode = kiss3d::scene::PlanarSceneNode;

pub enum Node {
    Ball(Ball),
    Rect(Rect),
}

impl Node {
    pub fn select(&mut self) {
        match *self {
            Node::Ball(ref mut n) => n.select(),
            Node::Rect(ref mut n) => n.select(),
        }
    }

    pub fn unselect(&mut self) {
        match *self {
            Node::Ball(ref mut n) => n.unselect(),
            Node::Rect(ref mut n) => n.unselect(),
        }
    }

    pub fn update(&mut self, colliders: &DefaultColliderSet<f32>) {
        match *self {
            Node::Ball(ref mut n) => n.update(colliders),
            Node::Rect(ref mut n) => n.update(colliders),
        }
    }

    pub fn scene_node(&self) -> &GraphicsNode {
        match *self {
            Node::Ball(ref n) => n.scene_node(),
            Node::Rect(ref n) => n.scene_node(),
        }
    }

    pub fn scene_node_mut(&mut self) -> &mut GraphicsNode {
        match *self {
            Node::Ball(ref mut n) => n.scene_node_mut(),
            Node::Rect(ref mut n) => n.scene_node_mut(),
        }
    }

    pub fn collider(&self) -> DefaultColliderHandle {
        match *self {
            Node::Ball(ref n) => n.object(),
            Node::Rect(ref n) => n.object(),
        }
    }

    pub fn set_color(&mut self, color: Point3<f32>) {
        match *self {
            Node::Ball(ref mut n) => n.set_color(color),
            Node::Rect(ref mut n) => n.set_color(color),
        }
    }
}

pub fn update_scene_node(
    node: &mut GraphicsNode,
    colliders: &DefaultColliderSet<f32>,
    coll: DefaultColliderHandle,
    color: &Point3<f32>,
    delta: &Isometry<f32>,
) {
    if let Some(co) = colliders.get(coll) {
        node.set_local_transformation(co.position() * delta);
        node.set_color(color.x, color.y, color.z);
    } else {
        node.set_color(color.x * 0.25, color.y * 0.25, color.z * 0.25);
    }
}
