//! Graphics manager: maps body handles to planar scene nodes.

use kiss3d::planar_camera::Sidescroll as Camera;
use kiss3d::window::Window;
use na::{self, Point2, Point3};
use ncollide::shape::{self, Cuboid, Shape};
use nphysics::math::{Isometry, Vector};
use nphysics::object::{DefaultBodyHandle, DefaultColliderHandle, DefaultColliderSet};
use std::collections::HashMap;

use crate::objects::ball::Ball;
use crate::objects::node::{GraphicsNode, Node};
use crate::objects::rect::Rect;

pub trait GraphicsWindow {
    fn remove_graphics_node(&mut self, node: &mut GraphicsNode);
}

impl GraphicsWindow for Window {
    fn remove_graphics_node(&mut self, node: &mut GraphicsNode) {
        self.remove_planar_node(node);
    }
}

pub struct GraphicsManager {
    b2sn: HashMap<DefaultBodyHandle, Vec<Node>>,
    b2color: HashMap<DefaultBodyHandle, Point3<f32>>,
    camera: Camera,
}

impl GraphicsManager {
    pub fn new() -> GraphicsManager {
        let mut camera = Camera::new();
        camera.set_zoom(1.0);

        GraphicsManager {
            camera,
            b2sn: HashMap::new(),
            b2color: HashMap::new(),
        }
    }

    pub fn clear(&mut self, window: &mut Window) {
        for sns in self.b2sn.values_mut() {
            for sn in sns.iter_mut() {
                window.remove_graphics_node(sn.scene_node_mut());
            }
        }

        self.b2sn.clear();
        self.b2color.clear();
    }

    pub fn remove_body_nodes(&mut self, window: &mut Window, body: DefaultBodyHandle) {
        if let Some(sns) = self.b2sn.get_mut(&body) {
            for sn in sns.iter_mut() {
                window.remove_graphics_node(sn.scene_node_mut());
            }
        }

        self.b2sn.remove(&body);
    }

    pub fn set_body_color(&mut self, b: DefaultBodyHandle, color: Point3<f32>) {
        self.b2color.insert(b, color);

        if let Some(ns) = self.b2sn.get_mut(&b) {
            for n in ns.iter_mut() {
                n.set_color(color)
            }
        }
    }

    fn body_color(&self, handle: DefaultBodyHandle) -> Point3<f32> {
        self.b2color
            .get(&handle)
            .cloned()
            .unwrap_or_else(|| Point3::new(0.5, 0.5, 0.5))
    }

    pub fn add(
        &mut self,
        window: &mut Window,
        id: DefaultColliderHandle,
        colliders: &DefaultColliderSet<f32>,
    ) {
        if let Some(collider) = colliders.get(id) {
            let color = self.body_color(collider.body());
            self.add_with_color(window, id, colliders, color)
        }
    }

    pub fn add_with_color(
        &mut self,
        window: &mut Window,
        id: DefaultColliderHandle,
        colliders: &DefaultColliderSet<f32>,
        color: Point3<f32>,
    ) {
        if let Some(collider) = colliders.get(id) {
            let key = collider.body();
            let shape = collider.shape();
            let margin = collider.margin();

            let mut new_nodes = Vec::new();
            self.add_shape(
                window,
                id,
                colliders,
                na::one(),
                shape,
                margin,
                color,
                &mut new_nodes,
            );

            let nodes = self.b2sn.entry(key).or_insert_with(Vec::new);
            nodes.append(&mut new_nodes);
        }
    }

    fn add_shape(
        &mut self,
        window: &mut Window,
        object: DefaultColliderHandle,
        colliders: &DefaultColliderSet<f32>,
        delta: Isometry<f32>,
        shape: &dyn Shape<f32>,
        margin: f32,
        color: Point3<f32>,
        out: &mut Vec<Node>,
    ) {
        if let Some(s) = shape.as_shape::<shape::Ball<f32>>() {
            out.push(Node::Ball(Ball::new(
                object,
                colliders,
                delta,
                s.radius() + margin,
                color,
                window,
            )))
        } else if let Some(s) = shape.as_shape::<Cuboid<f32>>() {
            out.push(Node::Rect(Rect::new(
                object,
                colliders,
                delta,
                s.half_extents() + Vector::repeat(margin),
                color,
                window,
            )))
        }
    }

    pub fn draw(&mut self, colliders: &DefaultColliderSet<f32>, _window: &mut Window) {
        for (_, ns) in self.b2sn.iter_mut() {
            for n in ns.iter_mut() {
                n.update(colliders)
            }
        }
    }

    pub fn look_at(&mut self, at: Point2<f32>, zoom: f32) {
        self.camera.look_at(at, zoom);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn body_nodes(&self, handle: DefaultBodyHandle) -> Option<&Vec<Node>> {
        self.b2sn.get(&handle)
    }

    pub fn body_nodes_mut(&mut self, handle: DefaultBodyHandle) -> Option<&mut Vec<Node>> {
        self.b2sn.get_mut(&handle)
    }
}

impl Default for GraphicsManager {
    fn default() -> Self {
        Self::new()
    }
}
