//! Ragdoll assembly.
//!
//! A figure is ten bodies linked by nine revolute constraints. All parts share
//! one fresh collision group so a figure never collides with itself while
//! still colliding with other figures, boxes, and the floor.

use na::{Point2, Point3, Vector2};
use ncollide::pipeline::CollisionGroups;
use nphysics::joint::{
    DefaultJointConstraintHandle, DefaultJointConstraintSet, RevoluteConstraint,
};
use nphysics::object::{
    BodyPartHandle, DefaultBodyHandle, DefaultBodySet, DefaultColliderHandle,
    DefaultColliderSet,
};

use crate::config;
use crate::factory::{BallProps, Blueprint, RectProps};

/// Indices into a figure's part arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Part {
    Head = 0,
    Torso,
    UpperArmLeft,
    UpperArmRight,
    LowerArmLeft,
    LowerArmRight,
    UpperLegLeft,
    UpperLegRight,
    LowerLegLeft,
    LowerLegRight,
}

pub const PART_COUNT: usize = 10;
pub const JOINT_COUNT: usize = 9;

enum PartShape {
    Ball { radius: f32 },
    Rect { width: f32, height: f32 },
}

struct PartDesc {
    shape: PartShape,
    offset: (f32, f32),
    density: f32,
    color: [f32; 3],
}

struct JointDesc {
    first: Part,
    second: Part,
    anchor1: (f32, f32),
    anchor2: (f32, f32),
    stiffness: f32,
}

const LIGHT: [f32; 3] = [0.878, 0.878, 0.878];
const MID: [f32; 3] = [0.690, 0.690, 0.690];
const DARK: [f32; 3] = [0.533, 0.533, 0.533];

// Offsets are relative to the spawn point, y up.
const PARTS: [PartDesc; PART_COUNT] = [
    PartDesc { shape: PartShape::Ball { radius: 18.0 }, offset: (0.0, 0.0), density: 0.001, color: LIGHT },
    PartDesc { shape: PartShape::Rect { width: 18.0, height: 56.0 }, offset: (0.0, -38.0), density: 0.002, color: LIGHT },
    PartDesc { shape: PartShape::Rect { width: 36.0, height: 12.0 }, offset: (-20.0, -28.0), density: 0.001, color: MID },
    PartDesc { shape: PartShape::Rect { width: 36.0, height: 12.0 }, offset: (20.0, -28.0), density: 0.001, color: MID },
    PartDesc { shape: PartShape::Rect { width: 32.0, height: 10.0 }, offset: (-42.0, -28.0), density: 0.001, color: DARK },
    PartDesc { shape: PartShape::Rect { width: 32.0, height: 10.0 }, offset: (42.0, -28.0), density: 0.001, color: DARK },
    PartDesc { shape: PartShape::Rect { width: 12.0, height: 38.0 }, offset: (-9.0, -78.0), density: 0.001, color: MID },
    PartDesc { shape: PartShape::Rect { width: 12.0, height: 38.0 }, offset: (9.0, -78.0), density: 0.001, color: MID },
    PartDesc { shape: PartShape::Rect { width: 10.0, height: 32.0 }, offset: (-9.0, -108.0), density: 0.001, color: DARK },
    PartDesc { shape: PartShape::Rect { width: 10.0, height: 32.0 }, offset: (9.0, -108.0), density: 0.001, color: DARK },
];

// Local anchors on each linked part, y up.
const JOINTS: [JointDesc; JOINT_COUNT] = [
    JointDesc { first: Part::Head, second: Part::Torso, anchor1: (0.0, -18.0), anchor2: (0.0, 28.0), stiffness: 0.6 },
    JointDesc { first: Part::Torso, second: Part::UpperArmLeft, anchor1: (-9.0, 24.0), anchor2: (18.0, 0.0), stiffness: 0.6 },
    JointDesc { first: Part::Torso, second: Part::UpperArmRight, anchor1: (9.0, 24.0), anchor2: (-18.0, 0.0), stiffness: 0.6 },
    JointDesc { first: Part::UpperArmLeft, second: Part::LowerArmLeft, anchor1: (-18.0, 0.0), anchor2: (16.0, 0.0), stiffness: 0.5 },
    JointDesc { first: Part::UpperArmRight, second: Part::LowerArmRight, anchor1: (18.0, 0.0), anchor2: (-16.0, 0.0), stiffness: 0.5 },
    JointDesc { first: Part::Torso, second: Part::UpperLegLeft, anchor1: (-5.0, -28.0), anchor2: (0.0, 18.0), stiffness: 0.8 },
    JointDesc { first: Part::Torso, second: Part::UpperLegRight, anchor1: (5.0, -28.0), anchor2: (0.0, 18.0), stiffness: 0.8 },
    JointDesc { first: Part::UpperLegLeft, second: Part::LowerLegLeft, anchor1: (0.0, -18.0), anchor2: (0.0, 16.0), stiffness: 0.6 },
    JointDesc { first: Part::UpperLegRight, second: Part::LowerLegRight, anchor1: (0.0, -18.0), anchor2: (0.0, 16.0), stiffness: 0.6 },
];

/// Handles of one assembled figure.
#[derive(Clone)]
pub struct Ragdoll {
    pub bodies: Vec<DefaultBodyHandle>,
    pub colliders: Vec<DefaultColliderHandle>,
    pub joints: Vec<DefaultJointConstraintHandle>,
    pub colors: Vec<Point3<f32>>,
    pub group: usize,
}

/// Builds a figure anchored at `origin` (the head center) and inserts it
/// into the given sets. `groups` must be a fresh figure group.
pub fn assemble(
    origin: Vector2<f32>,
    group: usize,
    groups: CollisionGroups,
    bodies: &mut DefaultBodySet<f32>,
    colliders: &mut DefaultColliderSet<f32>,
    joints: &mut DefaultJointConstraintSet<f32>,
) -> Ragdoll {
    let mut figure = Ragdoll {
        bodies: Vec::with_capacity(PART_COUNT),
        colliders: Vec::with_capacity(PART_COUNT),
        joints: Vec::with_capacity(JOINT_COUNT),
        colors: Vec::with_capacity(PART_COUNT),
        group,
    };

    for desc in PARTS.iter() {
        let position = origin + Vector2::new(desc.offset.0, desc.offset.1);
        let color = Point3::new(desc.color[0], desc.color[1], desc.color[2]);
        let blueprint = match desc.shape {
            PartShape::Ball { radius } => Blueprint::ball(BallProps {
                position,
                radius,
                density: desc.density,
                friction: config::PART_FRICTION,
                restitution: config::PART_RESTITUTION,
                groups,
                color,
            }),
            PartShape::Rect { width, height } => Blueprint::rect(RectProps {
                position,
                extents: Vector2::new(width, height),
                density: desc.density,
                friction: config::PART_FRICTION,
                restitution: config::PART_RESTITUTION,
                groups,
                color,
            }),
        };

        let (body, collider) = blueprint.spawn(bodies, colliders);
        figure.bodies.push(body);
        figure.colliders.push(collider);
        figure.colors.push(blueprint.color);
    }

    for desc in JOINTS.iter() {
        let first = figure.bodies[desc.first as usize];
        let second = figure.bodies[desc.second as usize];
        let mut joint = RevoluteConstraint::new(
            BodyPartHandle(first, 0),
            BodyPartHandle(second, 0),
            Point2::new(desc.anchor1.0, desc.anchor1.1),
            Point2::new(desc.anchor2.0, desc.anchor2.1),
        );
        joint.set_break_force(desc.stiffness * config::JOINT_STRENGTH);
        figure.joints.push(joints.insert(joint));
    }

    figure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_count_matches_the_tables() {
        assert_eq!(PARTS.len(), PART_COUNT);
        assert_eq!(JOINTS.len(), JOINT_COUNT);
    }

    #[test]
    fn joints_always_link_two_distinct_parts() {
        for desc in JOINTS.iter() {
            assert_ne!(desc.first as usize, desc.second as usize);
        }
    }

    #[test]
    fn every_part_but_the_head_is_jointed() {
        let mut linked = [false; PART_COUNT];
        for desc in JOINTS.iter() {
            linked[desc.second as usize] = true;
        }
        linked[Part::Head as usize] = true;
        // The head is the first anchor of the head-torso joint.
        assert!(JOINTS.iter().any(|j| j.first == Part::Head));
        assert!(linked.iter().all(|&l| l));
    }

    #[test]
    fn the_figure_is_left_right_symmetric() {
        let pairs = [
            (Part::UpperArmLeft, Part::UpperArmRight),
            (Part::LowerArmLeft, Part::LowerArmRight),
            (Part::UpperLegLeft, Part::UpperLegRight),
            (Part::LowerLegLeft, Part::LowerLegRight),
        ];

        for &(left, right) in pairs.iter() {
            let l = &PARTS[left as usize];
            let r = &PARTS[right as usize];
            assert_eq!(l.offset.0, -r.offset.0);
            assert_eq!(l.offset.1, r.offset.1);
            assert_eq!(l.density, r.density);
        }
    }
}
