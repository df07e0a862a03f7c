//! Tuned constants shared by the scene and the windowed shell.
//!
//! World units are pixels and the y axis points up, so gravity is negative
//! and the floor hugs the bottom edge of the viewport.

/// Initial window size, in pixels.
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

pub const GRAVITY: f32 = -981.0;

/// Full height of the floor slab; its top edge is the ground line.
pub const FLOOR_HEIGHT: f32 = 60.0;
pub const FLOOR_FRICTION: f32 = 0.1;
pub const FLOOR_RESTITUTION: f32 = 0.0;

/// Shared surface properties of every figure part.
pub const PART_FRICTION: f32 = 0.1;
pub const PART_RESTITUTION: f32 = 0.2;

pub const BOX_DENSITY: f32 = 0.002;
pub const BOX_FRICTION: f32 = 0.8;
pub const BOX_RESTITUTION: f32 = 0.2;

/// Full-extent ranges boxes are sampled from (upper bounds excluded).
pub const BOX_WIDTH_MIN: f32 = 60.0;
pub const BOX_WIDTH_MAX: f32 = 100.0;
pub const BOX_HEIGHT_MIN: f32 = 30.0;
pub const BOX_HEIGHT_MAX: f32 = 60.0;

/// Horizontal band new entities spawn in, and how far below the top edge
/// of the viewport they appear.
pub const SPAWN_X_MIN: f32 = 150.0;
pub const SPAWN_X_MAX: f32 = 450.0;
pub const SPAWN_DROP: f32 = 100.0;

/// Collider margin. The engine default is tuned for meter-sized worlds.
pub const COLLIDER_MARGIN: f32 = 1.0;

/// The pointer constraint budget is its stiffness times this per-step
/// impulse scale.
pub const DRAG_STIFFNESS: f32 = 0.2;
pub const DRAG_STRENGTH: f32 = 10_000.0;

/// A joint's recorded stiffness times this scale is its break force.
pub const JOINT_STRENGTH: f32 = 1.0e6;

pub const BACKGROUND_COLOR: [f32; 3] = [0.173, 0.184, 0.200];
pub const FLOOR_COLOR: [f32; 3] = [0.133, 0.133, 0.133];
pub const BOX_COLOR: [f32; 3] = [0.400, 0.694, 1.000];
