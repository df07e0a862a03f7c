#[macro_use]
extern crate kiss3d;
extern crate nalgebra as na;
extern crate ncollide2d as ncollide;
extern crate nphysics2d as nphysics;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub use crate::engine::GraphicsManager;
pub use crate::sandbox::Sandbox;
pub use crate::scene::Scene;

pub mod config;
mod engine;
pub mod factory;
pub mod groups;
pub mod objects;
pub mod ragdoll;
mod sandbox;
pub mod scene;
mod ui;
