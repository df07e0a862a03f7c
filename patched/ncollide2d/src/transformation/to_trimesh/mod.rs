pub use self::to_trimesh::ToTriMesh;

mod ball_to_trimesh;
mod capsule_to_trimesh;
mod cone_to_trimesh;
mod cuboid_to_trimesh;
mod cylinder_to_trimesh;
#[doc(hidden)]
pub mod to_trimesh;
// mod mesh_to_trimesh;
mod heightfield_to_trimesh;
mod triangle_to_trimesh;
