//! Persistent and time-coherent collision detection.

pub use self::broad_phase::*;
pub use self::glue::*;
pub use self::narrow_phase::*;
pub use self::object::*;
pub use self::world::*;

pub mod broad_phase;
pub mod glue;
pub mod narrow_phase;
pub mod object;
pub mod world;
