//! Spatial partitioning tools.

pub use self::bvh::{BVHImpl, BVH};
pub use self::bvt::{BVTNodeId, BinaryPartition, BVT};
pub use self::dbvt::{DBVTLeaf, DBVTLeafId, DBVTNodeId, DBVT};
pub use self::visitor::{
    BestFirstVisitStatus, BestFirstVisitor, SimultaneousVisitor, VisitStatus, Visitor,
};

mod bvh;
mod bvt;
mod dbvt;
mod visitor;
