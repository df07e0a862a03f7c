//! Broad phases.

#[doc(inline)]
pub use self::broad_phase::{BroadPhase, BroadPhaseInterferenceHandler, BroadPhaseProxyHandle};
pub use self::broad_phase_pair_filter::BroadPhasePairFilter;
pub use self::dbvt_broad_phase::DBVTBroadPhase;

#[doc(hidden)]
pub mod broad_phase;
#[doc(hidden)]
pub mod broad_phase_pair_filter;
mod dbvt_broad_phase;
