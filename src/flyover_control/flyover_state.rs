use crate::pass_prediction::SelectedPass;
use strum_macros::Display;

/// Where the tracker currently is in its cycle.
///
/// The pass being tracked travels inside the state, so there is no way to
/// wait for or render a pass that was not produced by the latest lookup.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FlyoverState {
    /// Fresh start or after a connectivity restart.
    Init,
    SyncTime,
    LookupPass,
    /// Counting down to the rise of the contained pass.
    Wait(SelectedPass),
    /// The contained pass is overhead.
    PassActive(SelectedPass),
    Complete,
}
