//! The flyover state machine and the collaborators it drives.
mod connectivity;
mod controller_settings;
mod flyover_controller;
mod flyover_state;

pub use connectivity::HostLink;
pub use controller_settings::{ControllerTiming, LookupSettings};
pub use flyover_controller::FlyoverController;

#[cfg(test)]
mod tests;
