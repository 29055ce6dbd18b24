//! Wall-clock time for the tracker, anchored to a network time authority.
mod flyover_clock;
mod sntp;
mod world_time;

pub use flyover_clock::{ClockError, FlyoverClock, TimeAuthority};
pub use sntp::SntpAuthority;
pub use world_time::WorldTimeAuthority;
