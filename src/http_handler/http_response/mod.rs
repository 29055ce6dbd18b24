pub mod iss_pass;
pub mod response_common;
pub mod visual_passes;
pub mod world_time;
