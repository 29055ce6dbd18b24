use super::http_response::{iss_pass, visual_passes, world_time};

pub mod iss_pass_get;
pub mod request_common;
pub mod visual_passes_get;
pub mod world_time_get;
