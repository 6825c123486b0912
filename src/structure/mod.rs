pub mod duration;
pub mod result;
pub mod time;
pub mod time_delta;
