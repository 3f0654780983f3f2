pub mod log_chunk;
pub mod step;
pub mod step_key;
pub mod view_data;
