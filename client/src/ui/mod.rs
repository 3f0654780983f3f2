pub mod log_text;
pub mod step_page;
