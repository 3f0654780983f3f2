pub mod scheduler;
pub mod sink;
pub mod step_status;

#[cfg(test)]
pub(crate) mod testing;
