use crate::api::error::ApiError;
use shared::types::log_chunk::{LogChunk, LogCursor};
use shared::types::step::Step;
use shared::types::step_key::StepKey;
use std::rc::Rc;
use std::sync::Arc;

/// The two reads a step view needs from the run service.
///
/// Futures are polled on the browser's single thread, so they are not
/// required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait RunSource {
    async fn get_step(&self, key: &StepKey) -> Result<Step, ApiError>;

    /// Reads at most `limit` bytes of log starting at `cursor`, or from the
    /// beginning when `cursor` is `None`.
    async fn get_log_chunk(
        &self,
        key: &StepKey,
        cursor: Option<&LogCursor>,
        limit: usize,
    ) -> Result<LogChunk, ApiError>;
}

impl<T: RunSource> RunSource for Rc<T> {
    async fn get_step(&self, key: &StepKey) -> Result<Step, ApiError> {
        (**self).get_step(key).await
    }

    async fn get_log_chunk(
        &self,
        key: &StepKey,
        cursor: Option<&LogCursor>,
        limit: usize,
    ) -> Result<LogChunk, ApiError> {
        (**self).get_log_chunk(key, cursor, limit).await
    }
}

impl<T: RunSource> RunSource for Arc<T> {
    async fn get_step(&self, key: &StepKey) -> Result<Step, ApiError> {
        (**self).get_step(key).await
    }

    async fn get_log_chunk(
        &self,
        key: &StepKey,
        cursor: Option<&LogCursor>,
        limit: usize,
    ) -> Result<LogChunk, ApiError> {
        (**self).get_log_chunk(key, cursor, limit).await
    }
}
