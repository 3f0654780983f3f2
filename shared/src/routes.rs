//! Paths of the run service endpoints read by the step view.

use crate::types::step_key::StepKey;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Response header carrying the log continuation token.
pub const LOG_CURSOR_HEADER: &str = "X-Orchestra-FileCursor";

/// Bytes that cannot appear raw inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn step(base_url: &str, key: &StepKey) -> String {
    format!(
        "{}/project/{}/run/{}/step/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(&key.project, PATH_SEGMENT),
        utf8_percent_encode(&key.run, PATH_SEGMENT),
        key.step_index
    )
}

pub fn step_log_chunk(base_url: &str, key: &StepKey) -> String {
    format!("{}/log_chunk", step(base_url, key))
}
