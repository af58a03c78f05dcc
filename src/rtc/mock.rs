//! Mock engine implementations for testing without a real RTC stack.
//!
//! Public so embedders can exercise their call-management layer against
//! scripted network conditions.

use super::{
    EncodingParameters, MediaCapabilities, StatsSource, TrackConstraints, TransportSample,
    VideoSender,
};
use crate::error::{Result, VqoError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

enum ScriptedPoll {
    Sample(TransportSample),
    Failure(String),
}

/// Scripted statistics source.
///
/// Polls pop queued responses in order; once the queue is empty the last
/// sample repeats, so a test can script one sample and run many cycles.
#[derive(Default)]
pub struct MockStatsSource {
    script: Mutex<VecDeque<ScriptedPoll>>,
    last_sample: Mutex<TransportSample>,
    polls: AtomicU64,
}

impl MockStatsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a sample to be returned by a future poll.
    pub fn push_sample(&self, sample: TransportSample) {
        self.script.lock().push_back(ScriptedPoll::Sample(sample));
    }

    /// Queue a statistics-read failure.
    pub fn push_failure<S: Into<String>>(&self, details: S) {
        self.script
            .lock()
            .push_back(ScriptedPoll::Failure(details.into()));
    }

    /// Number of polls performed so far.
    pub fn poll_count(&self) -> u64 {
        self.polls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StatsSource for MockStatsSource {
    async fn poll_stats(&self) -> Result<TransportSample> {
        self.polls.fetch_add(1, Ordering::Relaxed);

        let next = self.script.lock().pop_front();
        match next {
            Some(ScriptedPoll::Sample(sample)) => {
                *self.last_sample.lock() = sample;
                Ok(sample)
            }
            Some(ScriptedPoll::Failure(details)) => {
                debug!("Mock stats poll failing: {}", details);
                Err(VqoError::stats_read(details))
            }
            None => Ok(*self.last_sample.lock()),
        }
    }
}

/// Recording video sender with optional failure injection.
#[derive(Default)]
pub struct MockVideoSender {
    parameters: Mutex<Vec<EncodingParameters>>,
    constraints: Mutex<Vec<TrackConstraints>>,
    failures_remaining: AtomicU64,
}

impl MockVideoSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` apply calls fail.
    pub fn fail_next(&self, count: u64) {
        self.failures_remaining.store(count, Ordering::Relaxed);
    }

    /// Encoding parameters applied so far, in order.
    pub fn applied_parameters(&self) -> Vec<EncodingParameters> {
        self.parameters.lock().clone()
    }

    /// Track constraints applied so far, in order.
    pub fn applied_constraints(&self) -> Vec<TrackConstraints> {
        self.constraints.lock().clone()
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl VideoSender for MockVideoSender {
    async fn apply_parameters(&self, params: EncodingParameters) -> Result<()> {
        if self.take_failure() {
            return Err(VqoError::parameter_apply("injected failure"));
        }
        debug!("Mock sender applying parameters: {:?}", params);
        self.parameters.lock().push(params);
        Ok(())
    }

    async fn apply_constraints(&self, constraints: TrackConstraints) -> Result<()> {
        if self.take_failure() {
            return Err(VqoError::track_constraint("injected failure"));
        }
        debug!("Mock sender applying constraints: {:?}", constraints);
        self.constraints.lock().push(constraints);
        Ok(())
    }
}

impl MediaCapabilities for MockVideoSender {
    fn supports_capture(&self) -> bool {
        true
    }
}
