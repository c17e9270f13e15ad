// Stage timing for acquisition and aggregation.
use chrono::{DateTime, Utc};
use instant::Instant;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMetrics {
    pub stage: AcquisitionStage,
    pub duration_ms: u64,
    pub rows_processed: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionStage {
    Fetch,
    Extract,
    Parse,
    Acquire,
    Aggregate,
}

impl std::fmt::Display for AcquisitionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionStage::Fetch => write!(f, "fetch"),
            AcquisitionStage::Extract => write!(f, "extract"),
            AcquisitionStage::Parse => write!(f, "parse"),
            AcquisitionStage::Acquire => write!(f, "acquire"),
            AcquisitionStage::Aggregate => write!(f, "aggregate"),
        }
    }
}

#[derive(Debug, Default)]
pub struct MetricsCollector {
    stage_timers: HashMap<AcquisitionStage, Instant>,
    recorded: Vec<StageMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a stage
    pub fn start_stage(&mut self, stage: AcquisitionStage) {
        self.stage_timers.insert(stage, Instant::now());
    }

    /// End timing a stage and record metrics. A stage that was never started
    /// records a zero duration.
    pub fn end_stage(&mut self, stage: AcquisitionStage, rows_processed: Option<u64>) -> StageMetrics {
        let duration_ms = self
            .stage_timers
            .remove(&stage)
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);

        let metrics = StageMetrics {
            stage,
            duration_ms,
            rows_processed,
            timestamp: Utc::now(),
        };
        debug!(
            "stage {} finished in {} ms ({:?} rows)",
            stage, duration_ms, rows_processed
        );

        self.recorded.push(metrics.clone());
        metrics
    }

    pub fn recorded(&self) -> &[StageMetrics] {
        &self.recorded
    }

    pub fn into_recorded(self) -> Vec<StageMetrics> {
        self.recorded
    }
}
