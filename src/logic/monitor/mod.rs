//! Monitor Module - Temporal Alerting
//!
//! Drives the pipeline over a sampled frame stream and turns a noisy
//! per-frame verdict sequence into a small number of de-duplicated,
//! severity-transition-triggered alerts.
//!
//! ## Structure
//! - `types`: StreamInfo, MonitorConfig, MonitorState + transition rule,
//!   AlertEvent, MonitorReport
//! - `source`: FrameSource seam + frame-directory implementation
//! - `sink`: AlertSink seam + log/collecting implementations

pub mod sink;
pub mod source;
pub mod types;


pub use sink::{AlertSink, CollectingSink, LogSink};
pub use source::{FrameDirSource, FrameSource};
pub use types::{
    AlertEvent, Frame, MonitorConfig, MonitorError, MonitorReport, MonitorState, StreamInfo,
    Transition,
};

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::logic::pipeline::Pipeline;

/// Runs the pipeline over a frame stream, strictly in temporal order
/// (the transition rule depends on sequential state).
pub struct StreamMonitor {
    pipeline: Pipeline,
    cancel: Arc<AtomicBool>,
}

impl StreamMonitor {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cooperative cancellation; checked between samples
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Monitor a frame stream to its end (or cancellation).
    ///
    /// Samples every `sample_interval_secs` of stream time rather than
    /// every frame; a per-sample failure is logged and skipped, never
    /// aborting the remaining stream.
    pub fn run(
        &self,
        source: &mut dyn FrameSource,
        config: &MonitorConfig,
        sink: &mut dyn AlertSink,
    ) -> MonitorReport {
        let info = source.info();

        log::info!("NIVARAN STREAM MONITOR");
        log::info!("Location: {}", config.location);
        log::info!(
            "Stream: {} frames @ {:.1} fps ({:.1}s)",
            info.frame_count,
            info.fps,
            info.duration_secs
        );
        log::info!("Sampling: every {} seconds", config.sample_interval_secs);

        let frame_interval =
            ((info.fps * config.sample_interval_secs as f32) as u64).max(1);

        let mut state = MonitorState::new();
        let mut report = MonitorReport {
            frames_seen: 0,
            samples_analyzed: 0,
            duration_secs: info.duration_secs,
            cancelled: false,
            alerts: Vec::new(),
        };

        while let Some(frame) = source.next_frame() {
            report.frames_seen += 1;

            // Only process every Nth frame
            if report.frames_seen % frame_interval != 0 {
                continue;
            }

            // Cooperative cancellation, checked between samples
            if self.cancel.load(Ordering::SeqCst) {
                log::info!("Monitoring cancelled by caller");
                report.cancelled = true;
                break;
            }

            report.samples_analyzed += 1;
            let stream_time = frame.index as f32 / info.fps;
            log::info!("[{:.1}s] Analyzing frame {}", stream_time, frame.index);

            // Stages are total; the unwind guard covers truly unexpected
            // panics escaping a stage so one bad sample cannot end the run.
            let assessment =
                match catch_unwind(AssertUnwindSafe(|| self.pipeline.assess(&frame.input))) {
                    Ok(assessment) => assessment,
                    Err(_) => {
                        log::error!("Pipeline panicked on frame {}, skipping sample", frame.index);
                        continue;
                    }
                };

            let verdict = &assessment.verdict;
            log::info!(
                "   Hazard: {} | Type: {} | Severity: {} | Confidence: {:.2}",
                verdict.hazard,
                verdict.hazard_type,
                verdict.severity,
                verdict.confidence
            );

            match state.observe(verdict, &config.alert_on) {
                Transition::Alert => {
                    let event = AlertEvent {
                        location: config.location.clone(),
                        frame_index: frame.index,
                        stream_time_secs: stream_time,
                        assessment,
                    };
                    sink.emit(&event);
                    report.alerts.push(event);
                }
                Transition::Cleared => {
                    log::info!("   Situation cleared at {:.1}s", stream_time);
                }
                Transition::NoChange => {}
            }
        }

        log::info!("MONITORING COMPLETE");
        log::info!(
            "   Frames seen: {} | Samples analyzed: {} | Alerts: {} | Stream duration: {:.1}s",
            report.frames_seen,
            report.samples_analyzed,
            report.alerts.len(),
            report.duration_secs
        );

        report
    }
}
