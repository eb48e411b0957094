// Frame pipeline - one cooperative task pulling poses and publishing counts

use crate::core::config::{Config, ConfigError};
use crate::core::session::SessionState;
use crate::models::capture::CaptureError;
use crate::models::exercise::RepCounts;
use crate::models::pose::{derive_skeleton, Keypoint, Pose};
use crate::platform::capture::CaptureSource;
use crate::platform::pose::{PoseReadiness, PoseSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::task::JoinHandle;

// ==============================================================================
// Reports
// ==============================================================================

/// Everything the presentation layer needs after one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub session_id: String,
    pub frame_index: u64,
    pub timestamp: i64,
    pub counts: RepCounts,
    pub pose: Pose,
    pub skeleton: Vec<(Keypoint, Keypoint)>,
}

/// Final state returned when the pipeline stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub counts: RepCounts,
    pub frames_processed: u64,
    pub frames_not_ready: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Capture device unavailable: {0}")]
    Capture(#[from] CaptureError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Frame loop task failed: {0}")]
    TaskFailed(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

// ==============================================================================
// Pipeline
// ==============================================================================

/// Validated configuration plus the report channel subscribers attach to
pub struct FramePipeline {
    config: Config,
    report_tx: broadcast::Sender<FrameReport>,
}

impl FramePipeline {
    pub fn new(config: Config) -> PipelineResult<Self> {
        config.validate()?;
        let (report_tx, _) = broadcast::channel(config.report_channel_capacity);
        Ok(Self { config, report_tx })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to per-frame reports; subscribe before `start` to see the first frame
    pub fn subscribe(&self) -> broadcast::Receiver<FrameReport> {
        self.report_tx.subscribe()
    }

    /// Open the capture device and spawn the frame loop.
    ///
    /// A capture failure is returned as is and nothing is spawned.
    pub async fn start<S>(
        self,
        mut capture: Box<dyn CaptureSource>,
        source: S,
    ) -> PipelineResult<PipelineHandle>
    where
        S: PoseSource + 'static,
    {
        if let Err(e) = capture.open(&self.config.capture).await {
            tracing::error!(error = %e, "Capture device failed to open, pipeline not started");
            return Err(e.into());
        }

        let session = SessionState::new(&self.config);
        let session_id = session.id().to_string();
        let latest = Arc::new(RwLock::new(RepCounts::default()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        let frame_loop = FrameLoop {
            session,
            threshold: self.config.confidence_threshold,
            report_tx: self.report_tx.clone(),
            latest: latest.clone(),
            frames_not_ready: 0,
        };
        let task = tokio::spawn(frame_loop.run(source, shutdown_rx));

        tracing::info!(session_id = %session_id, "Started rep counting");

        Ok(PipelineHandle {
            session_id,
            report_tx: self.report_tx,
            latest,
            shutdown_tx,
            task,
            capture,
        })
    }
}

/// Running pipeline.
///
/// Dropping the handle cancels the frame loop but cannot close the capture
/// device, which stays open until its own drop. Call `stop` to release it.
pub struct PipelineHandle {
    session_id: String,
    report_tx: broadcast::Sender<FrameReport>,
    latest: Arc<RwLock<RepCounts>>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<SessionSummary>,
    capture: Box<dyn CaptureSource>,
}

impl PipelineHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameReport> {
        self.report_tx.subscribe()
    }

    /// Counts as of the last processed frame
    pub async fn latest_counts(&self) -> RepCounts {
        *self.latest.read().await
    }

    /// True once the pose source has closed and the loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the frame loop, release the capture device, and return the final counts
    pub async fn stop(mut self) -> PipelineResult<SessionSummary> {
        // The loop may already have exited on its own
        let _ = self.shutdown_tx.send(()).await;

        let joined = self.task.await;

        if let Err(e) = self.capture.close().await {
            tracing::warn!(error = %e, "Failed to close capture device");
        }

        let summary = joined.map_err(|e| {
            tracing::error!(error = %e, "Frame loop task failed");
            PipelineError::TaskFailed(e.to_string())
        })?;

        tracing::info!(
            session_id = %summary.session_id,
            frames = summary.frames_processed,
            squats = summary.counts.squat,
            jumping_jacks = summary.counts.jumping_jack,
            "Stopped rep counting"
        );
        Ok(summary)
    }
}

// ==============================================================================
// Frame Loop
// ==============================================================================

struct FrameLoop {
    session: SessionState,
    threshold: f32,
    report_tx: broadcast::Sender<FrameReport>,
    latest: Arc<RwLock<RepCounts>>,
    frames_not_ready: u64,
}

impl FrameLoop {
    async fn run<S: PoseSource>(
        mut self,
        mut source: S,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) -> SessionSummary {
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Frame loop shutdown requested");
                    break;
                }
                next = source.next_pose() => match next {
                    Some(PoseReadiness::Ready(pose)) => self.process(pose).await,
                    Some(PoseReadiness::NotReady) => {
                        self.frames_not_ready += 1;
                        tracing::trace!("Pose not ready, waiting for next frame");
                    }
                    None => {
                        tracing::info!("Pose source closed");
                        break;
                    }
                },
            }
        }

        self.session.settle();

        SessionSummary {
            session_id: self.session.id().to_string(),
            counts: self.session.counts(),
            frames_processed: self.session.frames_processed(),
            frames_not_ready: self.frames_not_ready,
        }
    }

    async fn process(&mut self, pose: Pose) {
        let frame_index = self.session.frames_processed();
        let counts = self.session.process_pose(&pose);
        *self.latest.write().await = counts;

        if self.report_tx.receiver_count() > 0 {
            let report = FrameReport {
                session_id: self.session.id().to_string(),
                frame_index,
                timestamp: chrono::Utc::now().timestamp_millis(),
                counts,
                skeleton: derive_skeleton(&pose, self.threshold),
                pose,
            };
            let _ = self.report_tx.send(report);
        }
    }
}
