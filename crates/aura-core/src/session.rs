//! Session state machine — the single owner of analysis state.
//!
//! Uploads accumulate images, a guarded submit snapshots them and drives
//! one remote attempt, and a per-attempt token keeps late completions
//! from touching a state that has since been reset.

use crate::intake::{Angle, EncodedImage, IntakeError, MultiAngleImages};
use crate::report::{AnalyzeError, FacialReport};
use async_trait::async_trait;

/// Advisory recorded when submit is attempted with missing angles.
pub const INCOMPLETE_IMAGES_MESSAGE: &str = "请务必上传全部三个维度的照片以进行最专业的深度分析。";
/// Advisory recorded when the remote analysis fails for any reason.
pub const ANALYSIS_FAILED_MESSAGE: &str = "AI 分析遇到错误，请检查网络并重试。";
/// Advisory recorded when a supplied file cannot be decoded as an image.
pub const DECODE_FAILED_MESSAGE: &str = "照片无法识别，请更换图片后重试。";

/// Remote analysis provider.
///
/// Implementations are stateless, reentrant, and single-attempt.
/// Completeness of the image set is the caller's gate, not re-checked here.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, images: &MultiAngleImages) -> Result<FacialReport, AnalyzeError>;
}

/// Observable session state. The view layer holds a read reference;
/// only [`Session`] mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    pub is_loading: bool,
    pub images: MultiAngleImages,
    pub report: Option<FacialReport>,
    pub error: Option<String>,
}

/// Outcome of a submit request.
#[derive(Debug)]
pub enum SubmitGate {
    /// All angles present; the caller must drive the attempt to completion.
    Ready(AttemptTicket),
    /// Missing angles; a validation advisory was recorded.
    Incomplete,
    /// An attempt is already in flight; the request was ignored.
    InFlight,
}

/// Token pairing one submit attempt with the state it may complete.
#[derive(Debug)]
pub struct AttemptTicket {
    attempt: u64,
    images: MultiAngleImages,
}

impl AttemptTicket {
    /// The images exactly as they were when the attempt started.
    pub fn images(&self) -> &MultiAngleImages {
        &self.images
    }
}

/// Owns the [`AnalysisState`] and applies every transition.
#[derive(Debug, Default)]
pub struct Session {
    state: AnalysisState,
    attempt: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for the view layer.
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Store a decoded image under `angle`, or record a decode advisory.
    ///
    /// Ignored while an attempt is in flight. A decode failure leaves
    /// every slot untouched. A prior submit error is not cleared here;
    /// only the next submit attempt clears it.
    pub fn upload_image(&mut self, angle: Angle, decoded: Result<EncodedImage, IntakeError>) {
        if self.state.is_loading {
            tracing::debug!(%angle, "upload ignored while analysis is in flight");
            return;
        }
        match decoded {
            Ok(image) => {
                tracing::debug!(%angle, mime = %image.mime_type, "image stored");
                self.state.images.set(angle, image);
            }
            Err(err) => {
                tracing::warn!(%angle, error = %err, "image decode failed");
                self.state.error = Some(DECODE_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Guarded submit.
    ///
    /// While an attempt is in flight this is a no-op. With missing
    /// angles it records the validation advisory and makes no remote
    /// call. Otherwise it clears any prior error, marks the session
    /// loading, and hands back a ticket holding a snapshot of the
    /// images as of this moment.
    pub fn begin_submit(&mut self) -> SubmitGate {
        if self.state.is_loading {
            tracing::debug!("submit ignored: attempt already in flight");
            return SubmitGate::InFlight;
        }
        if !self.state.images.is_complete() {
            tracing::debug!("submit rejected: images incomplete");
            self.state.error = Some(INCOMPLETE_IMAGES_MESSAGE.to_string());
            return SubmitGate::Incomplete;
        }

        self.state.error = None;
        self.state.is_loading = true;
        self.attempt += 1;
        SubmitGate::Ready(AttemptTicket {
            attempt: self.attempt,
            images: self.state.images.clone(),
        })
    }

    /// Apply the outcome of an attempt.
    ///
    /// A stale ticket (the session was reset after `begin_submit`) is
    /// discarded without touching state. On failure the previous report
    /// from an earlier successful attempt is retained.
    pub fn finish_submit(
        &mut self,
        ticket: AttemptTicket,
        outcome: Result<FacialReport, AnalyzeError>,
    ) {
        if ticket.attempt != self.attempt {
            tracing::debug!(
                ticket = ticket.attempt,
                live = self.attempt,
                "discarding stale completion"
            );
            return;
        }

        self.state.is_loading = false;
        match outcome {
            Ok(report) => {
                tracing::info!(score = report.overall_score, "analysis succeeded");
                self.state.report = Some(report);
            }
            Err(err) => {
                // The taxonomy stays in the log; the user sees one advisory.
                tracing::warn!(error = %err, "analysis failed");
                self.state.error = Some(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Return to the initial empty state and invalidate any in-flight attempt.
    pub fn reset(&mut self) {
        tracing::debug!("session reset");
        self.attempt += 1;
        self.state = AnalysisState::default();
    }
}

/// Drive one full submit attempt against `analyzer`.
///
/// Returns false if the gate rejected the submit (incomplete images or
/// an attempt already in flight).
pub async fn run_analysis<A: Analyzer + ?Sized>(session: &mut Session, analyzer: &A) -> bool {
    let ticket = match session.begin_submit() {
        SubmitGate::Ready(ticket) => ticket,
        SubmitGate::Incomplete | SubmitGate::InFlight => return false,
    };
    let outcome = analyzer.analyze(ticket.images()).await;
    session.finish_submit(ticket, outcome);
    true
}
