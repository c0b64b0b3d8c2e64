use crate::error::FrameError;
use crate::pipeline::TRANSFORM_STAGE;
use crate::transform::TransformState;

use super::draw::{CLEAR_COLOR, CLEAR_DEPTH, FrameSink, QUAD_DRAW};
use super::phase::FramePhase;

/// Drives one frame at a time through a [`FrameSink`].
///
/// Each step checks the current [`FramePhase`] before touching the sink. A
/// step that fails leaves the phase where it was; the next call to
/// [`render`](Self::render) abandons that frame and starts over.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    phase: FramePhase,
    frames_presented: u64,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Runs the full sequence for one frame.
    pub fn render<S: FrameSink + ?Sized>(
        &mut self,
        sink: &mut S,
        transform: &mut TransformState,
    ) -> Result<(), FrameError> {
        if self.phase != FramePhase::Idle {
            log::warn!("abandoning incomplete frame (stopped at {:?})", self.phase);
            self.phase = FramePhase::Idle;
        }

        self.clear(sink)?;
        self.bind_pipeline(sink)?;
        self.upload_transform(sink, transform)?;
        self.draw(sink)?;
        self.present(sink)
    }

    pub fn clear<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), FrameError> {
        self.step(FramePhase::Cleared, || sink.clear(CLEAR_COLOR, CLEAR_DEPTH))
    }

    pub fn bind_pipeline<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), FrameError> {
        self.step(FramePhase::PipelineBound, || sink.bind_pipeline())
    }

    /// Advances the rotation, uploads the new matrices and binds them.
    pub fn upload_transform<S: FrameSink + ?Sized>(
        &mut self,
        sink: &mut S,
        transform: &mut TransformState,
    ) -> Result<(), FrameError> {
        self.step(FramePhase::TransformUploaded, || {
            transform.advance();
            sink.upload_transform(&transform.uniform())?;
            sink.bind_transform(TRANSFORM_STAGE)
        })
    }

    pub fn draw<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), FrameError> {
        self.step(FramePhase::Drawn, || sink.draw(QUAD_DRAW))
    }

    pub fn present<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), FrameError> {
        self.step(FramePhase::Presented, || sink.present())?;
        self.frames_presented += 1;
        self.phase.advance(FramePhase::Idle)
    }

    fn step(
        &mut self,
        to: FramePhase,
        run: impl FnOnce() -> Result<(), FrameError>,
    ) -> Result<(), FrameError> {
        let expected = self.phase.next();
        if to != expected {
            return Err(FrameError::OutOfOrder {
                expected,
                found: to,
            });
        }
        run()?;
        self.phase.advance(to)
    }
}
