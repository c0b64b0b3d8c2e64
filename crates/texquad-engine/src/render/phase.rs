use crate::error::FrameError;

/// Step of the per-frame protocol.
///
/// `Idle → Cleared → PipelineBound → TransformUploaded → Drawn → Presented → Idle`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    Cleared,
    PipelineBound,
    TransformUploaded,
    Drawn,
    Presented,
}

impl FramePhase {
    /// The only phase that may follow `self`.
    pub fn next(self) -> FramePhase {
        match self {
            FramePhase::Idle => FramePhase::Cleared,
            FramePhase::Cleared => FramePhase::PipelineBound,
            FramePhase::PipelineBound => FramePhase::TransformUploaded,
            FramePhase::TransformUploaded => FramePhase::Drawn,
            FramePhase::Drawn => FramePhase::Presented,
            FramePhase::Presented => FramePhase::Idle,
        }
    }

    /// Moves to `to` if it directly follows the current phase.
    pub fn advance(&mut self, to: FramePhase) -> Result<(), FrameError> {
        let expected = self.next();
        if to != expected {
            return Err(FrameError::OutOfOrder {
                expected,
                found: to,
            });
        }
        *self = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut phase = FramePhase::default();
        for to in [
            FramePhase::Cleared,
            FramePhase::PipelineBound,
            FramePhase::TransformUploaded,
            FramePhase::Drawn,
            FramePhase::Presented,
            FramePhase::Idle,
        ] {
            phase.advance(to).unwrap();
        }
        assert_eq!(phase, FramePhase::Idle);
    }

    #[test]
    fn skipping_a_step_is_rejected() {
        let mut phase = FramePhase::Cleared;
        let err = phase.advance(FramePhase::Drawn).unwrap_err();
        assert!(matches!(
            err,
            FrameError::OutOfOrder {
                expected: FramePhase::PipelineBound,
                found: FramePhase::Drawn,
            }
        ));
        assert_eq!(phase, FramePhase::Cleared);
    }
}
