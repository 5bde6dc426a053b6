use shared::LabeledImage;

/// What one round trip to the processing service produced: the validated
/// result images, or a user-facing failure message.
pub type AnalysisOutcome = Result<Vec<LabeledImage>, String>;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Processing { request: u64 },
    Failed { message: String },
    Ready { results: Vec<LabeledImage> },
}

/// View-state machine for the upload/analysis cycle. Each submission gets a
/// fresh request number; a response only lands while its number still matches
/// the phase, so a slow response can never overwrite a newer transition.
pub struct AnalysisState {
    phase: Phase,
    last_request: u64,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_request: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Starts a new processing cycle and returns its request number.
    pub fn begin(&mut self) -> u64 {
        self.last_request += 1;
        self.phase = Phase::Processing {
            request: self.last_request,
        };
        self.last_request
    }

    /// Lands the outcome of `request`. Returns false and leaves the phase
    /// untouched when the outcome is stale, i.e. a newer submission, a
    /// failure, or a clear already moved the machine on.
    pub fn finish(&mut self, request: u64, outcome: AnalysisOutcome) -> bool {
        match self.phase {
            Phase::Processing { request: current } if current == request => {
                self.phase = match outcome {
                    Ok(results) => Phase::Ready { results },
                    Err(message) => Phase::Failed { message },
                };
                true
            }
            _ => false,
        }
    }

    /// Forces the machine into Failed regardless of phase. Used for errors
    /// that belong to no request, like a preview that fails to decode.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Failed {
            message: message.into(),
        };
    }

    /// Back to Idle. The request counter keeps counting so responses issued
    /// before the reset stay stale.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ProcessingResponse, ResultKind};

    fn sample_results() -> Vec<LabeledImage> {
        ProcessingResponse {
            processed_results: vec!["aGVsbG8=".into(), "d29ybGQ=".into(), "IQ==".into()],
        }
        .into_labeled()
        .unwrap()
    }

    #[test]
    fn begin_enters_processing() {
        let mut state = AnalysisState::new();
        let request = state.begin();
        assert!(state.is_processing());
        assert_eq!(state.phase(), &Phase::Processing { request });
    }

    #[test]
    fn success_lands_three_labeled_results() {
        let mut state = AnalysisState::new();
        let request = state.begin();

        assert!(state.finish(request, Ok(sample_results())));
        assert!(!state.is_processing());
        match state.phase() {
            Phase::Ready { results } => {
                assert_eq!(results.len(), 3);
                assert_eq!(results[0].kind, ResultKind::Segmentation);
                assert_eq!(results[1].kind, ResultKind::Detection);
                assert_eq!(results[2].kind, ResultKind::Classification);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn failure_lands_message_and_stops_processing() {
        let mut state = AnalysisState::new();
        let request = state.begin();

        assert!(state.finish(
            request,
            Err("Error processing image. Please try again.".into())
        ));
        assert!(!state.is_processing());
        assert_eq!(state.error(), Some("Error processing image. Please try again."));
    }

    #[test]
    fn newest_submission_wins() {
        let mut state = AnalysisState::new();
        let first = state.begin();
        let second = state.begin();

        // The late response of the superseded request must not land.
        assert!(!state.finish(first, Ok(sample_results())));
        assert_eq!(state.phase(), &Phase::Processing { request: second });

        assert!(state.finish(second, Err("boom".into())));
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn reset_returns_to_idle_from_every_phase() {
        let mut state = AnalysisState::new();
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);

        state.begin();
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);

        state.fail("boom");
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);

        let request = state.begin();
        state.finish(request, Ok(sample_results()));
        state.reset();
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn response_after_reset_is_dropped() {
        let mut state = AnalysisState::new();
        let request = state.begin();
        state.reset();

        assert!(!state.finish(request, Ok(sample_results())));
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn preview_failure_preempts_inflight_response() {
        let mut state = AnalysisState::new();
        let request = state.begin();
        state.fail("Error loading image");

        assert!(!state.finish(request, Ok(sample_results())));
        assert_eq!(state.error(), Some("Error loading image"));
    }
}
