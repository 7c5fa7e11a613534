//! Phase advancement state machine.
//!
//! The engine decides whether a spec may advance and computes the successor
//! phase. It is stateless across calls: it holds no memory of past
//! approvals, so one approval can never silently authorize a later advance.
//! Approval is always an explicit, single-use caller input; the engine
//! performs no content-based or time-based inference.

use crate::error::{Result, SpecError};
use crate::phase::Phase;
use crate::spec::Spec;

/// Outcome of an advancement decision. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowDecision {
    /// Whether the phase advanced.
    pub advanced: bool,

    /// The spec's phase after the decision (unchanged when not advanced).
    pub new_phase: Phase,

    /// Whether the caller must supply approval before the spec can proceed.
    /// `true` whenever the phase is non-terminal and no advance occurred.
    pub requires_approval: bool,
}

/// Stateless phase state machine for feature specs.
///
/// States: `requirements -> design -> tasks -> complete`, with `complete`
/// terminal. Advancement happens only on an explicit approval flag.
#[derive(Debug, Default)]
pub struct WorkflowEngine;

impl WorkflowEngine {
    /// Whether the spec may advance to its next phase.
    ///
    /// Returns `approval && current phase is not terminal`. There is no
    /// other path to `true`: without the explicit flag the answer is always
    /// `false`.
    pub fn can_advance_phase(spec: &Spec, approval: bool) -> bool {
        approval && !spec.current_phase.is_terminal()
    }

    /// Computes the next phase in the fixed sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::TerminalPhase`] when called on a `complete` spec.
    pub fn advance_phase(spec: &Spec) -> Result<Phase> {
        spec.current_phase
            .next()
            .ok_or_else(|| SpecError::TerminalPhase(spec.feature_name.clone()))
    }

    /// Decides advancement for a single update call.
    ///
    /// # Errors
    ///
    /// Never fails for a non-terminal spec; an approved advance from the
    /// terminal phase is unreachable because [`Self::can_advance_phase`]
    /// already answers `false` there.
    pub fn decide(spec: &Spec, approval: bool) -> Result<WorkflowDecision> {
        if Self::can_advance_phase(spec, approval) {
            let new_phase = Self::advance_phase(spec)?;
            return Ok(WorkflowDecision {
                advanced: true,
                new_phase,
                requires_approval: false,
            });
        }

        Ok(WorkflowDecision {
            advanced: false,
            new_phase: spec.current_phase,
            requires_approval: !spec.current_phase.is_terminal(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec_in(phase: Phase) -> Spec {
        Spec {
            feature_name: "test-feature".to_string(),
            description: String::new(),
            current_phase: phase,
            created_at: String::new(),
            updated_at: String::new(),
            base_path: PathBuf::from("/specs/test-feature"),
        }
    }

    #[test]
    fn test_cannot_advance_without_approval() {
        for phase in [Phase::Requirements, Phase::Design, Phase::Tasks, Phase::Complete] {
            assert!(!WorkflowEngine::can_advance_phase(&spec_in(phase), false));
        }
    }

    #[test]
    fn test_can_advance_with_approval_unless_terminal() {
        assert!(WorkflowEngine::can_advance_phase(&spec_in(Phase::Requirements), true));
        assert!(WorkflowEngine::can_advance_phase(&spec_in(Phase::Design), true));
        assert!(WorkflowEngine::can_advance_phase(&spec_in(Phase::Tasks), true));
        assert!(!WorkflowEngine::can_advance_phase(&spec_in(Phase::Complete), true));
    }

    #[test]
    fn test_advance_phase_steps_one() {
        assert_eq!(
            WorkflowEngine::advance_phase(&spec_in(Phase::Requirements)).unwrap(),
            Phase::Design
        );
        assert_eq!(
            WorkflowEngine::advance_phase(&spec_in(Phase::Design)).unwrap(),
            Phase::Tasks
        );
        assert_eq!(
            WorkflowEngine::advance_phase(&spec_in(Phase::Tasks)).unwrap(),
            Phase::Complete
        );
    }

    #[test]
    fn test_advance_phase_terminal_fails() {
        let result = WorkflowEngine::advance_phase(&spec_in(Phase::Complete));
        assert!(matches!(result, Err(SpecError::TerminalPhase(_))));
    }

    #[test]
    fn test_decide_without_approval_keeps_phase() {
        let decision = WorkflowEngine::decide(&spec_in(Phase::Design), false).unwrap();
        assert!(!decision.advanced);
        assert_eq!(decision.new_phase, Phase::Design);
        assert!(decision.requires_approval);
    }

    #[test]
    fn test_decide_with_approval_advances() {
        let decision = WorkflowEngine::decide(&spec_in(Phase::Tasks), true).unwrap();
        assert!(decision.advanced);
        assert_eq!(decision.new_phase, Phase::Complete);
        assert!(!decision.requires_approval);
    }

    #[test]
    fn test_decide_terminal_never_requires_approval() {
        let decision = WorkflowEngine::decide(&spec_in(Phase::Complete), true).unwrap();
        assert!(!decision.advanced);
        assert_eq!(decision.new_phase, Phase::Complete);
        assert!(!decision.requires_approval);
    }

    #[test]
    fn test_approval_is_single_use() {
        // The engine is stateless: an approval answered in one call carries
        // nothing into the next.
        let spec = spec_in(Phase::Requirements);
        assert!(WorkflowEngine::can_advance_phase(&spec, true));
        assert!(!WorkflowEngine::can_advance_phase(&spec, false));
    }
}
