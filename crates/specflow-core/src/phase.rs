//! Workflow phases for feature specs.
//!
//! A spec walks through three document phases (requirements, design, tasks)
//! and ends in a terminal complete state. Phases are sequential and
//! non-reversible; advancement is gated on explicit caller approval.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Workflow phase of a feature spec.
///
/// Phases form a fixed forward-only sequence:
/// `requirements -> design -> tasks -> complete`. The first three phases
/// each carry a markdown document; `complete` is terminal and carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Initial phase, gathering and defining requirements.
    Requirements,

    /// Second phase, technical design.
    Design,

    /// Third phase, implementation task planning.
    Tasks,

    /// Terminal state, all phases approved.
    Complete,
}

impl Phase {
    /// Returns the string representation of the phase.
    ///
    /// Used for `spec.toml` serialization and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Requirements => "requirements",
            Phase::Design => "design",
            Phase::Tasks => "tasks",
            Phase::Complete => "complete",
        }
    }

    /// Returns the next phase in the workflow, or `None` from `complete`.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Requirements => Some(Phase::Design),
            Phase::Design => Some(Phase::Tasks),
            Phase::Tasks => Some(Phase::Complete),
            Phase::Complete => None,
        }
    }

    /// Whether this phase is the terminal `complete` state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete)
    }

    /// Returns the document file name for this phase, if it carries one.
    ///
    /// `complete` has no document and returns `None`.
    pub fn document_file(&self) -> Option<&'static str> {
        match self {
            Phase::Requirements => Some("requirements.md"),
            Phase::Design => Some("design.md"),
            Phase::Tasks => Some("tasks.md"),
            Phase::Complete => None,
        }
    }

    /// The three document-bearing phases, in workflow order.
    pub const DOCUMENT_PHASES: [Phase; 3] = [Phase::Requirements, Phase::Design, Phase::Tasks];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requirements" => Ok(Phase::Requirements),
            "design" => Ok(Phase::Design),
            "tasks" => Ok(Phase::Tasks),
            "complete" => Ok(Phase::Complete),
            _ => Err(format!("invalid phase: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_advance_phases_sequentially() {
        assert_eq!(Phase::Requirements.next(), Some(Phase::Design));
        assert_eq!(Phase::Design.next(), Some(Phase::Tasks));
        assert_eq!(Phase::Tasks.next(), Some(Phase::Complete));
        assert_eq!(Phase::Complete.next(), None);
    }

    #[test]
    fn test_should_identify_terminal_phase() {
        assert!(!Phase::Requirements.is_terminal());
        assert!(!Phase::Design.is_terminal());
        assert!(!Phase::Tasks.is_terminal());
        assert!(Phase::Complete.is_terminal());
    }

    #[test]
    fn test_should_map_document_files() {
        assert_eq!(Phase::Requirements.document_file(), Some("requirements.md"));
        assert_eq!(Phase::Design.document_file(), Some("design.md"));
        assert_eq!(Phase::Tasks.document_file(), Some("tasks.md"));
        assert_eq!(Phase::Complete.document_file(), None);
    }

    #[test]
    fn test_should_convert_phase_to_string() {
        assert_eq!(Phase::Requirements.as_str(), "requirements");
        assert_eq!(Phase::Design.as_str(), "design");
        assert_eq!(Phase::Tasks.as_str(), "tasks");
        assert_eq!(Phase::Complete.as_str(), "complete");
    }

    #[test]
    fn test_should_parse_phase_from_string() {
        assert_eq!("requirements".parse::<Phase>(), Ok(Phase::Requirements));
        assert_eq!("design".parse::<Phase>(), Ok(Phase::Design));
        assert_eq!("tasks".parse::<Phase>(), Ok(Phase::Tasks));
        assert_eq!("complete".parse::<Phase>(), Ok(Phase::Complete));
        assert!("invalid".parse::<Phase>().is_err());
    }

    #[test]
    fn test_should_display_phase() {
        assert_eq!(format!("{}", Phase::Requirements), "requirements");
        assert_eq!(format!("{}", Phase::Complete), "complete");
    }

    #[test]
    fn test_should_serialize_lowercase() {
        #[derive(serde::Serialize)]
        struct Row {
            phase: Phase,
        }
        let toml = toml::to_string(&Row {
            phase: Phase::Design,
        })
        .unwrap();
        assert!(toml.contains("phase = \"design\""));
    }
}
