//! Crate error type.

use std::fmt;

/// Why the route decoder refused an arc selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFault {
    /// A node was reached twice before the route returned to the depot.
    RevisitedNode,
    /// A customer on a route has no selected outgoing arc.
    MissingSuccessor,
    /// A customer has more than one selected outgoing arc.
    AmbiguousSuccessor,
    /// A customer is not reachable from any depot-outgoing arc.
    UncoveredCustomer,
}

impl DecodeFault {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeFault::RevisitedNode => "node revisited before returning to depot",
            DecodeFault::MissingSuccessor => "no selected outgoing arc",
            DecodeFault::AmbiguousSuccessor => "more than one selected outgoing arc",
            DecodeFault::UncoveredCustomer => "customer not covered by any route",
        }
    }
}

/// Error type for instance loading, model construction, solving and decoding.
#[derive(Debug)]
pub enum VrptwError {
    /// The instance violates a structural requirement; no model was built.
    MalformedInstance {
        /// Index of the offending node, if the defect is node-local.
        node: Option<usize>,
        reason: String,
    },
    /// A line of an instance file could not be parsed.
    Parse {
        /// 1-based line number.
        line: usize,
        reason: String,
    },
    /// Reading an instance or writing a report failed.
    Io(std::io::Error),
    /// A solver or formulation setting is out of range.
    InvalidConfig(String),
    /// The final arc selection does not decompose into depot-rooted routes.
    ///
    /// This is an internal fault (tolerance drift or a separation defect),
    /// distinct from a proven-infeasible instance.
    DecoderInvariantViolation {
        /// Index of the node where decoding stopped.
        node: usize,
        fault: DecodeFault,
    },
    /// The solver backend failed outside of the normal status reporting.
    Solver(String),
}

impl VrptwError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            VrptwError::MalformedInstance { .. } => "INSTANCE_MALFORMED",
            VrptwError::Parse { .. } => "INSTANCE_PARSE",
            VrptwError::Io(_) => "IO",
            VrptwError::InvalidConfig(_) => "CONFIG_INVALID",
            VrptwError::DecoderInvariantViolation { .. } => "DECODER_INVARIANT",
            VrptwError::Solver(_) => "SOLVER_INTERNAL",
        }
    }

    pub(crate) fn malformed(node: Option<usize>, reason: impl Into<String>) -> Self {
        VrptwError::MalformedInstance {
            node,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for VrptwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VrptwError::MalformedInstance {
                node: Some(node),
                reason,
            } => write!(f, "[{}] node {}: {}", self.code(), node, reason),
            VrptwError::MalformedInstance { node: None, reason } => {
                write!(f, "[{}] {}", self.code(), reason)
            }
            VrptwError::Parse { line, reason } => {
                write!(f, "[{}] line {}: {}", self.code(), line, reason)
            }
            VrptwError::Io(err) => write!(f, "[{}] {}", self.code(), err),
            VrptwError::InvalidConfig(msg) => write!(f, "[{}] {}", self.code(), msg),
            VrptwError::DecoderInvariantViolation { node, fault } => write!(
                f,
                "[{}] decoding stopped at node {}: {}",
                self.code(),
                node,
                fault.as_str()
            ),
            VrptwError::Solver(msg) => write!(f, "[{}] {}", self.code(), msg),
        }
    }
}

impl std::error::Error for VrptwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VrptwError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VrptwError {
    fn from(err: std::io::Error) -> Self {
        VrptwError::Io(err)
    }
}
