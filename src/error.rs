use thiserror::Error;

use crate::flags::Triage;

/// Malformed command handed to [`crate::Registry::classify`].
///
/// The caller should answer the client with a protocol error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("bad multi-bulk for command")]
    EmptyCommand,

    #[error("bad command length, too short or too long ({0} bytes)")]
    BadOpcodeLength(usize),
}

/// Rejected administrative reclassification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReclassifyError {
    #[error("can not find [{0}] command.")]
    UnknownCommand(String),

    /// `flag` is the tag the command already carries.
    #[error("cmd[{name}] is {flag} command.")]
    ConflictingFlag { name: String, flag: Triage },
}
