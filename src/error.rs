use thiserror::Error;

/// Error kinds surfaced by the core. Every fallible operation returns one of
/// these; the core never panics on user-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid hex literal: {0:?}")]
    InvalidHex(String),

    #[error("address out of range: {0:?}")]
    InvalidMemoryAddress(String),

    #[error("memory limit exceeded: address {addr:#06x} is outside 0x{base:04x}..0x{limit:04x}")]
    MemoryLimitExceeded { addr: u32, base: u32, limit: u32 },

    #[error("opcode not found: {0}")]
    OpcodeNotFound(String),

    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("controller is not ready; call assemble() first")]
    ControllerNotReady,
}

pub type Result<T> = std::result::Result<T, SimError>;
