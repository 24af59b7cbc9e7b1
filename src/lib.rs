//! An 8051 microcontroller simulator core: memory/register model,
//! assembler, instruction interpreter, and execution controller. HTTP
//! front-ends, rendering and session handling are external collaborators
//! that consume [`Controller`]'s public surface.

pub mod asm;
pub mod byte;
pub mod controller;
pub mod error;
pub mod interp;
pub mod memory;
pub mod word;

pub mod prelude {
    pub use crate::byte::Byte;
    pub use crate::controller::{Controller, ControllerState, PswFlags, RunOutcome, Snapshot};
    pub use crate::error::{Result, SimError};
    pub use crate::memory::machine::Mcu8051;
    pub use crate::memory::psw::PswFlag;
    pub use crate::word::Word;
}
