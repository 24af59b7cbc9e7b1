//! Program Status Word: a single RAM byte (aliased at `0xD0`) whose bits name
//! the architectural flags. Flag reads/writes are a pure projection of that
//! byte; there is no flag storage separate from the byte itself.

use crate::byte::Byte;

/// Bit position of each PSW flag, fixed by the architecture (bit 0 = P).
/// The assembler's bit-addressable operand syntax (`PSW.3` for `RS0`) depends
/// on this exact numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PswFlag {
    P = 0,
    UserDefined = 1,
    Ov = 2,
    Rs0 = 3,
    Rs1 = 4,
    F0 = 5,
    Ac = 6,
    Cy = 7,
}

impl PswFlag {
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Read a single flag out of a PSW byte.
pub fn get(psw: Byte, flag: PswFlag) -> bool {
    psw.bit(flag.bit())
}

/// Return a PSW byte with `flag` set to `value`; all other bits preserved.
pub fn set(psw: Byte, flag: PswFlag, value: bool) -> Byte {
    psw.with_bit(flag.bit(), value)
}
