//! Addressing-mode classification: turn a raw operand token into a
//! `(pattern, Operand, emitted bytes)` triple.

use crate::byte::Byte;
use crate::error::{Result, SimError};
use crate::word::Word;

/// A resolved operand, carrying enough information for the interpreter's
/// addressing-mode resolver to produce an effective address or an effective
/// value at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `#V` — the literal value itself.
    Immediate(Byte),
    /// Bare hex, or a direct-mapped SFR keyword (`B`, `PSW`, `SP`, `DPL`, `DPH`).
    /// Width is a `Word` because a handful of instructions (`ORG`) use the
    /// same literal-address syntax with a wider range than RAM's 256 cells.
    Direct(Word),
    /// `@R0` / `@R1` — indirect via the named working register.
    IndirectReg(u8),
    /// `R0..R7` used directly (not indirectly, not as a bit address).
    RegisterDirect(u8),
    /// The accumulator, `A`.
    Accumulator,
    /// The carry flag, written `C` in bit-operand position.
    CarryFlag,
    /// `ADDR.N` or `REG.N` — bit-addressable operand.
    Bit { addr: Word, bit: u8 },
    /// A jump target name, resolved by the controller at dispatch time.
    Label(String),
}

impl Operand {
    /// The categorical pattern token used to build opcode table lookup keys.
    /// Individual register numbers collapse to one category (`Rn`, `@Rn`) so
    /// the table doesn't need eight entries per register.
    pub fn pattern(&self) -> &'static str {
        match self {
            Operand::Immediate(_) => "#IMMED",
            Operand::Direct(_) => "DIRECT",
            Operand::IndirectReg(_) => "@Rn",
            Operand::RegisterDirect(_) => "Rn",
            Operand::Accumulator => "A",
            Operand::CarryFlag => "C",
            Operand::Bit { .. } => "BIT",
            Operand::Label(_) => "LABEL",
        }
    }
}

const REGISTER_NAMES: [&str; 8] = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7"];

fn register_index(name: &str) -> Option<u8> {
    REGISTER_NAMES
        .iter()
        .position(|&r| r == name)
        .map(|i| i as u8)
}

/// Direct-mapped SFR keywords that resolve to a RAM address (`B` ->
/// `DIRECT 0xF0`, generalized to the other named SFR aliases sharing the
/// same "keyword resolves to its RAM address" rule).
fn sfr_keyword_addr(name: &str) -> Option<u16> {
    match name {
        "B" => Some(0xF0),
        "PSW" => Some(0xD0),
        "SP" => Some(0x81),
        "DPL" => Some(0x82),
        "DPH" => Some(0x83),
        // Port latches: addressable as bit-addressable SFR bytes even though
        // the actual I/O pins they'd drive on silicon are a non-goal here.
        "P0" => Some(0x80),
        "P1" => Some(0x90),
        "P2" => Some(0xA0),
        "P3" => Some(0xB0),
        _ => None,
    }
}

/// Classify one operand token. `token` has already been uppercased by the
/// lexer. Labels referenced by jump mnemonics are classified upstream (in
/// `asm::mod`), not here.
pub fn classify(token: &str) -> Result<Operand> {
    if let Some(rest) = token.strip_prefix('@') {
        let reg = register_index(rest)
            .ok_or_else(|| SimError::SyntaxError(format!("not a valid indirect register: {token}")))?;
        return Ok(Operand::IndirectReg(reg));
    }

    if let Some(rest) = token.strip_prefix('#') {
        let value = Byte::parse(rest)?;
        return Ok(Operand::Immediate(value));
    }

    if token == "C" {
        return Ok(Operand::CarryFlag);
    }

    if token == "A" || token == "ACC" {
        return Ok(Operand::Accumulator);
    }

    if let Some(reg) = register_index(token) {
        return Ok(Operand::RegisterDirect(reg));
    }

    if let Some(addr) = sfr_keyword_addr(token) {
        return Ok(Operand::Direct(Word::new(addr)));
    }

    if let Some((addr_part, bit_part)) = token.split_once('.') {
        let bit: u8 = bit_part
            .parse()
            .map_err(|_| SimError::SyntaxError(format!("invalid bit index: {token}")))?;
        if bit > 7 {
            return Err(SimError::SyntaxError(format!("bit index out of range: {token}")));
        }
        let addr = if let Some(reg_addr) = sfr_keyword_addr(addr_part) {
            Word::new(reg_addr)
        } else if addr_part == "A" || addr_part == "ACC" {
            Word::new(0xE0)
        } else {
            Word::new(Byte::parse(addr_part)?.get() as u16)
        };
        return Ok(Operand::Bit { addr, bit });
    }

    // Bare hex: a direct memory/ROM address literal.
    let value = crate::byte::parse_hex_literal(token)
        .map_err(|_| SimError::SyntaxError(format!("unrecognized operand: {token}")))?;
    Ok(Operand::Direct(Word::new(value as u16)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_addressing_mode() {
        assert_eq!(classify("@R0").unwrap(), Operand::IndirectReg(0));
        assert_eq!(classify("#0x55").unwrap(), Operand::Immediate(Byte::new(0x55)));
        assert_eq!(classify("P1.3").unwrap(), Operand::Bit { addr: Word::new(0x90), bit: 3 });
        assert_eq!(classify("A").unwrap(), Operand::Accumulator);
        assert_eq!(classify("B").unwrap(), Operand::Direct(Word::new(0xF0)));
        assert_eq!(classify("R3").unwrap(), Operand::RegisterDirect(3));
        assert_eq!(classify("0x30").unwrap(), Operand::Direct(Word::new(0x30)));
        assert_eq!(classify("C").unwrap(), Operand::CarryFlag);
    }

    #[test]
    fn bit_index_must_be_0_to_7() {
        assert!(classify("0x20.8").is_err());
    }
}
