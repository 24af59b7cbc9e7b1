//! Decoded instruction records and the dispatch id the assembler resolves
//! them to. Execution itself lives in [`handlers`]; the flag-computing ALU
//! rules live in [`alu`].

pub mod alu;
pub mod handlers;

use crate::asm::jump::JumpFlag;
use crate::asm::operand::Operand;
use crate::word::Word;

/// Which execution routine a decoded instruction dispatches to, resolved
/// once at assemble time and reused across every `run()`/`step()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Mov,
    Add,
    Subb,
    Anl,
    Orl,
    Xrl,
    Inc,
    Dec,
    Rl,
    Rr,
    Org,
    Setb,
    Clr,
    Cpl,
    Push,
    Pop,
    Sjmp,
    Ajmp,
    Ljmp,
    Jmp,
    Jc,
    Jnc,
    Jz,
    Jnz,
    Jb,
    Jnb,
    Jbc,
    Djnz,
    Cjne,
    Db,
}

/// One decoded line of source: the mnemonic, its dispatch id, its resolved
/// operands, any label defined at this site, the name of a jump target this
/// site references (if it is a jump), and the ROM address its opcode byte
/// (if any) was emitted at.
#[derive(Debug, Clone)]
pub struct InstructionRecord {
    pub mnemonic: String,
    pub handler: Handler,
    pub operands: Vec<Operand>,
    pub label: Option<JumpFlag>,
    pub target_label: Option<String>,
    pub source_line: String,
    pub rom_addr: Word,
}

/// What a jump handler decided, decoupled from cursor movement: the handler
/// only ever judges the condition. The controller — which alone knows the
/// label-name-to-instruction-index mapping — turns `Taken` into an actual
/// cursor jump. This is the data-driven alternative to unwinding the
/// interpreter loop via an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Taken,
    NotTaken,
}
