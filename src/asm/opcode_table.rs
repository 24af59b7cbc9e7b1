//! `MNEMONIC PATTERN1 PATTERN2...` -> opcode byte + dispatch handler.
//!
//! The key is built from the mnemonic and the uppercased addressing-mode
//! pattern of each non-label operand. Byte values are assigned to keep the
//! table internally consistent and plausible for an 8051-family encoding;
//! this core never re-decodes them at run time (the interpreter dispatches
//! on the already-resolved [`Handler`], not on raw opcode bytes), so the
//! exact values only matter for ROM display fidelity.

use crate::error::{Result, SimError};
use crate::interp::Handler;

/// A found table entry. `opcode` is `None` only for the `DB` pseudo-op,
/// which reserves a table slot but emits no opcode byte at all.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeEntry {
    pub opcode: Option<u8>,
    pub handler: Handler,
}

fn build_key(mnemonic: &str, patterns: &[&str]) -> String {
    if patterns.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{mnemonic} {}", patterns.join(" "))
    }
}

/// Look up a decoded `(mnemonic, operand patterns)` pair. `patterns` excludes
/// the trailing jump-target label, which never participates in opcode
/// selection — jump mnemonics key purely on their non-label operands (empty
/// for the unconditional/flag-only jumps).
pub fn lookup(mnemonic: &str, patterns: &[&str]) -> Result<OpcodeEntry> {
    let key = build_key(mnemonic, patterns);

    let found: Option<(Option<u8>, Handler)> = match key.as_str() {
        "MOV DIRECT #IMMED" => Some((Some(0x75), Handler::Mov)),
        "MOV DIRECT DIRECT" => Some((Some(0x85), Handler::Mov)),
        "MOV DIRECT Rn" => Some((Some(0x88), Handler::Mov)),
        "MOV DIRECT @Rn" => Some((Some(0x86), Handler::Mov)),
        "MOV DIRECT A" => Some((Some(0xF5), Handler::Mov)),
        "MOV A #IMMED" => Some((Some(0x74), Handler::Mov)),
        "MOV A DIRECT" => Some((Some(0xE5), Handler::Mov)),
        "MOV A Rn" => Some((Some(0xE8), Handler::Mov)),
        "MOV A @Rn" => Some((Some(0xE6), Handler::Mov)),
        "MOV Rn #IMMED" => Some((Some(0x78), Handler::Mov)),
        "MOV Rn DIRECT" => Some((Some(0xA8), Handler::Mov)),
        "MOV Rn A" => Some((Some(0xF8), Handler::Mov)),
        "MOV @Rn #IMMED" => Some((Some(0x76), Handler::Mov)),
        "MOV @Rn DIRECT" => Some((Some(0xA6), Handler::Mov)),
        "MOV @Rn A" => Some((Some(0xF6), Handler::Mov)),
        "MOV BIT C" => Some((Some(0x92), Handler::Mov)),
        "MOV C BIT" => Some((Some(0xA2), Handler::Mov)),

        "ADD A #IMMED" => Some((Some(0x24), Handler::Add)),
        "ADD A DIRECT" => Some((Some(0x25), Handler::Add)),
        "ADD A Rn" => Some((Some(0x28), Handler::Add)),
        "ADD A @Rn" => Some((Some(0x26), Handler::Add)),

        "SUBB A #IMMED" => Some((Some(0x94), Handler::Subb)),
        "SUBB A DIRECT" => Some((Some(0x95), Handler::Subb)),
        "SUBB A Rn" => Some((Some(0x98), Handler::Subb)),
        "SUBB A @Rn" => Some((Some(0x96), Handler::Subb)),

        "ANL A #IMMED" => Some((Some(0x54), Handler::Anl)),
        "ANL A DIRECT" => Some((Some(0x55), Handler::Anl)),
        "ANL DIRECT A" => Some((Some(0x52), Handler::Anl)),
        "ANL DIRECT #IMMED" => Some((Some(0x53), Handler::Anl)),
        "ANL DIRECT DIRECT" => Some((Some(0x5A), Handler::Anl)),

        "ORL A #IMMED" => Some((Some(0x44), Handler::Orl)),
        "ORL A DIRECT" => Some((Some(0x45), Handler::Orl)),
        "ORL DIRECT A" => Some((Some(0x42), Handler::Orl)),
        "ORL DIRECT #IMMED" => Some((Some(0x43), Handler::Orl)),
        "ORL DIRECT DIRECT" => Some((Some(0x4A), Handler::Orl)),

        "XRL A #IMMED" => Some((Some(0x64), Handler::Xrl)),
        "XRL A DIRECT" => Some((Some(0x65), Handler::Xrl)),
        "XRL DIRECT A" => Some((Some(0x62), Handler::Xrl)),
        "XRL DIRECT #IMMED" => Some((Some(0x63), Handler::Xrl)),
        "XRL DIRECT DIRECT" => Some((Some(0x6A), Handler::Xrl)),

        "INC A" => Some((Some(0x04), Handler::Inc)),
        "INC DIRECT" => Some((Some(0x05), Handler::Inc)),
        "INC Rn" => Some((Some(0x08), Handler::Inc)),
        "INC @Rn" => Some((Some(0x06), Handler::Inc)),

        "DEC A" => Some((Some(0x14), Handler::Dec)),
        "DEC DIRECT" => Some((Some(0x15), Handler::Dec)),
        "DEC Rn" => Some((Some(0x18), Handler::Dec)),
        "DEC @Rn" => Some((Some(0x16), Handler::Dec)),

        "RL A" => Some((Some(0x23), Handler::Rl)),
        "RR A" => Some((Some(0x03), Handler::Rr)),

        "SETB C" => Some((Some(0xD3), Handler::Setb)),
        "SETB BIT" => Some((Some(0xD2), Handler::Setb)),
        "CLR C" => Some((Some(0xC3), Handler::Clr)),
        "CLR BIT" => Some((Some(0xC2), Handler::Clr)),
        "CLR A" => Some((Some(0xE4), Handler::Clr)),
        "CPL C" => Some((Some(0xB3), Handler::Cpl)),
        "CPL BIT" => Some((Some(0xB2), Handler::Cpl)),
        "CPL A" => Some((Some(0xF4), Handler::Cpl)),

        "PUSH DIRECT" => Some((Some(0xC0), Handler::Push)),
        "POP DIRECT" => Some((Some(0xD0), Handler::Pop)),

        "SJMP" => Some((Some(0x80), Handler::Sjmp)),
        "AJMP" => Some((Some(0x01), Handler::Ajmp)),
        "LJMP" => Some((Some(0x02), Handler::Ljmp)),
        "JMP" => Some((Some(0x73), Handler::Jmp)),
        "JC" => Some((Some(0x40), Handler::Jc)),
        "JNC" => Some((Some(0x50), Handler::Jnc)),
        "JZ" => Some((Some(0x60), Handler::Jz)),
        "JNZ" => Some((Some(0x70), Handler::Jnz)),
        "JB BIT" => Some((Some(0x20), Handler::Jb)),
        "JNB BIT" => Some((Some(0x30), Handler::Jnb)),
        "JBC BIT" => Some((Some(0x10), Handler::Jbc)),
        "DJNZ Rn" => Some((Some(0xD8), Handler::Djnz)),
        "DJNZ DIRECT" => Some((Some(0xD5), Handler::Djnz)),
        "CJNE A #IMMED" => Some((Some(0xB4), Handler::Cjne)),
        "CJNE A DIRECT" => Some((Some(0xB5), Handler::Cjne)),
        "CJNE Rn #IMMED" => Some((Some(0xB8), Handler::Cjne)),
        "CJNE @Rn #IMMED" => Some((Some(0xB6), Handler::Cjne)),

        _ => None,
    };

    found
        .map(|(opcode, handler)| OpcodeEntry { opcode, handler })
        .ok_or_else(|| SimError::OpcodeNotFound(key))
}
