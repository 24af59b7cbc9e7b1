//! Single-pass-with-fixup assembler: source text in, a decoded instruction
//! list and a parallel source-line-to-hex display map out.

pub mod jump;
pub mod lexer;
pub mod opcode_table;
pub mod operand;

use std::collections::HashMap;

use crate::byte::Byte;
use crate::error::{Result, SimError};
use crate::interp::InstructionRecord;
use crate::memory::machine::Mcu8051;
use crate::word::Word;
use jump::{JumpFlag, PendingJump};

/// One source line's original text paired with its assembled hex encoding
/// (opcode byte, then immediate bytes, space-separated; empty for lines that
/// emit nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub source: String,
    pub hex: String,
}

/// Everything `assemble()` produces: the decoded program, a label-name to
/// instruction-index map for jump dispatch, and the display map.
#[derive(Debug, Clone)]
pub struct AssembleOutput {
    pub records: Vec<InstructionRecord>,
    pub label_index: HashMap<String, usize>,
    pub display: Vec<DisplayLine>,
}

fn emit_byte(m: &mut Mcu8051, value: Byte, hex_parts: &mut Vec<String>) -> Result<()> {
    m.rom.write(m.pc, value)?;
    hex_parts.push(value.to_hex());
    m.pc = m.pc.wrapping_add(1);
    Ok(())
}

/// Run the full per-line pipeline over `source`, writing ROM bytes and the
/// program counter into `machine` as it goes. On success, `machine.pc` is
/// left just past the last emitted byte; callers that want execution to
/// start from the top should reset `machine.pc` themselves (the controller
/// does this by construction, since `run()`/`step()` walk the instruction
/// list by cursor, not by re-reading ROM).
///
/// Always returns the `AssembleOutput` built so far, paired with the
/// `Result` of the run: a line that fails aborts the pipeline, but every
/// record decoded from an earlier line in the same source stays in the
/// returned output and is runnable — only the failing line and everything
/// after it is missing.
pub fn assemble(machine: &mut Mcu8051, source: &str) -> (AssembleOutput, Result<()>) {
    let mut records: Vec<InstructionRecord> = Vec::new();
    let mut label_addr: HashMap<String, Word> = HashMap::new();
    let mut label_index: HashMap<String, usize> = HashMap::new();
    let mut pending: Vec<PendingJump> = Vec::new();
    let mut display: Vec<DisplayLine> = Vec::new();

    let outcome: Result<()> = (|| {
        for raw_line in source.lines() {
            let parsed = lexer::parse_line(raw_line);
            let def_pc = machine.pc;

            if let Some(label_name) = &parsed.label {
                label_addr.insert(label_name.clone(), def_pc);
                label_index.insert(label_name.clone(), records.len());
                resolve_pending(machine, label_name, def_pc, &mut pending, &mut display)?;
            }

            let Some(mnemonic) = parsed.mnemonic else {
                display.push(DisplayLine {
                    source: raw_line.to_string(),
                    hex: String::new(),
                });
                continue;
            };

            if mnemonic == "DB" || mnemonic == "DEFB" {
                let mut hex_parts = Vec::new();
                for token in &parsed.operands {
                    let value = Byte::parse(token.trim_start_matches('#'))?;
                    emit_byte(machine, value, &mut hex_parts)?;
                }
                records.push(InstructionRecord {
                    mnemonic,
                    handler: crate::interp::Handler::Db,
                    operands: Vec::new(),
                    label: parsed.label.as_ref().map(|n| JumpFlag::new(n.clone(), def_pc, raw_line.to_string())),
                    target_label: None,
                    source_line: raw_line.to_string(),
                    rom_addr: def_pc,
                });
                display.push(DisplayLine {
                    source: raw_line.to_string(),
                    hex: hex_parts.join(" "),
                });
                continue;
            }

            if mnemonic == "ORG" {
                let token = parsed
                    .operands
                    .first()
                    .ok_or_else(|| SimError::SyntaxError("ORG requires an address operand".to_string()))?;
                machine.pc = Word::parse(token)?;
                display.push(DisplayLine {
                    source: raw_line.to_string(),
                    hex: String::new(),
                });
                continue;
            }

            let mut operand_tokens = parsed.operands.clone();
            let target_label = if jump::is_jump_mnemonic(&mnemonic) {
                let last = operand_tokens
                    .pop()
                    .ok_or_else(|| SimError::SyntaxError(format!("{mnemonic} requires a target label")))?;
                Some(last)
            } else {
                None
            };

            let operands: Vec<operand::Operand> = operand_tokens
                .iter()
                .map(|t| operand::classify(t))
                .collect::<Result<_>>()?;
            let patterns: Vec<&str> = operands.iter().map(|o| o.pattern()).collect();
            let entry = opcode_table::lookup(&mnemonic, &patterns)?;

            let rom_addr = machine.pc;
            let mut hex_parts = Vec::new();
            if let Some(opcode) = entry.opcode {
                emit_byte(machine, Byte::new(opcode), &mut hex_parts)?;
            }
            for op in &operands {
                match op {
                    operand::Operand::Immediate(b) => emit_byte(machine, *b, &mut hex_parts)?,
                    operand::Operand::Direct(w) => emit_byte(machine, Byte::new(w.get() as u8), &mut hex_parts)?,
                    operand::Operand::Bit { addr, bit } => {
                        emit_byte(machine, Byte::new(addr.get() as u8), &mut hex_parts)?;
                        emit_byte(machine, Byte::new(*bit), &mut hex_parts)?;
                    }
                    operand::Operand::IndirectReg(_)
                    | operand::Operand::RegisterDirect(_)
                    | operand::Operand::Accumulator
                    | operand::Operand::CarryFlag
                    | operand::Operand::Label(_) => {}
                }
            }

            let mut placeholder_addr = None;
            if target_label.is_some() {
                placeholder_addr = Some(machine.pc);
                emit_byte(machine, Byte::new(0xFF), &mut hex_parts)?;
                emit_byte(machine, Byte::new(0xFF), &mut hex_parts)?;
            }

            let display_index = display.len();
            records.push(InstructionRecord {
                mnemonic: mnemonic.clone(),
                handler: entry.handler,
                operands,
                label: parsed.label.as_ref().map(|n| JumpFlag::new(n.clone(), def_pc, raw_line.to_string())),
                target_label: target_label.clone(),
                source_line: raw_line.to_string(),
                rom_addr,
            });
            display.push(DisplayLine {
                source: raw_line.to_string(),
                hex: hex_parts.join(" "),
            });

            if let Some(label_name) = target_label {
                if let Some(&addr) = label_addr.get(&label_name) {
                    patch_jump(machine, placeholder_addr.unwrap(), addr, display_index, &mut display)?;
                } else {
                    pending.push(PendingJump {
                        label: label_name,
                        patch_addr: placeholder_addr.unwrap(),
                        line: raw_line.to_string(),
                        display_index,
                    });
                }
            }
        }

        if let Some(first) = pending.first() {
            return Err(SimError::SyntaxError(format!(
                "unresolved label {:?} referenced at {:?}",
                first.label, first.line
            )));
        }

        Ok(())
    })();

    (
        AssembleOutput {
            records,
            label_index,
            display,
        },
        outcome,
    )
}

/// Patch both placeholder bytes at `patch_addr`/`patch_addr+1` with the
/// low/high byte of `target_addr`, and rewrite the display entry's trailing
/// `0xff 0xff` tokens to the resolved address.
fn patch_jump(
    machine: &mut Mcu8051,
    patch_addr: Word,
    target_addr: Word,
    display_index: usize,
    display: &mut [DisplayLine],
) -> Result<()> {
    let low = Byte::new(target_addr.get() as u8);
    let high = Byte::new((target_addr.get() >> 8) as u8);
    machine.rom.write(patch_addr, low)?;
    machine.rom.write(patch_addr.wrapping_add(1), high)?;

    if let Some(entry) = display.get_mut(display_index) {
        let mut parts: Vec<String> = entry.hex.split(' ').map(str::to_string).collect();
        let len = parts.len();
        if len >= 2 {
            parts[len - 2] = low.to_hex();
            parts[len - 1] = high.to_hex();
            entry.hex = parts.join(" ");
        }
    }
    Ok(())
}

fn resolve_pending(
    machine: &mut Mcu8051,
    label_name: &str,
    def_pc: Word,
    pending: &mut Vec<PendingJump>,
    display: &mut [DisplayLine],
) -> Result<()> {
    let mut remaining = Vec::new();
    for p in pending.drain(..) {
        if p.label == label_name {
            patch_jump(machine, p.patch_addr, def_pc, p.display_index, display)?;
        } else {
            remaining.push(p);
        }
    }
    *pending = remaining;
    Ok(())
}
