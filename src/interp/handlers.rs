//! Per-mnemonic execution: resolve operands against the memory model, run
//! the handler's semantics, write back, update flags. Every handler only
//! mutates `Mcu8051` after its reads and opcode dispatch have already
//! succeeded, so a failed instruction never leaves a partial write visible.

use crate::asm::operand::Operand;
use crate::byte::Byte;
use crate::error::{Result, SimError};
use crate::interp::alu;
use crate::interp::{Handler, InstructionRecord, JumpOutcome};
use crate::memory::machine::Mcu8051;
use crate::memory::psw::PswFlag;
use crate::word::Word;

fn read_operand(op: &Operand, m: &Mcu8051) -> Result<Byte> {
    match op {
        Operand::Immediate(b) => Ok(*b),
        Operand::Direct(addr) => m.read_ram(*addr),
        Operand::IndirectReg(n) => {
            let addr = Word::new(m.reg(*n).get() as u16);
            m.read_ram(addr)
        }
        Operand::RegisterDirect(n) => Ok(m.reg(*n)),
        Operand::Accumulator => Ok(m.acc()),
        Operand::CarryFlag => Ok(Byte::new(m.flag(PswFlag::Cy) as u8)),
        Operand::Bit { addr, bit } => Ok(Byte::new(m.read_bit(*addr, *bit)? as u8)),
        Operand::Label(name) => Err(SimError::SyntaxError(format!(
            "label {name} is not a readable operand"
        ))),
    }
}

fn write_operand(op: &Operand, m: &mut Mcu8051, value: Byte) -> Result<()> {
    match op {
        Operand::Direct(addr) => m.write_ram(*addr, value),
        Operand::IndirectReg(n) => {
            let addr = Word::new(m.reg(*n).get() as u16);
            m.write_ram(addr, value)
        }
        Operand::RegisterDirect(n) => {
            m.set_reg(*n, value);
            Ok(())
        }
        Operand::Accumulator => {
            m.set_acc(value);
            Ok(())
        }
        Operand::CarryFlag => {
            m.set_flag(PswFlag::Cy, value.get() != 0);
            Ok(())
        }
        Operand::Bit { addr, bit } => m.write_bit(*addr, *bit, value.get() != 0),
        Operand::Immediate(_) | Operand::Label(_) => Err(SimError::SyntaxError(format!(
            "operand {op:?} is not writable"
        ))),
    }
}

fn apply_arith_flags(m: &mut Mcu8051, r: alu::ArithResult) {
    m.set_flag(PswFlag::Cy, r.cy);
    m.set_flag(PswFlag::Ac, r.ac);
    m.set_flag(PswFlag::P, r.p);
    m.set_flag(PswFlag::Ov, r.ov);
}

/// Set a bit-like operand (`SETB`/`CLR`) to `value`. `C` writes the carry
/// flag directly; anything else is a bit-addressable RAM write.
fn set_bitlike(op: &Operand, m: &mut Mcu8051, value: bool) -> Result<()> {
    match op {
        Operand::CarryFlag => {
            m.set_flag(PswFlag::Cy, value);
            Ok(())
        }
        Operand::Bit { addr, bit } => m.write_bit(*addr, *bit, value),
        Operand::Accumulator if !value => {
            m.set_acc(Byte::ZERO);
            Ok(())
        }
        other => Err(SimError::SyntaxError(format!(
            "operand {other:?} cannot be set/cleared"
        ))),
    }
}

fn complement_bitlike(op: &Operand, m: &mut Mcu8051) -> Result<()> {
    match op {
        Operand::CarryFlag => {
            let cy = m.flag(PswFlag::Cy);
            m.set_flag(PswFlag::Cy, !cy);
            Ok(())
        }
        Operand::Bit { addr, bit } => {
            let cur = m.read_bit(*addr, *bit)?;
            m.write_bit(*addr, *bit, !cur)
        }
        Operand::Accumulator => {
            m.set_acc(Byte::new(!m.acc().get()));
            Ok(())
        }
        other => Err(SimError::SyntaxError(format!(
            "operand {other:?} cannot be complemented"
        ))),
    }
}

/// Execute one decoded instruction against the machine. Returns `Some(_)`
/// only for jump-class handlers — the condition the handler evaluated, not
/// a cursor action; the controller owns turning `Taken` into a jump.
pub fn execute(record: &InstructionRecord, m: &mut Mcu8051) -> Result<Option<JumpOutcome>> {
    let ops = &record.operands;

    match record.handler {
        Handler::Mov => {
            let src = read_operand(&ops[1], m)?;
            write_operand(&ops[0], m, src)?;
            Ok(None)
        }
        Handler::Add => {
            let dest = read_operand(&ops[0], m)?;
            let src = read_operand(&ops[1], m)?;
            let r = alu::add(dest, src);
            write_operand(&ops[0], m, r.value)?;
            apply_arith_flags(m, r);
            Ok(None)
        }
        Handler::Subb => {
            let dest = read_operand(&ops[0], m)?;
            let mut src = read_operand(&ops[1], m)?;
            if m.flag(PswFlag::Cy) {
                m.set_flag(PswFlag::Cy, false);
                src = src.wrapping_add(1);
            }
            let r = alu::sub(dest, src);
            write_operand(&ops[0], m, r.value)?;
            apply_arith_flags(m, r);
            Ok(None)
        }
        Handler::Anl | Handler::Orl | Handler::Xrl => {
            let a = read_operand(&ops[0], m)?;
            let b = read_operand(&ops[1], m)?;
            let value = match record.handler {
                Handler::Anl => Byte::new(a.get() & b.get()),
                Handler::Orl => Byte::new(a.get() | b.get()),
                _ => Byte::new(a.get() ^ b.get()),
            };
            write_operand(&ops[0], m, value)?;
            m.set_flag(PswFlag::P, value.even_parity());
            m.set_flag(PswFlag::Ov, value.bit(7));
            Ok(None)
        }
        Handler::Inc => {
            let v = read_operand(&ops[0], m)?;
            write_operand(&ops[0], m, v.wrapping_add(1))?;
            Ok(None)
        }
        Handler::Dec => {
            let v = read_operand(&ops[0], m)?;
            write_operand(&ops[0], m, v.wrapping_sub(1))?;
            Ok(None)
        }
        Handler::Rl => {
            let v = m.acc().get();
            m.set_acc(Byte::new(v.rotate_left(1)));
            Ok(None)
        }
        Handler::Rr => {
            let v = m.acc().get();
            m.set_acc(Byte::new(v.rotate_right(1)));
            Ok(None)
        }
        Handler::Org => {
            if let Operand::Direct(addr) = ops[0] {
                m.pc = addr;
            }
            Ok(None)
        }
        Handler::Setb => {
            set_bitlike(&ops[0], m, true)?;
            Ok(None)
        }
        Handler::Clr => {
            set_bitlike(&ops[0], m, false)?;
            Ok(None)
        }
        Handler::Cpl => {
            complement_bitlike(&ops[0], m)?;
            Ok(None)
        }
        Handler::Push => {
            let v = read_operand(&ops[0], m)?;
            m.push(v);
            Ok(None)
        }
        Handler::Pop => {
            let v = m.pop();
            write_operand(&ops[0], m, v)?;
            Ok(None)
        }
        Handler::Sjmp | Handler::Ajmp | Handler::Ljmp | Handler::Jmp => Ok(Some(JumpOutcome::Taken)),
        Handler::Jc => Ok(Some(jump_if(m.flag(PswFlag::Cy)))),
        Handler::Jnc => Ok(Some(jump_if(!m.flag(PswFlag::Cy)))),
        Handler::Jz => Ok(Some(jump_if(m.acc() == Byte::ZERO))),
        Handler::Jnz => Ok(Some(jump_if(m.acc() != Byte::ZERO))),
        Handler::Jb => {
            let set = read_operand(&ops[0], m)? != Byte::ZERO;
            Ok(Some(jump_if(set)))
        }
        Handler::Jnb => {
            let set = read_operand(&ops[0], m)? != Byte::ZERO;
            Ok(Some(jump_if(!set)))
        }
        Handler::Jbc => {
            let set = read_operand(&ops[0], m)? != Byte::ZERO;
            if set {
                write_operand(&ops[0], m, Byte::ZERO)?;
            }
            Ok(Some(jump_if(set)))
        }
        Handler::Djnz => {
            let v = read_operand(&ops[0], m)?.wrapping_sub(1);
            write_operand(&ops[0], m, v)?;
            Ok(Some(jump_if(v != Byte::ZERO)))
        }
        Handler::Cjne => {
            let a = read_operand(&ops[0], m)?;
            let b = read_operand(&ops[1], m)?;
            m.set_flag(PswFlag::Cy, a.get() < b.get());
            Ok(Some(jump_if(a != b)))
        }
        Handler::Db => Ok(None),
    }
}

fn jump_if(cond: bool) -> JumpOutcome {
    if cond {
        JumpOutcome::Taken
    } else {
        JumpOutcome::NotTaken
    }
}
