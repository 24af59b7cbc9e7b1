//! The execution controller: state machine, call-stack of decoded
//! instructions, step/run dispatch, and the read-only `snapshot()` a
//! front-end renders.

use std::collections::HashMap;

use crate::asm::{self, DisplayLine};
use crate::byte::Byte;
use crate::error::{Result, SimError};
use crate::interp::handlers;
use crate::interp::{InstructionRecord, JumpOutcome};
use crate::memory::machine::Mcu8051;
use crate::memory::psw::PswFlag;
use crate::word::Word;

/// `Fresh -> Assembled -> Running <-> Paused -> Done`, collapsed to the
/// states actually observable between calls: `run()`/`step()` return to the
/// caller between every instruction, so there is no separate in-progress
/// "Running" value to hold — the caller is always looking at `Assembled`
/// (nothing stepped yet), `Paused` (stepped, more to go), or `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Fresh,
    Assembled,
    Paused,
    Done,
}

/// The result of a bounded `run()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    BudgetExhausted,
}

/// Bit-projected PSW flags, named for display rather than requiring callers
/// to re-derive them from the raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PswFlags {
    pub p: bool,
    pub user_defined: bool,
    pub ov: bool,
    pub rs0: bool,
    pub rs1: bool,
    pub f0: bool,
    pub ac: bool,
    pub cy: bool,
}

/// A read-only view of the machine for a front-end to render: RAM, ROM,
/// named register aliases, PSW flags, the current register bank's contents,
/// the assembler's display map, and where the controller is in its program.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub ram: Vec<(Word, Byte)>,
    pub rom: Vec<(Word, Byte)>,
    pub acc: Byte,
    pub b: Byte,
    pub psw: Byte,
    pub sp: Byte,
    pub dptr: Word,
    pub pc: Word,
    pub flags: PswFlags,
    pub bank_registers: [Byte; 8],
    pub display: Vec<DisplayLine>,
    pub state: ControllerState,
    pub cursor: usize,
}

/// The execution controller. Owns exclusive, mutable access to the machine
/// and the decoded program; nothing in the core is safe for concurrent
/// mutation — callers serialize one request at a time.
#[derive(Debug, Clone)]
pub struct Controller {
    machine: Mcu8051,
    records: Vec<InstructionRecord>,
    label_index: HashMap<String, usize>,
    display: Vec<DisplayLine>,
    cursor: usize,
    state: ControllerState,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            machine: Mcu8051::new(),
            records: Vec::new(),
            label_index: HashMap::new(),
            display: Vec::new(),
            cursor: 0,
            state: ControllerState::Fresh,
        }
    }

    /// Replace the entire core with a fresh one. Every call site, every
    /// resolved label, all of RAM/ROM and the cursor are discarded together.
    pub fn reset(&mut self) {
        *self = Controller::new();
    }

    /// Apply a caller-supplied map of flag name -> boolean onto the PSW,
    /// e.g. to seed initial conditions before `assemble()`/`run()`.
    pub fn set_flags(&mut self, flags: &[(&str, bool)]) {
        self.machine.set_flags_by_name(flags);
    }

    /// Parse and emit `source`, replacing any previously assembled program.
    /// A failing line aborts the pipeline (`assemble()` aborts the call),
    /// but every record decoded from an earlier line in the same source is
    /// still committed to the controller and runnable — the controller
    /// becomes `Assembled` with the cursor at 0 whether or not the whole
    /// source assembled cleanly.
    pub fn assemble(&mut self, source: &str) -> Result<()> {
        let (output, outcome) = asm::assemble(&mut self.machine, source);
        self.records = output.records;
        self.label_index = output.label_index;
        self.display = output.display;
        self.cursor = 0;
        self.state = ControllerState::Assembled;
        outcome
    }

    fn require_ready(&self) -> Result<()> {
        match self.state {
            ControllerState::Assembled | ControllerState::Paused | ControllerState::Done => Ok(()),
            ControllerState::Fresh => Err(SimError::ControllerNotReady),
        }
    }

    /// Execute exactly one instruction and return the cursor afterward. A
    /// no-op (returns the final cursor unchanged) once the program has run
    /// to completion.
    pub fn step(&mut self) -> Result<usize> {
        self.require_ready()?;
        if self.cursor >= self.records.len() {
            self.state = ControllerState::Done;
            return Ok(self.cursor);
        }

        let record = self.records[self.cursor].clone();
        let outcome = handlers::execute(&record, &mut self.machine)?;

        match outcome {
            Some(JumpOutcome::Taken) => {
                let target = record
                    .target_label
                    .as_ref()
                    .and_then(|name| self.label_index.get(name))
                    .copied()
                    .ok_or_else(|| {
                        SimError::SyntaxError(format!(
                            "jump target {:?} has no resolved instruction index",
                            record.target_label
                        ))
                    })?;
                self.cursor = target;
                if let Some(target_record) = self.records.get(target) {
                    self.machine.pc = target_record.rom_addr;
                }
            }
            Some(JumpOutcome::NotTaken) | None => {
                self.cursor += 1;
            }
        }

        self.state = if self.cursor >= self.records.len() {
            ControllerState::Done
        } else {
            ControllerState::Paused
        };
        Ok(self.cursor)
    }

    /// Advance from the current cursor to the end of the program. With
    /// `max_steps` set, stops early and returns `BudgetExhausted` rather than
    /// looping forever on a buggy/malicious program; `None` runs unbounded.
    pub fn run(&mut self, max_steps: Option<u32>) -> Result<RunOutcome> {
        self.require_ready()?;
        let mut steps = 0u32;
        while self.cursor < self.records.len() {
            if let Some(max) = max_steps {
                if steps >= max {
                    self.state = ControllerState::Paused;
                    return Ok(RunOutcome::BudgetExhausted);
                }
            }
            self.step()?;
            steps += 1;
        }
        self.state = ControllerState::Done;
        Ok(RunOutcome::Completed)
    }

    /// Direct user edit of a RAM cell, independent of the decoded program.
    pub fn write_memory(&mut self, addr: Word, value: Byte) -> Result<()> {
        self.machine.write_ram(addr, value)
    }

    pub fn snapshot(&self) -> Snapshot {
        let psw = self.machine.psw();
        Snapshot {
            ram: self.machine.ram.sort(),
            rom: self.machine.rom.sort(),
            acc: self.machine.acc(),
            b: self.machine.reg_b(),
            psw,
            sp: self.machine.sp(),
            dptr: self.machine.dptr(),
            pc: self.machine.pc,
            flags: PswFlags {
                p: self.machine.flag(PswFlag::P),
                user_defined: self.machine.flag(PswFlag::UserDefined),
                ov: self.machine.flag(PswFlag::Ov),
                rs0: self.machine.flag(PswFlag::Rs0),
                rs1: self.machine.flag(PswFlag::Rs1),
                f0: self.machine.flag(PswFlag::F0),
                ac: self.machine.flag(PswFlag::Ac),
                cy: self.machine.flag(PswFlag::Cy),
            },
            bank_registers: std::array::from_fn(|i| self.machine.reg(i as u8)),
            display: self.display.clone(),
            state: self.state,
            cursor: self.cursor,
        }
    }
}
