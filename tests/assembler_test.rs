use mcu8051_core::asm;
use mcu8051_core::memory::machine::Mcu8051;
use mcu8051_core::prelude::*;

#[test]
fn addressing_modes_resolve_through_every_form() {
    let mut m = Mcu8051::new();
    let (out, outcome) = asm::assemble(
        &mut m,
        "MOV A, #0x10\nMOV A, 0x20\nMOV A, @R0\nMOV A, R1\nSETB P1.3",
    );
    outcome.unwrap();
    assert_eq!(out.records.len(), 5);
}

#[test]
fn b_keyword_resolves_to_direct_0xf0() {
    let mut m = Mcu8051::new();
    let (out, outcome) = asm::assemble(&mut m, "MOV B, #0x09");
    outcome.unwrap();
    match &out.records[0].operands[0] {
        mcu8051_core::asm::operand::Operand::Direct(addr) => assert_eq!(addr.get(), 0xF0),
        other => panic!("expected Direct(0xF0), got {other:?}"),
    }
}

#[test]
fn org_directive_relocates_subsequent_code() {
    let mut m = Mcu8051::new();
    let (out, outcome) = asm::assemble(&mut m, "ORG 0x100\nMOV A, #0x01");
    outcome.unwrap();
    assert_eq!(out.records[0].rom_addr, Word::new(0x100));
}

#[test]
fn db_directive_records_an_instruction_with_no_opcode_byte() {
    let mut m = Mcu8051::new();
    let (out, outcome) = asm::assemble(&mut m, "DB 0x01, 0x02, 0x03");
    outcome.unwrap();
    assert_eq!(out.display[0].hex, "0x01 0x02 0x03");
    assert_eq!(m.rom.read(Word::new(2)).unwrap(), Byte::new(0x03));
}

#[test]
fn hex_literal_forms_are_all_accepted_in_operand_position() {
    let mut m = Mcu8051::new();
    for literal in ["#0x10", "#0X10", "#10h", "#10H", "#10"] {
        let src = format!("MOV A, {literal}");
        let (out, outcome) = asm::assemble(&mut m, &src);
        outcome.unwrap();
        match out.records[0].operands[0] {
            mcu8051_core::asm::operand::Operand::Immediate(b) => assert_eq!(b, Byte::new(0x10)),
            _ => panic!("expected immediate operand"),
        }
    }
}

#[test]
fn unrecognized_operand_is_a_syntax_error() {
    let mut m = Mcu8051::new();
    let (_out, outcome) = asm::assemble(&mut m, "MOV A, @@@");
    assert!(matches!(outcome.unwrap_err(), SimError::SyntaxError(_)));
}

#[test]
fn earlier_lines_remain_assembled_when_a_later_line_fails() {
    let mut m = Mcu8051::new();
    let (out, outcome) = asm::assemble(&mut m, "MOV A, #0x01\nFROB X, Y");
    assert!(matches!(outcome.unwrap_err(), SimError::OpcodeNotFound(_)));
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].mnemonic, "MOV");
}
