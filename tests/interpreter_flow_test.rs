use mcu8051_core::prelude::*;

#[test]
fn jc_jnc_dispatch_on_carry() {
    let mut c = Controller::new();
    c.set_flags(&[("CY", true)]);
    c.assemble("JC TAKEN\nMOV A, #0xEE\nTAKEN: MOV A, #0x01")
        .unwrap();
    c.run(None).unwrap();
    assert_eq!(c.snapshot().acc, Byte::new(0x01));
}

#[test]
fn jz_jnz_dispatch_on_accumulator_zero() {
    let mut c = Controller::new();
    c.assemble("MOV A, #0x00\nJZ TAKEN\nMOV A, #0xEE\nTAKEN: MOV B, #0x01")
        .unwrap();
    c.run(None).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.acc, Byte::ZERO);
    assert_eq!(snap.b, Byte::new(0x01));
}

#[test]
fn jb_jumps_when_bit_is_set() {
    let mut c = Controller::new();
    c.assemble("SETB P1.2\nJB P1.2, TAKEN\nMOV A, #0xEE\nTAKEN: MOV A, #0x01")
        .unwrap();
    c.run(None).unwrap();
    assert_eq!(c.snapshot().acc, Byte::new(0x01));
}

#[test]
fn jbc_jumps_and_clears_the_bit() {
    let mut c = Controller::new();
    c.assemble("SETB P1.2\nJBC P1.2, TAKEN\nTAKEN: MOV A, #0x01")
        .unwrap();
    c.run(None).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.acc, Byte::new(0x01));
    assert!(!snap.ram.iter().find(|(w, _)| w.get() == 0x90).unwrap().1.bit(2));
}

#[test]
fn djnz_loops_until_the_register_hits_zero() {
    let mut c = Controller::new();
    c.assemble("MOV R0, #0x03\nLOOP: INC 0x40\nDJNZ R0, LOOP\nMOV A, #0x99")
        .unwrap();
    c.run(None).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.ram.iter().find(|(w, _)| w.get() == 0x40).unwrap().1, Byte::new(0x03));
    assert_eq!(snap.acc, Byte::new(0x99));
}

#[test]
fn cjne_jumps_when_operands_differ_and_sets_carry_on_borrow() {
    let mut c = Controller::new();
    c.assemble("MOV A, #0x01\nCJNE A, #0x02, TAKEN\nMOV B, #0xEE\nTAKEN: MOV B, #0x01")
        .unwrap();
    c.run(None).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.b, Byte::new(0x01));
    assert!(snap.flags.cy);
}

#[test]
fn sjmp_is_an_unconditional_jump() {
    let mut c = Controller::new();
    c.assemble("SJMP TAKEN\nMOV A, #0xEE\nTAKEN: MOV A, #0x01")
        .unwrap();
    c.run(None).unwrap();
    assert_eq!(c.snapshot().acc, Byte::new(0x01));
}

#[test]
fn run_with_no_jumps_executes_every_record_in_order() {
    let mut c = Controller::new();
    c.assemble("MOV A, #0x01\nMOV B, #0x02\nMOV 0x30, #0x03")
        .unwrap();
    c.run(None).unwrap();
    let snap = c.snapshot();
    assert_eq!(snap.acc, Byte::new(0x01));
    assert_eq!(snap.b, Byte::new(0x02));
}
