use mcu8051_core::memory::machine::Mcu8051;
use mcu8051_core::prelude::*;

#[test]
fn untouched_ram_and_rom_cells_read_as_zero() {
    let m = Mcu8051::new();
    assert_eq!(m.read_ram(Word::new(0x40)).unwrap(), Byte::ZERO);
    assert_eq!(m.rom.read(Word::new(0x0ff0)).unwrap(), Byte::ZERO);
}

#[test]
fn writing_past_ram_bound_is_memory_limit_exceeded() {
    let mut m = Mcu8051::new();
    let err = m.write_ram(Word::new(0x100), Byte::new(1)).unwrap_err();
    assert!(matches!(err, SimError::MemoryLimitExceeded { .. }));
}

#[test]
fn writing_past_rom_bound_is_memory_limit_exceeded() {
    let mut m = Mcu8051::new();
    let err = m.rom.write(Word::new(0x1000), Byte::new(1)).unwrap_err();
    assert!(matches!(err, SimError::MemoryLimitExceeded { .. }));
}

#[test]
fn sp_starts_at_7_and_push_pop_round_trips() {
    let mut m = Mcu8051::new();
    assert_eq!(m.sp(), Byte::new(0x07));
    m.push(Byte::new(0x11));
    assert_eq!(m.sp(), Byte::new(0x08));
    assert_eq!(m.pop(), Byte::new(0x11));
    assert_eq!(m.sp(), Byte::new(0x07));
}

#[test]
fn named_sfrs_alias_their_fixed_ram_addresses() {
    let mut m = Mcu8051::new();
    for (addr, set, get) in [
        (0xE0u16, (|m: &mut Mcu8051, v| m.set_acc(v)) as fn(&mut Mcu8051, Byte), (|m: &Mcu8051| m.acc()) as fn(&Mcu8051) -> Byte),
        (0xF0, |m, v| m.set_reg_b(v), |m| m.reg_b()),
        (0xD0, |m, v| m.set_psw(v), |m| m.psw()),
    ] {
        set(&mut m, Byte::new(0x77));
        assert_eq!(get(&m), Byte::new(0x77));
        assert_eq!(m.read_ram(Word::new(addr)).unwrap(), Byte::new(0x77));
    }
}

#[test]
fn rom_sort_view_is_address_ordered() {
    let m = Mcu8051::new();
    let sorted = m.rom.sort();
    for window in sorted.windows(2) {
        assert!(window[0].0 < window[1].0);
    }
}
