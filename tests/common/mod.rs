use mcu8051_core::prelude::*;

/// Assemble and fully run `source` against a fresh controller, returning the
/// resulting snapshot for assertions.
pub fn run_program(source: &str) -> Snapshot {
    let mut controller = Controller::new();
    controller.assemble(source).expect("assemble should succeed");
    controller.run(None).expect("run should succeed");
    controller.snapshot()
}

pub fn ram_at(snapshot: &Snapshot, addr: u16) -> Byte {
    snapshot
        .ram
        .iter()
        .find(|(w, _)| w.get() == addr)
        .map(|(_, b)| *b)
        .expect("address should be within RAM")
}
