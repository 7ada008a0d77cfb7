use std::collections::HashMap;

use i860_core::soc::{Bus, IrqLine};
use mockall::mock;

mock! {
    pub SystemBus {}
    impl Bus for SystemBus {
        fn read_u8(&mut self, addr: u32) -> u8;
        fn write_u8(&mut self, addr: u32, val: u8);
        fn read_u16(&mut self, addr: u32) -> u16;
        fn read_u32(&mut self, addr: u32) -> u32;
        fn write_u16(&mut self, addr: u32, val: u16);
        fn write_u32(&mut self, addr: u32, val: u32);
        fn poll_interrupts(&mut self, host_cycles: u64) -> IrqLine;
    }
}

/// A mock that serves `program` (little-endian words at `base`) to byte reads,
/// returns zero elsewhere and never reports an interrupt. Writes carry no
/// expectation; tests add their own.
pub fn program_bus(base: u32, program: &[u32]) -> MockSystemBus {
    let bytes: HashMap<u32, u8> = program
        .iter()
        .enumerate()
        .flat_map(|(i, w)| {
            let addr = base.wrapping_add(4 * i as u32);
            w.to_le_bytes()
                .into_iter()
                .enumerate()
                .map(move |(j, b)| (addr.wrapping_add(j as u32), b))
        })
        .collect();

    let mut bus = MockSystemBus::new();
    bus.expect_read_u8()
        .returning(move |addr| bytes.get(&addr).copied().unwrap_or(0));
    bus.expect_poll_interrupts()
        .returning(|_| IrqLine::Unchanged);
    bus
}
