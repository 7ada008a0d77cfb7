use i860_core::config::GeneralConfig;
use i860_core::soc::{Bus, Ram};
use i860_core::{Config, Cpu, StepOutcome};
use tracing_subscriber::EnvFilter;

/// Size of the RAM window mapped at physical address zero.
pub const RAM_SIZE: usize = 0x10_0000;

/// Where test programs are loaded and the core starts.
pub const PROGRAM_BASE: u32 = 0x1000;

/// Routes `tracing` output through the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct TestContext {
    pub cpu: Cpu<Ram>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            general: GeneralConfig {
                start_pc: Some(PROGRAM_BASE),
                ..GeneralConfig::default()
            },
            ..Config::default()
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        Self {
            cpu: Cpu::new(Ram::new(0, RAM_SIZE), config),
        }
    }

    /// Load a sequence of instruction words at `addr` and set the PC.
    pub fn load_program(mut self, addr: u32, instructions: &[u32]) -> Self {
        self.cpu.bus_mut().load_words(addr, instructions);
        self.cpu.pc = addr;
        self
    }

    /// Load a program at [`PROGRAM_BASE`].
    pub fn program(self, instructions: &[u32]) -> Self {
        self.load_program(PROGRAM_BASE, instructions)
    }

    pub fn step(&mut self) -> StepOutcome {
        self.cpu.step()
    }

    /// Step `n` times, asserting none of them trapped.
    pub fn step_n(&mut self, n: usize) {
        for i in 0..n {
            let outcome = self.cpu.step();
            assert_eq!(
                outcome,
                StepOutcome::Executed,
                "step {i} at pc {:#010x}",
                self.cpu.pc
            );
        }
    }

    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u32 {
        self.cpu.regs.read(reg)
    }

    pub fn set_f32(&mut self, reg: usize, val: f32) {
        self.cpu.regs.write_f32(reg, val.to_bits());
    }

    pub fn get_f32(&self, reg: usize) -> f32 {
        f32::from_bits(self.cpu.regs.read_f32(reg))
    }

    pub fn set_f64(&mut self, reg: usize, val: f64) {
        self.cpu.regs.write_f64(reg, val.to_bits());
    }

    pub fn get_f64(&self, reg: usize) -> f64 {
        f64::from_bits(self.cpu.regs.read_f64(reg))
    }

    /// Stores `bytes` in RAM at a physical address.
    pub fn poke(&mut self, addr: u32, bytes: &[u8]) {
        self.cpu.bus_mut().load(addr, bytes);
    }

    /// Reads `N` bytes of RAM at a physical address.
    pub fn peek<const N: usize>(&mut self, addr: u32) -> [u8; N] {
        let bus = self.cpu.bus_mut();
        std::array::from_fn(|i| bus.read_u8(addr.wrapping_add(i as u32)))
    }
}
