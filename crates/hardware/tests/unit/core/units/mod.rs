/// Integer ALU.
pub mod alu;
