
/// Logic and shift operations.
pub mod logic_shifts;
