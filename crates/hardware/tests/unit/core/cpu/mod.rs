

/// `pfam` and `pfsm` data paths.
pub mod dual_ops;



/// Graphics instructions through the core.
pub mod graphics;


/// External interrupt line and the reset/bus-hold pins.
pub mod interrupts;

/// Integer loads, stores and byte order.
pub mod memory;

/// Accesses seen by the bus, through a mock.
pub mod mock_bus;

/// Register snapshots and deltas.
pub mod snapshot;
