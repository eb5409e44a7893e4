// Coil Warehouse Library
// Inventory tracking for metal coils over a local SQLite store.

pub mod coil;
pub mod error;
pub mod server;
pub mod storage;
