//! Asset custody.
//!
//! [`InMemoryLedger`] implements [`Ledger`](crate::traits::Ledger) and
//! [`NativeWrapper`](crate::traits::NativeWrapper) over plain maps.
//! [`LedgerBatch`] groups the transfers of one router or migrator call so
//! they land together or not at all.

mod batch;
mod in_memory;

pub use batch::{LedgerBatch, LedgerEntry};
pub use in_memory::InMemoryLedger;
