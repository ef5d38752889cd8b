//! Provider implementations
//!
//! Each backend implements every capability interface the actions declare,
//! with the shared signaling contract: a duplicate email yields `Ok(None)`
//! from the user write, an unknown id yields `Ok(None)` from the fetch, and
//! backend faults surface as `StoreError`.

pub mod memory;
pub mod sled;

pub use self::memory::MemoryStore;
pub use self::sled::SledStore;
