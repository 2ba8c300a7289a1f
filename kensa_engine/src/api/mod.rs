//! Session API and host-record collaborator

pub mod clock;
pub mod errors;
pub mod session;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::SessionError;
pub use session::{Explanation, ScanReport, ScanSession};
pub use store::{HostRecordStore, MemoryStore, StoreError};
