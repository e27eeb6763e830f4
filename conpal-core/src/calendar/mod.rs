//! Calendar export: mappings, the host abstraction and the exporter.

mod entry;
mod export;
mod host;
mod ics;
mod mapping;

pub use entry::*;
pub use export::*;
pub use host::*;
pub use ics::*;
pub use mapping::*;
