//! # `h5features` main library
//!
//! This library reads and writes h5features files: HDF5 containers holding named
//! collections of time-aligned feature frames, such as the frame-by-frame output
//! of a speech features extraction pipeline.
//!
//! ## Architecture
//!
//! The stored unit is an `Item`: a name, a dense `Features` matrix (`size` frames
//! of `dim` float64 values), one `Times` stamp per frame (a center time, or a
//! `[start, stop]` interval), and an optional recursive `Properties` map.
//!
//! Items live in HDF5 groups.  A group is born at one of four on-disk layouts and
//! keeps it for life, recorded in its `version` attribute:
//! * versions 1.0 through 1.2 pack all items into group-wide `features`, `labels`
//!   and `items` datasets plus an `index` of per-item frame ranges (1.0 is
//!   read-only, 1.2 adds properties)
//! * version 2.0 gives each item its own sub-group, with the feature and times
//!   dimensions held constant across the group
//!
//! The `Reader` and `Writer` facades hide the layouts: they open a group, read or
//! stamp its version, and dispatch to the matching codec.  Partial reads map a
//! time window to a frame range through the timestamps and fetch only the
//! corresponding hyperslab from disk.
//!
//! ## Example
//!
//! ```no_run
//! use h5features::{Features,Times,TimesFormat,Properties,Item,Reader,Writer,Version};
//!
//! fn main() -> Result<(),h5features::Error> {
//!     let item = Item::new(
//!         "utterance-001",
//!         Features::new(vec![0.0,1.0,2.0,3.0],2,true)?,
//!         Times::new(vec![0.0,0.1],TimesFormat::Simple,true)?,
//!         Properties::new(),
//!         true)?;
//!     Writer::new("features.h5","mfcc",false,true,Version::V2_0)?.write(&item)?;
//!     let back = Reader::new("features.h5","mfcc")?.read_item("utterance-001",false)?;
//!     assert_eq!(item,back);
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous and run on the calling thread.  The library
//! assumes exclusive use of each open file: a writer must not be shared across
//! threads without external locking, and concurrent writers to one file are not
//! synchronized.

pub mod error;
pub mod features;
pub mod times;
pub mod properties;
pub mod item;
pub mod version;
mod codec;
pub mod reader;
pub mod writer;
pub mod testing;

pub use error::Error;
pub use features::Features;
pub use times::{Times,TimesFormat};
pub use properties::{Properties,Value};
pub use item::Item;
pub use version::Version;
pub use reader::Reader;
pub use writer::Writer;
