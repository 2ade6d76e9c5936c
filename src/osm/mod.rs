//! # OSM XML Module
//!
//! Streaming conversion of OpenStreetMap XML into one JSON-like text record
//! per top-level element.
//!
//! ## OSM Structure
//!
//! ```text
//! osm (designated root, produces no output)
//! ├── bounds
//! ├── node*                 one record each
//! │   └── tag*
//! ├── way*                  one record each
//! │   ├── nd*
//! │   └── tag*
//! └── relation*             one record each
//!     ├── member*
//!     └── tag*
//! ```
//!
//! Only attributes are read. Each child becomes an object keyed by its tag
//! name inside the parent record, so repeated children such as `nd` and `tag`
//! yield duplicate keys.

mod coerce;
mod emitter;
mod handler;
pub mod streamer;

pub use coerce::{coerce, write_attributes, AttrValue};
pub use emitter::{LineEmitter, RecordSink};
pub use handler::{HandlerState, OsmRecord, RecordHandler};
pub use streamer::{OsmStreamer, RecordIterator};

/// Tag name of the element wrapping all records
pub const OSM_ROOT_TAG: &str = "osm";
