//! # osm2json
//!
//! Streaming conversion of OpenStreetMap XML (`*.osm`) into line-delimited
//! JSON, one record per top-level element. Handy for producing large JSON
//! test datasets.
//!
//! ## Output
//!
//! ```text
//! <osm>
//!   <node id="5" lat="12.5" name="A &quot;B&quot;"/>
//!   <way id="7"><tag k="x" v="1.0"/></way>
//! </osm>
//! ```
//!
//! becomes
//!
//! ```text
//! {"id" : 5, "lat" : 12.5, "name" : "A \"B\""}
//! {"id" : 7, "tag" : {"k" : "x", "v" : 1}}
//! ```
//!
//! Attribute values that look like numbers are written as numbers; integral
//! values lose their fractional part.
//!
//! ## Known limitations
//!
//! The output is good but not perfect JSON. Repeated child tags give
//! duplicate keys, and only double quotes are escaped in strings.
//!
//! ## Example
//!
//! ```rust
//! use osm2json::prelude::*;
//!
//! let xml = r#"<osm><node id="1" lat="51.5"/></osm>"#;
//! let mut emitter = LineEmitter::new(Vec::new());
//! let stats = OsmConverter::new().convert_reader(xml.as_bytes(), &mut emitter)?;
//!
//! assert_eq!(stats.records, 1);
//! assert_eq!(emitter.into_inner(), b"{\"id\" : 1, \"lat\" : 51.5}\n");
//! # Ok::<(), osm2json::ConvertError>(())
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod converter;
pub mod error;
pub mod osm;
pub mod reader;

pub use error::ConvertError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::converter::{ConversionConfig, ConversionStats, OsmConverter};
    pub use crate::error::ConvertError;
    pub use crate::osm::{
        coerce, AttrValue, HandlerState, LineEmitter, OsmRecord, OsmStreamer, RecordHandler,
        RecordSink, OSM_ROOT_TAG,
    };
    pub use crate::reader::{InputSource, DEFAULT_INPUT_BUFFER_SIZE};
}
