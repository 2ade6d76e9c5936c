//! Depth-tracking record builder.
//!
//! The handler consumes element start/end events in document order and builds
//! the text of one record per top-level element:
//!
//! ```text
//! <osm>                          ignored (designated root)
//!   <way id="7">                 Idle -> InRecord, buffer = {"id" : 7
//!     <tag k="x" v="1.0"/>       buffer += , "tag" : {"k" : "x", "v" : 1}
//!   </way>                       buffer += }  -> record emitted, back to Idle
//! </osm>                         ignored
//! ```
//!
//! Children are written as objects keyed by tag name. Siblings with the same
//! tag name therefore produce duplicate keys in one object; this is the
//! established output format and is kept as is.

use super::coerce::write_attributes;
use super::OSM_ROOT_TAG;

/// One finished top-level element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmRecord {
    /// Tag name of the top-level element (`node`, `way`, `relation`, ...)
    pub name: String,
    /// JSON-like text of the element and its descendants
    pub json: String,
}

/// Handler state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HandlerState {
    /// Between records
    #[default]
    Idle,
    /// Inside a top-level element
    InRecord {
        /// Tag name of the open top-level element
        name: String,
        /// Record text built so far
        buffer: String,
        /// Nesting depth, 1 for the top-level element itself
        depth: usize,
    },
}

/// Event consumer that turns top-level elements into [`OsmRecord`]s
#[derive(Debug, Clone)]
pub struct RecordHandler {
    root_tag: String,
    state: HandlerState,
    attributes_seen: usize,
}

impl RecordHandler {
    /// Create a handler for documents wrapped in `<osm>`
    pub fn new() -> Self {
        Self::with_root_tag(OSM_ROOT_TAG)
    }

    /// Create a handler with a different designated root tag
    pub fn with_root_tag(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into(),
            state: HandlerState::Idle,
            attributes_seen: 0,
        }
    }

    /// The designated root tag
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// Current state
    pub fn state(&self) -> &HandlerState {
        &self.state
    }

    /// Current nesting depth (0 when idle)
    pub fn depth(&self) -> usize {
        match &self.state {
            HandlerState::Idle => 0,
            HandlerState::InRecord { depth, .. } => *depth,
        }
    }

    /// Whether a top-level element is open
    pub fn in_record(&self) -> bool {
        matches!(self.state, HandlerState::InRecord { .. })
    }

    /// Total attributes serialized so far
    pub fn attributes_seen(&self) -> usize {
        self.attributes_seen
    }

    /// Handle an element start.
    pub fn start_element<I, K, V>(&mut self, name: &str, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match &mut self.state {
            HandlerState::Idle => {
                if name == self.root_tag {
                    return;
                }
                let mut buffer = String::from("{");
                self.attributes_seen += write_attributes(&mut buffer, attrs);
                self.state = HandlerState::InRecord {
                    name: name.to_string(),
                    buffer,
                    depth: 1,
                };
            }
            HandlerState::InRecord { buffer, depth, .. } => {
                *depth += 1;
                buffer.push_str(", \"");
                buffer.push_str(name);
                buffer.push_str("\" : {");
                self.attributes_seen += write_attributes(buffer, attrs);
            }
        }
    }

    /// Handle an element end, returning the record when a top-level element closes.
    ///
    /// An end event while idle (the designated root closing) has no effect.
    pub fn end_element(&mut self, _name: &str) -> Option<OsmRecord> {
        match &mut self.state {
            HandlerState::Idle => None,
            HandlerState::InRecord { buffer, depth, .. } => {
                buffer.push('}');
                if *depth > 1 {
                    *depth -= 1;
                    return None;
                }
                match std::mem::take(&mut self.state) {
                    HandlerState::InRecord { name, buffer, .. } => Some(OsmRecord {
                        name,
                        json: buffer,
                    }),
                    HandlerState::Idle => None,
                }
            }
        }
    }
}

impl Default for RecordHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ATTRS: [(&str, &str); 0] = [];

    #[test]
    fn test_root_is_ignored() {
        let mut handler = RecordHandler::new();
        handler.start_element("osm", [("version", "0.6")]);
        assert_eq!(handler.state(), &HandlerState::Idle);
        assert_eq!(handler.end_element("osm"), None);
        assert_eq!(handler.depth(), 0);
    }

    #[test]
    fn test_enter_and_exit_record() {
        let mut handler = RecordHandler::new();
        handler.start_element("node", [("id", "5"), ("lat", "12.5")]);
        assert!(handler.in_record());
        assert_eq!(handler.depth(), 1);

        let record = handler.end_element("node").unwrap();
        assert_eq!(record.name, "node");
        assert_eq!(record.json, r#"{"id" : 5, "lat" : 12.5}"#);
        assert_eq!(handler.state(), &HandlerState::Idle);
        assert_eq!(handler.attributes_seen(), 2);
    }

    #[test]
    fn test_nested_children() {
        let mut handler = RecordHandler::new();
        handler.start_element("way", [("id", "7")]);
        handler.start_element("nd", [("ref", "1")]);
        assert_eq!(handler.end_element("nd"), None);
        handler.start_element("tag", [("k", "x"), ("v", "1.0")]);
        assert_eq!(handler.depth(), 2);
        assert_eq!(handler.end_element("tag"), None);

        let record = handler.end_element("way").unwrap();
        assert_eq!(
            record.json,
            r#"{"id" : 7, "nd" : {"ref" : 1}, "tag" : {"k" : "x", "v" : 1}}"#
        );
    }

    #[test]
    fn test_duplicate_sibling_keys_are_kept() {
        let mut handler = RecordHandler::new();
        handler.start_element("way", [("id", "1")]);
        for r in ["10", "11"] {
            handler.start_element("nd", [("ref", r)]);
            handler.end_element("nd");
        }
        let record = handler.end_element("way").unwrap();
        assert_eq!(
            record.json,
            r#"{"id" : 1, "nd" : {"ref" : 10}, "nd" : {"ref" : 11}}"#
        );
    }

    #[test]
    fn test_record_without_attributes() {
        let mut handler = RecordHandler::new();
        handler.start_element("bounds", NO_ATTRS);
        handler.start_element("child", NO_ATTRS);
        handler.end_element("child");
        let record = handler.end_element("bounds").unwrap();
        assert_eq!(record.json, r#"{, "child" : {}}"#);
    }

    #[test]
    fn test_root_name_inside_record_is_a_child() {
        let mut handler = RecordHandler::new();
        handler.start_element("node", [("id", "1")]);
        handler.start_element("osm", [("a", "b")]);
        assert_eq!(handler.depth(), 2);
        assert_eq!(handler.end_element("osm"), None);
        let record = handler.end_element("node").unwrap();
        assert_eq!(record.json, r#"{"id" : 1, "osm" : {"a" : "b"}}"#);
    }

    #[test]
    fn test_custom_root_tag() {
        let mut handler = RecordHandler::with_root_tag("root");
        assert_eq!(handler.root_tag(), "root");
        assert_eq!(RecordHandler::new().root_tag(), OSM_ROOT_TAG);
        handler.start_element("root", NO_ATTRS);
        handler.start_element("node", [("id", "5")]);
        let record = handler.end_element("node").unwrap();
        assert_eq!(record.json, r#"{"id" : 5}"#);
        assert_eq!(handler.end_element("root"), None);
    }

    #[test]
    fn test_cycles_per_record() {
        let mut handler = RecordHandler::new();
        let mut records = Vec::new();
        for id in ["1", "2", "3"] {
            handler.start_element("node", [("id", id)]);
            records.extend(handler.end_element("node"));
        }
        let json: Vec<_> = records.iter().map(|r| r.json.as_str()).collect();
        assert_eq!(json, [r#"{"id" : 1}"#, r#"{"id" : 2}"#, r#"{"id" : 3}"#]);
    }
}
