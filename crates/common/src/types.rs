use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// Summary counts rendered by the Gotify dashboard widget.
///
/// Produced fresh on every request; nothing here is cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    pub applications: u64,
    pub clients: u64,
    pub messages: u64,
}

/// JSON array of `len` empty objects, written element by element.
///
/// Dashboard widgets that only read `.length` from an upstream listing accept
/// this in place of the real records. Nothing is allocated per element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceholderList {
    pub len: u64,
}

impl PlaceholderList {
    pub fn new(len: u64) -> Self {
        Self { len }
    }
}

#[derive(Serialize)]
struct Empty {}

impl Serialize for PlaceholderList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(usize::try_from(self.len).ok())?;
        for _ in 0..self.len {
            seq.serialize_element(&Empty {})?;
        }
        seq.end()
    }
}

/// `{"messages": [...]}` payload for the message widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageListing {
    pub messages: PlaceholderList,
}
