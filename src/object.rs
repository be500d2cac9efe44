//! PDF object types.

use std::collections::HashMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(HashMap<String, Object>),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: HashMap<String, Object>,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&HashMap<String, Object>> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Insert an entry into a dictionary or stream dictionary.
    ///
    /// Has no effect on other object types.
    pub fn set(&mut self, key: &str, value: Object) {
        match self {
            Object::Dictionary(d) | Object::Stream { dict: d, .. } => {
                d.insert(key.to_string(), value);
            },
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::new(12, 0).to_string(), "12 0 R");
    }

    #[test]
    fn test_stream_dict_access() {
        let mut stream = Object::Stream {
            dict: HashMap::new(),
            data: bytes::Bytes::from_static(b"BT ET"),
        };
        stream.set("Filter", Object::Name("FlateDecode".to_string()));

        let dict = stream.as_dict().unwrap();
        assert_eq!(dict.get("Filter").and_then(Object::as_name), Some("FlateDecode"));
    }

    #[test]
    fn test_set_ignored_on_scalars() {
        let mut obj = Object::Integer(3);
        obj.set("Key", Object::Null);
        assert_eq!(obj, Object::Integer(3));
        assert!(obj.as_dict().is_none());
    }
}
