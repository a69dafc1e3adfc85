//! The serialized tree and its `bincode` framing.

use alloc::string::String;
use alloc::vec::Vec;

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::codec::CodecError;

/// A leaf value, or a surrogate's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Primitive {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Int(_) => "signed integer",
            Self::UInt(_) => "unsigned integer",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// Index of a node in [`Blob::nodes`], or null.
pub(crate) type Link = Option<u32>;

/// The whole stream.
///
/// Nodes live in one flat table and refer to their children by index, so
/// reading a stream never recurses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Blob {
    /// Type paths in first-encounter order, indexed by tag.
    pub types: Vec<String>,
    /// Children are written before their parents.
    pub nodes: Vec<Node>,
    pub root: Link,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Node {
    pub tag: u32,
    pub body: Body,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) enum Body {
    Primitive(Primitive),
    Surrogate(Primitive),
    Struct(Vec<Link>),
    List(Vec<Link>),
    Map(Vec<(Link, Link)>),
}

// Varint integers, little endian, and no bytes allowed after the root.
#[inline]
fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_varint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

pub(crate) fn write(blob: &Blob) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(blob)
        .map_err(|e| CodecError::Write(e.to_string()))
}

pub(crate) fn read(bytes: &[u8]) -> Result<Blob, CodecError> {
    options()
        .deserialize(bytes)
        .map_err(|e| CodecError::corrupt(format_args!("malformed stream: {e}")))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Blob, Body, Node, Primitive, read, write};

    fn leaf() -> Blob {
        Blob {
            types: vec!["u8".into()],
            nodes: vec![Node {
                tag: 0,
                body: Body::Primitive(Primitive::UInt(7)),
            }],
            root: Some(0),
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = write(&leaf()).unwrap();
        assert!(read(&bytes).is_ok());

        bytes.push(0);
        assert!(read(&bytes).unwrap_err().is_corrupt());
    }

    #[test]
    fn long_chains_read_flat() {
        let mut blob = leaf();
        blob.types.push("list".into());
        for child in 0..10_000u32 {
            blob.nodes.push(Node {
                tag: 1,
                body: Body::List(vec![Some(child)]),
            });
        }
        blob.root = Some(10_000);

        let bytes = write(&blob).unwrap();
        let back = read(&bytes).unwrap();
        assert_eq!(back.nodes.len(), 10_001);
        assert_eq!(back.root, Some(10_000));
    }
}
