use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::codec::wire::{self, Blob, Body, Link, Node};
use crate::codec::{
    CodecError, DecodeContext, DecodeOptions, DecodeReport, MAX_DEPTH, UnknownTypePolicy,
};
use crate::external::ExternalRefTable;
use crate::ops::ReflectMut;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::slot::{Slot, SlotHint};

/// Decodes a stream into a new value of slot type `T`.
///
/// `T` is usually the concrete type that was encoded. Decoding into
/// `Option<Box<dyn Reflect>>` accepts any registered root type.
///
/// # Examples
///
/// ```
/// use exd_reflect::codec::{DecodeOptions, decode, encode};
/// use exd_reflect::external::ExternalRefTable;
/// use exd_reflect::registry::TypeRegistry;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Score { points: u64, owner: String }
/// exd_reflect::impl_reflect_struct!(Score as "demo::Score" { points, owner });
///
/// let registry = TypeRegistry::new();
/// let mut table = ExternalRefTable::new();
/// let score = Score { points: 40, owner: "ada".into() };
///
/// let bytes = encode(&score, &registry, &mut table).unwrap();
/// let (copy, report) =
///     decode::<Score>(&bytes, &registry, &table, &DecodeOptions::default()).unwrap();
///
/// assert_eq!(copy, score);
/// assert!(report.is_clean());
/// ```
pub fn decode<T: Slot>(
    bytes: &[u8],
    registry: &TypeRegistry,
    externals: &ExternalRefTable,
    options: &DecodeOptions,
) -> Result<(T, DecodeReport), CodecError> {
    let Blob { types, nodes, root } = wire::read(bytes)?;
    let mut decoder = GraphDecoder {
        registry,
        cx: DecodeContext::new(externals),
        types: &types,
        nodes: nodes.into_iter().map(Some).collect(),
        options: *options,
        report: DecodeReport::default(),
    };

    match decoder.produce(root, T::slot_hint(), 0)? {
        Produced::Value(node) => Ok((T::from_node(node)?, decoder.report)),
        Produced::Skipped => Err(CodecError::UnknownType {
            type_path: decoder
                .report
                .skipped()
                .last()
                .cloned()
                .unwrap_or_default(),
        }),
    }
}

/// Decodes a stream whose root may be of any registered type.
#[inline]
pub fn decode_dyn(
    bytes: &[u8],
    registry: &TypeRegistry,
    externals: &ExternalRefTable,
    options: &DecodeOptions,
) -> Result<(Box<dyn Reflect>, DecodeReport), CodecError> {
    decode::<Box<dyn Reflect>>(bytes, registry, externals, options)
}

enum Produced {
    Value(Option<Box<dyn Reflect>>),
    Skipped,
}

struct GraphDecoder<'a> {
    registry: &'a TypeRegistry,
    cx: DecodeContext<'a>,
    types: &'a [String],
    // Emptied as nodes are used, so no node is decoded twice.
    nodes: Vec<Option<Node>>,
    options: DecodeOptions,
    report: DecodeReport,
}

impl<'a> GraphDecoder<'a> {
    fn type_path(&self, tag: u32) -> Result<&'a str, CodecError> {
        let types = self.types;
        types
            .get(tag as usize)
            .map(String::as_str)
            .ok_or_else(|| CodecError::corrupt(format_args!("type tag {tag} is out of range")))
    }

    fn take(&mut self, link: Link) -> Result<Option<Node>, CodecError> {
        let Some(index) = link else {
            return Ok(None);
        };
        let len = self.nodes.len();
        match self.nodes.get_mut(index as usize) {
            Some(node) => node.take().map(Some).ok_or_else(|| {
                CodecError::corrupt(format_args!("node {index} is referenced more than once"))
            }),
            None => Err(CodecError::corrupt(format_args!(
                "node {index} is out of range, the stream holds {len}"
            ))),
        }
    }

    fn unknown(&mut self, type_path: &str) -> Result<Produced, CodecError> {
        match self.options.unknown_types {
            UnknownTypePolicy::Abort => Err(CodecError::UnknownType {
                type_path: type_path.into(),
            }),
            UnknownTypePolicy::SkipSubtree => {
                log::warn!("skipping a node of unknown type `{type_path}` and its children");
                self.report.push_skipped(type_path);
                Ok(Produced::Skipped)
            }
        }
    }

    fn produce(&mut self, link: Link, hint: SlotHint, depth: usize) -> Result<Produced, CodecError> {
        if link.is_some() && depth > MAX_DEPTH {
            return Err(CodecError::corrupt(format_args!(
                "the stream nests deeper than {MAX_DEPTH} levels"
            )));
        }
        let Some(Node { tag, body }) = self.take(link)? else {
            return Ok(Produced::Value(None));
        };
        let type_path = self.type_path(tag)?;
        let registry = self.registry;
        let meta = registry.get_with_type_path(type_path);

        if let Body::Surrogate(value) = body {
            let Some(surrogate) = meta.and_then(TypeMeta::surrogate) else {
                return self.unknown(type_path);
            };
            let node = surrogate.decode(value, &self.cx)?;
            return Ok(Produced::Value(Some(node)));
        }

        let fresh = hint
            .fresh_for(type_path)
            .or_else(|| meta.and_then(TypeMeta::default_value));
        let Some(mut node) = fresh else {
            if meta.is_some() || hint.type_path() == Some(type_path) {
                return Err(CodecError::corrupt(format_args!(
                    "type `{type_path}` has no default constructor"
                )));
            }
            return self.unknown(type_path);
        };

        self.fill(node.as_mut(), body, depth + 1)?;
        Ok(Produced::Value(Some(node)))
    }

    fn fill(&mut self, node: &mut dyn Reflect, body: Body, depth: usize) -> Result<(), CodecError> {
        let type_path = node.reflect_type_path();
        match (node.reflect_mut(), body) {
            (ReflectMut::Opaque(leaf), Body::Primitive(value)) => leaf.apply_primitive(value),
            (ReflectMut::Struct(target), Body::Struct(fields)) => {
                if fields.len() != target.field_len() {
                    return Err(CodecError::corrupt(format_args!(
                        "`{type_path}` declares {} fields but the stream holds {}",
                        target.field_len(),
                        fields.len()
                    )));
                }
                for (index, link) in fields.into_iter().enumerate() {
                    let Some(slot) = target.field_at_mut(index) else {
                        return Err(CodecError::corrupt(format_args!(
                            "`{type_path}` has no field {index}"
                        )));
                    };
                    if let Produced::Value(value) = self.produce(link, slot.hint(), depth)? {
                        slot.set_node(value)?;
                    }
                }
                Ok(())
            }
            (ReflectMut::List(target), Body::List(items)) => {
                target.clear();
                let hint = target.element_hint();
                for link in items {
                    if let Produced::Value(value) = self.produce(link, hint, depth)? {
                        target.push_node(value)?;
                    }
                }
                Ok(())
            }
            (ReflectMut::Map(target), Body::Map(entries)) => {
                target.clear();
                let (key_hint, value_hint) = (target.key_hint(), target.value_hint());
                for (key, value) in entries {
                    let key = self.produce(key, key_hint, depth)?;
                    let value = self.produce(value, value_hint, depth)?;
                    if let (Produced::Value(key), Produced::Value(value)) = (key, value) {
                        target.insert_node(key, value)?;
                    }
                }
                Ok(())
            }
            (target, _) => Err(CodecError::corrupt(format_args!(
                "stream body does not match {} node `{type_path}`",
                target.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::decode;
    use crate::Reflect;
    use crate::codec::wire::{self, Blob, Body, Link, Node};
    use crate::codec::{CodecError, DecodeOptions, MAX_DEPTH, encode};
    use crate::external::ExternalRefTable;
    use crate::registry::TypeRegistry;

    type Nested = Vec<Box<dyn Reflect>>;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Nested>();
        registry
    }

    fn lists(children: Vec<Vec<Link>>, root: Link) -> Vec<u8> {
        use crate::info::TypePath;

        let blob = Blob {
            types: vec![Nested::type_path().into()],
            nodes: children
                .into_iter()
                .map(|items| Node {
                    tag: 0,
                    body: Body::List(items),
                })
                .collect(),
            root,
        };
        wire::write(&blob).unwrap()
    }

    // Node `i` holds node `i - 1`, the root is the last one.
    fn chain(levels: u32) -> Vec<u8> {
        let mut children = vec![Vec::new()];
        for child in 0..levels {
            children.push(vec![Some(child)]);
        }
        lists(children, Some(levels))
    }

    fn decode_nested(bytes: &[u8]) -> Result<Nested, CodecError> {
        let table = ExternalRefTable::new();
        decode::<Nested>(bytes, &registry(), &table, &DecodeOptions::default()).map(|(v, _)| v)
    }

    #[test]
    fn deep_streams_are_corrupt() {
        assert!(decode_nested(&chain(MAX_DEPTH as u32)).is_ok());

        for levels in [MAX_DEPTH as u32 + 1, 100_000] {
            let error = decode_nested(&chain(levels)).unwrap_err();
            assert!(matches!(error, CodecError::CorruptData(_)), "{error:?}");
        }
    }

    #[test]
    fn shared_and_cyclic_nodes_are_corrupt() {
        let shared = lists(vec![Vec::new(), vec![Some(0), Some(0)]], Some(1));
        assert!(decode_nested(&shared).unwrap_err().is_corrupt());

        let cycle = lists(vec![vec![Some(0)]], Some(0));
        assert!(decode_nested(&cycle).unwrap_err().is_corrupt());

        let dangling = lists(vec![vec![Some(7)]], Some(0));
        assert!(decode_nested(&dangling).unwrap_err().is_corrupt());
    }

    #[test]
    fn nested_lists_roundtrip() {
        let mut value: Nested = Vec::new();
        for _ in 0..8 {
            value = vec![
                Box::new(value) as Box<dyn Reflect>,
                Box::new(Nested::new()) as Box<dyn Reflect>,
            ];
        }
        let registry = registry();
        let mut table = ExternalRefTable::new();
        let bytes = encode(&value, &registry, &mut table).unwrap();

        let copy = decode_nested(&bytes).unwrap();
        assert_eq!(encode(&copy, &registry, &mut table).unwrap(), bytes);
    }
}
