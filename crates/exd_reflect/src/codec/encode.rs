use alloc::string::String;
use alloc::vec::Vec;

use exd_utils::hash::HashMap;

use crate::Reflect;
use crate::codec::wire::{self, Blob, Body, Link, Node};
use crate::codec::{CodecError, EncodeContext, MAX_DEPTH};
use crate::external::ExternalRefTable;
use crate::ops::ReflectRef;
use crate::registry::{TypeMeta, TypeRegistry};
use crate::slot::DynSlot;

/// Encodes the graph below `root`.
///
/// External references are added to `externals`, which the caller clears
/// at the start of a pass. On error the table may hold some of the
/// graph's references.
pub fn encode(
    root: &dyn Reflect,
    registry: &TypeRegistry,
    externals: &mut ExternalRefTable,
) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GraphEncoder::new(registry, externals);
    let root = encoder.encode_node(Some(root), 0)?;
    encoder.finish(root)
}

struct GraphEncoder<'a> {
    registry: &'a TypeRegistry,
    cx: EncodeContext<'a>,
    types: Vec<&'static str>,
    tags: HashMap<&'static str, u32>,
    nodes: Vec<Node>,
}

impl<'a> GraphEncoder<'a> {
    fn new(registry: &'a TypeRegistry, externals: &'a mut ExternalRefTable) -> Self {
        Self {
            registry,
            cx: EncodeContext::new(externals),
            types: Vec::new(),
            tags: HashMap::default(),
            nodes: Vec::new(),
        }
    }

    fn finish(self, root: Link) -> Result<Vec<u8>, CodecError> {
        let blob = Blob {
            types: self.types.into_iter().map(String::from).collect(),
            nodes: self.nodes,
            root,
        };
        wire::write(&blob)
    }

    fn tag(&mut self, type_path: &'static str) -> u32 {
        if let Some(&tag) = self.tags.get(type_path) {
            return tag;
        }
        let tag = self.types.len() as u32;
        self.types.push(type_path);
        self.tags.insert(type_path, tag);
        tag
    }

    #[inline]
    fn encode_slot(&mut self, slot: &dyn DynSlot, depth: usize) -> Result<Link, CodecError> {
        self.encode_node(slot.node(), depth)
    }

    fn encode_node(&mut self, node: Option<&dyn Reflect>, depth: usize) -> Result<Link, CodecError> {
        let Some(node) = node else {
            return Ok(None);
        };
        let type_path = node.reflect_type_path();
        if depth > MAX_DEPTH {
            return Err(CodecError::corrupt(format_args!(
                "`{type_path}` is nested deeper than {MAX_DEPTH} levels"
            )));
        }
        let tag = self.tag(type_path);
        let next = depth + 1;

        let registry = self.registry;
        let body = match registry.get(node.ty_id()).and_then(TypeMeta::surrogate) {
            Some(surrogate) => Body::Surrogate(surrogate.encode(node, &mut self.cx)?),
            None => match node.reflect_ref() {
                ReflectRef::Opaque(leaf) => Body::Primitive(leaf.to_primitive()?),
                ReflectRef::Struct(target) => Body::Struct(
                    target
                        .iter_fields()
                        .map(|(_, field)| self.encode_slot(field, next))
                        .collect::<Result<_, _>>()?,
                ),
                ReflectRef::List(target) => Body::List(
                    target
                        .iter()
                        .map(|item| self.encode_slot(item, next))
                        .collect::<Result<_, _>>()?,
                ),
                ReflectRef::Map(target) => {
                    let mut entries = target
                        .iter()
                        .map(|(key, value)| Ok((self.order_key(key, next)?, key, value)))
                        .collect::<Result<Vec<_>, CodecError>>()?;
                    entries.sort_by(|a, b| a.0.cmp(&b.0));

                    let mut links = Vec::with_capacity(entries.len());
                    for (_, key, value) in entries {
                        links.push((self.encode_slot(key, next)?, self.encode_slot(value, next)?));
                    }
                    Body::Map(links)
                }
                ReflectRef::External(_) => return Err(CodecError::Unsupported { type_path }),
            },
        };

        let index = u32::try_from(self.nodes.len())
            .map_err(|_| CodecError::corrupt("the graph holds too many nodes"))?;
        self.nodes.push(Node { tag, body });
        Ok(Some(index))
    }

    /// Bytes that sort map entries the same way in every pass.
    ///
    /// The key is encoded on its own. External references inside it are
    /// ordered by object address, which is stable while the objects live.
    fn order_key(&self, key: &dyn DynSlot, depth: usize) -> Result<Vec<u8>, CodecError> {
        let mut externals = ExternalRefTable::new();
        let mut encoder = GraphEncoder::new(self.registry, &mut externals);
        let root = encoder.encode_slot(key, depth)?;
        let mut bytes = encoder.finish(root)?;
        for reference in externals.iter().flatten() {
            bytes.extend_from_slice(&reference.addr().to_le_bytes());
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use exd_utils::hash::HashMap;

    use super::encode;
    use crate::Reflect;
    use crate::codec::{CodecError, MAX_DEPTH};
    use crate::external::ExternalRefTable;
    use crate::registry::TypeRegistry;

    fn nested(levels: usize) -> Vec<Box<dyn Reflect>> {
        let mut list: Vec<Box<dyn Reflect>> = Vec::new();
        for _ in 0..levels {
            list = vec![Box::new(list) as Box<dyn Reflect>];
        }
        list
    }

    #[test]
    fn nesting_is_bounded() {
        let registry = TypeRegistry::new();
        let mut table = ExternalRefTable::new();

        assert!(encode(&nested(MAX_DEPTH), &registry, &mut table).is_ok());
        let error = encode(&nested(MAX_DEPTH + 1), &registry, &mut table).unwrap_err();
        assert!(matches!(error, CodecError::CorruptData(_)));
    }

    #[test]
    fn map_order_ignores_insertion_history() {
        let registry = TypeRegistry::new();
        let mut table = ExternalRefTable::new();

        let mut grown: HashMap<u32, u32> = HashMap::default();
        for key in 0..300 {
            grown.insert(key, key * 2);
        }
        for key in 0..250 {
            grown.remove(&key);
        }

        let mut fresh: HashMap<u32, u32> = HashMap::default();
        for key in (250..300).rev() {
            fresh.insert(key, key * 2);
        }

        assert_eq!(
            encode(&grown, &registry, &mut table).unwrap(),
            encode(&fresh, &registry, &mut table).unwrap(),
        );
    }
}
