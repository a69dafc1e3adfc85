use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use exd_reflect::Reflect;
use exd_reflect::apply::swap_apply;
use exd_reflect::codec::{
    CodecError, DecodeOptions, UnknownTypePolicy, decode, decode_dyn, encode,
};
use exd_reflect::external::{ExternalObject, ExternalRef, ExternalRefTable};
use exd_reflect::registry::TypeRegistry;
use exd_utils::hash::HashMap;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Fixtures

struct Texture(AtomicBool);

impl ExternalObject for Texture {
    fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn texture() -> (Arc<Texture>, ExternalRef) {
    let object = Arc::new(Texture(AtomicBool::new(true)));
    let reference = ExternalRef::new(object.clone());
    (object, reference)
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct Rgb(u8, u8, u8);

exd_reflect::impl_reflect_opaque!(Rgb as "tests::Rgb");

#[derive(Default, Debug, PartialEq)]
struct Stats {
    hp: i32,
    tint: Rgb,
    tags: Vec<Option<String>>,
    scores: HashMap<String, u64>,
}

exd_reflect::impl_reflect_struct!(Stats as "tests::Stats" { hp, tint, tags, scores });

#[derive(Default, Debug)]
struct Secret {
    code: u32,
}

exd_reflect::impl_reflect_struct!(Secret as "tests::Secret" { code });
exd_reflect::auto_register!(Secret);

#[derive(Default, Debug)]
struct Holder {
    any: Option<Box<dyn Reflect>>,
    skin: Option<ExternalRef>,
    backup: Option<ExternalRef>,
    named: HashMap<String, Option<Box<dyn Reflect>>>,
}

exd_reflect::impl_reflect_struct!(Holder as "tests::Holder" { any, skin, backup, named });

fn stats() -> Stats {
    let mut scores = HashMap::default();
    for (name, score) in [("ada", 3), ("bob", 9), ("cy", 27), ("di", 81)] {
        scores.insert(name.to_owned(), score);
    }
    Stats {
        hp: -12,
        tint: Rgb(10, 20, 30),
        tags: vec![Some("a".into()), None, Some(String::new())],
        scores,
    }
}

fn roundtrip<T: exd_reflect::slot::Slot + Reflect>(
    value: &T,
    registry: &TypeRegistry,
    options: &DecodeOptions,
) -> Result<(T, exd_reflect::codec::DecodeReport), CodecError> {
    let mut table = ExternalRefTable::new();
    let bytes = encode(value, registry, &mut table)?;
    decode::<T>(&bytes, registry, &table, options)
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn structural_roundtrip() {
    let registry = TypeRegistry::new();
    let value = stats();
    let (copy, report) = roundtrip(&value, &registry, &DecodeOptions::default()).unwrap();
    assert_eq!(copy, value);
    assert!(report.is_clean());
}

#[test]
fn empty_graph_roundtrip() {
    let registry = TypeRegistry::new();
    let (copy, _) = roundtrip(&Stats::default(), &registry, &DecodeOptions::new()).unwrap();
    assert_eq!(copy, Stats::default());
}

#[test]
fn encoding_is_deterministic() {
    let registry = TypeRegistry::new();
    let value = stats();
    let first = encode(&value, &registry, &mut ExternalRefTable::new()).unwrap();
    let second = encode(&value, &registry, &mut ExternalRefTable::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn external_identity_is_preserved() {
    let registry = TypeRegistry::new();
    let (object, skin) = texture();
    let holder = Holder {
        skin: Some(skin.clone()),
        backup: Some(skin.clone()),
        ..Holder::default()
    };

    let mut table = ExternalRefTable::new();
    let bytes = encode(&holder, &registry, &mut table).unwrap();
    assert_eq!(table.len(), 1);

    object.0.store(false, Ordering::Relaxed);

    let (copy, report) = decode::<Holder>(&bytes, &registry, &table, &DecodeOptions::new()).unwrap();
    assert!(report.is_clean());
    let restored = copy.skin.unwrap();
    assert!(restored.ptr_eq(&skin));
    assert!(restored.is_missing());
    assert!(copy.backup.unwrap().ptr_eq(&skin));
}

#[test]
fn polymorphic_slot_uses_the_registry() {
    let mut registry = TypeRegistry::new();
    registry.register::<Secret>();

    let holder = Holder {
        any: Some(Box::new(Secret { code: 77 })),
        ..Holder::default()
    };
    let (copy, _) = roundtrip(&holder, &registry, &DecodeOptions::new()).unwrap();
    let secret = copy.any.as_deref().and_then(|v| v.downcast_ref::<Secret>());
    assert_eq!(secret.map(|s| s.code), Some(77));
}

#[test]
fn polymorphic_root() {
    let mut registry = TypeRegistry::new();
    registry.register::<Secret>();

    let mut table = ExternalRefTable::new();
    let bytes = encode(&Secret { code: 5 }, &registry, &mut table).unwrap();
    let (root, _) = decode_dyn(&bytes, &registry, &table, &DecodeOptions::new()).unwrap();
    assert_eq!(root.reflect_type_path(), "tests::Secret");
    assert_eq!(root.downcast_ref::<Secret>().map(|s| s.code), Some(5));
}

#[test]
fn unknown_types_are_skipped_by_default() {
    let registry = TypeRegistry::new();

    let mut named = HashMap::default();
    named.insert("kept".to_owned(), Some(Box::new(4_u8) as Box<dyn Reflect>));
    named.insert("lost".to_owned(), Some(Box::new(Secret { code: 1 }) as Box<dyn Reflect>));
    let holder = Holder {
        any: Some(Box::new(Secret { code: 2 })),
        named,
        ..Holder::default()
    };

    let (copy, report) = roundtrip(&holder, &registry, &DecodeOptions::new()).unwrap();
    assert!(copy.any.is_none());
    assert_eq!(copy.named.len(), 1);
    assert!(copy.named.contains_key("kept"));
    assert_eq!(report.skipped(), ["tests::Secret", "tests::Secret"]);
}

#[test]
fn unknown_types_abort_on_request() {
    let registry = TypeRegistry::new();
    let holder = Holder {
        any: Some(Box::new(Secret { code: 2 })),
        ..Holder::default()
    };
    let options = DecodeOptions::new().with_unknown_types(UnknownTypePolicy::Abort);
    let err = roundtrip(&holder, &registry, &options).unwrap_err();
    assert_eq!(
        err,
        CodecError::UnknownType {
            type_path: "tests::Secret".into()
        }
    );
}

#[test]
fn unknown_root_is_an_error() {
    let registry = TypeRegistry::new();
    let mut table = ExternalRefTable::new();
    let bytes = encode(&Secret { code: 5 }, &registry, &mut table).unwrap();
    let err = decode_dyn(&bytes, &registry, &table, &DecodeOptions::new()).unwrap_err();
    assert!(matches!(err, CodecError::UnknownType { .. }));
}

#[test]
fn truncated_stream_is_corrupt() {
    let registry = TypeRegistry::new();
    let mut table = ExternalRefTable::new();
    let bytes = encode(&stats(), &registry, &mut table).unwrap();

    let err = decode::<Stats>(&bytes[..bytes.len() - 1], &registry, &table, &DecodeOptions::new())
        .unwrap_err();
    assert!(matches!(err, CodecError::CorruptData(_)));

    let err = decode::<Stats>(&[0xff; 3], &registry, &table, &DecodeOptions::new()).unwrap_err();
    assert!(err.is_corrupt());
}

#[test]
fn wrong_root_type_is_corrupt() {
    let registry = TypeRegistry::new();
    let mut table = ExternalRefTable::new();
    let bytes = encode(&7_u16, &registry, &mut table).unwrap();
    let err = decode::<String>(&bytes, &registry, &table, &DecodeOptions::new()).unwrap_err();
    assert!(matches!(err, CodecError::CorruptData(_)));
}

#[test]
fn bad_handle_is_out_of_range() {
    let registry = TypeRegistry::new();
    let (_object, skin) = texture();
    let holder = Holder {
        skin: Some(skin),
        ..Holder::default()
    };

    let mut table = ExternalRefTable::new();
    let bytes = encode(&holder, &registry, &mut table).unwrap();

    let empty = ExternalRefTable::new();
    let err = decode::<Holder>(&bytes, &registry, &empty, &DecodeOptions::new()).unwrap_err();
    assert_eq!(err, CodecError::IndexOutOfRange { index: 0, len: 0 });
    assert!(err.is_corrupt());
}

#[test]
fn external_without_surrogate_is_unsupported() {
    let registry = TypeRegistry::empty();
    let (_object, skin) = texture();
    let holder = Holder {
        skin: Some(skin),
        ..Holder::default()
    };
    let err = encode(&holder, &registry, &mut ExternalRefTable::new()).unwrap_err();
    assert!(matches!(err, CodecError::Unsupported { .. }));
}

#[test]
fn decode_then_apply_keeps_the_live_value() {
    let registry = TypeRegistry::new();
    let mut live = Stats::default();
    let before: *const Stats = &live;

    let (mut replica, _) = roundtrip(&stats(), &registry, &DecodeOptions::new()).unwrap();
    swap_apply(&mut live, &mut replica).unwrap();

    assert_eq!(live, stats());
    assert_eq!(replica, Stats::default());
    assert!(std::ptr::eq(before, &live));
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_register_collects_declared_types() {
    let mut registry = TypeRegistry::empty();
    if registry.auto_register() {
        assert!(registry.get_with_type_path("tests::Secret").is_some());
    }
}
