use thiserror::Error;

/// Errors raised when putting a node into a slot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlotError {
    /// A null node was given to a slot that cannot be empty.
    #[error("slot `{slot}` cannot hold a null node")]
    Null { slot: &'static str },
    /// The node's type is not the slot's type.
    #[error("slot `{slot}` cannot hold a node of type `{found}`")]
    Mismatch {
        slot: &'static str,
        found: &'static str,
    },
    /// A map already holds a key equal to the inserted one.
    #[error("map `{map}` already holds an equal key")]
    DuplicateKey { map: &'static str },
}
