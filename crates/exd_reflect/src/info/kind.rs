use core::fmt;

/// The shape of a reflected node, which decides how the codec walks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A leaf converted to and from a single [`Primitive`](crate::codec::Primitive).
    Opaque,
    /// A composite with a declared, ordered field list.
    Struct,
    /// An ordered sequence of elements.
    List,
    /// Key/value entries.
    Map,
    /// A reference to an object owned by the host.
    External,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Opaque => "Opaque",
            Self::Struct => "Struct",
            Self::List => "List",
            Self::Map => "Map",
            Self::External => "External",
        })
    }
}
