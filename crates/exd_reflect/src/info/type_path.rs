/// A stable, fully qualified name for a type.
///
/// The type path is the tag written in front of every encoded node, so it
/// must not change between the process that encodes and the one that
/// decodes. Declaring macros default to `module_path!()` plus the type
/// name; generic containers build theirs from their parameters.
pub trait TypePath: 'static {
    /// Returns the fully qualified path, e.g. `my_crate::items::Sword`.
    fn type_path() -> &'static str;

    /// Returns the path without its module prefix, e.g. `Sword`.
    fn type_name() -> &'static str {
        short_name(Self::type_path())
    }
}

fn short_name(path: &'static str) -> &'static str {
    let head = match path.find('<') {
        Some(end) => &path[..end],
        None => path,
    };
    match head.rfind("::") {
        Some(start) => &path[start + 2..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn short_names() {
        assert_eq!(short_name("i32"), "i32");
        assert_eq!(short_name("a::b::Sword"), "Sword");
        assert_eq!(short_name("alloc::vec::Vec<a::B>"), "Vec<a::B>");
    }
}
