/// Builds a value describing `T`, typically a [`TypeTrait`](crate::registry::TypeTrait).
pub trait FromType<T> {
    fn from_type() -> Self;
}
