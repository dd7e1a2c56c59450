pub use vec1::vec1;

/// Integer type for literals, roll parameters and results.
pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;
