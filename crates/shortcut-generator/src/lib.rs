pub mod random;

pub use random::{random_code, GeneratorError, RandomGenerator, ALPHABET, DEFAULT_LENGTH};

use shortcut_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// They make no uniqueness promise; the caller decides what a collision
/// means.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
