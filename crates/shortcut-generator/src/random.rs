use crate::Generator;
use rand::Rng;
use shortcut_core::shortcode::MAX_LENGTH;
use shortcut_core::ShortCode;
use thiserror::Error;

/// Upper and lowercase ASCII letters followed by digits.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 62^6 is roughly 56.8 billion codes.
pub const DEFAULT_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("short code length must be between 1 and {max}, got {length}")]
    InvalidLength { length: usize, max: usize },
}

/// Draws `length` symbols from [`ALPHABET`], each independently and uniformly.
pub fn random_code<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Fixed-length random short codes backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// The length must fit a [`ShortCode`], so `0` and anything above
    /// [`MAX_LENGTH`] are rejected.
    pub fn with_length(length: usize) -> Result<Self, GeneratorError> {
        if length == 0 || length > MAX_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length,
                max: MAX_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Size of the code space for this length, saturating at `u64::MAX`.
    pub fn capacity(&self) -> u64 {
        (ALPHABET.len() as u64).saturating_pow(self.length as u32)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = random_code(&mut rand::rng(), self.length);
        ShortCode::new_unchecked(code)
    }
}
