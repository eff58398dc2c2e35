//! Token generation for new links

use crate::utils::generate_random_code;

/// Produces short, unpredictable identifiers for new links.
///
/// No uniqueness check happens here; collision handling belongs to the caller.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform draw from the 62-character alphanumeric alphabet.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenGenerator {
    length: usize,
}

impl RandomTokenGenerator {
    pub const DEFAULT_LENGTH: usize = 6;

    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length)
    }
}
