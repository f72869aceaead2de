//! Size generation and classification.
//!
//! The only part of the bot with actual logic: a biased order-statistic draw and
//! a range lookup. No I/O lives here.

pub mod classifier;
pub mod entropy;
pub mod generator;

pub use classifier::{classify, FALLBACK_LABEL};
pub use entropy::{Entropy, SeededEntropy, SequenceEntropy, ThreadEntropy};
pub use generator::{generate, generate_sample_with, generate_with, random_int, Measurement};
