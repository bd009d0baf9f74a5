/*! Text preprocessing

Normalization and tokenization of raw documents, and normalization of learner correction pairs.

Normalization ([normalize]) is pure and idempotent.
Tokenization goes through the [Tokenize] trait; [Segmenter] is the default, rule based implementation.
!*/
mod normalize;
mod processor;
mod tokenizer;

pub use normalize::normalize;
pub use processor::{read_pairs, LearnerPair, Preprocessor};
pub use tokenizer::{Language, Segmenter, Tokenize};
