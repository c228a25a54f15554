//! Types for the tokenizer wrapper.

use thiserror::Error;
use tokenizers_ffi::{TokenizersErrorCode, TokenizersOptions, tokenizers_options_default};

/// Value returned by [`HfTokenizer::token_to_id`](crate::HfTokenizer::token_to_id)
/// for tokens outside the vocabulary. Callers compare against exactly this
/// value, not "any negative id".
pub const TOKEN_NOT_FOUND: i32 = tokenizers_ffi::TOKENIZERS_TOKEN_NOT_FOUND;

/// Errors surfaced by the tokenizer wrapper.
///
/// Each variant carries the status code reported by the C ABI and the
/// message recorded alongside it.
#[derive(Debug, Error)]
pub enum TokenizerError {
    /// The engine rejected the serialized configuration.
    #[error("Failed to create tokenizer ({0:?}): {1}")]
    Create(TokenizersErrorCode, String),

    /// Encoding a text (or batch of texts) failed.
    #[error("Encoding failed ({0:?}): {1}")]
    Encode(TokenizersErrorCode, String),

    /// Decoding token ids failed.
    #[error("Decoding failed ({0:?}): {1}")]
    Decode(TokenizersErrorCode, String),

    /// Enumerating the added vocabulary failed.
    #[error("Added vocabulary enumeration failed ({0:?}): {1}")]
    AddedVocab(TokenizersErrorCode, String),
}

impl TokenizerError {
    /// The C ABI status code behind this error.
    pub fn code(&self) -> TokenizersErrorCode {
        match self {
            Self::Create(code, _)
            | Self::Encode(code, _)
            | Self::Decode(code, _)
            | Self::AddedVocab(code, _) => *code,
        }
    }
}

/// Result type for tokenizer operations.
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// Result of encoding one text: ids and a parallel attention mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HfEncoding {
    pub ids: Vec<i32>,
    pub attention_mask: Vec<i32>,
}

impl HfEncoding {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A vocabulary entry injected outside the base model (special/control tokens).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedToken {
    pub content: String,
    pub id: i32,
}

/// Options applied when creating a tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Engine-internal batch parallelism (engine default if None).
    ///
    /// Process-wide: it flips the engine's global switch.
    pub parallelism: Option<bool>,
}

impl TokenizerOptions {
    /// Options for targets without threads (e.g. wasm runtimes).
    pub fn single_threaded() -> Self {
        Self {
            parallelism: Some(false),
        }
    }

    pub(crate) fn to_raw(&self) -> TokenizersOptions {
        let mut raw = tokenizers_options_default();
        if let Some(parallel) = self.parallelism {
            raw.parallelism = parallel as i32;
        }
        raw
    }
}
