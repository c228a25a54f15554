//! hftok - safe Rust access to the tokenizers C ABI
//!
//! Wraps one engine handle in an owned [`HfTokenizer`]: text in, owned
//! [`HfEncoding`]s out, and back. Raw result buffers are copied and released
//! inside each call, so no engine-owned memory ever reaches the caller.
//!
//! # Quick Start
//!
//! ```ignore
//! use hftok::HfTokenizer;
//!
//! let json = std::fs::read_to_string("tokenizer.json")?;
//! let mut tokenizer = HfTokenizer::from_blob_json(&json)?;
//!
//! let encoding = tokenizer.encode("hello world")?;
//! let batch = tokenizer.encode_batch(&["hello", "world"])?;
//! let text = tokenizer.decode_with(&encoding.ids, true)?;
//!
//! if tokenizer.token_to_id("<unk>") == hftok::TOKEN_NOT_FOUND {
//!     // not in the vocabulary
//! }
//! ```

mod raw;
mod shared;
mod tokenizer;
mod types;

#[cfg(test)]
mod tests;

pub use shared::SharedTokenizer;
pub use tokenizer::HfTokenizer;
pub use types::{
    AddedToken, HfEncoding, TOKEN_NOT_FOUND, TokenizerError, TokenizerOptions, TokenizerResult,
};

pub use tokenizers_ffi::TokenizersErrorCode;
