//! Thread-shareable tokenizer.

use crate::tokenizer::HfTokenizer;
use crate::types::{AddedToken, HfEncoding, TokenizerResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One tokenizer handle shared between threads.
///
/// Every call takes the lock for its full duration, so a decode and the read
/// of its result are never interleaved with another caller. Prefer one
/// [`HfTokenizer`] per thread when contention matters.
#[derive(Debug)]
pub struct SharedTokenizer {
    inner: Mutex<HfTokenizer>,
}

impl SharedTokenizer {
    pub fn new(tokenizer: HfTokenizer) -> Self {
        Self {
            inner: Mutex::new(tokenizer),
        }
    }

    /// A panic mid-call cannot leave the handle half-updated, so a poisoned
    /// lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HfTokenizer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn encode(&self, text: &str) -> TokenizerResult<HfEncoding> {
        self.lock().encode(text)
    }

    pub fn encode_with(&self, text: &str, add_special_tokens: bool) -> TokenizerResult<HfEncoding> {
        self.lock().encode_with(text, add_special_tokens)
    }

    pub fn encode_batch<S: AsRef<str>>(&self, texts: &[S]) -> TokenizerResult<Vec<HfEncoding>> {
        self.lock().encode_batch(texts)
    }

    pub fn encode_batch_with<S: AsRef<str>>(
        &self,
        texts: &[S],
        add_special_tokens: bool,
    ) -> TokenizerResult<Vec<HfEncoding>> {
        self.lock().encode_batch_with(texts, add_special_tokens)
    }

    pub fn decode(&self, ids: &[i32]) -> TokenizerResult<String> {
        self.lock().decode(ids)
    }

    pub fn decode_with(&self, ids: &[i32], skip_special_tokens: bool) -> TokenizerResult<String> {
        self.lock().decode_with(ids, skip_special_tokens)
    }

    pub fn vocab_size(&self) -> usize {
        self.lock().vocab_size()
    }

    pub fn added_tokens(&self) -> Vec<AddedToken> {
        self.lock().added_tokens().to_vec()
    }

    pub fn id_to_token(&self, id: i32) -> String {
        self.lock().id_to_token(id)
    }

    pub fn token_to_id(&self, token: &str) -> i32 {
        self.lock().token_to_id(token)
    }

    pub fn into_inner(self) -> HfTokenizer {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<HfTokenizer> for SharedTokenizer {
    fn from(tokenizer: HfTokenizer) -> Self {
        Self::new(tokenizer)
    }
}
