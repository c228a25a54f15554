//! Owned wrapper around one tokenizer handle.

use crate::raw::{RawEncodeResults, checked, collect_added_token, copy_str};
use crate::types::{
    AddedToken, HfEncoding, TokenizerError, TokenizerOptions, TokenizerResult,
};
use std::ffi::{c_char, c_void};
use std::ptr::{self, NonNull};
use tokenizers_ffi::{
    TokenizerHandle, TokenizersErrorCode, tokenizers_decode, tokenizers_encode,
    tokenizers_encode_batch, tokenizers_free, tokenizers_get_decode_str,
    tokenizers_get_vocab_size, tokenizers_id_to_token, tokenizers_iterate_added_vocab,
    tokenizers_new_from_str_with_options, tokenizers_token_to_id,
};

/// A loaded tokenizer.
///
/// Owns its engine handle exclusively and frees it on drop. Not `Clone`;
/// moving transfers the handle. Methods that touch the handle's scratch
/// buffers (`decode*`, `id_to_token`) take `&mut self`, so one instance can
/// never be used from two threads at once. Wrap it in
/// [`SharedTokenizer`](crate::SharedTokenizer) to share across threads.
///
/// ```ignore
/// let mut tokenizer = HfTokenizer::from_blob_json(&std::fs::read_to_string("tokenizer.json")?)?;
/// let encoding = tokenizer.encode("hello world")?;
/// let text = tokenizer.decode(&encoding.ids)?;
/// ```
pub struct HfTokenizer {
    handle: NonNull<TokenizerHandle>,
    added_tokens: Vec<AddedToken>,
}

// SAFETY: the handle is exclusively owned and the engine state is `Send`.
unsafe impl Send for HfTokenizer {}

impl HfTokenizer {
    /// Load a tokenizer from a serialized `tokenizer.json` blob.
    pub fn from_blob_json(json: &str) -> TokenizerResult<Self> {
        Self::from_blob_json_with(json, &TokenizerOptions::default())
    }

    /// Load a tokenizer from a serialized blob with explicit options.
    pub fn from_blob_json_with(json: &str, options: &TokenizerOptions) -> TokenizerResult<Self> {
        let raw_options = options.to_raw();
        let mut out = ptr::null_mut();

        checked(
            || unsafe {
                tokenizers_new_from_str_with_options(
                    json.as_ptr() as *const c_char,
                    json.len(),
                    &raw_options,
                    &mut out,
                )
            },
            TokenizerError::Create,
        )?;

        let handle = NonNull::new(out).ok_or_else(|| {
            TokenizerError::Create(TokenizersErrorCode::NullPointer, "engine returned no handle".into())
        })?;
        let mut tokenizer = Self {
            handle,
            added_tokens: Vec::new(),
        };
        tokenizer.init_added_tokens()?;

        log::debug!(
            "Created tokenizer with {} added tokens",
            tokenizer.added_tokens.len()
        );
        Ok(tokenizer)
    }

    fn init_added_tokens(&mut self) -> TokenizerResult<()> {
        let mut added = Vec::new();
        checked(
            || unsafe {
                tokenizers_iterate_added_vocab(
                    self.handle.as_ptr(),
                    Some(collect_added_token),
                    &mut added as *mut Vec<AddedToken> as *mut c_void,
                )
            },
            TokenizerError::AddedVocab,
        )?;
        self.added_tokens = added;
        Ok(())
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Encode one text without special tokens.
    pub fn encode(&self, text: &str) -> TokenizerResult<HfEncoding> {
        self.encode_with(text, false)
    }

    /// Encode one text; `add_special_tokens` inserts the model's boundary tokens.
    pub fn encode_with(&self, text: &str, add_special_tokens: bool) -> TokenizerResult<HfEncoding> {
        let mut results = RawEncodeResults::new(1);
        checked(
            || unsafe {
                tokenizers_encode(
                    self.handle.as_ptr(),
                    text.as_ptr() as *const c_char,
                    text.len(),
                    add_special_tokens as i32,
                    results.as_mut_ptr(),
                )
            },
            TokenizerError::Encode,
        )?;

        Ok(results.to_encodings().pop().unwrap_or_default())
    }

    /// Encode a batch of texts without special tokens.
    pub fn encode_batch<S: AsRef<str>>(&self, texts: &[S]) -> TokenizerResult<Vec<HfEncoding>> {
        self.encode_batch_with(texts, false)
    }

    /// Encode a batch of texts in a single engine call.
    ///
    /// Element `i` of the output is the encoding of `texts[i]`, identical to
    /// what [`encode_with`](Self::encode_with) returns for it.
    pub fn encode_batch_with<S: AsRef<str>>(
        &self,
        texts: &[S],
        add_special_tokens: bool,
    ) -> TokenizerResult<Vec<HfEncoding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let (ptrs, lens): (Vec<*const c_char>, Vec<usize>) = texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                (text.as_ptr() as *const c_char, text.len())
            })
            .unzip();

        let mut results = RawEncodeResults::new(texts.len());
        checked(
            || unsafe {
                tokenizers_encode_batch(
                    self.handle.as_ptr(),
                    ptrs.as_ptr(),
                    lens.as_ptr(),
                    texts.len(),
                    add_special_tokens as i32,
                    results.as_mut_ptr(),
                )
            },
            TokenizerError::Encode,
        )?;

        Ok(results.to_encodings())
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    /// Decode ids back to text, keeping special tokens.
    pub fn decode(&mut self, ids: &[i32]) -> TokenizerResult<String> {
        self.decode_with(ids, false)
    }

    /// Decode ids back to text.
    ///
    /// The engine's decode buffer is copied out before returning, so the
    /// result never aliases handle state.
    pub fn decode_with(&mut self, ids: &[i32], skip_special_tokens: bool) -> TokenizerResult<String> {
        let ids: &[u32] = bytemuck::cast_slice(ids);
        checked(
            || unsafe {
                tokenizers_decode(
                    self.handle.as_ptr(),
                    ids.as_ptr(),
                    ids.len(),
                    skip_special_tokens as i32,
                )
            },
            TokenizerError::Decode,
        )?;

        let mut data = ptr::null();
        let mut len = 0usize;
        checked(
            || unsafe { tokenizers_get_decode_str(self.handle.as_ptr(), &mut data, &mut len) },
            TokenizerError::Decode,
        )?;

        Ok(unsafe { copy_str(data, len) })
    }

    // ========================================================================
    // Vocabulary
    // ========================================================================

    /// Vocabulary size including added tokens.
    ///
    /// # Panics
    /// If the engine reports an empty vocabulary, which means the handle is
    /// corrupt or unconfigured.
    pub fn vocab_size(&self) -> usize {
        let mut size = 0usize;
        let code = unsafe { tokenizers_get_vocab_size(self.handle.as_ptr(), &mut size) };
        debug_assert_eq!(code, TokenizersErrorCode::Ok);
        assert!(size > 0, "tokenizer reported an empty vocabulary");
        size
    }

    /// Added tokens, drained once at construction.
    pub fn added_tokens(&self) -> &[AddedToken] {
        &self.added_tokens
    }

    /// Token string for `id`; empty if the id is not in the vocabulary.
    pub fn id_to_token(&mut self, id: i32) -> String {
        let mut data = ptr::null();
        let mut len = 0usize;
        let code =
            unsafe { tokenizers_id_to_token(self.handle.as_ptr(), id as u32, &mut data, &mut len) };
        debug_assert_eq!(code, TokenizersErrorCode::Ok);
        unsafe { copy_str(data, len) }
    }

    /// Id of `token`, or [`TOKEN_NOT_FOUND`](crate::TOKEN_NOT_FOUND) (-1).
    pub fn token_to_id(&self, token: &str) -> i32 {
        let mut id = crate::TOKEN_NOT_FOUND;
        let code = unsafe {
            tokenizers_token_to_id(
                self.handle.as_ptr(),
                token.as_ptr() as *const c_char,
                token.len(),
                &mut id,
            )
        };
        debug_assert_eq!(code, TokenizersErrorCode::Ok);
        id
    }
}

impl Drop for HfTokenizer {
    fn drop(&mut self) {
        unsafe { tokenizers_free(self.handle.as_ptr()) };
    }
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer")
            .field("handle", &self.handle)
            .field("added_tokens", &self.added_tokens.len())
            .finish()
    }
}
