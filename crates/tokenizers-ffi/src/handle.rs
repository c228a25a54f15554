//! Handle lifecycle: create from a serialized tokenizer, free.

use crate::error::{map_result, set_last_error};
use crate::{TokenizersErrorCode, TokenizersOptions, str_from_raw, tokenizers_options_default};
use std::ffi::c_char;
use std::str::FromStr;
use tokenizers::Tokenizer;

/// Opaque handle to one loaded tokenizer.
///
/// Besides the engine it carries the scratch strings that back the borrowed
/// views returned by `tokenizers_get_decode_str` and `tokenizers_id_to_token`.
pub struct TokenizerHandle {
    pub(crate) inner: Tokenizer,
    pub(crate) decode_buf: String,
    pub(crate) token_buf: String,
}

impl TokenizerHandle {
    fn from_json(json: &str) -> Result<Self, TokenizersErrorCode> {
        let inner = Tokenizer::from_str(json).map_err(|e| {
            log::warn!("Rejected tokenizer configuration: {}", e);
            set_last_error(e.to_string());
            TokenizersErrorCode::InvalidConfig
        })?;

        log::debug!(
            "Loaded tokenizer: vocab size {}, {} added tokens",
            inner.get_vocab_size(true),
            inner.get_added_vocabulary().len()
        );

        Ok(Self {
            inner,
            decode_buf: String::new(),
            token_buf: String::new(),
        })
    }
}

/// Create a tokenizer from a serialized `tokenizer.json` blob.
///
/// # Safety
/// - `json` must point to `len` readable bytes
/// - `out` must be a valid pointer
/// - The returned handle must be freed with `tokenizers_free`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_new_from_str(
    json: *const c_char,
    len: usize,
    out: *mut *mut TokenizerHandle,
) -> TokenizersErrorCode {
    let options = tokenizers_options_default();
    unsafe { tokenizers_new_from_str_with_options(json, len, &options, out) }
}

/// Create a tokenizer from a serialized blob, applying `options` first.
///
/// # Safety
/// - `json` must point to `len` readable bytes
/// - `options` must be valid or NULL (uses defaults)
/// - `out` must be a valid pointer
/// - The returned handle must be freed with `tokenizers_free`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_new_from_str_with_options(
    json: *const c_char,
    len: usize,
    options: *const TokenizersOptions,
    out: *mut *mut TokenizerHandle,
) -> TokenizersErrorCode {
    if out.is_null() || json.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    unsafe { *out = std::ptr::null_mut() };

    let default_options = tokenizers_options_default();
    let options = if options.is_null() { &default_options } else { unsafe { &*options } };
    options.apply();

    let result = unsafe { str_from_raw(json, len) }.and_then(TokenizerHandle::from_json);

    match result {
        Ok(handle) => {
            unsafe { *out = Box::into_raw(Box::new(handle)) };
            TokenizersErrorCode::Ok
        }
        Err(e) => e,
    }
}

/// Free a tokenizer handle.
///
/// # Safety
/// - `handle` must be a valid handle or NULL
/// - The handle must not be used after this call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_free(handle: *mut TokenizerHandle) {
    if !handle.is_null() {
        let _ = unsafe { Box::from_raw(handle) };
    }
}

/// Borrow the handle, reporting a null pointer as an error.
pub(crate) unsafe fn handle_ref<'a>(
    handle: *const TokenizerHandle,
) -> Result<&'a TokenizerHandle, TokenizersErrorCode> {
    if handle.is_null() {
        return map_result(Err("tokenizer handle is NULL"), TokenizersErrorCode::NullPointer);
    }
    Ok(unsafe { &*handle })
}
