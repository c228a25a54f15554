//! Vocabulary introspection bindings.

use crate::callback::{FfiCallback, TokenizersAddedToken, TokenizersAddedTokenCallbackFn};
use crate::handle::handle_ref;
use crate::{TokenizerHandle, TokenizersErrorCode, str_from_raw};
use std::ffi::{c_char, c_void};

/// Sentinel stored by `tokenizers_token_to_id` for tokens outside the vocabulary.
pub const TOKENIZERS_TOKEN_NOT_FOUND: i32 = -1;

/// Get the vocabulary size, added tokens included.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `out_size` must be a valid pointer
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_get_vocab_size(
    handle: *const TokenizerHandle,
    out_size: *mut usize,
) -> TokenizersErrorCode {
    if out_size.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };

    unsafe { *out_size = handle.inner.get_vocab_size(true) };
    TokenizersErrorCode::Ok
}

/// Look up the token string for `id`. Unknown ids yield an empty string.
///
/// The returned bytes are NOT NUL-terminated and only valid until the next
/// `tokenizers_id_to_token` on this handle or until it is freed.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `out_data` and `out_len` must be valid pointers
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_id_to_token(
    handle: *mut TokenizerHandle,
    id: u32,
    out_data: *mut *const c_char,
    out_len: *mut usize,
) -> TokenizersErrorCode {
    if handle.is_null() || out_data.is_null() || out_len.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    let handle = unsafe { &mut *handle };

    handle.token_buf = handle.inner.id_to_token(id).unwrap_or_default();
    unsafe {
        *out_data = handle.token_buf.as_ptr() as *const c_char;
        *out_len = handle.token_buf.len();
    }
    TokenizersErrorCode::Ok
}

/// Look up the id of `token`. Stores `TOKENIZERS_TOKEN_NOT_FOUND` (-1) when
/// the token is not in the vocabulary.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `token` must point to `len` bytes of UTF-8
/// - `out_id` must be a valid pointer
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_token_to_id(
    handle: *const TokenizerHandle,
    token: *const c_char,
    len: usize,
    out_id: *mut i32,
) -> TokenizersErrorCode {
    if out_id.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    unsafe { *out_id = TOKENIZERS_TOKEN_NOT_FOUND };

    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };
    let token = match unsafe { str_from_raw(token, len) } {
        Ok(s) => s,
        Err(e) => return e,
    };

    if let Some(id) = handle.inner.token_to_id(token) {
        unsafe { *out_id = id as i32 };
    }
    TokenizersErrorCode::Ok
}

/// Invoke `callback` once per added-vocabulary entry, in ascending id order.
///
/// The callback runs synchronously before this function returns; the token
/// content it receives is only valid during that invocation.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `callback` must be non-NULL and must not unwind
/// - `user_data` is passed through untouched
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_iterate_added_vocab(
    handle: *const TokenizerHandle,
    callback: TokenizersAddedTokenCallbackFn,
    user_data: *mut c_void,
) -> TokenizersErrorCode {
    let visit = FfiCallback::new(callback, user_data);
    if !visit.is_some() {
        return TokenizersErrorCode::NullPointer;
    }
    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };

    let mut added: Vec<(&String, &u32)> =
        handle.inner.get_added_vocabulary().get_vocab().iter().collect();
    added.sort_by_key(|&(_, id)| *id);

    for (content, &id) in added {
        visit.call(TokenizersAddedToken::borrowed(content, id));
    }
    TokenizersErrorCode::Ok
}
