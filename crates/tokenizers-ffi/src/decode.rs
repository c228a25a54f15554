//! Decode bindings.
//!
//! Decoding is two-phase: `tokenizers_decode` writes the text into the
//! handle's decode buffer and `tokenizers_get_decode_str` lends it out. The
//! pair must not be interleaved with another decode on the same handle.

use crate::error::map_result;
use crate::handle::handle_ref;
use crate::{TokenizerHandle, TokenizersErrorCode};
use std::ffi::c_char;

/// Decode `len` token ids into the handle's decode buffer.
///
/// Ids unknown to the vocabulary are dropped by the engine. The buffer is
/// emptied first, so a failed decode leaves an empty string behind.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `ids` must point to `len` ids (may be NULL when `len` is 0)
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_decode(
    handle: *mut TokenizerHandle,
    ids: *const u32,
    len: usize,
    skip_special_tokens: i32,
) -> TokenizersErrorCode {
    if handle.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    let handle = unsafe { &mut *handle };
    handle.decode_buf.clear();

    if ids.is_null() && len > 0 {
        return TokenizersErrorCode::NullPointer;
    }
    let ids: &[u32] = if len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ids, len) }
    };

    let decoded = handle
        .inner
        .decode(ids, skip_special_tokens != 0)
        .map_err(|e| e.to_string());
    match map_result(decoded, TokenizersErrorCode::DecodeFailed) {
        Ok(text) => {
            handle.decode_buf = text;
            TokenizersErrorCode::Ok
        }
        Err(e) => e,
    }
}

/// Borrow the text produced by the most recent `tokenizers_decode`.
///
/// The returned bytes are UTF-8, NOT NUL-terminated, and only valid until the
/// next `tokenizers_decode` on this handle or until it is freed.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `out_data` and `out_len` must be valid pointers
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_get_decode_str(
    handle: *const TokenizerHandle,
    out_data: *mut *const c_char,
    out_len: *mut usize,
) -> TokenizersErrorCode {
    if out_data.is_null() || out_len.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };

    unsafe {
        *out_data = handle.decode_buf.as_ptr() as *const c_char;
        *out_len = handle.decode_buf.len();
    }
    TokenizersErrorCode::Ok
}
