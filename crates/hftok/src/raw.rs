//! Marshaling between owned Rust values and the C ABI's raw buffers.
//!
//! Nothing in here is public: raw results never leave the crate.

use crate::types::{AddedToken, HfEncoding, TokenizerError, TokenizerResult};
use std::ffi::{CStr, c_char, c_void};
use tokenizers_ffi::{
    TokenizerEncodeResult, TokenizersAddedToken, TokenizersErrorCode, tokenizers_clear_error,
    tokenizers_error_name, tokenizers_free_encode_results, tokenizers_last_error_message,
};

/// Run one ABI call against an empty error slot and `check` its status.
///
/// Some failures (null-pointer rejections) record no message, so the slot
/// is cleared first to keep an older failure's text out of the error.
pub(crate) fn checked(
    call: impl FnOnce() -> TokenizersErrorCode,
    wrap: fn(TokenizersErrorCode, String) -> TokenizerError,
) -> TokenizerResult<()> {
    tokenizers_clear_error();
    check(call(), wrap)
}

/// Turn an ABI status into a Result, pulling the thread-local message.
pub(crate) fn check(
    code: TokenizersErrorCode,
    wrap: fn(TokenizersErrorCode, String) -> TokenizerError,
) -> TokenizerResult<()> {
    if code == TokenizersErrorCode::Ok {
        return Ok(());
    }
    Err(wrap(code, last_error_message(code)))
}

/// The thread-local message, or the code's name when none was recorded.
fn last_error_message(code: TokenizersErrorCode) -> String {
    let mut ptr = tokenizers_last_error_message();
    if ptr.is_null() {
        ptr = tokenizers_error_name(code);
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Copy a borrowed (ptr, len) UTF-8 view into an owned String.
///
/// # Safety
/// `data` must point to `len` readable bytes, or `len` must be 0.
pub(crate) unsafe fn copy_str(data: *const c_char, len: usize) -> String {
    if data.is_null() || len == 0 {
        return String::new();
    }
    let bytes = unsafe { std::slice::from_raw_parts(data as *const u8, len) };
    String::from_utf8_lossy(bytes).into_owned()
}

/// Output slots for one encode call, released exactly once on drop.
pub(crate) struct RawEncodeResults {
    slots: Vec<TokenizerEncodeResult>,
}

impl RawEncodeResults {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| TokenizerEncodeResult::empty()).collect(),
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut TokenizerEncodeResult {
        self.slots.as_mut_ptr()
    }

    /// Copy every slot into owned encodings, in slot order.
    pub(crate) fn to_encodings(&self) -> Vec<HfEncoding> {
        self.slots
            .iter()
            .map(|raw| HfEncoding {
                ids: unsafe { copy_i32(raw.token_ids, raw.len) },
                attention_mask: unsafe { copy_i32(raw.attention_mask, raw.len) },
            })
            .collect()
    }
}

impl Drop for RawEncodeResults {
    fn drop(&mut self) {
        unsafe { tokenizers_free_encode_results(self.slots.as_mut_ptr(), self.slots.len()) };
    }
}

unsafe fn copy_i32(data: *const i32, len: usize) -> Vec<i32> {
    if data.is_null() || len == 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(data, len) }.to_vec()
}

/// Visitor handed to `tokenizers_iterate_added_vocab`; `user_data` is a
/// `*mut Vec<AddedToken>`.
pub(crate) extern "C" fn collect_added_token(token: TokenizersAddedToken, user_data: *mut c_void) {
    if user_data.is_null() {
        return;
    }
    let sink = unsafe { &mut *(user_data as *mut Vec<AddedToken>) };
    sink.push(AddedToken {
        content: unsafe { copy_str(token.content, token.len) },
        id: token.id as i32,
    });
}
