//! Error handling for the tokenizers C ABI

use std::cell::RefCell;
use std::ffi::{CString, c_char};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Status codes returned by every fallible `tokenizers_*` function.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizersErrorCode {
    /// Operation completed successfully
    Ok = 0,
    /// Null pointer passed to function
    NullPointer = 1,
    /// Input bytes were not valid UTF-8
    InvalidUtf8 = 2,
    /// The engine rejected the serialized tokenizer configuration
    InvalidConfig = 3,
    /// The engine failed to encode the input
    EncodeFailed = 4,
    /// The engine failed to decode the ids
    DecodeFailed = 5,
    /// Unknown error
    Unknown = 255,
}

/// Set the last error message (thread-local).
pub fn set_last_error(msg: impl Into<String>) {
    let msg = msg.into();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Map a Result to an error code, recording the error message if Err.
pub fn map_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    err_code: TokenizersErrorCode,
) -> Result<T, TokenizersErrorCode> {
    result.map_err(|e| {
        set_last_error(e.to_string());
        err_code
    })
}

/// Get the name of an error code as a static C string.
#[unsafe(no_mangle)]
pub extern "C" fn tokenizers_error_name(err: TokenizersErrorCode) -> *const c_char {
    let name: &'static [u8] = match err {
        TokenizersErrorCode::Ok => b"TOKENIZERS_OK\0",
        TokenizersErrorCode::NullPointer => b"TOKENIZERS_ERROR_NULL_POINTER\0",
        TokenizersErrorCode::InvalidUtf8 => b"TOKENIZERS_ERROR_INVALID_UTF8\0",
        TokenizersErrorCode::InvalidConfig => b"TOKENIZERS_ERROR_INVALID_CONFIG\0",
        TokenizersErrorCode::EncodeFailed => b"TOKENIZERS_ERROR_ENCODE_FAILED\0",
        TokenizersErrorCode::DecodeFailed => b"TOKENIZERS_ERROR_DECODE_FAILED\0",
        TokenizersErrorCode::Unknown => b"TOKENIZERS_ERROR_UNKNOWN\0",
    };
    name.as_ptr() as *const c_char
}

/// Get the last error message of the calling thread. Returns NULL if no error.
///
/// The pointer stays valid until the next failing call on the same thread or
/// `tokenizers_clear_error`.
#[unsafe(no_mangle)]
pub extern "C" fn tokenizers_last_error_message() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(std::ptr::null())
    })
}

/// Clear the last error.
#[unsafe(no_mangle)]
pub extern "C" fn tokenizers_clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}
