//! Tokenizers FFI - C bindings over the HuggingFace `tokenizers` engine
//!
//! This crate exposes one loaded tokenizer as an opaque `TokenizerHandle` and a
//! flat set of `tokenizers_*` functions usable from C, C++, Go, C#, etc.
//!
//! Ownership rules:
//! - Handles are created by `tokenizers_new_from_str*` and freed exactly once
//!   with `tokenizers_free`.
//! - `TokenizerEncodeResult` buffers are allocated by the library and must be
//!   released exactly once with `tokenizers_free_encode_results`.
//! - Strings returned through `tokenizers_get_decode_str` and
//!   `tokenizers_id_to_token` are borrowed from the handle and are only valid
//!   until the next call of the same kind on that handle.
//! - A handle is not safe for concurrent use; serialize calls externally.
mod callback;
mod decode;
mod encode;
mod error;
mod handle;
mod vocab;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use callback::*;
pub use decode::*;
pub use encode::*;
pub use error::*;
pub use handle::*;
pub use vocab::*;

use std::ffi::c_char;

// =============================================================================
// Global Functions
// =============================================================================

/// Get the library version string.
#[unsafe(no_mangle)]
pub extern "C" fn tokenizers_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// =============================================================================
// Options
// =============================================================================

/// Options applied when creating a handle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizersOptions {
    /// Engine-internal parallelism for batch encoding.
    /// -1 = leave engine default, 0 = disable, 1 = enable.
    ///
    /// This is process-wide: it sets the engine's parallelism switch, not a
    /// per-handle setting.
    pub parallelism: i32,
}

/// Get default handle options (all sentinels = engine defaults).
#[unsafe(no_mangle)]
pub extern "C" fn tokenizers_options_default() -> TokenizersOptions {
    TokenizersOptions { parallelism: -1 }
}

impl TokenizersOptions {
    pub(crate) fn apply(&self) {
        match self.parallelism {
            p if p < 0 => {}
            0 => tokenizers::utils::parallelism::set_parallelism(false),
            _ => tokenizers::utils::parallelism::set_parallelism(true),
        }
    }
}

// =============================================================================
// Marshaling helpers
// =============================================================================

/// Borrow `len` bytes at `data` as UTF-8.
///
/// # Safety
/// `data` must point to `len` readable bytes, or `len` must be 0.
pub(crate) unsafe fn str_from_raw<'a>(
    data: *const c_char,
    len: usize,
) -> Result<&'a str, TokenizersErrorCode> {
    if len == 0 {
        return Ok("");
    }
    if data.is_null() {
        return Err(TokenizersErrorCode::NullPointer);
    }
    let bytes = unsafe { std::slice::from_raw_parts(data as *const u8, len) };
    map_result(std::str::from_utf8(bytes), TokenizersErrorCode::InvalidUtf8)
}
