//! FFI callback infrastructure for added-vocabulary enumeration

use std::ffi::{c_char, c_void};

/// One added-vocabulary entry passed to the visitor.
///
/// `content` is NOT NUL-terminated and is only valid for the duration of the
/// callback invocation; copy it if you need it afterwards.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TokenizersAddedToken {
    pub content: *const c_char,
    pub len: usize,
    pub id: u32,
}

impl TokenizersAddedToken {
    pub(crate) fn borrowed(content: &str, id: u32) -> Self {
        Self {
            content: content.as_ptr() as *const c_char,
            len: content.len(),
            id,
        }
    }
}

/// Visitor invoked once per added token by `tokenizers_iterate_added_vocab`.
pub type TokenizersAddedTokenCallbackFn =
    Option<extern "C" fn(token: TokenizersAddedToken, user_data: *mut c_void)>;

/// Callback plus the opaque user pointer handed back on every call.
///
/// Only ever invoked synchronously on the calling thread; never stored past
/// the ABI call that received it.
pub struct FfiCallback<T> {
    callback: Option<extern "C" fn(T, *mut c_void)>,
    user_data: *mut c_void,
}

impl<T> FfiCallback<T> {
    pub fn new(callback: Option<extern "C" fn(T, *mut c_void)>, user_data: *mut c_void) -> Self {
        Self {
            callback,
            user_data,
        }
    }

    pub fn is_some(&self) -> bool {
        self.callback.is_some()
    }

    pub fn call(&self, value: T) {
        if let Some(cb) = self.callback {
            cb(value, self.user_data);
        }
    }
}
