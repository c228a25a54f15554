//! Encode bindings: single and batched, with callee-allocated result buffers.

use crate::error::{map_result, set_last_error};
use crate::handle::handle_ref;
use crate::{TokenizerHandle, TokenizersErrorCode, str_from_raw};
use std::ffi::c_char;
use tokenizers::Encoding;

/// Encoded ids and attention mask. Caller must free with
/// `tokenizers_free_encode_results`.
///
/// Both buffers hold `len` entries. Ids are signed to interoperate with other
/// tokenizer ecosystems; the engine never produces ids above `i32::MAX`.
#[repr(C)]
#[derive(Debug)]
pub struct TokenizerEncodeResult {
    pub token_ids: *mut i32,
    pub attention_mask: *mut i32,
    pub len: usize,
}

impl TokenizerEncodeResult {
    pub fn empty() -> Self {
        Self {
            token_ids: std::ptr::null_mut(),
            attention_mask: std::ptr::null_mut(),
            len: 0,
        }
    }

    /// Copy an engine encoding into freshly boxed buffers.
    fn from_encoding(encoding: &Encoding) -> Self {
        let ids: &[i32] = bytemuck::cast_slice(encoding.get_ids());
        let mask: &[i32] = bytemuck::cast_slice(encoding.get_attention_mask());
        let len = ids.len();

        Self {
            token_ids: Box::into_raw(ids.to_vec().into_boxed_slice()) as *mut i32,
            attention_mask: Box::into_raw(mask.to_vec().into_boxed_slice()) as *mut i32,
            len,
        }
    }

    /// Release both buffers and null them out.
    ///
    /// # Safety
    /// The buffers must come from `from_encoding` (or be null).
    unsafe fn release(&mut self) {
        if !self.token_ids.is_null() && self.len > 0 {
            let _ = unsafe {
                Box::from_raw(std::slice::from_raw_parts_mut(self.token_ids, self.len))
            };
        }
        if !self.attention_mask.is_null() && self.len > 0 {
            let _ = unsafe {
                Box::from_raw(std::slice::from_raw_parts_mut(self.attention_mask, self.len))
            };
        }
        *self = Self::empty();
    }
}

fn check_lengths(encoding: &Encoding) -> Result<(), TokenizersErrorCode> {
    let ids = encoding.get_ids().len();
    let mask = encoding.get_attention_mask().len();
    if ids != mask {
        set_last_error(format!(
            "ids and attention_mask differ in length ({} vs {})",
            ids, mask
        ));
        return Err(TokenizersErrorCode::EncodeFailed);
    }
    Ok(())
}

/// Encode a single text.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `data` must point to `len` bytes of UTF-8 (may be NULL when `len` is 0)
/// - `out_result` must be a valid pointer
/// - The result must be freed with `tokenizers_free_encode_results(result, 1)`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_encode(
    handle: *mut TokenizerHandle,
    data: *const c_char,
    len: usize,
    add_special_tokens: i32,
    out_result: *mut TokenizerEncodeResult,
) -> TokenizersErrorCode {
    if out_result.is_null() {
        return TokenizersErrorCode::NullPointer;
    }
    unsafe { *out_result = TokenizerEncodeResult::empty() };

    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };
    let text = match unsafe { str_from_raw(data, len) } {
        Ok(s) => s,
        Err(e) => return e,
    };

    let encoded = handle
        .inner
        .encode(text, add_special_tokens != 0)
        .map_err(|e| e.to_string());
    let encoding = match map_result(encoded, TokenizersErrorCode::EncodeFailed) {
        Ok(encoding) => encoding,
        Err(e) => return e,
    };
    if let Err(e) = check_lengths(&encoding) {
        return e;
    }

    unsafe { *out_result = TokenizerEncodeResult::from_encoding(&encoding) };
    TokenizersErrorCode::Ok
}

/// Encode `num_seqs` texts in one call. Slot `i` of `out_results` holds the
/// encoding of text `i`.
///
/// On failure every slot is left empty; nothing needs freeing.
///
/// # Safety
/// - `handle` must be a valid handle
/// - `data` and `lens` must each point to `num_seqs` entries; `data[i]` must
///   point to `lens[i]` bytes of UTF-8
/// - `out_results` must point to `num_seqs` writable results
/// - The results must be freed with
///   `tokenizers_free_encode_results(out_results, num_seqs)`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_encode_batch(
    handle: *mut TokenizerHandle,
    data: *const *const c_char,
    lens: *const usize,
    num_seqs: usize,
    add_special_tokens: i32,
    out_results: *mut TokenizerEncodeResult,
) -> TokenizersErrorCode {
    if num_seqs == 0 {
        return TokenizersErrorCode::Ok;
    }
    if data.is_null() || lens.is_null() || out_results.is_null() {
        return TokenizersErrorCode::NullPointer;
    }

    let out = unsafe { std::slice::from_raw_parts_mut(out_results, num_seqs) };
    for slot in out.iter_mut() {
        *slot = TokenizerEncodeResult::empty();
    }

    let handle = match unsafe { handle_ref(handle) } {
        Ok(h) => h,
        Err(e) => return e,
    };

    let ptrs = unsafe { std::slice::from_raw_parts(data, num_seqs) };
    let lens = unsafe { std::slice::from_raw_parts(lens, num_seqs) };
    let mut texts = Vec::with_capacity(num_seqs);
    for (&ptr, &len) in ptrs.iter().zip(lens) {
        match unsafe { str_from_raw(ptr, len) } {
            Ok(s) => texts.push(s),
            Err(e) => return e,
        }
    }

    log::trace!("Encoding batch of {} texts", num_seqs);

    let encoded = handle
        .inner
        .encode_batch(texts, add_special_tokens != 0)
        .map_err(|e| e.to_string());
    let encodings = match map_result(encoded, TokenizersErrorCode::EncodeFailed) {
        Ok(encodings) => encodings,
        Err(e) => return e,
    };
    if encodings.len() != num_seqs {
        set_last_error(format!(
            "engine returned {} encodings for {} inputs",
            encodings.len(),
            num_seqs
        ));
        return TokenizersErrorCode::EncodeFailed;
    }
    if let Err(e) = encodings.iter().try_for_each(check_lengths) {
        return e;
    }

    for (slot, encoding) in out.iter_mut().zip(&encodings) {
        *slot = TokenizerEncodeResult::from_encoding(encoding);
    }
    TokenizersErrorCode::Ok
}

/// Free `num_seqs` consecutive encode results.
///
/// Every slot is nulled after release; empty slots are skipped.
///
/// # Safety
/// - `results` must point to `num_seqs` results produced by
///   `tokenizers_encode` / `tokenizers_encode_batch`, or be NULL
/// - Each produced result must be freed exactly once
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tokenizers_free_encode_results(
    results: *mut TokenizerEncodeResult,
    num_seqs: usize,
) {
    if results.is_null() || num_seqs == 0 {
        return;
    }
    let results = unsafe { std::slice::from_raw_parts_mut(results, num_seqs) };
    for result in results.iter_mut() {
        unsafe { result.release() };
    }
}
