//! Serialized tokenizers shared by the unit tests of this crate and of the
//! wrapper crates built on it (`test-fixtures` feature).

/// Whitespace word-level tokenizer: `[UNK]`=0, `hello`=1, `world`=2, with
/// `[UNK]` registered as a special added token.
pub const WORD_LEVEL_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"[UNK]": 0, "hello": 1, "world": 2},
    "unk_token": "[UNK]"
  }
}"#;

/// Same vocabulary plus a `<s>` (id 3) begin marker inserted by a template
/// post-processor when special tokens are requested.
pub const TEMPLATE_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [
    {"id": 0, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
    {"id": 3, "content": "<s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
  ],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": {
    "type": "TemplateProcessing",
    "single": [
      {"SpecialToken": {"id": "<s>", "type_id": 0}},
      {"Sequence": {"id": "A", "type_id": 0}}
    ],
    "pair": [
      {"SpecialToken": {"id": "<s>", "type_id": 0}},
      {"Sequence": {"id": "A", "type_id": 0}},
      {"Sequence": {"id": "B", "type_id": 1}}
    ],
    "special_tokens": {
      "<s>": {"id": "<s>", "ids": [3], "tokens": ["<s>"]}
    }
  },
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {"[UNK]": 0, "hello": 1, "world": 2},
    "unk_token": "[UNK]"
  }
}"#;

/// Whitespace word-level tokenizer with no vocabulary and no added tokens.
pub const EMPTY_VOCAB_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": {"type": "Whitespace"},
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {},
    "unk_token": "[UNK]"
  }
}"#;

#[cfg(test)]
pub(crate) fn new_handle(json: &str) -> *mut crate::TokenizerHandle {
    use crate::{TokenizersErrorCode, tokenizers_new_from_str};
    use std::ffi::c_char;

    let _ = env_logger::builder().is_test(true).try_init();

    let mut handle = std::ptr::null_mut();
    let code =
        unsafe { tokenizers_new_from_str(json.as_ptr() as *const c_char, json.len(), &mut handle) };
    assert_eq!(code, TokenizersErrorCode::Ok);
    assert!(!handle.is_null());
    handle
}
