//! Tests for the tokenizer wrapper.
//!
//! Run all tests: `cargo test --package hftok`

use super::*;

use tokenizers_ffi::fixtures::{EMPTY_VOCAB_JSON, TEMPLATE_JSON, WORD_LEVEL_JSON};

fn load(json: &str) -> HfTokenizer {
    let _ = env_logger::builder().is_test(true).try_init();
    HfTokenizer::from_blob_json(json).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

mod construction_tests {
    use super::*;

    #[test]
    fn test_from_blob_json_caches_added_tokens() {
        let tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(
            tokenizer.added_tokens(),
            &[AddedToken { content: "[UNK]".into(), id: 0 }]
        );
    }

    #[test]
    fn test_added_tokens_idempotent() {
        let tokenizer = load(TEMPLATE_JSON);
        let first = tokenizer.added_tokens().to_vec();
        let second = tokenizer.added_tokens().to_vec();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first.contains(&AddedToken { content: "<s>".into(), id: 3 }));
    }

    #[test]
    fn test_malformed_config_is_create_error() {
        let err = HfTokenizer::from_blob_json("{ not json").unwrap_err();

        assert!(matches!(err, TokenizerError::Create(..)));
        assert_eq!(err.code(), TokenizersErrorCode::InvalidConfig);
        assert!(err.to_string().starts_with("Failed to create tokenizer"));
    }

    #[test]
    fn test_unknown_model_type_is_create_error() {
        let json = WORD_LEVEL_JSON.replace("\"WordLevel\"", "\"NoSuchModel\"");
        let err = HfTokenizer::from_blob_json(&json).unwrap_err();
        assert_eq!(err.code(), TokenizersErrorCode::InvalidConfig);
    }

    #[test]
    fn test_options_single_threaded() {
        let options = TokenizerOptions::single_threaded();
        assert_eq!(options.parallelism, Some(false));
        assert_eq!(options.to_raw().parallelism, 0);
    }

    #[test]
    fn test_options_default_keeps_engine_default() {
        let options = TokenizerOptions::default();
        assert!(options.parallelism.is_none());
        assert_eq!(options.to_raw().parallelism, -1);
        assert_eq!(
            TokenizerOptions { parallelism: Some(true) }.to_raw().parallelism,
            1
        );
    }

    #[test]
    fn test_move_transfers_handle() {
        let tokenizer = load(WORD_LEVEL_JSON);
        let moved = tokenizer;
        let holder = vec![moved];
        assert_eq!(holder[0].vocab_size(), 3);
    }

    #[test]
    fn test_tokenizer_is_send() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<HfTokenizer>();
        assert_send::<SharedTokenizer>();
        assert_sync::<SharedTokenizer>();
    }
}

// =============================================================================
// Encoding
// =============================================================================

mod encode_tests {
    use super::*;

    #[test]
    fn test_encode_hello_world() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        let encoding = tokenizer.encode("hello world")?;

        assert_eq!(encoding.ids, vec![1, 2]);
        assert_eq!(encoding.attention_mask, vec![1, 1]);
        Ok(())
    }

    #[test]
    fn test_encode_default_flag_is_false() -> anyhow::Result<()> {
        let tokenizer = load(TEMPLATE_JSON);
        assert_eq!(tokenizer.encode("hello world")?, tokenizer.encode_with("hello world", false)?);
        Ok(())
    }

    #[test]
    fn test_encode_with_special_tokens() -> anyhow::Result<()> {
        let tokenizer = load(TEMPLATE_JSON);
        let encoding = tokenizer.encode_with("hello world", true)?;

        assert_eq!(encoding.ids, vec![3, 1, 2]);
        assert_eq!(encoding.attention_mask, vec![1, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_encode_lengths_match() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        for text in ["hello", "world hello world", "unknown words here", "hello, world!"] {
            let encoding = tokenizer.encode(text)?;
            assert!(!encoding.is_empty(), "{text:?} produced no tokens");
            assert_eq!(encoding.ids.len(), encoding.attention_mask.len());
            assert_eq!(encoding.len(), encoding.ids.len());
        }
        Ok(())
    }

    #[test]
    fn test_encode_unknown_maps_to_unk() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.encode("missing")?.ids, vec![0]);
        Ok(())
    }

    #[test]
    fn test_encode_multibyte_text() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        let text = "héllo 世界 hello";
        let encoding = tokenizer.encode(text)?;

        assert_eq!(encoding.ids.len(), encoding.attention_mask.len());
        assert!(encoding.len() >= 3);
        assert_eq!(encoding.ids.last(), Some(&1));
        assert!(encoding.ids[..encoding.len() - 1].iter().all(|&id| id == 0));

        let batch = tokenizer.encode_batch(&[text, "世界", "hello"])?;
        assert_eq!(batch[0], encoding);
        assert!(batch[1].ids.iter().all(|&id| id == 0));
        assert_eq!(batch[2].ids, vec![1]);
        Ok(())
    }

    #[test]
    fn test_encode_empty_text() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.encode("")?, HfEncoding::default());
        Ok(())
    }

    #[test]
    fn test_encode_batch_order_preserved() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        let batch = tokenizer.encode_batch(&["hello", "world"])?;

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].ids, vec![1]);
        assert_eq!(batch[1].ids, vec![2]);
        Ok(())
    }

    #[test]
    fn test_encode_batch_matches_single_encode() -> anyhow::Result<()> {
        let tokenizer = load(TEMPLATE_JSON);
        let texts: Vec<String> = vec![
            "world".into(),
            "hello world hello".into(),
            String::new(),
            "missing hello".into(),
        ];

        for add_special in [false, true] {
            let batch = tokenizer.encode_batch_with(&texts, add_special)?;
            assert_eq!(batch.len(), texts.len());
            for (text, encoding) in texts.iter().zip(&batch) {
                assert_eq!(encoding, &tokenizer.encode_with(text, add_special)?);
            }
        }
        Ok(())
    }

    #[test]
    fn test_encode_batch_empty() -> anyhow::Result<()> {
        let tokenizer = load(WORD_LEVEL_JSON);
        let texts: [&str; 0] = [];
        assert!(tokenizer.encode_batch(&texts)?.is_empty());
        Ok(())
    }
}

// =============================================================================
// Decoding
// =============================================================================

mod decode_tests {
    use super::*;

    #[test]
    fn test_decode_hello_world() -> anyhow::Result<()> {
        let mut tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.decode(&[1, 2])?, "hello world");
        Ok(())
    }

    #[test]
    fn test_decode_skip_special_tokens() -> anyhow::Result<()> {
        let mut tokenizer = load(TEMPLATE_JSON);
        assert_eq!(tokenizer.decode_with(&[3, 1, 2], true)?, "hello world");
        assert_eq!(tokenizer.decode(&[3, 1, 2])?, "<s> hello world");
        Ok(())
    }

    #[test]
    fn test_decode_results_are_independent() -> anyhow::Result<()> {
        let mut tokenizer = load(WORD_LEVEL_JSON);
        let first = tokenizer.decode(&[1])?;
        let second = tokenizer.decode(&[2, 1])?;

        assert_eq!(first, "hello");
        assert_eq!(second, "world hello");
        Ok(())
    }

    #[test]
    fn test_decode_empty_ids() -> anyhow::Result<()> {
        let mut tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.decode(&[])?, "");
        Ok(())
    }

    #[test]
    fn test_round_trip() -> anyhow::Result<()> {
        let mut tokenizer = load(TEMPLATE_JSON);
        for text in ["hello", "hello world", "world world hello"] {
            let ids = tokenizer.encode_with(text, false)?.ids;
            assert_eq!(tokenizer.decode_with(&ids, true)?, text);

            let ids = tokenizer.encode_with(text, true)?.ids;
            assert_eq!(tokenizer.decode_with(&ids, true)?, text);
        }
        Ok(())
    }
}

// =============================================================================
// Vocabulary
// =============================================================================

mod vocab_tests {
    use super::*;

    #[test]
    fn test_vocab_size_stable_and_positive() {
        let tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.vocab_size(), 3);
        assert_eq!(tokenizer.vocab_size(), tokenizer.vocab_size());
    }

    #[test]
    #[should_panic(expected = "empty vocabulary")]
    fn test_vocab_size_panics_on_empty_vocabulary() {
        let tokenizer = load(EMPTY_VOCAB_JSON);
        tokenizer.vocab_size();
    }

    #[test]
    fn test_token_to_id_sentinel() {
        let tokenizer = load(WORD_LEVEL_JSON);
        assert_eq!(tokenizer.token_to_id("hello"), 1);
        assert_eq!(tokenizer.token_to_id("missing"), -1);
        assert_eq!(tokenizer.token_to_id("missing"), TOKEN_NOT_FOUND);
    }

    #[test]
    fn test_id_to_token() {
        let mut tokenizer = load(TEMPLATE_JSON);
        assert_eq!(tokenizer.id_to_token(2), "world");
        assert_eq!(tokenizer.id_to_token(3), "<s>");
        assert_eq!(tokenizer.id_to_token(42), "");
        assert_eq!(tokenizer.id_to_token(-5), "");
    }

    #[test]
    fn test_token_to_id_consistent_with_id_to_token() {
        let mut tokenizer = load(TEMPLATE_JSON);
        let vocab: Vec<String> = (0..tokenizer.vocab_size() as i32)
            .map(|id| tokenizer.id_to_token(id))
            .collect();

        for (id, token) in vocab.iter().enumerate() {
            assert_eq!(tokenizer.token_to_id(token), id as i32);
        }
        for token in ["missing", "Hello", "", "<s >"] {
            assert!(!vocab.iter().any(|t| t == token));
            assert_eq!(tokenizer.token_to_id(token), TOKEN_NOT_FOUND);
        }
    }
}

// =============================================================================
// Shared handle
// =============================================================================

mod shared_tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_end_to_end() -> anyhow::Result<()> {
        let shared = SharedTokenizer::from(load(WORD_LEVEL_JSON));

        assert_eq!(shared.encode("hello world")?.ids, vec![1, 2]);
        assert_eq!(shared.decode(&[1, 2])?, "hello world");
        assert_eq!(shared.token_to_id("missing"), TOKEN_NOT_FOUND);
        assert_eq!(shared.vocab_size(), 3);
        assert_eq!(shared.id_to_token(1), "hello");
        assert_eq!(shared.added_tokens().len(), 1);

        let tokenizer = shared.into_inner();
        assert_eq!(tokenizer.vocab_size(), 3);
        Ok(())
    }

    #[test]
    fn test_shared_concurrent_decodes_do_not_interleave() {
        let shared = Arc::new(SharedTokenizer::new(load(TEMPLATE_JSON)));
        let cases: [(&[i32], &str); 4] = [
            (&[1], "hello"),
            (&[2], "world"),
            (&[1, 2], "hello world"),
            (&[2, 2, 1], "world world hello"),
        ];

        let handles: Vec<_> = cases
            .iter()
            .map(|&(ids, expected)| {
                let shared = Arc::clone(&shared);
                let ids = ids.to_vec();
                thread::spawn(move || {
                    for _ in 0..200 {
                        assert_eq!(shared.decode_with(&ids, true).unwrap(), expected);
                        let batch = shared.encode_batch(&[expected]).unwrap();
                        assert_eq!(batch[0].ids, ids);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
