//! Property tests for the hashing embedder and vector transport.

use proptest::prelude::*;

use hindsight_embeddings::{cosine, from_base64, l2_norm, to_base64, HashingEmbedder};

proptest! {
    #[test]
    fn prop_embed_deterministic(text in ".{0,64}", dims in 8usize..512) {
        let e = HashingEmbedder::new(dims);
        prop_assert_eq!(e.embed_text(&text), e.embed_text(&text));
    }

    #[test]
    fn prop_embed_unit_norm_or_zero(text in "[a-zA-Z ]{0,64}", dims in 8usize..512) {
        let e = HashingEmbedder::new(dims);
        let v = e.embed_text(&text);
        prop_assert_eq!(v.len(), dims);
        let norm = l2_norm(&v);
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn prop_self_cosine_is_one(word in "[a-z]{3,12}") {
        let e = HashingEmbedder::new(384);
        let v = e.embed_text(&word);
        let c = cosine(&v, &v).unwrap();
        prop_assert!((c - 1.0).abs() < 1e-6);
    }

    #[test]
    fn prop_transport_roundtrip(v in prop::collection::vec(-1e6f32..1e6, 0..128)) {
        let back = from_base64(&to_base64(&v)).unwrap();
        prop_assert_eq!(v, back);
    }
}
