use flatline::codec::{decode, decode_units, encode, encode_units};
#[cfg(all(feature = "sha1", feature = "md5"))]
use flatline::{md5, sha1};
use flatline::{CodecError, Surrogate, utf8_encode};
use proptest::prelude::*;
use serde_json::{Value, json};

#[cfg(all(feature = "sha1", feature = "md5"))]
mod digests {
    use super::*;

    #[test]
    fn empty_string_sha1() {
        assert!(encode("").is_empty());
        assert_eq!(sha1(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn hello_world_vectors() {
        assert_eq!(sha1("Hello World"), "0a4d55a8d778e5022fab701977c5d840bbc486d0");
        assert_eq!(md5("Hello World"), "b10a8db164e0754105b7a99be72e3fe5");
    }

    #[test]
    fn encoded_and_plain_text_differ() {
        assert_eq!(sha1("Télécom"), "1f7baa5ae8ecbfc67e817518a7c1b672089716ea");
        assert_eq!(sha1("TÃ©lÃ©com"), "1472543473c082833b239fee0f615b284b970519");
    }

    #[test]
    fn md5_for_encoded_text_hashes_latin1() {
        assert_eq!(md5("TÃ©lÃ©com"), "e9110e4bfec350c15773923d0b9b7897");
    }

    proptest! {
        #[test]
        fn prop_digest_lengths(s in any::<String>()) {
            let sha = sha1(&s);
            let md = md5(&s);
            prop_assert_eq!(sha.len(), 40);
            prop_assert_eq!(md.len(), 32);
            prop_assert!(sha.bytes().chain(md.bytes()).all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        }
    }
}

mod codec_laws {
    use super::*;

    #[test]
    fn pass_through_values() {
        assert_eq!(utf8_encode(None).unwrap(), None);
        assert_eq!(utf8_encode(Some(&Value::Null)).unwrap(), Some(Value::Null));
        assert_eq!(utf8_encode(Some(&json!(""))).unwrap(), Some(json!("")));
    }

    #[test]
    fn numbers_become_decimal_strings() {
        assert_eq!(utf8_encode(Some(&json!(12345))).unwrap(), Some(json!("12345")));
    }

    #[test]
    fn containers_are_invalid_input() {
        assert!(matches!(
            utf8_encode(Some(&json!({}))),
            Err(CodecError::InvalidInputType { found: "object", .. })
        ));
        assert!(matches!(
            utf8_encode(Some(&json!([]))),
            Err(CodecError::InvalidInputType { found: "array", .. })
        ));
    }

    #[test]
    fn lone_high_surrogate_is_unmatched_lead() {
        let err = encode_units(&[0xD800]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedSurrogate {
                kind: Surrogate::Lead,
                index: 0
            }
        );
        assert!(err.to_string().contains("unmatched lead surrogate"));
    }
}

proptest! {
    #[test]
    fn prop_ascii_encodes_unchanged(s in "[\\x00-\\x7F]*") {
        let units: Vec<u16> = s.encode_utf16().collect();
        let encoded = encode_units(&units).unwrap();
        prop_assert_eq!(encoded.as_bytes(), s.as_bytes());
    }

    #[test]
    fn prop_decode_inverts_encode(s in any::<String>()) {
        prop_assert_eq!(decode(&encode(&s)).into_string().unwrap(), s);
    }

    #[test]
    fn prop_supplementary_code_points_round_trip(
        chars in prop::collection::vec(prop::char::range('\u{10000}', '\u{10FFFF}'), 0..16)
    ) {
        let s: String = chars.into_iter().collect();
        let units: Vec<u16> = s.encode_utf16().collect();
        let bytes = encode_units(&units).unwrap();
        let decoded = decode_units(&bytes.to_units());
        prop_assert_eq!(decoded.as_units(), units.as_slice());
    }

    #[test]
    fn prop_encode_inverts_decode_of_encoded(s in any::<String>()) {
        let bytes = encode(&s);
        prop_assert_eq!(encode_units(decode(&bytes).as_units()).unwrap(), bytes);
    }
}
