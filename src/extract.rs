//! Extracción de frases de un fichero `*_usersays_en.json`.

use crate::{
    error::{Result, UploadError},
    models::PhraseRecord,
};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Interpreta `bytes` como JSON UTF-8 con la forma `[{"data": [{"text": ...}]}]`
/// y devuelve una frase por registro, concatenando sus fragmentos en orden.
///
/// Un registro con `data` vacío produce la frase vacía. Se admite un BOM
/// UTF-8 inicial.
pub fn extract_phrases(bytes: &[u8]) -> Result<Vec<String>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let records: Vec<PhraseRecord> =
        serde_json::from_slice(bytes).map_err(|e| UploadError::Parse(e.to_string()))?;
    Ok(records.iter().map(PhraseRecord::to_phrase).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[test]
    fn concatenates_fragments_in_order() {
        let json = br#"[
            {"id": "1", "data": [{"text": "a"}, {"text": "b"}], "isTemplate": false, "count": 0},
            {"id": "2", "data": [{"text": "c", "meta": "@sys.any", "userDefined": true}]}
        ]"#;

        assert_eq!(extract_phrases(json).unwrap(), vec!["ab", "c"]);
    }

    #[test]
    fn keeps_whitespace_inside_fragments() {
        let json = br#"[{"data": [{"text": "book a table for "}, {"text": "two", "alias": "n"}, {"text": " people"}]}]"#;

        assert_eq!(
            extract_phrases(json).unwrap(),
            vec!["book a table for two people"]
        );
    }

    #[test]
    fn empty_fragment_list_yields_empty_phrase() {
        let json = br#"[{"data": []}, {"data": [{"text": "hi"}]}]"#;

        assert_eq!(extract_phrases(json).unwrap(), vec!["", "hi"]);
    }

    #[test]
    fn accepts_leading_byte_order_mark() {
        let json = b"\xEF\xBB\xBF[{\"data\": [{\"text\": \"hola\"}]}]";

        assert_eq!(extract_phrases(json).unwrap(), vec!["hola"]);
    }

    #[test]
    fn empty_document_yields_no_phrases() {
        assert!(extract_phrases(b"[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_shapes() {
        assert_err!(extract_phrases(b"{not json"));
        assert_err!(extract_phrases(br#"{"data": []}"#));
        assert_err!(extract_phrases(br#"[{"id": "sin data"}]"#));
        assert_err!(extract_phrases(br#"[{"data": [{"text": 42}]}]"#));
        assert_err!(extract_phrases(br#"[{"data": [{"alias": "sin texto"}]}]"#));
        assert_err!(extract_phrases(&[b'[', 0xff, 0xfe, b']']));
    }

    #[test]
    fn parse_failures_use_the_parse_category() {
        let err = extract_phrases(b"null").unwrap_err();
        assert!(matches!(err, UploadError::Parse(_)), "{err:?}");
    }
}
