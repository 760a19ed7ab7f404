//! PDF engine operations: decrypt, encrypt and re-serialize documents.
//!
//! All operations work on in-memory buffers; the binary format itself is
//! owned by `lopdf`.

use lopdf::encryption::{EncryptionState, EncryptionVersion, Permissions};
use lopdf::{Document, Object, StringFormat};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// RC4 key length used by the standard security handler, in bits.
const RC4_KEY_BITS: usize = 128;

#[derive(Error, Debug)]
pub enum PdfServiceError {
    #[error("Wrong password or decryption failed")]
    WrongPassword,

    #[error("PDF is already encrypted. Unlock first if you want to change password.")]
    AlreadyEncrypted,

    #[error("PDF processing failed: {0}")]
    Engine(#[from] lopdf::Error),

    #[error("PDF encryption failed: {0}")]
    Encryption(String),

    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decrypt `data` with `password` if it is encrypted, then re-serialize.
///
/// Unencrypted input goes through the same re-serialization, so the operation
/// is an idempotent pass-through on plain documents.
pub fn unlock(data: &[u8], password: &str) -> Result<Vec<u8>, PdfServiceError> {
    let mut doc = Document::load_mem(data)?;

    if doc.is_encrypted() {
        doc.decrypt(password)
            .map_err(|_| PdfServiceError::WrongPassword)?;
        // The output must not carry the encryption dictionary.
        doc.trailer.remove(b"Encrypt");
    }

    save(doc)
}

/// Encrypt `data` with `password` (used for both user and owner password)
/// and re-serialize.
pub fn protect(data: &[u8], password: &str) -> Result<Vec<u8>, PdfServiceError> {
    let mut doc = Document::load_mem(data)?;

    if doc.is_encrypted() {
        return Err(PdfServiceError::AlreadyEncrypted);
    }

    ensure_file_id(&mut doc, data);

    let state = {
        let version = EncryptionVersion::V2 {
            document: &doc,
            owner_password: password,
            user_password: password,
            key_length: RC4_KEY_BITS,
            permissions: Permissions::all(),
        };
        EncryptionState::try_from(version)
            .map_err(|e| PdfServiceError::Encryption(e.to_string()))?
    };

    doc.encrypt(&state)
        .map_err(|e| PdfServiceError::Encryption(e.to_string()))?;

    save(doc)
}

/// Re-serialize `data` with all eligible streams deflate-compressed.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, PdfServiceError> {
    let mut doc = Document::load_mem(data)?;
    doc.compress();
    save(doc)
}

fn save(mut doc: Document) -> Result<Vec<u8>, PdfServiceError> {
    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// The standard security handler derives its keys from the first element of
/// the trailer `/ID`; documents created without one get a digest-based id.
fn ensure_file_id(doc: &mut Document, seed: &[u8]) {
    if doc.trailer.get(b"ID").is_err() {
        let digest = Sha256::digest(seed);
        let id = Object::String(digest[..16].to_vec(), StringFormat::Hexadecimal);
        doc.trailer.set("ID", Object::Array(vec![id.clone(), id]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Stream, dictionary};

    /// Minimal document with one text page per entry in `page_texts`.
    fn create_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut page_ids = Vec::new();
        for text in page_texts {
            let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                },
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_ids.len() as i64),
        });

        for page_id in &page_ids {
            if let Ok(page) = doc.get_object_mut(*page_id) {
                if let Ok(dict) = page.as_dict_mut() {
                    dict.set("Parent", Object::Reference(pages_id));
                }
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    fn page_count(data: &[u8]) -> usize {
        Document::load_mem(data).unwrap().get_pages().len()
    }

    #[test]
    fn unlock_is_a_pass_through_for_plain_documents() {
        let input = create_test_pdf(&["Hello", "World"]);
        let output = unlock(&input, "").unwrap();
        assert_eq!(page_count(&output), 2);
        assert!(!Document::load_mem(&output).unwrap().is_encrypted());
    }

    #[test]
    fn unlock_preserves_page_content() {
        let input = create_test_pdf(&["Same content"]);
        let output = unlock(&input, "").unwrap();

        let in_doc = Document::load_mem(&input).unwrap();
        let out_doc = Document::load_mem(&output).unwrap();
        let in_page = *in_doc.get_pages().get(&1).unwrap();
        let out_page = *out_doc.get_pages().get(&1).unwrap();
        assert_eq!(
            in_doc.get_page_content(in_page).unwrap(),
            out_doc.get_page_content(out_page).unwrap()
        );
    }

    #[test]
    fn unlock_rejects_garbage_input() {
        let err = unlock(b"not a pdf", "").unwrap_err();
        assert!(matches!(err, PdfServiceError::Engine(_)));
    }

    #[test]
    fn protect_marks_the_document_encrypted() {
        let input = create_test_pdf(&["Secret"]);
        let output = protect(&input, "hunter2").unwrap();
        assert!(Document::load_mem(&output).unwrap().is_encrypted());
    }

    #[test]
    fn protect_rejects_already_encrypted_documents() {
        let input = create_test_pdf(&["Secret"]);
        let protected = protect(&input, "hunter2").unwrap();
        let err = protect(&protected, "other").unwrap_err();
        assert!(matches!(err, PdfServiceError::AlreadyEncrypted));
    }

    #[test]
    fn protect_rejects_even_the_correct_password_on_encrypted_input() {
        let input = create_test_pdf(&["Secret"]);
        let protected = protect(&input, "hunter2").unwrap();
        let err = protect(&protected, "hunter2").unwrap_err();
        assert!(matches!(err, PdfServiceError::AlreadyEncrypted));
    }

    #[test]
    fn protect_then_unlock_round_trips() {
        let input = create_test_pdf(&["One", "Two", "Three"]);
        let protected = protect(&input, "s3cret").unwrap();
        let unlocked = unlock(&protected, "s3cret").unwrap();
        assert_eq!(page_count(&unlocked), 3);
        assert!(!Document::load_mem(&unlocked).unwrap().is_encrypted());
    }

    #[test]
    fn unlock_with_wrong_password_fails_without_output() {
        let input = create_test_pdf(&["Secret"]);
        let protected = protect(&input, "right").unwrap();
        let err = unlock(&protected, "wrong").unwrap_err();
        assert!(matches!(err, PdfServiceError::WrongPassword));
    }

    #[test]
    fn compress_preserves_page_count() {
        let input = create_test_pdf(&["A", "B"]);
        let output = compress(&input).unwrap();
        assert_eq!(page_count(&output), 2);
    }

    #[test]
    fn ensure_file_id_fills_in_a_missing_id() {
        let input = create_test_pdf(&["X"]);
        let mut doc = Document::load_mem(&input).unwrap();
        assert!(doc.trailer.get(b"ID").is_err());
        ensure_file_id(&mut doc, &input);
        assert!(doc.trailer.get(b"ID").is_ok());
    }
}
