//! Unit tests for the upload validators.

use savdo::uploads::{CASH_RECEIPT, DELIVERY_PHOTOS, PAYMENT_DOCUMENT, TTN_DOCUMENT, UploadedFile};

fn file(name: &str, content_type: &str, size: usize) -> UploadedFile {
    UploadedFile {
        filename: name.to_string(),
        content_type: content_type.to_string(),
        size,
    }
}

#[test]
fn test_payment_document_accepts_pdf_and_images() {
    for content_type in ["application/pdf", "image/jpeg", "image/png"] {
        let files = [file("doc", content_type, 1024)];
        assert!(PAYMENT_DOCUMENT.validate(&files).is_ok());
    }

    println!("[PASS] test_payment_document_accepts_pdf_and_images");
}

#[test]
fn test_single_file_rules_require_exactly_one() {
    let err = PAYMENT_DOCUMENT.validate(&[]).unwrap_err();
    assert_eq!(err, "Exactly one file is required");

    let two = [
        file("a.pdf", "application/pdf", 100),
        file("b.pdf", "application/pdf", 100),
    ];
    let err = TTN_DOCUMENT.validate(&two).unwrap_err();
    assert_eq!(err, "Exactly one file is required");

    println!("[PASS] test_single_file_rules_require_exactly_one");
}

#[test]
fn test_disallowed_type_is_rejected() {
    let files = [file("receipt.pdf", "application/pdf", 1024)];
    let err = CASH_RECEIPT.validate(&files).unwrap_err();
    assert!(err.contains("application/pdf"), "got: {err}");
    assert!(err.contains("not allowed"), "got: {err}");

    let exe = [file("x.exe", "application/octet-stream", 10)];
    assert!(PAYMENT_DOCUMENT.validate(&exe).is_err());

    println!("[PASS] test_disallowed_type_is_rejected");
}

#[test]
fn test_oversized_file_is_rejected() {
    let big = [file("scan.pdf", "application/pdf", 5 * 1024 * 1024 + 1)];
    let err = PAYMENT_DOCUMENT.validate(&big).unwrap_err();
    assert!(err.contains("scan.pdf"), "got: {err}");
    assert!(err.contains("5 MB"), "got: {err}");

    // exactly at the limit is fine
    let at_limit = [file("scan.pdf", "application/pdf", 5 * 1024 * 1024)];
    assert!(PAYMENT_DOCUMENT.validate(&at_limit).is_ok());

    println!("[PASS] test_oversized_file_is_rejected");
}

#[test]
fn test_delivery_photos_count_window() {
    let photo = |n: usize| {
        (0..n)
            .map(|i| file(&format!("p{i}.jpg"), "image/jpeg", 1024))
            .collect::<Vec<_>>()
    };

    assert!(DELIVERY_PHOTOS.validate(&photo(1)).is_ok());
    assert!(DELIVERY_PHOTOS.validate(&photo(5)).is_ok());

    let err = DELIVERY_PHOTOS.validate(&photo(6)).unwrap_err();
    assert_eq!(err, "Between 1 and 5 files are allowed (got 6)");
    let err = DELIVERY_PHOTOS.validate(&photo(0)).unwrap_err();
    assert_eq!(err, "Between 1 and 5 files are allowed (got 0)");

    println!("[PASS] test_delivery_photos_count_window");
}

#[test]
fn test_rules_carry_their_form_field_names() {
    // the field names double as the multipart form fields and storage prefixes
    assert_eq!(PAYMENT_DOCUMENT.field, "payment_document");
    assert_eq!(CASH_RECEIPT.field, "payment_document");
    assert_eq!(TTN_DOCUMENT.field, "ttn_document");
    assert_eq!(DELIVERY_PHOTOS.field, "delivery_photos");

    println!("[PASS] test_rules_carry_their_form_field_names");
}

#[test]
fn test_count_is_checked_before_type() {
    // six files of a wrong type report the count violation first
    let six: Vec<_> = (0..6)
        .map(|i| file(&format!("f{i}.pdf"), "application/pdf", 100))
        .collect();
    let err = DELIVERY_PHOTOS.validate(&six).unwrap_err();
    assert!(err.contains("Between 1 and 5"), "got: {err}");

    println!("[PASS] test_count_is_checked_before_type");
}
