pub mod storage;
pub mod validate;

pub use validate::{
    CASH_RECEIPT, DELIVERY_PHOTOS, PAYMENT_DOCUMENT, TTN_DOCUMENT, UploadRules, UploadedFile,
};

use actix_multipart::form::tempfile::TempFile;

/// Extract the metadata the validators need from multipart temp files.
pub fn file_meta(files: &[TempFile]) -> Vec<UploadedFile> {
    files
        .iter()
        .map(|f| UploadedFile {
            filename: f.file_name.clone().unwrap_or_default(),
            content_type: f
                .content_type
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_default(),
            size: f.size,
        })
        .collect()
}
