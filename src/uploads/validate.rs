//! Pre-flight checks for file uploads. A failed check blocks the action
//! before any file is stored or any row is touched.

/// Metadata of one uploaded file, as seen by the validators.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub size: usize,
}

/// Type/size/count constraints for one upload field.
#[derive(Debug, Clone, Copy)]
pub struct UploadRules {
    pub field: &'static str,
    pub allowed_types: &'static [&'static str],
    pub max_bytes: usize,
    pub min_count: usize,
    pub max_count: usize,
}

const MB: usize = 1024 * 1024;

const DOCUMENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/jpg", "image/png"];
const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Bank payment confirmation document.
pub const PAYMENT_DOCUMENT: UploadRules = UploadRules {
    field: "payment_document",
    allowed_types: DOCUMENT_TYPES,
    max_bytes: 5 * MB,
    min_count: 1,
    max_count: 1,
};

/// Cash payment receipt photo. Image only.
pub const CASH_RECEIPT: UploadRules = UploadRules {
    field: "payment_document",
    allowed_types: IMAGE_TYPES,
    max_bytes: 5 * MB,
    min_count: 1,
    max_count: 1,
};

/// Shipment waybill (TTN).
pub const TTN_DOCUMENT: UploadRules = UploadRules {
    field: "ttn_document",
    allowed_types: DOCUMENT_TYPES,
    max_bytes: 5 * MB,
    min_count: 1,
    max_count: 1,
};

/// Delivery confirmation photos.
pub const DELIVERY_PHOTOS: UploadRules = UploadRules {
    field: "delivery_photos",
    allowed_types: IMAGE_TYPES,
    max_bytes: 2 * MB,
    min_count: 1,
    max_count: 5,
};

impl UploadRules {
    /// Check count, then type, then per-file size. The returned message names
    /// the exact rule that was violated.
    pub fn validate(&self, files: &[UploadedFile]) -> Result<(), String> {
        if files.len() < self.min_count || files.len() > self.max_count {
            if self.min_count == 1 && self.max_count == 1 {
                return Err("Exactly one file is required".to_string());
            }
            return Err(format!(
                "Between {} and {} files are allowed (got {})",
                self.min_count,
                self.max_count,
                files.len()
            ));
        }

        for file in files {
            if !self.allowed_types.contains(&file.content_type.as_str()) {
                return Err(format!(
                    "File type '{}' is not allowed (allowed: {})",
                    file.content_type,
                    self.allowed_types.join(", ")
                ));
            }
            if file.size > self.max_bytes {
                return Err(format!(
                    "File '{}' exceeds the {} MB size limit",
                    file.filename,
                    self.max_bytes / MB
                ));
            }
        }

        Ok(())
    }
}
