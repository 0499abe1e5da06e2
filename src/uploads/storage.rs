use rand::Rng;
use std::fs;
use std::path::Path;

/// Filesystem directory for stored uploads, relative to the working
/// directory. Served at `/uploads`.
pub const UPLOAD_DIR: &str = "data/uploads";

/// Copy an accepted upload into the upload directory under a generated name.
/// Returns the web-relative path (`uploads/...`) for the database.
pub fn store(src: &Path, original_name: &str, prefix: &str) -> std::io::Result<String> {
    fs::create_dir_all(UPLOAD_DIR)?;

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin")
        .to_lowercase();

    let mut rng = rand::rng();
    let token: u32 = rng.random();
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let name = format!("{prefix}-{stamp}-{token:08x}.{ext}");

    fs::copy(src, format!("{UPLOAD_DIR}/{name}"))?;
    Ok(format!("uploads/{name}"))
}
