use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn validate_tsv_or_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    match lowercase_extension(&pb).as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}

/// Field delimiter implied by a file extension; anything but `.tsv` is comma separated.
pub fn delimiter_for(path: &Path) -> u8 {
    match lowercase_extension(path).as_deref() {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}
