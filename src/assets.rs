//! Static assets: the embedded stylesheet and script, content fingerprinting,
//! and copying the content `assets/` directory.
//!
//! The stylesheet and script are compiled into the binary and written once
//! per build under a fingerprinted name (`site.3fa9c21b.css`). The
//! fingerprint is the first 8 hex digits of the SHA-256 of the file contents,
//! so a deploy that doesn't change them keeps the same URL and browsers keep
//! their cached copy, while any change produces a new URL.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS_STATIC: &str = include_str!("../static/site.js");

/// A built asset ready to be written to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltAsset {
    /// Fingerprinted filename, e.g. `site.3fa9c21b.css`.
    pub filename: String,
    pub contents: String,
}

impl BuiltAsset {
    /// Site-absolute URL of the asset.
    pub fn href(&self) -> String {
        format!("/assets/{}", self.filename)
    }
}

/// Hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Insert a content hash before the extension: `site.css` → `site.<hash8>.css`.
pub fn fingerprint(name: &str, bytes: &[u8]) -> String {
    let hash = sha256_hex(bytes);
    let short = &hash[..8];
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}.{short}.{ext}"),
        None => format!("{name}.{short}"),
    }
}

/// Build the stylesheet: generated color variables followed by the base styles.
pub fn build_stylesheet(color_css: &str) -> BuiltAsset {
    let contents = format!("{color_css}\n{CSS_STATIC}");
    BuiltAsset {
        filename: fingerprint("site.css", contents.as_bytes()),
        contents,
    }
}

/// Build the progressive-enhancement script.
pub fn build_script() -> BuiltAsset {
    BuiltAsset {
        filename: fingerprint("site.js", JS_STATIC.as_bytes()),
        contents: JS_STATIC.to_string(),
    }
}

/// Write built assets to `<output>/assets/`.
pub fn write_built(output_dir: &Path, assets: &[&BuiltAsset]) -> io::Result<()> {
    let dir = output_dir.join("assets");
    fs::create_dir_all(&dir)?;
    for asset in assets {
        fs::write(dir.join(&asset.filename), &asset.contents)?;
    }
    Ok(())
}

/// Recursively copy `src` into `dst`, skipping hidden files.
///
/// Returns the number of files copied. A missing `src` copies nothing.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    let walker = WalkDir::new(src).into_iter().filter_entry(|e| {
        e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
    });
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
