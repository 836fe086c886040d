//! Fingerprints the storefront stylesheet.
//!
//! `static/css/main.css` is copied to `static/css/derived/main.<hash>.css`
//! and the crate receives its URL as `MAIN_CSS_HREF`. When the copy cannot
//! be made the plain stylesheet URL is used instead, so pages always link a
//! file that exists.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

const PLAIN_HREF: &str = "/static/css/main.css";

/// Hex characters of the digest kept in the file name.
const FINGERPRINT_LEN: usize = 8;

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set; serving unfingerprinted CSS");
        println!("cargo:rustc-env=MAIN_CSS_HREF={PLAIN_HREF}");
        return;
    };
    let static_dir = Path::new(&manifest_dir).join("static");
    println!(
        "cargo:rerun-if-changed={}",
        static_dir.join("css/main.css").display()
    );

    let href = match fingerprint_css(&static_dir) {
        Ok(href) => href,
        Err(e) => {
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            PLAIN_HREF.to_string()
        }
    };
    println!("cargo:rustc-env=MAIN_CSS_HREF={href}");
}

/// Copy the stylesheet under its content hash and return the copy's URL.
fn fingerprint_css(static_dir: &Path) -> io::Result<String> {
    let content = fs::read(static_dir.join("css/main.css"))?;
    let digest = format!("{:x}", Sha256::digest(&content));
    let fingerprint: String = digest.chars().take(FINGERPRINT_LEN).collect();

    let derived_dir = static_dir.join("css/derived");
    fs::create_dir_all(&derived_dir)?;
    let file_name = format!("main.{fingerprint}.css");
    fs::write(derived_dir.join(&file_name), &content)?;

    Ok(format!("/static/css/derived/{file_name}"))
}
