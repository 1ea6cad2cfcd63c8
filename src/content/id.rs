//! Stable record ids derived from file names.
//!
//! Ids are the absolute value of the classic `hash * 31 + code_unit` string
//! hash, computed over UTF-16 code units with signed 32-bit wraparound. They
//! only depend on the file name, so two files sharing a base name collide.

pub const MARKDOWN_EXT: &str = ".md";

/// Removes the first `.md` occurrence from `filename`.
pub fn strip_extension(filename: &str) -> String {
    filename.replacen(MARKDOWN_EXT, "", 1)
}

pub fn derive_id(name: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in name.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    // |i32::MIN| does not fit in i32
    hash.unsigned_abs()
}

pub fn id_from_filename(filename: &str) -> u32 {
    derive_id(&strip_extension(filename))
}
