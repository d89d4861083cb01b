//! Canonical spelling of C type strings.
//!
//! Type strings come from flattened registry XML and carry whatever spacing
//! and vendor aliases the registry authors used. After normalization two
//! spellings of the same type compare equal as strings, which is what the
//! resolver's type-set lookups rely on.

use std::sync::LazyLock;

use regex::Regex;

use crate::ParseError;

static VOID_ALIAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bGLvoid\b").unwrap());

static VENDOR_SUFFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(GLhalf|GLintptr|GLsizeiptr|GLint64|GLuint64)(?:ARB|EXT|NV|ATI)+\b").unwrap()
});

static SPACE_BEFORE_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\*").unwrap());

static STAR_AFTER_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^*])\*").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.+)\b(\w+)(?:\s*\[\s*(\d*)\s*\])?$").unwrap()
});

/// Convert a type spelling into its canonical form.
///
/// Idempotent: normalizing an already-canonical string returns it unchanged.
///
/// # Examples
/// ```
/// use vndgen_core::normalize_type;
/// assert_eq!(normalize_type("const  GLubyte*"), "const GLubyte *");
/// assert_eq!(normalize_type("GLint64EXT"), "GLint64");
/// assert_eq!(normalize_type("GLvoid"), "void");
/// ```
pub fn normalize_type(raw: &str) -> String {
    let rv = VOID_ALIAS.replace_all(raw, "void");
    let rv = VENDOR_SUFFIXED.replace_all(&rv, "$1");
    let rv = rv.trim();
    let rv = SPACE_BEFORE_STAR.replace_all(rv, "*");
    let rv = STAR_AFTER_CHAR.replace_all(&rv, "$1 *");
    WHITESPACE_RUN.replace_all(&rv, " ").into_owned()
}

/// Split a flattened `TYPE NAME` declaration into its normalized type and name.
///
/// A trailing array bound (`GLuint baseAndCount[2]`) is turned into a pointer
/// type. This loses the bound, which the generated stubs never need.
pub fn split_declaration(text: &str) -> Result<(String, String), ParseError> {
    let trimmed = text.trim();
    let caps = DECLARATION
        .captures(trimmed)
        .ok_or_else(|| ParseError::Declaration(trimmed.to_string()))?;

    let mut ty = caps[1].to_string();
    if caps.get(3).is_some() {
        ty.push('*');
    }

    let ty = normalize_type(&ty);
    if ty.is_empty() {
        return Err(ParseError::Declaration(trimmed.to_string()));
    }
    Ok((ty, caps[2].to_string()))
}

/// Whether a canonical type is a pointer.
pub fn is_pointer(ty: &str) -> bool {
    ty.ends_with('*')
}
