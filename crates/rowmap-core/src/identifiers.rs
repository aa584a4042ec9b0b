//! SQL identifier quoting.

/// Quote a SQL identifier using ANSI double-quoting.
///
/// Embedded double-quotes are escaped by doubling them (`"` → `""`), so the
/// result is a valid identifier for any input string. Quoting preserves
/// case and makes SQL keywords safe to use as column names.
///
/// # Examples
///
/// ```
/// use rowmap_core::quote_ident;
///
/// assert_eq!(quote_ident("name"), "\"name\"");
/// assert_eq!(quote_ident("order"), "\"order\""); // SQL keyword
/// assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
/// ```
#[inline]
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
