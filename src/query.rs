//! Query-string construction from typed option structs.
//!
//! Each options struct lists its own non-empty fields as key/value pairs;
//! zero values (0, empty string, `None`) are left out entirely.

use crate::error::ZendeskError;

/// Types that can be rendered as URL query parameters.
pub trait QueryParams {
    /// Appends this value's non-empty parameters to `pairs`.
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>);

    /// Collects the parameters into a fresh vector.
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.append_pairs(&mut pairs);
        pairs
    }
}

impl<T: QueryParams + ?Sized> QueryParams for &T {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        (**self).append_pairs(pairs);
    }
}

impl<T: QueryParams> QueryParams for Option<T> {
    fn append_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(inner) = self {
            inner.append_pairs(pairs);
        }
    }
}

/// Pushes `value` under `key` unless it is zero.
pub(crate) fn push_num(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: u32) {
    if value != 0 {
        pairs.push((key, value.to_string()));
    }
}

/// Pushes `value` under `key` unless it is empty.
pub(crate) fn push_str(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}

/// Replaces the query string of `path` with the parameters of `opts`.
///
/// Keys are sorted and both keys and values are percent-encoded, so
/// `page[size]` goes out as `page%5Bsize%5D`. When `opts` has no
/// parameters the bare path is returned.
///
/// # Errors
///
/// Returns `ZendeskError::Validation` if `path` contains a fragment.
pub fn add_options(path: &str, opts: &impl QueryParams) -> Result<String, ZendeskError> {
    if path.contains('#') {
        return Err(ZendeskError::validation(format!(
            "path must not contain a fragment: {:?}",
            path
        )));
    }

    let base = path.split_once('?').map_or(path, |(base, _)| base);

    let mut pairs = opts.to_pairs();
    if pairs.is_empty() {
        return Ok(base.to_string());
    }
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!("{}?{}", base, query))
}
