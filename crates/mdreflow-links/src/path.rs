//! Lexical path and URL helpers.
//!
//! Paths here are `/`-separated strings relative to the tree root, kept
//! as segment lists. Nothing in this module touches the filesystem.

/// Split a link target into path, query and fragment.
///
/// The `?` and `#` separators are not included in the returned parts.
pub fn split_target(raw: &str) -> (&str, &str, &str) {
    let (rest, fragment) = raw.split_once('#').unwrap_or((raw, ""));
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    (path, query, fragment)
}

/// Whether the target carries a URL scheme such as `ftp:` or `vscode:`.
///
/// Only text before the first `/`, `?` or `#` is considered.
pub fn has_scheme(raw: &str) -> bool {
    let head = raw.split(['/', '?', '#']).next().unwrap_or("");
    let Some((scheme, _)) = head.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept as written.
pub fn percent_decode(input: &str) -> String {
    match urlencoding::decode(input) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
        }
    }
}

/// Encode every byte outside ASCII letters, digits and `/-._~`.
pub fn percent_encode(input: &str) -> String {
    input
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve `relative` against `base`, folding `.` and `..` lexically.
///
/// Returns `None` when a `..` would climb above the root.
pub fn normalize(base: &[String], relative: &str) -> Option<Vec<String>> {
    let mut segments = base.to_vec();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            name => segments.push(name.to_string()),
        }
    }
    Some(segments)
}

/// Spell `target` relative to the directory `from`.
pub fn relative_path(from: &[String], target: &[String]) -> String {
    let common = from
        .iter()
        .zip(target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat("..").take(from.len() - common));
    parts.extend(target[common..].iter().map(String::as_str));

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
