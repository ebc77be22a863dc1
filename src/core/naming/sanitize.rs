//! Layer name to file name conversion

/// Name used when nothing usable is left of a layer name
pub const FALLBACK_NAME: &str = "Layer";

const FORBIDDEN: [char; 9] = ['\\', '*', '/', '?', ':', '"', '|', '<', '>'];

/// Converts a layer name into a safe file name stem
///
/// Strips `\ * / ? : " | < >` and falls back to [`FALLBACK_NAME`] when the
/// result is empty. Each run of Unicode whitespace (tabs, newlines and
/// no-break spaces as well as plain spaces) becomes a single `_`, so no
/// control whitespace ever reaches a file name.
///
/// # Examples
///
/// ```
/// use strata::core::naming::sanitize_layer_name;
///
/// assert_eq!(sanitize_layer_name("Sky  / Clouds?"), "Sky_Clouds");
/// assert_eq!(sanitize_layer_name(""), "Layer");
/// ```
pub fn sanitize_layer_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space_run = false;

    for c in raw.chars() {
        if FORBIDDEN.contains(&c) {
            continue;
        }
        if c.is_whitespace() {
            if !in_space_run {
                out.push('_');
                in_space_run = true;
            }
            continue;
        }
        in_space_run = false;
        out.push(c);
    }

    if out.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    out
}
