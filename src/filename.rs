//! Download-name helpers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::Format;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.-]").expect("valid regex"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"--+").expect("valid regex"));

/// Replace anything outside `[a-zA-Z0-9.-]` with `-`, collapse dash runs,
/// trim edge dashes, lowercase.
pub fn sanitize_filename(name: &str) -> String {
    let replaced = DISALLOWED.replace_all(name, "-");
    let collapsed = DASH_RUNS.replace_all(&replaced, "-");
    collapsed.trim_matches('-').to_lowercase()
}

/// `photo.PNG` converted png→svg becomes `photo.svg`.
pub fn output_filename(original: &str, from: Format, to: Format) -> String {
    let base = strip_extension(original, from);
    format!("{}.{}", sanitize_filename(base), to)
}

fn strip_extension(name: &str, format: Format) -> &str {
    let ext = format.as_str();
    let cut = name.len().saturating_sub(ext.len());
    if cut > 0 && name.is_char_boundary(cut) {
        let (base, tail) = name.split_at(cut);
        if tail.eq_ignore_ascii_case(ext) && base.ends_with('.') {
            return &base[..base.len() - 1];
        }
    }
    name
}
