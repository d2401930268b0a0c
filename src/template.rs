//! Template substitution.
//!
//! A LaTeX template carries two sentinel lines. Everything between them is
//! replaced with the generated fragment; the sentinels themselves stay so the
//! output can be regenerated in place.

use std::path::Path;

use crate::constants::template::{BEGIN_MARKER, END_MARKER};
use crate::error::{Error, Result};

/// Replace the text between the sentinel markers with `fragment`.
pub fn fill_template(template: &str, fragment: &str) -> Result<String> {
    let begin = template
        .find(BEGIN_MARKER)
        .ok_or_else(|| Error::template(format!("missing {BEGIN_MARKER} marker")))?;
    let body_start = begin + BEGIN_MARKER.len();

    let end = template[body_start..]
        .find(END_MARKER)
        .map(|offset| body_start + offset)
        .ok_or_else(|| {
            if template.contains(END_MARKER) {
                Error::template(format!("{END_MARKER} appears before {BEGIN_MARKER}"))
            } else {
                Error::template(format!("missing {END_MARKER} marker"))
            }
        })?;

    let mut out = String::with_capacity(template.len() + fragment.len() + 2);
    out.push_str(&template[..body_start]);
    out.push('\n');
    out.push_str(fragment);
    if !fragment.is_empty() && !fragment.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&template[end..]);
    Ok(out)
}

/// Read a template from disk.
pub fn load_template(path: &Path) -> Result<String> {
    fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))
}
