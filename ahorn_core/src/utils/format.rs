//! Display formatting for numbers, file sizes and attachments.

use serde::Serialize;
use url::Url;

use crate::core::domain::Attachment;
use crate::error::{CatalogError, CatalogResult};

const MAX_FRACTION_DIGITS: usize = 3;
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a number with comma digit grouping and at most three fraction
/// digits, e.g. `88860.5` -> `88,860.5`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats a byte count with binary units, e.g. `1536` -> `1.5 KB`.
///
/// Sizes beyond the gigabyte range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    format_file_size_with(bytes, 2)
}

pub fn format_file_size_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.*}", decimals, scaled);
    let trimmed = match rounded.parse::<f64>() {
        Ok(value) => value.to_string(),
        Err(_) => rounded,
    };
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Turns `revision-3` into `Revision 3`; other tags are returned unchanged.
pub fn format_attachment_tag(tag: &str) -> String {
    const PREFIX: &str = "revision-";

    let revision = tag
        .get(..PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(PREFIX))
        .map(|_| &tag[PREFIX.len()..])
        .filter(|number| !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()));

    match revision {
        Some(number) => format!("Revision {}", number),
        None => tag.to_string(),
    }
}

/// An attachment ready to be linked from a dataset page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAttachment {
    pub key: String,
    pub label: String,
    /// File name shown on the link.
    pub file_name: String,
    pub href: String,
    pub size: String,
}

/// Resolves `attachment.url` against `base_url` and prepares its labels.
///
/// The file name is the last path segment of the resolved URL, or the
/// attachment key when the path has none.
pub fn resolve_attachment(
    base_url: &str,
    key: &str,
    attachment: &Attachment,
) -> CatalogResult<ResolvedAttachment> {
    let base = Url::parse(base_url).map_err(|e| {
        CatalogError::Configuration(format!("Invalid base URL '{}': {}", base_url, e))
    })?;
    let url = base.join(&attachment.url).map_err(|e| {
        CatalogError::Validation(format!(
            "Invalid URL for attachment '{}': {} ({})",
            key, attachment.url, e
        ))
    })?;

    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(key)
        .to_string();

    Ok(ResolvedAttachment {
        key: key.to_string(),
        label: format_attachment_tag(key),
        file_name,
        href: url.to_string(),
        size: format_file_size(attachment.size),
    })
}
