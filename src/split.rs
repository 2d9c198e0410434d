//! Splits a NOAA flask file whose sampling metadata changes mid-file into
//! homogeneous series files the converter accepts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConvertError;

/// Splits `path` on changes in the trailing sampling metadata columns.
/// Each part gets the full header block and a numbered suffix appended
/// to the input file name.
pub fn split_file(path: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let content = fs::read_to_string(path)?;
    let (header, parts) = split_str(&content)?;

    let mut paths = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        let mut name = path.as_os_str().to_os_string();
        name.push((i + 1).to_string());
        let out = PathBuf::from(name);

        let mut text = String::with_capacity(header.len() + part.len());
        text.push_str(header);
        text.push_str(part);
        fs::write(&out, text)?;
        info!("wrote {} ({} part {})", out.display(), path.display(), i + 1);
        paths.push(out);
    }
    Ok(paths)
}

/// Splits the file content into (header block, homogeneous data parts).
/// Consecutive rows belong to one part while the five columns preceding
/// the last one are unchanged.
fn split_str(content: &str) -> Result<(&str, Vec<String>), ConvertError> {
    let first = content
        .lines()
        .next()
        .ok_or_else(|| ConvertError::MalformedHeader("empty file".into()))?;
    let num_header: usize = first
        .strip_prefix("# number_of_header_lines:")
        .and_then(|n| n.trim().parse().ok())
        .ok_or_else(|| {
            ConvertError::MalformedHeader("first line must declare number_of_header_lines".into())
        })?;

    // byte offset where the data block starts
    let mut offset = 0;
    for _ in 0..num_header {
        match content[offset..].find('\n') {
            Some(pos) => offset += pos + 1,
            None => {
                return Err(ConvertError::MalformedHeader(
                    "fewer lines than number_of_header_lines".into(),
                ));
            }
        }
    }
    let header = &content[..offset];

    let mut parts: Vec<String> = Vec::new();
    let mut prev: Option<Vec<&str>> = None;
    for line in content[offset..].lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            continue;
        }
        let check: Vec<&str> = tokens[tokens.len() - 6..tokens.len() - 1].to_vec();
        if prev.as_ref() != Some(&check) {
            parts.push(String::new());
            prev = Some(check);
        }
        let part = parts.last_mut().unwrap();
        part.push_str(line);
        part.push('\n');
    }
    Ok((header, parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "\
# number_of_header_lines: 2
# data_fields: sample_site_code value flag sample_latitude sample_longitude sample_altitude sample_elevation sample_intake_height
ZEP 1530.4 ... 78.90715 11.88668 479.0 474.0 5.0
ZEP 1528.2 ... 78.90715 11.88668 479.0 474.0 5.0
ZEP 812.0 ... 78.90715 11.88668 479.0 468.0 5.0
ZEP 815.5 ... 78.90715 11.88668 479.0 468.0 5.0
";

    #[test]
    fn test_split_on_metadata_change() {
        let (header, parts) = split_str(CONTENT).unwrap();

        assert!(header.starts_with("# number_of_header_lines: 2"));
        assert_eq!(header.lines().count(), 2);
        // elevation changes after two rows: two parts
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].lines().count(), 2);
        assert!(parts[1].starts_with("ZEP 812.0"));
    }

    #[test]
    fn test_homogeneous_file_yields_one_part() {
        let content = CONTENT.replace(" 468.0", " 474.0");
        let (_, parts) = split_str(&content).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].lines().count(), 4);
    }

    #[test]
    fn test_missing_header_declaration() {
        let err = split_str("ZEP 1.0 ... 1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedHeader(_)));
    }
}
