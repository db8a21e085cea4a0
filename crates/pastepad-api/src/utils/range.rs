//! `Range: bytes=start-end` parsing for resumable downloads.

/// Requested range cannot be satisfied for the file size (HTTP 416).
#[derive(Debug, PartialEq, Eq)]
pub struct UnsatisfiableRange;

/// Parse a single-range `Range` header against a file size.
///
/// Returns `Ok(None)` when there is no usable range header (serve the whole
/// file), `Ok(Some((start, end)))` for a satisfiable inclusive range, and
/// `Err` when the header parses but falls outside the file.
pub fn parse_range(
    header: Option<&str>,
    file_size: u64,
) -> Result<Option<(u64, u64)>, UnsatisfiableRange> {
    let Some(header) = header else {
        return Ok(None);
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return Ok(None);
    };

    // Single range only; multipart ranges are served as the full file.
    let Some((start_str, end_str)) = spec.split_once('-') else {
        return Ok(None);
    };
    if start_str.contains(',') || end_str.contains(',') || end_str.contains('-') {
        return Ok(None);
    }

    let Ok(start) = start_str.trim().parse::<u64>() else {
        return Ok(None);
    };
    let end = if end_str.trim().is_empty() {
        file_size.saturating_sub(1)
    } else {
        match end_str.trim().parse::<u64>() {
            Ok(end) => end,
            Err(_) => return Ok(None),
        }
    };

    if start >= file_size || end >= file_size || start > end {
        return Err(UnsatisfiableRange);
    }

    Ok(Some((start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header_serves_full_file() {
        assert_eq!(parse_range(None, 100), Ok(None));
        assert_eq!(parse_range(Some("items=0-1"), 100), Ok(None));
    }

    #[test]
    fn test_explicit_range() {
        assert_eq!(parse_range(Some("bytes=0-49"), 100), Ok(Some((0, 49))));
        assert_eq!(parse_range(Some("bytes=50-99"), 100), Ok(Some((50, 99))));
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(parse_range(Some("bytes=10-"), 100), Ok(Some((10, 99))));
    }

    #[test]
    fn test_unsatisfiable_ranges() {
        assert_eq!(parse_range(Some("bytes=100-"), 100), Err(UnsatisfiableRange));
        assert_eq!(parse_range(Some("bytes=0-100"), 100), Err(UnsatisfiableRange));
        assert_eq!(parse_range(Some("bytes=60-50"), 100), Err(UnsatisfiableRange));
    }

    #[test]
    fn test_malformed_ranges_ignored() {
        assert_eq!(parse_range(Some("bytes=abc-def"), 100), Ok(None));
        assert_eq!(parse_range(Some("bytes=0-10,20-30"), 100), Ok(None));
        assert_eq!(parse_range(Some("bytes="), 100), Ok(None));
    }
}
