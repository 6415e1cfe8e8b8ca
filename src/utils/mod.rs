use url::Url;

const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Format a byte count for display, binary-scaled with up to two decimals
/// and trailing zeros trimmed ("1.5 kB", "9.31 GB").
pub fn human_file_size(size: u64) -> String {
    if size == 0 {
        return "0B".to_string();
    }

    let mut exponent = 0;
    let mut scaled = size;
    while scaled >= 1024 && exponent < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }

    let value = size as f64 / 1024f64.powi(exponent as i32);
    let mut formatted = format!("{:.2}", value);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    format!("{} {}", formatted, SIZE_UNITS[exponent])
}

/// Resolve a link target against the page it was found on: relative parts
/// replace the last path segment, a leading "/" resolves against the origin.
pub fn url_join(base: &str, part: &str) -> Result<String, url::ParseError> {
    let joined = Url::parse(base)?.join(part)?;
    Ok(joined.to_string())
}

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
