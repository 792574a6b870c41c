use serde_json::Value;

const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '!'];

/// Turns a free-text channel name into a file-system safe, percent-encoded base name.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    urlencoding::encode(&cleaned).into_owned()
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Reads a scalar API field as text. Counts arrive as strings, but numbers are accepted too.
pub fn json_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `2006-08-12T18:34:55Z` -> `2006-08-12`
pub fn date_part(timestamp: &str) -> String {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date)
        .to_string()
}
