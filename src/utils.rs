use std::path::Path;
use urlencoding;

/// Generates a URL the desktop webview can load a local file from.
/// Separators are normalized to forward slashes and the path is percent-encoded.
pub fn get_local_file_url(path: &Path) -> String {
    let p_str = path.to_string_lossy().replace("\\", "/");
    format!("http://dioxus.localhost/{}", urlencoding::encode(&p_str))
}

/// `mm:ss` label for a position in seconds. Seconds are floored; minutes are
/// not capped at 59.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
