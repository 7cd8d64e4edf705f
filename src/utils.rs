//! Formatting helpers for values the rendering layer displays

use regex::Regex;
use std::sync::OnceLock;

/// Length of a YouTube video id
const YOUTUBE_ID_LEN: usize = 11;

fn youtube_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^.*(youtu\.be/|v/|u/[A-Za-z0-9_]/|embed/|watch\?v=|&v=)([^#&?]*).*").ok()
        })
        .as_ref()
}

/// Extract the video id from a YouTube URL
///
/// Recognises `youtu.be/<id>`, `/v/<id>`, `/u/<x>/<id>` (`x` one ASCII word
/// character), `/embed/<id>`,
/// `watch?v=<id>` and `&v=<id>`. Returns `None` unless the id is exactly
/// 11 characters.
///
/// # Examples
///
/// ```
/// use course_content::utils::extract_youtube_id;
///
/// assert_eq!(
///     extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_youtube_id("https://example.com/video.mp4"), None);
/// ```
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let captures = youtube_pattern()?.captures(url)?;
    let id = captures.get(2)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// Format a price the way an en-US currency formatter does, without forcing
/// fraction digits.
///
/// Known currencies use their symbol; others use the ISO code followed by a
/// no-break space.
///
/// # Examples
///
/// ```
/// use course_content::utils::format_price;
///
/// assert_eq!(format_price(1000.0, "USD"), "$1,000");
/// assert_eq!(format_price(1000.0, "BDT"), "BDT\u{a0}1,000");
/// assert_eq!(format_price(12.5, "USD"), "$12.5");
/// ```
pub fn format_price(price: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let (prefix, max_fraction_digits) = match code.as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "INR" => ("₹".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        _ => (format!("{}\u{a0}", code), 2),
    };

    if !price.is_finite() {
        return format!("{}{}", prefix, price);
    }

    // Whole part stays in f64 so prices beyond u64 range do not saturate
    let scale = 10f64.powi(max_fraction_digits as i32);
    let scaled = (price.abs() * scale).round();
    let whole = (scaled / scale).trunc();
    let fraction = (scaled - whole * scale).max(0.0) as u64;
    let sign = if price < 0.0 && scaled > 0.0 { "-" } else { "" };

    let mut out = format!(
        "{}{}{}",
        sign,
        prefix,
        group_thousands(&format!("{:.0}", whole))
    );
    if fraction > 0 {
        let digits = format!("{:0width$}", fraction, width = max_fraction_digits as usize);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
