//! Small shared helpers with no dependencies on the rest of the crate.

/// Resolve a product image path against the media base location.
/// Absolute URLs pass through untouched.
pub fn media_url(base: &str, image_path: &str) -> String {
    if image_path.starts_with("http://") || image_path.starts_with("https://") {
        return image_path.to_string();
    }
    if image_path.is_empty() {
        return String::new();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        image_path.trim_start_matches('/')
    )
}

/// Format a unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC) without pulling in
/// a date crate. Used by the log timer.
pub fn ts_to_date(ts: Option<i64>) -> String {
    let t = match ts {
        Some(v) => v,
        None => return String::new(),
    };
    if t < 0 {
        return t.to_string();
    }

    let mut days = t / 86_400;
    let mut sod = t % 86_400; // 0..86399
    if sod < 0 {
        sod += 86_400;
        days -= 1;
    }

    let hour = (sod / 3600) as u32;
    sod %= 3600;
    let minute = (sod / 60) as u32;
    let second = (sod % 60) as u32;

    // Walk years then months from the 1970-01-01 epoch.
    let mut year: i32 = 1970;
    loop {
        let diy: i64 = if is_leap(year) { 366 } else { 365 };
        if days >= diy {
            days -= diy;
            year += 1;
        } else {
            break;
        }
    }
    let leap = is_leap(year);
    let mut month: u32 = 1;
    let mdays = [
        31,
        if leap { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    for &len in &mdays {
        if days >= i64::from(len) {
            days -= i64::from(len);
            month += 1;
        } else {
            break;
        }
    }
    let day = (days + 1) as u32;

    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}

fn is_leap(y: i32) -> bool {
    (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Media URL joining handles slashes and absolute URLs.
    ///
    /// - Input: Base with/without trailing slash, relative and absolute paths
    /// - Output: Single-slash joins; absolute URLs untouched; empty stays empty
    fn media_url_joins_and_passes_through() {
        assert_eq!(
            media_url("http://localhost:5001", "/images/mug.jpg"),
            "http://localhost:5001/images/mug.jpg"
        );
        assert_eq!(
            media_url("http://cdn.example/", "images/mug.jpg"),
            "http://cdn.example/images/mug.jpg"
        );
        assert_eq!(
            media_url("http://cdn.example", "https://other/x.png"),
            "https://other/x.png"
        );
        assert_eq!(media_url("http://cdn.example", ""), "");
    }

    #[test]
    /// What: Timestamp formatting covers epoch, leap years, and None.
    ///
    /// - Input: 0, a known leap-day instant, None
    /// - Output: Exact formatted strings; None yields ""
    fn ts_to_date_known_values() {
        assert_eq!(ts_to_date(Some(0)), "1970-01-01 00:00:00");
        // 2024-02-29 12:00:00 UTC
        assert_eq!(ts_to_date(Some(1_709_208_000)), "2024-02-29 12:00:00");
        assert_eq!(ts_to_date(None), "");
        assert_eq!(ts_to_date(Some(-5)), "-5");
    }
}
