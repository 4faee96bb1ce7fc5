//! Keeps copyright years current in page markup.

use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone};
use regex::{Captures, Regex};

static YEAR_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<([a-z][a-z0-9]*)\b[^>]*\bclass\s*=\s*["'][^"']*\bcopyright-year\b[^"']*["'][^>]*>"#,
    )
    .expect("valid year element pattern")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)([a-z][a-z0-9]*)\b[^>]*?(/?)>").expect("valid tag pattern")
});

static FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<footer\b[^>]*>.*?</footer>").expect("valid footer pattern")
});

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<p\b[^>]*>)(.*?)(</p>)").expect("valid paragraph pattern")
});

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year pattern"));

const COPYRIGHT_SIGNS: [&str; 3] = ["&copy;", "&#169;", "\u{a9}"];

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Result of rewriting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupUpdate {
    pub html: String,
    /// Number of year occurrences whose text actually changed.
    pub changed: usize,
}

/// Set the whole content of every `.copyright-year` element to `year`, then
/// replace the first four-digit run inside each footer paragraph carrying a
/// copyright sign.
pub fn update_markup(html: &str, year: i32) -> MarkupUpdate {
    let year = year.to_string();
    let mut changed = 0;

    let html = fill_year_elements(html, &year, &mut changed);

    let html = FOOTER.replace_all(&html, |footer: &Captures| {
        PARAGRAPH
            .replace_all(&footer[0], |p: &Captures| {
                let (open, inner, close) = (&p[1], &p[2], &p[3]);
                if !COPYRIGHT_SIGNS.iter().any(|sign| inner.contains(sign)) {
                    return p[0].to_string();
                }
                match FOUR_DIGITS.find(inner) {
                    Some(m) if m.as_str() != year => {
                        changed += 1;
                        format!(
                            "{open}{}{year}{}{close}",
                            &inner[..m.start()],
                            &inner[m.end()..]
                        )
                    }
                    _ => p[0].to_string(),
                }
            })
            .into_owned()
    });

    MarkupUpdate {
        html: html.into_owned(),
        changed,
    }
}

/// Replace the content of each year element, nested markup included.
/// Elements without a closing tag are left alone.
fn fill_year_elements(html: &str, year: &str, changed: &mut usize) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for caps in YEAR_ELEMENT.captures_iter(html) {
        let Some(open) = caps.get(0) else {
            continue;
        };
        // Nested inside an element already rewritten.
        if open.start() < cursor {
            continue;
        }
        let Some(close) = closing_tag(html, open.end(), &caps[1]) else {
            continue;
        };
        if &html[open.end()..close] != year {
            *changed += 1;
        }
        out.push_str(&html[cursor..open.end()]);
        out.push_str(year);
        cursor = close;
    }

    out.push_str(&html[cursor..]);
    out
}

/// Byte offset of the `</name>` that closes an element whose content starts
/// at `from`.
fn closing_tag(html: &str, from: usize, name: &str) -> Option<usize> {
    let mut depth = 1usize;
    for caps in TAG.captures_iter(&html[from..]) {
        if !caps[2].eq_ignore_ascii_case(name) {
            continue;
        }
        let closing = !caps[1].is_empty();
        let self_closing = !caps[3].is_empty();
        if closing {
            depth -= 1;
            if depth == 0 {
                return caps.get(0).map(|m| from + m.start());
            }
        } else if !self_closing {
            depth += 1;
        }
    }
    None
}

/// Time left until midnight on January 1st of the year after `now`.
pub fn until_next_year<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let next = now
        .timezone()
        .with_ymd_and_hms(now.year() + 1, 1, 1, 0, 0, 0)
        .earliest();
    match next {
        Some(next) => next
            .signed_duration_since(now)
            .to_std()
            .unwrap_or_default(),
        // Midnight skipped by a DST jump; check again in an hour.
        None => Duration::from_secs(3600),
    }
}
