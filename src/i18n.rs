use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Content locale requested from the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Bn,
}

impl Locale {
    /// `bn` selects Bengali content, anything else English.
    pub fn from_lang(lang: &str) -> Self {
        if lang == "bn" {
            Locale::Bn
        } else {
            Locale::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Bn => "bn",
        }
    }
}

/// User-facing strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub home: &'static str,
    pub share: &'static str,
    pub related_strong: &'static str,
    pub related_rest: &'static str,
    pub most_viewed: &'static str,
    pub popular_news: &'static str,
    pub not_found: &'static str,
    pub not_found_desc: &'static str,
    pub go_home: &'static str,
    pub update_time: &'static str,
    pub category_fallback: &'static str,
    pub author_fallback: &'static str,
    pub fans: &'static str,
    pub followers: &'static str,
    pub subscribers: &'static str,
    pub trending_strong: &'static str,
    pub trending_rest: &'static str,
    pub view_all: &'static str,
    pub untitled: &'static str,
}

const EN: Strings = Strings {
    home: "Home",
    share: "Share:",
    related_strong: "Related",
    related_rest: "News",
    most_viewed: "Most Viewed",
    popular_news: "Popular News",
    not_found: "Article Not Found",
    not_found_desc: "The article you are looking for does not exist.",
    go_home: "Go Back Home",
    update_time: "Updated:",
    category_fallback: "Category",
    author_fallback: "Editor",
    fans: "Fans",
    followers: "Followers",
    subscribers: "Subscribers",
    trending_strong: "Trending",
    trending_rest: "topics",
    view_all: "View all categories",
    untitled: "Untitled",
};

const BN: Strings = Strings {
    home: "প্রথম পাতা",
    share: "শেয়ার করুন:",
    related_strong: "সম্পর্কিত",
    related_rest: "সংবাদ",
    most_viewed: "সর্বাধিক পঠিত",
    popular_news: "জনপ্রিয় খবর",
    not_found: "নিবন্ধ পাওয়া যায়নি",
    not_found_desc: "আপনি যে নিবন্ধটি খুঁজছেন তা বিদ্যমান নেই।",
    go_home: "প্রথম পাতায় যান",
    update_time: "আপডেট এর সময় :",
    category_fallback: "ক্যাটাগরি",
    author_fallback: "সম্পাদক",
    fans: "ফ্যানস",
    followers: "ফলোয়ারস",
    subscribers: "সাবস্ক্রাইবারস",
    trending_strong: "ট্রেন্ডিং",
    trending_rest: "টপিকস",
    view_all: "সব ক্যাটাগরি দেখুন",
    untitled: "Untitled",
};

impl Strings {
    /// Unrecognized language codes get the Bengali table.
    pub fn for_lang(lang: &str) -> &'static Strings {
        match lang {
            "en" => &EN,
            _ => &BN,
        }
    }
}

const BN_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const BN_MONTHS: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

/// Replace ASCII digits with Bengali ones when `lang` is `bn`.
pub fn translate_number(text: &str, lang: &str) -> String {
    if lang != "bn" {
        return text.to_string();
    }
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => BN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Thousands grouping with commas: 1234567 -> "1,234,567".
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Long-form date label, e.g. "January 5, 2025" or "৫ জানুয়ারি, ২০২৫".
pub fn format_date(date: &DateTime<Utc>, locale: Locale) -> String {
    let month = date.month0() as usize;
    match locale {
        Locale::En => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
        Locale::Bn => translate_number(
            &format!("{} {}, {}", date.day(), BN_MONTHS[month], date.year()),
            "bn",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn content_locale_defaults_to_english() {
        assert_eq!(Locale::from_lang("bn"), Locale::Bn);
        assert_eq!(Locale::from_lang("en"), Locale::En);
        assert_eq!(Locale::from_lang("fr"), Locale::En);
        assert_eq!(Locale::from_lang(""), Locale::En);
    }

    #[test]
    fn string_table_defaults_to_bengali() {
        assert_eq!(Strings::for_lang("en").not_found, "Article Not Found");
        assert_eq!(Strings::for_lang("bn").author_fallback, "সম্পাদক");
        assert_eq!(Strings::for_lang("fr"), Strings::for_lang("bn"));
    }

    #[test]
    fn digits_are_translated_only_for_bengali() {
        assert_eq!(translate_number("12,345", "bn"), "১২,৩৪৫");
        assert_eq!(translate_number("12,345", "en"), "12,345");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn dates_are_formatted_per_locale() {
        let date = Utc.with_ymd_and_hms(2025, 1, 5, 8, 30, 0).unwrap();
        assert_eq!(format_date(&date, Locale::En), "January 5, 2025");
        assert_eq!(format_date(&date, Locale::Bn), "৫ জানুয়ারি, ২০২৫");
    }
}
