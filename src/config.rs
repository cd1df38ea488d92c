//! Site configuration for the TBMM scrape pipelines.
//!
//! Every load-bearing constant lives here: URL templates, the crawl-unit
//! list, request headers and timeouts, and the pacing delays. The pacing
//! values are a hard requirement of the site's abuse defenses, not tuning
//! knobs — do not shorten them.

use std::time::Duration;

/// Base URL all relative links are resolved against.
pub const BASE_URL: &str = "https://www.tbmm.gov.tr";

/// Phone/address/image listing (primary source for the contacts pipeline).
pub const PHONE_URL: &str = "https://www.tbmm.gov.tr/milletvekili/telefon-liste";

/// E-mail listing (secondary source; enriches existing entries only).
pub const EMAIL_URL: &str = "https://www.tbmm.gov.tr/milletvekili/eposta-liste";

/// Legislative periods to harvest, as (Dönem, Yasama Yılı) pairs.
///
/// Processed strictly in this order; each pair is one crawl unit, and the
/// dataset is persisted after each one completes.
pub const PERIODS: &[(u32, u32)] = &[
    (27, 1),
    (27, 2),
    (27, 3),
    (27, 4),
    (27, 5),
    (27, 6),
    (28, 1),
    (28, 2),
    (28, 3),
    (28, 4),
];

/// Master transcript list for one legislative period.
pub fn period_url(donem: u32, yasama_yili: u32) -> String {
    format!("{BASE_URL}/Tutanaklar/DoneminTutanakMetinleri?Donem={donem}&YasamaYili={yasama_yili}")
}

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after each voting-page fetch within a period.
pub const VOTE_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Pause after each per-member detail-page fetch.
pub const DETAIL_PAGE_DELAY: Duration = Duration::from_millis(200);

/// Dialing prefix applied to every phone/fax fragment kept from a cell.
pub const PHONE_PREFIX: &str = "+90 312 ";

/// Minimum trimmed length for a cell fragment to count as a number.
/// Filters out stray separators and punctuation between the real entries.
pub const MIN_NUMBER_LEN: usize = 7;

/// Default output path for the votes dataset.
pub const DATA_FILE: &str = "data.json";

/// Default output path for the contacts file.
pub const CONTACTS_FILE: &str = "contacts.json";
