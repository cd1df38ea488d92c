//! Member contact harvester.
//!
//! Two crawl units, in order: the phone/address listing (primary — creates
//! entries) and the e-mail listing (secondary — only enriches). The phone
//! listing's name cell may reference a per-member detail page whose profile
//! image URL is captured when reachable; a failed detail fetch just leaves
//! the image unset. The contacts file is persisted after each unit.

use crate::config;
use crate::extract::{extract_rows, format_numbers, Row};
use crate::fetch::{FetchError, PageClient};
use crate::models::{ContactBook, Mp};
use crate::reconcile;
use crate::store;
use crate::utils::title_case;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use std::error::Error;
use tokio::time::sleep;
use tracing::{info, instrument, warn};
use url::Url;

static MEC_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table#mecTable").unwrap());
static PROFILE_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img.profile-image").unwrap());

/// Extracts the relative detail-page path from the name cell's onclick
/// handler, e.g. `redirectDetay('/milletvekili/MilletvekiliDetay?Id=42')`.
static DETAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"redirectDetay\('([^']+)'\)").unwrap());

/// Phone rows: province, name, party, address, telephones cell, faxes cell.
const PHONE_ROW_MIN_COLUMNS: usize = 6;

/// E-mail rows: name at 0, e-mail at 3.
const EMAIL_ROW_MIN_COLUMNS: usize = 4;

/// Run the contacts harvest: phone listing, then e-mail reconciliation.
#[instrument(level = "info", skip_all, fields(contacts_file = %contacts_file))]
pub async fn run(contacts_file: &str) -> Result<(), Box<dyn Error>> {
    let client = PageClient::new()?;
    let mut contacts = store::load_contacts(contacts_file);

    match phone_unit(&client, &mut contacts).await {
        Ok(count) => info!(count, "Phone listing processed"),
        Err(e) => warn!(error = %e, "Phone listing unavailable; skipping unit"),
    }
    store::persist_contacts(&contacts, contacts_file)?;

    match email_unit(&client, &mut contacts).await {
        Ok(matched) => info!(matched, "E-mail listing reconciled"),
        Err(e) => warn!(error = %e, "E-mail listing unavailable; skipping unit"),
    }
    store::persist_contacts(&contacts, contacts_file)?;

    info!(entries = contacts.len(), "Contacts harvest complete");
    Ok(())
}

/// Harvest the phone/address listing and any reachable profile images.
async fn phone_unit(client: &PageClient, contacts: &mut ContactBook) -> Result<usize, FetchError> {
    let doc = client.fetch_and_parse(config::PHONE_URL).await?;
    let table = doc
        .select(&MEC_TABLE)
        .next()
        .ok_or(FetchError::ParseFailure("table#mecTable"))?;

    let rows: Vec<Row> = extract_rows(table, PHONE_ROW_MIN_COLUMNS).collect();
    let total = rows.len();
    let mut processed = 0;

    for (index, row) in rows.iter().enumerate() {
        let Some((raw_name, mut member, detail_path)) = contact_from_row(row) else {
            continue;
        };
        if let Some(path) = detail_path {
            member.image_url = fetch_image_url(client, &path, &member.name).await;
            sleep(config::DETAIL_PAGE_DELAY).await;
        }
        info!(n = index + 1, total, name = %member.name, "Processed member");
        contacts.upsert(raw_name, member);
        processed += 1;
    }
    Ok(processed)
}

/// Harvest the e-mail listing and reconcile it against existing entries.
async fn email_unit(client: &PageClient, contacts: &mut ContactBook) -> Result<usize, FetchError> {
    let doc = client.fetch_and_parse(config::EMAIL_URL).await?;
    let table = doc
        .select(&MEC_TABLE)
        .next()
        .ok_or(FetchError::ParseFailure("table#mecTable"))?;

    let rows = extract_rows(table, EMAIL_ROW_MIN_COLUMNS).map(|row| (row.text(0), row.text(3)));
    Ok(reconcile::apply_secondary_emails(rows, contacts))
}

/// Build a member record from one phone-listing row.
///
/// Returns the raw scraped name (the store key), the record, and the
/// relative detail-page path if the name cell links to one. Rows with an
/// empty name cell yield `None`.
fn contact_from_row(row: &Row<'_>) -> Option<(String, Mp, Option<String>)> {
    let raw_name = row.text(1);
    if raw_name.is_empty() {
        return None;
    }
    let member = Mp {
        name: title_case(&raw_name),
        province: title_case(&row.text(0)),
        party: row.text(2),
        address: row.text(3),
        telephones: format_numbers(row.cells[4], config::MIN_NUMBER_LEN, config::PHONE_PREFIX),
        faxes: format_numbers(row.cells[5], config::MIN_NUMBER_LEN, config::PHONE_PREFIX),
        ..Mp::default()
    };
    let detail_path = row
        .attr(1, "onclick")
        .and_then(|onclick| DETAIL_RE.captures(onclick))
        .map(|captures| captures[1].to_string());
    Some((raw_name, member, detail_path))
}

/// Fetch the profile image URL from a member's detail page.
///
/// Detail pages are secondary: any failure is logged for that member and an
/// empty string comes back, leaving the field unset.
async fn fetch_image_url(client: &PageClient, rel_path: &str, name: &str) -> String {
    let url = match Url::parse(config::BASE_URL).ok().and_then(|base| base.join(rel_path).ok()) {
        Some(url) => url.to_string(),
        None => {
            warn!(name, rel_path, "Unresolvable detail path; leaving image unset");
            return String::new();
        }
    };
    match client.fetch_and_parse(&url).await {
        Ok(doc) => doc
            .select(&PROFILE_IMG)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string)
            .unwrap_or_default(),
        Err(e) => {
            warn!(name, error = %e, "Failed to fetch profile image; leaving unset");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const PHONE_PAGE: &str = r#"<html><body><table id="mecTable"><tbody>
        <tr>
          <td>ANKARA</td>
          <td onclick="redirectDetay('/milletvekili/MilletvekiliDetay?Id=42')">Alı Veli</td>
          <td>Parti X</td>
          <td>Adres</td>
          <td>3121234567<br>3127654321</td>
          <td></td>
        </tr>
        <tr><td>short</td><td>row</td><td>here</td></tr>
        <tr>
          <td>İZMİR</td>
          <td>AYŞE KAYA</td>
          <td>Parti Y</td>
          <td>Baska Adres</td>
          <td></td>
          <td>3120000000</td>
        </tr>
    </tbody></table></body></html>"#;

    fn phone_rows(doc: &Html) -> Vec<Row<'_>> {
        let table = doc.select(&MEC_TABLE).next().unwrap();
        extract_rows(table, PHONE_ROW_MIN_COLUMNS).collect()
    }

    #[test]
    fn test_contact_from_row_full_scenario() {
        let doc = Html::parse_document(PHONE_PAGE);
        let rows = phone_rows(&doc);
        assert_eq!(rows.len(), 2);

        let (raw_name, member, detail_path) = contact_from_row(&rows[0]).unwrap();
        assert_eq!(raw_name, "Alı Veli");
        assert_eq!(member.name, "Alı Veli");
        assert_eq!(member.province, "Ankara");
        assert_eq!(member.party, "Parti X");
        assert_eq!(member.address, "Adres");
        assert_eq!(
            member.telephones,
            vec!["+90 312 3121234567", "+90 312 3127654321"]
        );
        assert!(member.faxes.is_empty());
        assert_eq!(
            detail_path.as_deref(),
            Some("/milletvekili/MilletvekiliDetay?Id=42")
        );
    }

    #[test]
    fn test_contact_from_row_without_detail_link() {
        let doc = Html::parse_document(PHONE_PAGE);
        let rows = phone_rows(&doc);
        let (raw_name, member, detail_path) = contact_from_row(&rows[1]).unwrap();
        assert_eq!(raw_name, "AYŞE KAYA");
        assert_eq!(member.name, "Ayşe Kaya");
        assert!(member.telephones.is_empty());
        assert_eq!(member.faxes, vec!["+90 312 3120000000"]);
        assert!(detail_path.is_none());
    }

    #[test]
    fn test_upserted_rows_key_by_normalized_name() {
        let doc = Html::parse_document(PHONE_PAGE);
        let mut contacts = ContactBook::default();
        for row in phone_rows(&doc) {
            let (raw_name, member, _) = contact_from_row(&row).unwrap();
            contacts.upsert(raw_name, member);
        }
        assert_eq!(contacts.len(), 2);
        // Dotless ı in "Alı Veli" folds to the same key as "Ali Veli".
        let entry = contacts.find_mut_by_normalized_name("aliveli").unwrap();
        assert_eq!(entry.province, "Ankara");
    }

    #[test]
    fn test_detail_regex() {
        let captures = DETAIL_RE
            .captures("redirectDetay('/milletvekili/MilletvekiliDetay?Id=7')")
            .unwrap();
        assert_eq!(&captures[1], "/milletvekili/MilletvekiliDetay?Id=7");
        assert!(DETAIL_RE.captures("somethingElse()").is_none());
    }
}
