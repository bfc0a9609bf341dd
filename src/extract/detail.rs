use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::anchor::locate;
use super::cfemail::decode_cfemail;
use super::classifier::ContactClassifier;
use crate::models::{ContactRecord, DecodeError};

pub const CONTACT_INFO_MARKER: &str = "Contact Information";

/// What the obfuscation step leaves behind in the plain-text rendering of
/// a hidden email address, once whitespace is stripped.
const EMAIL_PLACEHOLDER: &str = "[emailprotected]";

pub struct DetailExtractor {
    container_selector: Selector,
    paragraph_selector: Selector,
    list_selector: Selector,
    item_selector: Selector,
    link_selector: Selector,
    classifier: ContactClassifier,
}

impl DetailExtractor {
    pub fn new() -> Self {
        Self {
            // Detail pages carry a stable class here, unlike the
            // comment-anchored regions elsewhere on the site.
            container_selector: Selector::parse("div.main-content").unwrap(),
            paragraph_selector: Selector::parse("p").unwrap(),
            list_selector: Selector::parse("ul").unwrap(),
            item_selector: Selector::parse("li").unwrap(),
            link_selector: Selector::parse("a").unwrap(),
            classifier: ContactClassifier::new(),
        }
    }

    /// Pulls the structured contact block out of a detail page: the
    /// address from the block's first paragraph, then every list item as
    /// a classification token. Returns None when any required piece is
    /// missing; partial records are never emitted.
    pub fn extract_contact(&self, detail_page: &Html) -> Option<ContactRecord> {
        let container = detail_page.select(&self.container_selector).next()?;
        let contact_block = locate(CONTACT_INFO_MARKER, *container)?;

        let address = contact_block
            .select(&self.paragraph_selector)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();

        let list = contact_block.select(&self.list_selector).next()?;
        let mut tokens = Vec::new();
        for item in list.select(&self.item_selector) {
            match self.item_token(item) {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => {}
                Err(e) => {
                    warn!("Dropping record with undecodable email: {}", e);
                    return None;
                }
            }
        }

        let contact = self.classifier.classify(&tokens);
        Some(ContactRecord {
            address,
            phones: contact.phones,
            email: contact.email,
            website: contact.website,
        })
    }

    /// One list item becomes one classification token with all whitespace
    /// removed. Items rendered as the email placeholder are replaced by
    /// the decoded `data-cfemail` payload of their anchor.
    fn item_token(&self, item: ElementRef) -> Result<Option<String>, DecodeError> {
        let stripped: String = item
            .text()
            .collect::<String>()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if !stripped.contains(EMAIL_PLACEHOLDER) {
            return Ok(Some(stripped));
        }

        let Some(payload) = item
            .select(&self.link_selector)
            .next()
            .and_then(|a| a.value().attr("data-cfemail"))
        else {
            debug!("Email placeholder without a cf-email payload, skipping item");
            return Ok(None);
        };

        decode_cfemail(payload).map(Some)
    }
}
