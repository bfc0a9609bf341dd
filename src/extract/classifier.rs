use regex::Regex;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedContact {
    pub phones: Vec<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

pub struct ContactClassifier {
    phone_regex: Regex,
    email_regex: Regex,
    website_regex: Regex,
}

impl ContactClassifier {
    pub fn new() -> Self {
        Self {
            phone_regex: Regex::new(r"^\d{9,15}$").unwrap(),
            email_regex: Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap(),
            website_regex: Regex::new(r"^https?://").unwrap(),
        }
    }

    /// Sorts a bag of contact-block tokens into typed fields. Rules run
    /// in a fixed order and a token lands in at most one bucket; tokens
    /// matching nothing are noise and dropped. When several tokens look
    /// like an email or a website the last one wins — the source site
    /// only ever emits one of each, and the behavior is kept as-is for
    /// compatibility with the pages it was built against.
    pub fn classify(&self, tokens: &[String]) -> ClassifiedContact {
        let mut contact = ClassifiedContact::default();

        for token in tokens {
            let token = token.trim();

            if self.phone_regex.is_match(token) {
                contact.phones.push(token.to_string());
            } else if self.email_regex.is_match(token) {
                contact.email = Some(token.to_string());
            } else if self.website_regex.is_match(token) {
                contact.website = Some(token.to_string());
            }
        }

        contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn phone_lengths_nine_through_fifteen_inclusive() {
        let classifier = ContactClassifier::new();

        let result = classifier.classify(&tokens(&[
            "12345678",         // 8: too short
            "123456789",        // 9: lower bound
            "123456789012345",  // 15: upper bound
            "1234567890123456", // 16: too long
        ]));

        assert_eq!(
            result.phones,
            vec!["123456789".to_string(), "123456789012345".to_string()]
        );
        assert_eq!(result.email, None);
        assert_eq!(result.website, None);
    }

    #[test]
    fn phones_keep_encounter_order_and_duplicates() {
        let classifier = ContactClassifier::new();
        let result =
            classifier.classify(&tokens(&["5551234567", "5559876543", "5551234567"]));
        assert_eq!(result.phones, vec!["5551234567", "5559876543", "5551234567"]);
    }

    #[test]
    fn recognizes_each_category() {
        let classifier = ContactClassifier::new();
        let result = classifier.classify(&tokens(&[
            "5551234567",
            "ventas@example.com",
            "https://example.com",
            "CalleFalsa123", // noise, dropped
        ]));

        assert_eq!(result.phones, vec!["5551234567"]);
        assert_eq!(result.email.as_deref(), Some("ventas@example.com"));
        assert_eq!(result.website.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn http_scheme_also_counts_as_website() {
        let classifier = ContactClassifier::new();
        let result = classifier.classify(&tokens(&["http://example.com"]));
        assert_eq!(result.website.as_deref(), Some("http://example.com"));
    }

    // Documented edge case: duplicate email/website tokens resolve to the
    // last occurrence, not the first.
    #[test]
    fn last_email_and_website_win() {
        let classifier = ContactClassifier::new();
        let result = classifier.classify(&tokens(&[
            "first@example.com",
            "https://first.example.com",
            "second@example.com",
            "https://second.example.com",
        ]));

        assert_eq!(result.email.as_deref(), Some("second@example.com"));
        assert_eq!(result.website.as_deref(), Some("https://second.example.com"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_matching() {
        let classifier = ContactClassifier::new();
        let result = classifier.classify(&tokens(&["  5551234567  "]));
        assert_eq!(result.phones, vec!["5551234567"]);
    }

    #[test]
    fn classification_is_deterministic_and_idempotent() {
        let classifier = ContactClassifier::new();
        let input = tokens(&[
            "5551234567",
            "a@b.co",
            "https://example.com",
            "noise",
            "123456789",
        ]);

        let first = classifier.classify(&input);
        let second = classifier.classify(&input);
        assert_eq!(first, second);
    }
}
