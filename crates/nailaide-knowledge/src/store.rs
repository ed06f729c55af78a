//! The knowledge store: business facts consulted while building replies.

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use nailaide_core::config::BusinessConfig;

use crate::initiatives::{self, Initiative};
use crate::products::{self, Product, ProductCategory};

// =============================================================================
// Records
// =============================================================================

/// Which service menu a service belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    NailCare,
    MediSpa,
}

/// A bookable salon service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub category: ServiceCategory,
}

/// A stored question/answer pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// How to reach the salon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub booking_url: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "(123) 456-7890".to_string(),
            email: "info@delanesnailcare.com".to_string(),
            address: "123 Spa Lane, Beauty City, USA".to_string(),
            website: "www.delanesnaturalnailcare.com".to_string(),
            booking_url: "https://delanesnaturalnailcare.booksy.com/".to_string(),
        }
    }
}

// =============================================================================
// Static tables
// =============================================================================

pub const BUSINESS_NAME: &str = "Delane's Natural Nail Care & Medi Spa";

pub const BUSINESS_ABOUT: &str = "Delane's Natural Nail Care & Medi Spa is dedicated to providing \
    high-quality, health-focused nail care in a clean, relaxing environment. We prioritize natural \
    nail health and personal attention.";

static SERVICES: &[Service] = &[
    Service {
        name: "Natural Nail Manicure",
        price: "$35",
        duration: "45 min",
        description: "Our signature manicure focuses on natural nail health with gentle cuticle care, precise shaping, and your choice of polish. Includes a relaxing hand massage.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Gel Manicure",
        price: "$45",
        duration: "60 min",
        description: "Long-lasting, chip-free gel polish applied to your natural nails with meticulous care. Includes cuticle work, shaping, and hand massage.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Spa Pedicure",
        price: "$50",
        duration: "50 min",
        description: "Rejuvenate tired feet with our spa pedicure including a soothing soak, exfoliation, callus care, and relaxing foot massage.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Deluxe Pedicure",
        price: "$65",
        duration: "75 min",
        description: "Our premium pedicure experience with extended massage, paraffin treatment, and specialized products for ultimate relaxation and foot renewal.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Polish Change",
        price: "$20",
        duration: "20 min",
        description: "Quick polish change for hands or feet with your choice of color from our salon collection.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Nail Art",
        price: "From $5 per nail",
        duration: "Varies",
        description: "Custom nail art designs from simple accents to elaborate creations. Price varies based on complexity.",
        category: ServiceCategory::NailCare,
    },
    Service {
        name: "Facial Treatment",
        price: "$85",
        duration: "60 min",
        description: "Personalized facial treatment addressing your specific skin concerns. Includes cleansing, exfoliation, mask, and facial massage.",
        category: ServiceCategory::MediSpa,
    },
    Service {
        name: "Wellness Consultation",
        price: "$60",
        duration: "45 min",
        description: "One-on-one consultation to discuss your wellness goals and create a personalized plan.",
        category: ServiceCategory::MediSpa,
    },
];

static HOURS: &[(Weekday, &str)] = &[
    (Weekday::Mon, "10:00 AM - 6:00 PM"),
    (Weekday::Tue, "10:00 AM - 6:00 PM"),
    (Weekday::Wed, "10:00 AM - 6:00 PM"),
    (Weekday::Thu, "10:00 AM - 6:00 PM"),
    (Weekday::Fri, "10:00 AM - 6:00 PM"),
    (Weekday::Sat, "9:00 AM - 5:00 PM"),
    (Weekday::Sun, "Closed"),
];

static FAQS: &[(&str, &str)] = &[
    (
        "Do you take walk-ins?",
        "Yes, we welcome walk-ins! However, we strongly recommend booking an appointment to ensure availability, especially during weekends and peak hours.",
    ),
    (
        "How far in advance should I book?",
        "For weekday appointments, we recommend booking 2-3 days in advance. For weekends, 1-2 weeks advance booking is suggested, especially for groups or multiple services.",
    ),
    (
        "What health and safety measures do you follow?",
        "We prioritize your health with hospital-grade sterilization of all tools, single-use items when possible, and regular sanitization of all surfaces. Our staff follows strict hygiene protocols and is fully trained in safety procedures.",
    ),
    (
        "Can I purchase a gift card?",
        "Yes! Gift cards are available in any denomination and can be purchased in-store or through our website. They make perfect presents for birthdays, anniversaries, or any special occasion.",
    ),
    (
        "What is your cancellation policy?",
        "We request at least 24 hours notice for cancellations. Late cancellations or no-shows may incur a 50% service fee. We appreciate your understanding as this helps us accommodate other clients.",
    ),
    (
        "Do you offer services for children?",
        "Yes, we offer kid-friendly services for children ages 10 and up, accompanied by an adult. We have special polish options that are appropriate for younger clients.",
    ),
    (
        "What is the Truth & Freedom polish line?",
        "Truth & Freedom is our exclusive nail polish line named after inspirational women throughout history. Each color celebrates female achievement, and a portion of all sales goes to our nonprofit, DNNC Steps to Success, which empowers women through mentorship and career advancement.",
    ),
    (
        "What payment methods do you accept?",
        "We accept all major credit cards, debit cards, cash, and digital payment methods like Apple Pay and Google Pay. Gift cards can also be used as payment for any service or product.",
    ),
    (
        "Do you do natural nails only?",
        "While we specialize in natural nail care, we also offer other nail services including gel polish, dip powder, and nail art. Our focus is always on maintaining nail health regardless of the service you choose.",
    ),
    (
        "How long do appointments typically take?",
        "Service duration varies: basic manicures take about 45 minutes, gel manicures 60 minutes, basic pedicures 50 minutes, and deluxe pedicures 75 minutes. Nail art or additional treatments may require extra time.",
    ),
    (
        "Can I bring my kids?",
        "Children are welcome to accompany you, but we ask that they be supervised at all times to ensure a relaxing environment for all clients. We also offer children's nail services for ages 10 and up.",
    ),
    (
        "Do you offer private parties or group bookings?",
        "Yes! We're happy to accommodate private parties for special occasions like birthdays, bridal parties, or corporate events. Please contact us at least 2-3 weeks in advance to arrange group bookings.",
    ),
];

// =============================================================================
// KnowledgeStore
// =============================================================================

/// Read-only business facts.
///
/// Constructed once at start-up and shared by reference with the response
/// generator. Every lookup returns `Option` or an empty collection on a miss.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    contact: ContactInfo,
    faqs: Vec<FaqEntry>,
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeStore {
    /// Store with the salon's shipped data.
    pub fn new() -> Self {
        Self {
            contact: ContactInfo::default(),
            faqs: FAQS.iter().map(|(q, a)| FaqEntry::new(*q, *a)).collect(),
        }
    }

    /// Apply contact overrides from configuration.
    pub fn with_business(mut self, business: &BusinessConfig) -> Self {
        let overrides = [
            (&business.phone, &mut self.contact.phone),
            (&business.email, &mut self.contact.email),
            (&business.address, &mut self.contact.address),
            (&business.website, &mut self.contact.website),
            (&business.booking_url, &mut self.contact.booking_url),
        ];
        let mut applied = 0;
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v.clone();
                applied += 1;
            }
        }
        debug!(applied, "Applied business contact overrides");
        self
    }

    /// Replace the FAQ corpus.
    pub fn with_faqs(mut self, faqs: Vec<FaqEntry>) -> Self {
        self.faqs = faqs;
        self
    }

    pub fn business_name(&self) -> &'static str {
        BUSINESS_NAME
    }

    pub fn about(&self) -> &'static str {
        BUSINESS_ABOUT
    }

    // ---- Services ----

    pub fn services(&self) -> &'static [Service] {
        SERVICES
    }

    pub fn services_in(&self, category: ServiceCategory) -> impl Iterator<Item = &'static Service> {
        SERVICES.iter().filter(move |s| s.category == category)
    }

    /// Services in `category` whose name contains `keyword` (case-insensitive).
    pub fn find_services(&self, category: ServiceCategory, keyword: &str) -> Vec<&'static Service> {
        let keyword = keyword.to_lowercase();
        self.services_in(category)
            .filter(|s| s.name.to_lowercase().contains(&keyword))
            .collect()
    }

    /// Exact name match first, then the first partial match either way round.
    pub fn service_by_name(&self, name: &str) -> Option<&'static Service> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        SERVICES
            .iter()
            .find(|s| normalize(s.name) == wanted)
            .or_else(|| {
                SERVICES.iter().find(|s| {
                    let key = normalize(s.name);
                    key.contains(&wanted) || wanted.contains(&key)
                })
            })
    }

    // ---- Products ----

    pub fn product_categories(&self) -> &'static [ProductCategory] {
        products::CATEGORIES
    }

    /// Every product with its category, in catalogue order.
    pub fn products(&self) -> impl Iterator<Item = (&'static ProductCategory, &'static Product)> {
        products::CATEGORIES
            .iter()
            .flat_map(|c| c.items.iter().map(move |p| (c, p)))
    }

    pub fn product_by_name(&self, name: &str) -> Option<(&'static ProductCategory, &'static Product)> {
        products::find_by_name(name)
    }

    pub fn new_products(&self) -> Vec<(&'static ProductCategory, &'static Product)> {
        products::new_products()
    }

    pub fn truth_freedom_products(&self) -> &'static [Product] {
        products::truth_freedom().items
    }

    pub fn search_products(&self, query: &str) -> Vec<(&'static ProductCategory, &'static Product)> {
        products::search(query)
    }

    // ---- Hours ----

    pub fn hours(&self) -> &'static [(Weekday, &'static str)] {
        HOURS
    }

    pub fn hours_for_weekday(&self, day: Weekday) -> &'static str {
        HOURS
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, h)| *h)
            .unwrap_or("Closed")
    }

    /// Hours for a day given by name ("saturday", "Sat").
    pub fn hours_for(&self, day: &str) -> Option<&'static str> {
        day.trim()
            .parse::<Weekday>()
            .ok()
            .map(|d| self.hours_for_weekday(d))
    }

    /// One-line summary, e.g. "Monday-Friday 10:00 AM - 6:00 PM; ...".
    pub fn hours_summary(&self) -> String {
        let mut groups: Vec<(Weekday, Weekday, &str)> = Vec::new();
        for (day, hours) in HOURS {
            match groups.last_mut() {
                Some((_, end, h)) if *h == *hours => *end = *day,
                _ => groups.push((*day, *day, hours)),
            }
        }
        groups
            .iter()
            .map(|(start, end, hours)| {
                if start == end {
                    format!("{} {}", weekday_name(*start), hours)
                } else {
                    format!("{}-{} {}", weekday_name(*start), weekday_name(*end), hours)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    // ---- Contact ----

    pub fn contact_info(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn booking_url(&self) -> &str {
        &self.contact.booking_url
    }

    // ---- FAQ ----

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    /// Plain substring search over questions and answers. An empty query
    /// returns every entry.
    pub fn search_faq(&self, query: &str) -> Vec<&FaqEntry> {
        let query = query.trim().to_lowercase();
        self.faqs
            .iter()
            .filter(|f| {
                query.is_empty()
                    || f.question.to_lowercase().contains(&query)
                    || f.answer.to_lowercase().contains(&query)
            })
            .collect()
    }

    // ---- Initiatives ----

    pub fn initiative(&self, id: &str) -> Option<&'static Initiative> {
        initiatives::find(id)
    }

    pub fn search_initiatives(&self, query: &str) -> Vec<&'static Initiative> {
        initiatives::search(query)
    }

    pub fn dnnc_description(&self) -> &'static str {
        initiatives::DNNC_DESCRIPTION
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_services_by_keyword() {
        let kb = KnowledgeStore::new();
        let manicures = kb.find_services(ServiceCategory::NailCare, "manicure");
        assert_eq!(manicures.len(), 2);
        assert_eq!(manicures[0].name, "Natural Nail Manicure");

        let facials = kb.find_services(ServiceCategory::MediSpa, "Facial");
        assert_eq!(facials[0].price, "$85");

        assert!(kb.find_services(ServiceCategory::MediSpa, "manicure").is_empty());
    }

    #[test]
    fn test_service_by_name_exact_and_partial() {
        let kb = KnowledgeStore::new();
        assert_eq!(kb.service_by_name("gel manicure").unwrap().price, "$45");
        assert_eq!(kb.service_by_name("Deluxe").unwrap().name, "Deluxe Pedicure");
        assert!(kb.service_by_name("haircut").is_none());
        assert!(kb.service_by_name("   ").is_none());
    }

    #[test]
    fn test_products_cover_every_category() {
        let store = KnowledgeStore::new();
        assert_eq!(store.products().count(), 12);
        let (category, first) = store.products().next().unwrap();
        assert_eq!(category.id, products::TRUTH_FREEDOM_ID);
        assert_eq!(first.name, "Eleanor");
    }

    #[test]
    fn test_hours_lookup() {
        let kb = KnowledgeStore::new();
        assert_eq!(kb.hours_for("saturday"), Some("9:00 AM - 5:00 PM"));
        assert_eq!(kb.hours_for("Sun"), Some("Closed"));
        assert_eq!(kb.hours_for("someday"), None);
        assert_eq!(kb.hours_for_weekday(Weekday::Wed), "10:00 AM - 6:00 PM");
    }

    #[test]
    fn test_hours_summary_groups_weekdays() {
        let summary = KnowledgeStore::new().hours_summary();
        assert_eq!(
            summary,
            "Monday-Friday 10:00 AM - 6:00 PM; Saturday 9:00 AM - 5:00 PM; Sunday Closed"
        );
    }

    #[test]
    fn test_business_overrides() {
        let business = BusinessConfig {
            booking_url: Some("https://book.example.com".to_string()),
            phone: Some("(555) 111-2222".to_string()),
            ..Default::default()
        };
        let kb = KnowledgeStore::new().with_business(&business);
        assert_eq!(kb.booking_url(), "https://book.example.com");
        assert_eq!(kb.contact_info().phone, "(555) 111-2222");
        // Untouched fields keep shipped values.
        assert_eq!(kb.contact_info().address, "123 Spa Lane, Beauty City, USA");
    }

    #[test]
    fn test_search_faq_substring() {
        let kb = KnowledgeStore::new();
        let hits = kb.search_faq("gift card");
        assert_eq!(hits[0].question, "Can I purchase a gift card?");
        assert_eq!(kb.search_faq("").len(), kb.faqs().len());
        assert!(kb.search_faq("helicopter").is_empty());
    }

    #[test]
    fn test_with_faqs_replaces_corpus() {
        let kb = KnowledgeStore::new().with_faqs(vec![FaqEntry::new("Q?", "A.")]);
        assert_eq!(kb.faqs().len(), 1);
    }
}
