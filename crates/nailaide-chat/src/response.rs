//! Reply generation.
//!
//! Turns a classified message into reply text, consulting the knowledge
//! store and FAQ matcher where the intent calls for facts and falling back
//! to a randomly chosen template otherwise.

use std::sync::{Arc, LazyLock};

use chrono::Weekday;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::debug;

use nailaide_core::Intent;
use nailaide_knowledge::initiatives::{self, ADVANCED_PEDICURES, STEPS_TO_SUCCESS, VISION_2025};
use nailaide_knowledge::products;
use nailaide_knowledge::store::weekday_name;
use nailaide_knowledge::{
    format_initiative_response, format_products_response, KnowledgeStore, Service,
    ServiceCategory, SitePage, SiteNavigator,
};

use crate::context::ContextTracker;
use crate::faq::FaqMatcher;
use crate::templates::{templates_for, FALLBACK_RESPONSE};
use crate::types::{ChatReply, ReplyAction};

// Keyword to the menu searched for a service whose name contains it.
static SERVICE_KEYWORDS: &[(&str, ServiceCategory)] = &[
    ("manicure", ServiceCategory::NailCare),
    ("pedicure", ServiceCategory::NailCare),
    ("gel", ServiceCategory::NailCare),
    ("polish", ServiceCategory::NailCare),
    ("art", ServiceCategory::NailCare),
    ("facial", ServiceCategory::MediSpa),
    ("wellness", ServiceCategory::MediSpa),
];

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)s?\b")
        .expect("Invalid weekday regex")
});

/// Builds replies for classified messages.
pub struct ResponseGenerator {
    knowledge: Arc<KnowledgeStore>,
    faq: FaqMatcher,
    navigator: SiteNavigator,
    rng: StdRng,
}

impl ResponseGenerator {
    /// `rng_seed` fixes template selection; `None` seeds from the OS.
    pub fn new(knowledge: Arc<KnowledgeStore>, navigator: SiteNavigator, rng_seed: Option<u64>) -> Self {
        let faq = FaqMatcher::new(knowledge.faqs().to_vec());
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            knowledge,
            faq,
            navigator,
            rng,
        }
    }

    pub fn with_faq_matcher(mut self, faq: FaqMatcher) -> Self {
        self.faq = faq;
        self
    }

    pub fn faq(&self) -> &FaqMatcher {
        &self.faq
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Reply text only.
    pub fn generate_response(
        &mut self,
        intent: Intent,
        message: &str,
        context: &mut ContextTracker,
    ) -> String {
        self.generate_reply(intent, message, context).text
    }

    /// Reply text plus the action the widget should offer, if any. The
    /// exchange is recorded on `context`.
    pub fn generate_reply(
        &mut self,
        intent: Intent,
        message: &str,
        context: &mut ContextTracker,
    ) -> ChatReply {
        let reply = self.compose(intent, message);
        context.record_exchange(intent, message, &reply.text);
        reply
    }

    /// Build the reply without touching any conversation state.
    ///
    /// The reply is unanswered when nothing matched: an `Unknown` message,
    /// or an information request with no FAQ entry or page to point at.
    pub fn compose(&mut self, intent: Intent, message: &str) -> ChatReply {
        let lower = message.to_lowercase();
        let mut action = None;
        let mut answered = true;

        let text = match intent {
            Intent::Booking => {
                let url = self.knowledge.booking_url().to_string();
                let text = format!(
                    "{} <a href='{}' target='_blank' class='booking-link'>Book Now</a>",
                    self.filled_template(Intent::Booking),
                    url
                );
                action = Some(ReplyAction::Book { url });
                text
            }
            Intent::ServiceInquiry => match self.find_service(&lower) {
                Some(service) => format_service(service),
                None => {
                    action = Some(self.navigate(SitePage::Services));
                    format!(
                        "{} {}",
                        self.pick(Intent::ServiceInquiry),
                        self.navigator.link(SitePage::Services)
                    )
                }
            },
            Intent::Pricing => {
                action = Some(self.navigate(SitePage::Services));
                format!(
                    "{} {}",
                    self.pick(Intent::Pricing),
                    self.navigator.link(SitePage::Services)
                )
            }
            Intent::Hours => match named_weekday(message) {
                Some(day) => self.hours_reply(day),
                None => self.pick(Intent::Hours).to_string(),
            },
            Intent::Location => self.filled_template(Intent::Location),
            Intent::Navigation => match self.navigator.suggestion(intent, message) {
                Some(suggestion) => {
                    action = Some(self.navigate(suggestion.page));
                    format!("{} {}", suggestion.message, self.navigator.link(suggestion.page))
                }
                None => self.pick(Intent::Navigation).to_string(),
            },
            Intent::FindInformation => {
                let answer = self.faq.process_question(message);
                if let Some(direct) = answer.direct_answer {
                    debug!(confidence = answer.confidence, "Answered from FAQ");
                    direct
                } else if let Some(suggestion) = self.navigator.suggestion(intent, message) {
                    action = Some(self.navigate(suggestion.page));
                    format!("{} {}", suggestion.message, self.navigator.link(suggestion.page))
                } else {
                    answered = false;
                    self.pick(Intent::FindInformation).to_string()
                }
            }
            Intent::ProductInquiry => {
                if lower.contains("new") && lower.contains("product") {
                    format_products_response(
                        self.knowledge.new_products().into_iter().map(|(_, p)| p),
                        true,
                    )
                } else if lower.contains("truth") || lower.contains("freedom") {
                    format_products_response(products::truth_freedom_matching(message), true)
                } else {
                    self.pick(Intent::ProductInquiry).to_string()
                }
            }
            Intent::DnncInquiry => {
                if lower.contains("steps to success") {
                    format_initiative_response(initiatives::find(STEPS_TO_SUCCESS))
                } else if lower.contains("vision 2025") {
                    format_initiative_response(initiatives::find(VISION_2025))
                } else {
                    self.pick(Intent::DnncInquiry).to_string()
                }
            }
            Intent::AdvancedPedicure => {
                if ["diabetic", "therapeutic", "athlet"]
                    .iter()
                    .any(|k| lower.contains(k))
                {
                    format_initiative_response(initiatives::find(ADVANCED_PEDICURES))
                } else {
                    self.pick(Intent::AdvancedPedicure).to_string()
                }
            }
            Intent::Unknown => {
                answered = false;
                self.pick(intent).to_string()
            }
            Intent::Greeting | Intent::Farewell | Intent::Help => self.pick(intent).to_string(),
        };

        ChatReply {
            text,
            intent,
            answered,
            action,
        }
    }

    // ---- Helpers ----

    fn pick(&mut self, intent: Intent) -> &'static str {
        let templates = templates_for(intent);
        if templates.is_empty() {
            return FALLBACK_RESPONSE;
        }
        templates[self.rng.random_range(0..templates.len())]
    }

    /// A template with contact placeholders replaced.
    fn filled_template(&mut self, intent: Intent) -> String {
        let template = self.pick(intent);
        let contact = self.knowledge.contact_info();
        template
            .replacen("{phone}", &contact.phone, 1)
            .replacen("{address}", &contact.address, 1)
            .replacen("{email}", &contact.email, 1)
    }

    fn navigate(&self, page: SitePage) -> ReplyAction {
        ReplyAction::Navigate {
            page,
            url: self.navigator.url_for(page),
        }
    }

    /// First service whose name contains a keyword present in the message,
    /// keywords tried in `SERVICE_KEYWORDS` order.
    fn find_service(&self, lower: &str) -> Option<&'static Service> {
        SERVICE_KEYWORDS.iter().find_map(|(keyword, category)| {
            if !lower.contains(keyword) {
                return None;
            }
            self.knowledge
                .find_services(*category, keyword)
                .into_iter()
                .next()
        })
    }

    fn hours_reply(&self, day: Weekday) -> String {
        let hours = self.knowledge.hours_for_weekday(day);
        if hours.eq_ignore_ascii_case("closed") {
            format!("We're closed on {}s.", weekday_name(day))
        } else {
            format!("On {}s we're open {}.", weekday_name(day), hours)
        }
    }
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("faq_entries", &self.faq.entries().len())
            .finish()
    }
}

fn format_service(service: &Service) -> String {
    format!(
        "Our {} is {} and takes about {}. {} Would you like to book this service?",
        service.name, service.price, service.duration, service.description
    )
}

fn named_weekday(message: &str) -> Option<Weekday> {
    WEEKDAY_RE
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nailaide_core::config::{BusinessConfig, ChatConfig};
    use nailaide_storage::MemoryStore;

    fn generator() -> ResponseGenerator {
        ResponseGenerator::new(Arc::new(KnowledgeStore::new()), SiteNavigator::default(), Some(42))
    }

    fn tracker() -> ContextTracker {
        ContextTracker::start(Arc::new(MemoryStore::new()), &ChatConfig::default())
    }

    fn reply(intent: Intent, message: &str) -> ChatReply {
        generator().generate_reply(intent, message, &mut tracker())
    }

    // ---- Templates ----

    #[test]
    fn test_greeting_is_a_template_verbatim() {
        let r = reply(Intent::Greeting, "Hello");
        assert!(templates_for(Intent::Greeting).contains(&r.text.as_str()));
        assert!(r.action.is_none());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = generator();
        let mut b = generator();
        let (mut ta, mut tb) = (tracker(), tracker());
        for _ in 0..5 {
            assert_eq!(
                a.generate_response(Intent::Unknown, "??", &mut ta),
                b.generate_response(Intent::Unknown, "??", &mut tb)
            );
        }
    }

    // ---- Booking ----

    #[test]
    fn test_booking_link_and_action() {
        let r = reply(Intent::Booking, "I want to book a pedicure");
        assert!(r.text.ends_with(
            " <a href='https://delanesnaturalnailcare.booksy.com/' target='_blank' class='booking-link'>Book Now</a>"
        ));
        assert!(!r.text.contains("{phone}"));
        assert_eq!(
            r.action,
            Some(ReplyAction::Book {
                url: "https://delanesnaturalnailcare.booksy.com/".to_string()
            })
        );
    }

    #[test]
    fn test_booking_uses_configured_url() {
        let business = BusinessConfig {
            booking_url: Some("https://book.example.com/salon".to_string()),
            ..Default::default()
        };
        let knowledge = Arc::new(KnowledgeStore::new().with_business(&business));
        let mut gen = ResponseGenerator::new(knowledge, SiteNavigator::default(), Some(1));
        let text = gen.generate_response(Intent::Booking, "book me", &mut tracker());
        assert!(text.contains("<a href='https://book.example.com/salon'"));
    }

    // ---- Services and pricing ----

    #[test]
    fn test_service_inquiry_keyword_order_beats_name() {
        // "manicure" is checked before "gel", so the first manicure wins.
        let r = reply(Intent::ServiceInquiry, "Tell me about the gel manicure");
        assert!(r.text.starts_with("Our Natural Nail Manicure is $35 and takes about 45 min."));
        assert!(r.text.ends_with("Would you like to book this service?"));

        let r = reply(Intent::ServiceInquiry, "how long does gel take?");
        assert!(r.text.starts_with("Our Gel Manicure is $45 and takes about 60 min."));
    }

    #[test]
    fn test_service_inquiry_keyword_order() {
        let r = reply(Intent::ServiceInquiry, "do you do manicures?");
        assert!(r.text.starts_with("Our Natural Nail Manicure is $35"));

        let r = reply(Intent::ServiceInquiry, "any facials?");
        assert!(r.text.starts_with("Our Facial Treatment is $85 and takes about 60 min."));
    }

    #[test]
    fn test_service_inquiry_without_service_links_menu() {
        let r = reply(Intent::ServiceInquiry, "what services do you have");
        assert!(r.text.ends_with("<a href='/services' class='nav-link'>Services</a>"));
        assert!(matches!(
            r.action,
            Some(ReplyAction::Navigate { page: SitePage::Services, .. })
        ));
    }

    #[test]
    fn test_pricing_links_services() {
        let r = reply(Intent::Pricing, "How much does a gel manicure cost?");
        assert!(r.text.contains("<a href='/services' class='nav-link'>Services</a>"));
    }

    // ---- Hours and location ----

    #[test]
    fn test_hours_for_named_day() {
        let r = reply(Intent::Hours, "Are you open on Saturday?");
        assert_eq!(r.text, "On Saturdays we're open 9:00 AM - 5:00 PM.");
        let r = reply(Intent::Hours, "open sundays?");
        assert_eq!(r.text, "We're closed on Sundays.");
    }

    #[test]
    fn test_hours_template_without_day() {
        let r = reply(Intent::Hours, "when are you open");
        assert!(templates_for(Intent::Hours).contains(&r.text.as_str()));
    }

    #[test]
    fn test_location_fills_address() {
        let r = reply(Intent::Location, "where are you");
        assert!(r.text.contains("123 Spa Lane, Beauty City, USA"));
        assert!(!r.text.contains("{address}"));
    }

    // ---- Navigation and information ----

    #[test]
    fn test_navigation_suggestion() {
        let r = reply(Intent::Navigation, "take me to the gallery page");
        assert_eq!(
            r.text,
            "Sure! Here's our Gallery page. <a href='/gallery' class='nav-link'>Gallery</a>"
        );
        assert!(matches!(
            r.action,
            Some(ReplyAction::Navigate { page: SitePage::Gallery, .. })
        ));
    }

    #[test]
    fn test_navigation_template_when_no_page() {
        let r = reply(Intent::Navigation, "navigate somewhere");
        assert!(templates_for(Intent::Navigation).contains(&r.text.as_str()));
    }

    #[test]
    fn test_find_information_answers_from_faq() {
        let r = reply(Intent::FindInformation, "What is your cancellation policy?");
        assert!(r.text.starts_with("We request at least 24 hours notice for cancellations."));
        assert!(r.answered);
    }

    #[test]
    fn test_find_information_template_fallback() {
        let r = reply(Intent::FindInformation, "zzz?");
        assert!(templates_for(Intent::FindInformation).contains(&r.text.as_str()));
        assert!(!r.answered);
    }

    #[test]
    fn test_unknown_and_templates_answered_flag() {
        assert!(!reply(Intent::Unknown, "so what now").answered);
        assert!(reply(Intent::Greeting, "hello").answered);
        assert!(reply(Intent::Hours, "when are you open").answered);
    }

    #[test]
    fn test_compose_leaves_context_alone() {
        let mut gen = generator();
        let ctx = tracker();
        let r = gen.compose(Intent::Pricing, "what does a pedicure cost");
        assert_eq!(r.intent, Intent::Pricing);
        assert!(ctx.exchanges().is_empty());
        assert_eq!(ctx.last_intent(), None);
    }

    // ---- Products and initiatives ----

    #[test]
    fn test_new_products_listing() {
        let r = reply(Intent::ProductInquiry, "Any new products?");
        assert!(r.text.starts_with("I found 2 products for you:"));
        assert!(r.text.contains("**Malala** - $18 (Vibrant Green)"));
    }

    #[test]
    fn test_truth_freedom_named_shade() {
        let r = reply(Intent::ProductInquiry, "Is the Truth & Freedom Rosa polish nice?");
        assert!(r.text.starts_with("I found 1 product for you:"));
        assert!(r.text.contains("**Rosa** - $18 (Soft Pink)"));
    }

    #[test]
    fn test_dnnc_initiatives() {
        let r = reply(Intent::DnncInquiry, "What is Steps to Success?");
        assert!(r.text.starts_with("**DNNC Steps to Success**"));
        let r = reply(Intent::DnncInquiry, "tell me about vision 2025");
        assert!(r.text.starts_with("**Vision 2025**"));
        let r = reply(Intent::DnncInquiry, "what is dnnc");
        assert!(templates_for(Intent::DnncInquiry).contains(&r.text.as_str()));
    }

    #[test]
    fn test_advanced_pedicure_program() {
        let r = reply(Intent::AdvancedPedicure, "I'm an athlete with sore feet");
        assert!(r.text.starts_with("**Advanced Pedicure Program**"));
        assert!(r.text.contains("Athletic Recovery Pedicure ($80, 90 min)"));
    }

    // ---- Context ----

    #[test]
    fn test_exchange_recorded() {
        let mut gen = generator();
        let mut ctx = tracker();
        let text = gen.generate_response(Intent::Pricing, "what does a pedicure cost", &mut ctx);
        assert_eq!(ctx.last_intent(), Some(Intent::Pricing));
        assert_eq!(ctx.topic(), Some("pricing"));
        assert_eq!(ctx.exchanges().back().unwrap().assistant, text);
    }
}
