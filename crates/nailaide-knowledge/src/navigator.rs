//! Site page map and navigation links for chat replies.

use serde::Serialize;

use nailaide_core::Intent;

/// A page on the salon website.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SitePage {
    Home,
    Services,
    Booking,
    Products,
    About,
    Contact,
    Gallery,
    Faq,
    Initiatives,
}

impl SitePage {
    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::Services => "/services",
            SitePage::Booking => "/booking",
            SitePage::Products => "/shop",
            SitePage::About => "/about",
            SitePage::Contact => "/contact",
            SitePage::Gallery => "/gallery",
            SitePage::Faq => "/faq",
            SitePage::Initiatives => "/steps-to-success",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SitePage::Home => "Home",
            SitePage::Services => "Services",
            SitePage::Booking => "Booking",
            SitePage::Products => "Shop",
            SitePage::About => "About Us",
            SitePage::Contact => "Contact",
            SitePage::Gallery => "Gallery",
            SitePage::Faq => "FAQ",
            SitePage::Initiatives => "Steps to Success",
        }
    }
}

/// A page the user probably wants, with the sentence that introduces the link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationSuggestion {
    pub page: SitePage,
    pub message: String,
}

// Checked in order; the first page with a keyword present wins.
static PAGE_KEYWORDS: &[(SitePage, &[&str])] = &[
    (SitePage::Booking, &["book", "appointment", "schedule", "reserv"]),
    (SitePage::Services, &["service", "treatment", "menu", "price", "pricing"]),
    (SitePage::Products, &["shop", "product", "store", "polish", "buy"]),
    (SitePage::Initiatives, &["steps to success", "nonprofit", "charity", "vision 2025", "dnnc"]),
    (SitePage::Gallery, &["gallery", "photo", "picture", "portfolio", "design"]),
    (SitePage::Faq, &["faq", "question", "policy", "policies"]),
    (SitePage::Contact, &["contact", "phone", "email", "address", "location", "direction"]),
    (SitePage::About, &["about", "story", "team", "mission", "who we are"]),
    (SitePage::Home, &["home", "main page", "start"]),
];

/// Maps messages to site pages and renders page links.
#[derive(Debug, Clone)]
pub struct SiteNavigator {
    base_url: String,
}

impl Default for SiteNavigator {
    fn default() -> Self {
        Self::new("")
    }
}

impl SiteNavigator {
    /// `base_url` is prefixed to every page path. Empty keeps links relative.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, page: SitePage) -> String {
        format!("{}{}", self.base_url, page.path())
    }

    /// Anchor tag for `page`.
    pub fn link(&self, page: SitePage) -> String {
        format!(
            "<a href='{}' class='nav-link'>{}</a>",
            self.url_for(page),
            page.label()
        )
    }

    /// Suggest a page for `message`, or `None` if nothing in it names one.
    pub fn suggestion(&self, intent: Intent, message: &str) -> Option<NavigationSuggestion> {
        let lower = message.to_lowercase();
        let page = PAGE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(page, _)| *page)?;

        let message = match intent {
            Intent::Navigation => format!("Sure! Here's our {} page.", page.label()),
            _ => format!(
                "You can find more details on our {} page.",
                page.label()
            ),
        };
        Some(NavigationSuggestion { page, message })
    }
}
