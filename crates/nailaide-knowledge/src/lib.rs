//! Static business knowledge for the NailAide assistant.
//!
//! Read-only tables of services, products, opening hours, contact details,
//! FAQs, and community initiatives, plus the site navigation map used to
//! build links in replies.

pub mod initiatives;
pub mod navigator;
pub mod products;
pub mod store;

pub use initiatives::{format_initiative_response, Initiative, InitiativeService, Program};
pub use navigator::{NavigationSuggestion, SitePage, SiteNavigator};
pub use products::{format_products_response, Product, ProductCategory};
pub use store::{ContactInfo, FaqEntry, KnowledgeStore, Service, ServiceCategory};
