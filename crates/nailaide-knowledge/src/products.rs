//! Retail product catalogue and its chat formatting.

use serde::Serialize;

/// A retail product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub color: Option<&'static str>,
    pub price: &'static str,
    pub description: &'static str,
}

impl Product {
    /// Products flagged as new carry a "New!" marker in their description.
    pub fn is_new(&self) -> bool {
        self.description.to_lowercase().contains("new!")
    }
}

/// A named group of products.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub items: &'static [Product],
}

pub const TRUTH_FREEDOM_ID: &str = "truth-freedom-polish";

pub const NO_PRODUCTS_MESSAGE: &str = "I couldn't find any products matching your query. \
    We offer Truth & Freedom polish collection, Nail Care Essentials, and Advanced Nail Care \
    products. What are you interested in?";

pub static CATEGORIES: &[ProductCategory] = &[
    ProductCategory {
        id: TRUTH_FREEDOM_ID,
        name: "Truth & Freedom Polish Collection",
        description: "Our exclusive nail polish line named after inspirational women throughout history. A portion of all sales goes to our nonprofit, DNNC Steps to Success.",
        items: &[
            Product {
                id: "tf-eleanor",
                name: "Eleanor",
                color: Some("Bold Red"),
                price: "$18",
                description: "A timeless, powerful red named after Eleanor Roosevelt, symbolizing courage and conviction.",
            },
            Product {
                id: "tf-maya",
                name: "Maya",
                color: Some("Deep Purple"),
                price: "$18",
                description: "A rich, inspirational purple shade named after Maya Angelou, representing wisdom and creativity.",
            },
            Product {
                id: "tf-rosa",
                name: "Rosa",
                color: Some("Soft Pink"),
                price: "$18",
                description: "A gentle yet determined pink named after Rosa Parks, symbolizing quiet strength and dignity.",
            },
            Product {
                id: "tf-amelia",
                name: "Amelia",
                color: Some("Sky Blue"),
                price: "$18",
                description: "An adventurous blue named after Amelia Earhart, representing courage to explore new horizons.",
            },
            Product {
                id: "tf-malala",
                name: "Malala",
                color: Some("Vibrant Green"),
                price: "$18",
                description: "New! A fresh, hopeful green named after Malala Yousafzai, representing perseverance and growth.",
            },
        ],
    },
    ProductCategory {
        id: "nail-care-essentials",
        name: "Nail Care Essentials",
        description: "Professional-grade products to maintain healthy, beautiful nails between salon visits.",
        items: &[
            Product {
                id: "nce-cuticle-oil",
                name: "Cuticle Oil Pen",
                color: None,
                price: "$12",
                description: "Nourishing cuticle oil in a convenient pen applicator to hydrate and strengthen nails.",
            },
            Product {
                id: "nce-strengthener",
                name: "Nail Strengthener",
                color: None,
                price: "$16",
                description: "Fortifying treatment that helps prevent splitting and breaking of natural nails.",
            },
            Product {
                id: "nce-hand-cream",
                name: "Hand Cream",
                color: None,
                price: "$15",
                description: "Luxurious hand cream with shea butter and essential oils for soft, hydrated skin.",
            },
            Product {
                id: "nce-file-buffer",
                name: "Professional File & Buffer Set",
                color: None,
                price: "$10",
                description: "New! Our salon-quality nail file and buffer for perfect at-home maintenance.",
            },
        ],
    },
    ProductCategory {
        id: "advanced-care",
        name: "Advanced Nail Care",
        description: "New! Our advanced nail care line for specialized treatments and concerns.",
        items: &[
            Product {
                id: "ac-repair-serum",
                name: "Nail Repair Serum",
                color: None,
                price: "$22",
                description: "Intensive repair treatment for damaged nails with keratin protein and vitamins.",
            },
            Product {
                id: "ac-growth-formula",
                name: "Nail Growth Formula",
                color: None,
                price: "$24",
                description: "Advanced formula to promote stronger, faster nail growth naturally.",
            },
            Product {
                id: "ac-overnight-mask",
                name: "Overnight Nail Mask",
                color: None,
                price: "$20",
                description: "Deeply nourishing overnight treatment to transform dry, brittle nails.",
            },
        ],
    },
];

fn all() -> impl Iterator<Item = (&'static ProductCategory, &'static Product)> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.items.iter().map(move |p| (c, p)))
}

pub fn category(id: &str) -> Option<&'static ProductCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn truth_freedom() -> &'static ProductCategory {
    &CATEGORIES[0]
}

/// Case-insensitive match on product name, description, or category name.
/// Blank queries match nothing.
pub fn search(query: &str) -> Vec<(&'static ProductCategory, &'static Product)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    all()
        .filter(|(c, p)| {
            p.name.to_lowercase().contains(&query)
                || p.description.to_lowercase().contains(&query)
                || c.name.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn new_products() -> Vec<(&'static ProductCategory, &'static Product)> {
    all().filter(|(_, p)| p.is_new()).collect()
}

pub fn find_by_name(name: &str) -> Option<(&'static ProductCategory, &'static Product)> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    all().find(|(_, p)| p.name.to_lowercase() == name)
}

/// Truth & Freedom shades named in `message`, or the whole collection when
/// none is named.
pub fn truth_freedom_matching(message: &str) -> Vec<&'static Product> {
    let lower = message.to_lowercase();
    let items = truth_freedom().items;
    let named: Vec<&Product> = items
        .iter()
        .filter(|p| {
            lower.contains(&p.name.to_lowercase())
                || p.color.is_some_and(|c| lower.contains(&c.to_lowercase()))
        })
        .collect();
    if named.is_empty() {
        items.iter().collect()
    } else {
        named
    }
}

/// Numbered product listing used in chat replies.
pub fn format_products_response<'a, I>(products: I, include_details: bool) -> String
where
    I: IntoIterator<Item = &'a Product>,
{
    let products: Vec<&Product> = products.into_iter().collect();
    if products.is_empty() {
        return NO_PRODUCTS_MESSAGE.to_string();
    }

    let plural = if products.len() > 1 { "s" } else { "" };
    let mut response = format!("I found {} product{} for you:\n\n", products.len(), plural);
    for (index, product) in products.iter().enumerate() {
        response.push_str(&format!("{}. **{}** - {}", index + 1, product.name, product.price));
        if let Some(color) = product.color {
            response.push_str(&format!(" ({})", color));
        }
        response.push('\n');
        if include_details {
            response.push_str(&format!("   {}\n", product.description));
        }
        response.push('\n');
    }
    response.push_str("Would you like to know more about any specific product?");
    response
}
