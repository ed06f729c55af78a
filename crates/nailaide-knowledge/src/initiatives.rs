//! Community initiatives run under the DNNC name.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    pub name: &'static str,
    pub description: &'static str,
}

/// A service offered as part of an initiative (the advanced pedicures).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InitiativeService {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Initiative {
    pub id: &'static str,
    pub name: &'static str,
    pub short_description: &'static str,
    pub full_description: &'static str,
    pub mission: Option<&'static str>,
    pub programs: &'static [Program],
    pub services: &'static [InitiativeService],
    pub new_services: &'static [&'static str],
    pub goals: &'static [&'static str],
    pub how_to_support: Option<&'static str>,
    pub impact: Option<&'static str>,
    pub specialist: Option<&'static str>,
    pub booking_info: Option<&'static str>,
}

pub const STEPS_TO_SUCCESS: &str = "steps-to-success";
pub const VISION_2025: &str = "vision-2025";
pub const ADVANCED_PEDICURES: &str = "advanced-pedicures";

pub const DNNC_DESCRIPTION: &str = "DNNC stands for Delane's Natural Nail Care, our salon's full \
    name. Beyond being a nail salon, DNNC encompasses our community initiatives like Steps to \
    Success, our Vision 2025 expansion plan, and our Advanced Pedicure Program. We believe in \
    beauty with purpose and community impact.";

pub const UNKNOWN_INITIATIVE_MESSAGE: &str = "I'm not familiar with that specific initiative. \
    We have DNNC Steps to Success (our nonprofit for women's empowerment), Vision 2025 (our \
    expansion plan), and our Advanced Pedicure Program. Which one would you like to learn about?";

pub static INITIATIVES: &[Initiative] = &[
    Initiative {
        id: STEPS_TO_SUCCESS,
        name: "DNNC Steps to Success",
        short_description: "Our nonprofit initiative empowering women through mentorship and career support.",
        full_description: "DNNC Steps to Success is our nonprofit initiative designed to help women overcome barriers to professional success through mentorship, education, and support.",
        mission: Some("To empower women to achieve financial independence and career fulfillment through targeted support and education."),
        programs: &[
            Program {
                name: "Mentorship Program",
                description: "Connecting women with experienced professionals in their field of interest for one-on-one guidance.",
            },
            Program {
                name: "Career Skills Workshops",
                description: "Regular workshops covering resume building, interview techniques, professional communication, and more.",
            },
            Program {
                name: "Financial Literacy Education",
                description: "Courses designed to build understanding of personal finance, budgeting, and investment basics.",
            },
        ],
        services: &[],
        new_services: &[],
        goals: &[],
        how_to_support: Some("You can support Steps to Success by purchasing our Truth & Freedom polish line, making a direct donation through our website, or volunteering your time and expertise as a mentor."),
        impact: Some("To date, we've helped over 50 women through our mentorship programs and workshops, with 78% reporting significant career advancement within one year."),
        specialist: None,
        booking_info: None,
    },
    Initiative {
        id: VISION_2025,
        name: "Vision 2025",
        short_description: "Our roadmap to expand from natural nail care into a complete wellness and beauty experience.",
        full_description: "In 2025, Delane's Natural Nail Care will expand into a full Medi Spa experience, integrating beauty, health, and wellness into one cohesive experience.",
        mission: None,
        programs: &[],
        services: &[],
        new_services: &[
            "Personalized skin treatments",
            "Holistic wellness consultations",
            "Nutritional guidance",
            "Stress reduction therapies",
        ],
        goals: &[
            "Create an integrated approach to beauty and wellness",
            "Expand our professional team to include licensed healthcare providers",
            "Develop a line of wellness products to complement our beauty offerings",
            "Provide a more comprehensive self-care experience for our clients",
        ],
        how_to_support: None,
        impact: None,
        specialist: None,
        booking_info: None,
    },
    Initiative {
        id: ADVANCED_PEDICURES,
        name: "Advanced Pedicure Program",
        short_description: "Specialized pedicure treatments addressing specific foot health concerns.",
        full_description: "Our Advanced Pedicure Program provides specialized treatments that go beyond aesthetics to address specific foot health concerns.",
        mission: None,
        programs: &[],
        services: &[
            InitiativeService {
                name: "Therapeutic Relief Pedicure",
                description: "Designed for those with chronic foot pain or conditions like plantar fasciitis, incorporating targeted massage and specialized products.",
                price: "$75",
                duration: "75 min",
            },
            InitiativeService {
                name: "Diabetic Foot Care Pedicure",
                description: "A gentle, medical-focused pedicure specifically designed for clients with diabetes, emphasizing safety and careful attention.",
                price: "$70",
                duration: "60 min",
            },
            InitiativeService {
                name: "Athletic Recovery Pedicure",
                description: "Perfect for runners and athletes, this service focuses on muscle recovery, callus management, and nail health for active individuals.",
                price: "$80",
                duration: "90 min",
            },
        ],
        new_services: &[],
        goals: &[],
        how_to_support: None,
        impact: None,
        specialist: Some("These advanced pedicures are performed by our certified Advanced Pedicure Specialists who have additional training in foot health conditions."),
        booking_info: Some("Advanced Pedicures require a brief consultation before your first appointment to ensure we address your specific needs correctly."),
    },
];

/// Look up by id. Spaces are accepted in place of dashes ("Vision 2025").
pub fn find(id: &str) -> Option<&'static Initiative> {
    let key = id
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    INITIATIVES.iter().find(|i| i.id == key)
}

pub fn search(query: &str) -> Vec<&'static Initiative> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    INITIATIVES
        .iter()
        .filter(|i| {
            i.name.to_lowercase().contains(&query)
                || i.short_description.to_lowercase().contains(&query)
                || i.full_description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Markdown-ish summary of an initiative. `None` yields the list of known
/// initiatives.
pub fn format_initiative_response(initiative: Option<&Initiative>) -> String {
    let Some(initiative) = initiative else {
        return UNKNOWN_INITIATIVE_MESSAGE.to_string();
    };

    let mut response = format!("**{}**\n\n{}\n\n", initiative.name, initiative.full_description);

    if let Some(mission) = initiative.mission {
        response.push_str(&format!("**Mission:** {}\n\n", mission));
    }
    if !initiative.programs.is_empty() {
        response.push_str("**Programs:**\n");
        for program in initiative.programs {
            response.push_str(&format!("- {}: {}\n", program.name, program.description));
        }
        response.push('\n');
    }
    if !initiative.services.is_empty() {
        response.push_str("**Services:**\n");
        for service in initiative.services {
            response.push_str(&format!(
                "- {} ({}, {}): {}\n",
                service.name, service.price, service.duration, service.description
            ));
        }
        response.push('\n');
    }
    if let Some(support) = initiative.how_to_support {
        response.push_str(&format!("**How to Support:** {}\n\n", support));
    }
    if let Some(booking) = initiative.booking_info {
        response.push_str(&format!("**Booking Information:** {}\n\n", booking));
    }

    response.truncate(response.trim_end().len());
    response
}
