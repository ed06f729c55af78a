//! Canned reply templates, three per intent.
//!
//! `{phone}`, `{address}`, and `{email}` placeholders are filled from the
//! knowledge store's contact details.

use nailaide_core::Intent;

/// Used when an intent has no templates.
pub const FALLBACK_RESPONSE: &str = "I'm here to help with Delane's Natural Nail Care services.";

static GREETING: &[&str] = &[
    "Hello! Welcome to Delane's Natural Nail Care. How can I help you today?",
    "Hi there! I'm NailAide, the virtual assistant for Delane's. What can I do for you?",
    "Welcome! I'm here to help with any questions about our nail care services. What would you like to know?",
];

static BOOKING: &[&str] = &[
    "I'd be happy to help you book an appointment! You can schedule directly through our online booking system.",
    "Great! We'd love to book you in. You can make an appointment online or call us at {phone}.",
    "Booking an appointment is easy! Simply visit our appointments page or give us a call.",
];

static SERVICE_INQUIRY: &[&str] = &[
    "We offer a variety of nail care services including manicures, pedicures, and more. What specific service are you interested in?",
    "Delane's offers many natural nail care services. Is there a particular treatment you'd like to learn more about?",
    "Our services range from basic manicures to deluxe spa pedicures. Which service would you like details about?",
];

static PRICING: &[&str] = &[
    "Our pricing varies depending on the service. Natural manicures start at $35, and pedicures at $50. What service are you interested in?",
    "I'd be happy to provide pricing information. Could you let me know which service you're interested in?",
    "Our services are priced based on the treatment length and products used. Which service pricing would you like to know about?",
];

static HOURS: &[&str] = &[
    "We're open Monday through Friday from 10am to 6pm, and Saturday from 9am to 5pm. We're closed on Sundays.",
    "Our salon hours are 10-6 Monday to Friday, and 9-5 on Saturdays. We take the day off on Sundays!",
    "Delane's is open weekdays 10am-6pm and Saturdays 9am-5pm. We're closed on Sundays.",
];

static LOCATION: &[&str] = &[
    "We're located at {address}. Would you like directions?",
    "Our salon is at {address}. Is there anything specific you'd like to know about our location?",
    "You can find us at {address}. We're easy to find with plenty of parking available!",
];

static FAREWELL: &[&str] = &[
    "Thank you for chatting with us! Have a wonderful day!",
    "It was a pleasure helping you today. Don't hesitate to reach out if you have more questions!",
    "Thanks for stopping by our chat! We hope to see you at the salon soon!",
];

static HELP: &[&str] = &[
    "I can help with information about our services, pricing, booking appointments, hours, and location. What would you like to know?",
    "I'm here to assist with any questions about Delane's Natural Nail Care. How can I help you today?",
    "I can provide details about our salon services, help you book, or answer questions. What do you need?",
];

static UNKNOWN: &[&str] = &[
    "I'm not sure I understand. Could you please rephrase your question?",
    "I didn't quite catch that. How else can I help you with our nail services?",
    "I'm still learning! Could you try asking your question another way?",
];

static NAVIGATION: &[&str] = &[
    "I can help you navigate our website. Which page would you like to visit?",
    "I'll be happy to direct you to the right page. Which section are you looking for?",
    "Let me show you around our website. What information are you looking for specifically?",
];

static FIND_INFORMATION: &[&str] = &[
    "I'll help you find that information. What specifically would you like to know about?",
    "I can provide information about our services, hours, location, and more. What details are you looking for?",
    "I'd be happy to help you find the information you need. Could you be more specific about what you're looking for?",
];

static PRODUCT_INQUIRY: &[&str] = &[
    "We offer a variety of nail care products that you can purchase in our salon or online. What type of products are you interested in?",
    "Our product line includes the Truth & Freedom polish collection, nail care essentials, and our new advanced care treatments. Which would you like to hear about?",
    "We have several product lines available for purchase, including our exclusive polish collection. Is there something specific you're looking for?",
];

static DNNC_INQUIRY: &[&str] = &[
    "DNNC stands for Delane's Natural Nail Care. Beyond our salon services, we have several initiatives including Steps to Success and Vision 2025. What would you like to know more about?",
    "Our DNNC initiatives include our nonprofit Steps to Success program and our Vision 2025 expansion plan. Which aspect interests you?",
    "DNNC encompasses both our salon and our community initiatives. Would you like to learn about our Steps to Success nonprofit or our Vision 2025 expansion plans?",
];

static ADVANCED_PEDICURE: &[&str] = &[
    "Our Advanced Pedicure Program offers specialized treatments addressing specific foot health concerns, including therapeutic relief, diabetic foot care, and athletic recovery pedicures.",
    "We have several specialized advanced pedicures that focus on foot health beyond aesthetics, including options for diabetic care and athletic recovery.",
    "Our Advanced Pedicure Program is designed for clients with specific foot health needs, with treatments performed by certified specialists. Would you like details on a specific treatment?",
];

/// Templates for `intent`.
pub fn templates_for(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Greeting => GREETING,
        Intent::Booking => BOOKING,
        Intent::ServiceInquiry => SERVICE_INQUIRY,
        Intent::Pricing => PRICING,
        Intent::Hours => HOURS,
        Intent::Location => LOCATION,
        Intent::FindInformation => FIND_INFORMATION,
        Intent::Farewell => FAREWELL,
        Intent::Help => HELP,
        Intent::Navigation => NAVIGATION,
        Intent::ProductInquiry => PRODUCT_INQUIRY,
        Intent::DnncInquiry => DNNC_INQUIRY,
        Intent::AdvancedPedicure => ADVANCED_PEDICURE,
        Intent::Unknown => UNKNOWN,
    }
}
