//! Outreach copy. Placeholders are interpolated by `templates::render`.

pub const SENDER_NAME: &str = "Radu";
pub const WALKTHROUGH_LINK_PLACEHOLDER: &str = "[INSERT LOOM LINK]";

pub fn hook_subject(business_type: &str, business_name: &str) -> String {
    format!("Question about {business_type} | {business_name}")
}

pub fn hook_body(business_type: &str, city: &str, business_name: &str) -> String {
    format!(
        "Hi there,

I was searching for a {business_type} in {city} today and came across the {business_name} website. It looks a bit outdated and was difficult to navigate on mobile, which can cause potential customers to leave before they contact you.

I build high-speed sites for local trades, so I created a fully functional demo (including Services, Gallery, and Reviews pages) as an example of what's possible with modern tech. I recorded a 30-second walkthrough. Would you like to see it?

Best regards,
{SENDER_NAME}"
    )
}

pub fn proof_subject(business_name: &str) -> String {
    format!("Here is the video – {business_name} Demo")
}

pub fn proof_body() -> String {
    format!(
        "Hi again,

Thanks for the reply! Here is the 30-second walkthrough I recorded for you: {WALKTHROUGH_LINK_PLACEHOLDER}

This isn't just a website—it's a lead generation machine. It's built on the same technology as Netflix and Uber (Next.js), so it loads instantly on mobile and converts more visitors into paying customers.

Would you like me to send the LIVE link so you can click around and test it yourself?

Best,
{SENDER_NAME}"
    )
}
