use crate::domain::model::Lead;

pub fn build_prompt(lead: &Lead) -> String {
    format!(
        "Generate a personalized outreach message for this lead. Format your response EXACTLY as shown:

WhatsApp: [Your personalized WhatsApp message here]
Subject: [Email subject line here]
Body: [Email body content here]

Lead Details:
Name: {}
Email: {}
Phone: {}

Make the messages professional, personalized, and engaging.",
        lead.name, lead.email, lead.phone
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_lead_verbatim() {
        let lead = Lead {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1 555-1234".to_string(),
        };
        let prompt = build_prompt(&lead);

        assert!(prompt.contains("Name: Jane Doe\n"));
        assert!(prompt.contains("Email: jane@x.com\n"));
        assert!(prompt.contains("Phone: +1 555-1234\n"));
    }

    #[test]
    fn test_prompt_asks_for_three_labelled_lines() {
        let prompt = build_prompt(&Lead {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
        });

        for label in ["\nWhatsApp: ", "\nSubject: ", "\nBody: "] {
            assert!(prompt.contains(label), "missing {:?}", label);
        }
    }
}
