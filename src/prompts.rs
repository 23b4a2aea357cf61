//! Prompts sent to the vision model for each consultation mode.
//!
//! The JSON shape each prompt demands must match the field lists checked in
//! [`crate::pipeline::validate`].

use crate::record::{DiagnosisForm, FormData, SkincareForm};

const NOT_PROVIDED: &str = "Not provided";

/// Human label for a skincare goal tag. Unknown tags pass through verbatim.
pub fn goal_label(tag: &str) -> &str {
    match tag {
        "tan" => "Remove Tan",
        "brighten" => "Brighten Skin Tone",
        "blackheads" => "Reduce Blackheads",
        "acne-marks" => "Clear Acne Marks",
        "pores" => "Shrink Pores",
        "oil-control" => "Control Oiliness",
        "hydration" => "Hydration",
        "anti-aging" => "Anti-Aging",
        other => other,
    }
}

/// Build the prompt for `form`'s mode. `image_count` is the number of images
/// that will actually accompany the prompt.
pub fn build_prompt(form: &FormData, image_count: usize) -> String {
    match form {
        FormData::Diagnosis(f) => diagnosis_prompt(f),
        FormData::Skincare(f) => skincare_prompt(f, image_count > 0),
    }
}

fn or_not_provided(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_PROVIDED)
}

/// Dermatologist-style consultation prompt.
pub fn diagnosis_prompt(form: &DiagnosisForm) -> String {
    format!(
        r#"You are a professional dermatologist AI assistant. Analyze the provided skin images and description to provide a comprehensive skin consultation.

Patient Description:
- Appearance: {appearance}
- Issue: {issue}
- How/when it started: {started}
- Symptoms: {symptoms}
- Triggers: {triggers}
- Skin type: {skin_type}

IMPORTANT: You must respond with ONLY a valid JSON object in exactly this format. Do not include any other text, explanations, or markdown formatting:

{{
  "diagnosis": "Clear, professional diagnosis of the skin condition",
  "cause": "Detailed explanation of what likely caused this condition",
  "treatment": ["Step 1 of treatment", "Step 2 of treatment", "Step 3 of treatment"],
  "prevention": ["Prevention tip 1", "Prevention tip 2", "Prevention tip 3"],
  "medicines": ["Medicine 1 with dosage and timing", "Medicine 2 with dosage and timing", "Medicine 3 with dosage and timing"],
  "naturalRemedies": ["Natural remedy 1 with instructions", "Natural remedy 2 with instructions", "Natural remedy 3 with instructions"],
  "products": ["Specific product recommendation 1 with brand if possible", "Specific product recommendation 2 with brand if possible", "Specific product recommendation 3 with brand if possible"]
}}

Guidelines:
- Be professional and thorough
- Provide practical, actionable advice
- Include specific medicine recommendations with dosages and timing
- Include natural remedies that are safe and evidence-based
- Recommend specific skincare products with brand names when possible
- Always recommend consulting a dermatologist for serious conditions
- Be empathetic and reassuring in tone
- Focus on evidence-based treatments
- Ensure all array fields have at least 3 items
- For natural remedies, include safe home remedies like aloe vera, honey, oatmeal, etc.
- For products, recommend well-known brands like CeraVe, Neutrogena, La Roche-Posay, etc."#,
        appearance = or_not_provided(&form.appearance),
        issue = or_not_provided(&form.issue),
        started = or_not_provided(&form.started),
        symptoms = or_not_provided(&form.symptoms),
        triggers = or_not_provided(&form.triggers),
        skin_type = or_not_provided(&form.skin_type),
    )
}

/// Skincare-consultant routine prompt.
pub fn skincare_prompt(form: &SkincareForm, has_image: bool) -> String {
    let goals = form
        .goals
        .iter()
        .map(|g| goal_label(g))
        .collect::<Vec<_>>()
        .join(", ");
    let custom_goal = form
        .custom_goal
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("None specified");
    let image_line = if has_image {
        "- Face image provided for analysis"
    } else {
        "- No image provided"
    };

    format!(
        r#"You are a professional skincare consultant AI. Create a personalized skincare routine based on the provided information.

Client Information:
- Skin Type: {skin_type}
- Goals: {goals}
- Custom Goals/Concerns: {custom_goal}
{image_line}

IMPORTANT: You must respond with ONLY a valid JSON object in exactly this format. Do not include any other text, explanations, or markdown formatting:

{{
  "skinAnalysis": "Professional analysis of the skin type and condition based on provided information and image (if available)",
  "morningRoutine": ["Morning step 1", "Morning step 2", "Morning step 3", "Morning step 4"],
  "eveningRoutine": ["Evening step 1", "Evening step 2", "Evening step 3", "Evening step 4"],
  "productRecommendations": ["Product 1 with brand and purpose", "Product 2 with brand and purpose", "Product 3 with brand and purpose", "Product 4 with brand and purpose"],
  "dietTips": ["Diet tip 1", "Diet tip 2", "Diet tip 3"],
  "lifestyleTips": ["Lifestyle tip 1", "Lifestyle tip 2", "Lifestyle tip 3"]
}}

Guidelines:
- Tailor recommendations specifically to the skin type and goals mentioned
- Provide step-by-step morning and evening routines
- Include specific product recommendations with brand names (CeraVe, Neutrogena, The Ordinary, etc.)
- Give practical diet advice for skin health
- Include lifestyle tips (sleep, stress management, hydration, etc.)
- Be professional and evidence-based
- Ensure all array fields have at least 3-4 items
- Consider the specific goals mentioned (tan removal, brightening, etc.)
- If image is provided, incorporate visual analysis into skin assessment"#,
        skin_type = form.skin_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_tags_map_to_labels() {
        assert_eq!(goal_label("acne-marks"), "Clear Acne Marks");
        assert_eq!(goal_label("oil-control"), "Control Oiliness");
        assert_eq!(goal_label("glass-skin"), "glass-skin");
    }

    #[test]
    fn diagnosis_prompt_fills_missing_answers() {
        let form = DiagnosisForm {
            issue: Some("Red itchy patches".into()),
            symptoms: Some(String::new()),
            ..Default::default()
        };
        let prompt = diagnosis_prompt(&form);
        assert!(prompt.contains("- Issue: Red itchy patches"));
        assert!(prompt.contains("- Symptoms: Not provided"));
        assert!(prompt.contains("- Appearance: Not provided"));
        assert!(prompt.contains("\"naturalRemedies\""));
    }

    #[test]
    fn skincare_prompt_lists_goal_labels_and_image_flag() {
        let form = SkincareForm {
            skin_type: "oily".into(),
            goals: vec!["tan".into(), "pores".into()],
            custom_goal: None,
        };
        let with_image = build_prompt(&FormData::Skincare(form.clone()), 1);
        assert!(with_image.contains("- Goals: Remove Tan, Shrink Pores"));
        assert!(with_image.contains("- Custom Goals/Concerns: None specified"));
        assert!(with_image.contains("Face image provided"));

        let without = skincare_prompt(&form, false);
        assert!(without.contains("- No image provided"));
    }

    #[test]
    fn prompts_demand_bare_json() {
        let prompt = build_prompt(&FormData::Diagnosis(DiagnosisForm::default()), 0);
        assert!(prompt.contains("ONLY a valid JSON object"));
        assert!(prompt.contains("{\n  \"diagnosis\""));
    }
}
