//! Fixed fallback records, one per mode.
//!
//! Substituted verbatim whenever a model reply cannot be turned into a valid
//! record. They are deliberately generic and never built from the user's form.

use crate::record::{DiagnosisRecord, Mode, Record, SkincarePlanRecord};

const DIAGNOSIS: &str = "Based on the images provided, this appears to be a common skin condition that would benefit from professional evaluation.";
const CAUSE: &str = "The exact cause may vary, but common factors include genetics, environmental factors, hormonal changes, or skincare routine.";
const TREATMENT: &[&str] = &[
    "Maintain a gentle skincare routine with mild, fragrance-free products",
    "Keep the affected area clean and dry",
    "Avoid picking or scratching the area",
    "Consider using over-the-counter treatments as appropriate",
];
const PREVENTION: &[&str] = &[
    "Use sunscreen daily to protect your skin",
    "Maintain a consistent skincare routine",
    "Stay hydrated and eat a balanced diet",
    "Avoid known triggers and irritants",
];
const MEDICINES: &[&str] = &[
    "Gentle cleanser - Use twice daily, morning and evening",
    "Moisturizer - Apply after cleansing to maintain skin barrier",
    "Consult a dermatologist for prescription treatments if needed",
];
const NATURAL_REMEDIES: &[&str] = &[
    "Aloe vera gel - Apply pure aloe vera gel 2-3 times daily for soothing relief",
    "Honey mask - Apply raw honey for 15-20 minutes, then rinse with warm water",
    "Oatmeal bath - Add colloidal oatmeal to lukewarm bath water for gentle cleansing",
];
const PRODUCTS: &[&str] = &[
    "CeraVe Hydrating Cleanser - Gentle, non-comedogenic daily cleanser",
    "Neutrogena Ultra Gentle Daily Cleanser - For sensitive skin types",
    "La Roche-Posay Toleriane Double Repair Moisturizer - Fragrance-free daily moisturizer",
];

const SKIN_ANALYSIS: &str = "Based on your skin type and goals, here's a personalized skincare plan to help you achieve healthier, more radiant skin.";
const MORNING_ROUTINE: &[&str] = &[
    "Gentle cleanser - Remove overnight buildup",
    "Vitamin C serum - Antioxidant protection and brightening",
    "Moisturizer - Hydrate and protect skin barrier",
    "Broad-spectrum SPF 30+ sunscreen - Essential UV protection",
];
const EVENING_ROUTINE: &[&str] = &[
    "Double cleanse - Remove makeup and daily impurities",
    "Treatment serum - Target specific concerns",
    "Night moisturizer - Repair and regenerate overnight",
    "Face oil (optional) - Extra nourishment for dry skin",
];
const PRODUCT_RECOMMENDATIONS: &[&str] = &[
    "CeraVe Foaming Facial Cleanser - Gentle daily cleanser for all skin types",
    "The Ordinary Vitamin C Suspension 23% - Brightening and antioxidant protection",
    "Neutrogena Hydra Boost Water Gel - Lightweight, hydrating moisturizer",
    "EltaMD UV Clear Broad-Spectrum SPF 46 - Excellent daily sunscreen",
];
const DIET_TIPS: &[&str] = &[
    "Drink at least 8 glasses of water daily for optimal hydration",
    "Include antioxidant-rich foods like berries, leafy greens, and nuts",
    "Limit dairy and high-glycemic foods if you have acne-prone skin",
];
const LIFESTYLE_TIPS: &[&str] = &[
    "Get 7-9 hours of quality sleep for skin repair and regeneration",
    "Manage stress through meditation, exercise, or relaxation techniques",
    "Change pillowcases regularly and avoid touching your face frequently",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn diagnosis_fallback() -> DiagnosisRecord {
    DiagnosisRecord {
        diagnosis: DIAGNOSIS.to_string(),
        cause: CAUSE.to_string(),
        treatment: owned(TREATMENT),
        prevention: owned(PREVENTION),
        medicines: owned(MEDICINES),
        natural_remedies: owned(NATURAL_REMEDIES),
        products: owned(PRODUCTS),
    }
}

pub fn skincare_fallback() -> SkincarePlanRecord {
    SkincarePlanRecord {
        skin_analysis: SKIN_ANALYSIS.to_string(),
        morning_routine: owned(MORNING_ROUTINE),
        evening_routine: owned(EVENING_ROUTINE),
        product_recommendations: owned(PRODUCT_RECOMMENDATIONS),
        diet_tips: owned(DIET_TIPS),
        lifestyle_tips: owned(LIFESTYLE_TIPS),
    }
}

/// The fallback record for `mode`.
pub fn fallback_record(mode: Mode) -> Record {
    match mode {
        Mode::Diagnosis => Record::Diagnosis(diagnosis_fallback()),
        Mode::SkincarePlan => Record::SkincarePlan(skincare_fallback()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::validate::validate;

    #[test]
    fn fallbacks_pass_their_own_schema() {
        for mode in [Mode::Diagnosis, Mode::SkincarePlan] {
            let record = fallback_record(mode);
            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(validate(&value, mode).unwrap(), record);
        }
    }

    #[test]
    fn fallback_lists_are_populated() {
        let d = diagnosis_fallback();
        assert_eq!(d.treatment.len(), 4);
        assert_eq!(d.products.len(), 3);
        let s = skincare_fallback();
        assert_eq!(s.morning_routine.len(), 4);
        assert_eq!(s.lifestyle_tips.len(), 3);
    }
}
