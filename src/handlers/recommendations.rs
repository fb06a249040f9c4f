use crate::models::{AnalysisResponse, AttributeScore, Severity, SkinType};

/// Shown under a category whose grade is present but outside 0..=3
pub const NO_RECOMMENDATION: &str = "No recommendation available for this result.";

fn acne_advice(severity: Severity) -> &'static str {
    match severity {
        Severity::Absent => "Good! No acne detected. Maintain regular gentle cleansing.",
        Severity::Slight => "Mild acne present. Consider salicylic acid cleansers and spot treatments with benzoyl peroxide.",
        Severity::Moderate => "Moderate acne. Use gentle exfoliants and consult dermatologist for retinoid treatments.",
        Severity::Severe => "Severe acne detected. Seek professional advice for prescription treatment.",
    }
}

fn dark_circle_advice(severity: Severity) -> &'static str {
    match severity {
        Severity::Absent => "No dark circles detected.",
        Severity::Slight => "Mild dark circles. Try hydrating eye creams with caffeine or vitamin K.",
        Severity::Moderate => "Moderate dark circles. Use targeted eye serums with antioxidants and ensure adequate sleep.",
        Severity::Severe => "Severe dark circles. Consider medical consultation for underlying causes.",
    }
}

fn skin_type_advice(skin_type: SkinType) -> &'static str {
    match skin_type {
        SkinType::Oily => "Use lightweight, oil-free moisturizers and mattifying sunscreens to control shine.",
        SkinType::Dry => "Use rich, hydrating moisturizers containing hyaluronic acid or ceramides.",
        SkinType::Normal => "Maintain a balanced skincare routine with gentle cleansing and moisturizing.",
        SkinType::Combination => "Use targeted care: mattify oily zones and hydrate dry areas.",
    }
}

fn graded_advice(score: &AttributeScore, table: fn(Severity) -> &'static str) -> &'static str {
    score.severity().map(table).unwrap_or(NO_RECOMMENDATION)
}

/// Care advice for acne, dark circles and skin type, separated by blank lines.
/// Returns an empty string when the response carries no result.
pub fn generate_recommendations(response: &AnalysisResponse) -> String {
    let Some(r) = &response.result else {
        return String::new();
    };

    let mut recs = Vec::with_capacity(3);

    if let Some(acne) = &r.acne {
        recs.push(format!("Acne Care: {}", graded_advice(acne, acne_advice)));
    }

    if let Some(dark_circle) = &r.dark_circle {
        recs.push(format!("Dark Circles: {}", graded_advice(dark_circle, dark_circle_advice)));
    }

    if let Some(skin_type) = r.skin_type.as_ref().and_then(|s| s.skin_type()) {
        recs.push(format!("Skin Type Care: {}", skin_type_advice(skin_type)));
    }

    recs.join("\n\n")
}
