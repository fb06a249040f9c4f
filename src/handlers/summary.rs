use crate::models::{AnalysisResponse, AttributeScore, UNKNOWN_LABEL};

pub const NO_DATA_MESSAGE: &str = "No analysis data available.";

/// Render the provider result as a short plain-text summary, one finding per line.
///
/// Each attribute is resolved on its own: a missing or unrecognized code shows up as
/// "Unknown" on its line and the rest of the report is still produced.
pub fn generate_summary(response: &AnalysisResponse) -> String {
    let Some(r) = &response.result else {
        return NO_DATA_MESSAGE.to_string();
    };

    let mut summary = Vec::with_capacity(7);

    if let Some(skin_type) = r.skin_type.as_ref().and_then(|s| s.skin_type()) {
        summary.push(format!("Your skin type is {}.", skin_type));
    }

    summary.push(format!("Acne level: {}.", presence_label(r.acne.as_ref())));
    summary.push(format!("Dark circles: {}.", presence_label(r.dark_circle.as_ref())));
    summary.push(format!("Eye puffiness: {}.", presence_label(r.eye_pouch.as_ref())));

    summary.push(format!(
        "Wrinkles: Forehead ({}), Crow's feet ({}), Glabella ({}).",
        presence_label(r.forehead_wrinkle.as_ref()),
        presence_label(r.crows_feet.as_ref()),
        presence_label(r.glabella_wrinkle.as_ref()),
    ));

    summary.push(format!(
        "Smile lines (nasolabial folds): {}.",
        presence_label(r.nasolabial_fold.as_ref())
    ));

    summary.push(format!(
        "Skin spots: {}, Blackheads: {}.",
        presence_label(r.skin_spot.as_ref()),
        presence_label(r.blackhead.as_ref()),
    ));

    summary.join("\n")
}

/// Presence label for an attribute, "Unknown" when absent or out of range
pub fn presence_label(score: Option<&AttributeScore>) -> &'static str {
    score
        .and_then(AttributeScore::severity)
        .map(|s| s.label())
        .unwrap_or(UNKNOWN_LABEL)
}
