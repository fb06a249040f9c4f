pub mod recommendations;
pub mod summary;

pub use recommendations::generate_recommendations;
pub use summary::generate_summary;

use serde::Serialize;

use crate::models::AnalysisResponse;

/// Both text renderings of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: String,
    pub recommendations: String,
}

impl Report {
    pub fn from_response(response: &AnalysisResponse) -> Self {
        Self {
            summary: generate_summary(response),
            recommendations: generate_recommendations(response),
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.recommendations.is_empty() {
            write!(f, "{}", self.summary)
        } else {
            write!(f, "{}\n\n{}", self.summary, self.recommendations)
        }
    }
}
