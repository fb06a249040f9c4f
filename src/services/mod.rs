pub mod analysis_service;
pub mod facepp; // Face++ skinanalyze API

pub use analysis_service::SkinAnalysisService;
pub use facepp::FacePlusPlusClient;
