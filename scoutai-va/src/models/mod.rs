//! Data models for scoutai-va (Video Assessment service)

pub mod api;
pub mod assessment;

pub use api::{
    AnalyzeRequest, AnalyzeResponse, AssessRequest, AssessResponse, ClipUrls, StationOutcome,
};
pub use assessment::{Assessment, StationResult, Tier};
