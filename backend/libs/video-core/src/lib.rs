//! Video resource core models and validation
//!
//! Shared data structures and payload validation for video-service.

pub mod constants;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::{
    validate_create, validate_update, AgeRestrictionCheck, FieldError, ValidationErrors,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_created_video_serializes_in_camel_case() {
        let created_at = Utc.with_ymd_and_hms(2023, 7, 17, 15, 49, 14).unwrap();
        let video = Video::create(
            7,
            NewVideo {
                title: "title".to_string(),
                author: "author".to_string(),
                available_resolutions: vec![Resolution::P720],
            },
            created_at,
        );

        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["canBeDownloaded"], false);
        assert!(json["minAgeRestriction"].is_null());
        assert_eq!(json["createdAt"], "2023-07-17T15:49:14.000Z");
        assert_eq!(json["publicationDate"], "2023-07-18T15:49:14.000Z");
        assert_eq!(json["availableResolutions"], serde_json::json!(["P720"]));
    }
}
