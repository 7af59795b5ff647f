//! Core video data models

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::PUBLICATION_DELAY_DAYS;

/// Resolution labels a video can be offered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P144 => "P144",
            Resolution::P240 => "P240",
            Resolution::P360 => "P360",
            Resolution::P480 => "P480",
            Resolution::P720 => "P720",
            Resolution::P1080 => "P1080",
            Resolution::P1440 => "P1440",
            Resolution::P2160 => "P2160",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResolution(pub String);

impl fmt::Display for UnknownResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resolution: {}", self.0)
    }
}

impl std::error::Error for UnknownResolution {}

impl FromStr for Resolution {
    type Err = UnknownResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResolution(s.to_string()))
    }
}

/// Video metadata as stored and served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<i64>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub publication_date: DateTime<Utc>,
    pub available_resolutions: Vec<Resolution>,
}

/// Validated input for a new video
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub author: String,
    pub available_resolutions: Vec<Resolution>,
}

/// Validated full replacement of a video's mutable fields
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpdate {
    pub title: String,
    pub author: String,
    pub available_resolutions: Vec<Resolution>,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<i64>,
    /// `None` falls back to the default publication date at apply time
    pub publication_date: Option<DateTime<Utc>>,
}

impl Video {
    /// Build a freshly created video. Timestamps are kept at millisecond
    /// precision so the stored value matches its serialized form.
    pub fn create(id: i64, new: NewVideo, now: DateTime<Utc>) -> Self {
        let created_at = now.trunc_subsecs(3);
        Self {
            id,
            title: new.title,
            author: new.author,
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at,
            publication_date: default_publication_date(created_at),
            available_resolutions: new.available_resolutions,
        }
    }

    /// Overwrite every mutable field; `id` and `created_at` stay untouched.
    pub fn apply_update(&mut self, update: VideoUpdate, now: DateTime<Utc>) {
        self.title = update.title;
        self.author = update.author;
        self.available_resolutions = update.available_resolutions;
        self.can_be_downloaded = update.can_be_downloaded;
        self.min_age_restriction = update.min_age_restriction;
        self.publication_date = match update.publication_date {
            Some(date) => date.trunc_subsecs(3),
            None => default_publication_date(now.trunc_subsecs(3)),
        };
    }
}

pub fn default_publication_date(from: DateTime<Utc>) -> DateTime<Utc> {
    from + Duration::days(PUBLICATION_DELAY_DAYS)
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix,
/// e.g. `2023-01-12T08:12:39.261Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_resolution_str_roundtrip() {
        for resolution in Resolution::ALL {
            assert_eq!(resolution.as_str().parse::<Resolution>(), Ok(resolution));
        }
        assert!("P999".parse::<Resolution>().is_err());
        assert!("p144".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_apply_update_preserves_identity() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut video = Video::create(
            42,
            NewVideo {
                title: "before".to_string(),
                author: "someone".to_string(),
                available_resolutions: vec![],
            },
            created,
        );

        let later = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        video.apply_update(
            VideoUpdate {
                title: "after".to_string(),
                author: "someone else".to_string(),
                available_resolutions: vec![Resolution::P1080],
                can_be_downloaded: true,
                min_age_restriction: Some(16),
                publication_date: None,
            },
            later,
        );

        assert_eq!(video.id, 42);
        assert_eq!(video.created_at, created);
        assert_eq!(video.title, "after");
        assert_eq!(video.min_age_restriction, Some(16));
        assert_eq!(video.publication_date, later + Duration::days(1));
    }

    #[test]
    fn test_apply_update_truncates_supplied_publication_date() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut video = Video::create(
            1,
            NewVideo {
                title: "t".to_string(),
                author: "a".to_string(),
                available_resolutions: vec![],
            },
            created,
        );

        let supplied = Utc.with_ymd_and_hms(2023, 1, 12, 8, 12, 39).unwrap()
            + Duration::nanoseconds(261_987_654);
        video.apply_update(
            VideoUpdate {
                title: "t".to_string(),
                author: "a".to_string(),
                available_resolutions: vec![],
                can_be_downloaded: false,
                min_age_restriction: None,
                publication_date: Some(supplied),
            },
            created,
        );

        assert_eq!(
            video.publication_date,
            Utc.with_ymd_and_hms(2023, 1, 12, 8, 12, 39).unwrap() + Duration::milliseconds(261)
        );
        let json = serde_json::to_value(&video).unwrap();
        let reparsed: Video = serde_json::from_value(json).unwrap();
        assert_eq!(reparsed, video);
    }

    #[test]
    fn test_iso_millis_format() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 12, 8, 12, 39).unwrap()
            + Duration::milliseconds(261);
        assert_eq!(iso_millis::format(&ts), "2023-01-12T08:12:39.261Z");
    }
}
