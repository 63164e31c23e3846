use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    ParseEnumError,
    ids::{ImageUpdateId, ProfileId, ProjectId},
    normalize,
};

/// Kinds of progress imagery a contractor can attach to a project. The wire
/// name for [`ImageKind::ThreeSixty`] is the literal `"360"` the source
/// schema stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Progress,
    Ar,
    #[serde(rename = "360")]
    ThreeSixty,
}

impl ImageKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Ar => "ar",
            Self::ThreeSixty => "360",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "progress" => Ok(Self::Progress),
            "ar" => Ok(Self::Ar),
            "360" => Ok(Self::ThreeSixty),
            _ => Err(ParseEnumError {
                expected: "image kind",
                got: s.to_string(),
            }),
        }
    }
}

/// One entry in a project's append-only image log. Never mutated after
/// creation; the engine stores only the blob-store URL, never bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpdate {
    pub id: ImageUpdateId,
    pub project_id: ProjectId,
    pub contractor_id: ProfileId,
    pub image_type: ImageKind,
    pub image_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::ImageKind;
    use std::str::FromStr;

    #[test]
    fn wire_name_for_panorama_is_numeric() {
        assert_eq!(serde_json::to_string(&ImageKind::ThreeSixty).unwrap(), "\"360\"");
        assert_eq!(
            serde_json::from_str::<ImageKind>("\"360\"").unwrap(),
            ImageKind::ThreeSixty
        );
    }

    #[test]
    fn parse_accepts_all_kinds() {
        assert_eq!(ImageKind::from_str("progress").unwrap(), ImageKind::Progress);
        assert_eq!(ImageKind::from_str("AR").unwrap(), ImageKind::Ar);
        assert_eq!(ImageKind::from_str("360").unwrap(), ImageKind::ThreeSixty);
        assert!(ImageKind::from_str("video").is_err());
    }
}
