use serde::{Serialize, Serializer};

use crate::{
    error::ManifestError,
    model::{QualityLevel, StreamIndexEntry, StreamType},
    template::UrlTemplate,
    timeline::{self, Timeline},
};

/// One rendition of a stream index: every fragment URL of a single quality level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub r#type: StreamType,
    pub bitrate: u64,
    pub resolution: Resolution,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Audio streams have no resolution.
    NotApplicable,
    Dimensions(Dimensions),
}

impl Resolution {
    pub const NOT_APPLICABLE: &'static str = "n/a";

    fn of(r#type: StreamType, level: &QualityLevel) -> Self {
        match r#type {
            StreamType::Audio => Self::NotApplicable,
            _ => Self::Dimensions(Dimensions {
                width: level.max_width,
                height: level.max_height,
            }),
        }
    }
}

impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::NotApplicable => serializer.serialize_str(Self::NOT_APPLICABLE),
            Self::Dimensions(dimensions) => dimensions.serialize(serializer),
        }
    }
}

/// `QualityLevel@MaxWidth` and `QualityLevel@MaxHeight`, as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

/// Builds one playlist per quality level of `entry`, in declaration order.
pub fn assemble(
    entry: &StreamIndexEntry,
    manifest_url: &str,
) -> Result<Vec<Playlist>, ManifestError> {
    let timeline = timeline::reconstruct(&entry.chunk_records)?;
    let template = UrlTemplate::for_manifest(manifest_url, &entry.url_template);

    log::debug!(
        "{} stream: {} fragments, {} quality levels, template {}",
        entry.r#type,
        timeline.len(),
        entry.quality_levels.len(),
        template.as_str()
    );

    Ok(entry
        .quality_levels
        .iter()
        .map(|level| Playlist {
            r#type: entry.r#type,
            bitrate: level.bitrate,
            resolution: Resolution::of(entry.r#type, level),
            segments: segments(&template, level.bitrate, &timeline),
        })
        .collect())
}

fn segments(template: &UrlTemplate, bitrate: u64, timeline: &Timeline) -> Vec<String> {
    timeline
        .iter()
        .map(|time| template.resolve(bitrate, *time))
        .collect()
}
