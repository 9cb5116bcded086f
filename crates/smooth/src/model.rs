use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ManifestError,
    tree::{self, Object},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Text,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }
}

impl std::str::FromStr for StreamType {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("video") {
            Ok(Self::Video)
        } else if s.eq_ignore_ascii_case("audio") {
            Ok(Self::Audio)
        } else if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else {
            Err(ManifestError::UnknownStreamType(s.to_string()))
        }
    }
}

impl std::fmt::Display for StreamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<c>` element: a run of `repeat_count` fragments of equal `duration`, optionally
/// anchored at `start_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    /// `c@d`, in timescale ticks.
    pub duration: u64,
    /// `c@t`
    pub start_time: Option<u64>,
    /// `c@r`
    pub repeat_count: Option<u64>,
}

impl ChunkRecord {
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            start_time: None,
            repeat_count: None,
        }
    }

    pub fn with_start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_repeat_count(mut self, repeat_count: u64) -> Self {
        self.repeat_count = Some(repeat_count);
        self
    }

    /// Number of fragments this record expands to.
    pub fn fragment_count(&self) -> u64 {
        match self.repeat_count {
            Some(repeat) if repeat > 0 => repeat,
            _ => 1,
        }
    }

    pub(crate) fn from_tree(object: &Object) -> Result<Self, ManifestError> {
        let duration = tree::integer(tree::required(object, "d", "c")?, "d")?;
        if duration == 0 {
            return Err(ManifestError::InvalidNumber {
                field: "d",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            duration,
            start_time: tree::optional_integer(object, "t")?,
            repeat_count: tree::optional_integer(object, "r")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityLevel {
    pub bitrate: u64,
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
}

impl QualityLevel {
    pub(crate) fn from_tree(object: &Object) -> Result<Self, ManifestError> {
        Ok(Self {
            bitrate: tree::integer(tree::required(object, "Bitrate", "QualityLevel")?, "Bitrate")?,
            max_width: tree::optional_integer(object, "MaxWidth")?,
            max_height: tree::optional_integer(object, "MaxHeight")?,
        })
    }
}

/// A `<StreamIndex>` element with its repeatable children already normalized to sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamIndexEntry {
    pub r#type: StreamType,
    pub url_template: String,
    pub chunk_records: Vec<ChunkRecord>,
    pub quality_levels: Vec<QualityLevel>,
}

impl StreamIndexEntry {
    pub fn from_tree(value: &Value) -> Result<Self, ManifestError> {
        let object = tree::object(value, "StreamIndex")?;

        let r#type = tree::string(tree::required(object, "Type", "StreamIndex")?, "Type")?
            .parse::<StreamType>()?;
        let url_template =
            tree::string(tree::required(object, "Url", "StreamIndex")?, "Url")?.to_string();

        // A stream without any <c> element has an empty timeline.
        let chunk_records = match object.get("c") {
            Some(chunks) => tree::objects(chunks, "c")?
                .into_iter()
                .map(ChunkRecord::from_tree)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let quality_levels = tree::objects(
            tree::required(object, "QualityLevel", "StreamIndex")?,
            "QualityLevel",
        )?
        .into_iter()
        .map(QualityLevel::from_tree)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            r#type,
            url_template,
            chunk_records,
            quality_levels,
        })
    }
}
