//! # Smooth Streaming manifests
//!
//! Expands an IIS Smooth Streaming (ISM) manifest into flat playlists: one per quality level of
//! every stream index, each listing the URL of every fragment.
//!
//! ```text
//!  manifest ──► XmlAdapter ──► AttributeTree ──► StreamIndexEntry (one per StreamIndex)
//!                                                       │
//!                                     c records ──► Timeline
//!                                     Url ────────► UrlTemplate
//!                                                       │
//!                                QualityLevel × Timeline ──► Playlist
//! ```
//!
//! ```
//! use smooth::IsmParser;
//!
//! let manifest = r#"<SmoothStreamingMedia>
//!   <StreamIndex Type="video" Url="QualityLevels({bitrate})/Fragments(video={start time})">
//!     <QualityLevel Bitrate="2962000" MaxWidth="1280" MaxHeight="720" />
//!     <c t="0" d="20020000" r="2" />
//!   </StreamIndex>
//! </SmoothStreamingMedia>"#;
//!
//! let parser: IsmParser = IsmParser::default();
//! let result = parser.parse_manifest("http://host/path/Manifest", manifest)?;
//! assert_eq!(
//!     result.playlists[0].segments[1],
//!     "http://host/path/QualityLevels(2962000)/Fragments(video=20020000)"
//! );
//! # Ok::<(), smooth::SmoothError>(())
//! ```

pub mod digest;
pub mod error;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod playlist;
pub mod template;
pub mod timeline;
pub mod tree;
pub mod xml;

pub use digest::{ManifestDigest, Md5Digest};
pub use error::{ManifestError, SmoothError, SmoothResult};
pub use manifest::ManifestResult;
pub use model::{ChunkRecord, QualityLevel, StreamIndexEntry, StreamType};
pub use parser::IsmParser;
pub use playlist::{Dimensions, Playlist, Resolution};
pub use template::UrlTemplate;
pub use timeline::{Timeline, MAX_FRAGMENTS};
pub use tree::AttributeTree;
pub use xml::{QuickXmlAdapter, XmlAdapter, XmlError};
