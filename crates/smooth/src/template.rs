// Fragment URL templates, as found in `StreamIndex@Url`:
//
//   QualityLevels({bitrate})/Fragments(video={start time})
//
// Only the first occurrence of each token is substituted, later occurrences stay literal.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static BITRATE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{bitrate\}").unwrap());
static START_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{start time\}").unwrap());

/// Absolute fragment URL template of one stream index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    url: String,
}

impl UrlTemplate {
    pub const BITRATE: &'static str = "{bitrate}";
    pub const START_TIME: &'static str = "{start time}";

    pub fn new(root_url: &str, template: &str) -> Self {
        Self {
            url: join_url(root_url, template),
        }
    }

    /// Builds the template of a stream index located relative to `manifest_url`.
    pub fn for_manifest(manifest_url: &str, template: &str) -> Self {
        Self::new(root_url(manifest_url), template)
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn resolve(&self, bitrate: u64, time: u64) -> String {
        let url = BITRATE_REGEX.replace(&self.url, NoExpand(&bitrate.to_string()));
        START_TIME_REGEX
            .replace(&url, NoExpand(&time.to_string()))
            .into_owned()
    }
}

/// Everything before the last `/` of the manifest URL, or an empty string if there is none.
///
/// `http://test.com/some/stuff` => `http://test.com/some`
pub fn root_url(manifest_url: &str) -> &str {
    manifest_url
        .rfind('/')
        .map_or("", |index| &manifest_url[..index])
}

/// Joins two URL parts with exactly one `/` between them.
///
/// This is plain string concatenation: `.` and `..` segments are not resolved.
pub fn join_url(root: &str, path: &str) -> String {
    match (root.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => root.to_string(),
        (false, false) => format!(
            "{}/{}",
            root.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
    }
}
