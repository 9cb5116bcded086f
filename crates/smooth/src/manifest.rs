use serde::Serialize;

use crate::{
    digest::ManifestDigest,
    error::{ManifestError, SmoothError, SmoothResult},
    model::StreamIndexEntry,
    playlist::{self, Playlist},
    tree::{self, AttributeTree},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResult {
    pub playlists: Vec<Playlist>,
    pub manifest_hash: String,
    pub url: String,
}

/// Reads `SmoothStreamingMedia.StreamIndex` as a sequence of entries.
pub fn stream_indexes(tree: &AttributeTree) -> Result<Vec<StreamIndexEntry>, ManifestError> {
    let document = tree::object(tree, "document")?;
    let media = tree::object(
        tree::required(document, "SmoothStreamingMedia", "document")?,
        "SmoothStreamingMedia",
    )?;
    let stream_index = tree::required(media, "StreamIndex", "SmoothStreamingMedia")?;

    tree::one_or_many(stream_index)
        .into_iter()
        .map(StreamIndexEntry::from_tree)
        .collect()
}

/// Builds every playlist of a parsed manifest, stream indexes first and quality levels second,
/// both in manifest order.
pub fn build<D>(
    manifest_url: &str,
    manifest: &str,
    tree: &AttributeTree,
    digest: &D,
) -> SmoothResult<ManifestResult>
where
    D: ManifestDigest + ?Sized,
{
    let mut playlists = Vec::new();
    for entry in stream_indexes(tree)? {
        playlists.extend(playlist::assemble(&entry, manifest_url)?);
    }

    let manifest_hash = digest.digest(manifest).map_err(SmoothError::dependency)?;

    Ok(ManifestResult {
        playlists,
        manifest_hash,
        url: manifest_url.to_string(),
    })
}
