use crate::{
    digest::{ManifestDigest, Md5Digest},
    error::{SmoothError, SmoothResult},
    manifest::{self, ManifestResult},
    xml::{QuickXmlAdapter, XmlAdapter},
};

/// Turns manifest text into a [`ManifestResult`].
///
/// The XML adapter and the digest are injected so that either can be replaced, for example
/// by fakes in tests. [`IsmParser::default`] uses [`QuickXmlAdapter`] and [`Md5Digest`].
#[derive(Debug, Clone)]
pub struct IsmParser<X = QuickXmlAdapter, D = Md5Digest> {
    xml: X,
    digest: D,
}

impl Default for IsmParser {
    fn default() -> Self {
        Self::new(QuickXmlAdapter::default(), Md5Digest)
    }
}

impl<X, D> IsmParser<X, D>
where
    X: XmlAdapter,
    D: ManifestDigest,
{
    pub fn new(xml: X, digest: D) -> Self {
        Self { xml, digest }
    }

    pub fn parse_manifest(
        &self,
        manifest_url: &str,
        manifest: &str,
    ) -> SmoothResult<ManifestResult> {
        let tree = self.xml.parse(manifest).map_err(SmoothError::dependency)?;
        let result = manifest::build(manifest_url, manifest, &tree, &self.digest)?;

        log::debug!(
            "Parsed manifest {manifest_url}: {} playlists, hash {}",
            result.playlists.len(),
            result.manifest_hash
        );
        Ok(result)
    }
}
