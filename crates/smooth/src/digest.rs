use md5::{Digest, Md5};

/// Computes the content hash reported as `manifest_hash` in a
/// [`ManifestResult`](crate::manifest::ManifestResult).
pub trait ManifestDigest {
    type Error: std::error::Error + Send + Sync + 'static;

    fn digest(&self, manifest: &str) -> Result<String, Self::Error>;
}

impl<D> ManifestDigest for &D
where
    D: ManifestDigest + ?Sized,
{
    type Error = D::Error;

    fn digest(&self, manifest: &str) -> Result<String, Self::Error> {
        (**self).digest(manifest)
    }
}

/// Lowercase hex MD5 of the manifest text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Digest;

impl ManifestDigest for Md5Digest {
    type Error = std::convert::Infallible;

    fn digest(&self, manifest: &str) -> Result<String, Self::Error> {
        let mut hasher = Md5::new();
        hasher.update(manifest.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}
