use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::{
        decode::{decode_image, fit_exact, transparent},
        key::AssetKey,
    },
    foundation::{
        core::Size,
        error::{SheetError, SheetResult},
    },
};

/// Remote source consulted when an asset is missing from the resource tree.
///
/// Implementations are expected to bound their own latency; the resolver never cancels a fetch.
pub trait FetchAsset: Send + Sync {
    fn fetch(&self, remote_name: &str) -> SheetResult<Vec<u8>>;
}

/// Fetcher for fully offline operation: every request fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFetch;

impl FetchAsset for NoFetch {
    fn fetch(&self, remote_name: &str) -> SheetResult<Vec<u8>> {
        Err(SheetError::fetch(format!(
            "remote fetch disabled, cannot fetch '{remote_name}'"
        )))
    }
}

/// HTTP fetcher joining `base_url` and the remote file name.
pub struct HttpFetcher {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent, base_url }
    }
}

impl FetchAsset for HttpFetcher {
    fn fetch(&self, remote_name: &str) -> SheetResult<Vec<u8>> {
        let url = format!("{}{remote_name}", self.base_url);
        let mut resp = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| SheetError::fetch(format!("GET {url}: {e}")))?;
        resp.body_mut()
            .read_to_vec()
            .map_err(|e| SheetError::fetch(format!("read body of {url}: {e}")))
    }
}

/// Image produced by lenient resolution; `found` is false when a placeholder was substituted.
#[derive(Clone, Debug)]
pub struct ResolvedImage {
    pub image: RgbaImage,
    pub found: bool,
}

/// Maps [`AssetKey`]s to image data under a resource root, filling misses from a [`FetchAsset`].
///
/// Fetched bytes are written back into the tree so later calls hit locally. Cached files are
/// never invalidated.
pub struct AssetResolver {
    root: PathBuf,
    fetcher: Box<dyn FetchAsset>,
    remote_fetches: AtomicU64,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("root", &self.root)
            .field("remote_fetches", &self.remote_fetches())
            .finish()
    }
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>, fetcher: impl FetchAsset + 'static) -> Self {
        Self {
            root: root.into(),
            fetcher: Box::new(fetcher),
            remote_fetches: AtomicU64::new(0),
        }
    }

    /// Resolver that only reads the local tree.
    pub fn offline(root: impl Into<PathBuf>) -> Self {
        Self::new(root, NoFetch)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of remote fetches attempted so far.
    pub fn remote_fetches(&self) -> u64 {
        self.remote_fetches.load(Ordering::Relaxed)
    }

    pub fn path_for(&self, key: &AssetKey) -> SheetResult<PathBuf> {
        key.validate()?;
        Ok(self.root.join(Path::new(&key.rel_path())))
    }

    /// Raw bytes for `key`: local file first, then one remote attempt for fetchable keys.
    pub fn resolve(&self, key: &AssetKey) -> SheetResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(asset = %key.rel_path(), "asset cache hit");
                return Ok(bytes);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read asset '{}'", path.display()))
                    .into());
            }
        }

        let Some(remote_name) = key.remote_name() else {
            return Err(SheetError::asset(format!(
                "asset '{}' not found under '{}'",
                key.rel_path(),
                self.root.display()
            )));
        };

        let attempt = self.remote_fetches.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(asset = %key.rel_path(), remote = %remote_name, "asset cache miss, fetching");
        let bytes = self.fetcher.fetch(&remote_name)?;
        if image::guess_format(&bytes).is_err() {
            return Err(SheetError::fetch(format!(
                "'{remote_name}' did not return a recognizable image"
            )));
        }

        if let Err(err) = persist(&path, &bytes, attempt) {
            tracing::warn!(path = %path.display(), error = %err, "failed to persist fetched asset");
        }
        Ok(bytes)
    }

    /// Decoded image for `key`; any miss is an error.
    pub fn image(&self, key: &AssetKey) -> SheetResult<RgbaImage> {
        let bytes = self.resolve(key)?;
        decode_image(&bytes)
            .map_err(|e| SheetError::asset(format!("decode '{}': {e}", key.rel_path())))
    }

    /// Decoded image for `key`, or `None` (logged) when it cannot be resolved.
    pub fn try_image(&self, key: &AssetKey) -> Option<RgbaImage> {
        match self.image(key) {
            Ok(img) => Some(img),
            Err(err) => {
                tracing::warn!(asset = %key.rel_path(), error = %err, "skipping unresolved asset");
                None
            }
        }
    }

    /// Image for `key` resampled to `size`; never fails.
    ///
    /// Misses, fetch failures and undecodable files all substitute the key's placeholder.
    pub fn image_or_placeholder(&self, key: &AssetKey, size: Size) -> ResolvedImage {
        match self.image(key) {
            Ok(img) => ResolvedImage {
                image: fit_exact(img, size),
                found: true,
            },
            Err(err) => {
                tracing::warn!(asset = %key.rel_path(), error = %err, "substituting placeholder");
                ResolvedImage {
                    image: self.placeholder_for(key, size),
                    found: false,
                }
            }
        }
    }

    fn placeholder_for(&self, key: &AssetKey, size: Size) -> RgbaImage {
        key.placeholder()
            .and_then(|fallback| self.try_image(&fallback))
            .map(|img| fit_exact(img, size))
            .unwrap_or_else(|| transparent(size))
    }
}

fn persist(path: &Path, bytes: &[u8], attempt: u64) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create cache dir '{}'", parent.display()))?;
    }
    // Concurrent renders may fetch the same cover; each writes its own part file.
    let part = path.with_extension(format!("{}.{attempt}.part", std::process::id()));
    std::fs::write(&part, bytes).with_context(|| format!("write '{}'", part.display()))?;
    std::fs::rename(&part, path).with_context(|| format!("rename into '{}'", path.display()))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
