use std::time::Duration;

use crate::{
    assets::resolver::{AssetResolver, HttpFetcher},
    config::RenderConfig,
    foundation::error::{SheetError, SheetResult},
    text::fonts::FontBook,
};

/// Everything a render call reads: settings, bound fonts, the asset resolver and the worker pool.
///
/// Assembled once and shared by reference; nothing in it changes per call.
#[derive(Debug)]
pub struct RenderContext {
    config: RenderConfig,
    fonts: FontBook,
    assets: AssetResolver,
    pool: Option<rayon::ThreadPool>,
}

impl RenderContext {
    /// Load fonts and wire the asset resolver as described by `config`.
    pub fn from_config(config: RenderConfig) -> SheetResult<Self> {
        config.validate()?;
        let fonts = FontBook::load(&config.resource_root, &config.fonts)?;
        let assets = match &config.cover_base_url {
            Some(url) => AssetResolver::new(
                config.resource_root.clone(),
                HttpFetcher::new(url.clone(), Duration::from_secs(config.fetch_timeout_secs)),
            ),
            None => AssetResolver::offline(config.resource_root.clone()),
        };
        Self::new(config, fonts, assets)
    }

    pub fn new(config: RenderConfig, fonts: FontBook, assets: AssetResolver) -> SheetResult<Self> {
        let pool = if config.threading.parallel {
            Some(build_thread_pool(config.threading.threads)?)
        } else {
            None
        };
        Ok(Self {
            config,
            fonts,
            assets,
            pool,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Run `op` on the worker pool (inline when parallelism is off).
    ///
    /// [`compose_sheet`](crate::compose_sheet) installs itself. Wrap direct
    /// [`render_card`](crate::render_card) calls in this so their joins honor
    /// `threading.threads` instead of landing on rayon's global pool.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Run `a` and `b` to completion, concurrently when parallelism is on.
    pub(crate) fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        if self.is_parallel() {
            rayon::join(a, b)
        } else {
            (a(), b())
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> SheetResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SheetError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("maisheet-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SheetError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
