use crate::core::config::{LoaderOptions, MapOptions, MapOptionsPatch};
use crate::provider::{MapProvider, ProviderLoader, Surface};
use crate::{Result, ViewportError};
use futures::lock::Mutex;
use once_cell::unsync::OnceCell;
use std::rc::Rc;

type MapOf<L> = <<L as ProviderLoader>::Provider as MapProvider>::Map;

/// Loads the provider library once and builds map instances from it.
///
/// This is the only component that touches display surfaces.
pub struct MapBootstrapper<L: ProviderLoader> {
    loader: L,
    loader_options: LoaderOptions,
    provider: OnceCell<Rc<L::Provider>>,
    /// Held for the duration of a load so concurrent callers join it
    loading: Mutex<()>,
}

impl<L: ProviderLoader> MapBootstrapper<L> {
    pub fn new(loader: L, loader_options: LoaderOptions) -> Self {
        Self {
            loader,
            loader_options,
            provider: OnceCell::new(),
            loading: Mutex::new(()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.provider.get().is_some()
    }

    /// The loaded provider, fetching the library on first use.
    ///
    /// Overlapping callers share a single load. A failed load is not cached;
    /// the next caller tries again.
    pub async fn provider(&self, api_key: &str) -> Result<Rc<L::Provider>> {
        if let Some(provider) = self.provider.get() {
            return Ok(provider.clone());
        }

        let _loading = self.loading.lock().await;
        if let Some(provider) = self.provider.get() {
            return Ok(provider.clone());
        }

        log::info!(
            "Loading map provider library (version {})",
            self.loader_options.version
        );
        let provider = Rc::new(self.loader.load(api_key, &self.loader_options).await?);
        Ok(self.provider.get_or_init(|| provider).clone())
    }

    /// Builds a map bound to `target` with `options` merged over the defaults.
    ///
    /// The target is checked before anything is loaded.
    pub async fn bootstrap(
        &self,
        api_key: &str,
        target: Option<&Surface>,
        options: MapOptionsPatch,
    ) -> Result<(Rc<L::Provider>, MapOf<L>)> {
        let surface = match target {
            Some(surface) if surface.attached => surface,
            Some(surface) => {
                return Err(ViewportError::MissingElement(format!(
                    "#{} is not attached",
                    surface.id
                )))
            }
            None => {
                return Err(ViewportError::MissingElement(
                    "no element for the map".to_string(),
                ))
            }
        };
        if api_key.trim().is_empty() {
            return Err(ViewportError::Config("empty provider API key".to_string()));
        }

        let provider = self.provider(api_key).await?;
        let options = MapOptions::default().merge(options);
        let map = provider.create_map(surface, &options)?;
        log::info!("Map constructed on #{} (zoom {})", surface.id, options.zoom);

        Ok((provider, map))
    }
}
