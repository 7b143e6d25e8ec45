//! Wiring of the pipeline components.

use crate::AtelierConfig;
use atelier_cache::DecodeCache;
use atelier_client::{ContentTransport, Dialogs, LoadingSignal, RecordService, ReqwestTransport};
use atelier_codec::Codec;
use atelier_error::AtelierResult;
use atelier_present::PresentationAdapter;
use atelier_upload::UploadAssembler;
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// One shared decode cache behind both the record service and the
/// presentation adapter, so images decoded for display are reused when a
/// record is resubmitted.
#[derive(Debug)]
pub struct Atelier {
    config: AtelierConfig,
    cache: Arc<DecodeCache>,
    service: RecordService,
    presenter: PresentationAdapter,
}

impl Atelier {
    /// Wire components from configuration around the given collaborators.
    #[instrument(skip_all, fields(base_url = %config.api().base_url()))]
    pub fn new(
        config: AtelierConfig,
        transport: Arc<dyn ContentTransport>,
        dialogs: Arc<dyn Dialogs>,
        loading: Arc<dyn LoadingSignal>,
    ) -> Self {
        let codec = Codec::new(config.codec().clone());
        let cache = Arc::new(DecodeCache::with_decoder(
            config.cache().clone(),
            codec.clone(),
        ));
        let endpoints: HashMap<_, _> = atelier_core::ContentKind::iter()
            .map(|kind| (kind, config.endpoint(kind)))
            .collect();

        let service = RecordService::new(transport, dialogs, loading, Arc::clone(&cache))
            .with_codec(codec)
            .with_assembler(UploadAssembler::new(config.upload().clone()))
            .with_endpoints(endpoints);
        let presenter = PresentationAdapter::new(Arc::clone(&cache));

        info!(endpoints = config.endpoints().len(), "Atelier initialized");
        Self {
            config,
            cache,
            service,
            presenter,
        }
    }

    /// Wire components around a `reqwest` transport built from `config.api`.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn connect(
        config: AtelierConfig,
        dialogs: Arc<dyn Dialogs>,
        loading: Arc<dyn LoadingSignal>,
    ) -> AtelierResult<Self> {
        let transport = ReqwestTransport::new(config.api())?;
        Ok(Self::new(config, Arc::new(transport), dialogs, loading))
    }

    /// Effective configuration.
    pub fn config(&self) -> &AtelierConfig {
        &self.config
    }

    /// Shared decode cache.
    pub fn cache(&self) -> &Arc<DecodeCache> {
        &self.cache
    }

    /// Create/update/toggle/delete call sites.
    pub fn service(&self) -> &RecordService {
        &self.service
    }

    /// Thumbnail, gallery and row views.
    pub fn presenter(&self) -> &PresentationAdapter {
        &self.presenter
    }
}
