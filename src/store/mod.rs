pub mod builder;
pub mod catalog;
pub mod refresher;

use crate::core::error::BuildError;
use crate::core::metrics::MetricSource;
use crate::core::quote::QuoteSnapshot;
use crate::core::rows::RowSource;
use catalog::{AssetCatalog, CurrencyCatalog, KeyKind};
use once_cell::sync::OnceCell;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// One complete generation of quote snapshots, stored by catalog position.
#[derive(Debug, Default)]
pub struct QuoteBook {
    assets: Vec<QuoteSnapshot>,
    currencies: Vec<QuoteSnapshot>,
}

impl QuoteBook {
    fn generate(metrics: &dyn MetricSource, assets: usize, currencies: usize) -> Self {
        Self {
            assets: (0..assets).map(|_| metrics.quote()).collect(),
            currencies: (0..currencies).map(|_| metrics.quote()).collect(),
        }
    }
}

struct Catalogs {
    assets: AssetCatalog,
    currencies: CurrencyCatalog,
    quotes: RwLock<Arc<QuoteBook>>,
}

/// The process-wide market data store.
///
/// Catalogs are built at most once. Quotes are double-buffered: a refresh
/// generates a whole new [`QuoteBook`] and swaps it in, and readers hold on
/// to the book they started with.
pub struct Store {
    metrics: Arc<dyn MetricSource>,
    catalogs: OnceCell<Catalogs>,
}

impl Store {
    pub fn new(metrics: Arc<dyn MetricSource>) -> Self {
        Self {
            metrics,
            catalogs: OnceCell::new(),
        }
    }

    /// Builds the catalogs from `source` unless already built.
    ///
    /// Concurrent callers wait for the first one. On error nothing is kept
    /// and a later call may try again.
    pub fn build(&self, source: &dyn RowSource) -> Result<(), BuildError> {
        if self.is_built() {
            debug!("Catalogs already built");
            return Ok(());
        }

        self.catalogs.get_or_try_init(|| {
            let asset_rows = source.asset_rows()?;
            let currency_rows = source.currency_rows()?;

            let assets = builder::build_assets(&asset_rows, self.metrics.as_ref());
            let currencies = builder::build_currencies(&currency_rows);
            let quotes = QuoteBook::generate(self.metrics.as_ref(), assets.len(), currencies.len());
            info!(
                assets = assets.len(),
                currencies = currencies.len(),
                "Market data prepared"
            );

            Ok::<_, BuildError>(Catalogs {
                assets,
                currencies,
                quotes: RwLock::new(Arc::new(quotes)),
            })
        })?;
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.catalogs.get().is_some()
    }

    /// Replaces every snapshot in both catalogs. A no-op before the build.
    pub fn refresh(&self) {
        let Some(catalogs) = self.catalogs.get() else {
            debug!("Refresh skipped, catalogs not built");
            return;
        };

        let book = QuoteBook::generate(
            self.metrics.as_ref(),
            catalogs.assets.len(),
            catalogs.currencies.len(),
        );
        *catalogs
            .quotes
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(book);
        debug!("Quotes refreshed");
    }

    /// A consistent read view, or `None` before the build.
    pub fn view(&self) -> Option<View<'_>> {
        let catalogs = self.catalogs.get()?;
        let quotes = Arc::clone(
            &catalogs
                .quotes
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        );
        Some(View {
            assets: &catalogs.assets,
            currencies: &catalogs.currencies,
            quotes,
        })
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Store");
        match self.catalogs.get() {
            Some(catalogs) => debug
                .field("assets", &catalogs.assets.len())
                .field("currencies", &catalogs.currencies.len()),
            None => debug.field("built", &false),
        };
        debug.finish_non_exhaustive()
    }
}

/// Catalogs plus the quote generation current when the view was taken.
pub struct View<'a> {
    pub assets: &'a AssetCatalog,
    pub currencies: &'a CurrencyCatalog,
    quotes: Arc<QuoteBook>,
}

impl View<'_> {
    pub fn asset_quote(&self, pos: usize) -> Option<&QuoteSnapshot> {
        self.quotes.assets.get(pos)
    }

    pub fn currency_quote(&self, pos: usize) -> Option<&QuoteSnapshot> {
        self.quotes.currencies.get(pos)
    }

    /// Resolves a conversion target, fiat currencies first, then assets.
    pub fn target_quote(&self, kind: KeyKind, literal: &str) -> Option<&QuoteSnapshot> {
        match self.currencies.resolve(kind, literal) {
            Some(pos) => self.currency_quote(pos),
            None => self
                .assets
                .resolve(kind, literal)
                .and_then(|pos| self.asset_quote(pos)),
        }
    }
}
