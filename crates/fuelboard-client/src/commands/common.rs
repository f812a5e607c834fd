use std::sync::Arc;

use tracing::debug;

use crate::ClientResult;
use crate::config::DatasetConfig;
use crate::contracts::types::ViewReport;
use crate::dataset::Dataset;
use crate::dataset::cache::{self, DatasetCache};
use crate::views::{Selection, View, ViewResult, render};

/// Where a command reads its dataset from. Unset fields fall back to the
/// environment and then to the defaults in [`crate::config`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions<'a> {
    pub data_path: Option<&'a str>,
    pub delimiter: Option<&'a str>,
    pub cache: Option<&'a DatasetCache>,
}

impl<'a> SourceOptions<'a> {
    pub fn new(data_path: Option<&'a str>, delimiter: Option<&'a str>) -> Self {
        Self {
            data_path,
            delimiter,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: &'a DatasetCache) -> Self {
        self.cache = Some(cache);
        self
    }
}

pub(crate) fn load(options: &SourceOptions<'_>) -> ClientResult<Arc<Dataset>> {
    let config = DatasetConfig::resolve(options.data_path, options.delimiter)?;
    let cache = match options.cache {
        Some(cache) => cache,
        None => cache::global(),
    };
    cache.get_or_load(&config)
}

pub(crate) fn view_report(
    view: View,
    selection: &Selection,
    dataset: &Dataset,
) -> ViewReport<ViewResult> {
    debug!(view = view.title(), selection = selection.label(), "rendering view");
    ViewReport {
        source: dataset.source_label().to_string(),
        title: view.title().to_string(),
        data: render(view, selection, dataset),
    }
}
