use crate::ClientResult;
use crate::commands::common::{SourceOptions, load, view_report};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::DashData;
use crate::views::{Selection, View};

/// Every view against one load of the dataset. The category only narrows the overview.
pub fn run(
    category: Option<&str>,
    data_path: Option<&str>,
    delimiter: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(category, SourceOptions::new(data_path, delimiter))
}

#[doc(hidden)]
pub fn run_with_options(
    category: Option<&str>,
    options: SourceOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let dataset = load(&options)?;
    let selection = Selection::from_option(category);
    let data = DashData {
        source: dataset.source_label().to_string(),
        selection: selection.label().to_string(),
        views: View::ALL
            .iter()
            .map(|view| view_report(*view, &selection, &dataset))
            .collect(),
    };
    success("dash", data)
}
