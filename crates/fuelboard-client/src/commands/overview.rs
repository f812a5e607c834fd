use crate::ClientResult;
use crate::commands::common::{SourceOptions, load, view_report};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::views::{Selection, View};

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
    success(
        "overview",
        view_report(View::Overview, &selection, &dataset),
    )
}
