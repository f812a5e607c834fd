use crate::ClientResult;
use crate::commands::common::{SourceOptions, load, view_report};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::views::{Selection, View};

pub fn run(data_path: Option<&str>, delimiter: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(data_path, delimiter))
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let dataset = load(&options)?;
    success(
        "overconsumption",
        view_report(View::Overconsumption, &Selection::All, &dataset),
    )
}
