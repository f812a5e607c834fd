use crate::ClientResult;
use crate::commands::common::{SourceOptions, load};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CategoriesData;
use crate::dataset::ALL_CATEGORIES;

pub fn run(data_path: Option<&str>, delimiter: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SourceOptions::new(data_path, delimiter))
}

#[doc(hidden)]
pub fn run_with_options(options: SourceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let dataset = load(&options)?;
    let data = CategoriesData {
        source: dataset.source_label().to_string(),
        default: ALL_CATEGORIES.to_string(),
        options: dataset.category_options(),
    };
    success("categories", data)
}
