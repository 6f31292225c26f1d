use std::path::Path;

use anyhow::{Context, Result};

use sbs_selector::{build_model, SelectionResult, SequentialBackwardSelector};

use crate::select::input::SelectConfig;
use crate::select::load_data::{load_tabular_data, TabularData};

/// Outputs of a command-line selection run.
#[derive(Debug)]
pub struct SelectOutcome {
    pub data: TabularData,
    pub result: SelectionResult,
}

/// Load `data_path` and run backward selection with the configured model.
pub fn run_selection<P: AsRef<Path>>(data_path: P, config: &SelectConfig) -> Result<SelectOutcome> {
    let data = load_tabular_data(&data_path, config.target_column.as_deref())?;
    let result = select_on(&data, config)?;
    Ok(SelectOutcome { data, result })
}

/// Run backward selection on already loaded data.
pub fn select_on(data: &TabularData, config: &SelectConfig) -> Result<SelectionResult> {
    let model = build_model(config.model.clone());
    let mut selector = SequentialBackwardSelector::new(model, config.selector.clone())
        .context("Invalid selector configuration")?;

    selector
        .run(data.x.view(), data.y.view())
        .context("Backward selection failed")?;

    let result = selector.best_features().clone();
    if let Some(best) = result.best() {
        log::info!(
            "Best subset: {} features, score {:.6}: {:?}",
            best.feature_count(),
            best.score(),
            data.names_for(best.features().as_slice())
        );
    }
    Ok(result)
}
