pub mod form;

use anyhow::{Context, Result};

use obesity_core::pipeline::Pipeline;
use obesity_core::schema::InputRecord;

/// Load the artifact bundle and serve one prediction for the submitted
/// form row. Artifact loading failures are fatal and happen before the
/// form input is looked at; per-request failures bubble up as a single
/// printable error.
pub fn run_predict(artifacts_dir: &str, record: &InputRecord) -> Result<()> {
    let pipeline = Pipeline::load(artifacts_dir)
        .with_context(|| format!("Cannot serve predictions without artifacts in {}", artifacts_dir))?;

    let prediction = pipeline.run(record)?;
    println!("Predicted obesity level: {}", prediction.label);
    println!("{}", prediction.explanation);
    Ok(())
}
