//! `ljpw predict`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ljpw_analysis::composition::{CompositionBreakdown, CompositionPredictor};
use ljpw_core::config::CliOverrides;
use ljpw_core::{LjpwError, LjpwProfile, StructuralFlags};

use super::{format_profile, load_config, path_string, print_json, read_json, resolve_parameters};

#[derive(Debug, Deserialize)]
struct PredictInput {
    components: Vec<LjpwProfile>,
    #[serde(default)]
    flags: StructuralFlags,
}

#[derive(Serialize)]
struct PredictOutput<'a> {
    profile: LjpwProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a CompositionBreakdown>,
}

pub fn run(input: &Path, params: Option<PathBuf>, breakdown: bool, json: bool) -> Result<(), LjpwError> {
    let config = load_config(
        Path::new("."),
        CliOverrides {
            parameters_path: path_string(params),
            ..CliOverrides::default()
        },
    )?;
    let parameters = resolve_parameters(&config)?;
    let request: PredictInput = read_json(input)?;

    let predictor = CompositionPredictor::from_config(parameters, &config.composition);
    let stages = predictor.predict_breakdown(&request.components, &request.flags);
    tracing::debug!(
        components = request.components.len(),
        flags = request.flags.count(),
        "predicted composite"
    );

    if json {
        return print_json(&PredictOutput {
            profile: stages.profile,
            breakdown: breakdown.then_some(&stages),
        });
    }

    if breakdown {
        println!("components  {}", stages.components);
        println!("flags       {}", request.flags);
        println!("base        {}", format_profile(stages.base));
        println!("coupled     {}", format_profile(stages.coupled));
        println!("bonused     {}", format_profile(stages.bonused));
        println!("harmony     +{:.3}", stages.harmony_bonus);
        println!("harmonized  {}", format_profile(stages.harmonized));
    }
    println!("{}", format_profile(stages.profile.as_array()));
    Ok(())
}
