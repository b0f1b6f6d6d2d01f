//! The prediction form: one CLI flag per survey field, with the same
//! defaults and numeric bounds as the original questionnaire.
//!
//! Categorical flags accept either canonical tokens or the localized
//! labels of the survey; the pipeline's translation stage sorts that out,
//! so no value lists are enforced at the clap level.

use anyhow::{bail, Result};
use clap::{Arg, ArgMatches};

use obesity_core::schema::{numeric_domain, InputRecord};

struct NumericFlag {
    id: &'static str,
    field: &'static str,
    help: &'static str,
    default: &'static str,
}

struct CategoricalFlag {
    id: &'static str,
    help: &'static str,
    default: &'static str,
}

const NUMERIC_FLAGS: [NumericFlag; 8] = [
    NumericFlag {
        id: "age",
        field: "Age",
        help: "Age in years",
        default: "25",
    },
    NumericFlag {
        id: "height",
        field: "Height",
        help: "Height in meters",
        default: "1.70",
    },
    NumericFlag {
        id: "weight",
        field: "Weight",
        help: "Weight in kilograms",
        default: "70.0",
    },
    NumericFlag {
        id: "fcvc",
        field: "FCVC",
        help: "Vegetable consumption frequency (1-3)",
        default: "2.0",
    },
    NumericFlag {
        id: "ncp",
        field: "NCP",
        help: "Number of main meals per day (1-4)",
        default: "3.0",
    },
    NumericFlag {
        id: "ch2o",
        field: "CH2O",
        help: "Liters of water per day (1-3)",
        default: "2.0",
    },
    NumericFlag {
        id: "faf",
        field: "FAF",
        help: "Physical activity (hours/week)",
        default: "1.0",
    },
    NumericFlag {
        id: "tue",
        field: "TUE",
        help: "Time on electronic devices (hours/day)",
        default: "1.0",
    },
];

const CATEGORICAL_FLAGS: [CategoricalFlag; 8] = [
    CategoricalFlag {
        id: "gender",
        help: "Gender (Female/Male)",
        default: "Female",
    },
    CategoricalFlag {
        id: "family-history",
        help: "Family history of obesity (yes/no)",
        default: "yes",
    },
    CategoricalFlag {
        id: "favc",
        help: "Frequent consumption of high-caloric food (yes/no)",
        default: "yes",
    },
    CategoricalFlag {
        id: "caec",
        help: "Snacking between meals (no/Sometimes/Frequently/Always)",
        default: "no",
    },
    CategoricalFlag {
        id: "smoke",
        help: "Smoker (yes/no)",
        default: "yes",
    },
    CategoricalFlag {
        id: "scc",
        help: "Monitors calorie intake (yes/no)",
        default: "yes",
    },
    CategoricalFlag {
        id: "calc",
        help: "Alcohol consumption (no/Sometimes/Frequently/Always)",
        default: "no",
    },
    CategoricalFlag {
        id: "mtrans",
        help: "Usual transportation mode",
        default: "Public_Transportation",
    },
];

/// All form flags for the `predict` subcommand.
pub fn form_args() -> Vec<Arg> {
    let mut args = Vec::with_capacity(16);
    for flag in NUMERIC_FLAGS {
        args.push(
            Arg::new(flag.id)
                .long(flag.id)
                .help(flag.help)
                .default_value(flag.default)
                .value_parser(clap::value_parser!(f32)),
        );
    }
    for flag in CATEGORICAL_FLAGS {
        args.push(
            Arg::new(flag.id)
                .long(flag.id)
                .help(flag.help)
                .default_value(flag.default),
        );
    }
    args
}

fn numeric(matches: &ArgMatches, flag: &NumericFlag) -> Result<f32> {
    let value = *matches
        .get_one::<f32>(flag.id)
        .expect("flag has a default value");
    let (min, max) = numeric_domain(flag.field);
    if !(min..=max).contains(&value) {
        bail!(
            "--{} must be between {} and {}, got {}",
            flag.id,
            min,
            max,
            value
        );
    }
    Ok(value)
}

fn categorical(matches: &ArgMatches, id: &str) -> String {
    matches
        .get_one::<String>(id)
        .expect("flag has a default value")
        .clone()
}

/// Build the raw input record from the parsed form flags, enforcing the
/// form's numeric bounds up front.
pub fn record_from_matches(matches: &ArgMatches) -> Result<InputRecord> {
    let mut values = [0.0f32; 8];
    for (slot, flag) in values.iter_mut().zip(NUMERIC_FLAGS.iter()) {
        *slot = numeric(matches, flag)?;
    }
    let [age, height, weight, fcvc, ncp, ch2o, faf, tue] = values;

    Ok(InputRecord {
        gender: categorical(matches, "gender"),
        age,
        height,
        weight,
        family_history: categorical(matches, "family-history"),
        favc: categorical(matches, "favc"),
        fcvc,
        ncp,
        caec: categorical(matches, "caec"),
        smoke: categorical(matches, "smoke"),
        ch2o,
        scc: categorical(matches, "scc"),
        faf,
        tue,
        calc: categorical(matches, "calc"),
        mtrans: categorical(matches, "mtrans"),
    })
}
