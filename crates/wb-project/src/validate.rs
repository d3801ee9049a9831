//! Scenario validation logic.

use std::collections::{HashMap, HashSet};

use wb_core::WbError;
use wb_core::units::sqm;
use wb_elements::{ElementKind, Garden};
use wb_elements::registry::garden_fractions;

use crate::schema::{LATEST_VERSION, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Measure '{id}' feeds '{target}', which is not declared after it")]
    BackwardConnection { id: String, target: String },

    #[error("No valid elements: at least one element needs a positive area")]
    NoElements,

    #[error("Partition fractions of garden '{id}' sum to {sum}, expected 1.0")]
    GardenFractions { id: String, sum: f64 },

    #[error("Invalid {context}: {source}")]
    Parameter {
        context: String,
        #[source]
        source: WbError,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

impl From<ValidationError> for WbError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Parameter { source, .. } => source,
            other => WbError::configuration(other.to_string()),
        }
    }
}

fn parameter(context: String) -> impl FnOnce(WbError) -> ValidationError {
    move |source| ValidationError::Parameter { context, source }
}

/// Check a scenario before anything is computed.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    scenario
        .climate
        .study_area()
        .map_err(parameter("climate".to_string()))?;

    let mut measure_pos: HashMap<&str, usize> = HashMap::new();
    for (idx, measure) in scenario.measures.iter().enumerate() {
        if measure_pos.insert(measure.id.as_str(), idx).is_some() {
            return Err(ValidationError::DuplicateId {
                id: measure.id.clone(),
                context: "measures".to_string(),
            });
        }
    }

    let mut element_ids = HashSet::new();
    for element in &scenario.elements {
        if !element_ids.insert(element.id.as_str()) || measure_pos.contains_key(element.id.as_str())
        {
            return Err(ValidationError::DuplicateId {
                id: element.id.clone(),
                context: "elements".to_string(),
            });
        }
        if let Some(target) = &element.connect_to {
            if !measure_pos.contains_key(target.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: target.clone(),
                    context: format!("connect_to of element '{}'", element.id),
                });
            }
        }
    }

    for (idx, measure) in scenario.measures.iter().enumerate() {
        let Some(target) = &measure.connect_to else {
            continue;
        };
        match measure_pos.get(target.as_str()) {
            None => {
                return Err(ValidationError::MissingReference {
                    id: target.clone(),
                    context: format!("connect_to of measure '{}'", measure.id),
                });
            }
            Some(&pos) if pos <= idx => {
                return Err(ValidationError::BackwardConnection {
                    id: measure.id.clone(),
                    target: target.clone(),
                });
            }
            Some(_) => {}
        }
    }

    let mut active = 0usize;
    for element in &scenario.elements {
        let context = format!("element '{}'", element.id);
        let area = element
            .params
            .require_number("area")
            .map_err(parameter(context.clone()))?;
        if area == 0.0 {
            continue;
        }
        if element.kind == ElementKind::Garden {
            let (a, g, v) = garden_fractions(&element.params).map_err(parameter(context.clone()))?;
            let garden = Garden::new(&element.id, sqm(area), a, g, v)
                .map_err(parameter(context.clone()))?;
            let sum = garden.fraction_sum();
            if sum != 1.0 {
                return Err(ValidationError::GardenFractions {
                    id: element.id.clone(),
                    sum,
                });
            }
        }
        element
            .kind
            .build(&element.id, &element.params)
            .map_err(parameter(context))?;
        active += 1;
    }
    if active == 0 {
        return Err(ValidationError::NoElements);
    }

    for measure in &scenario.measures {
        measure
            .kind
            .build(&measure.id, &measure.params)
            .map_err(parameter(format!("measure '{}'", measure.id)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClimateDef, ElementDef, MeasureDef};
    use wb_elements::{MeasureKind, ParamValues};

    fn roof(id: &str, area: f64) -> ElementDef {
        ElementDef::new(id, ElementKind::Roof, ParamValues::new().with("area", area))
    }

    fn swale(id: &str) -> MeasureDef {
        MeasureDef::new(id, MeasureKind::InfiltSwale, ParamValues::new().with("kf", 100.0))
    }

    fn scenario(elements: Vec<ElementDef>, measures: Vec<MeasureDef>) -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "test".to_string(),
            climate: ClimateDef::explicit(800.0, 500.0),
            elements,
            measures,
        }
    }

    #[test]
    fn valid_scenario() {
        let s = scenario(
            vec![roof("r1", 100.0), roof("r2", 50.0).connected_to("s1")],
            vec![swale("s1")],
        );
        validate_scenario(&s).unwrap();
    }

    #[test]
    fn duplicate_ids() {
        let s = scenario(vec![roof("r1", 100.0), roof("r1", 50.0)], vec![]);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::DuplicateId { .. })
        ));
        let s = scenario(vec![roof("s1", 100.0)], vec![swale("s1")]);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn dangling_connection() {
        let s = scenario(vec![roof("r1", 100.0).connected_to("nowhere")], vec![]);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn measures_only_feed_later_measures() {
        let s = scenario(
            vec![roof("r1", 100.0).connected_to("s1")],
            vec![swale("s1").connected_to("s1")],
        );
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::BackwardConnection { .. })
        ));
        let s = scenario(
            vec![roof("r1", 100.0).connected_to("s2")],
            vec![swale("s1"), swale("s2").connected_to("s1")],
        );
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::BackwardConnection { .. })
        ));
    }

    #[test]
    fn zero_area_elements_do_not_count() {
        let s = scenario(vec![roof("r1", 0.0)], vec![]);
        let err = validate_scenario(&s).unwrap_err();
        assert!(matches!(err, ValidationError::NoElements));
        assert!(matches!(WbError::from(err), WbError::Configuration { .. }));
        assert!(matches!(
            validate_scenario(&scenario(vec![], vec![])),
            Err(ValidationError::NoElements)
        ));
    }

    #[test]
    fn garden_fractions_must_sum_to_one() {
        let params = ParamValues::new()
            .with("area", 100.0)
            .with("a", 0.3)
            .with("g", 0.3)
            .with("v", 0.6);
        let s = scenario(vec![ElementDef::new("g1", ElementKind::Garden, params)], vec![]);
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::GardenFractions { .. })
        ));

        let params = ParamValues::new()
            .with("area", 100.0)
            .with("a", 0.334)
            .with("g", 0.333)
            .with("v", 0.333);
        let s = scenario(vec![ElementDef::new("g1", ElementKind::Garden, params)], vec![]);
        validate_scenario(&s).unwrap();
    }

    #[test]
    fn garden_sum_is_rounded_before_the_check() {
        let garden = |v: f64| {
            let params = ParamValues::new()
                .with("area", 50.0)
                .with("a", 0.3)
                .with("g", 0.1)
                .with("v", v);
            scenario(vec![ElementDef::new("g1", ElementKind::Garden, params)], vec![])
        };
        match validate_scenario(&garden(0.594)) {
            Err(ValidationError::GardenFractions { id, sum }) => {
                assert_eq!(id, "g1");
                assert_eq!(sum, 0.99);
            }
            other => panic!("expected GardenFractions, got {other:?}"),
        }
        validate_scenario(&garden(0.596)).unwrap();
    }

    #[test]
    fn parameter_errors_keep_their_kind() {
        let params = ParamValues::new().with("area", 100.0).with("sp", 9.0);
        let s = scenario(vec![ElementDef::new("r1", ElementKind::Roof, params)], vec![]);
        let err = validate_scenario(&s).unwrap_err();
        assert!(err.to_string().contains("element 'r1'"));
        assert!(WbError::from(err).is_range());
    }

    #[test]
    fn climate_must_be_unambiguous() {
        let mut s = scenario(vec![roof("r1", 100.0)], vec![]);
        s.climate.place = Some("Berlin".to_string());
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::Parameter { .. })
        ));
    }

    #[test]
    fn unsupported_version() {
        let mut s = scenario(vec![roof("r1", 100.0)], vec![]);
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
