//! Registry of element and measure kinds.
//!
//! Every kind advertises its identifier, labels, documentation and the
//! parameters it takes, so a generic front end can render an input form
//! and build the formula object from named values.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wb_core::units::sqm;
use wb_core::{ParameterRange, WbError, WbResult};

use crate::measure::{
    Drainage, DrainageType, InfiltrationSwale, PondSystem, RainwaterUsage, SurfaceInfiltration,
    SwaleTrench, SwaleTrenchSystem,
};
use crate::surface::{
    FlatArea, Garden, GardenSlope, GravelCover, GreenRoof, GreenRoofShallow, PaverStonegrid,
    PermeableSurface, PorousSurface, Roof, StorageRoof,
};
use crate::traits::{Measure, SurfaceElement};

/// Default of a parameter when the caller leaves it out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Required,
    Number(f64),
    Text(&'static str),
    /// Standard value estimated from other parameters.
    Derived(&'static str),
}

/// Description of one named parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub doc: &'static str,
    pub default: ParamDefault,
    /// Key into the validity range table.
    pub range: Option<&'static str>,
}

impl ParamSpec {
    const fn new(
        name: &'static str,
        unit: &'static str,
        doc: &'static str,
        default: ParamDefault,
        range: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            unit,
            doc,
            default,
            range,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self.default, ParamDefault::Required)
    }

    pub fn validity(&self) -> Option<&'static ParameterRange> {
        self.range.and_then(|r| wb_core::ranges::lookup(r).ok())
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.unit.is_empty() {
            write!(f, " [{}]", self.unit)?;
        }
        match self.default {
            ParamDefault::Required => write!(f, " (required)")?,
            ParamDefault::Number(v) => write!(f, " = {v}")?,
            ParamDefault::Text(s) => write!(f, " = {s}")?,
            ParamDefault::Derived(how) => write!(f, " = standard value ({how})")?,
        }
        if let Some(r) = self.validity() {
            write!(f, ", valid {} - {}", r.min, r.max)?;
        }
        write!(f, ": {}", self.doc)
    }
}

/// A supplied parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// Named parameter values of one element or measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, ParamValue>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Optional numeric parameter.
    pub fn number(&self, name: &str) -> WbResult<Option<f64>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(ParamValue::Number(v)) => Ok(Some(*v)),
            Some(ParamValue::Text(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
                WbError::configuration(format!("parameter '{name}' expects a number, got '{s}'"))
            }),
        }
    }

    pub fn require_number(&self, name: &str) -> WbResult<f64> {
        self.number(name)?
            .ok_or_else(|| WbError::configuration(format!("missing required parameter '{name}'")))
    }

    /// Optional text parameter.
    pub fn text(&self, name: &str) -> WbResult<Option<&str>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(ParamValue::Text(s)) => Ok(Some(s.as_str())),
            Some(ParamValue::Number(v)) => Err(WbError::configuration(format!(
                "parameter '{name}' expects text, got {v}"
            ))),
        }
    }

    pub fn require_text(&self, name: &str) -> WbResult<&str> {
        self.text(name)?
            .ok_or_else(|| WbError::configuration(format!("missing required parameter '{name}'")))
    }

    /// Reject names `specs` does not declare, and missing required ones.
    pub fn check_against(&self, owner: &str, specs: &[ParamSpec]) -> WbResult<()> {
        if let Some(unknown) = self.names().find(|n| !specs.iter().any(|s| s.name == *n)) {
            return Err(WbError::configuration(format!(
                "unknown parameter '{unknown}' for {owner}"
            )));
        }
        if let Some(missing) = specs
            .iter()
            .find(|s| s.is_required() && self.get(s.name).is_none())
        {
            return Err(WbError::configuration(format!(
                "missing required parameter '{}' for {owner}",
                missing.name
            )));
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

use ParamDefault::{Derived, Number, Required, Text};

const AREA: ParamSpec = ParamSpec::new("area", "m2", "element area", Required, None);

#[rustfmt::skip]
const GARDEN_PARAMS: [ParamSpec; 5] = [
    AREA,
    ParamSpec::new("slope", "", "terrain slope class: low, medium or steep", Text("medium"), None),
    ParamSpec::new("a", "-", "runoff fraction", Derived("slope class"), Some("a_garden")),
    ParamSpec::new("g", "-", "groundwater recharge fraction", Derived("slope class"), Some("g_garden")),
    ParamSpec::new("v", "-", "evapotranspiration fraction", Derived("slope class"), Some("v_garden")),
];
#[rustfmt::skip]
const ROOF_PARAMS: [ParamSpec; 2] = [
    AREA,
    ParamSpec::new("sp", "mm", "storage height (0.6 for smooth glass or metal)", Number(Roof::STANDARD_SP), Some("Sp_roof")),
];
#[rustfmt::skip]
const FLAT_AREA_PARAMS: [ParamSpec; 2] = [
    AREA,
    ParamSpec::new("sp", "mm", "storage height", Number(FlatArea::STANDARD_SP), Some("Sp_flat_area")),
];
#[rustfmt::skip]
const GREEN_ROOF_PARAMS: [ParamSpec; 4] = [
    AREA,
    ParamSpec::new("h", "mm", "installation height", Required, Some("h_green_roof")),
    ParamSpec::new("fg", "-", "greening factor", Number(GreenRoof::STANDARD_FG), Some("fg_green_roof")),
    ParamSpec::new("awc", "-", "available water capacity (WKmax - WP)", Number(GreenRoof::STANDARD_AWC), Some("AWC_green_roof")),
];
const AREA_ONLY: [ParamSpec; 1] = [AREA];
#[rustfmt::skip]
const STORAGE_ROOF_PARAMS: [ParamSpec; 2] = [
    AREA,
    ParamSpec::new("sp", "mm", "storage height", Number(StorageRoof::STANDARD_SP), Some("Sp_storage_roof")),
];
#[rustfmt::skip]
const PERMEABLE_PARAMS: [ParamSpec; 5] = [
    AREA,
    ParamSpec::new("fa", "%", "joint ratio (2-5 or 6-10)", Required, Some("FA_permeable_surface")),
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Derived("18 below 6 % joints, else 36"), Some("kf_permeable_surface")),
    ParamSpec::new("sp", "mm", "storage height", Number(PermeableSurface::STANDARD_SP), Some("Sp_permeable_surface")),
    ParamSpec::new("wkmax_wp", "-", "difference WKmax - WP", Number(PermeableSurface::STANDARD_WKMAX_WP), Some("WKmax_WP_permeable_surface")),
];
#[rustfmt::skip]
const POROUS_PARAMS: [ParamSpec; 4] = [
    AREA,
    ParamSpec::new("sp", "mm", "storage height", Number(PorousSurface::STANDARD_SP), Some("Sp_porous_surface")),
    ParamSpec::new("h", "mm", "installation height", Number(PorousSurface::STANDARD_H), Some("h_porous_surface")),
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Number(PorousSurface::STANDARD_KF), Some("kf_porous_surface")),
];
#[rustfmt::skip]
const PAVER_PARAMS: [ParamSpec; 4] = [
    AREA,
    ParamSpec::new("fa", "%", "joint ratio", Number(PaverStonegrid::STANDARD_FA), Some("FA_paver_stonegrid")),
    ParamSpec::new("sp", "mm", "storage height", Number(PaverStonegrid::STANDARD_SP), Some("Sp_paver_stonegrid")),
    ParamSpec::new("wkmax_wp", "-", "difference WKmax - WP", Number(PaverStonegrid::STANDARD_WKMAX_WP), Some("WKmax_WP_paver_stonegrid")),
];
#[rustfmt::skip]
const GRAVEL_PARAMS: [ParamSpec; 4] = [
    AREA,
    ParamSpec::new("h", "mm", "installation height", Number(GravelCover::STANDARD_H), Some("h_gravel_cover")),
    ParamSpec::new("sp", "mm", "storage height", Number(GravelCover::STANDARD_SP), Some("Sp_gravel_cover")),
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Number(GravelCover::STANDARD_KF), Some("kf_gravel_cover")),
];

/// Surface element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Garden,
    Roof,
    FlatArea,
    GreenRoof,
    GreenRoofShallow,
    StorageRoof,
    PermeableSurface,
    PorousSurface,
    PaverStonegrid,
    GravelCover,
}

impl ElementKind {
    pub const ALL: [ElementKind; 10] = [
        ElementKind::Garden,
        ElementKind::Roof,
        ElementKind::FlatArea,
        ElementKind::GreenRoof,
        ElementKind::GreenRoofShallow,
        ElementKind::StorageRoof,
        ElementKind::PermeableSurface,
        ElementKind::PorousSurface,
        ElementKind::PaverStonegrid,
        ElementKind::GravelCover,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ElementKind::Garden => "garden",
            ElementKind::Roof => "roof",
            ElementKind::FlatArea => "flat_area",
            ElementKind::GreenRoof => "green_roof",
            ElementKind::GreenRoofShallow => "green_roof_shallow",
            ElementKind::StorageRoof => "storage_roof",
            ElementKind::PermeableSurface => "permeable_surface",
            ElementKind::PorousSurface => "porous_surface",
            ElementKind::PaverStonegrid => "paver_stonegrid",
            ElementKind::GravelCover => "gravel_cover",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Garden => "Garden / green area",
            ElementKind::Roof => "Roof",
            ElementKind::FlatArea => "Flat area",
            ElementKind::GreenRoof => "Green roof",
            ElementKind::GreenRoofShallow => "Green roof shallow",
            ElementKind::StorageRoof => "Storage roof",
            ElementKind::PermeableSurface => "Permeable surface",
            ElementKind::PorousSurface => "Porous surface",
            ElementKind::PaverStonegrid => "Paver stone-grid",
            ElementKind::GravelCover => "Gravel cover",
        }
    }

    pub fn label_de(self) -> &'static str {
        match self {
            ElementKind::Garden => "Gärten",
            ElementKind::Roof => "Steildach",
            ElementKind::FlatArea => "Versiegelte Fläche",
            ElementKind::GreenRoof => "Grünes Dach",
            ElementKind::GreenRoofShallow => "Grünes Dach (minimal)",
            ElementKind::StorageRoof => "Einstaudach",
            ElementKind::PermeableSurface => "Teildurchlässige Flächenbeläge",
            ElementKind::PorousSurface => "Poren-/Sickersteine, Schotter",
            ElementKind::PaverStonegrid => "Rasengittersteine",
            ElementKind::GravelCover => "Wassergebundene Decke",
        }
    }

    pub fn doc(self) -> &'static str {
        match self {
            ElementKind::Garden => {
                "Unpaved or green area with directly given fractions; standard values by terrain slope."
            }
            ElementKind::Roof => "Pitched roof of any material, or flat roof with a smooth surface.",
            ElementKind::FlatArea => "Sealed flat area (asphalt, concrete, sealed joints).",
            ElementKind::GreenRoof => "Extensive or intensive green roof.",
            ElementKind::GreenRoofShallow => "Green roof with less than 4 cm build-up.",
            ElementKind::StorageRoof => "Flat roof with permanent water storage.",
            ElementKind::PermeableSurface => "Paving with open joints, joint ratio 2-5 % or 6-10 %.",
            ElementKind::PorousSurface => "Porous or seepage stones, gravel lawn.",
            ElementKind::PaverStonegrid => "Lawn pavers and grid stones.",
            ElementKind::GravelCover => "Water-bound surface or gravel cover.",
        }
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            ElementKind::Garden => &GARDEN_PARAMS,
            ElementKind::Roof => &ROOF_PARAMS,
            ElementKind::FlatArea => &FLAT_AREA_PARAMS,
            ElementKind::GreenRoof => &GREEN_ROOF_PARAMS,
            ElementKind::GreenRoofShallow => &AREA_ONLY,
            ElementKind::StorageRoof => &STORAGE_ROOF_PARAMS,
            ElementKind::PermeableSurface => &PERMEABLE_PARAMS,
            ElementKind::PorousSurface => &POROUS_PARAMS,
            ElementKind::PaverStonegrid => &PAVER_PARAMS,
            ElementKind::GravelCover => &GRAVEL_PARAMS,
        }
    }

    /// Construct the element, validating every parameter.
    pub fn build(self, name: &str, values: &ParamValues) -> WbResult<Box<dyn SurfaceElement>> {
        values.check_against(self.id(), self.params())?;
        let area = sqm(values.require_number("area")?);
        let num = |key: &str| values.number(key);

        let element: Box<dyn SurfaceElement> = match self {
            ElementKind::Garden => {
                let (a, g, v) = garden_fractions(values)?;
                Box::new(Garden::new(name, area, a, g, v)?)
            }
            ElementKind::Roof => Box::new(Roof::new(
                name,
                area,
                num("sp")?.unwrap_or(Roof::STANDARD_SP),
            )?),
            ElementKind::FlatArea => Box::new(FlatArea::new(
                name,
                area,
                num("sp")?.unwrap_or(FlatArea::STANDARD_SP),
            )?),
            ElementKind::GreenRoof => Box::new(GreenRoof::new(
                name,
                area,
                values.require_number("h")?,
                num("fg")?,
                num("awc")?,
            )?),
            ElementKind::GreenRoofShallow => Box::new(GreenRoofShallow::new(name, area)?),
            ElementKind::StorageRoof => Box::new(StorageRoof::new(
                name,
                area,
                num("sp")?.unwrap_or(StorageRoof::STANDARD_SP),
            )?),
            ElementKind::PermeableSurface => Box::new(PermeableSurface::new(
                name,
                area,
                values.require_number("fa")?,
                num("kf")?,
                num("sp")?,
                num("wkmax_wp")?,
            )?),
            ElementKind::PorousSurface => Box::new(PorousSurface::new(
                name,
                area,
                num("sp")?,
                num("h")?,
                num("kf")?,
            )?),
            ElementKind::PaverStonegrid => Box::new(PaverStonegrid::new(
                name,
                area,
                num("fa")?,
                num("sp")?,
                num("wkmax_wp")?,
            )?),
            ElementKind::GravelCover => Box::new(GravelCover::new(
                name,
                area,
                num("h")?,
                num("sp")?,
                num("kf")?,
            )?),
        };
        Ok(element)
    }
}

/// Garden (a, g, v): explicit values, falling back to the slope preset.
pub fn garden_fractions(values: &ParamValues) -> WbResult<(f64, f64, f64)> {
    let slope = match values.text("slope")? {
        Some(s) => s.parse::<GardenSlope>()?,
        None => GardenSlope::default(),
    };
    let (a, g, v) = slope.fractions();
    Ok((
        values.number("a")?.unwrap_or(a),
        values.number("g")?.unwrap_or(g),
        values.number("v")?.unwrap_or(v),
    ))
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ElementKind {
    type Err = WbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ElementKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| WbError::unknown_category("element kind", s))
    }
}

const FA_STANDARD: &str = "estimated from kf";

const DRAINAGE_PARAMS: [ParamSpec; 1] = [ParamSpec::new(
    "type",
    "",
    "pipe, channel, steep ditch or ditch with vegetation (English or German)",
    Required,
    None,
)];
#[rustfmt::skip]
const SURF_INFILTRATION_PARAMS: [ParamSpec; 2] = [
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Required, Some("kf_surf_infiltration")),
    ParamSpec::new("fasf", "%", "infiltration area relative to the contributing area", Derived(FA_STANDARD), None),
];
#[rustfmt::skip]
const INFILT_SWALE_PARAMS: [ParamSpec; 2] = [
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Required, Some("kf_infilt_swale")),
    ParamSpec::new("fasm", "%", "swale area relative to the contributing area", Derived(FA_STANDARD), None),
];
#[rustfmt::skip]
const SWALE_TRENCH_PARAMS: [ParamSpec; 2] = [
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Required, Some("kf_swale_trench")),
    ParamSpec::new("fasm", "%", "swale area relative to the contributing area", Derived(FA_STANDARD), None),
];
#[rustfmt::skip]
const SWALE_TRENCH_SYSTEM_PARAMS: [ParamSpec; 3] = [
    ParamSpec::new("qdr", "l/(s*ha)", "throttled discharge yield", Required, Some("qDr_swale_trench_system")),
    ParamSpec::new("kf", "mm/h", "hydraulic conductivity", Required, Some("kf_swale_trench_system")),
    ParamSpec::new("fasm", "%", "swale area relative to the contributing area", Derived("estimated from qdr and kf"), None),
];
#[rustfmt::skip]
const RAINWATER_PARAMS: [ParamSpec; 4] = [
    ParamSpec::new("vsp", "mm", "specific storage volume", Required, Some("VSp_rainwater_usage")),
    ParamSpec::new("vbr", "mm/d", "service water demand per contributing area", Required, Some("VBr_rainwater_usage")),
    ParamSpec::new("fabw", "-", "irrigated area relative to the contributing area", Number(RainwaterUsage::STANDARD_FABW), Some("FAbw_rainwater_usage")),
    ParamSpec::new("qbw", "l/(m2*a)", "specific irrigation demand", Number(RainwaterUsage::STANDARD_QBW), Some("qBw_rainwater_usage")),
];
#[rustfmt::skip]
const POND_PARAMS: [ParamSpec; 1] = [ParamSpec::new("aw", "m2", "pond water surface", Required, None)];

/// Measure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    Drainage,
    SurfInfiltration,
    InfiltSwale,
    SwaleTrench,
    SwaleTrenchSystem,
    RainwaterUsage,
    PondSystem,
}

impl MeasureKind {
    pub const ALL: [MeasureKind; 7] = [
        MeasureKind::Drainage,
        MeasureKind::SurfInfiltration,
        MeasureKind::InfiltSwale,
        MeasureKind::SwaleTrench,
        MeasureKind::SwaleTrenchSystem,
        MeasureKind::RainwaterUsage,
        MeasureKind::PondSystem,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MeasureKind::Drainage => "drainage",
            MeasureKind::SurfInfiltration => "surf_infiltration",
            MeasureKind::InfiltSwale => "infilt_swale",
            MeasureKind::SwaleTrench => "swale_trench",
            MeasureKind::SwaleTrenchSystem => "swale_trench_system",
            MeasureKind::RainwaterUsage => "rainwater_usage",
            MeasureKind::PondSystem => "pond_system",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeasureKind::Drainage => "Drainage",
            MeasureKind::SurfInfiltration => "Surface infilt.",
            MeasureKind::InfiltSwale => "Infilt. swale",
            MeasureKind::SwaleTrench => "Swale trench",
            MeasureKind::SwaleTrenchSystem => "Swale trench system",
            MeasureKind::RainwaterUsage => "Rainwater usage",
            MeasureKind::PondSystem => "Pond system",
        }
    }

    pub fn label_de(self) -> &'static str {
        match self {
            MeasureKind::Drainage => "Ableitung",
            MeasureKind::SurfInfiltration => "Flächenversickerung",
            MeasureKind::InfiltSwale => "Versickerungsmulde",
            MeasureKind::SwaleTrench => "Mulden-Rigolen-Element",
            MeasureKind::SwaleTrenchSystem => "Mulden-Rigolen-System",
            MeasureKind::RainwaterUsage => "Regenwassernutzung",
            MeasureKind::PondSystem => "Teichanlage",
        }
    }

    pub fn doc(self) -> &'static str {
        match self {
            MeasureKind::Drainage => "Conveyance by pipe, channel or ditch; fixed partition per type.",
            MeasureKind::SurfInfiltration => "Infiltration over a flat vegetated surface.",
            MeasureKind::InfiltSwale => "Infiltration swale.",
            MeasureKind::SwaleTrench => "Swale-trench element without throttled outflow.",
            MeasureKind::SwaleTrenchSystem => "Swale-trench system with throttled outflow.",
            MeasureKind::RainwaterUsage => "Rainwater tank for service water and irrigation.",
            MeasureKind::PondSystem => "Pond with a permanent water surface.",
        }
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            MeasureKind::Drainage => &DRAINAGE_PARAMS,
            MeasureKind::SurfInfiltration => &SURF_INFILTRATION_PARAMS,
            MeasureKind::InfiltSwale => &INFILT_SWALE_PARAMS,
            MeasureKind::SwaleTrench => &SWALE_TRENCH_PARAMS,
            MeasureKind::SwaleTrenchSystem => &SWALE_TRENCH_SYSTEM_PARAMS,
            MeasureKind::RainwaterUsage => &RAINWATER_PARAMS,
            MeasureKind::PondSystem => &POND_PARAMS,
        }
    }

    pub fn build(self, name: &str, values: &ParamValues) -> WbResult<Box<dyn Measure>> {
        values.check_against(self.id(), self.params())?;
        let num = |key: &str| values.number(key);

        let measure: Box<dyn Measure> = match self {
            MeasureKind::Drainage => Box::new(Drainage::new(
                name,
                DrainageType::parse(values.require_text("type")?)?,
            )),
            MeasureKind::SurfInfiltration => Box::new(SurfaceInfiltration::new(
                name,
                values.require_number("kf")?,
                num("fasf")?,
            )?),
            MeasureKind::InfiltSwale => Box::new(InfiltrationSwale::new(
                name,
                values.require_number("kf")?,
                num("fasm")?,
            )?),
            MeasureKind::SwaleTrench => Box::new(SwaleTrench::new(
                name,
                values.require_number("kf")?,
                num("fasm")?,
            )?),
            MeasureKind::SwaleTrenchSystem => Box::new(SwaleTrenchSystem::new(
                name,
                values.require_number("qdr")?,
                values.require_number("kf")?,
                num("fasm")?,
            )?),
            MeasureKind::RainwaterUsage => Box::new(RainwaterUsage::new(
                name,
                values.require_number("vsp")?,
                values.require_number("vbr")?,
                num("fabw")?,
                num("qbw")?,
            )?),
            MeasureKind::PondSystem => Box::new(PondSystem::new(
                name,
                sqm(values.require_number("aw")?),
            )?),
        };
        Ok(measure)
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MeasureKind {
    type Err = WbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        MeasureKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(key))
            .ok_or_else(|| WbError::unknown_category("measure kind", s))
    }
}
