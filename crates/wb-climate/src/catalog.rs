//! Reference climate of German cities.
//!
//! Source: DWD, climatology 1991-2020, multi-annual grids of precipitation
//! and potential evapotranspiration aggregated per city.

use serde::Serialize;
use wb_core::{WbError, WbResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateRecord {
    pub place: &'static str,
    /// Mean annual precipitation (mm/a)
    pub precipitation_mm: f64,
    /// Mean annual potential evapotranspiration (mm/a)
    pub etp_mm: f64,
}

impl ClimateRecord {
    const fn new(place: &'static str, precipitation_mm: f64, etp_mm: f64) -> Self {
        Self {
            place,
            precipitation_mm,
            etp_mm,
        }
    }

    pub fn matches(&self, query: &str) -> bool {
        fold_place(self.place) == fold_place(query)
    }
}

const CLIMATE_TABLE: [ClimateRecord; 58] = [
    ClimateRecord::new("Augsburg", 820.0, 619.5),
    ClimateRecord::new("Berlin", 570.0, 666.4),
    ClimateRecord::new("Bielefeld", 867.0, 599.8),
    ClimateRecord::new("Bonn", 649.0, 661.6),
    ClimateRecord::new("Braunschweig", 611.0, 629.9),
    ClimateRecord::new("Bremen", 730.0, 608.6),
    ClimateRecord::new("Bremerhaven", 757.0, 597.1),
    ClimateRecord::new("Chemnitz", 768.0, 613.5),
    ClimateRecord::new("Coburg", 778.0, 603.9),
    ClimateRecord::new("Cottbus", 569.0, 687.4),
    ClimateRecord::new("Dortmund", 797.0, 625.5),
    ClimateRecord::new("Dresden", 589.0, 673.1),
    ClimateRecord::new("Duisburg", 761.0, 640.9),
    ClimateRecord::new("Düsseldorf", 772.0, 646.1),
    ClimateRecord::new("Emden", 829.0, 597.3),
    ClimateRecord::new("Erfurt", 531.0, 631.9),
    ClimateRecord::new("Essen", 761.0, 609.0),
    ClimateRecord::new("Flensburg", 915.0, 573.1),
    ClimateRecord::new("Frankfurt am Main", 628.0, 665.8),
    ClimateRecord::new("Freiburg im Breisgau", 987.0, 643.6),
    ClimateRecord::new("Fürth", 613.0, 638.1),
    ClimateRecord::new("Gera", 649.0, 640.3),
    ClimateRecord::new("Gießen", 596.0, 638.7),
    ClimateRecord::new("Göttingen", 637.0, 620.4),
    ClimateRecord::new("Hamburg", 790.0, 600.8),
    ClimateRecord::new("Hannover", 658.0, 619.2),
    ClimateRecord::new("Heidelberg", 671.0, 681.0),
    ClimateRecord::new("Hof", 707.0, 569.3),
    ClimateRecord::new("Ingolstadt", 685.0, 631.4),
    ClimateRecord::new("Jena", 567.0, 652.4),
    ClimateRecord::new("Karlsruhe", 746.0, 689.1),
    ClimateRecord::new("Kassel", 595.0, 627.3),
    ClimateRecord::new("Kiel", 798.0, 577.4),
    ClimateRecord::new("Koblenz", 638.0, 661.4),
    ClimateRecord::new("Köln", 787.0, 656.4),
    ClimateRecord::new("Leipzig", 589.0, 661.6),
    ClimateRecord::new("Lübeck", 681.0, 593.5),
    ClimateRecord::new("Magdeburg", 503.0, 656.2),
    ClimateRecord::new("Mainz", 555.0, 671.7),
    ClimateRecord::new("Mannheim", 605.0, 682.2),
    ClimateRecord::new("München", 973.0, 610.2),
    ClimateRecord::new("Münster", 745.0, 617.9),
    ClimateRecord::new("Nürnberg", 639.0, 632.7),
    ClimateRecord::new("Oldenburg", 781.0, 606.8),
    ClimateRecord::new("Osnabrück", 827.0, 604.1),
    ClimateRecord::new("Passau", 882.0, 631.6),
    ClimateRecord::new("Potsdam", 554.0, 670.1),
    ClimateRecord::new("Regensburg", 669.0, 629.2),
    ClimateRecord::new("Rosenheim", 1125.0, 626.5),
    ClimateRecord::new("Rostock", 645.0, 588.7),
    ClimateRecord::new("Saarbrücken", 829.0, 661.3),
    ClimateRecord::new("Schwerin", 665.0, 593.0),
    ClimateRecord::new("Stralsund", 645.0, 584.7),
    ClimateRecord::new("Stuttgart", 683.0, 656.0),
    ClimateRecord::new("Ulm", 723.0, 626.2),
    ClimateRecord::new("Wiesbaden", 631.0, 650.5),
    ClimateRecord::new("Wuppertal", 1290.0, 572.8),
    ClimateRecord::new("Würzburg", 618.0, 652.9),
];

/// All places of the table, in alphabetical order.
pub fn places() -> impl Iterator<Item = &'static ClimateRecord> {
    CLIMATE_TABLE.iter()
}

/// Find the climate of a place.
///
/// Matching ignores case and surrounding whitespace, and treats umlauts and
/// their two-letter transcriptions as equal ("Muenchen" finds "München").
pub fn lookup(place: &str) -> WbResult<&'static ClimateRecord> {
    CLIMATE_TABLE
        .iter()
        .find(|r| r.matches(place))
        .ok_or_else(|| WbError::unknown_category("place", place.trim()))
}

fn fold_place(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.trim().chars().flat_map(char::to_lowercase) {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            c if c.is_whitespace() => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => out.push(c),
        }
    }
    out
}
