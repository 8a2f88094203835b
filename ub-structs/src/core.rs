use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    PlotRecord {
        #[serde(rename = "PlotID")]
        plot_id: usize,
        #[serde(rename = "X")]
        x: usize,
        #[serde(rename = "Y")]
        y: usize,
        #[serde(rename = "Area")]
        area: f64,
        #[serde(rename = "Zone")]
        zone: String,
        #[serde(rename = "Subtype")]
        subtype: String,
        #[serde(rename = "Reason")]
        reason: String,
    }
}

impl PlotRecord {
    pub const COLUMNS: [&'static str; 7] =
        ["PlotID", "X", "Y", "Area", "Zone", "Subtype", "Reason"];
}

serializable_struct_with_getters! {
    LayoutReport {
        score: f64,
        justifications: Vec<String>,
        suggestions: Vec<String>,
    }
}

serializable_struct_with_getters! {
    ZoneShare {
        zone: String,
        area: f64,
        percentage: f64,
    }
}

serializable_struct_with_getters! {
    OutputData {
        seed: String,
        fitness: f64,
        plots: Vec<PlotRecord>,
        report: LayoutReport,
        summary: Vec<ZoneShare>,
    }
}
