use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use ub_utils::{jsonify, u8s_from_str};

/// A `(min%, max%)` target band for one zone category.
pub type PercentRange = (f64, f64);

serializable_struct_with_getters! {
    ZoningSettings {
        grid_size: usize,
        min_area: f64,
        max_area: f64,
        res_range: PercentRange,
        com_range: PercentRange,
        green_range: PercentRange,
        manual_areas: Option<Vec<f64>>,
        search: Option<SearchParams>,
    }
}

impl ZoningSettings {
    pub fn new(
        grid_size: usize,
        min_area: f64,
        max_area: f64,
        res_range: PercentRange,
        com_range: PercentRange,
        green_range: PercentRange,
    ) -> Self {
        Self {
            grid_size,
            min_area,
            max_area,
            res_range,
            com_range,
            green_range,
            manual_areas: None,
            search: None,
        }
    }

    pub fn with_manual_areas(mut self, areas: Vec<f64>) -> Self {
        self.manual_areas = Some(areas);
        self
    }

    pub fn with_search(mut self, search: SearchParams) -> Self {
        self.search = Some(search);
        self
    }

    pub fn search_params(&self) -> SearchParams {
        self.search.clone().unwrap_or_default()
    }

    /// Derives the 32-byte run seed from the canonical settings and a caller-chosen string.
    pub fn calc_seed(&self, seed_str: &str) -> [u8; 32] {
        u8s_from_str(&format!("{}_{}", jsonify(&self), seed_str))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    pub population_size: usize,
    pub num_generations: usize,
    pub crossover_prob: f64,
    /// Chance that an offspring is considered for mutation at all.
    pub mutation_prob: f64,
    pub gene_mutation_prob: f64,
    pub tournament_size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 50,
            crossover_prob: 0.5,
            mutation_prob: 0.2,
            gene_mutation_prob: 0.05,
            tournament_size: 3,
        }
    }
}
