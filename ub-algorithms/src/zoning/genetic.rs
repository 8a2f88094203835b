use super::individual::{two_point_crossover, Individual};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use ub_challenges::zoning::{InputError, ZoneFitness};
use ub_structs::config::SearchParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
}

pub fn validate_params(params: &SearchParams) -> Result<(), InputError> {
    let bad = |msg: &str| -> Result<(), InputError> {
        Err(InputError::InvalidSearchParams(msg.to_string()))
    };
    if params.population_size == 0 {
        return bad("population_size must be at least 1");
    }
    if params.tournament_size == 0 {
        return bad("tournament_size must be at least 1");
    }
    for (name, p) in [
        ("crossover_prob", params.crossover_prob),
        ("mutation_prob", params.mutation_prob),
        ("gene_mutation_prob", params.gene_mutation_prob),
    ] {
        if !(0.0..=1.0).contains(&p) {
            return Err(InputError::InvalidSearchParams(format!(
                "{} must be within [0, 1] (got {})",
                name, p
            )));
        }
    }
    Ok(())
}

pub struct Genetic<'a> {
    pub fitness: &'a ZoneFitness,
    pub params: SearchParams,
    pub population: Vec<Individual>,
    pub history: Vec<GenerationStats>,
}

impl<'a> Genetic<'a> {
    pub fn new<R: Rng>(
        fitness: &'a ZoneFitness,
        params: SearchParams,
        rng: &mut R,
    ) -> Result<Self, InputError> {
        validate_params(&params)?;
        let mut population: Vec<Individual> = (0..params.population_size)
            .map(|_| Individual::random(fitness.num_genes(), rng))
            .collect();
        evaluate_all(&mut population, fitness);
        Ok(Self {
            fitness,
            params,
            population,
            history: Vec::new(),
        })
    }

    /// Clones the population, recombines neighbouring pairs and mutates.
    fn vary<R: Rng>(&self, rng: &mut R) -> Vec<Individual> {
        let mut offspring = self.population.clone();
        for i in (1..offspring.len()).step_by(2) {
            if rng.gen::<f64>() < self.params.crossover_prob {
                let (left, right) = offspring.split_at_mut(i);
                two_point_crossover(&mut left[i - 1].zones, &mut right[0].zones, rng);
            }
        }
        for ind in offspring.iter_mut() {
            if rng.gen::<f64>() < self.params.mutation_prob {
                ind.mutate(self.params.gene_mutation_prob, rng);
            }
        }
        offspring
    }

    /// Tournament selection with replacement; the first of equally fit
    /// aspirants wins.
    fn select<R: Rng>(&self, pool: &[Individual], k: usize, rng: &mut R) -> Vec<Individual> {
        (0..k)
            .map(|_| {
                let mut winner = &pool[rng.gen_range(0..pool.len())];
                for _ in 1..self.params.tournament_size {
                    let aspirant = &pool[rng.gen_range(0..pool.len())];
                    if aspirant.fitness > winner.fitness {
                        winner = aspirant;
                    }
                }
                winner.clone()
            })
            .collect()
    }

    pub fn step<R: Rng>(&mut self, generation: usize, rng: &mut R) {
        let mut offspring = self.vary(rng);
        evaluate_all(&mut offspring, self.fitness);
        self.population = self.select(&offspring, self.params.population_size, rng);

        let stats = GenerationStats {
            generation,
            best: self.best().fitness,
            mean: self.population.iter().map(|i| i.fitness).sum::<f64>()
                / self.population.len() as f64,
        };
        debug!(
            "generation {}: best {:.3}, mean {:.3}",
            stats.generation, stats.best, stats.mean
        );
        self.history.push(stats);
    }

    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Individual {
        for generation in 0..self.params.num_generations {
            self.step(generation, rng);
        }
        self.best().clone()
    }

    /// Fittest individual, earliest in population order on ties.
    pub fn best(&self) -> &Individual {
        let mut best = &self.population[0];
        for ind in &self.population[1..] {
            if ind.fitness > best.fitness {
                best = ind;
            }
        }
        best
    }
}

/// Every candidate is scored independently, so the order of evaluation does
/// not affect results.
fn evaluate_all(population: &mut [Individual], fitness: &ZoneFitness) {
    #[cfg(feature = "parallel")]
    population.par_iter_mut().for_each(|ind| ind.evaluate(fitness));
    #[cfg(not(feature = "parallel"))]
    population.iter_mut().for_each(|ind| ind.evaluate(fitness));
}
