use rand::Rng;
use ub_challenges::zoning::{Zone, ZoneFitness};

#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    pub zones: Vec<Zone>,
    pub fitness: f64,
}

impl Individual {
    pub fn random<R: Rng>(num_genes: usize, rng: &mut R) -> Self {
        let zones = (0..num_genes).map(|_| random_zone(rng)).collect();
        Self {
            zones,
            fitness: f64::NEG_INFINITY,
        }
    }

    pub fn evaluate(&mut self, fitness: &ZoneFitness) {
        self.fitness = fitness.evaluate(&self.zones);
    }

    /// Each gene is independently redrawn with probability `gene_prob`; the
    /// redraw may land on the same zone.
    pub fn mutate<R: Rng>(&mut self, gene_prob: f64, rng: &mut R) {
        for zone in self.zones.iter_mut() {
            if rng.gen::<f64>() < gene_prob {
                *zone = random_zone(rng);
            }
        }
    }
}

pub fn random_zone<R: Rng>(rng: &mut R) -> Zone {
    Zone::ASSIGNABLE[rng.gen_range(0..Zone::ASSIGNABLE.len())]
}

/// Swaps the slice `[p1, p2)` between two parents, `1 <= p1 < p2 <= n`.
pub fn two_point_crossover<R: Rng>(a: &mut [Zone], b: &mut [Zone], rng: &mut R) {
    let size = a.len().min(b.len());
    if size < 2 {
        return;
    }
    let mut p1 = rng.gen_range(1..=size);
    let mut p2 = rng.gen_range(1..size);
    if p2 >= p1 {
        p2 += 1;
    } else {
        std::mem::swap(&mut p1, &mut p2);
    }
    a[p1..p2].swap_with_slice(&mut b[p1..p2]);
}
