use rand::{rngs::SmallRng, SeedableRng};
use ub_algorithms::zoning::*;
use ub_challenges::zoning::{
    grid_fitness, is_road, ConstraintRanges, Grid, InputError, Zone, ZoneFitness,
};
use ub_structs::config::{SearchParams, ZoningSettings};

fn settings(grid_size: usize) -> ZoningSettings {
    ZoningSettings::new(
        grid_size,
        100.0,
        100.0,
        (40.0, 60.0),
        (20.0, 30.0),
        (10.0, 20.0),
    )
}

fn seed(i: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[0] = i;
    seed[31] = 0x5a;
    seed
}

#[test]
fn test_search_reaches_target_bands() {
    for i in 0..8 {
        let outcome = search_zoning(&settings(6), &seed(i)).unwrap();
        assert!(
            outcome.best_fitness >= 90.0,
            "seed {} only reached {}",
            i,
            outcome.best_fitness
        );
    }
}

#[test]
fn test_every_cell_zoned_and_roads_fixed() {
    for (i, grid_size) in [6, 8, 10, 12].into_iter().enumerate() {
        let mut settings = settings(grid_size);
        settings.min_area = 80.0;
        settings.max_area = 150.0;
        let (grid, _) = run_zoning_ga(&settings, &seed(i as u8)).unwrap();
        assert_eq!(grid.cells().len(), grid_size * grid_size);
        for cell in grid.cells() {
            assert_ne!(cell.zone, Zone::Unassigned);
            assert_eq!(cell.zone == Zone::Road, is_road(cell.x, cell.y, grid_size));
            if cell.zone == Zone::Road {
                assert!(cell.subtype.is_empty());
            } else {
                assert!(!cell.subtype.is_empty());
                assert!(!cell.reason.is_empty());
            }
        }
    }
}

#[test]
fn test_best_fitness_matches_final_grid() {
    let settings = settings(8);
    let outcome = search_zoning(&settings, &seed(1)).unwrap();
    let ranges = ConstraintRanges::from_settings(&settings).unwrap();
    assert!((grid_fitness(&outcome.grid, &ranges) - outcome.best_fitness).abs() < 1e-9);
}

#[test]
fn test_same_seed_same_layout() {
    let mut settings = settings(10);
    settings.min_area = 50.0;
    settings.max_area = 500.0;
    let a = search_zoning(&settings, &seed(4)).unwrap();
    let b = search_zoning(&settings, &seed(4)).unwrap();
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.best_fitness, b.best_fitness);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_history_has_one_entry_per_generation() {
    let settings = settings(6).with_search(SearchParams {
        num_generations: 7,
        ..SearchParams::default()
    });
    let outcome = search_zoning(&settings, &seed(2)).unwrap();
    assert_eq!(outcome.history.len(), 7);
    for (i, stats) in outcome.history.iter().enumerate() {
        assert_eq!(stats.generation, i);
        assert!(stats.best >= stats.mean);
    }
}

#[test]
fn test_zero_generations_still_assigns() {
    let settings = settings(6).with_search(SearchParams {
        num_generations: 0,
        ..SearchParams::default()
    });
    let outcome = search_zoning(&settings, &seed(3)).unwrap();
    assert!(outcome.history.is_empty());
    assert!(outcome
        .grid
        .cells()
        .iter()
        .all(|c| c.zone != Zone::Unassigned));
}

#[test]
fn test_manual_area_mismatch_rejected_before_search() {
    let settings = settings(6).with_manual_areas(vec![100.0; 30]);
    let err = run_zoning_ga(&settings, &seed(0)).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::ManualAreaCount {
            expected: 36,
            actual: 30
        })
    );
}

#[test]
fn test_manual_areas_used() {
    let areas: Vec<f64> = (0..36).map(|i| 50.0 + 10.0 * i as f64).collect();
    let settings = settings(6).with_manual_areas(areas.clone());
    let (grid, _) = run_zoning_ga(&settings, &seed(0)).unwrap();
    let got: Vec<f64> = grid.cells().iter().map(|c| c.area).collect();
    assert_eq!(got, areas);
}

#[test]
fn test_invalid_ranges_rejected() {
    let mut settings = settings(6);
    settings.res_range = (70.0, 60.0);
    let err = search_zoning(&settings, &seed(0)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InputError>(),
        Some(InputError::InvalidRange {
            zone: Zone::Residential,
            ..
        })
    ));
}

#[test]
fn test_invalid_search_params_rejected() {
    for params in [
        SearchParams {
            population_size: 0,
            ..SearchParams::default()
        },
        SearchParams {
            tournament_size: 0,
            ..SearchParams::default()
        },
        SearchParams {
            gene_mutation_prob: 1.5,
            ..SearchParams::default()
        },
    ] {
        let err = search_zoning(&settings(6).with_search(params), &seed(0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::InvalidSearchParams(_))
        ));
    }
}

#[test]
fn test_road_only_grid() {
    let (grid, layout) = run_zoning_ga(&settings(2), &seed(0)).unwrap();
    assert!(grid.cells().iter().all(|c| c.zone == Zone::Road));
    assert_eq!(layout.to_string(), "##\n##\n");
}

#[test]
fn test_layout_map_matches_grid() {
    let (grid, layout) = run_zoning_ga(&settings(6), &seed(6)).unwrap();
    assert_eq!(layout.rows().len(), 6);
    for cell in grid.cells() {
        let glyph = layout.rows()[cell.y].chars().nth(cell.x).unwrap();
        assert_eq!(glyph == '#', cell.zone == Zone::Road);
    }
}

#[test]
fn test_genetic_single_individual_population() {
    let settings = settings(6);
    let mut rng = SmallRng::from_seed(seed(8));
    let grid = Grid::generate(&settings, &mut rng).unwrap();
    let map = grid.gene_map();
    let fitness = ZoneFitness::new(&grid, &map, ConstraintRanges::from_settings(&settings).unwrap());
    let params = SearchParams {
        population_size: 1,
        num_generations: 5,
        ..SearchParams::default()
    };
    let mut genetic = Genetic::new(&fitness, params, &mut rng).unwrap();
    let best = genetic.run(&mut rng);
    assert_eq!(best.zones.len(), 9);
    assert_eq!(best.fitness, fitness.evaluate(&best.zones));
}

#[test]
fn test_selection_prefers_fitter_candidates() {
    let settings = settings(8);
    let mut rng = SmallRng::from_seed(seed(9));
    let grid = Grid::generate(&settings, &mut rng).unwrap();
    let map = grid.gene_map();
    let fitness = ZoneFitness::new(&grid, &map, ConstraintRanges::from_settings(&settings).unwrap());
    let mut genetic = Genetic::new(&fitness, SearchParams::default(), &mut rng).unwrap();
    let initial_mean = genetic.population.iter().map(|i| i.fitness).sum::<f64>() / 50.0;
    genetic.run(&mut rng);
    let final_mean = genetic.history.last().unwrap().mean;
    assert!(final_mean > initial_mean);
}
