//! Simulation engine - main step loop.
//!
//! One step drives every animal alive at the start of the step through its
//! lifecycle transition exactly once, in insertion order. The field is the
//! single shared mutable resource; execution is strictly sequential, so the
//! snapshot-before-mutate discipline is what keeps a step race-free.

use crate::animal::{Animal, AnimalId, DeathCause, Diet, Species, SpeciesId};
use crate::config::{Config, SpeciesConfig};
use crate::field::{Field, Location};
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Placement retries per cell of field area before populate gives up on an
/// individual.
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// The simulation driver
pub struct Simulator {
    // Population, in insertion order (the step snapshot order)
    animals: Vec<Animal>,
    index: HashMap<AnimalId, usize>,

    // Environment
    field: Field,

    // Species table, in config order
    species: Vec<Species>,

    // State
    pub time: u64,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // ID generation
    next_animal_id: AnimalId,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,

    births_this_step: usize,
    deaths_this_step: usize,
}

impl Simulator {
    /// Create an empty simulator with the given configuration
    pub fn new(config: Config) -> Result<Self, String> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create an empty simulator with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, String> {
        config.validate()?;
        let species = resolve_species(&config.species);
        let field = Field::new(config.field.depth, config.field.width);
        let stats_history = StatsHistory::new(config.logging.stats_interval);

        Ok(Self {
            animals: Vec::new(),
            index: HashMap::new(),
            field,
            species,
            time: 0,
            stats: Stats::new(),
            stats_history,
            config,
            next_animal_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            births_this_step: 0,
            deaths_this_step: 0,
        })
    }

    /// Seed the field with randomly placed, randomly aged individuals per
    /// species.
    ///
    /// A draw that lands on an occupied cell is retried at another random
    /// cell; an individual is skipped once the attempt budget runs out
    /// (saturated grid).
    pub fn populate(&mut self) {
        let attempts_per_individual = self.field.area() * PLACEMENT_ATTEMPTS_PER_CELL;
        let mut placed = 0usize;
        let mut skipped = 0usize;

        for species_id in 0..self.species.len() {
            for _ in 0..self.config.species[species_id].initial_count {
                let mut location = None;
                for _ in 0..attempts_per_individual {
                    let candidate = Location::new(
                        self.rng.gen_range(0..self.field.depth()),
                        self.rng.gen_range(0..self.field.width()),
                    );
                    if self.field.is_free(candidate) {
                        location = Some(candidate);
                        break;
                    }
                }
                match location {
                    Some(location) => {
                        let id = self.fresh_id();
                        let animal = Animal::with_random_age(
                            id,
                            species_id,
                            &self.species[species_id],
                            &mut self.field,
                            location,
                            &mut self.rng,
                        );
                        self.index.insert(id, self.animals.len());
                        self.animals.push(animal);
                        placed += 1;
                    }
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            log::warn!(
                "field saturated: skipped {} of {} initial placements",
                skipped,
                placed + skipped
            );
        }
        log::info!(
            "seeded {} animals on a {}x{} field (seed {})",
            placed,
            self.field.depth(),
            self.field.width(),
            self.seed
        );
        self.update_stats();
    }

    /// Place a single newborn-state animal at a chosen cell and return its
    /// id.
    ///
    /// Panics if the cell is occupied (caller contract).
    pub fn spawn(&mut self, species_id: SpeciesId, location: Location) -> AnimalId {
        assert!(
            self.field.is_free(location),
            "spawn target cell is occupied"
        );
        let id = self.fresh_id();
        let animal = Animal::newborn(
            id,
            species_id,
            &self.species[species_id],
            &mut self.field,
            location,
        );
        self.index.insert(id, self.animals.len());
        self.animals.push(animal);
        self.update_stats();
        id
    }

    /// Advance the simulation by one step and return the resulting census.
    ///
    /// Newborns take a cell the moment they are born (and can be preyed
    /// upon later in the same step) but act for the first time on the
    /// following step.
    pub fn step(&mut self) -> Stats {
        self.births_this_step = 0;
        self.deaths_this_step = 0;
        self.time += 1;

        let snapshot_len = self.animals.len();
        for idx in 0..snapshot_len {
            if self.animals[idx].is_alive() {
                self.act(idx);
            }
        }

        self.remove_dead();
        self.update_stats();
        if self.time % self.stats_history.interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
        self.stats.clone()
    }

    /// Run simulation for the specified number of steps
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Run until `max_steps` have elapsed or no animal remains
    pub fn run_while_viable(&mut self, max_steps: u64) {
        for _ in 0..max_steps {
            if !self.is_viable() {
                break;
            }
            self.step();
        }
    }

    /// Drive one animal through its per-step lifecycle transition
    fn act(&mut self, idx: usize) {
        let species_id = self.animals[idx].species;

        self.animals[idx].increment_age(&self.species[species_id], &mut self.field);
        if !self.animals[idx].is_alive() {
            return;
        }

        if self.species[species_id].is_hunter() {
            self.animals[idx].increment_hunger(&mut self.field);
            if !self.animals[idx].is_alive() {
                return;
            }
        }

        self.give_birth(idx);

        let destination = match self.hunt(idx) {
            Some(kill_site) => Some(kill_site),
            None => {
                let location = self.location_of(idx);
                self.field.free_adjacent_location(location, &mut self.rng)
            }
        };
        match destination {
            Some(destination) => self.animals[idx].set_location(&mut self.field, destination),
            None => self.animals[idx].set_dead(DeathCause::Overcrowding, &mut self.field),
        }
    }

    /// Breed if eligible. Newborns fill the free-adjacency sequence
    /// breadth-first; births beyond the free cells are discarded.
    fn give_birth(&mut self, idx: usize) {
        let species_id = self.animals[idx].species;
        let births = self.animals[idx].litter_size(&self.species[species_id], &mut self.rng);
        if births == 0 {
            return;
        }

        let location = self.location_of(idx);
        let free = self.field.free_adjacent_locations(location, &mut self.rng);
        for birth_location in free.into_iter().take(births as usize) {
            let id = self.fresh_id();
            let newborn = Animal::newborn(
                id,
                species_id,
                &self.species[species_id],
                &mut self.field,
                birth_location,
            );
            self.index.insert(id, self.animals.len());
            self.animals.push(newborn);
            self.births_this_step += 1;
        }
    }

    /// Scan adjacent cells for the first live prey. On a kill the hunter's
    /// reserve is refilled and the vacated cell returned. `None` for
    /// grazers or when no prey is adjacent.
    fn hunt(&mut self, idx: usize) -> Option<Location> {
        let species_id = self.animals[idx].species;
        let (food_value, prey) = match self.species[species_id].diet {
            Diet::Hunter {
                food_value,
                ref prey,
            } => (food_value, prey),
            Diet::Grazer => return None,
        };

        let location = self.location_of(idx);
        for candidate in self.field.adjacent_locations(location, &mut self.rng) {
            let occupant_id = match self.field.occupant(candidate) {
                Some(id) => id,
                None => continue,
            };
            let target = self.index[&occupant_id];
            if self.animals[target].is_alive() && prey.contains(&self.animals[target].species) {
                self.animals[target].set_dead(DeathCause::Predation, &mut self.field);
                self.animals[idx].eat(food_value);
                return Some(candidate);
            }
        }
        None
    }

    /// Drop dead animals from the population and rebuild the id index
    fn remove_dead(&mut self) {
        let before = self.animals.len();
        self.animals.retain(|animal| animal.is_alive());
        self.deaths_this_step = before - self.animals.len();
        self.index = self
            .animals
            .iter()
            .enumerate()
            .map(|(idx, animal)| (animal.id, idx))
            .collect();
    }

    fn update_stats(&mut self) {
        self.stats.time = self.time;
        self.stats.births = self.births_this_step;
        self.stats.deaths = self.deaths_this_step;
        self.stats.update(&self.animals, &self.species);
    }

    fn fresh_id(&mut self) -> AnimalId {
        let id = self.next_animal_id;
        self.next_animal_id += 1;
        id
    }

    /// Location of a live animal. Dead animals hold no location; the step
    /// loop never asks for one.
    fn location_of(&self, idx: usize) -> Location {
        self.animals[idx]
            .location()
            .expect("live animal always occupies a cell")
    }

    /// Get current live population count
    pub fn population(&self) -> usize {
        self.animals.iter().filter(|a| a.is_alive()).count()
    }

    /// Live count for one species
    pub fn population_of(&self, species_id: SpeciesId) -> usize {
        self.animals
            .iter()
            .filter(|a| a.is_alive() && a.species == species_id)
            .count()
    }

    /// True while at least one species still has living members
    pub fn is_viable(&self) -> bool {
        self.animals.iter().any(|a| a.is_alive())
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The occupancy field
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// All tracked animals, in insertion order
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// The resolved species table, in config order
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Look up a species id by name
    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.species.iter().position(|s| s.name == name)
    }

    /// Look up a live animal by id
    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.index.get(&id).map(|&idx| &self.animals[idx])
    }
}

/// Build the runtime species table, resolving prey names to table indices.
/// Assumes a validated config.
fn resolve_species(configs: &[SpeciesConfig]) -> Vec<Species> {
    let ids: HashMap<&str, SpeciesId> = configs
        .iter()
        .enumerate()
        .map(|(idx, sc)| (sc.name.as_str(), idx))
        .collect();

    configs
        .iter()
        .map(|sc| {
            let diet = if sc.prey.is_empty() {
                Diet::Grazer
            } else {
                Diet::Hunter {
                    // validated: hunters always declare a food value
                    food_value: sc.food_value.unwrap_or(1),
                    prey: sc.prey.iter().map(|name| ids[name.as_str()]).collect(),
                }
            };
            Species {
                name: sc.name.clone(),
                breeding_age: sc.breeding_age,
                breeding_probability: sc.breeding_probability,
                max_litter_size: sc.max_litter_size,
                max_age: sc.max_age,
                diet,
            }
        })
        .collect()
}
