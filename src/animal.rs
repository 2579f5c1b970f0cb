//! Animal lifecycle state machine and species parameters.

use crate::field::{Field, Location};
use rand::Rng;

/// Unique animal identifier
pub type AnimalId = u64;

/// Index of a species in the simulator's species table
pub type SpeciesId = usize;

/// What a species eats.
#[derive(Clone, Debug)]
pub enum Diet {
    /// Never hunts and carries no food reserve
    Grazer,
    /// Hunts the listed species; starves after `food_value` unfed steps
    Hunter {
        food_value: u32,
        prey: Vec<SpeciesId>,
    },
}

/// Resolved parameter bundle for one species.
#[derive(Clone, Debug)]
pub struct Species {
    pub name: String,
    /// Age at which breeding becomes possible
    pub breeding_age: u32,
    /// Per-step probability of breeding once of age
    pub breeding_probability: f64,
    /// Largest litter a single breeding event can produce
    pub max_litter_size: u32,
    /// Age past which the animal dies
    pub max_age: u32,
    pub diet: Diet,
}

impl Species {
    /// Whether this species hunts other animals
    #[inline]
    pub fn is_hunter(&self) -> bool {
        matches!(self.diet, Diet::Hunter { .. })
    }
}

/// Cause of death tracking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Predation,
    Overcrowding,
}

/// One animal on the field.
///
/// The alive flag flips to false exactly once; a dead animal holds no
/// location and its cell is released the moment it dies.
#[derive(Clone, Debug)]
pub struct Animal {
    // Identity
    pub id: AnimalId,
    pub species: SpeciesId,

    // Lifecycle state
    age: u32,
    /// Steps left before starvation; `None` for grazers
    food_level: Option<u32>,
    alive: bool,
    location: Option<Location>,

    pub cause_of_death: Option<DeathCause>,
}

impl Animal {
    /// Create a newborn (age zero, full food reserve) occupying `location`.
    pub fn newborn(
        id: AnimalId,
        species_id: SpeciesId,
        species: &Species,
        field: &mut Field,
        location: Location,
    ) -> Self {
        let food_level = match species.diet {
            Diet::Hunter { food_value, .. } => Some(food_value),
            Diet::Grazer => None,
        };
        let mut animal = Self {
            id,
            species: species_id,
            age: 0,
            food_level,
            alive: true,
            location: None,
            cause_of_death: None,
        };
        animal.set_location(field, location);
        animal
    }

    /// Create a bootstrap individual with randomized age and food level.
    ///
    /// Consumes one age draw, then one food draw for hunters. A hunter that
    /// draws a zero reserve starves on its first step.
    pub fn with_random_age<R: Rng>(
        id: AnimalId,
        species_id: SpeciesId,
        species: &Species,
        field: &mut Field,
        location: Location,
        rng: &mut R,
    ) -> Self {
        let mut animal = Self::newborn(id, species_id, species, field, location);
        animal.age = rng.gen_range(0..species.max_age);
        if let Diet::Hunter { food_value, .. } = species.diet {
            animal.food_level = Some(rng.gen_range(0..food_value));
        }
        animal
    }

    /// Check whether the animal is alive
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current age in steps
    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Current location, or `None` once dead
    #[inline]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Remaining food reserve, `None` for grazers
    #[inline]
    pub fn food_level(&self) -> Option<u32> {
        self.food_level
    }

    /// Move to a new location, releasing the old cell first.
    pub fn set_location(&mut self, field: &mut Field, new_location: Location) {
        debug_assert!(self.alive, "moved a dead animal");
        if let Some(old_location) = self.location {
            field.clear(old_location);
        }
        field.place(self.id, new_location);
        self.location = Some(new_location);
    }

    /// Mark the animal dead and release its cell. Terminal.
    pub fn set_dead(&mut self, cause: DeathCause, field: &mut Field) {
        debug_assert!(self.alive, "killed a dead animal");
        self.alive = false;
        self.cause_of_death = Some(cause);
        if let Some(location) = self.location.take() {
            field.clear(location);
        }
    }

    /// Age by one step; past the species' maximum the animal dies.
    pub fn increment_age(&mut self, species: &Species, field: &mut Field) {
        debug_assert!(self.alive, "aged a dead animal");
        self.age += 1;
        if self.age > species.max_age {
            self.set_dead(DeathCause::OldAge, field);
        }
    }

    /// Use up one step of food reserve; at zero the animal starves.
    /// No-op for grazers.
    pub fn increment_hunger(&mut self, field: &mut Field) {
        debug_assert!(self.alive, "starved a dead animal");
        if let Some(level) = self.food_level {
            let level = level.saturating_sub(1);
            self.food_level = Some(level);
            if level == 0 {
                self.set_dead(DeathCause::Starvation, field);
            }
        }
    }

    /// Refill the food reserve after a kill
    #[inline]
    pub fn eat(&mut self, food_value: u32) {
        debug_assert!(self.alive, "fed a dead animal");
        self.food_level = Some(food_value);
    }

    /// Whether the animal has reached breeding age
    #[inline]
    pub fn can_breed(&self, species: &Species) -> bool {
        self.age >= species.breeding_age
    }

    /// Number of births this step.
    ///
    /// Zero for underage animals (no draw consumed). Otherwise one
    /// probability draw decides whether breeding happens, and on success an
    /// independent draw picks a litter in `1..=max_litter_size`.
    pub fn litter_size<R: Rng>(&self, species: &Species, rng: &mut R) -> u32 {
        if self.can_breed(species) && rng.gen::<f64>() <= species.breeding_probability {
            rng.gen_range(1..=species.max_litter_size)
        } else {
            0
        }
    }
}
