//! Statistics tracking for the simulation.

use crate::animal::{Animal, Species};
use serde::{Deserialize, Serialize};

/// Live count for one species
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpeciesCount {
    pub name: String,
    pub count: usize,
}

/// Census snapshot for a simulation step
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Step the snapshot was taken at
    pub time: u64,
    /// Total live population
    pub population: usize,
    /// Live counts per species, in species-table order
    pub species: Vec<SpeciesCount>,
    /// Births this step
    pub births: usize,
    /// Deaths this step
    pub deaths: usize,
    /// Mean age across live animals
    pub age_mean: f32,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from current simulation state
    pub fn update(&mut self, animals: &[Animal], species: &[Species]) {
        let mut counts = vec![0usize; species.len()];
        let mut age_sum = 0u64;
        let mut population = 0usize;

        for animal in animals.iter().filter(|a| a.is_alive()) {
            counts[animal.species] += 1;
            age_sum += u64::from(animal.age());
            population += 1;
        }

        self.population = population;
        self.species = species
            .iter()
            .zip(counts)
            .map(|(sp, count)| SpeciesCount {
                name: sp.name.clone(),
                count,
            })
            .collect();
        self.age_mean = if population == 0 {
            0.0
        } else {
            age_sum as f32 / population as f32
        };
    }

    /// Live count for a species by name
    pub fn count_of(&self, name: &str) -> Option<usize> {
        self.species
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.count)
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        let mut line = format!("T:{:6} | Pop:{:5}", self.time, self.population);
        for entry in &self.species {
            line.push_str(&format!(" | {}:{}", entry.name, entry.count));
        }
        line.push_str(&format!(
            " | B:{} D:{} | Age:{:.1}",
            self.births, self.deaths, self.age_mean
        ));
        line
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.population))
            .collect()
    }

    /// Get one species' count over time
    pub fn species_series(&self, name: &str) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .filter_map(|s| s.count_of(name).map(|count| (s.time, count)))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::{DeathCause, Diet};
    use crate::field::{Field, Location};

    fn species_table() -> Vec<Species> {
        vec![
            Species {
                name: "rabbit".to_string(),
                breeding_age: 5,
                breeding_probability: 0.12,
                max_litter_size: 4,
                max_age: 40,
                diet: Diet::Grazer,
            },
            Species {
                name: "fox".to_string(),
                breeding_age: 15,
                breeding_probability: 0.08,
                max_litter_size: 2,
                max_age: 150,
                diet: Diet::Hunter {
                    food_value: 9,
                    prey: vec![0],
                },
            },
        ]
    }

    #[test]
    fn test_stats_update() {
        let species = species_table();
        let mut field = Field::new(10, 10);
        let mut animals = vec![
            Animal::newborn(1, 0, &species[0], &mut field, Location::new(0, 0)),
            Animal::newborn(2, 0, &species[0], &mut field, Location::new(0, 1)),
            Animal::newborn(3, 1, &species[1], &mut field, Location::new(0, 2)),
        ];
        animals[1].set_dead(DeathCause::Overcrowding, &mut field);

        let mut stats = Stats::new();
        stats.update(&animals, &species);

        assert_eq!(stats.population, 2);
        assert_eq!(stats.count_of("rabbit"), Some(1));
        assert_eq!(stats.count_of("fox"), Some(1));
        assert_eq!(stats.count_of("dodo"), None);
        assert_eq!(stats.age_mean, 0.0);
    }

    #[test]
    fn test_summary_lists_species() {
        let species = species_table();
        let mut stats = Stats::new();
        stats.update(&[], &species);

        let line = stats.summary();
        assert!(line.contains("rabbit:0"));
        assert!(line.contains("fox:0"));
    }

    #[test]
    fn test_stats_history() {
        let mut history = StatsHistory::new(10);

        for i in 0..5 {
            let mut stats = Stats::new();
            stats.time = i * 10;
            stats.population = (i + 1) as usize * 100;
            history.record(stats);
        }

        let series = history.population_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (0, 100));
        assert_eq!(series[4], (40, 500));
    }

    #[test]
    fn test_species_series() {
        let species = species_table();
        let mut history = StatsHistory::new(1);
        let mut field = Field::new(10, 10);
        let animals = vec![Animal::newborn(
            1,
            0,
            &species[0],
            &mut field,
            Location::new(0, 0),
        )];

        let mut stats = Stats::new();
        stats.time = 1;
        stats.update(&animals, &species);
        history.record(stats);

        assert_eq!(history.species_series("rabbit"), vec![(1, 1)]);
        assert_eq!(history.species_series("fox"), vec![(1, 0)]);
    }
}
