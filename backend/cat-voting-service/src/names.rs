//! Random cat name selection
//!
//! Names come from a fixed, curated table. The generator owns its RNG so
//! tests can seed it and production can draw from OS entropy.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Curated candidate names. Duplicates are intentional and weight the draw.
pub static CAT_NAMES: &[&str] = &[
    "Amleto", "Artiglio", "Artù", "Arturo", "Baffone", "Birba", "Birillo", "Casimiro", "Cesare",
    "Charlie", "Chicco", "Denver", "Edgar", "Elvis", "Ettore", "Fiocco", "Frodo", "Giggino",
    "Gino", "Grumpy", "Ian", "James", "Joker", "Junior", "Kant", "Klimt", "Kobe", "Lillo",
    "Liquirizia", "Oscar", "Pippo", "Pucci", "Pulce", "Punto", "Red", "Romeo", "Scheggia",
    "Virgola", "Agostina", "Alice", "Angela", "Asia", "Azzurra", "Batuffolina", "Bella",
    "Cleopatra", "Coccinella", "Coccolina", "Gatta", "Gioia", "Kiki", "Kinkita", "Lady", "Lilly",
    "Lucy", "Macchietta", "Matilda", "Meba", "Meringa", "Molly", "Nala", "Nerina", "Petra",
    "Principessa", "Priscilla", "Rose", "Senna", "Sissy", "Stella", "Tabata", "Trilly", "Wendy",
    "Xena", "Ziva", "Zuccherina", "Brownie", "Carota", "Chai", "Cheddar", "Chili", "Curry",
    "Hershey", "Kahlua", "Kiwi", "Mango", "Miso", "Nacho", "Pepe", "Popcorn", "Snickers",
    "Sushi", "Twinkie", "Zucca", "Alce", "Corvo", "Drago", "Foxy", "Orca", "Panda", "Puma",
    "Scimmia", "Tigre", "Adina", "Amélie", "Amy", "Bambi", "Bella", "Clementina", "Damara",
    "Lilly", "Luna", "Malinda", "Millie", "Mira", "Paoloma", "Rosa", "Talia", "Tullia", "Viola",
    "Winni", "Achille", "Apollo", "Calliope", "Diana", "Eros", "Maia", "Ninfa", "Sibilla",
    "Ulisse", "Zeus",
];

/// Picks names uniformly at random from an immutable table
pub struct NameGenerator {
    names: &'static [&'static str],
    rng: Mutex<StdRng>,
}

impl NameGenerator {
    /// Returns `None` for an empty table
    pub fn new(names: &'static [&'static str], rng: StdRng) -> Option<Self> {
        if names.is_empty() {
            return None;
        }
        Some(Self {
            names,
            rng: Mutex::new(rng),
        })
    }

    /// Generator over `CAT_NAMES` seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            names: CAT_NAMES,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator over `CAT_NAMES`
    pub fn seeded(seed: u64) -> Self {
        Self {
            names: CAT_NAMES,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn pick_name(&self) -> &'static str {
        let idx = self.rng.lock().gen_range(0..self.names.len());
        self.names[idx]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|candidate| *candidate == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl std::fmt::Debug for NameGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameGenerator")
            .field("names", &self.names.len())
            .finish_non_exhaustive()
    }
}
