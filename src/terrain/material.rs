//! Surface materials and elevation-driven material selection.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Surface material of a terrain cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Water,
    /// Soft ground used by clearings, islands and swamp margins.
    Moss,
    #[default]
    Dirt,
    Rock,
    Snow,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Water,
        Material::Moss,
        Material::Dirt,
        Material::Rock,
        Material::Snow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Water => "water",
            Material::Moss => "moss",
            Material::Dirt => "dirt",
            Material::Rock => "rock",
            Material::Snow => "snow",
        }
    }

    /// Material implied by elevation alone.
    pub fn from_elevation(elevation: f32) -> Self {
        if elevation < 0.3 {
            Material::Water
        } else if elevation < 0.55 {
            Material::Dirt
        } else if elevation < 0.8 {
            Material::Rock
        } else {
            Material::Snow
        }
    }

    /// Whether the material is physically implausible at this elevation.
    pub fn implausible_at(&self, elevation: f32) -> bool {
        match self {
            Material::Water => elevation > 0.5,
            Material::Snow => elevation < 0.6,
            Material::Moss => elevation > 0.85,
            Material::Dirt | Material::Rock => false,
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick a material for a cell by roulette over the biome's allowed list.
///
/// The elevation default gets triple weight and implausible combinations
/// near-zero weight. An empty list yields the default.
pub fn choose_material<R: Rng + ?Sized>(elevation: f32, allowed: &[Material], rng: &mut R) -> Material {
    let default = Material::from_elevation(elevation);
    if allowed.is_empty() {
        return default;
    }

    let weight = |m: Material| {
        if m == default {
            3.0
        } else if m.implausible_at(elevation) {
            0.01
        } else {
            1.0
        }
    };

    let total: f32 = allowed.iter().map(|&m| weight(m)).sum();
    let mut pick = rng.random::<f32>() * total;
    for &m in allowed {
        pick -= weight(m);
        if pick < 0.0 {
            return m;
        }
    }
    // Float round-off can leave a sliver past the last bucket
    allowed[allowed.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_elevation_thresholds() {
        assert_eq!(Material::from_elevation(0.1), Material::Water);
        assert_eq!(Material::from_elevation(0.3), Material::Dirt);
        assert_eq!(Material::from_elevation(0.6), Material::Rock);
        assert_eq!(Material::from_elevation(0.9), Material::Snow);
    }

    #[test]
    fn test_empty_allowed_uses_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(choose_material(0.9, &[], &mut rng), Material::Snow);
    }

    #[test]
    fn test_choice_is_from_allowed_list() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let allowed = [Material::Dirt, Material::Moss];
        for i in 0..200 {
            let m = choose_material(i as f32 / 200.0, &allowed, &mut rng);
            assert!(allowed.contains(&m));
        }
    }

    #[test]
    fn test_default_dominates_and_water_rare_up_high() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let allowed = [Material::Water, Material::Dirt, Material::Rock];
        let mut water = 0;
        let mut rock = 0;
        for _ in 0..2000 {
            match choose_material(0.7, &allowed, &mut rng) {
                Material::Water => water += 1,
                Material::Rock => rock += 1,
                _ => {}
            }
        }
        assert!(rock > 1000, "default should win most draws, got {rock}");
        assert!(water < 20, "water at high elevation should be rare, got {water}");
    }
}
