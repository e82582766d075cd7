//! Region labels: the sub-biome classification carried by every cell.

/// Sub-biome tag used to bias carving and object placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Pond,
    Swamp,
    SwampPit,
    River,
    Clearing,
    LowForest,
    Forest,
    DenseForest,
    Island,
    Highland,
    Rocky,
    Ravine,
    MountainPeak,
    Path,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Pond => "pond",
            Region::Swamp => "swamp",
            Region::SwampPit => "swamp_pit",
            Region::River => "river",
            Region::Clearing => "clearing",
            Region::LowForest => "low_forest",
            Region::Forest => "forest",
            Region::DenseForest => "dense_forest",
            Region::Island => "island",
            Region::Highland => "highland",
            Region::Rocky => "rocky",
            Region::Ravine => "ravine",
            Region::MountainPeak => "mountain_peak",
            Region::Path => "path",
        }
    }

    /// Regions where anomalies prefer to appear.
    pub fn is_dark(&self) -> bool {
        matches!(
            self,
            Region::Swamp | Region::DenseForest | Region::Ravine | Region::SwampPit
        )
    }

    /// Classify a cell from its elevation band and humidity.
    ///
    /// `tie_break` is a low-frequency noise sample in `[0, 1]`; it decides
    /// between candidate labels inside a band so that boundaries follow smooth
    /// contours instead of jittering cell to cell.
    pub fn classify(elevation: f32, humidity: f32, tie_break: f32) -> Self {
        if elevation < 0.25 {
            if humidity > 0.6 { Region::Swamp } else { Region::Pond }
        } else if elevation < 0.4 {
            if humidity > 0.6 {
                if tie_break < 0.6 { Region::Swamp } else { Region::LowForest }
            } else if tie_break < 0.3 {
                Region::Clearing
            } else {
                Region::LowForest
            }
        } else if elevation < 0.6 {
            if humidity > 0.55 {
                if tie_break < 0.5 { Region::DenseForest } else { Region::Forest }
            } else if tie_break < 0.2 {
                Region::Clearing
            } else {
                Region::Forest
            }
        } else if elevation < 0.75 {
            if humidity > 0.5 { Region::DenseForest } else { Region::Highland }
        } else if elevation <= 0.85 {
            if tie_break < 0.3 { Region::Highland } else { Region::Rocky }
        } else {
            Region::MountainPeak
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
