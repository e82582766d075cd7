//! Placed world objects.

use glam::Vec3;

use crate::core::WeightMap;

/// Object category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Tree,
    Rock,
    /// Anomalies: totems, glowing stones and other things that should not
    /// be there.
    Strange,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Tree, ObjectKind::Rock, ObjectKind::Strange];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Tree => "tree",
            ObjectKind::Rock => "rock",
            ObjectKind::Strange => "strange",
        }
    }

    /// Whether this kind may stand on water cells.
    pub fn tolerates_water(&self) -> bool {
        matches!(self, ObjectKind::Strange)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object placed on the terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct ProceduralObject {
    /// Unique within a scene, assigned in increasing order.
    pub id: u64,
    pub kind: ObjectKind,
    /// Variant within the kind (`pine`, `dead`, `boulder`, `totem`, ...).
    pub sub_type: String,
    /// World position; `y` sits on the terrain surface.
    pub position: Vec3,
    pub scale: f32,
    /// Yaw in radians.
    pub rotation: f32,
    /// Namespaced mood weights (`atmosphere.fear`, `audio.creak`, ...).
    pub metadata: WeightMap,
    /// Seed for any per-object detail generation downstream.
    pub seed: u64,
}
