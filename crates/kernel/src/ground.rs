use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stride_common::{GroundHit, GroundProbe, LayerMask};

/// Stable key of a patch inside a [`Ground`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatchId(pub u32);

/// Horizontal walkable rectangle at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPatch {
    /// Minimum corner on the XZ plane.
    pub min: Vec2,
    /// Maximum corner on the XZ plane.
    pub max: Vec2,
    pub height: f32,
    pub layer: u8,
}

impl GroundPatch {
    pub fn new(min: Vec2, max: Vec2, height: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            height,
            layer: 0,
        }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn contains_xz(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    fn closest_xz(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Static level geometry: a set of ground patches.
///
/// BTreeMap keeps query tie-breaks deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ground {
    patches: BTreeMap<PatchId, GroundPatch>,
    next_id: u32,
}

impl Ground {
    pub fn new() -> Self {
        Self::default()
    }

    /// A square floor of half-size `extent` centred on the origin.
    pub fn flat(height: f32, extent: f32) -> Self {
        let mut ground = Self::new();
        ground.add_patch(GroundPatch::new(
            Vec2::splat(-extent),
            Vec2::splat(extent),
            height,
        ));
        ground
    }

    pub fn add_patch(&mut self, patch: GroundPatch) -> PatchId {
        let id = PatchId(self.next_id);
        self.next_id += 1;
        self.patches.insert(id, patch);
        id
    }

    pub fn remove_patch(&mut self, id: PatchId) -> Option<GroundPatch> {
        self.patches.remove(&id)
    }

    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    pub fn patches(&self) -> impl Iterator<Item = (&PatchId, &GroundPatch)> {
        self.patches.iter()
    }

    /// Highest surface crossed by a point moving from `from` to `to`.
    pub fn support_height(&self, from: Vec3, to: Vec3) -> Option<f32> {
        let xz = Vec2::new(to.x, to.z);
        self.patches
            .values()
            .filter(|p| p.contains_xz(xz) && from.y >= p.height && to.y < p.height)
            .map(|p| p.height)
            .reduce(f32::max)
    }
}

impl GroundProbe for Ground {
    fn cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<GroundHit> {
        let centre = Vec2::new(origin.x, origin.z);
        let mut best: Option<GroundHit> = None;
        for patch in self.patches.values() {
            if !mask.contains(patch.layer) || patch.height > origin.y {
                continue;
            }
            let contact = patch.closest_xz(centre);
            let lateral = centre.distance(contact);
            if lateral > radius {
                continue;
            }
            // Vertical gap between sphere bottom and surface at the contact offset.
            let rise = (radius * radius - lateral * lateral).sqrt();
            let distance = (origin.y - patch.height - rise).max(0.0);
            if distance > max_distance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(GroundHit {
                    point: Vec3::new(contact.x, patch.height, contact.y),
                    distance,
                    layer: patch.layer,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_hits_floor_below() {
        let ground = Ground::flat(0.0, 10.0);
        let hit = ground
            .cast_down(Vec3::new(1.0, 0.5, 2.0), 0.3, 1.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.point, Vec3::new(1.0, 0.0, 2.0));
        assert!((hit.distance - 0.2).abs() < 1e-6);
    }

    #[test]
    fn cast_respects_max_distance() {
        let ground = Ground::flat(0.0, 10.0);
        assert!(ground.cast_down(Vec3::new(0.0, 3.0, 0.0), 0.3, 0.3, LayerMask::ALL).is_none());
    }

    #[test]
    fn cast_respects_layer_mask() {
        let mut ground = Ground::new();
        ground.add_patch(GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 0.0).on_layer(4));
        let origin = Vec3::new(0.0, 0.5, 0.0);
        assert!(ground.cast_down(origin, 0.3, 1.0, LayerMask::layer(3)).is_none());
        assert!(ground.cast_down(origin, 0.3, 1.0, LayerMask::layer(4)).is_some());
    }

    #[test]
    fn cast_picks_nearest_surface() {
        let mut ground = Ground::flat(0.0, 10.0);
        ground.add_patch(GroundPatch::new(Vec2::splat(-1.0), Vec2::splat(1.0), 1.0));
        let hit = ground
            .cast_down(Vec3::new(0.0, 1.5, 0.0), 0.3, 5.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.point.y, 1.0);
    }

    #[test]
    fn sphere_catches_edge_within_radius() {
        let mut ground = Ground::new();
        ground.add_patch(GroundPatch::new(Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0), 0.0));
        let hit = ground
            .cast_down(Vec3::new(0.2, 0.5, 0.0), 0.3, 1.0, LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.point.x, 0.0);
        assert!(hit.distance > 0.2);
        assert!(ground.cast_down(Vec3::new(0.4, 0.5, 0.0), 0.3, 1.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn ignores_surfaces_above_origin() {
        let ground = Ground::flat(2.0, 10.0);
        assert!(ground.cast_down(Vec3::new(0.0, 1.0, 0.0), 0.3, 5.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn support_height_catches_crossing_only() {
        let ground = Ground::flat(0.0, 10.0);
        assert_eq!(ground.support_height(Vec3::new(0.0, 0.1, 0.0), Vec3::new(0.0, -0.1, 0.0)), Some(0.0));
        assert_eq!(ground.support_height(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -0.1, 0.0)), Some(0.0));
        assert_eq!(ground.support_height(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -2.0, 0.0)), None);
        assert_eq!(ground.support_height(Vec3::new(0.0, 1.0, 0.0), Vec3::new(20.0, -1.0, 0.0)), None);
    }

    #[test]
    fn remove_patch() {
        let mut ground = Ground::new();
        let id = ground.add_patch(GroundPatch::new(Vec2::ZERO, Vec2::ONE, 0.0));
        assert_eq!(ground.patch_count(), 1);
        assert!(ground.remove_patch(id).is_some());
        assert_eq!(ground.patch_count(), 0);
    }
}
