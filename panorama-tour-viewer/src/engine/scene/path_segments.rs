use bevy::prelude::*;
use tour_constants::paths::{
    MIN_SEGMENT_LENGTH, PATH_EMISSIVE_INTENSITY, PATH_RADIUS, PATH_RESOLUTION,
};

use crate::engine::assets::colour::resolve_colour;
use crate::engine::assets::tour_catalog::PathDescriptor;

/// Placement of one connector cylinder between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlacement {
    pub path_id: String,
    pub start: Vec3,
    pub end: Vec3,
    pub length: f32,
    pub rotation: Quat,
}

impl SegmentPlacement {
    /// Returns `None` for pairs closer than [`MIN_SEGMENT_LENGTH`].
    pub fn between(path_id: &str, start: Vec3, end: Vec3) -> Option<Self> {
        let direction = end - start;
        let length = direction.length();
        if length < MIN_SEGMENT_LENGTH {
            return None;
        }

        Some(Self {
            path_id: path_id.to_string(),
            start,
            end,
            length,
            // Shortest arc from the cylinder's canonical axis onto the segment.
            rotation: Quat::from_rotation_arc(Vec3::Y, direction / length),
        })
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.midpoint()).with_rotation(self.rotation)
    }
}

/// One segment per consecutive waypoint pair, skipping degenerate pairs.
pub fn build_path_segments(path: &PathDescriptor) -> Vec<SegmentPlacement> {
    path.points
        .windows(2)
        .filter_map(|pair| SegmentPlacement::between(&path.id, pair[0].into(), pair[1].into()))
        .collect()
}

/// Segment tag naming the logical path it belongs to.
#[derive(Component, Debug, Clone)]
pub struct PathSegment {
    pub path_id: String,
}

/// Parent entity of all segments for the active scene.
#[derive(Component)]
pub struct PathGroup;

/// Path colour with the connector's emissive glow.
pub fn path_material(path: &PathDescriptor) -> StandardMaterial {
    let colour = resolve_colour(path.color.as_ref(), Color::WHITE);
    StandardMaterial {
        base_color: colour,
        emissive: colour.to_linear() * PATH_EMISSIVE_INTENSITY,
        ..default()
    }
}

pub fn segment_mesh(placement: &SegmentPlacement) -> Mesh {
    Cylinder::new(PATH_RADIUS, placement.length)
        .mesh()
        .resolution(PATH_RESOLUTION)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::tour_catalog::Position;

    fn path(points: &[(f32, f32, f32)]) -> PathDescriptor {
        PathDescriptor {
            id: "route".into(),
            color: None,
            points: points
                .iter()
                .map(|&(x, y, z)| Position { x, y, z })
                .collect(),
        }
    }

    #[test]
    fn near_duplicate_waypoints_are_skipped() {
        let segments = build_path_segments(&path(&[
            (0.0, 0.0, 0.0),
            (0.0, 10.0, 0.0),
            (0.0, 10.05, 0.0),
        ]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].path_id, "route");
        assert!((segments[0].length - 10.0).abs() < 1e-5);
    }

    #[test]
    fn segment_sits_at_midpoint_aligned_with_direction() {
        let segments = build_path_segments(&path(&[(0.0, 0.0, 0.0), (6.0, 0.0, 8.0)]));
        let segment = &segments[0];
        assert!((segment.length - 10.0).abs() < 1e-5);
        assert!(segment.midpoint().abs_diff_eq(Vec3::new(3.0, 0.0, 4.0), 1e-5));

        let axis = segment.rotation * Vec3::Y;
        assert!(axis.abs_diff_eq(Vec3::new(0.6, 0.0, 0.8), 1e-5));
    }

    #[test]
    fn downward_segment_flips_axis() {
        let segments = build_path_segments(&path(&[(0.0, 5.0, 0.0), (0.0, -5.0, 0.0)]));
        let axis = segments[0].rotation * Vec3::Y;
        assert!(axis.abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn short_paths_produce_nothing() {
        assert!(build_path_segments(&path(&[])).is_empty());
        assert!(build_path_segments(&path(&[(1.0, 2.0, 3.0)])).is_empty());
    }

    #[test]
    fn segments_keep_waypoint_order() {
        let segments = build_path_segments(&path(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
        ]));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].end, segments[1].start);
    }
}
