use crate::ui::*;
use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleShape {
    Circle,
    Polygon,
    Star,
}

/// What the field does around the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    /// Links nearby particles to the pointer with faint lines.
    Grab,
    /// Pushes nearby particles away.
    Repulse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    Up,
    Down,
    Wander,
}

/// How a field looks and moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTheme {
    pub name: String,
    pub palette: Vec<Color>,
    pub shapes: Vec<ParticleShape>,
    /// Roughly pixels per frame at 60 Hz.
    pub speed: f32,
    pub drift: Drift,
    /// Base opacity and the floor it twinkles down to.
    pub opacity: (f32, f32),
    /// Base size in pixels and the floor it pulses down to.
    pub size: (f32, f32),
    /// Keeps feeding particles in from the bottom edge.
    pub emitter: bool,
    pub hover: Hover,
    /// Colour twinkle peaks flare towards, `None` keeps the particle's own.
    pub twinkle: Option<Color>,
}

const TYPE_MOTION: &[(&str, ParticleShape, f32)] = &[
    ("fire", ParticleShape::Circle, 3.0),
    ("water", ParticleShape::Circle, 1.5),
    ("grass", ParticleShape::Polygon, 1.0),
    ("electric", ParticleShape::Star, 5.0),
    ("ice", ParticleShape::Circle, 0.5),
    ("psychic", ParticleShape::Star, 2.0),
    ("ghost", ParticleShape::Circle, 1.0),
    ("dragon", ParticleShape::Star, 4.0),
    ("dark", ParticleShape::Circle, 1.0),
    ("fairy", ParticleShape::Star, 1.5),
    ("fighting", ParticleShape::Polygon, 3.0),
    ("poison", ParticleShape::Circle, 2.0),
    ("ground", ParticleShape::Polygon, 1.0),
    ("flying", ParticleShape::Circle, 2.0),
    ("bug", ParticleShape::Circle, 2.0),
    ("rock", ParticleShape::Polygon, 0.5),
    ("steel", ParticleShape::Polygon, 1.0),
    ("normal", ParticleShape::Circle, 1.0),
];

impl ParticleTheme {
    /// The multicolour field shown before the first catch.
    pub fn ambient() -> Self {
        Self {
            name: "ambient".to_string(),
            palette: AMBIENT_COLORS.to_vec(),
            shapes: vec![ParticleShape::Circle, ParticleShape::Star],
            speed: 0.8,
            drift: Drift::Wander,
            opacity: (0.6, 0.1),
            size: (3.0, 0.5),
            emitter: false,
            hover: Hover::Grab,
            twinkle: None,
        }
    }

    /// Field for a primary type, unknown names get the `normal` theme.
    pub fn for_type(name: &str) -> Self {
        let (name, shape, speed) = TYPE_MOTION
            .iter()
            .find(|(n, ..)| *n == name)
            .copied()
            .unwrap_or(("normal", ParticleShape::Circle, 1.0));

        let shapes = match shape {
            ParticleShape::Star => vec![ParticleShape::Star, ParticleShape::Circle],
            other => vec![other],
        };
        let drift = match name {
            "fire" => Drift::Up,
            "water" => Drift::Down,
            _ => Drift::Wander,
        };

        Self {
            name: name.to_string(),
            palette: vec![type_color(name), NEON_CYAN, NEON_PINK],
            shapes,
            speed,
            drift,
            opacity: (0.7, 0.2),
            size: (4.0, 1.0),
            emitter: name == "fire",
            hover: Hover::Repulse,
            twinkle: Some(type_color(name)),
        }
    }
}

/// Flat five pointed star in the XY plane facing +Z, as a triangle fan.
pub fn star_mesh(points: u32, outer: f32, inner: f32) -> Mesh {
    let corners = points * 2;
    let mut positions = vec![[0.0, 0.0, 0.0]];
    for i in 0..corners {
        let angle = FRAC_PI_2 + i as f32 * PI / points as f32;
        let r = if i % 2 == 0 { outer } else { inner };
        positions.push([angle.cos() * r, angle.sin() * r, 0.0]);
    }
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / outer * 0.5 + 0.5, 0.5 - p[1] / outer * 0.5])
        .collect();

    let mut indices = Vec::with_capacity(corners as usize * 3);
    for i in 0..corners {
        indices.extend_from_slice(&[0, i + 1, (i + 1) % corners + 1]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_falls_back_to_normal() {
        let theme = ParticleTheme::for_type("stellar");
        assert_eq!(theme, ParticleTheme::for_type("normal"));
        assert_eq!(theme.drift, Drift::Wander);
    }

    #[test]
    fn fire_rises_and_water_sinks() {
        let fire = ParticleTheme::for_type("fire");
        assert_eq!(fire.drift, Drift::Up);
        assert!(fire.emitter);
        assert_eq!(fire.palette[0], type_color("fire"));

        assert_eq!(fire.hover, Hover::Repulse);
        assert_eq!(fire.twinkle, Some(type_color("fire")));

        let water = ParticleTheme::for_type("water");
        assert_eq!(water.drift, Drift::Down);
        assert!(!water.emitter);
    }

    #[test]
    fn ambient_field_grabs_without_tint() {
        let ambient = ParticleTheme::ambient();
        assert_eq!(ambient.hover, Hover::Grab);
        assert_eq!(ambient.twinkle, None);
    }

    #[test]
    fn star_types_mix_in_circles() {
        let electric = ParticleTheme::for_type("electric");
        assert_eq!(
            electric.shapes,
            [ParticleShape::Star, ParticleShape::Circle]
        );
        assert_eq!(electric.speed, 5.0);
        assert_eq!(ParticleTheme::for_type("rock").shapes, [ParticleShape::Polygon]);
    }

    #[test]
    fn star_fan_closes_on_itself() {
        let mesh = star_mesh(5, 1.0, 0.4);
        assert_eq!(mesh.count_vertices(), 11);
        let Some(Indices::U32(idx)) = mesh.indices() else {
            panic!("u32 indices expected");
        };
        assert_eq!(idx.len(), 30);
        assert_eq!(&idx[27..], &[0, 10, 1]);
    }
}
