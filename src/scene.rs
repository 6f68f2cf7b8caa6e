// src/scene.rs

use glam::Vec2;
use rand::Rng;

use square_shatter::{voronoi_mesh, BisectorCells, ChordGenerator, MeshConfig, Polygon};

// Piece palette: red, green, blue, yellow, orange, purple, pink.
pub const PALETTE: [[f32; 4]; 7] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 0.5, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.65, 0.0, 1.0],
    [0.5, 0.0, 0.5, 1.0],
    [1.0, 0.75, 0.8, 1.0],
];

/// Outward drift at full spread, as a multiple of each piece's centroid
/// offset from the square's center.
pub const DRIFT_SCALE: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Chords,
    Voronoi,
}

impl MeshKind {
    pub fn label(self) -> &'static str {
        match self {
            MeshKind::Chords => "line cuts",
            MeshKind::Voronoi => "voronoi cells",
        }
    }
}

/// One drawable piece: geometry plus its color and full-spread drift vector.
pub struct Piece {
    pub polygon: Polygon,
    pub color: [f32; 4],
    pub drift: Vec2,
}

pub struct DemoScene {
    pub pieces: Vec<Piece>,
    pub side: f32,
}

/// Builds the scene for one cycle: a fresh mesh, a random palette color per
/// piece, and the centroid-based drift the animation translates along.
/// Degenerate pieces never make it into the scene.
pub fn build_scene<R: Rng>(rng: &mut R, cfg: &MeshConfig, kind: MeshKind) -> DemoScene {
    let mesh = match kind {
        MeshKind::Chords => ChordGenerator::subdivide_square_with_lines(rng, cfg),
        MeshKind::Voronoi => voronoi_mesh(rng, cfg, &BisectorCells),
    };

    let center = (cfg.side_length / 2.0) as f32;
    let mut pieces = Vec::with_capacity(mesh.len());
    for poly in mesh.valid_pieces() {
        let Some(centroid) = poly.centroid() else {
            continue;
        };
        let drift =
            Vec2::new(centroid.x as f32 - center, centroid.y as f32 - center) * DRIFT_SCALE;
        pieces.push(Piece {
            polygon: poly.clone(),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            drift,
        });
    }

    log::info!(
        "scene rebuilt: {} drawable pieces ({} raw) via {}",
        pieces.len(),
        mesh.len(),
        kind.label()
    );

    DemoScene {
        pieces,
        side: cfg.side_length as f32,
    }
}
