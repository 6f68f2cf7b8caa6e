// src/voronoi.rs

use rand::Rng;

use crate::config::MeshConfig;
use crate::generator::ChordGenerator;
use crate::geometry::{Point2, Polygon};
use crate::mesh::Mesh;

/// Seam for the cell computation: given seed points and a bounding polygon,
/// return one closed convex cell per seed, cells partitioning the bounds.
/// Lets the mesh pipeline swap cell strategies without caring how the cells
/// are computed.
pub trait CellSource {
    fn compute_cells(&self, seeds: &[Point2], bounds: &Polygon) -> Vec<Polygon>;
}

/// Voronoi cells computed by clipping the bounds against the perpendicular
/// bisector of every other seed, one half-plane at a time.
pub struct BisectorCells;

impl CellSource for BisectorCells {
    fn compute_cells(&self, seeds: &[Point2], bounds: &Polygon) -> Vec<Polygon> {
        seeds
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                let mut cell = bounds.clone();
                for (j, other) in seeds.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    cell = clip_closer_half(&cell, seed, other);
                    if cell.is_degenerate() {
                        break;
                    }
                }
                cell
            })
            .collect()
    }
}

/// Keeps the part of `poly` at least as close to `seed` as to `other`,
/// inserting the bisector crossing on each boundary edge that changes side.
fn clip_closer_half(poly: &Polygon, seed: &Point2, other: &Point2) -> Polygon {
    let dx = other.x - seed.x;
    let dy = other.y - seed.y;
    if dx * dx + dy * dy < 1e-12 {
        // Coincident seeds have no bisector; the later duplicate ends up
        // with whatever the remaining clips leave.
        return poly.clone();
    }
    let mx = (seed.x + other.x) / 2.0;
    let my = (seed.y + other.y) / 2.0;
    // Negative on the seed's side of the bisector, positive on the other's.
    let eval = |p: &Point2| (p.x - mx) * dx + (p.y - my) * dy;

    let pts = poly.vertices();
    if pts.is_empty() {
        return poly.clone();
    }
    let mut out: Vec<Point2> = Vec::with_capacity(pts.len() + 1);
    let mut prev = pts[pts.len() - 1];
    let mut prev_d = eval(&prev);
    for &cur in pts {
        let cur_d = eval(&cur);
        if (prev_d <= 0.0) != (cur_d <= 0.0) {
            let t = prev_d / (prev_d - cur_d);
            out.push(Point2::new(
                prev.x + t * (cur.x - prev.x),
                prev.y + t * (cur.y - prev.y),
            ));
        }
        if cur_d <= 0.0 {
            out.push(cur);
        }
        prev = cur;
        prev_d = cur_d;
    }
    Polygon::from_points(out)
}

/// The alternative mesh pipeline: N random interior seeds, one cell each.
pub fn voronoi_mesh<R: Rng>(rng: &mut R, cfg: &MeshConfig, source: &dyn CellSource) -> Mesh {
    let count = rng.gen_range(cfg.count.min..cfg.count.max);
    let seeds = ChordGenerator::random_interior_points(rng, count, cfg.side_length);
    let bounds = ChordGenerator::create_initial_square(cfg.side_length);
    Mesh::from_polygons(source.compute_cells(&seeds, &bounds))
}
