// src/generator.rs

use rand::Rng;

use crate::config::MeshConfig;
use crate::geometry::{Point2, Polygon};
use crate::intersection::PolygonCutter;
use crate::mesh::Mesh;

/// Produces the polygon mesh for one animation cycle by cutting a square
/// with random chords. Pure given the RNG: callers thread a seeded `Rng`
/// through for reproducible meshes.
pub struct ChordGenerator;

impl ChordGenerator {
    /// The four corners of a side-`side` square, clockwise from the origin.
    pub fn create_initial_square(side: f64) -> Polygon {
        Polygon::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ])
    }

    /// Uniform random point on one edge of the square.
    /// Edges: 0 top (y=0), 1 right (x=side), 2 bottom (y=side), 3 left (x=0).
    pub fn random_point_on_edge<R: Rng>(rng: &mut R, edge: u8, side: f64) -> Point2 {
        match edge {
            0 => Point2::new(rng.gen::<f64>() * side, 0.0),
            1 => Point2::new(side, rng.gen::<f64>() * side),
            2 => Point2::new(rng.gen::<f64>() * side, side),
            3 => Point2::new(0.0, rng.gen::<f64>() * side),
            _ => Point2::new(0.0, 0.0),
        }
    }

    /// Random chords, each connecting two *different* edges of the square.
    /// The chord count is drawn uniformly from `[min, max)`.
    pub fn generate_random_chords<R: Rng>(rng: &mut R, cfg: &MeshConfig) -> Vec<(Point2, Point2)> {
        let count = rng.gen_range(cfg.count.min..cfg.count.max);
        let mut chords = Vec::with_capacity(count);
        for _ in 0..count {
            let edge1 = rng.gen_range(0..4u8);
            let mut edge2 = rng.gen_range(0..4u8);
            while edge2 == edge1 {
                edge2 = rng.gen_range(0..4u8);
            }
            chords.push((
                Self::random_point_on_edge(rng, edge1, cfg.side_length),
                Self::random_point_on_edge(rng, edge2, cfg.side_length),
            ));
        }
        chords
    }

    /// Successively cuts the initial square with random chords. Each chord
    /// is applied to every piece surviving the earlier cuts, so the piece
    /// count grows combinatorially with the chord count.
    pub fn subdivide_square_with_lines<R: Rng>(rng: &mut R, cfg: &MeshConfig) -> Mesh {
        let chords = Self::generate_random_chords(rng, cfg);
        let mut pieces = vec![Self::create_initial_square(cfg.side_length)];
        for (a, b) in &chords {
            pieces = pieces
                .iter()
                .flat_map(|poly| PolygonCutter::cut_polygon_by_line(poly, a, b))
                .collect();
        }
        Mesh::from_polygons(pieces)
    }

    /// Uniform random points inside the square, used as Voronoi seeds.
    pub fn random_interior_points<R: Rng>(rng: &mut R, count: usize, side: f64) -> Vec<Point2> {
        (0..count)
            .map(|_| Point2::new(rng.gen::<f64>() * side, rng.gen::<f64>() * side))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountRange;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cfg(min: usize, max: usize) -> MeshConfig {
        MeshConfig {
            side_length: 200.0,
            count: CountRange { min, max },
        }
    }

    #[test]
    fn initial_square_has_the_four_corners() {
        let sq = ChordGenerator::create_initial_square(200.0);
        assert_eq!(
            sq.vertices(),
            &[
                Point2::new(0.0, 0.0),
                Point2::new(200.0, 0.0),
                Point2::new(200.0, 200.0),
                Point2::new(0.0, 200.0),
            ]
        );
        assert!((sq.area() - 40000.0).abs() < 1e-9);
    }

    #[test]
    fn edge_points_lie_on_their_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let top = ChordGenerator::random_point_on_edge(&mut rng, 0, 200.0);
            assert_eq!(top.y, 0.0);
            assert!((0.0..200.0).contains(&top.x));

            let right = ChordGenerator::random_point_on_edge(&mut rng, 1, 200.0);
            assert_eq!(right.x, 200.0);
            assert!((0.0..200.0).contains(&right.y));

            let bottom = ChordGenerator::random_point_on_edge(&mut rng, 2, 200.0);
            assert_eq!(bottom.y, 200.0);

            let left = ChordGenerator::random_point_on_edge(&mut rng, 3, 200.0);
            assert_eq!(left.x, 0.0);
        }
    }

    #[test]
    fn chords_connect_two_different_edges() {
        let edge_of = |p: &Point2| -> Vec<u8> {
            let mut edges = Vec::new();
            if p.y == 0.0 {
                edges.push(0);
            }
            if p.x == 200.0 {
                edges.push(1);
            }
            if p.y == 200.0 {
                edges.push(2);
            }
            if p.x == 0.0 {
                edges.push(3);
            }
            edges
        };
        let mut rng = StdRng::seed_from_u64(11);
        let chords = ChordGenerator::generate_random_chords(&mut rng, &cfg(20, 50));
        assert!((20..50).contains(&chords.len()));
        for (a, b) in &chords {
            let ea = edge_of(a);
            let eb = edge_of(b);
            assert!(!ea.is_empty() && !eb.is_empty());
            // Shared edge membership would mean the chord runs along one side.
            assert!(ea.iter().all(|e| !eb.contains(e)));
        }
    }

    #[test]
    fn zero_chords_yields_the_initial_square() {
        let mut rng = StdRng::seed_from_u64(3);
        let mesh = ChordGenerator::subdivide_square_with_lines(&mut rng, &cfg(0, 1));
        assert_eq!(mesh.len(), 1);
        assert_eq!(
            mesh.polygons()[0].vertices(),
            ChordGenerator::create_initial_square(200.0).vertices()
        );
    }

    #[test]
    fn subdivision_is_deterministic_for_a_fixed_seed() {
        let config = cfg(20, 50);
        let a = ChordGenerator::subdivide_square_with_lines(&mut StdRng::seed_from_u64(99), &config);
        let b = ChordGenerator::subdivide_square_with_lines(&mut StdRng::seed_from_u64(99), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn subdivision_tiles_the_square() {
        let config = cfg(20, 50);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mesh = ChordGenerator::subdivide_square_with_lines(&mut rng, &config);
            assert!(mesh.len() > 1);
            let total = mesh.total_area();
            assert!(
                (total - 40000.0).abs() < 40000.0 * 1e-6,
                "seed {seed}: total area {total}"
            );
        }
    }

    #[test]
    fn interior_points_stay_inside() {
        let mut rng = StdRng::seed_from_u64(5);
        for p in ChordGenerator::random_interior_points(&mut rng, 200, 200.0) {
            assert!((0.0..200.0).contains(&p.x));
            assert!((0.0..200.0).contains(&p.y));
        }
    }
}
