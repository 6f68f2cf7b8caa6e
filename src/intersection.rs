// src/intersection.rs

use std::collections::HashSet;

use crate::geometry::{Point2, Polygon};

pub struct PolygonCutter;

impl PolygonCutter {
    /// Cross product sign of (B-A)x(P-A): which side of the line A->B the
    /// point P lies on. Zero means collinear.
    #[inline]
    pub fn line_side(a: &Point2, b: &Point2, p: &Point2) -> f64 {
        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
    }

    /// Bounded intersection of segments [p1->p2] and [p3->p4].
    ///
    /// Solves the 2x2 linear system in determinant form. A zero determinant
    /// (parallel or collinear segments) yields `None`, even when collinear
    /// segments overlap. The solved point lies on both infinite lines; it is
    /// accepted only inside both segments' bounding boxes.
    pub fn segment_intersection(
        p1: &Point2,
        p2: &Point2,
        p3: &Point2,
        p4: &Point2,
    ) -> Option<Point2> {
        let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
        if denom == 0.0 {
            return None;
        }

        let d12 = p1.x * p2.y - p1.y * p2.x;
        let d34 = p3.x * p4.y - p3.y * p4.x;
        let px = (d12 * (p3.x - p4.x) - (p1.x - p2.x) * d34) / denom;
        let py = (d12 * (p3.y - p4.y) - (p1.y - p2.y) * d34) / denom;

        if px < p1.x.min(p2.x)
            || px > p1.x.max(p2.x)
            || py < p1.y.min(p2.y)
            || py > p1.y.max(p2.y)
            || px < p3.x.min(p4.x)
            || px > p3.x.max(p4.x)
            || py < p3.y.min(p4.y)
            || py > p3.y.max(p4.y)
        {
            return None;
        }
        Some(Point2::new(px, py))
    }

    /// Cuts `poly` with the chord [a->b].
    ///
    /// Vertices are bucketed by side of the cut line; each boundary crossing
    /// is appended to both buckets. Fewer than two crossings means the chord
    /// does not split this piece and it is returned unchanged. Either result
    /// bucket may come back degenerate after cleanup; callers tolerate that.
    pub fn cut_polygon_by_line(poly: &Polygon, a: &Point2, b: &Point2) -> Vec<Polygon> {
        let mut left: Vec<Point2> = Vec::new();
        let mut right: Vec<Point2> = Vec::new();
        let mut crossings = 0usize;

        let pts = poly.vertices();
        for i in 0..pts.len() {
            let cur = pts[i];
            let next = pts[(i + 1) % pts.len()];

            if Self::line_side(a, b, &cur) >= 0.0 {
                left.push(cur);
            } else {
                right.push(cur);
            }

            if let Some(hit) = Self::segment_intersection(&cur, &next, a, b) {
                crossings += 1;
                left.push(hit);
                right.push(hit);
            }
        }

        if crossings < 2 {
            return vec![poly.clone()];
        }

        vec![Self::clean_up_polygon(left), Self::clean_up_polygon(right)]
    }

    /// Drops points that repeat an earlier one once both coordinates are
    /// rounded to 3 decimals; first-seen order is kept.
    pub fn clean_up_polygon(points: Vec<Point2>) -> Polygon {
        let mut seen = HashSet::with_capacity(points.len());
        let mut unique = Vec::with_capacity(points.len());
        for p in points {
            if seen.insert(p.rounded_key()) {
                unique.push(p);
            }
        }
        Polygon::from_points(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(side: f64) -> Polygon {
        Polygon::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ])
    }

    #[test]
    fn line_side_basic_signs() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert!(PolygonCutter::line_side(&a, &b, &Point2::new(0.5, 1.0)) > 0.0);
        assert!(PolygonCutter::line_side(&a, &b, &Point2::new(0.5, -1.0)) < 0.0);
        assert_eq!(PolygonCutter::line_side(&a, &b, &Point2::new(7.0, 0.0)), 0.0);
    }

    #[test]
    fn segment_intersection_crossing() {
        let hit = PolygonCutter::segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((hit.x - 1.0).abs() < 1e-12);
        assert!((hit.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_intersection_parallel_is_none() {
        // Parallel, and also collinear-overlapping: both report None.
        assert!(PolygonCutter::segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        )
        .is_none());
        assert!(PolygonCutter::segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(3.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn segment_intersection_rejects_extrapolated_point() {
        // The infinite lines cross at (3, 3), outside the first segment.
        assert!(PolygonCutter::segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 4.0),
            &Point2::new(4.0, 2.0),
        )
        .is_none());
    }

    #[test]
    fn chord_splits_square_into_two_quads() {
        // Chord from (50, 0) on the top edge to (150, 200) on the bottom.
        let sq = square(200.0);
        let a = Point2::new(50.0, 0.0);
        let b = Point2::new(150.0, 200.0);
        let pieces = PolygonCutter::cut_polygon_by_line(&sq, &a, &b);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_eq!(piece.count(), 4);
            assert!((piece.area() - 20000.0).abs() < 20000.0 * 1e-6);
            let has = |p: &Point2| {
                piece
                    .vertices()
                    .iter()
                    .any(|v| (v.x - p.x).abs() < 1e-9 && (v.y - p.y).abs() < 1e-9)
            };
            assert!(has(&a));
            assert!(has(&b));
        }
    }

    #[test]
    fn non_crossing_line_returns_polygon_unchanged() {
        let sq = square(200.0);
        // Entirely to the right of the square: no boundary crossing.
        let pieces = PolygonCutter::cut_polygon_by_line(
            &sq,
            &Point2::new(300.0, 0.0),
            &Point2::new(300.0, 200.0),
        );
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].vertices(), sq.vertices());
    }

    #[test]
    fn degenerate_input_passes_through() {
        let sliver = Polygon::from_points(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        let pieces = PolygonCutter::cut_polygon_by_line(
            &sliver,
            &Point2::new(0.5, -1.0),
            &Point2::new(0.5, 1.0),
        );
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].vertices(), sliver.vertices());
    }

    #[test]
    fn clean_up_drops_near_duplicates_keeps_order() {
        let cleaned = PolygonCutter::clean_up_polygon(vec![
            Point2::new(1.0, 1.0),
            Point2::new(1.0004, 0.9996),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 1.0),
        ]);
        assert_eq!(cleaned.count(), 2);
        assert_eq!(cleaned.vertices()[0], Point2::new(1.0, 1.0));
        assert_eq!(cleaned.vertices()[1], Point2::new(2.0, 2.0));
    }

    proptest! {
        #[test]
        fn line_side_antisymmetric_under_endpoint_swap(
            ax in -100.0f64..100.0, ay in -100.0f64..100.0,
            bx in -100.0f64..100.0, by in -100.0f64..100.0,
            px in -100.0f64..100.0, py in -100.0f64..100.0,
        ) {
            let a = Point2::new(ax, ay);
            let b = Point2::new(bx, by);
            let p = Point2::new(px, py);
            let s1 = PolygonCutter::line_side(&a, &b, &p);
            let s2 = PolygonCutter::line_side(&b, &a, &p);
            prop_assert!((s1 + s2).abs() <= 1e-6 * (1.0 + s1.abs().max(s2.abs())));
        }

        #[test]
        fn intersection_point_stays_in_both_bounding_boxes(
            x1 in -50.0f64..50.0, y1 in -50.0f64..50.0,
            x2 in -50.0f64..50.0, y2 in -50.0f64..50.0,
            x3 in -50.0f64..50.0, y3 in -50.0f64..50.0,
            x4 in -50.0f64..50.0, y4 in -50.0f64..50.0,
        ) {
            let p1 = Point2::new(x1, y1);
            let p2 = Point2::new(x2, y2);
            let p3 = Point2::new(x3, y3);
            let p4 = Point2::new(x4, y4);
            if let Some(hit) = PolygonCutter::segment_intersection(&p1, &p2, &p3, &p4) {
                let eps = 1e-9;
                prop_assert!(hit.x >= x1.min(x2) - eps && hit.x <= x1.max(x2) + eps);
                prop_assert!(hit.y >= y1.min(y2) - eps && hit.y <= y1.max(y2) + eps);
                prop_assert!(hit.x >= x3.min(x4) - eps && hit.x <= x3.max(x4) + eps);
                prop_assert!(hit.y >= y3.min(y4) - eps && hit.y <= y3.max(y4) + eps);
            }
        }

        // A chord between two different edges of the square always splits it
        // into two pieces whose areas sum back to the square's.
        #[test]
        fn two_way_cut_conserves_area(
            t1 in 0.01f64..0.99, t2 in 0.01f64..0.99,
            edge1 in 0u8..4, offset in 1u8..4,
        ) {
            let side = 200.0;
            let edge2 = (edge1 + offset) % 4;
            let on_edge = |edge: u8, t: f64| match edge {
                0 => Point2::new(t * side, 0.0),
                1 => Point2::new(side, t * side),
                2 => Point2::new(t * side, side),
                _ => Point2::new(0.0, t * side),
            };
            let a = on_edge(edge1, t1);
            let b = on_edge(edge2, t2);
            let sq = square(side);
            let pieces = PolygonCutter::cut_polygon_by_line(&sq, &a, &b);
            if pieces.len() == 2 {
                let sum: f64 = pieces.iter().map(Polygon::area).sum();
                prop_assert!((sum - sq.area()).abs() < sq.area() * 1e-6);
            }
        }

        #[test]
        fn clean_up_is_idempotent_and_never_grows(
            pts in proptest::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..24),
        ) {
            let points: Vec<Point2> = pts.iter().map(|&(x, y)| Point2::new(x, y)).collect();
            let once = PolygonCutter::clean_up_polygon(points.clone());
            let twice = PolygonCutter::clean_up_polygon(once.vertices().to_vec());
            prop_assert_eq!(once.vertices(), twice.vertices());
            prop_assert!(once.count() <= points.len());
        }
    }
}
