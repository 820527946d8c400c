//! Sample route traces in planar (x, z) coordinates.

#![allow(dead_code)]

use bikeway::geometry::Point;

pub fn points(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

/// Right-angle staircase, every interior vertex turns 90 degrees.
pub fn staircase() -> Vec<Point> {
    points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

/// Four evenly spaced collinear points.
pub fn straight_line() -> Vec<Point> {
    points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
}

/// Straight line with a duplicated midpoint.
pub fn duplicate_midpoint() -> Vec<Point> {
    points(&[(0.0, 0.0), (5.0, 0.0), (5.0, 0.0), (10.0, 0.0)])
}

/// A block loop through a town grid, sampled every 10 units along each street,
/// with the GPS receiver logging the same position while waiting at the
/// second junction.
pub fn town_loop() -> Vec<Point> {
    let mut trace = Vec::new();
    for i in 0..=10 {
        trace.push(Point::new(i as f64 * 10.0, 0.0));
    }
    // Waiting at the junction.
    trace.push(Point::new(100.0, 0.0));
    trace.push(Point::new(100.0, 0.0));
    for i in 1..=5 {
        trace.push(Point::new(100.0, i as f64 * 10.0));
    }
    for i in 1..=10 {
        trace.push(Point::new(100.0 - i as f64 * 10.0, 50.0));
    }
    trace
}

/// A long wavy trace with gentle bends, occasional sharp turns and repeated samples.
pub fn long_wavy_trace(n: usize) -> Vec<Point> {
    let mut trace = Vec::with_capacity(n);
    let mut x = 0.0;
    let mut z = 0.0;
    let mut heading: f64 = 0.0;
    for i in 0..n {
        if i % 97 == 0 {
            heading += 1.7;
        } else {
            heading += 0.05 * ((i as f64) * 0.3).sin();
        }
        if i % 13 != 0 {
            x += heading.cos();
            z += heading.sin();
        }
        trace.push(Point::new(x, z));
    }
    trace
}
