use super::Point2;

/// Computes the signed area of a 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `points` wound counter-clockwise, reversing if necessary.
#[must_use]
pub fn wound_ccw(points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) < 0.0 {
        reversed(points)
    } else {
        points
    }
}

/// Returns `points` wound clockwise, reversing if necessary.
#[must_use]
pub fn wound_cw(points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) > 0.0 {
        reversed(points)
    } else {
        points
    }
}

fn reversed(mut points: Vec<Point2>) -> Vec<Point2> {
    points.reverse();
    points
}
