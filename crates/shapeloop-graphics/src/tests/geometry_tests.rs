use super::*;

#[test]
fn distance_and_length() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, 6.0);
    assert_eq!(a.distance_to(&b), 5.0);
    assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
}

#[test]
fn normalized_has_unit_length() {
    let unit = Point::new(3.0, 4.0).normalized();
    assert_eq!(unit, Point::new(0.6, 0.8));
    assert!((unit.length() - 1.0).abs() < 1e-6);
}

#[test]
fn zero_vector_normalizes_to_zero() {
    assert_eq!(Point::ORIGIN.normalized(), Point::ORIGIN);
}

#[test]
fn square_is_closed_loop_around_origin() {
    let square = Shape::square(2.0);
    assert_eq!(square.paths.len(), 4);
    for (edge, next) in square.paths.iter().zip(square.paths.iter().cycle().skip(1)) {
        assert_eq!(edge.points.len(), 2);
        assert_eq!(edge.points[1], next.points[0]);
        assert_eq!(edge.points[0].distance_to(&edge.points[1]), 2.0);
    }
    assert_eq!(square.paths[0].points[0], Point::new(-1.0, -1.0));
    assert_eq!(square.center(), Point::ORIGIN);
}

#[test]
fn lines_start_at_origin() {
    assert_eq!(
        Shape::horizontal_line(3.0).paths,
        vec![Path::line(Point::ORIGIN, Point::new(3.0, 0.0))]
    );
    assert_eq!(
        Shape::vertical_line(3.0).paths,
        vec![Path::line(Point::ORIGIN, Point::new(0.0, 3.0))]
    );
}

#[test]
fn add_concatenates_paths() {
    let combined = Shape::horizontal_line(1.0).add(&Shape::vertical_line(1.0));
    assert_eq!(combined.paths.len(), 2);
    assert_eq!(combined.paths[1].points[1], Point::new(0.0, 1.0));
}

#[test]
fn center_is_mean_of_all_points() {
    let shape = Shape::new(vec![
        Path::line(Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
        Path::new(vec![Point::new(4.0, 4.0), Point::new(0.0, 4.0)]),
    ]);
    assert_eq!(shape.center(), Point::new(2.0, 2.0));
    assert_eq!(Shape::default().center(), Point::ORIGIN);
}
