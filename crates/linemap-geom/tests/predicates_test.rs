use linemap_geom::{
    Orientation, Precision, Segment, bounds_contain, intersect, orientation, point, share_endpoint,
};

fn seg(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::from_coords(id, x1, y1, x2, y2).unwrap()
}

#[test]
fn orientation_classifies_triples() {
    let a = point(0.0, 0.0);
    let b = point(10.0, 0.0);
    assert_eq!(orientation(a, b, point(20.0, 0.0)), Orientation::Collinear);
    assert_eq!(
        orientation(a, b, point(10.0, 10.0)),
        Orientation::CounterClockwise
    );
    assert_eq!(orientation(a, b, point(10.0, -10.0)), Orientation::Clockwise);
}

#[test]
fn bounds_contain_is_inclusive() {
    let q = point(0.0, 0.0);
    let r = point(10.0, 5.0);
    assert!(bounds_contain(point(10.0, 5.0), q, r));
    assert!(bounds_contain(point(3.0, 2.0), r, q));
    assert!(!bounds_contain(point(11.0, 2.0), q, r));
}

#[test]
fn crossing_segments_intersect_at_the_crossing() {
    let h = seg("h", 0.0, 50.0, 200.0, 50.0);
    let v = seg("v", 150.0, 0.0, 150.0, 100.0);
    assert_eq!(intersect(&h, &v), Some(point(150.0, 50.0)));
    assert_eq!(intersect(&v, &h), Some(point(150.0, 50.0)));
}

#[test]
fn disjoint_segments_do_not_intersect() {
    let a = seg("a", 0.0, 0.0, 10.0, 0.0);
    let b = seg("b", 0.0, 5.0, 10.0, 8.0);
    assert_eq!(intersect(&a, &b), None);
}

#[test]
fn parallel_segments_do_not_intersect() {
    let a = seg("a", 0.0, 0.0, 10.0, 10.0);
    let b = seg("b", 0.0, 1.0, 10.0, 11.0);
    assert_eq!(intersect(&a, &b), None);
}

#[test]
fn t_junction_reports_the_touching_endpoint() {
    let bar = seg("bar", 0.0, 0.0, 10.0, 0.0);
    let stem = seg("stem", 5.0, 0.0, 5.0, 10.0);
    assert_eq!(intersect(&bar, &stem), Some(point(5.0, 0.0)));
}

#[test]
fn collinear_overlap_is_not_reported() {
    let a = seg("a", 0.0, 0.0, 10.0, 0.0);
    let b = seg("b", 5.0, 0.0, 15.0, 0.0);
    assert_eq!(intersect(&a, &b), None);
}

#[test]
fn segments_meeting_at_a_corner_share_an_endpoint() {
    let p = Precision::default();
    let a = seg("a", 0.0, 0.0, 10.0, 0.0);
    let b = seg("b", 10.0, 0.0, 10.0, 10.0);
    assert!(share_endpoint(&a, &b, &p));
    assert_eq!(intersect(&a, &b), Some(point(10.0, 0.0)));

    let c = seg("c", 10.0 + 1e-9, 1e-9, 20.0, 0.0);
    assert!(share_endpoint(&a, &c, &p));

    let d = seg("d", 11.0, 0.0, 20.0, 0.0);
    assert!(!share_endpoint(&a, &d, &p));
}
