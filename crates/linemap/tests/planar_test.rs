use linemap::geom::{intersect, share_endpoint};
use linemap::graphlib::alg;
use linemap::{BuilderOptions, Error, Precision, Segment, SegmentId, build, build_planar, point};

fn seg(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::from_coords(id, x1, y1, x2, y2).unwrap()
}

fn assert_crossing_free(segments: &[Segment]) {
    let precision = Precision::default();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            assert!(
                share_endpoint(a, b, &precision) || intersect(a, b).is_none(),
                "{} crosses {}",
                a.id(),
                b.id()
            );
        }
    }
}

fn grid() -> Vec<Segment> {
    let mut out = Vec::new();
    for (k, y) in [10.0, 20.0, 30.0].into_iter().enumerate() {
        out.push(seg(&format!("h{k}"), 0.0, y, 40.0, y));
    }
    for (k, x) in [10.0, 20.0, 30.0].into_iter().enumerate() {
        out.push(seg(&format!("v{k}"), x, 0.0, x, 40.0));
    }
    out
}

#[test]
fn crossing_pair_becomes_four_pieces_meeting_at_the_crossing() {
    let input = vec![
        seg("h", 0.0, 50.0, 200.0, 50.0),
        seg("v", 150.0, 0.0, 150.0, 100.0),
    ];
    let net = build_planar(&input, &BuilderOptions::default()).unwrap();

    assert_eq!(net.len(), 4);
    assert_eq!(net.split_count(), 1);
    let x = point(150.0, 50.0);
    for s in net.segments() {
        assert!(s.p1() == x || s.p2() == x, "{} misses the junction", s.id());
    }
    let ids: Vec<&str> = net.segments().iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["h#0", "h#1", "v#0", "v#1"]);
    assert_eq!(net.segments()[0].p1(), point(0.0, 50.0));
    assert_eq!(net.segments()[3].p2(), point(150.0, 100.0));
    assert_crossing_free(net.segments());
    assert!(net.is_planar());
}

#[test]
fn segments_sharing_an_endpoint_are_left_alone() {
    let input = vec![seg("a", 0.0, 0.0, 10.0, 0.0), seg("b", 10.0, 0.0, 10.0, 10.0)];
    let net = build_planar(&input, &BuilderOptions::default()).unwrap();
    assert_eq!(net.segments(), input.as_slice());
    assert_eq!(net.split_count(), 0);
}

#[test]
fn t_junction_splits_only_the_touched_segment() {
    let input = vec![seg("bar", 0.0, 0.0, 10.0, 0.0), seg("stem", 5.0, 0.0, 5.0, 10.0)];
    let net = build_planar(&input, &BuilderOptions::default()).unwrap();

    let ids: Vec<&str> = net.segments().iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["bar#0", "bar#1", "stem"]);
    assert_eq!(net.segments()[2], input[1]);
    assert_eq!(net.segments()[0].p2(), point(5.0, 0.0));
    assert_eq!(
        net.origin_of(&SegmentId::new("bar#1")),
        Some(&SegmentId::new("bar"))
    );
    assert_eq!(net.pieces_of(&SegmentId::new("bar")).count(), 2);
}

#[test]
fn grid_resolves_every_crossing() {
    let net = build_planar(&grid(), &BuilderOptions::default()).unwrap();
    assert_eq!(net.split_count(), 9);
    assert_eq!(net.len(), 24);
    assert_crossing_free(net.segments());

    let h1: Vec<_> = net.pieces_of(&SegmentId::new("h1")).collect();
    assert_eq!(h1.len(), 4);
    assert_eq!(h1[0].id().as_str(), "h1#0");
    assert_eq!(h1[0].p1(), point(0.0, 20.0));
    assert_eq!(h1[3].p2(), point(40.0, 20.0));
}

#[test]
fn rebuilding_a_planar_network_is_idempotent() {
    let opts = BuilderOptions::default();
    let first = build_planar(&grid(), &opts).unwrap();
    let second = build_planar(first.segments(), &opts).unwrap();
    assert_eq!(second.segments(), first.segments());
    assert_eq!(second.split_count(), 0);
}

#[test]
fn identical_input_gives_identical_output() {
    let opts = BuilderOptions::default();
    let a = build_planar(&grid(), &opts).unwrap();
    let b = build_planar(&grid(), &opts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn split_budget_is_a_hard_stop() {
    let input = vec![
        seg("h", 0.0, 50.0, 200.0, 50.0),
        seg("v", 150.0, 0.0, 150.0, 100.0),
    ];
    let err = build_planar(&input, &BuilderOptions::default().with_max_splits(0)).unwrap_err();
    assert_eq!(
        err,
        Error::IntersectionBudgetExceeded {
            budget: 0,
            segments: 2
        }
    );

    let err = build_planar(&grid(), &BuilderOptions::default().with_max_splits(8)).unwrap_err();
    assert!(matches!(err, Error::IntersectionBudgetExceeded { budget: 8, .. }));
    assert!(build_planar(&grid(), &BuilderOptions::default().with_max_splits(9)).is_ok());
}

#[test]
fn near_zero_segments_are_rejected() {
    let opts = BuilderOptions::default().with_precision(Precision::new(0.5).unwrap());
    let err = build_planar(&[seg("tiny", 0.0, 0.0, 0.25, 0.0)], &opts).unwrap_err();
    assert!(matches!(err, Error::Geom(_)));
}

#[test]
fn collinear_overlaps_are_kept_as_drawn() {
    let input = vec![seg("a", 0.0, 0.0, 10.0, 0.0), seg("b", 5.0, 0.0, 15.0, 0.0)];
    let net = build_planar(&input, &BuilderOptions::default()).unwrap();
    assert_eq!(net.segments(), input.as_slice());
}

#[test]
fn piece_ids_never_reuse_an_input_id() {
    let input = vec![
        seg("h", 0.0, 50.0, 200.0, 50.0),
        seg("v", 150.0, 0.0, 150.0, 100.0),
        seg("h#0", 0.0, 300.0, 50.0, 300.0),
    ];
    let net = build_planar(&input, &BuilderOptions::default()).unwrap();

    let ids: Vec<&str> = net.segments().iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["h#1", "h#2", "v#0", "v#1", "h#0"]);
    assert_eq!(
        net.origin_of(&SegmentId::new("h#0")),
        Some(&SegmentId::new("h#0"))
    );
    assert_eq!(
        net.origin_of(&SegmentId::new("h#1")),
        Some(&SegmentId::new("h"))
    );
    assert_eq!(net.pieces_of(&SegmentId::new("h")).count(), 2);
    assert_eq!(net.pieces_of(&SegmentId::new("h#0")).count(), 1);
}

#[test]
fn three_strokes_crossing_near_one_point_share_a_node() {
    let input = vec![
        seg("a", 0.0, 0.0, 10.0, 0.0),
        seg("b", 5.0, -5.0, 5.0, 5.0),
        seg("c", 0.0, -5.0 + 4e-7, 10.0, 5.0 + 4e-7),
    ];
    let opts = BuilderOptions::default();
    let snapshot = build(&input, &opts).unwrap();
    let net = &snapshot.network;

    assert_eq!(net.split_count(), 2);
    assert!(net.split_count() <= opts.split_budget(input.len()));
    assert_eq!(net.len(), 6);
    assert_crossing_free(net.segments());
    assert!(net.is_planar());

    let g = &snapshot.graph;
    assert_eq!(g.node_count(), 7);
    assert_eq!(alg::components(g).len(), 1);
    let hub = g.node_at(point(5.0, 0.0)).unwrap();
    assert_eq!(g.edges(hub.key).count(), 6);
}

#[test]
fn crossings_within_epsilon_of_an_existing_junction_reuse_it() {
    // `c` and `d` cross at about (5, 6e-7), which rounds to a different key than (5, 0).
    let input = vec![
        seg("a", 0.0, 0.0, 10.0, 0.0),
        seg("b", 5.0, -5.0, 5.0, 5.0),
        seg("c", 0.0, -5.0 + 6e-7, 10.0, 5.0 + 6e-7),
        seg("d", 0.0, 5.0 + 6e-7, 10.0, -5.0 + 6e-7),
    ];
    let opts = BuilderOptions::default();
    let snapshot = build(&input, &opts).unwrap();
    let net = &snapshot.network;

    assert!(net.split_count() <= opts.split_budget(input.len()));
    assert_eq!(net.len(), 8);
    assert_crossing_free(net.segments());
    let hub = point(5.0, 0.0);
    for s in net.segments() {
        assert!(s.p1() == hub || s.p2() == hub, "{} misses the junction", s.id());
    }

    let g = &snapshot.graph;
    assert_eq!(g.node_count(), 9);
    assert_eq!(alg::components(g).len(), 1);
    assert_eq!(g.edges(g.key_of(hub)).count(), 8);
}

#[test]
fn segment_whose_endpoints_merge_into_one_vertex_is_rejected() {
    let opts = BuilderOptions::default().with_precision(Precision::new(1.0).unwrap());
    let input = vec![seg("a", 0.0, 0.0, 10.0, 0.0), seg("b", 0.9, 0.0, -0.9, 0.0)];
    let err = build_planar(&input, &opts).unwrap_err();
    assert!(matches!(err, Error::Geom(_)));
}
