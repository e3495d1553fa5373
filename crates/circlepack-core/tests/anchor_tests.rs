use circlepack_core::anchor::{AnchorSampler, AnchorSet, CoordinateSpace};
use circlepack_core::error::SketchError;
use circlepack_core::geometry::icosahedron;
use circlepack_core::geometry::icosahedron::vertex_count;
use glam::{Affine3A, Vec3};

#[test]
fn test_sample_preserves_length_and_order() {
    let vertices = icosahedron(1.0, 1).unwrap();
    let anchors = AnchorSampler::default().sample(&vertices).unwrap();
    assert_eq!(anchors.len(), vertices.len());
    for (i, (a, v)) in anchors.points().iter().zip(&vertices).enumerate() {
        assert!((*a - *v).length() < 1e-6, "anchor {} = {:?}, vertex = {:?}", i, a, v);
    }
}

#[test]
fn test_icosahedron_detail_one_has_240_vertices() {
    let vertices = icosahedron(1.0, 1).unwrap();
    assert_eq!(vertices.len(), 240);
    assert_eq!(vertex_count(1), 240);
    assert_eq!(vertex_count(2), 540);
}

#[test]
fn test_icosahedron_on_sphere() {
    for detail in 0..3 {
        for v in icosahedron(1.5, detail).unwrap() {
            assert!((v.length() - 1.5).abs() < 1e-5, "detail {} vertex {:?} off sphere", detail, v);
        }
    }
}

#[test]
fn test_no_deduplication() {
    let vertices = icosahedron(1.0, 0).unwrap();
    let anchors = AnchorSampler::default().sample(&vertices).unwrap();
    // 12 corners shared by 5 faces each in a non-indexed buffer
    let first = anchors.points()[0];
    let repeats = anchors
        .points()
        .iter()
        .filter(|p| (**p - first).length() < 1e-6)
        .count();
    assert_eq!(anchors.len(), 60);
    assert_eq!(repeats, 5, "corner should appear once per adjacent face");
}

#[test]
fn test_anchors_outlive_source_buffer() {
    let mut vertices = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 0.5)];
    let anchors = AnchorSampler::default().sample(&vertices).unwrap();
    vertices[0] = Vec3::ZERO;
    vertices.clear();
    drop(vertices);
    assert_eq!(anchors.points()[0], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(anchors.len(), 2);
}

#[test]
fn test_empty_buffer_is_invalid_geometry() {
    let err = AnchorSampler::default().sample(&[]).unwrap_err();
    assert!(matches!(err, SketchError::InvalidGeometry(_)), "got {:?}", err);
    assert!(AnchorSet::from_points(&[], CoordinateSpace::World).is_err());
}

#[test]
fn test_sample_flat() {
    let sampler = AnchorSampler::default();
    let anchors = sampler.sample_flat(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    assert_eq!(anchors.points(), &[Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0)]);

    for bad in [&[][..], &[1.0, 2.0][..], &[1.0, 2.0, 3.0, 4.0][..]] {
        assert!(
            matches!(sampler.sample_flat(bad), Err(SketchError::InvalidGeometry(_))),
            "length {} should be rejected",
            bad.len()
        );
    }
}

#[test]
fn test_sample_transformed_projects_before_freezing() {
    let vertices = [Vec3::ZERO, Vec3::X];
    let transform = Affine3A::from_translation(Vec3::new(4.0, 0.0, 0.0));
    let anchors = AnchorSampler::new(CoordinateSpace::Object)
        .sample_transformed(&vertices, &transform, CoordinateSpace::World)
        .unwrap();
    assert_eq!(anchors.space(), CoordinateSpace::World);
    assert_eq!(anchors.points(), &[Vec3::new(4.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0)]);
}

#[test]
fn test_sampler_tags_space() {
    let anchors = AnchorSampler::new(CoordinateSpace::World)
        .sample(&[Vec3::ONE])
        .unwrap();
    assert_eq!(anchors.space(), CoordinateSpace::World);
    assert_eq!(AnchorSampler::default().sample(&[Vec3::ONE]).unwrap().space(), CoordinateSpace::Object);
}

#[test]
fn test_nearest_distance() {
    let anchors = AnchorSampler::default()
        .sample(&[Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)])
        .unwrap();
    assert_eq!(anchors.nearest_distance(Vec3::ZERO), 0.0);
    assert!((anchors.nearest_distance(Vec3::new(2.0, 0.0, 0.0)) - 1.0).abs() < 1e-6);
    assert!((anchors.nearest_distance(Vec3::new(0.0, 4.0, 0.0)) - 4.0).abs() < 1e-6);
}

#[test]
fn test_clones_share_points() {
    let a = AnchorSampler::default().sample(&[Vec3::X, Vec3::Y]).unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.points().as_ptr(), b.points().as_ptr());
}
