use circlepack_core::anchor::{AnchorSampler, CoordinateSpace};
use circlepack_core::error::{Mismatch, SketchError};
use circlepack_core::instance::InstanceParameters;
use circlepack_core::noise::{simplex3, FnNoise};
use circlepack_core::shaders::proximity::{NoiseMode, ProximityMaskShader, ShaderConfig};
use circlepack_core::shaders::{FragmentInput, FragmentShader};
use glam::{Vec2, Vec3, Vec4};

const MAGENTA: Vec3 = Vec3::new(1.0, 0.0, 1.0);
const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

fn instance(points: &[Vec3], color: Vec3) -> InstanceParameters {
    let anchors = AnchorSampler::new(CoordinateSpace::Object).sample(points).unwrap();
    InstanceParameters::new(anchors, color, Vec3::ZERO).unwrap()
}

#[test]
fn test_origin_anchor_at_origin_is_background() {
    // simplex3(0,0,0) = -0.412, so n = -0.206 < dist = 0: mask 0
    assert!(simplex3(Vec3::ZERO) < 0.0);
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[Vec3::ZERO], MAGENTA);
    assert_eq!(shader.mask(Vec3::ZERO, &params), 0.0);
    assert_eq!(shader.shade(Vec3::ZERO, &params), WHITE);
}

#[test]
fn test_positive_noise_on_anchor_paints_instance_color() {
    // simplex3(0.1, 0.2, 0) = 0.098, so n = 0.049 >= dist = 0: mask 1
    let p = Vec3::new(0.1, 0.2, 0.0);
    assert!(simplex3(p) > 0.0);
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[p], MAGENTA);
    assert_eq!(shader.mask(p, &params), 1.0);
    assert_eq!(shader.shade(p, &params), MAGENTA.extend(1.0));
}

#[test]
fn test_far_from_anchors_is_background() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[Vec3::ZERO], MAGENTA);
    // |n| <= 0.5 can never reach a distance of 10
    for i in 0..50 {
        let p = Vec3::new(10.0, i as f32 * 0.1, 0.0);
        assert_eq!(shader.shade(p, &params), WHITE, "position {:?}", p);
    }
}

#[test]
fn test_shade_deterministic() {
    let shader = ProximityMaskShader::default();
    let params = instance(&[Vec3::X, Vec3::Y, Vec3::Z], Vec3::new(0.2, 0.4, 0.6));
    for i in 0..100 {
        let p = Vec3::new((i as f32 * 0.13).sin(), (i as f32 * 0.07).cos(), i as f32 * 0.01);
        assert_eq!(shader.shade(p, &params), shader.shade(p, &params));
    }
}

#[test]
fn test_mask_is_binary_and_blend_exact() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let color = Vec3::new(0.0, 0.47, 0.75);
    let params = instance(
        &[Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)],
        color,
    );
    let mut painted = 0;
    let mut blank = 0;
    for i in 0..30 {
        for j in 0..30 {
            let u = i as f32 / 30.0 * std::f32::consts::TAU;
            let v = j as f32 / 30.0 * std::f32::consts::PI;
            let p = Vec3::new(v.sin() * u.cos(), v.cos(), v.sin() * u.sin());
            let m = shader.mask(p, &params);
            assert!(m == 0.0 || m == 1.0, "mask {} not binary at {:?}", m, p);
            let c = shader.shade(p, &params);
            if m == 1.0 {
                assert_eq!(c, color.extend(1.0));
                painted += 1;
            } else {
                assert_eq!(c, WHITE);
                blank += 1;
            }
        }
    }
    assert_eq!(painted + blank, 900);
}

#[test]
fn test_mask_follows_documented_comparison() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[Vec3::new(0.3, 0.3, 0.3)], MAGENTA);
    for i in 0..200 {
        let p = Vec3::new(i as f32 * 0.005, 0.3, 0.3);
        let dist = params.anchors().nearest_distance(p);
        let n = simplex3(p) * 0.5;
        let expected = if n < dist { 0.0 } else { 1.0 };
        assert_eq!(shader.mask(p, &params), expected, "at {:?}", p);
    }
}

#[test]
fn test_single_sphere_alpha() {
    let shader = ProximityMaskShader::new(ShaderConfig::SINGLE_SPHERE);
    let params = instance(&[Vec3::ZERO], MAGENTA);
    assert_eq!(shader.shade(Vec3::new(9.0, 0.0, 0.0), &params).w, 0.8);
}

#[test]
fn test_temporal_mode_samples_time() {
    let config = ShaderConfig {
        noise_mode: NoiseMode::Temporal,
        ..ShaderConfig::MULTI_SPHERE
    };
    let shader = ProximityMaskShader::with_noise(FnNoise(|p: Vec3| p.z), config);
    let mut params = instance(&[Vec3::ZERO], MAGENTA);
    let p = Vec3::new(0.4, 0.0, 0.0);

    // t = 0: n = 0 < 0.4
    assert_eq!(shader.mask(p, &params), 0.0);
    // t = 1: n = 0.5 >= 0.4
    params.advance(1.0).unwrap();
    assert_eq!(shader.mask(p, &params), 1.0);
    assert_eq!(shader.noise_offset(Vec3::new(0.1, 0.2, 99.0), 1.0), 0.5);
}

#[test]
fn test_spatial_mode_ignores_time() {
    let shader =
        ProximityMaskShader::with_noise(FnNoise(|p: Vec3| p.z), ShaderConfig::MULTI_SPHERE);
    let mut params = instance(&[Vec3::ZERO], MAGENTA);
    let p = Vec3::new(0.4, 0.0, 0.0);
    let before = shader.shade(p, &params);
    params.advance(50.0).unwrap();
    assert_eq!(shader.shade(p, &params), before);
}

#[test]
fn test_temporal_matches_spatial_in_plane() {
    // noise(p.x, p.y, t) with t = 0 equals noise(p) for p.z = 0
    let spatial = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let temporal = ProximityMaskShader::new(ShaderConfig {
        noise_mode: NoiseMode::Temporal,
        ..ShaderConfig::MULTI_SPHERE
    });
    let p = Vec3::new(0.1, 0.2, 0.0);
    assert_eq!(spatial.noise_offset(p, 0.0), temporal.noise_offset(p, 0.0));
    assert_eq!(
        temporal.noise_offset(Vec3::new(0.1, 0.2, 5.0), 0.0),
        spatial.noise_offset(p, 123.0)
    );
}

#[test]
fn test_custom_background() {
    let config = ShaderConfig {
        background: [0.0, 0.0, 0.0],
        ..ShaderConfig::MULTI_SPHERE
    };
    let shader = ProximityMaskShader::new(config);
    let params = instance(&[Vec3::ZERO], MAGENTA);
    assert_eq!(shader.shade(Vec3::splat(20.0), &params), Vec4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_validate_rejects_space_mismatch() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let anchors = AnchorSampler::new(CoordinateSpace::World).sample(&[Vec3::ZERO]).unwrap();
    let params = InstanceParameters::new(anchors, MAGENTA, Vec3::ZERO).unwrap();
    assert_eq!(
        shader.validate(&params),
        Err(SketchError::ConfigurationMismatch(Mismatch::CoordinateSpace {
            anchors: CoordinateSpace::World,
            fragments: CoordinateSpace::Object,
        }))
    );
    assert!(shader.validate(&instance(&[Vec3::ZERO], MAGENTA)).is_ok());
}

#[test]
fn test_fragment_trait_uses_position() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[Vec3::new(0.1, 0.2, 0.0)], MAGENTA);
    let frag = FragmentInput::new(Vec3::new(0.1, 0.2, 0.0), Vec2::new(0.9, 0.9));
    assert_eq!(shader.fragment(&frag, &params), MAGENTA.extend(1.0));
}

#[test]
fn test_shader_is_shareable_across_threads() {
    let shader = ProximityMaskShader::new(ShaderConfig::MULTI_SPHERE);
    let params = instance(&[Vec3::ZERO, Vec3::X], MAGENTA);
    let expected: Vec<Vec4> = (0..8)
        .map(|i| shader.shade(Vec3::new(i as f32 * 0.1, 0.0, 0.0), &params))
        .collect();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shader = &shader;
                let params = &params;
                s.spawn(move || shader.shade(Vec3::new(i as f32 * 0.1, 0.0, 0.0), params))
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), expected[i]);
        }
    });
}
