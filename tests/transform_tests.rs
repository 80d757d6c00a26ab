use glam::{Mat4, Vec3};
use room_viewer::transform::{build_model, rotate_about, TransformParams};

const EPSILON: f32 = 1e-5;

#[cfg(test)]
mod transform_tests {
    use super::*;

    #[test]
    fn test_translation_only_point() {
        let params = TransformParams::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
        let world = params.transform_point(Vec3::ZERO);
        assert!((world - Vec3::new(1.0, 2.0, 3.0)).length() < EPSILON);

        let corner = params.transform_point(Vec3::splat(0.5));
        assert!((corner - Vec3::new(2.0, 3.0, 4.0)).length() < EPSILON);
    }

    #[test]
    fn test_order_matches_explicit_product() {
        let expected = Mat4::from_translation(Vec3::new(4.0, -1.0, 2.5))
            * Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_z(60f32.to_radians())
            * Mat4::from_scale(Vec3::new(2.0, 0.5, 3.0));

        let model = build_model(4.0, -1.0, 2.5, 30.0, 45.0, 60.0, 2.0, 0.5, 3.0);

        assert!(model.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_params_match_free_function() {
        let params = TransformParams::new(5.0, 4.4, 5.0, 0.0, 15.0, 0.0, 1.0, -0.33, 1.0);
        let direct = build_model(5.0, 4.4, 5.0, 0.0, 15.0, 0.0, 1.0, -0.33, 1.0);
        assert_eq!(params.to_matrix(), direct);
    }

    #[test]
    fn test_negative_scale_mirrors() {
        // shelves are authored with negative x scale so they extend toward -x
        let model = build_model(6.05, 1.0, 0.0, 0.0, 0.0, 0.0, -6.2, 0.15, 2.12);
        let far_corner = model.transform_point3(Vec3::splat(0.5));
        assert!((far_corner.x - (6.05 - 3.1)).abs() < EPSILON);
    }

    #[test]
    fn test_y_rotation_about_pivot() {
        let pivot = Vec3::new(5.25, 0.0, 5.25);
        let m = rotate_about(pivot, Vec3::Y, 90.0);
        let p = m.transform_point3(pivot + Vec3::X);
        assert!((p - (pivot - Vec3::Z)).length() < EPSILON, "got {p:?}");
    }

    #[test]
    fn test_params_round_trip_json() {
        let params = TransformParams::new(1.0, 2.0, 3.0, 10.0, 20.0, 30.0, 0.5, 0.5, 0.5);
        let json = serde_json::to_string(&params).unwrap();
        let back: TransformParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
