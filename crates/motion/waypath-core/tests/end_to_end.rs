use approx::assert_relative_eq;
use nalgebra::Vector3;
use waypath_core::{
    AxisMask, Component, FrameRange, InterpolationMode, MotionConfig, MotionObject,
    OscillationConfig, Path, PathConfig, Track,
};

fn scenario_path(mode: InterpolationMode) -> Path {
    Path::new(
        Track::from_pairs(&[(0.0, 0.0), (24.0, 10.0)]).unwrap(),
        Track::from_pairs(&[(0.0, 0.0)]).unwrap(),
        Track::from_pairs(&[(0.0, 0.0)]).unwrap(),
        PathConfig::with_mode(mode),
    )
    .unwrap()
}

#[test]
fn linear_scenario_midpoint() {
    let path = scenario_path(InterpolationMode::Linear);
    assert_eq!(path.position(12.0).unwrap(), Vector3::new(5.0, 0.0, 0.0));
}

#[test]
fn modes_agree_on_the_scenario_endpoints() {
    for mode in [
        InterpolationMode::Linear,
        InterpolationMode::catmull_rom(),
        InterpolationMode::Hermite,
    ] {
        let path = scenario_path(mode);
        assert_eq!(path.position(0.0).unwrap(), Vector3::zeros());
        assert_eq!(path.position(24.0).unwrap(), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(path.position(100.0).unwrap(), Vector3::new(10.0, 0.0, 0.0));
    }
}

#[test]
fn oscillation_is_deterministic_and_axis_selective() {
    let oscillation = OscillationConfig::new(
        AxisMask {
            x: false,
            y: false,
            z: true,
        },
        0.25,
        0.5,
    );
    let config = PathConfig {
        mode: InterpolationMode::Linear,
        oscillation,
    };
    let mut a = scenario_path(InterpolationMode::Linear);
    a.set_config(config).unwrap();
    let b = a.clone();

    let mut moved = false;
    for frame in 0..48 {
        let t = frame as f64 + 0.5;
        let pa = a.position(t).unwrap();
        let pb = b.position(t).unwrap();
        assert_eq!(pa, pb);
        assert_eq!(pa.y, 0.0);
        assert!(pa.z.abs() <= 0.5 * 1.1);
        moved |= pa.z != 0.0;
    }
    assert!(moved);
}

#[test]
fn motion_object_applies_full_config() {
    let mut object = MotionObject::new(
        "probe",
        scenario_path(InterpolationMode::Linear),
        FrameRange::new(0, 24).unwrap(),
    )
    .unwrap();
    let config = MotionConfig::from_json(
        r#"{ "path": { "mode": { "type": "hermite" } },
             "orientation": { "align_axis": "X" } }"#,
    )
    .unwrap();
    object.configure(config).unwrap();
    assert_eq!(object.path().mode(), InterpolationMode::Hermite);

    let sample = object.sample(12.0).unwrap();
    assert_relative_eq!(sample.position.x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(sample.rotation * Vector3::x(), Vector3::x(), epsilon = 1e-12);
}

#[test]
fn editing_the_path_refreshes_travelled_distance() {
    let mut object = MotionObject::new(
        "probe",
        scenario_path(InterpolationMode::Linear),
        FrameRange::new(0, 24).unwrap(),
    )
    .unwrap();
    assert_relative_eq!(object.travelled_distance().unwrap(), 10.0, epsilon = 1e-9);

    object
        .path_mut()
        .set_track(Component::Y, Track::from_pairs(&[(0.0, 0.0), (24.0, 10.0)]).unwrap());
    assert_relative_eq!(
        object.travelled_distance().unwrap(),
        10.0 * 2f64.sqrt(),
        epsilon = 1e-9
    );

    object.set_path(scenario_path(InterpolationMode::Linear));
    assert_relative_eq!(object.travelled_distance().unwrap(), 10.0, epsilon = 1e-9);

    object.set_frame_range(FrameRange::new(0, 12).unwrap()).unwrap();
    assert_relative_eq!(object.travelled_distance().unwrap(), 5.0, epsilon = 1e-9);
    assert!(object.set_frame_range(FrameRange { start: 5, end: 0 }).is_err());
}

fn straight_path(length: f64) -> Path {
    Path::new(
        Track::from_pairs(&[(0.0, 0.0), (10.0, length)]).unwrap(),
        Track::constant(0.0),
        Track::constant(0.0),
        PathConfig::default(),
    )
    .unwrap()
}

#[test]
fn replacing_the_path_never_serves_a_stale_table() {
    let mut object =
        MotionObject::new("swap", straight_path(10.0), FrameRange::new(0, 10).unwrap()).unwrap();
    assert_relative_eq!(object.travelled_distance().unwrap(), 10.0, epsilon = 1e-9);

    *object.path_mut() = straight_path(50.0);
    assert_relative_eq!(object.travelled_distance().unwrap(), 50.0, epsilon = 1e-9);

    object.set_path(straight_path(20.0));
    assert_relative_eq!(object.travelled_distance().unwrap(), 20.0, epsilon = 1e-9);

    object
        .path_mut()
        .set_track(Component::X, Track::from_pairs(&[(0.0, 0.0), (10.0, 30.0)]).unwrap());
    assert_relative_eq!(object.travelled_distance().unwrap(), 30.0, epsilon = 1e-9);

    let wobble = PathConfig {
        mode: InterpolationMode::Linear,
        oscillation: OscillationConfig::new(AxisMask::ALL, 0.37, 1.0),
    };
    let before = object.travelled_distance().unwrap();
    object.path_mut().set_config(wobble).unwrap();
    assert!(object.travelled_distance().unwrap() > before);

    object.configure(MotionConfig::default()).unwrap();
    assert_relative_eq!(object.travelled_distance().unwrap(), 30.0, epsilon = 1e-9);

    let revision = object.path().revision();
    object.path_mut().sync_velocities();
    assert_ne!(object.path().revision(), revision);
}

#[test]
fn replacing_the_path_refreshes_distance_pacing() {
    let mut object =
        MotionObject::new("paced", straight_path(10.0), FrameRange::new(0, 10).unwrap())
            .unwrap()
            .with_distance_curve(Track::from_pairs(&[(0.0, 0.0), (10.0, 10.0)]).unwrap());
    assert_relative_eq!(object.remapped_time(5.0).unwrap(), 5.0, epsilon = 1e-9);

    *object.path_mut() = straight_path(20.0);
    // 5 units along a 20 unit path take a quarter of the keyframe time
    assert_relative_eq!(object.remapped_time(5.0).unwrap(), 2.5, epsilon = 1e-9);
    assert_relative_eq!(object.position(5.0).unwrap().x, 5.0, epsilon = 1e-9);
}
