// Host-side tests for the impact controller's progress and notification latches.

use glam::Vec3;
use hacs_core::*;

fn controller() -> ImpactController {
    ImpactController::new(ImpactConfig::default()).unwrap()
}

const SITE: Vec3 = Vec3::new(0.0, -2.0, 5.0);

#[test]
fn inactive_controller_does_nothing() {
    let mut c = controller();
    for i in 0..600 {
        let fired = c.tick(FrameTick::new(i as f64 / 60.0, 1.0 / 60.0));
        assert!(fired.is_empty());
    }
    assert_eq!(c.state(), ImpactState::Inactive);
    assert_eq!(c.progress(), None);
    assert!(c.pose().is_none());
    assert!(!c.notified_midpoint() && !c.notified_near_end() && !c.notified_complete());
}

#[test]
fn near_end_threshold_is_half_a_second_before_the_end() {
    let c = controller();
    assert!((c.near_end_progress() - 0.8333).abs() < 1e-3);
}

#[test]
fn single_tick_jump_fires_every_threshold_in_order() {
    let mut c = controller();
    assert!(c.activate(SITE, 2.0));
    assert!(c.tick(FrameTick::new(2.0, 0.0)).is_empty());
    let fired = c.tick(FrameTick::new(50.0, 48.0));
    assert_eq!(
        fired.as_slice(),
        &[ImpactSignal::Midpoint, ImpactSignal::NearEnd, ImpactSignal::Complete]
    );
    assert_eq!(c.state(), ImpactState::Complete);
    assert_eq!(c.progress(), Some(1.0));
    assert!(c.tick(FrameTick::new(60.0, 10.0)).is_empty());
}

#[test]
fn fine_ticks_fire_each_notification_once_at_its_threshold() {
    let mut c = controller();
    c.activate(SITE, 0.0);
    let mut log = Vec::new();
    for i in 0..=300 {
        let t = i as f64 / 60.0;
        for s in c.tick(FrameTick::new(t, 1.0 / 60.0)) {
            log.push((t, s));
        }
    }
    let order: Vec<_> = log.iter().map(|(_, s)| *s).collect();
    assert_eq!(
        order,
        vec![ImpactSignal::Midpoint, ImpactSignal::NearEnd, ImpactSignal::Complete]
    );
    assert!((log[0].0 - 1.5).abs() < 0.02, "midpoint at {}", log[0].0);
    assert!((log[1].0 - 2.5).abs() < 0.02, "near-end at {}", log[1].0);
    assert!((log[2].0 - 3.0).abs() < 0.02, "complete at {}", log[2].0);
    assert!(c.notified_midpoint() && c.notified_near_end() && c.notified_complete());
}

#[test]
fn two_thresholds_in_one_tick_keep_their_order() {
    let mut c = controller();
    c.activate(SITE, 0.0);
    assert!(c.tick(FrameTick::new(1.0, 1.0)).is_empty());
    let fired = c.tick(FrameTick::new(2.7, 1.7));
    assert_eq!(fired.as_slice(), &[ImpactSignal::Midpoint, ImpactSignal::NearEnd]);
    let fired = c.tick(FrameTick::new(3.2, 0.5));
    assert_eq!(fired.as_slice(), &[ImpactSignal::Complete]);
}

#[test]
fn reactivation_is_ignored() {
    let mut c = controller();
    assert!(c.activate(SITE, 1.0));
    c.tick(FrameTick::new(2.0, 1.0));
    assert!(!c.activate(Vec3::ZERO, 2.0));
    assert_eq!(c.origin(), SITE);
    let p = c.progress().unwrap();
    assert!((p - 1.0 / 3.0).abs() < 1e-5);
}

#[test]
fn visual_scale_tracks_progress() {
    let mut c = controller();
    c.activate(SITE, 0.0);
    let mut prev = 0.0;
    for i in 0..=200 {
        let t = i as f64 / 60.0;
        c.tick(FrameTick::new(t, 1.0 / 60.0));
        let pose = c.pose().unwrap();
        assert!(pose.scale >= prev);
        assert!((pose.scale - pose.progress * 15.0).abs() < 1e-4);
        if i == 90 {
            assert!((pose.scale - 7.5).abs() < 1e-3);
        }
        prev = pose.scale;
    }
    assert_eq!(c.pose().unwrap().scale, 15.0);
}

#[test]
fn rejects_bad_timing_config() {
    let cfg = ImpactConfig {
        duration_sec: -3.0,
        ..Default::default()
    };
    assert!(matches!(
        ImpactController::new(cfg),
        Err(ConfigError::NonPositiveDuration { .. })
    ));

    let cfg = ImpactConfig {
        near_end_lead_sec: 3.0,
        ..Default::default()
    };
    assert!(matches!(
        ImpactController::new(cfg),
        Err(ConfigError::NearEndLeadOutOfRange { .. })
    ));

    let cfg = ImpactConfig {
        midpoint_progress: 1.0,
        ..Default::default()
    };
    assert!(ImpactController::new(cfg).is_err());
}

#[test]
fn midpoint_must_precede_near_end() {
    let late_midpoint = ImpactConfig {
        midpoint_progress: 0.9,
        ..Default::default()
    };
    assert!(matches!(
        ImpactController::new(late_midpoint),
        Err(ConfigError::ThresholdsOutOfOrder { .. })
    ));

    // near-end at 1/3 of the explosion
    let long_lead = ImpactConfig {
        near_end_lead_sec: 2.0,
        ..Default::default()
    };
    assert!(matches!(
        ImpactController::new(long_lead),
        Err(ConfigError::ThresholdsOutOfOrder { .. })
    ));

    // coinciding thresholds are rejected too
    let coinciding = ImpactConfig {
        duration_sec: 2.0,
        near_end_lead_sec: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        ImpactController::new(coinciding),
        Err(ConfigError::ThresholdsOutOfOrder { .. })
    ));

    let cfg: ChoreographyConfig =
        serde_json::from_str(r#"{ "impact": { "midpoint_progress": 0.9 } }"#).unwrap();
    assert!(ImpactScene::seeded(cfg, Outcome::Hazardous, 1).is_err());
}

#[test]
fn accepted_configs_always_fire_in_threshold_order() {
    for (midpoint, lead) in [(0.1_f32, 0.5), (0.5, 1.4), (0.8, 0.5), (0.3, 2.0)] {
        let cfg = ImpactConfig {
            midpoint_progress: midpoint,
            near_end_lead_sec: lead,
            ..Default::default()
        };
        let mut c = ImpactController::new(cfg).unwrap();
        c.activate(SITE, 0.0);
        let mut order = Vec::new();
        for i in 0..=200 {
            order.extend(c.tick(FrameTick::new(i as f64 / 60.0, 1.0 / 60.0)));
        }
        assert_eq!(
            order,
            vec![ImpactSignal::Midpoint, ImpactSignal::NearEnd, ImpactSignal::Complete],
            "midpoint={midpoint} lead={lead}"
        );
    }
}
