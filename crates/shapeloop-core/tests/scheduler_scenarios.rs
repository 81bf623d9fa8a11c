use shapeloop_core::{
    AnimationConfig, AnimationError, AnimationStatus, ConfigError, PaintError, RenderError,
    RENDER_SIZE,
};
use shapeloop_testing::{RecordingRenderer, SchedulerHarness};

#[test]
fn zero_duration_never_paints() {
    let harness = SchedulerHarness::new();
    let handle = harness.start(0.0, 0, 50, 2.0).expect("start");
    harness.run_until_idle();

    assert_eq!(harness.sink().paint_count(), 0);
    assert!(harness.renderer().calls().is_empty());
    assert!(harness.timer().delays().is_empty());
    assert_eq!(handle.status(), AnimationStatus::Finished);
}

#[test]
fn three_ticks_for_one_hundred_twenty_millis() {
    let harness = SchedulerHarness::new();
    let handle = harness.start(0.0, 120, 50, 2.0).expect("start");
    harness.run_until_idle();

    assert_eq!(harness.renderer().parameters(), vec![0.0, 2.0, 4.0]);
    assert_eq!(harness.sink().paint_count(), 3);
    assert_eq!(handle.ticks(), 3);
    assert_eq!(handle.status(), AnimationStatus::Finished);
}

#[test]
fn negative_step_walks_backwards() {
    let harness = SchedulerHarness::new();
    harness.start(10.0, 100, 25, -5.0).expect("start");
    harness.run_until_idle();

    assert_eq!(harness.renderer().parameters(), vec![10.0, 5.0, 0.0, -5.0]);
}

#[test]
fn zero_interval_is_rejected_before_any_paint() {
    let harness = SchedulerHarness::new();
    let err = harness.start(0.0, 1000, 0, 1.0).expect_err("zero interval");

    assert_eq!(
        err,
        AnimationError::Configuration(ConfigError::NonPositiveTickInterval {
            tick_interval_millis: 0
        })
    );
    assert_eq!(harness.sink().paint_count(), 0);
    assert_eq!(harness.timer().pending_timers(), 0);
}

#[test]
fn tick_count_is_ceiling_of_duration_over_interval() {
    for (total, interval) in [(1, 1), (1, 7), (49, 50), (50, 50), (51, 50), (999, 10), (5000, 50)] {
        let harness = SchedulerHarness::new();
        harness.start(0.0, total, interval, 1.0).expect("start");
        harness.run_until_idle();

        let expected = AnimationConfig::new(0.0, total, interval, 1.0).expected_ticks();
        assert_eq!(
            harness.sink().paint_count() as u64,
            expected,
            "total {total}ms every {interval}ms"
        );
        assert_eq!(expected, ((total + interval - 1) / interval) as u64);
    }
}

#[test]
fn every_tick_renders_initial_plus_k_steps_at_fixed_size() {
    let harness = SchedulerHarness::new();
    harness.start(-3.0, 400, 40, 1.5).expect("start");
    harness.run_until_idle();

    let calls = harness.renderer().calls();
    assert_eq!(calls.len(), 10);
    for (k, (size, parameter)) in calls.into_iter().enumerate() {
        assert_eq!(size, RENDER_SIZE);
        assert_eq!(parameter, -3.0 + k as f32 * 1.5);
    }
}

#[test]
fn zero_step_repaints_identical_markup() {
    let harness = SchedulerHarness::new();
    harness.start(45.0, 200, 50, 0.0).expect("start");
    harness.run_until_idle();

    let paints = harness.sink().paints();
    assert_eq!(paints.len(), 4);
    let expected = RecordingRenderer::markup(RENDER_SIZE, 45.0);
    assert!(paints.iter().all(|paint| *paint == expected));
}

#[test]
fn rearms_with_the_tick_interval_and_nothing_after_exhaustion() {
    let harness = SchedulerHarness::new();
    let handle = harness.start(0.0, 120, 50, 2.0).expect("start");

    // One pending timer at a time.
    while harness.timer().fire_next().is_some() {
        assert!(harness.timer().pending_timers() <= 1);
    }
    assert_eq!(harness.timer().delays(), vec![50, 50, 50]);
    assert_eq!(harness.timer().now_millis(), 150);
    assert_eq!(handle.status(), AnimationStatus::Finished);
}

#[test]
fn ticks_are_spaced_by_the_interval() {
    let harness = SchedulerHarness::new();
    harness.start(0.0, 1_000, 100, 1.0).expect("start");

    assert_eq!(harness.sink().paint_count(), 1);
    harness.timer().advance_by(99);
    assert_eq!(harness.sink().paint_count(), 1);
    harness.timer().advance_by(1);
    assert_eq!(harness.sink().paint_count(), 2);
    harness.timer().advance_by(250);
    assert_eq!(harness.sink().paint_count(), 4);
}

#[test]
fn aligned_start_waits_for_the_next_boundary() {
    let harness = SchedulerHarness::starting_at(12_345);
    let config = AnimationConfig::new(0.0, 150, 50, 2.0).with_first_tick_alignment(1_000);
    let handle = harness.launch(config).expect("start");

    assert_eq!(harness.sink().paint_count(), 0);
    assert_eq!(harness.timer().delays(), vec![655]);
    harness.timer().advance_to(12_999);
    assert_eq!(harness.sink().paint_count(), 0);

    harness.run_until_idle();
    assert_eq!(harness.renderer().parameters(), vec![0.0, 2.0, 4.0]);
    assert_eq!(harness.timer().delays(), vec![655, 50, 50, 50]);
    assert_eq!(handle.status(), AnimationStatus::Finished);
}

#[test]
fn aligned_start_on_a_boundary_ticks_immediately() {
    let harness = SchedulerHarness::starting_at(3_000);
    let config = AnimationConfig::new(0.0, 10, 10, 1.0).with_first_tick_alignment(1_000);
    harness.launch(config).expect("start");

    assert_eq!(harness.sink().paint_count(), 1);
}

#[test]
fn render_failure_is_surfaced_and_not_retried() {
    let harness = SchedulerHarness::with_renderer(RecordingRenderer::failing_when(|parameter| {
        parameter >= 6.0
    }));
    let handle = harness.start(0.0, 1_000, 10, 2.0).expect("start");
    harness.run_until_idle();

    assert_eq!(harness.renderer().parameters(), vec![0.0, 2.0, 4.0, 6.0]);
    assert_eq!(harness.sink().paint_count(), 3);
    assert_eq!(handle.ticks(), 3);
    match handle.status() {
        AnimationStatus::Failed(AnimationError::Render { parameter, source }) => {
            assert_eq!(parameter, 6.0);
            assert!(matches!(source, RenderError::Failed(_)));
        }
        other => panic!("unexpected status {other:?}"),
    }
    assert_eq!(harness.timer().pending_timers(), 0);
}

#[test]
fn missing_sink_terminates_the_animation() {
    let harness = SchedulerHarness::new();
    let handle = harness.start(0.0, 1_000, 10, 2.0).expect("start");
    harness.timer().advance_to(20);
    harness.sink().set_available(false);
    harness.run_until_idle();

    assert_eq!(harness.sink().paint_count(), 3);
    assert_eq!(
        handle.status(),
        AnimationStatus::Failed(AnimationError::SinkUnavailable(PaintError::TargetMissing {
            target: "base_div".to_string()
        }))
    );
    assert_eq!(harness.timer().now_millis(), 30);
}

#[test]
fn failure_does_not_affect_other_animations() {
    let harness = SchedulerHarness::with_renderer(RecordingRenderer::failing_when(|parameter| {
        parameter == 1_002.0
    }));
    let doomed = harness.start(1_000.0, 1_000, 10, 1.0).expect("start");
    let survivor = harness.start(0.0, 50, 10, 1.0).expect("start");
    harness.run_until_idle();

    assert!(matches!(doomed.status(), AnimationStatus::Failed(_)));
    assert_eq!(survivor.status(), AnimationStatus::Finished);
    assert_eq!(survivor.ticks(), 5);
}

#[test]
fn concurrent_animations_interleave_and_last_paint_wins() {
    let harness = SchedulerHarness::new();
    let slow = harness.start(0.0, 100, 50, 1.0).expect("start");
    let fast = harness.start(100.0, 100, 25, 1.0).expect("start");
    harness.run_until_idle();

    assert_eq!(slow.ticks(), 2);
    assert_eq!(fast.ticks(), 4);
    assert_eq!(
        harness.renderer().parameters(),
        vec![0.0, 100.0, 101.0, 1.0, 102.0, 103.0]
    );
    assert_eq!(
        harness.sink().content(),
        Some(RecordingRenderer::markup(RENDER_SIZE, 103.0))
    );
}

#[test]
fn cancellation_stops_paints_and_disarms_the_timer() {
    let harness = SchedulerHarness::new();
    let handle = harness.start(0.0, 1_000, 10, 1.0).expect("start");
    harness.timer().advance_to(30);
    assert_eq!(harness.timer().pending_timers(), 1);

    handle.cancel();
    assert_eq!(handle.status(), AnimationStatus::Cancelled);
    assert_eq!(harness.timer().cancelled().len(), 1);
    assert_eq!(harness.run_until_idle(), 0);
    assert_eq!(harness.sink().paint_count(), 4);
}
