// File: crates/spark-core/tests/scheduler.rs
// Purpose: Redraw coalescing, bounded retries and lifecycle guarantees, driven
// through the synchronous `ManualHost`.

use spark_core::{
    FrameOutcome, FrameToken, Lifecycle, ManualHost, RasterSurface, Series, SparklineChart, SparklineProps, Surface,
    MAX_RETRIES,
};

fn props() -> SparklineProps {
    SparklineProps::new(
        vec!["2026-01".into(), "2026-02".into(), "2026-03".into()],
        vec![
            Series::new("Revenue", vec![18000.0, 19200.0, 21000.0]),
            Series::new("Cost", vec![9500.0, 10100.0, 10800.0]),
        ],
    )
}

fn chart() -> SparklineChart<RasterSurface> {
    SparklineChart::new(props(), RasterSurface::new())
}

#[test]
fn mount_subscribes_and_draws_once() {
    let mut host = ManualHost::new(320.0, 160.0);
    let mut chart = chart();
    assert_eq!(chart.lifecycle(), Lifecycle::Unmounted);
    assert!(!chart.scheduler().is_active());

    chart.mount(&mut host);
    assert_eq!(chart.lifecycle(), Lifecycle::Idle);
    assert!(chart.scheduler().is_active());
    assert_eq!(host.active_observers(), 1);
    assert_eq!(host.queued_frames().len(), 1);

    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
    assert_eq!(chart.draw_count(), 1);
    assert_eq!(chart.surface().pixel_size(), (320, 160));
}

#[test]
fn rapid_resizes_coalesce_into_one_draw() {
    let mut host = ManualHost::new(320.0, 160.0);
    let mut chart = chart();
    chart.mount(&mut host);

    for i in 1..=10 {
        host.resize(300.0 + i as f64 * 7.0, 90.0 + i as f64);
        assert!(chart.on_resize(&mut host));
    }
    assert_eq!(host.queued_frames().len(), 1);
    assert_eq!(host.cancelled_frames(), 10);

    assert_eq!(host.tick(&mut chart), vec![FrameOutcome::Drawn]);
    assert_eq!(chart.draw_count(), 1);
    assert_eq!(chart.surface().pixel_size(), (370, 100));
    assert!(host.queued_frames().is_empty());
}

#[test]
fn superseded_frame_is_stale() {
    let mut host = ManualHost::new(320.0, 160.0);
    let mut chart = chart();
    chart.mount(&mut host);
    let first = host.queued_frames()[0];
    chart.on_resize(&mut host);

    assert_eq!(chart.on_frame(first, &mut host), FrameOutcome::Stale);
    assert_eq!(chart.on_frame(FrameToken(999), &mut host), FrameOutcome::Stale);
    assert_eq!(chart.draw_count(), 0);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
}

#[test]
fn zero_size_during_mount_retries_until_layout_settles() {
    let mut host = ManualHost::new(0.0, 0.0);
    let mut chart = chart();
    chart.mount(&mut host);

    for _ in 0..3 {
        assert_eq!(host.tick(&mut chart), vec![FrameOutcome::Retrying]);
    }
    // Layout settles without a resize notification; the pending retry picks it up.
    host.resize(240.0, 120.0);
    assert_eq!(host.tick(&mut chart), vec![FrameOutcome::Drawn]);
    assert_eq!(chart.scheduler().retries(), 0);
    assert_eq!(chart.surface().pixel_size(), (240, 120));
}

#[test]
fn hidden_container_gives_up_after_retry_budget() {
    let mut host = ManualHost::new(0.0, 120.0);
    let mut chart = chart();
    chart.mount(&mut host);

    let outcomes = host.run_until_idle(&mut chart);
    assert_eq!(outcomes.len(), MAX_RETRIES as usize + 1);
    assert!(outcomes[..MAX_RETRIES as usize].iter().all(|o| *o == FrameOutcome::Retrying));
    assert_eq!(outcomes.last(), Some(&FrameOutcome::GaveUp));
    assert_eq!(host.requested_frames(), MAX_RETRIES as usize + 1);
    assert_eq!(chart.draw_count(), 0);

    // Quiet until something new happens.
    assert!(host.tick(&mut chart).is_empty());
    assert!(host.queued_frames().is_empty());

    host.resize(200.0, 120.0);
    chart.on_resize(&mut host);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
}

#[test]
fn missing_context_shares_the_retry_budget() {
    let mut host = ManualHost::new(200.0, 100.0);
    let mut chart = SparklineChart::new(props(), RasterSurface::detached());
    chart.mount(&mut host);

    let outcomes = host.run_until_idle(&mut chart);
    assert_eq!(outcomes.len(), MAX_RETRIES as usize + 1);
    assert_eq!(outcomes.last(), Some(&FrameOutcome::GaveUp));
    assert_eq!(chart.draw_count(), 0);

    chart.surface_mut().attach();
    chart.set_data(props().x_labels, props().series, &mut host);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
}

#[test]
fn context_appearing_mid_cycle_draws() {
    let mut host = ManualHost::new(200.0, 100.0);
    let mut chart = SparklineChart::new(props(), RasterSurface::detached());
    chart.mount(&mut host);
    assert_eq!(host.tick(&mut chart), vec![FrameOutcome::Retrying]);
    chart.surface_mut().attach();
    assert_eq!(host.tick(&mut chart), vec![FrameOutcome::Drawn]);
}

#[test]
fn oversized_container_recovers_after_resize() {
    let mut host = ManualHost::new(320.0, 160.0);
    let mut chart = chart();
    chart.mount(&mut host);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);

    // The backing store cannot be allocated at this size.
    host.resize(1e9, 1e9);
    host.set_dpr(2.0);
    chart.on_resize(&mut host);
    let outcomes = host.run_until_idle(&mut chart);
    assert_eq!(outcomes.last(), Some(&FrameOutcome::GaveUp));
    assert_eq!(chart.surface().pixel_size(), (320, 160));

    host.resize(320.0, 160.0);
    host.set_dpr(1.0);
    chart.on_resize(&mut host);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
    assert_eq!(chart.draw_count(), 2);
}

#[test]
fn data_changes_do_not_resubscribe() {
    let mut host = ManualHost::new(200.0, 100.0);
    let mut chart = chart();
    chart.mount(&mut host);
    chart.mount(&mut host);
    for i in 0..5 {
        chart.set_data(vec![], vec![Series::new("x", vec![i as f64, 1.0])], &mut host);
    }
    assert_eq!(host.active_observers(), 1);
    assert_eq!(host.queued_frames().len(), 1);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
}

#[test]
fn unmount_cancels_pending_frame_and_disconnects() {
    let mut host = ManualHost::new(200.0, 100.0);
    let mut chart = chart();
    chart.mount(&mut host);
    let pending = host.queued_frames()[0];

    chart.unmount(&mut host);
    assert_eq!(chart.lifecycle(), Lifecycle::Unmounted);
    assert!(!chart.scheduler().is_active());
    assert!(host.queued_frames().is_empty());
    assert_eq!(host.active_observers(), 0);

    // A callback that slipped through, and later events, must not draw.
    assert_eq!(chart.on_frame(pending, &mut host), FrameOutcome::Stale);
    assert!(!chart.on_resize(&mut host));
    chart.set_data(vec![], vec![Series::new("x", vec![1.0, 2.0])], &mut host);
    assert!(chart.pointer_move(50.0, 50.0, &mut host).is_none());
    assert!(host.queued_frames().is_empty());
    assert_eq!(chart.draw_count(), 0);
}

#[test]
fn remount_attaches_a_fresh_observer() {
    let mut host = ManualHost::new(200.0, 100.0);
    let mut chart = chart();
    chart.mount(&mut host);
    host.run_until_idle(&mut chart);
    chart.unmount(&mut host);
    chart.mount(&mut host);
    assert_eq!(host.active_observers(), 1);
    assert_eq!(host.run_until_idle(&mut chart), vec![FrameOutcome::Drawn]);
    assert_eq!(chart.draw_count(), 2);
}
