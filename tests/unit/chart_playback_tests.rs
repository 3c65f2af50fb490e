#[cfg(test)]
mod tests_chart_playback {
    use depth_chart_rs::{
        ChartConfig, OrderBookChart, PlaybackState, Side, SnapshotRecord, TokioOrderBookChart,
        TokioTickScheduler,
    };
    use serde_json::json;
    use std::time::Duration;

    fn record(time: &str, bid_size: f64, ask_size: f64) -> SnapshotRecord {
        SnapshotRecord::from_value(
            0,
            json!({
                "Time": time,
                "Bid1": 100.01,
                "Bid1Size": bid_size,
                "Ask1": 100.02,
                "Ask1Size": ask_size
            }),
        )
        .expect("object record")
    }

    fn one_level() -> ChartConfig {
        ChartConfig {
            levels: 1,
            ..ChartConfig::default()
        }
    }

    fn tick(chart: &mut OrderBookChart, now_ms: u64) -> bool {
        match chart.playback().scheduler().next_tick() {
            Some(tick) => chart.handle_tick_at(tick, now_ms).is_some(),
            None => false,
        }
    }

    #[test]
    fn single_level_record_builds_expected_frame_and_domain() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        chart.load_at(&[record("09:30:00", 500.0, 300.0)], 0);

        let frame = chart.current_frame().expect("one frame");
        assert_eq!(frame.orders.len(), 2);
        assert_eq!(frame.orders[0].side, Side::Bid);
        assert_eq!(frame.orders[0].price, 100.01);
        assert_eq!(frame.orders[0].size, 500.0);
        assert_eq!(frame.orders[1].side, Side::Ask);
        assert_eq!(frame.orders[1].size, 300.0);

        let scales = chart.scales().expect("scales computed");
        assert_eq!(scales.x.domain(), [-500.0, 500.0]);
        assert_eq!(chart.current_time(), "09:30:00");
    }

    #[test]
    fn empty_input_is_a_quiet_steady_state() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");

        assert!(chart.load_at(&[], 0).is_none());
        assert!(chart.update_at(10).is_none());
        assert!(!chart.start_animation());
        assert_eq!(chart.playback().scheduler().schedule_count(), 0);
        assert!(chart.scene().bars.is_empty());
        assert_eq!(chart.slider_range(), None);
        assert!(chart.seek_at(3, 20).is_none());
        assert_eq!(chart.current_index(), 0);
    }

    #[test]
    fn autoplay_walks_frames_and_loops() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        let records = vec![
            record("t0", 100.0, 100.0),
            record("t1", 200.0, 100.0),
            record("t2", 300.0, 100.0),
        ];
        chart.load_at(&records, 0);
        assert!(chart.start_animation());
        assert!(chart.is_animating());

        let mut times = Vec::new();
        for m in 1..=5u64 {
            assert!(tick(&mut chart, m * 1000));
            times.push(chart.current_time().to_string());
            assert_eq!(chart.current_index(), (m as usize) % 3);
        }
        assert_eq!(times, vec!["t1", "t2", "t0", "t1", "t2"]);
        assert_eq!(chart.scales().expect("scales").x.domain(), [-300.0, 300.0]);
    }

    #[test]
    fn scrubbing_halts_autoplay() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        let records: Vec<_> = (0..5)
            .map(|i| record(&format!("t{i}"), 100.0 + f64::from(i), 50.0))
            .collect();
        chart.load_at(&records, 0);
        chart.start_animation();
        tick(&mut chart, 1000);

        assert!(chart.seek_at(3, 1500).is_some());
        assert_eq!(chart.playback().state(), PlaybackState::Stopped);
        assert_eq!(chart.current_index(), 3);
        assert_eq!(chart.current_time(), "t3");

        assert!(!tick(&mut chart, 2000));
        assert_eq!(chart.current_index(), 3);
    }

    #[test]
    fn toggle_acts_as_play_pause() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        chart.load_at(&[record("t0", 1.0, 1.0), record("t1", 2.0, 2.0)], 0);

        assert_eq!(chart.toggle_animation(), PlaybackState::Running);
        assert_eq!(chart.toggle_animation(), PlaybackState::Stopped);
        assert!(!chart.stop_animation());
    }

    #[test]
    fn reload_replaces_frames_and_clamps_index() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        let records: Vec<_> = (0..6)
            .map(|i| record(&format!("a{i}"), 10.0, 10.0))
            .collect();
        chart.load_at(&records, 0);
        chart.seek_at(5, 0);

        chart.load_at(&[record("b0", 1.0, 1.0), record("b1", 2.0, 2.0)], 500);
        assert_eq!(chart.frames().len(), 2);
        assert_eq!(chart.current_index(), 1);
        assert_eq!(chart.current_time(), "b1");
        assert_eq!(chart.slider_range(), Some(0..=1));
        assert_eq!(chart.scene().bars.len(), 2);
    }

    #[test]
    fn reload_to_empty_clears_the_scene() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        chart.load_at(&[record("a", 1.0, 1.0), record("b", 2.0, 2.0)], 0);
        chart.start_animation();

        assert!(chart.load_at(&[], 10).is_none());
        assert!(chart.current_frame().is_none());
        assert_eq!(chart.current_time(), "");
        assert!(chart.scales().is_none());
        assert!(chart.scene().bars.is_empty());
        assert!(chart.scene().labels.is_empty());
        assert!(chart.scene().x_axis.is_empty());
        assert!(chart.scene().y_axis.is_empty());
        assert!(chart.scene().center_line.is_none());
        assert_eq!(chart.scene().titles.len(), 4);
        assert!(!chart.is_animating());
        assert!(!chart.to_svg(500).contains("<rect"));

        chart.load_at(&[record("c", 3.0, 3.0)], 20);
        assert_eq!(chart.current_time(), "c");
        assert_eq!(chart.scene().bars.len(), 2);
    }

    #[test]
    fn ticks_stay_within_loaded_frames() {
        let mut chart = OrderBookChart::manual(one_level(), 800.0, 400.0).expect("chart");
        chart.load_at(&[record("a", 1.0, 1.0), record("b", 2.0, 2.0)], 0);
        chart.start_animation();
        assert_eq!(chart.scheduler_mut().schedule_count(), 1);

        for m in 1..=3u64 {
            assert!(tick(&mut chart, m * 1000));
            assert!(chart.current_index() < chart.frames().len());
            assert!(chart.current_frame().is_some());
        }
        assert_eq!(chart.current_index(), 1);
        assert_eq!(chart.playback().frame_count(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = ChartConfig {
            levels: 0,
            ..ChartConfig::default()
        };
        assert!(OrderBookChart::manual(config, 800.0, 400.0).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_driven_chart_advances_until_stopped() {
        let (scheduler, mut ticks) = TokioTickScheduler::new(tokio::runtime::Handle::current());
        let mut chart: TokioOrderBookChart =
            OrderBookChart::new(one_level(), 800.0, 400.0, scheduler).expect("chart");
        chart.load_at(
            &[
                record("t0", 1.0, 1.0),
                record("t1", 2.0, 2.0),
                record("t2", 3.0, 3.0),
            ],
            0,
        );
        chart.start_animation();

        let started = tokio::time::Instant::now();
        for _ in 0..2 {
            let tick = ticks.recv().await.expect("tick");
            assert!(chart.handle_tick_at(tick, 0).is_some());
        }
        assert_eq!(chart.current_time(), "t2");
        assert!(started.elapsed() >= Duration::from_millis(2000));

        chart.stop_animation();
        tokio::time::sleep(Duration::from_secs(10)).await;
        while let Ok(tick) = ticks.try_recv() {
            assert!(chart.handle_tick_at(tick, 0).is_none());
        }
        assert_eq!(chart.current_index(), 2);
    }
}
