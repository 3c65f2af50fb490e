#[cfg(test)]
mod tests_properties {
    use depth_chart_rs::{
        ChartConfig, ChartDimensions, ManualTickScheduler, PlaybackController, RenderSync,
        ScaleEngine, Scene, Side, SnapshotRecord, level_ordering, normalize_record,
    };
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::time::Duration;

    fn maybe_size() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            1 => Just(None),
            4 => (0.0f64..1_000_000.0).prop_map(Some),
        ]
    }

    fn record_strategy(levels: u32) -> impl Strategy<Value = SnapshotRecord> {
        prop::collection::vec((maybe_size(), maybe_size()), levels as usize).prop_map(|sizes| {
            let mut record = SnapshotRecord::default().with_field("Time", "t");
            for (i, (bid, ask)) in sizes.into_iter().enumerate() {
                let level = i + 1;
                record = record
                    .with_field(format!("Bid{level}"), 100.0 - level as f64 * 0.01)
                    .with_field(format!("Ask{level}"), 100.0 + level as f64 * 0.01);
                if let Some(bid) = bid {
                    record = record.with_field(format!("Bid{level}Size"), bid);
                }
                if let Some(ask) = ask {
                    record = record.with_field(format!("Ask{level}Size"), ask);
                }
            }
            record
        })
    }

    fn levels_and_record() -> impl Strategy<Value = (u32, SnapshotRecord)> {
        (1u32..=12).prop_flat_map(|levels| (Just(levels), record_strategy(levels)))
    }

    proptest! {
        #[test]
        fn normalizer_emits_two_entries_per_level_with_unique_keys((levels, record) in levels_and_record()) {
            let frame = normalize_record(&record, levels);
            prop_assert_eq!(frame.orders.len(), 2 * levels as usize);
            let keys: HashSet<_> = frame.keys().collect();
            prop_assert_eq!(keys.len(), 2 * levels as usize);
        }

        #[test]
        fn ordering_puts_asks_first_with_increasing_levels((levels, record) in levels_and_record()) {
            let frame = normalize_record(&record, levels);
            let ordering = level_ordering(&frame.orders);

            let first_bid = ordering.iter().position(|c| c.side == Side::Bid).unwrap_or(ordering.len());
            prop_assert!(ordering[..first_bid].iter().all(|c| c.side == Side::Ask));
            prop_assert!(ordering[first_bid..].iter().all(|c| c.side == Side::Bid));
            for pair in ordering.windows(2) {
                if pair[0].side == pair[1].side {
                    prop_assert!(pair[0].level < pair[1].level);
                }
            }
        }

        #[test]
        fn x_domain_is_symmetric_max_finite_size((levels, record) in levels_and_record()) {
            let config = ChartConfig { levels, ..ChartConfig::default() };
            let frame = normalize_record(&record, levels);
            let dims = ChartDimensions::from_container(800.0, 400.0, config.margin);
            let scales = ScaleEngine::compute(&frame.orders, &level_ordering(&frame.orders), &dims, &config);

            let expected = frame
                .orders
                .iter()
                .map(|o| o.size)
                .filter(|s| s.is_finite())
                .fold(0.0f64, f64::max);
            let [low, high] = scales.x.domain();
            prop_assert_eq!(low, -high);
            prop_assert_eq!(high, expected);
        }

        #[test]
        fn render_sync_is_idempotent((levels, record) in levels_and_record(), later in 0u64..600) {
            let config = ChartConfig { levels, ..ChartConfig::default() };
            let frame = normalize_record(&record, levels);
            let dims = ChartDimensions::from_container(800.0, 400.0, config.margin);
            let scales = ScaleEngine::compute(&frame.orders, &level_ordering(&frame.orders), &dims, &config);

            let mut scene = Scene::new(dims, &config);
            RenderSync::sync(&mut scene, &frame, &scales, &config, 0);
            let once: Vec<_> = scene.bars.values().map(|b| b.target()).collect();
            let labels_once = scene.labels.clone();

            RenderSync::sync(&mut scene, &frame, &scales, &config, later);
            let twice: Vec<_> = scene.bars.values().map(|b| b.target()).collect();

            prop_assert_eq!(scene.bars.len(), 2 * levels as usize);
            prop_assert_eq!(once, twice);
            prop_assert_eq!(labels_once, scene.labels.clone());
        }

        #[test]
        fn playback_index_is_ticks_mod_frames(frames in 1usize..20, ticks in 0usize..100) {
            let mut playback = PlaybackController::new(ManualTickScheduler::new(), Duration::from_millis(1000));
            playback.set_frame_count(frames);
            prop_assert!(playback.start());

            for _ in 0..ticks {
                let tick = playback.scheduler().next_tick().expect("active schedule");
                playback.on_tick(tick);
            }
            prop_assert_eq!(playback.current_index(), ticks % frames);
        }

        #[test]
        fn seek_while_running_stops_at_exact_index(frames in 1usize..50, pick in any::<prop::sample::Index>(), ticks in 0usize..10) {
            let mut playback = PlaybackController::new(ManualTickScheduler::new(), Duration::from_millis(1000));
            playback.set_frame_count(frames);
            playback.start();
            for _ in 0..ticks {
                let tick = playback.scheduler().next_tick().expect("active schedule");
                playback.on_tick(tick);
            }

            let target = pick.index(frames);
            prop_assert_eq!(playback.seek(target), target);
            prop_assert!(!playback.is_running());
            prop_assert_eq!(playback.scheduler().active_count(), 0);
        }
    }
}
