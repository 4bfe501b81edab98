//! Tests for the virtualization engine.

use super::*;
use crate::model::MediaKind;
use crate::test_harness::{
    engine_with, media_item, single_column, text_items, translated_item, SimEngine,
    TEXT_ITEM_HEIGHT, VIEWPORT,
};
use crate::view::{HtmlRenderer, SimConfig, SimSurface};

fn id(n: usize) -> ItemId {
    ItemId::new(n)
}

fn container_of(engine: &SimEngine, n: usize) -> ContainerHandle {
    engine
        .container(id(n))
        .handle()
        .expect("item should be materialized")
}

/// Scroll to `top` at `now_ms` and deliver the frame that runs the pass.
fn scroll_and_settle(engine: &mut SimEngine, top: f64, now_ms: u64) {
    engine.on_scroll(top, now_ms);
    engine.on_frame(now_ms + 16);
}

// ===== Lifecycle =====

mod lifecycle {
    use super::*;

    #[test]
    fn init_loads_first_batch_materialized() {
        let engine = engine_with(text_items(100), EngineConfig::default());
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.rendered_count(), 30);
        assert_eq!(engine.materialized_count(), 30);
        assert_eq!(engine.placeholder_count(), 0);
        assert_eq!(engine.column_ends(), &[10, 10, 10]);
        assert_eq!(engine.stats().passes, 1);
        assert!(engine.is_visible(id(0)));
    }

    #[test]
    fn second_init_is_ignored() {
        let mut engine = engine_with(text_items(100), EngineConfig::default());
        engine.init(VIEWPORT, 50);
        assert_eq!(engine.rendered_count(), 30);
        assert_eq!(engine.stats().batches_loaded, 1);
    }

    #[test]
    fn signals_before_init_are_ignored() {
        let mut engine = FeedEngine::new(
            ItemStore::new(text_items(10)),
            SimSurface::default(),
            HtmlRenderer,
            EngineConfig::default(),
        );
        engine.on_scroll(500.0, 0);
        engine.on_frame(100);
        assert_eq!(engine.phase(), Phase::Created);
        assert_eq!(engine.rendered_count(), 0);
        assert_eq!(engine.scroll_top(), 0.0);
    }

    #[test]
    fn teardown_releases_everything() {
        let mut items = vec![
            media_item("clip", MediaKind::Video),
            translated_item("hola", "hello"),
            media_item("photo", MediaKind::Photo),
            media_item("loop", MediaKind::AnimatedGif),
        ];
        items.extend(text_items(10));
        let mut engine = engine_with(items, EngineConfig::default());
        assert!(engine.surface().live_listener_count() > 0);
        assert!(engine.surface().live_watch_count() > 0);
        assert_eq!(engine.video_watcher().len(), 1);

        engine.teardown();

        assert_eq!(engine.phase(), Phase::TornDown);
        assert_eq!(engine.surface().live_listener_count(), 0);
        assert_eq!(engine.surface().live_watch_count(), 0);
        assert!(engine.video_watcher().is_empty());
        assert!(engine.height_cache().is_empty());
        assert!(engine.surface().playing_videos().is_empty());
    }

    #[test]
    fn torn_down_engine_is_inert() {
        let mut engine = engine_with(text_items(100), EngineConfig::default());
        engine.teardown();
        engine.on_scroll(5_000.0, 10);
        engine.on_frame(100);
        assert_eq!(engine.scroll_top(), 0.0);
        assert_eq!(engine.rendered_count(), 30);
        assert_eq!(engine.load_more(200), 0);
        assert_eq!(engine.evaluate_visibility(300), PassOutcome::default());
    }

    #[test]
    fn engines_are_independent() {
        let mut a = engine_with(text_items(100), single_column(30));
        let b = engine_with(text_items(100), single_column(30));
        scroll_and_settle(&mut a, 20_000.0, 100);
        assert!(a.placeholder_count() > 0);
        assert_eq!(b.placeholder_count(), 0);
    }
}

// ===== Loading =====

mod loading {
    use super::*;

    #[test]
    fn hundred_items_in_batches_of_thirty() {
        let mut engine = engine_with(text_items(100), EngineConfig::default());
        assert_eq!(engine.rendered_count(), 30);
        assert_eq!(engine.load_more(1), 30);
        assert_eq!(engine.load_more(2), 30);
        assert_eq!(engine.load_more(3), 10);
        assert_eq!(engine.store().offset(), 100);
        assert_eq!(engine.rendered_count(), 100);
        assert_eq!(engine.load_more(4), 0);
        assert_eq!(engine.load_more(5), 0);
        assert_eq!(engine.stats().batches_loaded, 4);
        assert_eq!(engine.stats().items_loaded, 100);
    }

    #[test]
    fn columns_stay_count_balanced() {
        let mut engine = engine_with(text_items(100), EngineConfig::default());
        while engine.load_more(1) > 0 {}
        assert_eq!(engine.column_ends(), &[34, 33, 33]);
    }

    #[test]
    fn items_stack_with_gap() {
        let engine = engine_with(text_items(30), EngineConfig::default());
        // Item 3 is the second item of column 0.
        assert_eq!(engine.item_top(id(0)), Some(0.0));
        assert_eq!(engine.item_top(id(3)), Some(TEXT_ITEM_HEIGHT + 12.0));
        assert_eq!(
            engine.layout().slot(id(4)).map(|slot| slot.column.get()),
            Some(1)
        );
    }

    #[test]
    fn frames_load_until_columns_pass_lookahead() {
        let mut engine = engine_with(text_items(1_000), single_column(30));
        for frame in 1..50 {
            engine.on_frame(frame * 16);
        }
        let bottom = engine.layout().shortest_column_bottom();
        assert!(bottom > VIEWPORT.height + engine.config().load_lookahead);
        // One batch past the threshold at most.
        assert!(bottom < VIEWPORT.height + engine.config().load_lookahead + 30.0 * 132.0 + 1.0);
    }

    #[test]
    fn scroll_triggers_load_check() {
        let mut engine = engine_with(text_items(1_000), single_column(30));
        let before = engine.rendered_count();
        engine.on_scroll(10_000.0, 5);
        assert_eq!(engine.rendered_count(), before + 30);
    }

    #[test]
    fn exhausted_store_stops_loading_silently() {
        let mut engine = engine_with(text_items(5), EngineConfig::default());
        for frame in 1..10 {
            engine.on_frame(frame * 20);
        }
        assert_eq!(engine.rendered_count(), 5);
        assert_eq!(engine.stats().batches_loaded, 1);
        assert!(engine.store().is_exhausted());
    }

    #[test]
    fn empty_store_renders_nothing() {
        let mut engine = engine_with(Vec::new(), EngineConfig::default());
        engine.on_frame(16);
        assert_eq!(engine.rendered_count(), 0);
        assert_eq!(engine.stats().batches_loaded, 0);
    }
}

// ===== Promotion and demotion =====

mod visibility {
    use super::*;

    #[test]
    fn item_far_above_viewport_is_demoted_with_measured_size() {
        let mut engine = engine_with(text_items(300), single_column(30));
        let container = container_of(&engine, 0);
        let measured = engine.surface().measure(container).expect("mounted");

        scroll_and_settle(&mut engine, 20_000.0 + TEXT_ITEM_HEIGHT, 100);

        let rep = engine.representation(id(0)).expect("rendered");
        assert_eq!(rep.placeholder_size(), Some(measured));
        assert_eq!(engine.container(id(0)), ContainerLookup::Placeholder);
        assert!(!engine.is_visible(id(0)));
        assert_eq!(engine.item_extent(id(0)).map(|e| e.height()), Some(measured.height.get()));
    }

    #[test]
    fn scrolling_back_promotes_with_identical_content() {
        let mut engine = engine_with(text_items(300), single_column(30));
        let original = engine
            .surface()
            .container_html(container_of(&engine, 0))
            .map(str::to_string);

        scroll_and_settle(&mut engine, 20_000.0 + TEXT_ITEM_HEIGHT, 100);
        assert!(!engine.representation(id(0)).is_some_and(Representation::is_materialized));

        scroll_and_settle(&mut engine, 0.0, 200);
        let again = container_of(&engine, 0);
        assert_eq!(engine.surface().container_html(again).map(str::to_string), original);
        assert!(engine.is_visible(id(0)));
        assert!(engine.stats().promotions >= 1);
    }

    #[test]
    fn demotion_keeps_other_items_in_place() {
        let mut engine = engine_with(text_items(300), single_column(30));
        let tops: Vec<Option<f64>> = (0..30).map(|n| engine.item_top(id(n))).collect();
        scroll_and_settle(&mut engine, 25_000.0, 100);
        assert!(engine.placeholder_count() >= 30);
        let after: Vec<Option<f64>> = (0..30).map(|n| engine.item_top(id(n))).collect();
        assert_eq!(tops, after);
    }

    #[test]
    fn placeholder_preserves_tree_position() {
        let mut engine = engine_with(text_items(300), single_column(30));
        scroll_and_settle(&mut engine, 25_000.0, 100);
        let nodes = engine.surface().column_nodes(crate::model::ColumnIndex::new(0));
        assert_eq!(nodes.len(), engine.rendered_count());
        match nodes[0] {
            crate::view::sim::SimNode::Placeholder(handle) => {
                assert_eq!(engine.surface().placeholder(handle).map(|(item, _)| item), Some(id(0)));
            }
            other => panic!("expected placeholder first, got {other:?}"),
        }
    }

    #[test]
    fn item_within_top_margin_stays_materialized() {
        let mut engine = engine_with(text_items(300), single_column(30));
        // Item 0 ends 9,000px above the viewport.
        scroll_and_settle(&mut engine, 9_000.0 + TEXT_ITEM_HEIGHT, 100);
        assert!(engine.representation(id(0)).is_some_and(Representation::is_materialized));
    }

    #[test]
    fn never_visible_item_is_not_demoted() {
        let mut engine = engine_with(text_items(1_000), single_column(30));
        // Loaded by the scroll's load check, never inside the window during a pass.
        engine.on_scroll(40_000.0, 10);
        let fresh = engine.rendered_count() - 1;
        engine.on_frame(30);
        assert!(engine.representation(id(fresh)).is_some_and(Representation::is_materialized));
    }

    #[test]
    fn second_pass_performs_no_swaps() {
        let mut engine = engine_with(text_items(300), EngineConfig::default());
        engine.on_scroll(15_000.0, 10);
        let first = engine.evaluate_visibility(20);
        assert_eq!(first.demoted, 30);
        assert_eq!(engine.evaluate_visibility(21).swaps(), 0);

        engine.on_scroll(0.0, 40);
        engine.evaluate_visibility(60);
        assert_eq!(engine.evaluate_visibility(61), PassOutcome::default());
    }

    #[test]
    fn representation_counts_always_sum_to_rendered() {
        let mut engine = engine_with(text_items(500), EngineConfig::default());
        for (step, top) in [0.0, 12_000.0, 30_000.0, 4_000.0, 0.0].into_iter().enumerate() {
            scroll_and_settle(&mut engine, top, 100 * (step as u64 + 1));
            assert_eq!(
                engine.materialized_count() + engine.placeholder_count(),
                engine.rendered_count()
            );
            assert_eq!(engine.surface().container_count(), engine.materialized_count());
            assert_eq!(engine.surface().placeholder_count(), engine.placeholder_count());
        }
    }

    #[test]
    fn busy_container_is_not_demoted() {
        let mut engine = engine_with(text_items(300), single_column(30));
        let container = container_of(&engine, 0);
        engine.surface_mut().set_busy(container, true);

        scroll_and_settle(&mut engine, 20_500.0, 100);
        assert_eq!(engine.container(id(0)), ContainerLookup::Materialized(container));
        assert_eq!(engine.container(id(1)), ContainerLookup::Placeholder);
        assert!(engine.is_visible(id(0)));

        engine.surface_mut().set_busy(container, false);
        scroll_and_settle(&mut engine, 20_600.0, 200);
        assert_eq!(engine.container(id(0)), ContainerLookup::Placeholder);
    }

    #[test]
    fn unknown_ids_resolve_to_unknown() {
        let mut engine = engine_with(text_items(10), EngineConfig::default());
        assert_eq!(engine.container(id(999)), ContainerLookup::Unknown);
        assert!(engine.representation(id(999)).is_none());
        assert!(!engine.toggle_language(id(999)));
        assert!(!engine.finish_language_toggle(id(999), 0));
    }
}

// ===== Resource release =====

mod resources {
    use super::*;

    fn mixed_items(n: usize) -> Vec<crate::model::Item> {
        (0..n)
            .map(|i| match i % 4 {
                0 => media_item(&format!("clip{i}"), MediaKind::Video),
                1 => translated_item(&format!("hola {i}"), &format!("hello {i}")),
                2 => media_item(&format!("photo{i}"), MediaKind::Photo),
                _ => media_item(&format!("loop{i}"), MediaKind::AnimatedGif),
            })
            .collect()
    }

    fn live_listeners_of_materialized(engine: &SimEngine) -> usize {
        (0..engine.rendered_count())
            .filter_map(|n| match engine.representation(id(n)) {
                Some(Representation::Materialized { bindings, .. }) => Some(bindings.listeners.len()),
                _ => None,
            })
            .sum()
    }

    #[test]
    fn demotion_releases_listeners_watches_and_videos() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        scroll_and_settle(&mut engine, 30_000.0, 100);
        assert!(engine.placeholder_count() > 0);

        assert_eq!(
            engine.surface().live_listener_count(),
            live_listeners_of_materialized(&engine)
        );
        assert_eq!(engine.surface().leaked_video_count(), 0);
        for n in 0..engine.rendered_count() {
            if engine.container(id(n)) == ContainerLookup::Placeholder {
                assert!(engine.video_watcher().owned_by(id(n)).is_empty());
                assert!(!engine.monitored().contains(id(n)));
            }
        }
    }

    #[test]
    fn demoted_video_is_released_and_unobserved() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        let video = engine.surface().videos(container_of(&engine, 0))[0].handle;
        assert!(engine.video_watcher().is_observed(video));

        scroll_and_settle(&mut engine, 30_000.0, 100);

        assert!(!engine.video_watcher().is_observed(video));
        assert_eq!(engine.surface().is_released(video), Some(true));
    }

    #[test]
    fn looping_clip_is_released_but_never_observed() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        let gif = engine.surface().videos(container_of(&engine, 3))[0];
        assert!(!gif.autoplay);
        assert!(!engine.video_watcher().is_observed(gif.handle));

        scroll_and_settle(&mut engine, 30_000.0, 100);
        assert_eq!(engine.surface().is_released(gif.handle), Some(true));
    }

    #[test]
    fn promotion_rebinds_listeners() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        let before = engine
            .surface()
            .listeners_on(container_of(&engine, 1));
        assert_eq!(before, vec![ListenerKind::LanguageToggle]);

        scroll_and_settle(&mut engine, 30_000.0, 100);
        scroll_and_settle(&mut engine, 0.0, 200);

        let after = engine.surface().listeners_on(container_of(&engine, 1));
        assert_eq!(after, before);
    }

    #[test]
    fn failed_swap_keeps_item_bound() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        let container = container_of(&engine, 1);
        assert!(engine.surface_mut().detach_from_tree(container));

        scroll_and_settle(&mut engine, 30_000.0, 100);

        assert_eq!(engine.container(id(1)), ContainerLookup::Materialized(container));
        assert_eq!(
            engine.surface().listeners_on(container),
            vec![ListenerKind::LanguageToggle]
        );
        assert_eq!(engine.container(id(2)), ContainerLookup::Placeholder);
        assert_eq!(
            engine.surface().live_listener_count(),
            live_listeners_of_materialized(&engine)
        );
    }

    #[test]
    fn promoted_video_is_observed_again() {
        let mut engine = engine_with(mixed_items(400), single_column(30));
        scroll_and_settle(&mut engine, 30_000.0, 100);
        scroll_and_settle(&mut engine, 0.0, 200);
        let video = engine.surface().videos(container_of(&engine, 0))[0].handle;
        assert!(engine.video_watcher().is_observed(video));
    }
}

// ===== Height monitoring =====

mod heights {
    use super::*;

    #[test]
    fn media_near_viewport_is_watched_at_init() {
        let engine = engine_with(vec![media_item("clip", MediaKind::Video)], single_column(30));
        assert!(engine.monitored().is_empty());
        assert_eq!(engine.surface().live_watch_count(), 1);
        assert_eq!(engine.height_cache().len(), 1);
    }

    #[test]
    fn media_far_below_waits_for_monitoring() {
        let mut items = text_items(60);
        items.push(media_item("late", MediaKind::Photo));
        let mut engine = engine_with(items, single_column(61));
        // Item 60 sits at 60 * 132 = 7920px, beyond the 4,800px monitor window.
        assert!(engine.monitored().contains(id(60)));

        scroll_and_settle(&mut engine, 4_000.0, 100);
        assert!(!engine.monitored().contains(id(60)));
    }

    #[test]
    fn media_change_remeasures_after_debounce() {
        let mut engine = engine_with(vec![media_item("clip", MediaKind::Video)], single_column(30));
        let pending = engine.item_extent(id(0)).map(|e| e.height());
        assert_eq!(pending, Some(160.0));

        let changed = engine.surface_mut().complete_pending_loads();
        assert_eq!(changed.len(), 1);
        engine.on_media_changed(changed[0], 10);

        engine.on_frame(100);
        assert_eq!(engine.item_extent(id(0)).map(|e| e.height()), Some(160.0));

        engine.on_frame(210);
        // 336px wide at 16:9.
        assert_eq!(engine.item_extent(id(0)).map(|e| e.height()), Some(160.0 - 40.0 + 189.0));
        assert_eq!(engine.stats().remeasures, 1);
    }

    #[test]
    fn repeated_changes_are_debounced_last_write_wins() {
        let mut engine = engine_with(vec![media_item("clip", MediaKind::Video)], single_column(30));
        let media = engine.surface_mut().complete_pending_loads()[0];
        engine.on_media_changed(media, 10);
        engine.on_media_changed(media, 150);
        engine.on_frame(215);
        assert_eq!(engine.item_extent(id(0)).map(|e| e.height()), Some(160.0));
        engine.on_frame(350);
        assert_eq!(engine.item_extent(id(0)).map(|e| e.height()), Some(309.0));
    }

    #[test]
    fn change_on_released_media_is_ignored() {
        let mut engine = engine_with(text_items(10), EngineConfig::default());
        engine.on_media_changed(MediaHandle::from_raw(9_999), 0);
        engine.on_frame(500);
        assert_eq!(engine.stats().remeasures, 0);
    }

    #[test]
    fn height_change_shifts_items_below() {
        let mut items = vec![media_item("clip", MediaKind::Video)];
        items.extend(text_items(5));
        let mut engine = engine_with(items, single_column(30));
        let before = engine.item_top(id(1)).expect("laid out");

        let media = engine.surface_mut().complete_pending_loads()[0];
        engine.on_media_changed(media, 0);
        engine.on_frame(200);

        assert_eq!(engine.item_top(id(1)), Some(before + 149.0));
    }
}

// ===== Scheduling =====

mod scheduling {
    use super::*;

    #[test]
    fn two_resizes_within_interval_run_one_pass() {
        let mut engine = engine_with(text_items(30), single_column(30));
        let passes = engine.stats().passes;

        engine.on_resize(Viewport::new(1000.0, 700.0), 100);
        engine.on_frame(101);
        engine.on_resize(Viewport::new(900.0, 600.0), 108);
        engine.on_frame(110);
        engine.on_frame(116);
        engine.on_frame(133);
        engine.on_frame(150);

        assert_eq!(engine.stats().passes, passes + 1);
        assert_eq!(engine.viewport(), Viewport::new(900.0, 600.0));
    }

    #[test]
    fn scroll_pass_waits_for_frame() {
        let mut engine = engine_with(text_items(30), single_column(30));
        engine.on_scroll(100.0, 100);
        assert!(engine.is_pass_pending());
        assert_eq!(engine.stats().passes, 1);
        engine.on_frame(116);
        assert!(!engine.is_pass_pending());
        assert_eq!(engine.stats().passes, 2);
    }

    #[test]
    fn handle_dispatches_signals() {
        let mut engine = engine_with(text_items(30), single_column(30));
        engine.handle(Signal::Scroll { top: 250.0 }, 100);
        engine.handle(Signal::Frame, 116);
        assert_eq!(engine.scroll_top(), 250.0);
        assert_eq!(engine.stats().passes, 2);
    }

    #[test]
    fn negative_scroll_clamps_to_zero() {
        let mut engine = engine_with(text_items(30), single_column(30));
        engine.on_scroll(-50.0, 10);
        assert_eq!(engine.scroll_top(), 0.0);
    }
}

// ===== Video playback =====

mod video {
    use super::*;

    #[test]
    fn video_in_viewport_starts_muted() {
        let engine = engine_with(vec![media_item("clip", MediaKind::Video)], single_column(30));
        let video = engine.surface().videos(container_of(&engine, 0))[0].handle;
        assert_eq!(engine.surface().playing_videos(), vec![video]);
        assert_eq!(engine.surface().is_muted(video), Some(true));
        assert_eq!(engine.stats().videos_started, 1);
    }

    #[test]
    fn video_leaving_viewport_pauses() {
        let mut items = vec![media_item("clip", MediaKind::Video)];
        items.extend(text_items(100));
        let mut engine = engine_with(items, single_column(30));
        scroll_and_settle(&mut engine, 3_000.0, 100);
        assert!(engine.surface().playing_videos().is_empty());
        assert!(engine.representation(id(0)).is_some_and(Representation::is_materialized));

        scroll_and_settle(&mut engine, 0.0, 200);
        assert_eq!(engine.surface().playing_videos().len(), 1);
        assert_eq!(engine.stats().videos_started, 2);
    }

    #[test]
    fn blocked_autoplay_is_swallowed() {
        let mut surface = SimSurface::new(SimConfig::default());
        surface.set_autoplay_blocked(true);
        let mut engine = FeedEngine::new(
            ItemStore::new(vec![media_item("clip", MediaKind::Video)]),
            surface,
            HtmlRenderer,
            single_column(30),
        );
        engine.init(VIEWPORT, 0);

        assert_eq!(engine.stats().playback_failures, 1);
        assert_eq!(engine.stats().videos_started, 0);
        assert!(engine.surface().playing_videos().is_empty());
    }

    #[test]
    fn video_below_viewport_stays_paused() {
        let mut items = text_items(10);
        items.push(media_item("clip", MediaKind::Video));
        let engine = engine_with(items, single_column(30));
        assert!(engine.surface().playing_videos().is_empty());
        assert_eq!(engine.video_watcher().len(), 1);
    }
}

// ===== Display mode and language toggle =====

mod display_mode {
    use super::*;

    fn translated_items(n: usize) -> Vec<crate::model::Item> {
        (0..n)
            .map(|i| translated_item(&format!("post {i}"), &format!("translated {i}")))
            .collect()
    }

    const SHOWN: DisplayMode = DisplayMode {
        translation_shown: true,
    };

    #[test]
    fn mode_applies_to_materialized_without_animation() {
        let mut engine = engine_with(translated_items(30), EngineConfig::default());
        engine.set_display_mode(SHOWN, 10);
        for n in 0..30 {
            let container = container_of(&engine, n);
            assert_eq!(engine.surface().shows_translation(container), Some(true));
        }
        assert_eq!(engine.surface().animation_count(), 0);
    }

    #[test]
    fn placeholder_picks_up_mode_on_promotion() {
        let mut engine = engine_with(translated_items(300), single_column(30));
        scroll_and_settle(&mut engine, 25_000.0, 100);
        assert_eq!(engine.container(id(0)), ContainerLookup::Placeholder);

        engine.set_display_mode(SHOWN, 150);
        scroll_and_settle(&mut engine, 0.0, 200);

        let container = container_of(&engine, 0);
        assert_eq!(engine.surface().shows_translation(container), Some(true));
        assert_eq!(engine.surface().animation_count(), 0);
    }

    #[test]
    fn toggle_animates_and_blocks_demotion() {
        let mut engine = engine_with(translated_items(300), single_column(30));
        assert!(engine.toggle_language(id(0)));
        assert!(!engine.toggle_language(id(0)), "second toggle while animating");
        let container = container_of(&engine, 0);
        assert_eq!(engine.surface().shows_translation(container), Some(true));
        assert_eq!(engine.surface().animation_count(), 1);

        scroll_and_settle(&mut engine, 25_000.0, 100);
        assert_eq!(engine.container(id(0)), ContainerLookup::Materialized(container));

        assert!(engine.finish_language_toggle(id(0), 150));
        assert!(!engine.finish_language_toggle(id(0), 151));
        scroll_and_settle(&mut engine, 25_100.0, 200);
        assert_eq!(engine.container(id(0)), ContainerLookup::Placeholder);
    }

    #[test]
    fn toggle_without_translation_is_rejected() {
        let mut engine = engine_with(text_items(10), EngineConfig::default());
        assert!(!engine.toggle_language(id(0)));
    }

    #[test]
    fn item_that_shrinks_on_promotion_is_left_unmarked() {
        let long = "translated words ".repeat(40);
        let items = (0..300)
            .map(|i| translated_item(&format!("post {i}"), &long))
            .collect();
        let mut engine = engine_with(items, single_column(30));
        engine.set_display_mode(SHOWN, 10);
        scroll_and_settle(&mut engine, 40_000.0, 100);
        assert_eq!(engine.container(id(5)), ContainerLookup::Placeholder);

        engine.set_display_mode(DisplayMode::default(), 200);
        let placeholder = engine.item_extent(id(5)).expect("rendered");
        // Window top sits one pixel above the placeholder's bottom edge.
        engine.on_scroll(placeholder.bottom + 10_000.0 - 1.0, 300);

        let first = engine.evaluate_visibility(301);
        assert!(first.promoted > 0);
        let promoted = engine.item_extent(id(5)).expect("rendered");
        assert!(promoted.bottom < placeholder.bottom - 1.0);
        assert!(engine.representation(id(5)).is_some_and(Representation::is_materialized));
        assert!(!engine.is_visible(id(5)));

        assert_eq!(engine.evaluate_visibility(302), PassOutcome::default());
    }

    #[test]
    fn global_mode_resets_running_toggle() {
        let mut engine = engine_with(translated_items(10), EngineConfig::default());
        engine.toggle_language(id(0));
        engine.set_display_mode(SHOWN, 10);
        match engine.representation(id(0)) {
            Some(Representation::Materialized { bindings, .. }) => {
                assert_eq!(bindings.toggle, Some(LanguageToggle::new(SHOWN)));
            }
            other => panic!("expected materialized, got {other:?}"),
        }
    }
}
