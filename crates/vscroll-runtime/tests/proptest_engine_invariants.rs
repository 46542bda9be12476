//! Property-based invariant tests for the windowing engine.
//!
//! 1. Slice bounds stay valid for the list under any event sequence
//! 2. At most one frame is outstanding at a time
//! 3. Once settled, another update changes nothing
//! 4. A disposed engine ignores every event

use std::time::Duration;

use proptest::prelude::*;
use vscroll_core::diagnostics::IgnoreDiagnostics;
use vscroll_runtime::testing::{ManualFrames, SimViewport, StaticHeightRenderer};
use vscroll_runtime::{ItemId, OrderedList, ScrollerConfig, Updater};
use web_time::Instant;

#[derive(Debug, Clone)]
enum Op {
    Scroll(u16),
    Resize(u16),
    Frame,
    Poll(u8),
    Truncate(u8),
    Prepend(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..8_000).prop_map(Op::Scroll),
        (1u16..900).prop_map(Op::Resize),
        Just(Op::Frame),
        (0u8..250).prop_map(Op::Poll),
        (0u8..60).prop_map(Op::Truncate),
        (0u8..10).prop_map(Op::Prepend),
    ]
}

struct Harness {
    updater: Updater<i64, ManualFrames>,
    viewport: SimViewport,
    renderer: StaticHeightRenderer,
    clock: Instant,
    first_id: i64,
    last_id: i64,
}

impl Harness {
    fn new(len: i64, heights: &[u16]) -> Self {
        let viewport = SimViewport::new(400.0);
        let mut renderer = StaticHeightRenderer::uniform(40.0);
        for (i, h) in heights.iter().enumerate() {
            renderer.set_height(ItemId::from(i as i64), f64::from(*h));
        }
        let list = ids(0..len);
        let updater = Updater::new(list, ScrollerConfig::default(), ManualFrames::new(), &viewport);
        Self {
            updater,
            viewport,
            renderer,
            clock: Instant::now(),
            first_id: 0,
            last_id: len,
        }
    }

    fn mount(&mut self) {
        self.updater.mount(&mut self.viewport, &mut self.renderer);
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Scroll(offset) => {
                self.viewport.set_scroll_offset(f64::from(offset));
                self.clock += Duration::from_millis(16);
                self.updater.on_scroll(self.clock);
            }
            Op::Resize(height) => {
                self.viewport.set_height(f64::from(height));
                self.updater.on_resize();
            }
            Op::Frame => {
                self.updater.on_frame(&mut self.viewport, &mut self.renderer);
            }
            Op::Poll(ms) => {
                self.clock += Duration::from_millis(u64::from(ms));
                self.updater.poll_timers(self.clock);
            }
            Op::Truncate(keep) => {
                self.last_id = (self.first_id + i64::from(keep)).min(self.last_id);
                self.updater.set_list(
                    ids(self.first_id..self.last_id),
                    &mut self.viewport,
                    &mut self.renderer,
                );
            }
            Op::Prepend(count) => {
                self.first_id -= i64::from(count);
                self.updater.set_list(
                    ids(self.first_id..self.last_id),
                    &mut self.viewport,
                    &mut self.renderer,
                );
            }
        }
    }

    fn frame(&mut self) {
        self.updater.on_frame(&mut self.viewport, &mut self.renderer);
    }
}

fn ids(range: std::ops::Range<i64>) -> OrderedList<i64> {
    OrderedList::ingest(range, |i: &i64| ItemId::from(*i), &mut IgnoreDiagnostics)
}

proptest! {
    #[test]
    fn bounds_stay_valid(
        len in 0i64..80,
        heights in prop::collection::vec(0u16..300, 0..80),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut h = Harness::new(len, &heights);
        h.mount();
        for op in &ops {
            h.apply(op);
            let bounds = h.updater.bounds();
            let list_len = h.updater.list().len();
            prop_assert!(bounds.is_valid_for(list_len), "{:?} for {} items", bounds, list_len);
            prop_assert_eq!(h.updater.current_slice().len(), bounds.len());
            if list_len > 0 {
                prop_assert!(!bounds.is_empty());
            }
        }
    }

    #[test]
    fn at_most_one_frame_outstanding(ops in prop::collection::vec(op(), 0..80)) {
        let mut h = Harness::new(60, &[]);
        h.mount();
        let mut outstanding = h.updater.scheduler().requested();
        for op in &ops {
            let before = h.updater.scheduler().requested();
            h.apply(op);
            let after = h.updater.scheduler().requested();
            prop_assert!(after - before <= 1);
            if matches!(op, Op::Frame) {
                outstanding = after - before;
            } else {
                outstanding += after - before;
            }
            prop_assert!(outstanding <= 1, "{} frames outstanding after {:?}", outstanding, op);
        }
    }

    #[test]
    fn settled_engine_is_idempotent(
        heights in prop::collection::vec(1u16..300, 10..60),
        offset in 0u16..6_000,
    ) {
        let mut h = Harness::new(heights.len() as i64, &heights);
        h.mount();
        h.viewport.set_scroll_offset(f64::from(offset));
        h.updater.on_resize();
        for _ in 0..200 {
            h.frame();
            h.updater.on_resize();
            let cycles = h.updater.stats().render_cycles;
            h.frame();
            if h.updater.stats().render_cycles == cycles {
                break;
            }
        }
        let bounds = h.updater.bounds();
        let cycles = h.updater.stats().render_cycles;
        h.updater.on_resize();
        h.frame();
        prop_assert_eq!(h.updater.bounds(), bounds);
        prop_assert_eq!(h.updater.stats().render_cycles, cycles);
    }

    #[test]
    fn disposed_engine_is_inert(ops in prop::collection::vec(op(), 0..40)) {
        let mut h = Harness::new(30, &[]);
        h.mount();
        h.updater.dispose();
        let stats = h.updater.stats();
        let frames = h.updater.scheduler().requested();
        for op in &ops {
            h.apply(op);
        }
        prop_assert_eq!(h.updater.stats(), stats);
        prop_assert_eq!(h.updater.scheduler().requested(), frames);
        prop_assert_eq!(h.updater.list().len(), 30);
        prop_assert!(h.viewport.calls().is_empty());
    }
}
