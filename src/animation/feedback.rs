//! Visual feedback cues triggered by UI events

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Easing, Properties, Target, Timing, Tweener};

const SHAKE_DISTANCE: f32 = 2.0;
const SHAKE_STEP_MS: u64 = 60;
const SHAKE_REPEATS: u32 = 5;
const PULSE_MS: u64 = 700;

const ENTRANCE_RISE: f32 = 2.0;
const ENTRANCE_MS: u64 = 450;
const ENTRANCE_STAGGER_MS: u64 = 80;

const HOVER_SCALE: f32 = 1.05;
const HOVER_MS: u64 = 150;

const PROGRESS_MS: u64 = 120;
const BUTTON_IN_MS: u64 = 300;
const BUTTON_OUT_MS: u64 = 200;
const BUTTON_HIDDEN_SCALE: f32 = 0.6;

const LOGO_DRAW_MS: u64 = 1500;

#[derive(Debug, Default)]
struct ScrollCue {
    progress: Option<f32>,
    button_visible: bool,
}

/// Translates UI events into animations on an injected [`Tweener`]
pub struct FeedbackAnimator {
    tweener: Arc<dyn Tweener>,
    back_to_top_threshold: u16,
    scroll: Mutex<ScrollCue>,
}

impl FeedbackAnimator {
    pub fn new(tweener: Arc<dyn Tweener>, back_to_top_threshold: u16) -> Self {
        tweener.animate(
            Target::BackToTop,
            Properties::new().opacity(0.0).scale(BUTTON_HIDDEN_SCALE),
            Timing::instant(),
        );
        Self {
            tweener,
            back_to_top_threshold,
            scroll: Mutex::new(ScrollCue::default()),
        }
    }

    /// Track scroll progress and show or hide the back-to-top button
    pub fn on_scroll(&self, offset: u16, max_offset: u16) {
        let Ok(mut cue) = self.scroll.lock() else {
            return;
        };

        let progress = if max_offset == 0 {
            0.0
        } else {
            (offset.min(max_offset) as f32 / max_offset as f32) * 100.0
        };
        if cue.progress != Some(progress) {
            cue.progress = Some(progress);
            self.tweener.animate(
                Target::ScrollProgress,
                Properties::new().width(progress),
                Timing::millis(PROGRESS_MS).easing(Easing::QuadOut),
            );
        }

        let visible = offset > self.back_to_top_threshold;
        if visible == cue.button_visible {
            return;
        }
        cue.button_visible = visible;

        if visible {
            tracing::trace!(offset, "Back-to-top shown");
            self.tweener.animate(
                Target::BackToTop,
                Properties::new().opacity(1.0).scale(1.0),
                Timing::millis(BUTTON_IN_MS).easing(Easing::BackOut),
            );
        } else {
            tracing::trace!(offset, "Back-to-top hidden");
            self.tweener.animate(
                Target::BackToTop,
                Properties::new().opacity(0.0).scale(BUTTON_HIDDEN_SCALE),
                Timing::millis(BUTTON_OUT_MS).easing(Easing::QuadOut),
            );
        }
    }

    /// Staggered fade and rise for freshly rendered cards
    pub fn entrance(&self, count: usize) {
        for index in 0..count {
            let card = Target::Card(index);
            self.tweener.animate(
                card,
                Properties::new().opacity(0.0).offset_y(ENTRANCE_RISE),
                Timing::instant(),
            );
            self.tweener.animate(
                card,
                Properties::new().opacity(1.0).offset_y(0.0),
                Timing::millis(ENTRANCE_MS)
                    .delay(Duration::from_millis(ENTRANCE_STAGGER_MS * index as u64))
                    .easing(Easing::CubicOut),
            );
        }
    }

    pub fn hover_enter(&self, index: usize) {
        self.tweener.animate(
            Target::Card(index),
            Properties::new().scale(HOVER_SCALE).glow(1.0),
            Timing::millis(HOVER_MS).easing(Easing::QuadOut),
        );
    }

    pub fn hover_leave(&self, index: usize) {
        self.tweener.animate(
            Target::Card(index),
            Properties::new().scale(1.0).glow(0.0),
            Timing::millis(HOVER_MS).easing(Easing::QuadOut),
        );
    }

    /// Shake the search bar and pulse its color
    pub fn failure(&self) {
        let bar = Target::SearchBar;
        self.tweener.animate(bar, Properties::new().offset_x(0.0).glow(1.0), Timing::instant());
        self.tweener.animate(
            bar,
            Properties::new().offset_x(SHAKE_DISTANCE),
            Timing::millis(SHAKE_STEP_MS)
                .repeat(SHAKE_REPEATS, true)
                .easing(Easing::SineInOut),
        );
        self.tweener.animate(
            bar,
            Properties::new().glow(0.0),
            Timing::millis(PULSE_MS).easing(Easing::QuadOut),
        );
    }

    /// Draw the hero title stroke by stroke
    pub fn draw_logo(&self) {
        self.tweener.animate(Target::Logo, Properties::new().reveal(0.0), Timing::instant());
        self.tweener.animate(
            Target::Logo,
            Properties::new().reveal(1.0),
            Timing::millis(LOGO_DRAW_MS).easing(Easing::SineInOut),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::RecordingTweener;
    use crate::animation::{Sample, TweenEngine};

    fn animator(threshold: u16) -> (Arc<RecordingTweener>, FeedbackAnimator) {
        let tweener = Arc::new(RecordingTweener::default());
        let animator = FeedbackAnimator::new(tweener.clone(), threshold);
        (tweener, animator)
    }

    #[test]
    fn button_starts_hidden() {
        let (tweener, _animator) = animator(15);
        let calls = tweener.calls_for(Target::BackToTop);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.opacity, Some(0.0));
        assert_eq!(calls[0].1, Timing::instant());
    }

    #[test]
    fn button_toggles_once_per_crossing() {
        let (tweener, animator) = animator(15);
        animator.on_scroll(10, 60);
        animator.on_scroll(15, 60);
        assert_eq!(tweener.calls_for(Target::BackToTop).len(), 1);

        animator.on_scroll(16, 60);
        animator.on_scroll(40, 60);
        let calls = tweener.calls_for(Target::BackToTop);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0.opacity, Some(1.0));

        animator.on_scroll(3, 60);
        let calls = tweener.calls_for(Target::BackToTop);
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].0.opacity, Some(0.0));
        assert_eq!(calls[2].0.scale, Some(BUTTON_HIDDEN_SCALE));
    }

    #[test]
    fn progress_is_a_percentage_of_scrollable_range() {
        let (tweener, animator) = animator(15);
        animator.on_scroll(0, 0);
        animator.on_scroll(30, 60);
        animator.on_scroll(30, 60);
        animator.on_scroll(60, 60);

        let widths: Vec<f32> = tweener
            .calls_for(Target::ScrollProgress)
            .iter()
            .filter_map(|(props, _)| props.width)
            .collect();
        assert_eq!(widths, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn entrance_is_staggered_per_card() {
        let (tweener, animator) = animator(15);
        animator.entrance(3);

        let delays: Vec<u64> = (0..3)
            .map(|i| {
                let calls = tweener.calls_for(Target::Card(i));
                assert_eq!(calls.len(), 2);
                assert_eq!(calls[0].0.opacity, Some(0.0));
                assert_eq!(calls[1].0.opacity, Some(1.0));
                calls[1].1.delay.as_millis() as u64
            })
            .collect();
        assert_eq!(delays, vec![0, ENTRANCE_STAGGER_MS, 2 * ENTRANCE_STAGGER_MS]);
    }

    #[test]
    fn hover_scales_up_and_back() {
        let (tweener, animator) = animator(15);
        animator.hover_enter(4);
        animator.hover_leave(4);
        let scales: Vec<_> = tweener
            .calls_for(Target::Card(4))
            .iter()
            .map(|(props, _)| props.scale)
            .collect();
        assert_eq!(scales, vec![Some(HOVER_SCALE), Some(1.0)]);
    }

    #[test]
    fn failure_shakes_search_bar_back_to_rest() {
        let engine = Arc::new(TweenEngine::new());
        let animator = FeedbackAnimator::new(engine.clone(), 15);
        animator.failure();

        let settled = engine.sample_at(Target::SearchBar, Duration::from_secs(5));
        assert_eq!(settled, Sample::default());
        assert!(engine.is_animating());
    }

    #[test]
    fn failure_records_one_shake() {
        let (tweener, animator) = animator(15);
        animator.failure();
        assert_eq!(tweener.shakes(), 1);
    }

    #[test]
    fn logo_draws_from_nothing() {
        let (tweener, animator) = animator(15);
        animator.draw_logo();
        let reveals: Vec<_> = tweener
            .calls_for(Target::Logo)
            .iter()
            .map(|(props, _)| props.reveal)
            .collect();
        assert_eq!(reveals, vec![Some(0.0), Some(1.0)]);
    }
}
