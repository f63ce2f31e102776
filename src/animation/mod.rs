//! Animation module - tweening interface and the feedback cues built on it
//!
//! - `engine`: time-based tween engine sampled by the view every frame
//! - `feedback`: scroll, entrance, hover, shake and logo cues
//!
//! The search flow only ever sees the [`Tweener`] trait, so it can run
//! without a terminal.

mod engine;
mod feedback;

use std::time::Duration;

pub use engine::{Sample, TweenEngine};
pub use feedback::FeedbackAnimator;

/// Something on screen that can be animated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    SearchBar,
    Card(usize),
    BackToTop,
    ScrollProgress,
    Logo,
}

/// A single animatable channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    OffsetX,
    OffsetY,
    Scale,
    /// Fraction of a stroke that is drawn, 0 hidden to 1 complete
    Reveal,
    /// Highlight intensity, used for the color pulse
    Glow,
    /// Percentage width of a bar
    Width,
}

impl Property {
    pub fn rest_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::Reveal => 1.0,
            Property::OffsetX | Property::OffsetY | Property::Glow | Property::Width => 0.0,
        }
    }
}

/// End values for an animation; unset fields are left alone
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Properties {
    pub opacity: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub scale: Option<f32>,
    pub reveal: Option<f32>,
    pub glow: Option<f32>,
    pub width: Option<f32>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn offset_x(mut self, value: f32) -> Self {
        self.offset_x = Some(value);
        self
    }

    pub fn offset_y(mut self, value: f32) -> Self {
        self.offset_y = Some(value);
        self
    }

    pub fn scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn reveal(mut self, value: f32) -> Self {
        self.reveal = Some(value);
        self
    }

    pub fn glow(mut self, value: f32) -> Self {
        self.glow = Some(value);
        self
    }

    pub fn width(mut self, value: f32) -> Self {
        self.width = Some(value);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::Opacity => self.opacity,
            Property::OffsetX => self.offset_x,
            Property::OffsetY => self.offset_y,
            Property::Scale => self.scale,
            Property::Reveal => self.reveal,
            Property::Glow => self.glow,
            Property::Width => self.width,
        }
    }

    /// The channels this animation touches, with their end values
    pub fn entries(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        [
            Property::Opacity,
            Property::OffsetX,
            Property::OffsetY,
            Property::Scale,
            Property::Reveal,
            Property::Glow,
            Property::Width,
        ]
        .into_iter()
        .filter_map(|property| self.get(property).map(|value| (property, value)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    QuadOut,
    CubicOut,
    SineInOut,
    /// Overshoots slightly before settling
    BackOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

/// When and how an animation runs
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timing {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
    /// Extra plays after the first one
    pub repeat: u32,
    /// Alternate direction on every repeat
    pub yoyo: bool,
}

impl Timing {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    /// Jump straight to the end values
    pub fn instant() -> Self {
        Self::default()
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, repeat: u32, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    /// Delay plus every play
    pub fn total(&self) -> Duration {
        self.delay + self.duration * (self.repeat + 1)
    }
}

/// Fire-and-forget animation capability
pub trait Tweener: Send + Sync {
    fn animate(&self, target: Target, to: Properties, timing: Timing);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every animation request instead of running it
    #[derive(Default)]
    pub struct RecordingTweener {
        calls: Mutex<Vec<(Target, Properties, Timing)>>,
    }

    impl RecordingTweener {
        pub fn calls(&self) -> Vec<(Target, Properties, Timing)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_for(&self, target: Target) -> Vec<(Properties, Timing)> {
            self.calls()
                .into_iter()
                .filter(|(t, _, _)| *t == target)
                .map(|(_, props, timing)| (props, timing))
                .collect()
        }

        /// Number of shake timelines started on the search bar
        pub fn shakes(&self) -> usize {
            self.calls_for(Target::SearchBar)
                .iter()
                .filter(|(props, timing)| props.offset_x.is_some() && timing.repeat > 0)
                .count()
        }
    }

    impl Tweener for RecordingTweener {
        fn animate(&self, target: Target, to: Properties, timing: Timing) {
            self.calls.lock().unwrap().push((target, to, timing));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_start_at_zero_and_end_at_one() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::CubicOut, Easing::SineInOut, Easing::BackOut] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{:?}", easing);
        }
        assert!(Easing::BackOut.apply(0.7) > 1.0);
    }

    #[test]
    fn entries_only_lists_set_fields() {
        let props = Properties::new().opacity(0.0).scale(1.05);
        let entries: Vec<_> = props.entries().collect();
        assert_eq!(entries, vec![(Property::Opacity, 0.0), (Property::Scale, 1.05)]);
    }

    #[test]
    fn total_covers_delay_and_repeats() {
        let timing = Timing::millis(100).delay(Duration::from_millis(50)).repeat(3, true);
        assert_eq!(timing.total(), Duration::from_millis(450));
        assert_eq!(Timing::instant().total(), Duration::ZERO);
    }
}
