//! Time-based tween engine
//!
//! Every `(target, property)` pair is a channel holding a settled value and
//! the tweens scheduled on it, ordered by start time. A tween starts from
//! whatever value its channel has when it begins, and overrides any tween
//! still running on the same channel.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{Easing, Properties, Property, Target, Timing, Tweener};

/// Current visual state of one target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub reveal: f32,
    pub glow: f32,
    pub width: f32,
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            opacity: Property::Opacity.rest_value(),
            offset_x: Property::OffsetX.rest_value(),
            offset_y: Property::OffsetY.rest_value(),
            scale: Property::Scale.rest_value(),
            reveal: Property::Reveal.rest_value(),
            glow: Property::Glow.rest_value(),
            width: Property::Width.rest_value(),
        }
    }
}

impl Sample {
    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::OffsetX => self.offset_x = value,
            Property::OffsetY => self.offset_y = value,
            Property::Scale => self.scale = value,
            Property::Reveal => self.reveal = value,
            Property::Glow => self.glow = value,
            Property::Width => self.width = value,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    start: Duration,
    duration: Duration,
    to: f32,
    easing: Easing,
    repeat: u32,
    yoyo: bool,
}

impl Tween {
    fn end(&self) -> Duration {
        self.start + self.duration * (self.repeat + 1)
    }

    fn value_at(&self, from: f32, at: Duration) -> f32 {
        if at < self.start {
            return from;
        }
        if self.duration.is_zero() {
            return self.to;
        }
        if at >= self.end() {
            let ends_reversed = self.yoyo && self.repeat % 2 == 1;
            return if ends_reversed { from } else { self.to };
        }

        let elapsed = (at - self.start).as_secs_f32();
        let length = self.duration.as_secs_f32();
        let iteration = (elapsed / length).floor();
        let mut progress = (elapsed - iteration * length) / length;
        if self.yoyo && iteration as u32 % 2 == 1 {
            progress = 1.0 - progress;
        }
        from + (self.to - from) * self.easing.apply(progress)
    }
}

#[derive(Clone, Debug)]
struct Channel {
    settled: f32,
    tweens: Vec<Tween>,
}

impl Channel {
    fn new(rest: f32) -> Self {
        Self {
            settled: rest,
            tweens: Vec::new(),
        }
    }

    fn insert(&mut self, tween: Tween) {
        // Equal start times keep call order, so the later call wins
        let position = self.tweens.partition_point(|t| t.start <= tween.start);
        self.tweens.insert(position, tween);
    }

    fn value_at(&self, at: Duration) -> f32 {
        let mut from = self.settled;
        for (i, tween) in self.tweens.iter().enumerate() {
            if tween.start > at {
                break;
            }
            match self.tweens.get(i + 1) {
                Some(next) if next.start <= at => from = tween.value_at(from, next.start),
                _ => return tween.value_at(from, at),
            }
        }
        from
    }

    /// Fold tweens that can no longer affect the output into `settled`
    fn prune(&mut self, at: Duration) {
        while let Some(first) = self.tweens.first().copied() {
            let superseded_at = self.tweens.get(1).map(|next| next.start).filter(|start| *start <= at);
            match superseded_at {
                Some(start) => self.settled = first.value_at(self.settled, start),
                None if first.end() <= at => self.settled = first.value_at(self.settled, at),
                None => break,
            }
            self.tweens.remove(0);
        }
    }

    fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }
}

/// Tween engine driven by the wall clock
pub struct TweenEngine {
    epoch: Instant,
    channels: Mutex<HashMap<(Target, Property), Channel>>,
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenEngine {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            channels: Mutex::new(HashMap::new()),
        }
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn sample(&self, target: Target) -> Sample {
        self.sample_at(target, self.now())
    }

    pub fn sample_at(&self, target: Target, at: Duration) -> Sample {
        let mut sample = Sample::default();
        let Ok(channels) = self.channels.lock() else {
            return sample;
        };
        for ((channel_target, property), channel) in channels.iter() {
            if *channel_target == target {
                sample.set(*property, channel.value_at(at));
            }
        }
        sample
    }

    pub fn animate_at(&self, target: Target, to: Properties, timing: Timing, at: Duration) {
        let Ok(mut channels) = self.channels.lock() else {
            return;
        };
        for (property, value) in to.entries() {
            channels
                .entry((target, property))
                .or_insert_with(|| Channel::new(property.rest_value()))
                .insert(Tween {
                    start: at + timing.delay,
                    duration: timing.duration,
                    to: value,
                    easing: timing.easing,
                    repeat: timing.repeat,
                    yoyo: timing.yoyo,
                });
        }
        tracing::trace!(?target, total_ms = timing.total().as_millis() as u64, "Tween scheduled");
    }

    /// Drop finished tweens and channels that are back at rest
    pub fn prune(&self) {
        self.prune_at(self.now());
    }

    pub fn prune_at(&self, at: Duration) {
        let Ok(mut channels) = self.channels.lock() else {
            return;
        };
        channels.retain(|(_, property), channel| {
            channel.prune(at);
            !(channel.is_idle() && channel.settled == property.rest_value())
        });
    }

    /// Whether anything is still moving
    pub fn is_animating(&self) -> bool {
        let at = self.now();
        self.channels
            .lock()
            .map(|channels| channels.values().any(|c| c.tweens.iter().any(|t| t.end() > at)))
            .unwrap_or(false)
    }

    #[cfg(test)]
    fn channel_count(&self) -> usize {
        self.channels.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl Tweener for TweenEngine {
    fn animate(&self, target: Target, to: Properties, timing: Timing) {
        self.animate_at(target, to, timing, self.now());
    }
}
