use std::{collections::HashMap, hash::Hash};

use crate::tween::{Pose, Tween};

/// Runs at most one [`Tween`] per target, against an externally supplied
/// clock in milliseconds.
///
/// Playing a tween on a target that already has one in flight replaces it.
/// The replaced tween's cues are never reported.
pub struct Timeline<Target, Cue> {
    poses: HashMap<Target, Pose>,
    playing: HashMap<Target, Playback<Cue>>,
}

struct Playback<Cue> {
    tween: Tween,
    cue: Option<Cue>,
    queued_at: f64,
    from: Option<Pose>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Progress<Cue> {
    Started(Cue),
    Completed(Cue),
}

/// What changed in a single [`Timeline::tick`].
pub struct Frame<Target, Cue> {
    pub poses: Vec<(Target, Pose)>,
    pub progress: Vec<Progress<Cue>>,
}

impl<Target, Cue> Default for Timeline<Target, Cue> {
    fn default() -> Self {
        Self {
            poses: HashMap::new(),
            playing: HashMap::new(),
        }
    }
}

impl<Target: Copy + Eq + Hash, Cue: Clone> Timeline<Target, Cue> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump straight to `pose`, killing any tween in flight on `target`.
    pub fn set(&mut self, target: Target, pose: &Pose) {
        self.playing.remove(&target);
        self.poses.entry(target).or_default().merge(pose);
    }

    pub fn play(&mut self, target: Target, tween: Tween, cue: Option<Cue>, now: f64) {
        self.playing.insert(
            target,
            Playback {
                tween,
                cue,
                queued_at: now,
                from: None,
            },
        );
    }

    pub fn pose(&self, target: Target) -> Option<&Pose> {
        self.poses.get(&target)
    }

    pub fn is_idle(&self) -> bool {
        self.playing.is_empty()
    }

    pub fn is_playing(&self, target: Target) -> bool {
        self.playing.contains_key(&target)
    }

    /// Advance every tween to `now`.
    ///
    /// A tween captures its starting pose when its delay elapses, not when
    /// it's queued.
    pub fn tick(&mut self, now: f64) -> Frame<Target, Cue> {
        let mut frame = Frame {
            poses: Vec::new(),
            progress: Vec::new(),
        };
        let mut finished = Vec::new();

        for (target, playback) in &mut self.playing {
            let elapsed = (now - playback.queued_at) / 1000.0 - playback.tween.delay_secs();

            if elapsed < 0.0 {
                continue;
            }

            let current = self.poses.entry(*target).or_default();
            let from = playback.from.get_or_insert_with(|| {
                if let Some(cue) = &playback.cue {
                    frame.progress.push(Progress::Started(cue.clone()));
                }

                current.clone()
            });

            let duration = playback.tween.duration_secs();
            let t = if duration > 0.0 {
                (elapsed / duration).min(1.0)
            } else {
                1.0
            };
            let pose = playback.tween.interpolate(from, t);
            current.merge(&pose);
            frame.poses.push((*target, pose));

            if t >= 1.0 {
                finished.push(*target);
            }
        }

        for target in finished {
            if let Some(Playback { cue: Some(cue), .. }) = self.playing.remove(&target) {
                frame.progress.push(Progress::Completed(cue));
            }
        }

        frame
    }
}
