// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene.
//!
//! A [`Scene`] stores the *target* state of every mark plus the payload currently shown for it.
//! Updates are either immediate ([`Scene::tick`], [`Scene::patch`]) or animated
//! ([`Scene::animate`], [`Scene::replace_layer`] with a [`Transition`]). Animated marks are
//! stepped by [`Scene::advance`]. Every mutation returns the [`MarkDiff`]s a surface needs to
//! mirror the scene.
//!
//! Starting a transition on a mark that is already animating restarts from its currently shown
//! payload, so rapid successive updates are last-write-wins without visual jumps.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Point;

use crate::diff::MarkDiff;
use crate::mark::{Layer, Mark, MarkId, MarkPayload};
use crate::transition::Transition;

#[derive(Clone, Debug)]
struct Tween {
    from: MarkPayload,
    start_ms: f64,
    transition: Transition,
}

#[derive(Clone, Debug)]
struct Entry {
    target: Mark,
    shown: MarkPayload,
    tween: Option<Tween>,
}

impl Entry {
    fn payload_at(&self, now_ms: f64) -> MarkPayload {
        match &self.tween {
            Some(tw) => {
                let t = tw.transition.progress(tw.start_ms, now_ms);
                tw.from.interpolate(&self.target.payload, t)
            }
            None => self.target.payload.clone(),
        }
    }

    fn displayed(&self) -> Mark {
        Mark {
            payload: self.shown.clone(),
            ..self.target.clone()
        }
    }
}

/// A retained set of marks with diffing and transitions.
#[derive(Debug, Default)]
pub struct Scene {
    entries: HashMap<MarkId, Entry>,
    now_ms: f64,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the scene has no marks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the last clock value seen by [`Scene::advance`] or an animated update.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Returns whether any mark is still transitioning.
    pub fn is_animating(&self) -> bool {
        self.entries.values().any(|e| e.tween.is_some())
    }

    /// Returns the target (final) state of a mark.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.entries.get(&id).map(|e| &e.target)
    }

    /// Returns the payload currently shown for a mark (interpolated while animating).
    pub fn shown(&self, id: MarkId) -> Option<&MarkPayload> {
        self.entries.get(&id).map(|e| &e.shown)
    }

    /// Returns the ids of all marks in `layer`, sorted.
    pub fn ids_in_layer(&self, layer: Layer) -> Vec<MarkId> {
        let mut ids: Vec<MarkId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| id.layer() == layer)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Removes every mark.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        let mut ids: Vec<MarkId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Replaces the whole scene with `marks`, immediately.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let marks: Vec<Mark> = marks.into_iter().collect();
        let keep: HashSet<MarkId> = marks.iter().map(|m| m.id).collect();
        let mut stale: Vec<MarkId> = self
            .entries
            .keys()
            .copied()
            .filter(|id| !keep.contains(id))
            .collect();
        stale.sort_unstable();

        let mut out: Vec<MarkDiff> = stale.into_iter().filter_map(|id| self.remove(id)).collect();
        for mark in marks {
            out.extend(self.set_immediate(mark));
        }
        out
    }

    /// Inserts or replaces the given marks immediately, leaving all other marks untouched.
    pub fn patch(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        marks
            .into_iter()
            .filter_map(|mark| self.set_immediate(mark))
            .collect()
    }

    /// Moves the given marks towards new targets over `transition`, starting at `now_ms`.
    ///
    /// Marks that do not exist yet enter immediately at their target. All other marks are
    /// untouched.
    pub fn animate(
        &mut self,
        marks: impl IntoIterator<Item = Mark>,
        transition: Transition,
        now_ms: f64,
    ) -> Vec<MarkDiff> {
        self.now_ms = self.now_ms.max(now_ms);
        marks
            .into_iter()
            .filter_map(|mark| self.set_animated(mark, transition, now_ms))
            .collect()
    }

    /// Replaces every mark of `layer` with `marks`.
    ///
    /// Marks of the layer that are not in `marks` exit; the rest enter or update, animated when
    /// a transition is given.
    pub fn replace_layer(
        &mut self,
        layer: Layer,
        marks: impl IntoIterator<Item = Mark>,
        transition: Option<Transition>,
        now_ms: f64,
    ) -> Vec<MarkDiff> {
        let marks: Vec<Mark> = marks.into_iter().collect();
        debug_assert!(
            marks.iter().all(|m| m.id.layer() == layer),
            "replace_layer given a mark from another layer"
        );
        let keep: HashSet<MarkId> = marks.iter().map(|m| m.id).collect();
        let mut out: Vec<MarkDiff> = self
            .ids_in_layer(layer)
            .into_iter()
            .filter(|id| !keep.contains(id))
            .filter_map(|id| self.remove(id))
            .collect();
        match transition {
            Some(tr) => out.extend(self.animate(marks, tr, now_ms)),
            None => out.extend(self.patch(marks)),
        }
        out
    }

    /// Steps running transitions to `now_ms`.
    ///
    /// Emits one `Update` per animating mark; marks whose transition has finished are snapped
    /// to their target and stop animating.
    pub fn advance(&mut self, now_ms: f64) -> Vec<MarkDiff> {
        self.now_ms = self.now_ms.max(now_ms);
        let mut ids: Vec<MarkId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.tween.is_some())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            let old_bounds = entry.shown.bounds();
            let done = entry
                .tween
                .as_ref()
                .is_some_and(|tw| tw.transition.is_complete(tw.start_ms, now_ms));
            if done {
                entry.tween = None;
                entry.shown = entry.target.payload.clone();
            } else {
                entry.shown = entry.payload_at(now_ms);
            }
            out.push(MarkDiff::Update {
                id,
                kind: entry.target.kind(),
                old_bounds,
                new_bounds: entry.shown.bounds(),
                new: Box::new(entry.displayed()),
            });
        }
        out
    }

    /// Returns the topmost mark whose shown payload contains `pt` and that passes `filter`.
    pub fn hit_test(&self, pt: Point, filter: impl Fn(&Mark) -> bool) -> Option<MarkId> {
        self.entries
            .iter()
            .filter(|(_, e)| filter(&e.target) && e.shown.contains(pt))
            .max_by_key(|(id, e)| (e.target.z_index, **id))
            .map(|(id, _)| *id)
    }

    fn remove(&mut self, id: MarkId) -> Option<MarkDiff> {
        let entry = self.entries.remove(&id)?;
        Some(MarkDiff::Exit {
            id,
            kind: entry.target.kind(),
            bounds: entry.shown.bounds(),
        })
    }

    fn set_immediate(&mut self, mark: Mark) -> Option<MarkDiff> {
        let id = mark.id;
        match self.entries.get_mut(&id) {
            Some(entry) => {
                if entry.tween.is_none() && entry.target == mark {
                    return None;
                }
                let old_bounds = entry.shown.bounds();
                entry.shown = mark.payload.clone();
                entry.target = mark;
                entry.tween = None;
                Some(MarkDiff::Update {
                    id,
                    kind: entry.target.kind(),
                    old_bounds,
                    new_bounds: entry.shown.bounds(),
                    new: Box::new(entry.displayed()),
                })
            }
            None => Some(self.insert(mark)),
        }
    }

    fn set_animated(
        &mut self,
        mark: Mark,
        transition: Transition,
        now_ms: f64,
    ) -> Option<MarkDiff> {
        let id = mark.id;
        let Some(entry) = self.entries.get_mut(&id) else {
            return Some(self.insert(mark));
        };
        if entry.target == mark {
            return None;
        }
        let from = entry.payload_at(now_ms);
        let old_bounds = entry.shown.bounds();
        entry.target = mark;
        entry.shown = from.clone();
        entry.tween = (from != entry.target.payload).then_some(Tween {
            from,
            start_ms: now_ms,
            transition,
        });
        Some(MarkDiff::Update {
            id,
            kind: entry.target.kind(),
            old_bounds,
            new_bounds: entry.shown.bounds(),
            new: Box::new(entry.displayed()),
        })
    }

    fn insert(&mut self, mark: Mark) -> MarkDiff {
        let diff = MarkDiff::Enter {
            id: mark.id,
            kind: mark.kind(),
            z_index: mark.z_index,
            bounds: mark.payload.bounds(),
            new: Box::new(mark.clone()),
        };
        self.entries.insert(
            mark.id,
            Entry {
                shown: mark.payload.clone(),
                target: mark,
                tween: None,
            },
        );
        diff
    }
}
