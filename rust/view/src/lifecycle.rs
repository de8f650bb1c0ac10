// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconstruction lifecycle: generation tokens and the animation loop.
//!
//! Every reconstruction (new plan, new geometry, mode switch) gets a
//! monotonically increasing generation. In-flight fetches are not aborted
//! at the network layer; their completion callbacks carry the generation
//! as an explicit parameter and become no-ops once a newer reconstruction
//! has started.

/// Marker for one reconstruction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Issues and validates generation tokens
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new reconstruction cycle, superseding all earlier ones
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    /// Supersede every outstanding token without starting a new cycle
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}

/// Whether a completion callback took effect or arrived stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    Superseded,
}

impl Applied {
    pub fn is_applied(&self) -> bool {
        matches!(self, Applied::Applied)
    }
}

/// The frame-driven render loop, modeled as a run flag the host's
/// animation-frame callback checks
#[derive(Debug, Default)]
pub struct AnimationLoop {
    running: bool,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Idempotent
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_supersede() {
        let mut counter = GenerationCounter::new();
        let first = counter.begin();
        assert!(counter.is_current(first));

        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn test_invalidate_supersedes_without_new_cycle() {
        let mut counter = GenerationCounter::new();
        let token = counter.begin();
        counter.invalidate();
        assert!(!counter.is_current(token));
    }

    #[test]
    fn test_animation_loop_idempotent() {
        let mut animation = AnimationLoop::new();
        assert!(!animation.is_running());
        animation.start();
        animation.start();
        assert!(animation.is_running());
        animation.stop();
        animation.stop();
        assert!(!animation.is_running());
    }
}
