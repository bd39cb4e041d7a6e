// Character animation playback
//
// Plays the looping clip for the current AnimationMode and the one-shot jump
// clip whose completion feeds back into the state machine.

use std::collections::HashMap;

use log::warn;

use super::context::AnimationMode;

/// Name of the one-shot clip started by `Effect::TriggerJumpAnimation`
pub const JUMP_CLIP: &str = "jump";

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "walking", "jump")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for a character
#[derive(Debug)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Mode last requested by the state machine
    mode: AnimationMode,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// The jump clip is overriding the mode clip
    jump_in_progress: bool,
    /// A jump was triggered with no clip to play; report it on next update
    jump_finish_pending: bool,
    /// Whether the sprite should be flipped horizontally
    flip_horizontal: bool,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self {
            animations: HashMap::new(),
            mode: AnimationMode::Idle,
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            jump_in_progress: false,
            jump_finish_pending: false,
            flip_horizontal: false,
        }
    }

    /// Create an animation player with the locomotion clips
    pub fn with_standard_animations() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping(AnimationMode::Idle.name(), 8, 10.0));
        player.add_animation(AnimationClip::looping(AnimationMode::Walking.name(), 8, 12.0));
        player.add_animation(AnimationClip::looping(AnimationMode::Ascend.name(), 4, 10.0));
        player.add_animation(AnimationClip::looping(AnimationMode::Fall.name(), 4, 10.0));
        // Takeoff: 6 frames at 12 FPS, half a second of ascent
        player.add_animation(AnimationClip::one_shot(JUMP_CLIP, 6, 12.0));

        player.apply_mode(AnimationMode::Idle);

        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Switch to the looping clip for `mode`
    ///
    /// A running jump clip is not interrupted; the mode clip starts when it ends.
    pub fn apply_mode(&mut self, mode: AnimationMode) {
        self.mode = mode;
        if !self.jump_in_progress {
            self.play(mode.name());
        }
    }

    /// Start the one-shot jump clip from its first frame
    pub fn trigger_jump(&mut self) {
        if !self.animations.contains_key(JUMP_CLIP) {
            warn!("No '{}' clip registered, jump animation skipped", JUMP_CLIP);
            self.jump_finish_pending = true;
            return;
        }
        self.jump_in_progress = true;
        self.play_from_start(JUMP_CLIP);
    }

    /// Play an animation by name
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance playback by `dt` seconds
    ///
    /// Returns `true` on the update in which the jump clip completes, and
    /// only then. A jump triggered without a registered clip completes on
    /// the next update.
    pub fn update(&mut self, dt: f32) -> bool {
        if std::mem::take(&mut self.jump_finish_pending) {
            return true;
        }

        if !self.playing {
            return false;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return false;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }

        if self.jump_in_progress && !self.playing {
            self.jump_in_progress = false;
            self.play_from_start(self.mode.name());
            return true;
        }

        false
    }

    /// Mode last requested by the state machine
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Whether the jump clip is still running
    pub fn is_jump_in_progress(&self) -> bool {
        self.jump_in_progress
    }
}
