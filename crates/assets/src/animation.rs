/// One animation clip from the model file: just enough to drive playback.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Seconds, from the latest keyframe across all channels.
    pub duration: f32,
}

/// A looping playback position over a model's clips.
///
/// Unlike walker integration, playback advances by wall-clock delta so
/// clip speed does not depend on the display refresh rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playhead {
    time: f32,
    duration: f32,
}

impl Playhead {
    /// A playhead over the longest clip, or `None` if there is nothing
    /// worth advancing.
    pub fn for_clips(clips: &[AnimationClip]) -> Option<Self> {
        let duration = clips.iter().map(|c| c.duration).fold(0.0_f32, f32::max);
        (duration > 0.0).then_some(Self {
            time: 0.0,
            duration,
        })
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Advance by `dt` seconds, wrapping at the clip boundary.
    pub fn advance(&mut self, dt: f32) {
        self.time = (self.time + dt) % self.duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str, duration: f32) -> AnimationClip {
        AnimationClip {
            name: name.into(),
            duration,
        }
    }

    #[test]
    fn no_clips_no_playhead() {
        assert!(Playhead::for_clips(&[]).is_none());
        assert!(Playhead::for_clips(&[clip("static", 0.0)]).is_none());
    }

    #[test]
    fn playhead_spans_the_longest_clip() {
        let p = Playhead::for_clips(&[clip("walk", 1.2), clip("idle", 3.5)]).unwrap();
        assert_eq!(p.duration(), 3.5);
        assert_eq!(p.time(), 0.0);
    }

    #[test]
    fn advance_accumulates() {
        let mut p = Playhead::for_clips(&[clip("walk", 2.0)]).unwrap();
        p.advance(0.5);
        p.advance(0.25);
        assert!((p.time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn advance_wraps_at_the_clip_boundary() {
        let mut p = Playhead::for_clips(&[clip("walk", 2.0)]).unwrap();
        p.advance(1.5);
        p.advance(1.0);
        assert!((p.time() - 0.5).abs() < 1e-6);
        assert!(p.time() < p.duration());
    }
}
