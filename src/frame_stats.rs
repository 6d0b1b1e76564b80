// src/frame_stats.rs
use instant::Instant;

/// Frames-per-second counter, refreshed once per elapsed second.
#[derive(Debug)]
pub struct FrameStats {
    window_start: Instant,
    frames_in_window: u32,
    current_fps: u32,
    total_frames: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            frames_in_window: 0,
            current_fps: 0,
            total_frames: 0,
        }
    }

    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    /// Counts one frame. Returns the fresh FPS figure when a second has passed.
    pub fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.frames_in_window += 1;
        self.total_frames += 1;

        let elapsed = (now - self.window_start).as_secs_f32();
        if elapsed >= 1.0 {
            self.current_fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = now;
            return Some(self.current_fps);
        }
        None
    }

    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn reports_once_per_second() {
        let start = Instant::now();
        let mut stats = FrameStats::starting_at(start);

        for i in 1..60u64 {
            assert_eq!(stats.tick_at(start + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(stats.tick_at(start + Duration::from_millis(1000)), Some(60));
        assert_eq!(stats.current_fps(), 60);

        assert_eq!(stats.tick_at(start + Duration::from_millis(1500)), None);
        assert_eq!(stats.tick_at(start + Duration::from_millis(2000)), Some(2));
        assert_eq!(stats.total_frames(), 62);
    }
}
