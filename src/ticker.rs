use crate::constants::*;

pub const CITY_CAPTIONS: [&str; 3] = ["LOS ANGELES", "NEW YORK CITY", "MEXICO CITY"];

/// Split-flap caption that flips to the next phrase on a fixed period.
pub struct CaptionCycle {
    phrases: Vec<String>,
    initial: String,
    index: Option<usize>,
    interval: f32,
    timer: f32,
}

impl CaptionCycle {
    /// `initial` is shown until the first flip, which lands on phrase 0.
    pub fn new(phrases: Vec<String>, initial: &str, interval: f32) -> Self {
        Self {
            phrases,
            initial: initial.to_string(),
            index: None,
            interval,
            timer: 0.0,
        }
    }

    pub fn cities() -> Self {
        Self::new(
            CITY_CAPTIONS.iter().map(|s| s.to_string()).collect(),
            "MEXICO CITY",
            CAPTION_INTERVAL,
        )
    }

    pub fn current(&self) -> &str {
        match self.index {
            Some(i) => &self.phrases[i],
            None => &self.initial,
        }
    }

    /// Returns true when the caption changed during this update.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.phrases.is_empty() || self.interval <= 0.0 {
            return false;
        }
        self.timer += dt;
        let mut flipped = false;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            self.index = Some(match self.index {
                Some(i) if i + 1 < self.phrases.len() => i + 1,
                _ => 0,
            });
            flipped = true;
        }
        flipped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTheme {
    Light, // Over the hero section
    Dark,  // Past the threshold
}

/// Nav colour switch driven by the scroll offset.
pub struct ScrollNav {
    threshold: f32,
    theme: NavTheme,
}

impl ScrollNav {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            theme: NavTheme::Light,
        }
    }

    pub fn theme(&self) -> NavTheme {
        self.theme
    }

    /// Reports the new theme only when the offset crosses the threshold.
    pub fn update(&mut self, scroll_y: f32) -> Option<NavTheme> {
        let theme = if scroll_y > self.threshold {
            NavTheme::Dark
        } else {
            NavTheme::Light
        };
        if theme == self.theme {
            return None;
        }
        self.theme = theme;
        Some(theme)
    }
}

impl Default for ScrollNav {
    fn default() -> Self {
        Self::new(NAV_SCROLL_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_shows_initial_text_until_first_flip() {
        let mut caption = CaptionCycle::cities();
        assert_eq!(caption.current(), "MEXICO CITY");
        assert!(!caption.update(7.9));
        assert!(caption.update(0.2));
        assert_eq!(caption.current(), "LOS ANGELES");
    }

    #[test]
    fn caption_wraps_around() {
        let mut caption = CaptionCycle::cities();
        let seen: Vec<String> = (0..4)
            .map(|_| {
                caption.update(CAPTION_INTERVAL);
                caption.current().to_string()
            })
            .collect();
        assert_eq!(seen, ["LOS ANGELES", "NEW YORK CITY", "MEXICO CITY", "LOS ANGELES"]);
    }

    #[test]
    fn long_frame_flips_several_times() {
        let mut caption = CaptionCycle::cities();
        assert!(caption.update(CAPTION_INTERVAL * 2.5));
        assert_eq!(caption.current(), "NEW YORK CITY");
    }

    #[test]
    fn empty_caption_never_flips() {
        let mut caption = CaptionCycle::new(Vec::new(), "", 1.0);
        assert!(!caption.update(10.0));
        assert_eq!(caption.current(), "");
    }

    #[test]
    fn nav_reports_only_transitions() {
        let mut nav = ScrollNav::new(100.0);
        assert_eq!(nav.update(50.0), None);
        assert_eq!(nav.update(150.0), Some(NavTheme::Dark));
        assert_eq!(nav.update(400.0), None);
        assert_eq!(nav.update(100.0), Some(NavTheme::Light));
        assert_eq!(nav.theme(), NavTheme::Light);
    }
}
