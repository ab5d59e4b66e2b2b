//! Backdrop moods cycled by the `mood` command.

/// A named backdrop preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    /// Name shown to the user.
    pub label: &'static str,
    /// Image the preset points at.
    pub url: &'static str,
}

/// Presets in cycling order; the first is active at startup.
pub const MOODS: [Mood; 4] = [
    Mood {
        label: "Space Station",
        url: "https://via.tt.se/data/images/00037/2a1c7bfb-56a9-4fd1-b06a-205833975e49.jpg",
    },
    Mood {
        label: "Nebula",
        url: "https://m.media-amazon.com/images/I/71Z1DAFYA4L.jpg",
    },
    Mood {
        label: "Galactic",
        url: "https://images6.alphacoders.com/552/thumb-1920-552086.jpg",
    },
    Mood {
        label: "Aurora",
        url: "https://images.pexels.com/photos/597909/pexels-photo-597909.jpeg",
    },
];

/// Index cycler over [`MOODS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Backdrop {
    index: usize,
}

impl Backdrop {
    /// The active mood.
    #[must_use]
    pub fn current(&self) -> Mood {
        MOODS[self.index]
    }

    /// Moves to the next mood, wrapping after the last.
    pub fn advance(&mut self) -> Mood {
        self.index = (self.index + 1) % MOODS.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_mood() {
        assert_eq!(Backdrop::default().current().label, "Space Station");
    }

    #[test]
    fn test_advance_wraps_modulo_len() {
        let mut backdrop = Backdrop::default();
        let labels: Vec<&str> = (0..5).map(|_| backdrop.advance().label).collect();
        assert_eq!(
            labels,
            vec!["Nebula", "Galactic", "Aurora", "Space Station", "Nebula"]
        );
    }
}
