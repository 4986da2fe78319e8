use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

const fn quote(text: &'static str, author: &'static str) -> Quote {
    Quote { text, author }
}

pub const QUOTES: &[Quote] = &[
    quote("The secret of getting ahead is getting started.", "Mark Twain"),
    quote("It always seems impossible until it's done.", "Nelson Mandela"),
    quote("Well begun is half done.", "Aristotle"),
    quote("Simplicity is prerequisite for reliability.", "Edsger W. Dijkstra"),
    quote("Make it work, make it right, make it fast.", "Kent Beck"),
    quote("Nothing will work unless you do.", "Maya Angelou"),
    quote("Action is the foundational key to all success.", "Pablo Picasso"),
    quote("Energy and persistence conquer all things.", "Benjamin Franklin"),
    quote("Quality is not an act, it is a habit.", "Aristotle"),
    quote("Talk is cheap. Show me the code.", "Linus Torvalds"),
    quote("Focus on being productive instead of busy.", "Tim Ferriss"),
    quote("You can't use up creativity. The more you use, the more you have.", "Maya Angelou"),
    quote("Do the hard jobs first. The easy jobs will take care of themselves.", "Dale Carnegie"),
    quote("First, solve the problem. Then, write the code.", "John Johnson"),
    quote("The way to get started is to quit talking and begin doing.", "Walt Disney"),
    quote("Small deeds done are better than great deeds planned.", "Peter Marshall"),
];

/// Which quote is on screen, and whether it is pinned across restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteBoard {
    index: usize,
    pinned: bool,
}

impl QuoteBoard {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            index: rng.gen_range(0..QUOTES.len()),
            pinned: false,
        }
    }

    /// State after loading: a pinned quote stays, otherwise a fresh one is drawn
    pub fn restore<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if self.pinned {
            Self {
                index: self.index % QUOTES.len(),
                pinned: true,
            }
        } else {
            Self::random(rng)
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn current(&self) -> &'static Quote {
        &QUOTES[self.index % QUOTES.len()]
    }

    /// Draw a different quote; a pinned quote never changes
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.pinned || QUOTES.len() < 2 {
            return false;
        }
        let current = self.index % QUOTES.len();
        let draw = rng.gen_range(0..QUOTES.len() - 1);
        self.index = if draw >= current { draw + 1 } else { draw };
        true
    }

    pub fn next(&mut self) {
        self.index = (self.index % QUOTES.len() + 1) % QUOTES.len();
    }

    pub fn previous(&mut self) {
        let current = self.index % QUOTES.len();
        self.index = if current == 0 { QUOTES.len() - 1 } else { current - 1 };
    }

    pub fn toggle_pin(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }
}
