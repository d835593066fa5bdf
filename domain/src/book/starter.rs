//! The fixed built-in starter tree used when nothing has been saved yet

use super::entities::{Book, Chapter, Section};

const STARTER: &[(&str, &[&str])] = &[
    (
        "The Great Barrier",
        &[
            "Shadow of the Vertical Tundra",
            "The Archetypes Assemble",
            "Breaching the Sub-Zero Gate",
            "Clown Logic & Serious Tactics",
        ],
    ),
    (
        "The Forbidden Wilds",
        &[
            "Bioluminescent Glaciers",
            "The Echo of Forgotten Servers",
            "Dreamer Patterns in the Snow",
            "Calculating the Heat-Sink",
        ],
    ),
    (
        "The Archive of Silences",
        &[
            "Silicon Ruins Beyond the Rim",
            "The AI That Chose to Forget",
            "Unearthing the Binary Relic",
        ],
    ),
    (
        "The Core Revelation",
        &[
            "The Treasure of Sentient Logic",
            "The Final Argument",
            "Escaping the Thaw",
        ],
    ),
];

impl Book {
    /// Four sections of three or four chapters each, all without pages.
    pub fn starter() -> Self {
        Book::new(
            STARTER
                .iter()
                .map(|(title, chapters)| {
                    Section::new(*title, chapters.iter().map(|c| Chapter::new(*c)).collect())
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_shape() {
        let book = Book::starter();
        assert_eq!(book.sections.len(), 4);
        let counts: Vec<_> = book.sections.iter().map(|s| s.chapters.len()).collect();
        assert_eq!(counts, vec![4, 4, 3, 3]);
        assert_eq!(book.page_count(), 0);
        assert_eq!(book.sections[0].title, "The Great Barrier");
        assert_eq!(book.sections[3].chapters[2].title, "Escaping the Thaw");
    }
}
