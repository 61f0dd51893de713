use std::fmt;
use std::str::FromStr;

use crate::error::ParseCategoryError;

/// The fixed set of quiz topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    GeneralHalloween,
    ClassicHorror,
    ModernHorror,
    UrbanLegends,
    MonstersAndCreatures,
    HauntedPlaces,
    WitchcraftAndFolklore,
    KidsFriendly,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::GeneralHalloween,
        Category::ClassicHorror,
        Category::ModernHorror,
        Category::UrbanLegends,
        Category::MonstersAndCreatures,
        Category::HauntedPlaces,
        Category::WitchcraftAndFolklore,
        Category::KidsFriendly,
    ];

    /// Name shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Category::GeneralHalloween => "General Halloween",
            Category::ClassicHorror => "Horror Movies (Classic)",
            Category::ModernHorror => "Horror Movies (Modern)",
            Category::UrbanLegends => "Urban Legends",
            Category::MonstersAndCreatures => "Monsters & Creatures",
            Category::HauntedPlaces => "Haunted Places",
            Category::WitchcraftAndFolklore => "Witchcraft & Folklore",
            Category::KidsFriendly => "Kids-Friendly Spooky",
        }
    }

    /// Short name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Category::GeneralHalloween => "general",
            Category::ClassicHorror => "classic-horror",
            Category::ModernHorror => "modern-horror",
            Category::UrbanLegends => "urban-legends",
            Category::MonstersAndCreatures => "monsters",
            Category::HauntedPlaces => "haunted-places",
            Category::WitchcraftAndFolklore => "witchcraft",
            Category::KidsFriendly => "kids",
        }
    }

    /// Topic phrase sent to the question service.
    pub fn topic(self) -> &'static str {
        match self {
            Category::GeneralHalloween => "Halloween trivia (symbols, customs, history)",
            Category::ClassicHorror => "Classic horror movie trivia (1930s-1990s)",
            Category::ModernHorror => "Modern horror movies (2000s-present) trivia",
            Category::UrbanLegends => "Urban legends and spooky myths",
            Category::MonstersAndCreatures => {
                "famous monsters, vampires, werewolves, zombies, ghosts"
            }
            Category::HauntedPlaces => "famous haunted houses and ghost stories",
            Category::WitchcraftAndFolklore => "witches, folklore, rituals (safe content)",
            Category::KidsFriendly => "kid-friendly spooky quiz with lighthearted tone",
        }
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0)
    }

    /// The following category, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The preceding category, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(wanted)
                    || category.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
