//! Offline question bank.
//!
//! Used whenever live generation fails. The content is fixed and the
//! selection deterministic so a fallback game is reproducible.

use tracing::warn;

use crate::models::{Category, Question, QuestionCount, QuestionSet};

/// (prompt, options, correct index, explanation)
type Entry = (&'static str, [&'static str; 4], usize, &'static str);

const GENERIC: &[Entry] = &[
    (
        "Which creature transforms during a full moon?",
        ["Vampire", "Werewolf", "Zombie", "Banshee"],
        1,
        "Werewolves transform under a full moon.",
    ),
    (
        "Which vegetable was carved before pumpkins?",
        ["Turnip", "Potato", "Beetroot", "Cabbage"],
        0,
        "Turnips were early jack-o'-lanterns.",
    ),
    (
        "Which item repels vampires?",
        ["Garlic", "Salt", "Rosemary", "Peppermint"],
        0,
        "Garlic is known to repel vampires.",
    ),
    (
        "What date is Halloween?",
        ["Nov 1", "Oct 31", "Oct 30", "Nov 2"],
        1,
        "Halloween is on October 31.",
    ),
    (
        "What colour pairs with orange as the classic Halloween colour scheme?",
        ["Green", "Purple", "Black", "White"],
        2,
        "Orange and black echo autumn harvests and long dark nights.",
    ),
    (
        "Which animal is often seen as a witch's companion?",
        ["Black cat", "Goldfish", "Parrot", "Rabbit"],
        0,
        "Black cats were long believed to be witches' familiars.",
    ),
];

const GENERAL_HALLOWEEN: &[Entry] = &[
    (
        "Which ancient Celtic festival is Halloween largely rooted in?",
        ["Beltane", "Samhain", "Imbolc", "Lughnasadh"],
        1,
        "Samhain marked the end of harvest and the start of winter.",
    ),
    (
        "What does the phrase 'trick or treat' ask the householder to give?",
        ["A coin", "A candle", "A treat", "A song"],
        2,
        "Children threaten a playful trick unless given a treat.",
    ),
    (
        "The name 'Halloween' is a contraction of which phrase?",
        ["Hallowed Evening", "All Hallows' Eve", "Hollow Even", "Hall of Eve"],
        1,
        "It comes from All Hallows' Eve, the night before All Saints' Day.",
    ),
    (
        "Which legendary figure is said to wander with a lantern made from a turnip?",
        ["Stingy Jack", "Ichabod Crane", "Sleepy Tom", "Old Nick"],
        0,
        "The tale of Stingy Jack gave the jack-o'-lantern its name.",
    ),
    (
        "Which fruit is bobbed for in a traditional Halloween party game?",
        ["Pears", "Oranges", "Apples", "Plums"],
        2,
        "Apple bobbing dates back to old harvest festivals.",
    ),
];

const CLASSIC_HORROR: &[Entry] = &[
    (
        "Which actor played Count Dracula in the 1931 Universal film?",
        ["Boris Karloff", "Bela Lugosi", "Lon Chaney Jr.", "Vincent Price"],
        1,
        "Bela Lugosi's Dracula became the definitive screen vampire.",
    ),
    (
        "In 'Psycho' (1960), what is the name of the motel?",
        ["Overlook Motel", "Crystal Lake Inn", "Bates Motel", "Elm Street Lodge"],
        2,
        "Norman Bates runs the Bates Motel.",
    ),
    (
        "Which 1978 film introduced Michael Myers?",
        ["Halloween", "Friday the 13th", "The Fog", "Black Christmas"],
        0,
        "John Carpenter's Halloween introduced Michael Myers.",
    ),
    (
        "What hotel is the setting of 'The Shining' (1980)?",
        ["The Stanley", "The Overlook", "The Cecil", "The Grand Budapest"],
        1,
        "Jack Torrance becomes caretaker of the Overlook Hotel.",
    ),
    (
        "Who directed 'The Birds' (1963)?",
        ["Alfred Hitchcock", "Roger Corman", "William Castle", "George Romero"],
        0,
        "Hitchcock followed Psycho with The Birds.",
    ),
];

const MODERN_HORROR: &[Entry] = &[
    (
        "In 'A Quiet Place' (2018), what attracts the creatures?",
        ["Light", "Sound", "Heat", "Smell"],
        1,
        "The creatures hunt by sound, so the family lives in silence.",
    ),
    (
        "Which film features a killer who leaves puzzles and the phrase 'I want to play a game'?",
        ["Saw", "Scream", "Hostel", "The Purge"],
        0,
        "Jigsaw's traps define the Saw series.",
    ),
    (
        "Who directed 'Get Out' (2017)?",
        ["Ari Aster", "Jordan Peele", "James Wan", "Mike Flanagan"],
        1,
        "Get Out was Jordan Peele's directorial debut.",
    ),
    (
        "What is the name of the clown in the 2017 film 'It'?",
        ["Art", "Twisty", "Pennywise", "Captain Spaulding"],
        2,
        "Pennywise the Dancing Clown haunts the town of Derry.",
    ),
    (
        "In 'The Conjuring' universe, which cursed doll got her own film in 2014?",
        ["Chucky", "Annabelle", "Brahms", "Robert"],
        1,
        "Annabelle first appeared in The Conjuring before her spin-off.",
    ),
];

const URBAN_LEGENDS: &[Entry] = &[
    (
        "Which name is said three times into a mirror to summon a ghost?",
        ["Bloody Mary", "Candyman", "Slender Man", "La Llorona"],
        0,
        "The Bloody Mary legend is a classic sleepover dare.",
    ),
    (
        "In the 'hook man' legend, where is the hook found?",
        ["On a mailbox", "On a car door", "In a lake", "On a fence"],
        1,
        "The couple drives off and later finds the hook on the car door.",
    ),
    (
        "La Llorona, the Weeping Woman, is said to wander near what?",
        ["Mountains", "Deserts", "Rivers", "Graveyards"],
        2,
        "She searches the riverbanks for her lost children.",
    ),
    (
        "Which tall, faceless figure in a suit began as an internet legend in 2009?",
        ["The Rake", "Slender Man", "Jeff the Killer", "The Mothman"],
        1,
        "Slender Man was created on an online forum in 2009.",
    ),
    (
        "In which US state was the Mothman reportedly sighted in 1966?",
        ["Ohio", "West Virginia", "Kentucky", "Virginia"],
        1,
        "Sightings centred on Point Pleasant, West Virginia.",
    ),
];

const MONSTERS_AND_CREATURES: &[Entry] = &[
    (
        "Who wrote the novel 'Frankenstein'?",
        ["Bram Stoker", "Mary Shelley", "Edgar Allan Poe", "H. P. Lovecraft"],
        1,
        "Mary Shelley published Frankenstein in 1818.",
    ),
    (
        "What metal is traditionally deadly to werewolves?",
        ["Iron", "Gold", "Silver", "Copper"],
        2,
        "A silver bullet is the classic werewolf cure.",
    ),
    (
        "Which creature is a wailing spirit from Irish folklore?",
        ["Banshee", "Kelpie", "Wendigo", "Ghoul"],
        0,
        "A banshee's wail foretells a death in the family.",
    ),
    (
        "What do zombies famously crave in most films?",
        ["Blood", "Brains", "Bones", "Candy"],
        1,
        "Brains became the zombie staple in 1980s cinema.",
    ),
    (
        "Which monster is bound in bandages?",
        ["Mummy", "Ghoul", "Golem", "Wraith"],
        0,
        "Egyptian mummies were wrapped in linen bandages.",
    ),
];

const HAUNTED_PLACES: &[Entry] = &[
    (
        "Which London fortress is said to be haunted by Anne Boleyn?",
        ["Windsor Castle", "Tower of London", "Hampton Court", "Buckingham Palace"],
        1,
        "Anne Boleyn was executed at the Tower of London in 1536.",
    ),
    (
        "The Winchester Mystery House is in which US state?",
        ["California", "Texas", "Maine", "Louisiana"],
        0,
        "Sarah Winchester kept building the San Jose house for decades.",
    ),
    (
        "Which Transylvanian castle is linked with the Dracula legend?",
        ["Peles Castle", "Bran Castle", "Corvin Castle", "Bojnice Castle"],
        1,
        "Bran Castle is marketed as Dracula's Castle.",
    ),
    (
        "The Eastern State Penitentiary, famous for ghost tours, is in which city?",
        ["Boston", "Chicago", "Philadelphia", "New Orleans"],
        2,
        "The abandoned prison in Philadelphia hosts yearly haunted events.",
    ),
    (
        "Which Paris site holds the remains of millions beneath the streets?",
        ["The Louvre", "The Catacombs", "Notre-Dame", "The Pantheon"],
        1,
        "The Catacombs of Paris hold the bones of over six million people.",
    ),
];

const WITCHCRAFT_AND_FOLKLORE: &[Entry] = &[
    (
        "In which Massachusetts town were the infamous 1692 witch trials held?",
        ["Plymouth", "Salem", "Concord", "Lexington"],
        1,
        "The Salem witch trials took place in 1692 and 1693.",
    ),
    (
        "What household item do witches traditionally ride?",
        ["Mop", "Rake", "Broomstick", "Ladder"],
        2,
        "The broomstick became the witch's classic mode of flight.",
    ),
    (
        "What is a witch's animal helper called?",
        ["Familiar", "Sprite", "Totem", "Imp"],
        0,
        "A familiar is a spirit companion in animal form.",
    ),
    (
        "Which Slavic witch lives in a hut on chicken legs?",
        ["Baba Yaga", "Morgana", "Hecate", "Circe"],
        0,
        "Baba Yaga's hut can turn to face visitors.",
    ),
    (
        "In folklore, what is a circle of mushrooms called?",
        ["Witch ring", "Fairy ring", "Moon circle", "Goblin loop"],
        1,
        "Fairy rings were said to mark places where fairies danced.",
    ),
];

const KIDS_FRIENDLY: &[Entry] = &[
    (
        "What do you call a carved pumpkin with a candle inside?",
        ["Pumpkin pie", "Jack-o'-lantern", "Spooky squash", "Candle gourd"],
        1,
        "Jack-o'-lanterns glow on porches every Halloween.",
    ),
    (
        "What sound does a ghost usually make?",
        ["Moo", "Boo", "Quack", "Oink"],
        1,
        "Ghosts say boo to give everyone a friendly fright.",
    ),
    (
        "Which animal hangs upside down to sleep?",
        ["Owl", "Bat", "Cat", "Spider"],
        1,
        "Bats rest upside down hanging by their feet.",
    ),
    (
        "What does a spider spin?",
        ["A web", "A nest", "A cocoon", "A blanket"],
        0,
        "Spiders spin silky webs to catch their dinner.",
    ),
    (
        "What colour is a classic witch's hat?",
        ["Red", "Blue", "Black", "Yellow"],
        2,
        "The pointy black hat is part of every witch costume.",
    ),
];

fn entries(category: Category) -> &'static [Entry] {
    match category {
        Category::GeneralHalloween => GENERAL_HALLOWEEN,
        Category::ClassicHorror => CLASSIC_HORROR,
        Category::ModernHorror => MODERN_HORROR,
        Category::UrbanLegends => URBAN_LEGENDS,
        Category::MonstersAndCreatures => MONSTERS_AND_CREATURES,
        Category::HauntedPlaces => HAUNTED_PLACES,
        Category::WitchcraftAndFolklore => WITCHCRAFT_AND_FOLKLORE,
        Category::KidsFriendly => KIDS_FRIENDLY,
    }
}

fn build(entries: &[Entry]) -> Vec<Question> {
    entries
        .iter()
        .map(|(prompt, options, correct, explanation)| {
            Question::from_static(prompt, *options, *correct, explanation)
        })
        .collect()
}

/// Questions written for one category.
pub fn topic_pool(category: Category) -> Vec<Question> {
    build(entries(category))
}

/// Questions that suit any category.
pub fn generic_pool() -> Vec<Question> {
    build(GENERIC)
}

/// Offline substitute for a failed generation.
///
/// Takes the category's own questions first, then the generic ones, and
/// repeats from the start if that is still fewer than `count`. `reason` is
/// only logged.
pub fn fallback_questions(category: Category, count: QuestionCount, reason: &str) -> QuestionSet {
    warn!(category = %category, count = count.get(), "using offline questions because: {reason}");

    let pool: Vec<Question> = topic_pool(category)
        .into_iter()
        .chain(generic_pool())
        .collect();

    let questions = pool.iter().cycle().take(count.get()).cloned().collect();
    QuestionSet::from_questions(questions)
}
