//! Built-in curated song lists, one per mood category.

use super::CuratedSong;

const fn song(
    title: &'static str,
    artist: &'static str,
    search_terms: &'static [&'static str],
) -> CuratedSong {
    CuratedSong {
        title,
        artist,
        search_terms,
    }
}

pub const VERY_POSITIVE_SONGS: &[CuratedSong] = &[
    song("Happy", "Pharrell Williams", &["happy", "celebration"]),
    song("Can't Stop the Feeling!", "Justin Timberlake", &["feel good", "dance"]),
    song("Good as Hell", "Lizzo", &["confidence", "empowerment"]),
    song("Uptown Funk", "Mark Ronson ft. Bruno Mars", &["funk", "party"]),
    song("Walking on Sunshine", "Katrina and the Waves", &["sunshine", "energy"]),
    song("I Gotta Feeling", "The Black Eyed Peas", &["party", "celebration"]),
    song("Don't Worry Be Happy", "Bobby McFerrin", &["happy", "carefree"]),
    song("Best Day of My Life", "American Authors", &["best day", "joy"]),
];

pub const POSITIVE_SONGS: &[CuratedSong] = &[
    song("Good 4 U", "Olivia Rodrigo", &["pop", "upbeat"]),
    song("Levitating", "Dua Lipa", &["dance", "feel good"]),
    song("Sunflower", "Post Malone, Swae Lee", &["chill", "positive"]),
    song("Blinding Lights", "The Weeknd", &["synthwave", "energy"]),
    song("Don't Stop Me Now", "Queen", &["rock", "unstoppable"]),
    song("Good Vibes", "Chris Brown", &["good vibes", "chill"]),
    song("High Hopes", "Panic! At The Disco", &["optimistic", "hope"]),
    song("Count on Me", "Bruno Mars", &["friendship", "positive"]),
];

pub const NEUTRAL_SONGS: &[CuratedSong] = &[
    song("Weightless", "Marconi Union", &["ambient", "calm"]),
    song("Holocene", "Bon Iver", &["indie", "introspective"]),
    song("Clair de Lune", "Claude Debussy", &["classical", "peaceful"]),
    song("Breathe Me", "Sia", &["emotional", "reflective"]),
    song("The Night We Met", "Lord Huron", &["indie", "nostalgic"]),
    song("Skinny Love", "Bon Iver", &["indie", "acoustic"]),
    song("Mad About You", "Sting", &["mellow", "romantic"]),
    song("Vienna", "Billy Joel", &["piano", "reflective"]),
];

pub const NEGATIVE_SONGS: &[CuratedSong] = &[
    song("Someone Like You", "Adele", &["heartbreak", "emotional"]),
    song("Fix You", "Coldplay", &["healing", "support"]),
    song("The Sound of Silence", "Disturbed", &["introspective", "powerful"]),
    song("Everybody Hurts", "R.E.M.", &["support", "comfort"]),
    song("Mad World", "Gary Jules", &["melancholy", "sad"]),
    song("Tears Don't Fall", "Bullet for My Valentine", &["emotional", "rock"]),
    song("In the End", "Linkin Park", &["struggle", "rock"]),
    song("Heavy", "Linkin Park ft. Kiiara", &["burden", "support"]),
];

pub const VERY_NEGATIVE_SONGS: &[CuratedSong] = &[
    song("Hurt", "Johnny Cash", &["pain", "regret"]),
    song("Black", "Pearl Jam", &["grunge", "loss"]),
    song("Tears in Heaven", "Eric Clapton", &["loss", "grief"]),
    song("Creep", "Radiohead", &["alienation", "emotional"]),
    song("Snuff", "Slipknot", &["loss", "metal"]),
    song("One More Day", "Diamond Rio", &["loss", "country"]),
    song("Whiskey Lullaby", "Brad Paisley ft. Alison Krauss", &["tragedy", "loss"]),
    song("Gone Away", "The Offspring", &["grief", "punk rock"]),
];
