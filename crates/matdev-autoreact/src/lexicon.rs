//! Static keyword and marker data for the sentiment scorer.
//!
//! Keywords are lowercase and matched by substring containment against the
//! lowercased message, so short entries also fire inside longer words
//! ("hell" inside "hello", "mad" inside "made").

/// Keywords that raise the `love` bucket.
pub const LOVE_KW: &[&str] = &[
    "love",
    "lovely",
    "loving",
    "adore",
    "darling",
    "sweetheart",
    "sweetie",
    "honey",
    "babe",
    "cute",
    "beautiful",
    "gorgeous",
    "handsome",
    "pretty",
    "romantic",
    "kiss",
    "hug",
    "cuddle",
    "crush",
    "affection",
    "cherish",
    "precious",
    "soulmate",
    "xoxo",
    "heart",
    "amazing",
    "wonderful",
    "awesome",
    "perfect",
    "fantastic",
    "grateful",
    "thankful",
    "thank you",
    "thanks",
    "blessed",
    "appreciate",
    "proud of you",
    "miss you",
    "care about you",
    "bestie",
    "happy",
    "joy",
    "congrats",
    "congratulations",
    "yay",
    "marry",
    "valentine",
    "forever",
];

/// Keywords that raise the `sad` bucket.
pub const SAD_KW: &[&str] = &[
    "sad",
    "sadly",
    "cry",
    "crying",
    "cried",
    "tears",
    "depressed",
    "depression",
    "lonely",
    "alone",
    "heartbroken",
    "broken",
    "hurt",
    "pain",
    "miss",
    "sorry",
    "unhappy",
    "upset",
    "grief",
    "grieving",
    "mourn",
    "lost",
    "loss",
    "tired",
    "exhausted",
    "hopeless",
    "miserable",
    "sick",
    "disappointed",
    "regret",
    "sigh",
    "devastated",
    "gloomy",
    "unfortunately",
    "rip",
    "passed away",
    "funeral",
    "worried",
    "anxious",
    "scared",
    "afraid",
    "stressed",
    "suffering",
    "goodbye",
    "heartache",
    "empty",
    "homesick",
    "why me",
    "let down",
];

/// Keywords that raise the `angry` bucket.
pub const ANGRY_KW: &[&str] = &[
    "angry",
    "anger",
    "mad",
    "hate",
    "hated",
    "annoyed",
    "annoying",
    "furious",
    "pissed",
    "rage",
    "stupid",
    "idiot",
    "dumb",
    "shut up",
    "wtf",
    "damn",
    "hell",
    "screw you",
    "sucks",
    "disgusting",
    "ridiculous",
    "nonsense",
    "irritated",
    "frustrated",
    "fed up",
    "worst",
    "terrible",
    "awful",
    "horrible",
    "trash",
    "useless",
    "liar",
    "betrayed",
    "shameless",
    "rude",
    "fool",
    "bastard",
    "jerk",
    "moron",
    "nasty",
    "outrageous",
    "unacceptable",
    "get lost",
    "go away",
    "how dare",
    "enough",
    "stop it",
    "leave me alone",
];

/// Keywords that raise the `laugh` bucket.
pub const LAUGH_KW: &[&str] = &[
    "haha",
    "hahaha",
    "ahaha",
    "hehe",
    "hihi",
    "jaja",
    "kkkk",
    "lol",
    "lool",
    "lolz",
    "lmao",
    "lmfao",
    "rofl",
    "rotfl",
    "funny",
    "so funny",
    "hilarious",
    "joke",
    "joking",
    "kidding",
    "laugh",
    "laughing",
    "giggle",
    "chuckle",
    "dead",
    "dying",
    "im dead",
    "i'm dead",
    "crying laughing",
    "xd",
    "comedy",
    "comedian",
    "silly",
    "clown",
    "meme",
    "prank",
    "witty",
    "amusing",
    "lmaooo",
    "bwahaha",
    "teehee",
    "that's funny",
    "cracking up",
    "too funny",
    "hysterical",
    "goofy",
];

/// Emoticons and emoji that add a flat boost to `sad`.
pub const SAD_MARKERS: &[&str] = &[
    ":(",
    "\u{1f622}", // 😢
    "\u{1f62d}", // 😭
];

/// Emoticons and emoji that add a flat boost to `laugh`.
pub const LAUGH_MARKERS: &[&str] = &[
    ":)",
    "\u{1f602}", // 😂
    "\u{1f923}", // 🤣
    "\u{1f604}", // 😄
];

/// Emoticons and emoji that add a flat boost to `love`.
pub const LOVE_MARKERS: &[&str] = &[
    "<3",
    "\u{2764}\u{fe0f}", // ❤️
    "\u{1f495}",        // 💕
    "\u{1f970}",        // 🥰
];

/// Emoticons and emoji that add a flat boost to `angry`.
pub const ANGRY_MARKERS: &[&str] = &[
    ">:(",
    "\u{1f621}", // 😡
    "\u{1f620}", // 😠
    "\u{1f92c}", // 🤬
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lists_are_lowercase_and_sized() {
        for list in [LOVE_KW, SAD_KW, ANGRY_KW, LAUGH_KW] {
            assert!(
                (40..=60).contains(&list.len()),
                "keyword list has {} entries",
                list.len()
            );
            for kw in list {
                assert_eq!(*kw, kw.to_lowercase(), "keyword '{kw}' must be lowercase");
                assert!(!kw.is_empty());
            }
        }
    }
}
