// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Built-in tag dictionary
//!
//! Keys are lowercase. Spaces and underscores are distinct lookup keys, so the
//! table spells every tag the way it usually appears in prompts.

use std::collections::{HashMap, HashSet};

use super::Category;

const SPECIAL_TAGS: &[&str] = &[
    "1girl", "1boy", "1other", "2girls", "2boys", "3girls", "3boys",
    "4girls", "4boys", "5girls", "5boys", "6+girls", "6+boys",
    "multiple girls", "multiple boys", "solo", "duo", "group",
];

const GENERAL_TAGS: &[&str] = &[
    // Hair and eyes
    "long_hair", "short_hair", "medium_hair", "brown_hair", "black_hair", "blonde_hair",
    "white_hair", "silver_hair", "grey_hair", "red_hair", "pink_hair", "purple_hair",
    "blue_hair", "green_hair", "orange_hair", "twintails", "ponytail", "braid", "braids",
    "blue_eyes", "brown_eyes", "green_eyes", "red_eyes", "yellow_eyes", "purple_eyes",
    "grey_eyes", "heterochromia", "closed_eyes", "one_eye_closed", "wink",
    // Expression and action
    "smile", "open_mouth", "closed_mouth", "fang", "fangs", ":d", ":o", ":3",
    "blush", "sweat", "tears", "crying", "angry", "sad", "happy", "surprised",
    "looking_at_viewer", "looking_away", "looking_back", "looking_down", "looking_up",
    "sitting", "standing", "walking", "running", "lying", "kneeling", "crouching",
    "arms_up", "arms_behind_back", "hands_on_hips", "peace_sign", "v", "thumbs_up",
    // Clothing and accessories
    "dress", "skirt", "shirt", "blouse", "sweater", "jacket", "coat", "hoodie",
    "pants", "shorts", "jeans", "stockings", "thighhighs", "socks", "pantyhose",
    "shoes", "boots", "sandals", "high_heels", "sneakers", "bare_feet",
    "hat", "cap", "headband", "hair_ornament", "hair_bow", "ribbon", "bow",
    "glasses", "sunglasses", "jewelry", "necklace", "earrings", "bracelet",
    "gloves", "fingerless_gloves", "mittens", "scarf", "tie", "necktie", "bowtie",
    "underwear", "panties", "bra", "bikini", "swimsuit", "lingerie",
    "school_uniform", "sailor_dress", "maid", "nurse", "police", "military",
    "kimono", "yukata", "chinese_clothes", "qipao", "cheongsam",
    "open_clothes", "open_shirt", "open_jacket", "torn_clothes",
    "robe", "cloak", "cape", "apron", "vest", "tank_top", "crop_top",
    // Body
    "horns", "tail", "wings", "ears", "animal_ears", "cat_ears", "fox_ears",
    "elf_ears", "pointed_ears", "long_ears", "fin_ears",
    "small_breasts", "medium_breasts", "large_breasts", "huge_breasts",
    "flat_chest", "cleavage", "sideboob", "underboob",
    "thick_thighs", "wide_hips", "slim", "curvy", "muscular",
    "pale_skin", "dark_skin", "tan", "dark_skinned_female",
    "scar", "bandages", "tattoo", "piercing",
    // Hands and nails
    "fingernails", "long_fingernails", "sharp_fingernails", "colored_nails",
    "nail_polish", "nail_art", "black_nails", "red_nails", "blue_nails",
    "manicure", "claw_pose", "finger_gun", "pointing",
    // Eye details and makeup
    "slit_pupils", "heart-shaped_pupils", "star-shaped_pupils", "cross-shaped_pupils",
    "glowing_eyes", "empty_eyes", "spiral_eyes", "x_x", "@_@",
    "eyelashes", "long_eyelashes", "thick_eyelashes", "makeup", "eyeshadow",
    "eyeliner", "mascara", "lipstick", "lip_gloss",
    // Scenery
    "indoors", "outdoors", "bedroom", "bathroom", "kitchen", "living_room",
    "classroom", "school", "library", "office", "hospital", "park", "garden",
    "beach", "ocean", "forest", "mountain", "city", "street", "rooftop",
    "sky", "clouds", "sunset", "sunrise", "night", "starry_sky", "moon",
    "rain", "snow", "cherry_blossoms", "flowers", "trees", "grass",
    "building", "house", "bridge", "tower", "castle", "temple", "shrine",
    // Objects
    "umbrella", "bag", "backpack", "book", "pen", "pencil", "paper",
    "phone", "computer", "laptop", "tablet", "camera", "microphone",
    "sword", "katana", "knife", "dagger", "gun", "rifle", "pistol",
    "shield", "armor", "helmet", "crown", "tiara", "staff", "wand",
    "ball", "balloon", "teddy_bear", "stuffed_animal", "doll",
    "food", "cake", "ice_cream", "coffee", "tea", "water", "bottle",
    "flower", "rose", "sunflower", "bouquet", "gift", "present",
    "mirror", "window", "door", "chair", "table", "bed", "pillow",
    "lamp", "candle", "fire", "flame", "smoke", "steam",
    // Framing and camera angle
    "full_body", "upper_body", "lower_body", "portrait", "close-up",
    "from_above", "from_below", "from_side", "from_behind", "back_view",
    "profile", "three-quarter_view", "straight-on", "diagonal",
    "cowboy_shot", "dutch_angle", "bird's_eye_view", "worm's_eye_view",
];

const QUALITY_TAGS: &[&str] = &[
    "masterpiece", "best quality", "high quality", "normal quality", "low quality",
    "worst quality", "jpeg artifacts", "signature", "watermark", "username",
    "blurry", "artist name", "trademark", "title", "bad anatomy", "bad hands",
    "text", "error", "missing fingers", "extra digit", "fewer digits",
    "cropped", "absurdres", "highres", "lowres",
];

const META_TAGS: &[&str] = &[
    "realistic", "photorealistic", "photo", "cosplay", "real person",
    "official art", "promotional art", "scan", "magazine scan",
    "web", "pixiv", "twitter", "artstation", "deviantart", "tumblr",
];

const RATING_TAGS: &[&str] = &[
    "rating:safe", "rating:questionable", "rating:explicit", "rating:sensitive",
    "safe", "sensitive", "questionable", "explicit", "nsfw", "sfw",
];

/// Franchise and brand names recognised as copyrights without a knowledge base
pub const COPYRIGHT_KEYWORDS: &[&str] = &[
    "vocaloid", "touhou", "fate", "pokemon", "naruto", "bleach", "one_piece",
    "dragon_ball", "attack_on_titan", "demon_slayer", "jujutsu_kaisen",
    "genshin_impact", "honkai_impact", "azur_lane", "kantai_collection",
    "love_live", "idolmaster", "persona", "final_fantasy", "overwatch",
];

/// Read-only category -> tag-set mapping.
///
/// `characters`, `copyrights` and `artists` are always present but start
/// empty; they are filled only through knowledge bases, overrides and
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDatabase {
    sets: HashMap<Category, HashSet<String>>,
    copyright_keywords: HashSet<String>,
}

impl TagDatabase {
    /// Build the built-in dictionary from the literal tables
    pub fn builtin() -> Self {
        let mut sets: HashMap<Category, HashSet<String>> = Category::ALL
            .into_iter()
            .map(|c| (c, HashSet::new()))
            .collect();

        let tables: [(Category, &[&str]); 5] = [
            (Category::Special, SPECIAL_TAGS),
            (Category::General, GENERAL_TAGS),
            (Category::Quality, QUALITY_TAGS),
            (Category::Meta, META_TAGS),
            (Category::Rating, RATING_TAGS),
        ];
        for (category, tags) in tables {
            sets.entry(category)
                .or_default()
                .extend(tags.iter().map(|t| t.to_string()));
        }

        Self {
            sets,
            copyright_keywords: COPYRIGHT_KEYWORDS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Tags known for a category
    pub fn tags(&self, category: Category) -> &HashSet<String> {
        // every category is inserted by `builtin`
        &self.sets[&category]
    }

    /// First category (in declaration order) whose set holds `tag_lower`
    pub fn lookup(&self, tag_lower: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.tags(*c).contains(tag_lower))
    }

    pub fn is_copyright_keyword(&self, tag_lower: &str) -> bool {
        self.copyright_keywords.contains(tag_lower)
    }

    /// Total number of built-in tags across all categories
    pub fn len(&self) -> usize {
        self.sets.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
