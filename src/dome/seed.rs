//! The compiled-in emotion table.

use super::model::{Category, EmotionSeed, Rgb};

/// Six families, twenty-two emotions. Connection lists are declarative and
/// only partly symmetric; the graph index derives the undirected edges.
pub static EMOTIONS: &[EmotionSeed] = &[
	EmotionSeed {
		id: "joy",
		name: "Joy",
		category: Category::Joy,
		color: Rgb::hex(0xFFD700),
		description: "Pure happiness and delight",
		quote: "Joy is the simplest form of gratitude",
		strength: 85,
		keywords: &["happy", "cheerful", "delighted", "pleased"],
		connections: &["excitement", "gratitude", "love", "hope"],
	},
	EmotionSeed {
		id: "excitement",
		name: "Excitement",
		category: Category::Joy,
		color: Rgb::hex(0xFFA500),
		description: "Energetic anticipation and enthusiasm",
		quote: "Excitement is the electricity of life",
		strength: 75,
		keywords: &["thrilled", "eager", "enthusiastic", "animated"],
		connections: &["joy", "hope", "curiosity"],
	},
	EmotionSeed {
		id: "gratitude",
		name: "Gratitude",
		category: Category::Joy,
		color: Rgb::hex(0xFFB347),
		description: "Thankfulness and appreciation",
		quote: "Gratitude turns what we have into enough",
		strength: 80,
		keywords: &["thankful", "appreciative", "blessed", "grateful"],
		connections: &["joy", "love", "peace"],
	},
	EmotionSeed {
		id: "love",
		name: "Love",
		category: Category::Love,
		color: Rgb::hex(0xFF69B4),
		description: "Deep affection and connection",
		quote: "Love is the bridge between souls",
		strength: 90,
		keywords: &["affection", "caring", "devotion", "warmth"],
		connections: &["joy", "compassion", "trust", "gratitude"],
	},
	EmotionSeed {
		id: "compassion",
		name: "Compassion",
		category: Category::Love,
		color: Rgb::hex(0xFF1493),
		description: "Empathy and concern for others",
		quote: "Compassion is love in action",
		strength: 70,
		keywords: &["empathy", "kindness", "sympathy", "understanding"],
		connections: &["love", "sadness", "hope"],
	},
	EmotionSeed {
		id: "trust",
		name: "Trust",
		category: Category::Love,
		color: Rgb::hex(0xC71585),
		description: "Faith and confidence in others",
		quote: "Trust is the foundation of connection",
		strength: 75,
		keywords: &["faith", "confidence", "reliability", "security"],
		connections: &["love", "peace", "hope"],
	},
	EmotionSeed {
		id: "sadness",
		name: "Sadness",
		category: Category::Sadness,
		color: Rgb::hex(0x4169E1),
		description: "Sorrow and unhappiness",
		quote: "Sadness is love with nowhere to go",
		strength: 60,
		keywords: &["sorrowful", "unhappy", "melancholy", "blue"],
		connections: &["grief", "loneliness", "compassion", "nostalgia"],
	},
	EmotionSeed {
		id: "grief",
		name: "Grief",
		category: Category::Sadness,
		color: Rgb::hex(0x191970),
		description: "Deep sorrow from loss",
		quote: "Grief is love persevering",
		strength: 45,
		keywords: &["mourning", "loss", "bereavement", "anguish"],
		connections: &["sadness", "anger", "loneliness"],
	},
	EmotionSeed {
		id: "loneliness",
		name: "Loneliness",
		category: Category::Sadness,
		color: Rgb::hex(0x6495ED),
		description: "Isolation and disconnection",
		quote: "Loneliness is the human condition",
		strength: 50,
		keywords: &["isolated", "alone", "disconnected", "abandoned"],
		connections: &["sadness", "fear", "grief"],
	},
	EmotionSeed {
		id: "nostalgia",
		name: "Nostalgia",
		category: Category::Sadness,
		color: Rgb::hex(0x4682B4),
		description: "Bittersweet longing for the past",
		quote: "Nostalgia is memory with the pain removed",
		strength: 65,
		keywords: &["wistful", "reminiscent", "yearning", "sentimental"],
		connections: &["sadness", "joy", "peace"],
	},
	EmotionSeed {
		id: "anger",
		name: "Anger",
		category: Category::Anger,
		color: Rgb::hex(0xDC143C),
		description: "Strong displeasure and hostility",
		quote: "Anger is sadness that had nowhere to go for too long",
		strength: 70,
		keywords: &["furious", "enraged", "irritated", "mad"],
		connections: &["frustration", "fear", "grief"],
	},
	EmotionSeed {
		id: "frustration",
		name: "Frustration",
		category: Category::Anger,
		color: Rgb::hex(0xB22222),
		description: "Feeling blocked or thwarted",
		quote: "Frustration is the first step towards improvement",
		strength: 65,
		keywords: &["annoyed", "exasperated", "impatient", "thwarted"],
		connections: &["anger", "anxiety", "determination"],
	},
	EmotionSeed {
		id: "jealousy",
		name: "Jealousy",
		category: Category::Anger,
		color: Rgb::hex(0x8B0000),
		description: "Envy and resentment",
		quote: "Jealousy is the art of counting others' blessings",
		strength: 55,
		keywords: &["envious", "resentful", "covetous", "suspicious"],
		connections: &["anger", "fear", "sadness"],
	},
	EmotionSeed {
		id: "fear",
		name: "Fear",
		category: Category::Fear,
		color: Rgb::hex(0x8B008B),
		description: "Apprehension of danger",
		quote: "Fear is excitement without breath",
		strength: 60,
		keywords: &["afraid", "scared", "terrified", "fearful"],
		connections: &["anxiety", "anger", "loneliness"],
	},
	EmotionSeed {
		id: "anxiety",
		name: "Anxiety",
		category: Category::Fear,
		color: Rgb::hex(0x9932CC),
		description: "Worry about future uncertainty",
		quote: "Anxiety is the dizziness of freedom",
		strength: 65,
		keywords: &["worried", "nervous", "uneasy", "tense"],
		connections: &["fear", "frustration", "overwhelm"],
	},
	EmotionSeed {
		id: "overwhelm",
		name: "Overwhelm",
		category: Category::Fear,
		color: Rgb::hex(0x9370DB),
		description: "Feeling unable to cope",
		quote: "When overwhelmed, return to breath",
		strength: 55,
		keywords: &["overloaded", "swamped", "stressed", "burdened"],
		connections: &["anxiety", "sadness", "frustration"],
	},
	EmotionSeed {
		id: "peace",
		name: "Peace",
		category: Category::Calm,
		color: Rgb::hex(0x20B2AA),
		description: "Tranquility and serenity",
		quote: "Peace begins with a smile",
		strength: 80,
		keywords: &["tranquil", "serene", "calm", "relaxed"],
		connections: &["trust", "gratitude", "acceptance"],
	},
	EmotionSeed {
		id: "acceptance",
		name: "Acceptance",
		category: Category::Calm,
		color: Rgb::hex(0x48D1CC),
		description: "Embracing what is",
		quote: "Acceptance is the first step to change",
		strength: 75,
		keywords: &["accepting", "allowing", "embracing", "surrendering"],
		connections: &["peace", "trust", "hope"],
	},
	EmotionSeed {
		id: "hope",
		name: "Hope",
		category: Category::Calm,
		color: Rgb::hex(0x00CED1),
		description: "Optimism for the future",
		quote: "Hope is the thing with feathers",
		strength: 85,
		keywords: &["optimistic", "hopeful", "confident", "positive"],
		connections: &["joy", "trust", "excitement", "compassion"],
	},
	EmotionSeed {
		id: "curiosity",
		name: "Curiosity",
		category: Category::Calm,
		color: Rgb::hex(0x5F9EA0),
		description: "Wonder and desire to explore",
		quote: "Curiosity is the wick in the candle of learning",
		strength: 70,
		keywords: &["interested", "inquisitive", "wondering", "exploring"],
		connections: &["excitement", "hope", "joy"],
	},
	EmotionSeed {
		id: "determination",
		name: "Determination",
		category: Category::Calm,
		color: Rgb::hex(0x008B8B),
		description: "Resolve and persistence",
		quote: "Determination is the wake-up call to the human will",
		strength: 80,
		keywords: &["determined", "persistent", "resolute", "committed"],
		connections: &["hope", "frustration", "courage"],
	},
	EmotionSeed {
		id: "courage",
		name: "Courage",
		category: Category::Calm,
		color: Rgb::hex(0x006666),
		description: "Bravery in facing challenges",
		quote: "Courage is fear walking",
		strength: 85,
		keywords: &["brave", "bold", "fearless", "valiant"],
		connections: &["determination", "fear", "hope"],
	},
];
