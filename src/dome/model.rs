//! Emotion records, categories and colors.
//!
//! Seeds are `'static` rows compiled into the binary; [`load_nodes`] turns them
//! into owned [`EmotionNode`]s once at startup and never touches them again.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::EngineError;

/// Unique key of an emotion node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	/// Borrow the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl Borrow<str> for NodeId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// The closed set of emotion families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
	/// Joy.
	Joy,
	/// Love.
	Love,
	/// Sadness.
	Sadness,
	/// Anger.
	Anger,
	/// Fear.
	Fear,
	/// Calm.
	Calm,
}

impl Category {
	/// Every category, in display order.
	pub const ALL: [Self; 6] = [
		Self::Joy,
		Self::Love,
		Self::Sadness,
		Self::Anger,
		Self::Fear,
		Self::Calm,
	];

	/// Lowercase key used in storage and search.
	pub fn key(self) -> &'static str {
		match self {
			Self::Joy => "joy",
			Self::Love => "love",
			Self::Sadness => "sadness",
			Self::Anger => "anger",
			Self::Fear => "fear",
			Self::Calm => "calm",
		}
	}

	/// Capitalized name for display.
	pub fn label(self) -> &'static str {
		match self {
			Self::Joy => "Joy",
			Self::Love => "Love",
			Self::Sadness => "Sadness",
			Self::Anger => "Anger",
			Self::Fear => "Fear",
			Self::Calm => "Calm",
		}
	}
}

/// A string that names no category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

/// Active category filter: everything, or a single category.
///
/// Serialized as the bare category key (`"all"`, `"joy"`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
	/// No category filter.
	#[default]
	All,
	/// Only this category passes.
	Only(Category),
}

impl CategoryFilter {
	/// Cycle order used by keyboard navigation.
	pub const CYCLE: [Self; 7] = [
		Self::All,
		Self::Only(Category::Joy),
		Self::Only(Category::Love),
		Self::Only(Category::Sadness),
		Self::Only(Category::Anger),
		Self::Only(Category::Fear),
		Self::Only(Category::Calm),
	];

	/// Whether nodes of `category` pass the filter.
	pub fn admits(self, category: Category) -> bool {
		match self {
			Self::All => true,
			Self::Only(c) => c == category,
		}
	}

	/// `"all"` or the category key.
	pub fn key(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Only(c) => c.key(),
		}
	}

	/// Display name.
	pub fn label(self) -> &'static str {
		match self {
			Self::All => "All",
			Self::Only(c) => c.label(),
		}
	}

	/// Step `step` places through [`Self::CYCLE`], wrapping at both ends.
	pub fn cycled(self, step: isize) -> Self {
		let len = Self::CYCLE.len() as isize;
		let current = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0) as isize;
		Self::CYCLE[(current + step).rem_euclid(len) as usize]
	}
}

impl FromStr for CategoryFilter {
	type Err = UnknownCategory;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::CYCLE
			.into_iter()
			.find(|f| f.key() == s)
			.ok_or_else(|| UnknownCategory(s.to_owned()))
	}
}

impl TryFrom<String> for CategoryFilter {
	type Error = UnknownCategory;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<CategoryFilter> for String {
	fn from(filter: CategoryFilter) -> Self {
		filter.key().to_owned()
	}
}

/// An 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
}

impl Rgb {
	/// `#FFFFFF`.
	pub const WHITE: Rgb = Rgb::hex(0xFFFFFF);

	/// Build from a `0xRRGGBB` literal.
	pub const fn hex(value: u32) -> Self {
		Self {
			r: ((value >> 16) & 0xFF) as u8,
			g: ((value >> 8) & 0xFF) as u8,
			b: (value & 0xFF) as u8,
		}
	}

	/// CSS `rgba()` string with the given alpha.
	pub fn css(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
	}
}

/// One compiled-in row of the dataset, before validation.
#[derive(Clone, Copy, Debug)]
pub struct EmotionSeed {
	/// Unique id.
	pub id: &'static str,
	/// Display name.
	pub name: &'static str,
	/// Family.
	pub category: Category,
	/// Node color.
	pub color: Rgb,
	/// One-line description.
	pub description: &'static str,
	/// Short quote for the info panel.
	pub quote: &'static str,
	/// Percent; clamped into `0..=100` on load.
	pub strength: i16,
	/// Extra search terms.
	pub keywords: &'static [&'static str],
	/// Ids of related emotions.
	pub connections: &'static [&'static str],
}

/// A validated emotion, owned and ready for indexing.
#[derive(Clone, Debug, PartialEq)]
pub struct EmotionNode {
	/// Unique id.
	pub id: NodeId,
	/// Display name.
	pub name: String,
	/// Family.
	pub category: Category,
	/// Node color.
	pub color: Rgb,
	/// One-line description.
	pub description: String,
	/// Short quote for the info panel.
	pub quote: String,
	/// Always within `0..=100`.
	pub strength_percent: u8,
	/// Extra search terms.
	pub keywords: Vec<String>,
	/// Declared targets, in declaration order. Not necessarily symmetric and
	/// not yet checked against the node set.
	pub connections: Vec<NodeId>,
}

impl EmotionNode {
	fn from_seed(seed: &EmotionSeed) -> Self {
		let clamped = seed.strength.clamp(0, 100);
		if clamped != seed.strength {
			warn!(
				"strength {} of `{}` outside 0..=100, clamped to {}",
				seed.strength, seed.id, clamped
			);
		}
		Self {
			id: NodeId::from(seed.id),
			name: seed.name.to_owned(),
			category: seed.category,
			color: seed.color,
			description: seed.description.to_owned(),
			quote: seed.quote.to_owned(),
			strength_percent: clamped as u8,
			keywords: seed.keywords.iter().map(|k| (*k).to_owned()).collect(),
			connections: seed.connections.iter().map(|c| NodeId::from(*c)).collect(),
		}
	}
}

/// Validate the seed table: ids must be non-empty and unique, strengths are
/// clamped. Connection targets are checked later by the graph index.
pub fn load_nodes(seeds: &[EmotionSeed]) -> Result<Vec<EmotionNode>, EngineError> {
	let mut seen = HashSet::with_capacity(seeds.len());
	let mut nodes = Vec::with_capacity(seeds.len());
	for seed in seeds {
		if seed.id.is_empty() {
			return Err(EngineError::EmptyNodeId);
		}
		if !seen.insert(seed.id) {
			return Err(EngineError::DuplicateNode(NodeId::from(seed.id)));
		}
		nodes.push(EmotionNode::from_seed(seed));
	}
	Ok(nodes)
}
