//! One-shot placement of nodes onto lattice vertices.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::error::EngineError;
use super::lattice::Point3;
use super::model::NodeId;

/// Injective mapping from node to scene position, in placement order.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	placed: Vec<(NodeId, Point3)>,
	index: HashMap<NodeId, usize>,
}

impl Layout {
	/// Position bound to `id`, if it was placed.
	pub fn position(&self, id: &str) -> Option<Point3> {
		self.index.get(id).map(|&i| self.placed[i].1)
	}

	/// Placements in input order.
	pub fn iter(&self) -> impl Iterator<Item = (&NodeId, Point3)> {
		self.placed.iter().map(|(id, p)| (id, *p))
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.placed.len()
	}

	/// Whether nothing was placed.
	pub fn is_empty(&self) -> bool {
		self.placed.is_empty()
	}
}

/// Bind every id to a distinct vertex drawn at random from `vertices`.
///
/// Each node gets up to `vertices.len()` random draws; if all of them land on
/// used vertices the lowest free index is taken instead, so the loop always
/// terminates and never doubles up.
pub fn place<'a, R>(
	ids: impl IntoIterator<Item = &'a NodeId>,
	vertices: &[Point3],
	rng: &mut R,
) -> Result<Layout, EngineError>
where
	R: Rng,
{
	let ids: Vec<&NodeId> = ids.into_iter().collect();
	let m = vertices.len();
	if m < ids.len() {
		return Err(EngineError::LayoutCapacity {
			nodes: ids.len(),
			vertices: m,
		});
	}

	let mut used = vec![false; m];
	let mut layout = Layout {
		placed: Vec::with_capacity(ids.len()),
		index: HashMap::with_capacity(ids.len()),
	};
	let mut fallbacks = 0usize;

	for id in ids {
		let drawn = (0..m).map(|_| rng.gen_range(0..m)).find(|&i| !used[i]);
		let slot = match drawn {
			Some(i) => i,
			None => {
				fallbacks += 1;
				used.iter()
					.position(|taken| !taken)
					.ok_or(EngineError::LayoutCapacity {
						nodes: layout.len() + 1,
						vertices: m,
					})?
			}
		};
		used[slot] = true;
		layout.index.insert(id.clone(), layout.placed.len());
		layout.placed.push((id.clone(), vertices[slot]));
	}

	if fallbacks > 0 {
		debug!("{fallbacks} node(s) placed by linear scan after random draws collided");
	}
	Ok(layout)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::dome::lattice::geodesic_vertices;

	fn ids(n: usize) -> Vec<NodeId> {
		(0..n).map(|i| NodeId::from(format!("n{i}"))).collect()
	}

	#[test]
	fn too_few_vertices_is_a_capacity_error() {
		let vertices = geodesic_vertices(1.0, 0);
		let err = place(&ids(13), &vertices, &mut StdRng::seed_from_u64(1)).unwrap_err();
		assert_eq!(
			err,
			EngineError::LayoutCapacity {
				nodes: 13,
				vertices: 12
			}
		);
	}

	#[test]
	fn full_lattice_uses_every_vertex_once() {
		let vertices = geodesic_vertices(1.0, 0);
		let layout = place(&ids(12), &vertices, &mut StdRng::seed_from_u64(7)).unwrap();
		assert_eq!(layout.len(), 12);
		for v in &vertices {
			assert_eq!(layout.iter().filter(|(_, p)| p == v).count(), 1);
		}
	}

	#[test]
	fn same_seed_same_layout() {
		let vertices = geodesic_vertices(6.0, 2);
		let ids = ids(22);
		let a = place(&ids, &vertices, &mut StdRng::seed_from_u64(42)).unwrap();
		let b = place(&ids, &vertices, &mut StdRng::seed_from_u64(42)).unwrap();
		for id in &ids {
			assert_eq!(a.position(id.as_str()), b.position(id.as_str()));
		}
	}

	#[test]
	fn empty_input_needs_no_vertices() {
		let layout = place(&ids(0), &[], &mut StdRng::seed_from_u64(0)).unwrap();
		assert!(layout.is_empty());
	}
}
