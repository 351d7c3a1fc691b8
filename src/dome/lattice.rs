//! Geodesic vertex pool.
//!
//! The lattice is only a set of candidate positions. Faces of a regular
//! icosahedron are split into `(detail + 1)^2` triangles, every corner is pushed
//! out onto the sphere, and corners shared between neighbouring faces are
//! merged, leaving `10 * (detail + 1)^2 + 2` distinct points.

/// A point in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
	/// X coordinate.
	pub x: f32,
	/// Y coordinate, up.
	pub y: f32,
	/// Z coordinate.
	pub z: f32,
}

impl Point3 {
	/// Point at `(x, y, z)`.
	pub const fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Self) -> f32 {
		let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
		(dx * dx + dy * dy + dz * dz).sqrt()
	}
}

const FACES: [[usize; 3]; 20] = [
	[0, 11, 5],
	[0, 5, 1],
	[0, 1, 7],
	[0, 7, 10],
	[0, 10, 11],
	[1, 5, 9],
	[5, 11, 4],
	[11, 10, 2],
	[10, 7, 6],
	[7, 1, 8],
	[3, 9, 4],
	[3, 4, 2],
	[3, 2, 6],
	[3, 6, 8],
	[3, 8, 9],
	[4, 9, 5],
	[2, 4, 11],
	[6, 2, 10],
	[8, 6, 7],
	[9, 8, 1],
];

// Two corners closer than this on the unit sphere are the same vertex.
const MERGE_EPSILON: f64 = 1e-6;

type Vec3 = [f64; 3];

fn base_vertices() -> [Vec3; 12] {
	let t = (1.0 + 5f64.sqrt()) / 2.0;
	[
		[-1.0, t, 0.0],
		[1.0, t, 0.0],
		[-1.0, -t, 0.0],
		[1.0, -t, 0.0],
		[0.0, -1.0, t],
		[0.0, 1.0, t],
		[0.0, -1.0, -t],
		[0.0, 1.0, -t],
		[t, 0.0, -1.0],
		[t, 0.0, 1.0],
		[-t, 0.0, -1.0],
		[-t, 0.0, 1.0],
	]
}

fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
	[
		a[0] + (b[0] - a[0]) * t,
		a[1] + (b[1] - a[1]) * t,
		a[2] + (b[2] - a[2]) * t,
	]
}

fn normalize(v: Vec3) -> Vec3 {
	let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
	[v[0] / len, v[1] / len, v[2] / len]
}

fn push_unique(pool: &mut Vec<Vec3>, v: Vec3) {
	let v = normalize(v);
	let seen = pool.iter().any(|p| {
		let (dx, dy, dz) = (p[0] - v[0], p[1] - v[1], p[2] - v[2]);
		dx * dx + dy * dy + dz * dz < MERGE_EPSILON * MERGE_EPSILON
	});
	if !seen {
		pool.push(v);
	}
}

/// Distinct vertices of an icosphere with the given radius and detail level.
///
/// Order is stable for a given `detail`, which keeps seeded layouts
/// reproducible.
pub fn geodesic_vertices(radius: f32, detail: u32) -> Vec<Point3> {
	let base = base_vertices();
	let cols = detail as usize + 1;
	let mut pool: Vec<Vec3> = Vec::with_capacity(10 * cols * cols + 2);

	for [ia, ib, ic] in FACES {
		let (a, b, c) = (base[ia], base[ib], base[ic]);
		for i in 0..=cols {
			let aj = lerp(a, c, i as f64 / cols as f64);
			let bj = lerp(b, c, i as f64 / cols as f64);
			let rows = cols - i;
			if rows == 0 {
				push_unique(&mut pool, aj);
				continue;
			}
			for j in 0..=rows {
				push_unique(&mut pool, lerp(aj, bj, j as f64 / rows as f64));
			}
		}
	}

	let r = radius as f64;
	pool.into_iter()
		.map(|v| Point3::new((v[0] * r) as f32, (v[1] * r) as f32, (v[2] * r) as f32))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn vertex_counts_follow_the_geodesic_formula() {
		for detail in 0..4u32 {
			let n = (detail + 1) as usize;
			assert_eq!(geodesic_vertices(1.0, detail).len(), 10 * n * n + 2, "detail {detail}");
		}
	}

	#[test]
	fn every_vertex_sits_on_the_sphere() {
		for v in geodesic_vertices(6.0, 2) {
			let len = v.distance(Point3::default());
			assert!((len - 6.0).abs() < 1e-4, "{v:?} is {len} from the origin");
		}
	}

	#[test]
	fn vertices_are_pairwise_distinct() {
		let vs = geodesic_vertices(6.0, 2);
		for (i, a) in vs.iter().enumerate() {
			for b in &vs[i + 1..] {
				assert!(a.distance(*b) > 0.1);
			}
		}
	}
}
