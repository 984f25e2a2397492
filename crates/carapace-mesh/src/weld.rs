//! Merge-by-distance vertex welding.
//!
//! Bins vertices into a uniform grid with cell size equal to the weld
//! epsilon and merges each vertex into the first earlier vertex within
//! epsilon, scanning the 27 surrounding cells. Runs after deletion to
//! close the seams face removal leaves behind.

use std::collections::HashMap;

use crate::edit::compact;
use crate::mesh::PolyMesh;

/// Merges vertices closer than `epsilon`, returning the welded mesh and
/// the number of vertices merged away.
///
/// Faces whose vertices collapse below 3 distinct indices are dropped;
/// vertices left unreferenced by the dropped faces are compacted away.
/// First-wins: a merged vertex takes the position of its earliest
/// representative, which keeps the operation deterministic.
pub fn weld_vertices(mesh: &PolyMesh, epsilon: f32) -> (PolyMesh, usize) {
    let epsilon = epsilon.max(1.0e-12);
    let inv_cell = 1.0 / epsilon;

    // Cell key → representative vertex indices (into the source mesh).
    let mut grid: HashMap<(i32, i32, i32), Vec<u32>> = HashMap::new();
    // Source vertex → representative source vertex.
    let mut representative: Vec<u32> = Vec::with_capacity(mesh.vertex_count());
    let mut merged = 0usize;

    for i in 0..mesh.vertex_count() {
        let p = mesh.position_vec3(i);
        let cx = (p.x * inv_cell).floor() as i32;
        let cy = (p.y * inv_cell).floor() as i32;
        let cz = (p.z * inv_cell).floor() as i32;

        let mut found = None;
        'search: for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                for dz in -1..=1_i32 {
                    if let Some(cell) = grid.get(&(cx + dx, cy + dy, cz + dz)) {
                        for &rep in cell {
                            if mesh.position_vec3(rep as usize).distance(p) <= epsilon {
                                found = Some(rep);
                                break 'search;
                            }
                        }
                    }
                }
            }
        }

        match found {
            Some(rep) => {
                representative.push(rep);
                merged += 1;
            }
            None => {
                representative.push(i as u32);
                grid.entry((cx, cy, cz)).or_default().push(i as u32);
            }
        }
    }

    // Remap faces onto representatives, dropping collapsed faces.
    let mut faces: Vec<Vec<u32>> = Vec::with_capacity(mesh.face_count());
    for f in 0..mesh.face_count() {
        let mut mapped: Vec<u32> = mesh
            .face(f)
            .iter()
            .map(|&v| representative[v as usize])
            .collect();

        // Remove cyclically repeated indices left by the merge.
        mapped.dedup();
        while mapped.len() > 1 && mapped.first() == mapped.last() {
            mapped.pop();
        }

        let mut distinct = mapped.clone();
        distinct.sort_unstable();
        distinct.dedup();
        // A face that still repeats an index after the merge (a bowtie
        // collapse) is dropped along with the fully collapsed ones.
        if distinct.len() >= 3 && distinct.len() == mapped.len() {
            faces.push(mapped);
        }
    }

    (compact(mesh, &faces), merged)
}
