//! Projection onto the per-infoset "sums to one" tangent space.

/// Project `v` onto the subspace where every block sums to zero.
///
/// `v` is split into consecutive blocks of `lengths[i]` entries, one block
/// per infoset, and the mean of each block is subtracted from its entries.
/// A search direction treated this way keeps every infoset's probabilities
/// summing to the same total.
///
/// # Panics
/// Panics if the lengths add up to more than `v.len()`.
pub fn project(v: &mut [f64], lengths: &[usize]) {
    let mut start = 0;
    for &len in lengths {
        if len == 0 {
            continue;
        }
        let block = &mut v[start..start + len];
        let mean = block.iter().sum::<f64>() / len as f64;
        for x in block.iter_mut() {
            *x -= mean;
        }
        start += len;
    }
}
