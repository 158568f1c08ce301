/// Split `0..ntot` into contiguous, non-overlapping intervals, one per
/// part.
///
/// Every part gets `ntot / nparts` elements and the last one also
/// takes the remainder. The number of parts is capped by `ntot`, so no
/// interval is empty.
///
/// * `ntot` - number of total elements
/// * `nparts` - number of parts (E.g., workers)
pub fn partition_contiguous(ntot: usize, nparts: usize) -> Vec<(usize, usize)> {
    if ntot == 0 {
        return vec![];
    }
    let nparts = nparts.clamp(1, ntot);
    let size = ntot / nparts;
    (0..nparts)
        .map(|b| {
            let lb = b * size;
            let ub = if b + 1 == nparts { ntot } else { lb + size };
            (lb, ub)
        })
        .collect()
}
