//! One-axis space distribution shared by the flex and grid containers.

/// Size of one flex child or one grid column/row.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Sizing {
    /// An absolute number of cells.
    Fixed(i32),
    /// A share of whatever the fixed entries leave over.
    Proportional(i32),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Proportional(1)
    }
}

/// Split `total` cells across `sizes`.
///
/// Fixed entries get their size. The remaining space (never below zero) is divided by
/// weight, each proportional entry getting `floor(remaining * weight / total_weight)`;
/// the truncation leftover goes to the last proportional entry so that, whenever one
/// exists and the fixed entries fit, the extents add up to exactly `total`.
/// Negative sizes and weights are treated as zero.
pub fn distribute(sizes: &[Sizing], total: i32) -> Vec<i32> {
    let mut reserved: i64 = 0;
    let mut total_weight: i64 = 0;
    let mut last_proportional = None;
    for (idx, size) in sizes.iter().enumerate() {
        match *size {
            Sizing::Fixed(cells) => reserved += i64::from(cells.max(0)),
            Sizing::Proportional(weight) => {
                total_weight += i64::from(weight.max(0));
                last_proportional = Some(idx);
            }
        }
    }

    let remaining = (i64::from(total) - reserved).max(0);
    let mut extents: Vec<i32> = sizes
        .iter()
        .map(|size| match *size {
            Sizing::Fixed(cells) => cells.max(0),
            Sizing::Proportional(weight) if total_weight > 0 => {
                (remaining * i64::from(weight.max(0)) / total_weight) as i32
            }
            Sizing::Proportional(_) => 0,
        })
        .collect();

    if let Some(last) = last_proportional {
        let handed_out: i64 = sizes
            .iter()
            .zip(extents.iter())
            .filter(|(size, _)| matches!(size, Sizing::Proportional(_)))
            .map(|(_, extent)| i64::from(*extent))
            .sum();
        extents[last] += (remaining - handed_out) as i32;
    }

    extents
}

/// Start offset of every entry given the extents from [`distribute`].
pub fn offsets(extents: &[i32]) -> Vec<i32> {
    let mut offset = 0;
    extents
        .iter()
        .map(|extent| {
            let start = offset;
            offset += extent;
            start
        })
        .collect()
}
