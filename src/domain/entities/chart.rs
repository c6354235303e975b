use std::collections::HashMap;

pub const TOP_STACKS: usize = 10;
pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Pie,
    Donut,
    Bar,
    HorizontalBar,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Bar,
        ChartKind::HorizontalBar,
        ChartKind::Histogram,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie Chart",
            ChartKind::Donut => "Donut Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::HorizontalBar => "Horizontal Bar Chart",
            ChartKind::Histogram => "Histogram",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackCount {
    pub stack: String,
    pub count: u64,
}

/// Counts duplicates; most common first, ties keep first-seen order.
pub fn stack_counts(stacks: &[String]) -> Vec<StackCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<StackCount> = Vec::new();
    for stack in stacks {
        match positions.get(stack.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(stack.as_str(), counts.len());
                counts.push(StackCount {
                    stack: stack.clone(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps insertion order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn most_common(stacks: &[String], n: usize) -> Vec<StackCount> {
    let mut counts = stack_counts(stacks);
    counts.truncate(n);
    counts
}

/// Percentage share of each entry, in the same order.
pub fn share_percent(counts: &[StackCount]) -> Vec<f64> {
    let total: u64 = counts.iter().map(|entry| entry.count).sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .map(|entry| entry.count as f64 * 100.0 / total as f64)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub frequency: u64,
}

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
pub fn histogram_bins(values: &[u64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().min().unwrap_or(0) as f64;
    let max = values.iter().copied().max().unwrap_or(0) as f64;
    let (lower, upper) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (upper - lower) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|idx| HistogramBin {
            lower: lower + width * idx as f64,
            upper: lower + width * (idx + 1) as f64,
            frequency: 0,
        })
        .collect();

    for value in values {
        let idx = (((*value as f64) - lower) / width).floor() as usize;
        result[idx.min(bins - 1)].frequency += 1;
    }

    result
}
