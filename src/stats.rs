use std::collections::BTreeMap;

/// Exact median of a set of values.
///
/// Even-length inputs average the two middle values. Returns `None` when empty
/// or when the median is not a finite number.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        // Halve first so two large values cannot overflow
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    };
    median.is_finite().then_some(median)
}

/// Frequency table of string values, kept in sorted order
#[derive(Debug, Clone, Default)]
pub struct ValueCounts {
    counts: BTreeMap<String, u64>,
}

impl ValueCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count += 1;
        } else {
            self.counts.insert(value.to_string(), 1);
        }
    }

    /// Most frequent value. Ties go to the value that sorts first.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (value, &count) in &self.counts {
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((value.as_str(), count)),
            }
        }
        best.map(|(value, _)| value)
    }
}

impl<'a> FromIterator<&'a str> for ValueCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for value in iter {
            counts.add(value);
        }
        counts
    }
}
