use std::collections::{BTreeMap, BTreeSet};

use super::model::ReleaseCount;

// ---------------------------------------------------------------------------
// Stacked area series
// ---------------------------------------------------------------------------

/// One platform's band in the stacked release chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSeries {
    pub platform: String,
    /// `[year, lower, upper]` per year, ascending.
    pub points: Vec<[f64; 3]>,
}

impl AreaSeries {
    /// Releases contributed by this platform at each year.
    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|[_, lo, hi]| hi - lo)
    }
}

/// Stack release counts into per-platform bands.
///
/// Platforms are stacked in sorted order. Every series has a point for each
/// year that appears in `counts`; a platform with no releases that year
/// gets a zero-height band so the areas stay continuous.
pub fn stack_release_counts(counts: &[ReleaseCount]) -> Vec<AreaSeries> {
    let years: BTreeSet<i32> = counts.iter().map(|c| c.year).collect();
    let mut by_platform: BTreeMap<&str, BTreeMap<i32, usize>> = BTreeMap::new();
    for c in counts {
        *by_platform
            .entry(c.platform.as_str())
            .or_default()
            .entry(c.year)
            .or_default() += c.count;
    }

    let mut baseline: BTreeMap<i32, f64> = years.iter().map(|&y| (y, 0.0)).collect();

    by_platform
        .into_iter()
        .map(|(platform, per_year)| {
            let points = baseline
                .iter_mut()
                .map(|(&year, base)| {
                    let lower = *base;
                    let upper = lower + per_year.get(&year).copied().unwrap_or(0) as f64;
                    *base = upper;
                    [year as f64, lower, upper]
                })
                .collect();
            AreaSeries {
                platform: platform.to_string(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(year: i32, platform: &str, count: usize) -> ReleaseCount {
        ReleaseCount {
            year,
            platform: platform.to_string(),
            count,
        }
    }

    #[test]
    fn empty_counts_give_no_series() {
        assert!(stack_release_counts(&[]).is_empty());
    }

    #[test]
    fn bands_stack_in_platform_order() {
        let series = stack_release_counts(&[
            count(2005, "X", 2),
            count(2005, "Y", 1),
            count(2006, "Y", 1),
            count(2007, "X", 1),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].platform, "X");
        assert_eq!(
            series[0].points,
            vec![[2005.0, 0.0, 2.0], [2006.0, 0.0, 0.0], [2007.0, 0.0, 1.0]]
        );
        assert_eq!(series[1].platform, "Y");
        assert_eq!(
            series[1].points,
            vec![[2005.0, 2.0, 3.0], [2006.0, 0.0, 1.0], [2007.0, 1.0, 1.0]]
        );
    }

    #[test]
    fn top_band_equals_yearly_totals() {
        let counts = vec![
            count(2001, "PS2", 5),
            count(2001, "GBA", 3),
            count(2002, "XB", 4),
            count(2003, "PS2", 1),
            count(2003, "XB", 2),
        ];
        let series = stack_release_counts(&counts);
        let top = series.last().map(|s| s.points.clone()).unwrap_or_default();

        let totals: Vec<f64> = top.iter().map(|p| p[2]).collect();
        assert_eq!(totals, vec![8.0, 4.0, 3.0]);

        let heights: f64 = series.iter().flat_map(|s| s.heights()).sum();
        assert_eq!(heights, 15.0);
    }
}
