use serde::Serialize;

use crate::models::SkillGap;

/// A skill gap with its bar length relative to the most demanded gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGap {
    pub skill: String,
    pub demand: u32,
    /// `demand / max_demand`, or 0 when every demand is 0.
    pub proportion: f64,
    pub suggestion: Option<String>,
}

/// Orders gaps by demand (descending), then skill name, and attaches display proportions.
pub fn rank_skill_gaps(gaps: &[SkillGap]) -> Vec<RankedGap> {
    let max_demand = gaps.iter().map(|g| g.demand).max().unwrap_or(0);

    let mut ranked: Vec<RankedGap> = gaps
        .iter()
        .map(|gap| RankedGap {
            skill: gap.skill.clone(),
            demand: gap.demand,
            proportion: if max_demand == 0 {
                0.0
            } else {
                f64::from(gap.demand) / f64::from(max_demand)
            },
            suggestion: gap.suggestion.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| b.demand.cmp(&a.demand).then_with(|| a.skill.cmp(&b.skill)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(skill: &str, demand: u32) -> SkillGap {
        SkillGap {
            skill: skill.to_string(),
            demand,
            suggestion: None,
        }
    }

    #[test]
    fn test_proportions_relative_to_max() {
        let ranked = rank_skill_gaps(&[gap("sql", 2), gap("python", 4), gap("excel", 1)]);
        let view: Vec<_> = ranked.iter().map(|g| (g.skill.as_str(), g.proportion)).collect();
        assert_eq!(view, vec![("python", 1.0), ("sql", 0.5), ("excel", 0.25)]);
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let ranked = rank_skill_gaps(&[gap("teaching", 3), gap("cooking", 3)]);
        assert_eq!(ranked[0].skill, "cooking");
        assert_eq!(ranked[1].skill, "teaching");
    }

    #[test]
    fn test_all_zero_demand_never_divides() {
        let ranked = rank_skill_gaps(&[gap("a", 0), gap("b", 0)]);
        assert!(ranked.iter().all(|g| g.proportion == 0.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_skill_gaps(&[]).is_empty());
    }
}
