//! Encouraging variant of the recommendation text: a tiered opening line,
//! then strengths, weaknesses and a short numbered action plan.

use crate::models::analysis::{Breakdown, Category, CategoryScore, Gap, GapCategory};

const STRENGTH_PERCENT: f64 = 80.0;
const WEAKNESS_PERCENT: f64 = 50.0;
const ACTION_PLAN_STEPS: usize = 3;

pub fn opening_line(percentage: f64) -> String {
    let line = if percentage >= 80.0 {
        "Excellent match! You are a strong candidate for this position"
    } else if percentage >= 60.0 {
        "Good match! With a few improvements you will stand out"
    } else if percentage >= 40.0 {
        "A solid starting point. Closing a few gaps will raise your chances noticeably"
    } else {
        "Every expert started somewhere. Use this analysis as your roadmap"
    };
    format!("{line} ({percentage:.1}% compatibility)")
}

/// Strengths, weaknesses and the numbered action plan, one line each.
pub fn summary_lines(breakdown: &Breakdown, gaps: &[Gap]) -> Vec<String> {
    let mut lines = Vec::new();

    let strengths: Vec<&str> = breakdown
        .iter()
        .filter(|(_, c)| !c.not_specified && c.percentage >= STRENGTH_PERCENT)
        .map(|(category, _)| category.label())
        .collect();
    if !strengths.is_empty() {
        lines.push(format!("Strengths: {}", strengths.join(", ")));
    }

    let weaknesses: Vec<String> = breakdown
        .iter()
        .filter(|(_, c)| !c.not_specified && c.percentage < WEAKNESS_PERCENT)
        .map(|(category, score)| describe_weakness(category, score, gaps))
        .collect();
    if !weaknesses.is_empty() {
        lines.push(format!("Areas to improve: {}", weaknesses.join("; ")));
    }

    lines.push("Action plan:".to_string());
    let steps: Vec<String> = gaps
        .iter()
        .flat_map(|gap| gap.items.iter().map(move |item| step_for(gap.category, item)))
        .take(ACTION_PLAN_STEPS)
        .collect();
    if steps.is_empty() {
        lines.push("1. Keep developing your skills and gaining hands-on experience".to_string());
        lines.push("2. Keep your resume up to date as your experience grows".to_string());
    } else {
        lines.extend(
            steps
                .into_iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {step}", i + 1)),
        );
    }

    lines
}

/// Skill categories name their own missing skills; experience and education
/// name the items of the matching gap.
fn describe_weakness(category: Category, score: &CategoryScore, gaps: &[Gap]) -> String {
    let items: Vec<&str> = match category {
        Category::RequiredSkills | Category::PreferredSkills | Category::SoftSkills => {
            score.missing_skills.iter().map(String::as_str).collect()
        }
        Category::Experience | Category::Education => gaps
            .iter()
            .filter(|gap| gap.category.categories().contains(&category))
            .flat_map(|gap| gap.items.iter().map(String::as_str))
            .collect(),
    };
    if items.is_empty() {
        category.label().to_string()
    } else {
        format!("{} ({})", category.label(), items.join(", "))
    }
}

fn step_for(category: GapCategory, item: &str) -> String {
    match category {
        GapCategory::Skills => format!("Learn {item}"),
        GapCategory::Experience | GapCategory::Education => item.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(max: f64, percentage: f64, not_specified: bool) -> CategoryScore {
        CategoryScore {
            score: max * percentage / 100.0,
            max,
            percentage,
            details: vec![],
            matching_skills: vec![],
            missing_skills: vec![],
            not_specified,
        }
    }

    fn breakdown() -> Breakdown {
        let mut preferred = score(30.0, 0.0, false);
        preferred.missing_skills = vec!["Kubernetes".to_string(), "AWS".to_string()];
        Breakdown {
            required_skills: score(50.0, 66.67, false),
            preferred_skills: preferred,
            experience: score(10.0, 100.0, false),
            education: score(5.0, 0.0, true),
            soft_skills: score(5.0, 100.0, false),
        }
    }

    #[test]
    fn test_opening_line_tiers() {
        assert!(opening_line(80.0).starts_with("Excellent match"));
        assert!(opening_line(79.99).starts_with("Good match"));
        assert!(opening_line(40.0).starts_with("A solid starting point"));
        assert!(opening_line(12.0).starts_with("Every expert"));
        assert!(opening_line(53.33).ends_with("(53.3% compatibility)"));
    }

    #[test]
    fn test_strengths_and_weaknesses() {
        let gaps = vec![Gap {
            category: GapCategory::Skills,
            items: vec!["Docker".to_string(), "Kubernetes".to_string(), "AWS".to_string()],
            description: String::new(),
        }];
        let lines = summary_lines(&breakdown(), &gaps);

        assert_eq!(lines[0], "Strengths: Work experience, Soft skills");
        // Education is not_specified and stays out of both lists.
        // Docker is missing from the required tier, not the preferred one.
        assert_eq!(lines[1], "Areas to improve: Preferred skills (Kubernetes, AWS)");
        assert_eq!(lines[2], "Action plan:");
        assert_eq!(lines[3], "1. Learn Docker");
        assert_eq!(lines[4], "2. Learn Kubernetes");
        assert_eq!(lines[5], "3. Learn AWS");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_experience_weakness_names_gap_items() {
        let mut breakdown = breakdown();
        breakdown.experience = score(10.0, 30.0, false);
        let gaps = vec![
            Gap {
                category: GapCategory::Skills,
                items: vec!["Docker".to_string()],
                description: String::new(),
            },
            Gap {
                category: GapCategory::Experience,
                items: vec!["Gain 2 more years of experience".to_string()],
                description: String::new(),
            },
        ];
        let lines = summary_lines(&breakdown, &gaps);
        assert_eq!(
            lines[1],
            "Areas to improve: Preferred skills (Kubernetes, AWS); \
             Work experience (Gain 2 more years of experience)"
        );
    }

    #[test]
    fn test_action_plan_capped_at_three() {
        let gaps = vec![
            Gap {
                category: GapCategory::Skills,
                items: vec!["A".into(), "B".into(), "C".into()],
                description: String::new(),
            },
            Gap {
                category: GapCategory::Education,
                items: vec!["Education details are not provided".into()],
                description: String::new(),
            },
        ];
        let lines = summary_lines(&breakdown(), &gaps);
        let steps: Vec<&String> = lines.iter().filter(|l| l.starts_with(char::is_numeric)).collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], "3. Learn C");
    }

    #[test]
    fn test_generic_plan_without_gaps() {
        let lines = summary_lines(&breakdown(), &[]);
        assert!(lines.contains(&"Action plan:".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("1. Keep developing")));
        assert!(lines.iter().any(|l| l.starts_with("2. Keep your resume")));
    }
}
