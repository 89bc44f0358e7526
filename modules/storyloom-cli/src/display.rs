//! Console rendering for stories and evaluations.

use console::style;
use storyloom_common::{Evaluation, FileConfig};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn welcome(config: &FileConfig) {
    println!("{}", rule());
    println!(
        "{}",
        style("Welcome to the Bedtime Story Generator for Ages 5-10!")
            .cyan()
            .bold()
    );
    println!("I create personalized bedtime stories with quality evaluation.");
    println!("You can provide feedback to improve any story!");
    println!("Type 'quit' to exit.");
    println!("{}", rule());

    println!("\nAvailable story types:");
    for category in &config.categories {
        let mut keywords = category
            .keywords
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if category.keywords.len() > 3 {
            keywords.push_str(", and more...");
        }
        println!("  • {}: {}", title_case(&category.name), keywords);
    }

    println!("\nExample story requests you can try:");
    println!("  • 'Tell me a story about a brave lion who helps other animals'");
    println!("  • 'Create a story about a little girl who finds a magical garden'");
    println!("  • 'Tell me about a family that bakes cookies on a rainy day'");
    println!("  • 'A sleepy cat getting ready for bed'");
    let names = config
        .categories
        .iter()
        .map(|category| format!("'{}'", category.name))
        .collect::<Vec<_>>()
        .join(", ");
    println!("  • Or simply type: {names}");
    println!();
}

pub fn story(text: &str, heading: &str) {
    println!("{}", rule());
    println!("{}", style(heading).cyan().bold());
    println!("{}", rule());
    println!("\n{text}\n");
}

pub fn evaluation(evaluation: &Evaluation, category_label: &str, config: &FileConfig) {
    if !config.display.show_detailed_metrics {
        println!("Story Category: {}", title_case(category_label));
        println!("Overall Score: {:.0}/100", evaluation.overall_score);
        return;
    }

    println!("{}", rule());
    println!("{}", style("BEDTIME STORY EVALUATION").cyan().bold());
    println!("{}", rule());
    println!("Story Category: {}", title_case(category_label));
    println!("LLM Judge Evaluation:");
    for (name, score) in evaluation.llm_judge.named_scores() {
        println!("   {}: {:.0}/100", title_case(name), score);
    }
    println!("   Overall Score: {:.0}/100", evaluation.overall_score);
    if evaluation.judgment_source.is_fallback() {
        println!(
            "   {}",
            style("(judge unavailable, default scores substituted)").dim()
        );
    }

    let rating = rating_label(
        evaluation.composite_score,
        config.evaluation.thresholds.min_composite_score,
    );
    println!("\nComprehensive Metrics ({rating}):");
    let metrics = &evaluation.metrics;
    let breakdown = &evaluation.component_breakdown;
    println!("   • Text predictability: {:.1}/100", breakdown.predictability);
    println!("   • Vocabulary richness: {:.1}%", metrics.vocabulary_richness);
    println!("   • Reading level: Grade {:.2}", metrics.grade_level);
    println!("   • Content safety: {:.1}/100", breakdown.safety);
    println!("   • Composite Score: {:.1}/100", evaluation.composite_score);
    println!(
        "\nStory Length: {} words (target: {}-{})",
        metrics.word_count, config.story.min_word_count, config.story.max_word_count
    );
    println!("{}", rule());
}

/// Rating shown beside the composite score.
pub fn rating_label(composite: f64, min_composite: f64) -> &'static str {
    if composite >= 90.0 {
        "Excellent"
    } else if composite >= min_composite + 10.0 {
        "Very Good"
    } else if composite >= min_composite {
        "Good"
    } else {
        "Needs Improvement"
    }
}

fn title_case(key: &str) -> String {
    key.split(['_', ' '])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bands_follow_the_composite_threshold() {
        assert_eq!(rating_label(95.0, 70.0), "Excellent");
        assert_eq!(rating_label(85.0, 70.0), "Very Good");
        assert_eq!(rating_label(72.0, 70.0), "Good");
        assert_eq!(rating_label(50.0, 70.0), "Needs Improvement");
    }

    #[test]
    fn rating_band_edges_are_inclusive() {
        assert_eq!(rating_label(90.0, 70.0), "Excellent");
        assert_eq!(rating_label(80.0, 70.0), "Very Good");
        assert_eq!(rating_label(70.0, 70.0), "Good");
    }

    #[test]
    fn title_case_handles_snake_and_spaces() {
        assert_eq!(title_case("age_appropriateness"), "Age Appropriateness");
        assert_eq!(title_case("bedtime suitability"), "Bedtime Suitability");
        assert_eq!(title_case("animals"), "Animals");
    }
}
