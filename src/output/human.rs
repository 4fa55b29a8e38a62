//! Human-readable output formatting

use crate::index::IndexedProject;
use crate::trace::WalkthroughStep;

/// Format an index summary for human consumption
pub fn format_index(project: &IndexedProject) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({})\n", project.name, project.root.display()));
    output.push_str(&format!("  {}\n", project.stats()));

    let join = |items: Vec<String>| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    output.push_str(&format!(
        "  languages:    {}\n",
        join(project.languages.iter().map(|l| l.to_string()).collect())
    ));
    output.push_str(&format!(
        "  frameworks:   {}\n",
        join(project.frameworks.iter().cloned().collect())
    ));
    output.push_str(&format!(
        "  entry points: {}\n",
        join(project.entry_points.clone())
    ));

    output
}

/// Format trace steps for human consumption
pub fn format_steps(question: &str, steps: &[WalkthroughStep], total: usize) -> String {
    let mut output = String::new();

    if total == 0 {
        output.push_str(&format!("No relevant code found for '{}'\n", question));
        return output;
    }

    output.push_str(&format!(
        "Walkthrough for '{}' ({} of {} steps)\n\n",
        question,
        steps.len(),
        total
    ));

    for step in steps {
        // Header: index. path:lines
        output.push_str(&format!(
            "{}. {}:{}-{}\n",
            step.index + 1,
            step.file,
            step.start_line(),
            step.end_line()
        ));
        output.push_str(&format!("   {}\n", step.explanation));
        output.push_str(&format!("   why: {}\n", step.why_relevant));
        if !step.links_to.is_empty() {
            output.push_str(&format!("   links: {}\n", step.links_to.join(", ")));
        }

        for (i, line) in step.code.lines().enumerate() {
            let truncated: String = if line.chars().count() > 100 {
                format!("{}...", line.chars().take(97).collect::<String>())
            } else {
                line.to_string()
            };
            output.push_str(&format!("   {:>4} | {}\n", step.start_line() + i, truncated));
        }

        output.push('\n');
    }

    output
}
