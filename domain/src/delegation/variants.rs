//! Task variant generation.
//!
//! One task becomes one prompt per agent, each asking for a different
//! analytical angle. Counts 2 to 5 use hand-written angle tables; larger counts
//! cycle through [`GENERIC_APPROACHES`].

/// Angles cycled for agent counts without a dedicated table
pub const GENERIC_APPROACHES: [&str; 8] = [
    "Strategic planning",
    "Technical implementation",
    "Risk assessment",
    "Resource management",
    "Timeline planning",
    "Quality assurance",
    "Stakeholder analysis",
    "Budget considerations",
];

/// Labels for agent counts that have a dedicated table
fn labeled_angles(agent_count: usize) -> Option<&'static [&'static str]> {
    match agent_count {
        2 => Some(&[
            "Approach 1 - Strategic perspective",
            "Approach 2 - Implementation focus",
        ]),
        3 => Some(&[
            "Strategic analysis approach",
            "Technical implementation approach",
            "Risk assessment and mitigation approach",
        ]),
        4 => Some(&[
            "Strategic planning perspective",
            "Technical implementation details",
            "Risk analysis and contingencies",
            "Resource requirements and timeline",
        ]),
        5 => Some(&[
            "Strategic overview and goals",
            "Technical architecture and implementation",
            "Risk management and quality assurance",
            "Resource planning and budget considerations",
            "Timeline, milestones, and success metrics",
        ]),
        _ => None,
    }
}

/// Split a task into `agent_count` prompts.
///
/// A count of 1 (or 0) returns the task verbatim as the only variant.
pub fn task_variants(task: &str, agent_count: usize) -> Vec<String> {
    if agent_count <= 1 {
        return vec![task.to_string()];
    }

    if let Some(labels) = labeled_angles(agent_count) {
        return labels
            .iter()
            .map(|label| format!("{}: {}", label, task))
            .collect();
    }

    (0..agent_count)
        .map(|i| {
            let approach = GENERIC_APPROACHES[i % GENERIC_APPROACHES.len()];
            format!("{} approach: {}", approach, task)
        })
        .collect()
}
