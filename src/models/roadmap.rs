//! Static curriculum roadmap: phase headers followed by their topics.
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub title: &'static str,
    pub progress: u8,
    pub is_phase: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub title: &'static str,
    pub items: Vec<Step>,
}

const fn phase(title: &'static str) -> Step {
    Step { title, progress: 0, is_phase: true }
}

const fn topic(title: &'static str) -> Step {
    Step { title, progress: 0, is_phase: false }
}

const STEPS: [Step; 17] = [
    phase("Phase 1: The Basics (The Language of Efficiency)"),
    topic("Big O Notation (Time & Space Complexity)"),
    topic("Memory Management (Stack vs. Heap, Reference vs. Value)"),
    topic("Basic Arrays & Strings (Under the hood)"),
    phase("Phase 2: Linear Data Structures (The Toolbox)"),
    topic("Hash Maps (Collision handling, internal logic)"),
    topic("Two Pointers & Sliding Window"),
    topic("Linked Lists"),
    topic("Stacks & Queues"),
    phase("Phase 3: Non-Linear Data Structures (The Major League)"),
    topic("Recursion & Backtracking"),
    topic("Trees (Binary, BST, Heaps)"),
    topic("Graphs (BFS, DFS, Topo Sort)"),
    phase("Phase 4: Optimization (The Boss Battles)"),
    topic("Dynamic Programming"),
    topic("Greedy Algorithms"),
    topic("Bit Manipulation"),
];

pub fn steps() -> &'static [Step] {
    &STEPS
}

/// Groups topics under the phase header that precedes them.
pub fn phases() -> Vec<Phase> {
    let mut phases: Vec<Phase> = Vec::new();
    for step in steps() {
        if step.is_phase {
            phases.push(Phase { title: step.title, items: Vec::new() });
        } else if let Some(current) = phases.last_mut() {
            current.items.push(*step);
        }
    }
    phases
}

/// Phases laid out two per row.
pub fn rows() -> Vec<Vec<Phase>> {
    phases().chunks(2).map(<[Phase]>::to_vec).collect()
}
