pub mod checklist;
pub mod evaluator;
