// ABOUTME: Coordinator module for limiting agent resource use.
// ABOUTME: Contains the per-request call budget.

mod call_budget;

pub use call_budget::CallBudget;
