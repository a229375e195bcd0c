use shadow_rs::shadow;

shadow!(build);

// Search space
// ------------
pub mod cost;
pub mod graph;
pub mod problem;
pub mod space;

// Engine
// ------
pub mod best_first;
pub mod frontier;
pub mod search;

// Strategies
// ----------
pub mod astar;
pub mod greedy;

// Capitals problem and reporting
// ------------------------------
pub mod states;
pub mod report;
