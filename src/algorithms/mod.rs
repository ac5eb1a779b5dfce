pub mod sparse_q;
pub mod variable_elimination;

pub use sparse_q::{LearnerConfig, LearnerError, SparseCooperativeQLearning};
pub use variable_elimination::{EliminationOrder, Solution, VariableElimination};
