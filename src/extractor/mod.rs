/// Names introduced by a leading WITH clause.
pub mod cte;
/// Object references following FROM and JOIN, subqueries included.
pub mod tables;
