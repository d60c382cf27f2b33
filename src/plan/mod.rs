mod assignment;
mod io;
mod plan;
mod validate;

pub use assignment::{name_parts, Assignment, Constituency};
pub use plan::Plan;
pub use validate::{SeatAllocation, ValidationReport, Validator};
