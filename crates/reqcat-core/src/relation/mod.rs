//! Staging of typed relations between entities before submission.

mod edge;
mod stager;

pub use edge::{parse_positive, ClientId, EdgeField, PersistableRelation, RelationEdge};
pub use stager::RelationStager;
