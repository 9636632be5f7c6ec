//! Routing DTOs
//!
//! Requests in (party, classifier payload), options and events out.

pub mod assignment;
pub mod event;
pub mod option;
pub mod prediction;
pub mod request;

pub use assignment::AssignmentRecord;
pub use event::{FloorEvent, FloorEventPayload};
pub use option::{CommitResponse, RoutingOption, RoutingResponse, RoutingStatus};
pub use prediction::{PredictionPayload, TablePrediction};
pub use request::PartyRequest;
