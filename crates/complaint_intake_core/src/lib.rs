pub mod domain;
pub mod generator;
pub mod ports;

pub use domain::{
    ComplaintDetails, ComplaintRecord, ComplaintStatus, GenerationResult, Language, Letter,
    NewComplaint, ParseTagError,
};
pub use generator::{ComplaintGenerator, GenerationError};
pub use ports::{ComplaintStore, CompletionService, PortError, PortResult};
