pub mod record_ctx;
pub mod requisite_flow;

pub use record_ctx::RecordCtx;
pub use requisite_flow::RequisiteFlow;
