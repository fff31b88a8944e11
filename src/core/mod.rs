pub mod cache;
pub mod clock;
pub mod fetcher;

pub use crate::domain::model::{EscalationPolicy, EscalationPolicyPage};
pub use crate::domain::ports::{Clock, HttpGetter};
pub use crate::utils::error::Result;
