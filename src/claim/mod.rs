//! Claim status codes and claim pricing.

pub mod cost;
pub mod status;

pub use cost::{claim, claim_status, cost, ClaimCost, ClaimError};
pub use status::{decode, encode, is_valid, ClaimFlag, ClaimStatus, FLAGS_DESCENDING, MAX_CODE};
