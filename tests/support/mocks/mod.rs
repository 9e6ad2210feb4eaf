// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod interceptors;
pub mod issuer;
pub mod stores;
pub mod time;

pub use interceptors::{
    CapturingAuditRepo, CountingInterceptor, DisabledInterceptor, FailingInterceptor,
};
pub use issuer::RecordingTokenIssuer;
pub use stores::{FlakyGrantCache, RecordingCodeStore};
pub use time::{FixedClock, fixed_now};
