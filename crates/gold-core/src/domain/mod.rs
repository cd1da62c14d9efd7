//! 시세 도메인 모델.

mod currency;
mod gold;

pub use currency::*;
pub use gold::*;
