//! 매매일지 도메인 모델.

mod calculations;
mod settlement;
mod trade;

pub use calculations::*;
pub use settlement::*;
pub use trade::*;
