//! 매매일지 전반에서 사용되는 공통 타입.

mod decimal;
mod lenient;

pub use decimal::*;
pub use lenient::*;
