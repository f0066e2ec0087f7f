//! 매매일지 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 월간 손익 캘린더 조회 (REST API)
//! - 하루 집계와 일일 손실 한도 점검
//! - 리스크 정책 기반 포지션 사이징
//! - 내보낸 거래 파일의 오프라인 재생

pub mod commands;
