//! CLI 명령어 구현 모듈.

pub mod categories;
pub mod rank;
pub mod ratings;
