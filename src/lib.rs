//! 태양광 제안서 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 HTTP 서비스나
//! 문서 생성기에서도 같은 엔진을 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod proposal;
pub mod report;
pub mod solar;
pub mod ui_cli;
