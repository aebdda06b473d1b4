use std::io;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, keys, Translator};
use crate::proposal::ProposalError;
use crate::solar::CalibrationError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
///
/// `Display`는 로그용 영문 메시지이고, 사용자에게는 [`AppError::describe`]로
/// 현재 언어에 맞춰 보여준다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 제안서 입력 검증 오류
    #[error("input error: {0}")]
    Proposal(#[from] ProposalError),
    /// JSON 출력 오류
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// 로거 초기화 실패
    #[error("logging setup error: {0}")]
    Logging(String),
}

impl AppError {
    /// 입력 스트림이 닫혀서 생긴 오류인지 확인한다.
    pub fn is_eof(&self) -> bool {
        matches!(self, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// 현재 언어로 오류를 설명한다.
    pub fn describe(&self, tr: &Translator) -> String {
        match self {
            AppError::Io(e) => format!("{}: {e}", tr.t(keys::ERROR_IO)),
            AppError::Config(ConfigError::Calibration(e)) => describe_calibration(e, tr),
            AppError::Config(e) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG)),
            AppError::Proposal(e) => describe_proposal(e, tr),
            AppError::Json(e) => format!("{}: {e}", tr.t(keys::ERROR_JSON)),
            AppError::Logging(msg) => format!("{}: {msg}", tr.t(keys::ERROR_LOGGING)),
        }
    }
}

fn describe_calibration(e: &CalibrationError, tr: &Translator) -> String {
    format!("{} {} = {}", tr.t(keys::ERROR_CALIBRATION), e.field, e.value)
}

/// 입력 검증 오류를 현재 언어로 설명한다.
pub fn describe_proposal(e: &ProposalError, tr: &Translator) -> String {
    match e {
        ProposalError::InvalidInput { field, value } => {
            format!("{} {field} = {value}", tr.t(keys::ERROR_INVALID_FIELD))
        }
        ProposalError::EmptyCustomer => tr.t(keys::ERROR_EMPTY_CUSTOMER).to_string(),
        ProposalError::InvalidCalibration(c) => describe_calibration(c, tr),
    }
}

/// stderr로 출력하는 tracing 구독자를 설치한다.
///
/// `level`이 있으면 그것을, 없으면 `RUST_LOG`(기본 warn)를 필터로 사용한다.
pub fn init_logging(level: Option<&str>) -> Result<(), AppError> {
    let filter = match level {
        Some(lvl) => tracing_subscriber::EnvFilter::try_new(lvl)
            .map_err(|e| AppError::Logging(e.to_string()))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

/// 대화형 CLI의 메인 루프를 실행한다. 입력이 닫히면 종료 메뉴와 같이 끝낸다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        match run_step(config, config_path, tr) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if err.is_eof() => {
                tracing::debug!("input closed; leaving interactive mode");
                println!();
                break;
            }
            Err(err) => return Err(err),
        }
    }
    config.save(config_path)?;
    println!("{}", tr.t(keys::APP_EXIT));
    Ok(())
}

/// 메뉴 한 번을 처리한다. 종료를 선택하면 false.
fn run_step(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<bool, AppError> {
    match ui_cli::main_menu(tr)? {
        MenuChoice::NewProposal => {
            // 입력 검증 실패는 메뉴로 돌아간다
            match ui_cli::handle_new_proposal(tr, config) {
                Err(AppError::Proposal(e)) => {
                    println!("{}: {}", tr.t(keys::ERROR_PREFIX), describe_proposal(&e, tr));
                }
                other => other?,
            }
        }
        MenuChoice::Settings => {
            if ui_cli::handle_settings(tr, config)? {
                let code = i18n::resolve_language(None, config.language.as_deref());
                *tr = Translator::new_with_pack(&code, None);
            }
            config.save(config_path)?;
            println!("{}", tr.t(keys::SETTINGS_SAVED));
        }
        MenuChoice::Exit => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_follow_the_selected_language() {
        let err = AppError::Proposal(ProposalError::EmptyCustomer);
        assert_eq!(
            err.describe(&Translator::new("en")),
            "Customer name must not be empty."
        );
        assert_eq!(
            err.describe(&Translator::new("pt")),
            "O nome do cliente é obrigatório."
        );

        let io_err = AppError::Io(io::Error::new(io::ErrorKind::Other, "disk"));
        assert_eq!(io_err.describe(&Translator::new("en")), "input/output: disk");
        assert!(!io_err.describe(&Translator::new("en")).contains("입출력"));
    }

    #[test]
    fn calibration_errors_name_the_field() {
        let err = AppError::Config(ConfigError::Calibration(CalibrationError {
            field: "initial_tariff",
            value: "NaN".into(),
        }));
        assert_eq!(
            err.describe(&Translator::new("en")),
            "invalid calibration value: initial_tariff = NaN"
        );
    }

    #[test]
    fn only_unexpected_eof_counts_as_closed_input() {
        let eof = AppError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"));
        assert!(eof.is_eof());
        let other = AppError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(!other.is_eof());
        assert!(!AppError::Logging("x".into()).is_eof());
    }
}
