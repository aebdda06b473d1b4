use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use solar_proposal_toolbox::app::{self, AppError};
use solar_proposal_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use solar_proposal_toolbox::i18n::{self, Translator};
use solar_proposal_toolbox::proposal::{self, ProposalInput};
use solar_proposal_toolbox::report::{self, OutputFormat};

/// 태양광 설비 투자 회수 계산기.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 표시 언어 (pt/en/ko/auto)
    #[arg(long)]
    lang: Option<String>,
    /// 로그 필터 (예: debug, solar_proposal_toolbox=trace). 없으면 RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 소비량과 투자비만으로 계산한다
    Calculate {
        /// 월 소비량 [kWh]
        #[arg(long)]
        consumption: f64,
        /// 총 투자비
        #[arg(long)]
        investment: f64,
        /// 분석 기간 [년]
        #[arg(long)]
        horizon: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 고객 제안서를 계산한다
    Proposal {
        #[arg(long)]
        customer: String,
        /// 월 소비량 [kWh]
        #[arg(long)]
        consumption: f64,
        /// 모듈 비용
        #[arg(long)]
        modules_cost: f64,
        /// 시공 비용
        #[arg(long)]
        labor_cost: f64,
        /// 인버터 사양
        #[arg(long, default_value = "")]
        inverter: String,
        /// 분석 기간 [년]
        #[arg(long)]
        horizon: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 대화형 메뉴 (기본값)
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut cfg = Config::default();
    let mut tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
    match try_run(cli, &mut cfg, &mut tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{}: {}", tr.t(i18n::keys::ERROR_PREFIX), err.describe(&tr));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli, cfg: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    app::init_logging(cli.log_level.as_deref())?;
    *cfg = config::load_or_default(&cli.config)?;
    let code = i18n::resolve_language(cli.lang.as_deref(), cfg.language.as_deref());
    *tr = Translator::new_with_pack(&code, None);
    tracing::debug!(language = tr.language_code(), "language resolved");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Calculate {
            consumption,
            investment,
            horizon,
            format,
        } => {
            let result = proposal::calculate_checked(
                consumption,
                investment,
                horizon.unwrap_or(cfg.horizon_years),
                cfg,
                tr.language(),
            )?;
            match format {
                OutputFormat::Text => print!("{}", report::render_calculation(&result, tr)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Command::Proposal {
            customer,
            consumption,
            modules_cost,
            labor_cost,
            inverter,
            horizon,
            format,
        } => {
            let input = ProposalInput {
                customer,
                consumption_kwh: consumption,
                modules_cost,
                labor_cost,
                inverter_description: inverter,
                horizon_years: horizon,
            };
            let built = proposal::build_proposal(&input, cfg, tr.language())?;
            match format {
                OutputFormat::Text => print!("{}", report::render_proposal(&built, tr)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&built)?),
            }
        }
        Command::Interactive => app::run(cfg, &cli.config, tr)?,
    }
    Ok(())
}
