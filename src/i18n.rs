use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_NEW_PROPOSAL: &str = "main_menu.new_proposal";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROPOSAL_HEADING: &str = "proposal.heading";
    pub const PROMPT_CUSTOMER: &str = "prompt.customer";
    pub const PROMPT_CONSUMPTION: &str = "prompt.consumption";
    pub const PROMPT_MODULES_COST: &str = "prompt.modules_cost";
    pub const PROMPT_LABOR_COST: &str = "prompt.labor_cost";
    pub const PROMPT_INVERTER: &str = "prompt.inverter";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_CUSTOMER: &str = "report.customer";
    pub const REPORT_INVERTER: &str = "report.inverter";
    pub const REPORT_PANEL_COUNT: &str = "report.panel_count";
    pub const REPORT_INSTALLED_POWER: &str = "report.installed_power";
    pub const REPORT_ANNUAL_GENERATION: &str = "report.annual_generation";
    pub const REPORT_INVESTMENT: &str = "report.investment";
    pub const REPORT_MONTHLY_HEADING: &str = "report.monthly_heading";
    pub const REPORT_COL_MONTH: &str = "report.col_month";
    pub const REPORT_COL_GENERATION: &str = "report.col_generation";
    pub const REPORT_PAYBACK_HEADING: &str = "report.payback_heading";
    pub const REPORT_COL_YEAR: &str = "report.col_year";
    pub const REPORT_COL_BALANCE: &str = "report.col_balance";
    pub const REPORT_COL_MONTHLY_SAVINGS: &str = "report.col_monthly_savings";
    pub const REPORT_COL_ANNUAL_SAVINGS: &str = "report.col_annual_savings";
    pub const REPORT_BREAKEVEN: &str = "report.breakeven";
    pub const REPORT_BREAKEVEN_NONE: &str = "report.breakeven_none";
    pub const REPORT_TOTAL_SAVINGS: &str = "report.total_savings";
    pub const REPORT_ZERO_PANELS: &str = "report.zero_panels";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_HORIZON: &str = "settings.current_horizon";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_HORIZON: &str = "settings.prompt_horizon";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_CONFIG: &str = "error.config";
    pub const ERROR_JSON: &str = "error.json";
    pub const ERROR_LOGGING: &str = "error.logging";
    pub const ERROR_INVALID_FIELD: &str = "error.invalid_field";
    pub const ERROR_EMPTY_CUSTOMER: &str = "error.empty_customer";
    pub const ERROR_CALIBRATION: &str = "error.calibration";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pt,
    En,
    Ko,
}

impl Language {
    /// 언어 코드를 해석한다. 알 수 없는 코드는 pt로 폴백한다.
    pub fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::Pt
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

const MONTH_NAMES_PT: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTH_NAMES_KO: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

/// 월(1~12)의 표시 이름을 반환한다. 범위를 벗어나면 빈 문자열.
pub fn month_name(lang: Language, month: u8) -> &'static str {
    let table = match lang {
        Language::Pt => &MONTH_NAMES_PT,
        Language::En => &MONTH_NAMES_EN,
        Language::Ko => &MONTH_NAMES_KO,
    };
    usize::from(month)
        .checked_sub(1)
        .and_then(|idx| table.get(idx))
        .copied()
        .unwrap_or("")
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(pt/en/ko)에 따라 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩이 우선이고, 내장 번역이 없으면 포르투갈어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| pt(key)),
            Language::Ko => ko(key).unwrap_or_else(|| pt(key)),
            Language::Pt => pt(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "pt-br".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "pt" | "pt-br" | "en" | "en-us" | "ko" | "ko-kr" => Some(c),
        other if other.starts_with("pt") => Some("pt-br".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "pt" | "en" | "ko" => Some(lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// `<dir>/<code>.toml` 언어팩을 찾는다. 전체 코드(pt-br) 다음 기본 코드(pt) 순.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let base = lang.split(['-', '_']).next().unwrap_or(lang);
    [lang, base].into_iter().find_map(|code| {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        tracing::debug!(path = %path.display(), "language pack loaded");
        flatten_pack(&content)
    })
}

/// 언어팩 TOML을 `section.key` 형태의 평면 맵으로 펼친다.
/// 문자열이 아닌 값은 무시하고, 문자열이 하나도 없으면 None.
fn flatten_pack(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = toml::from_str(src).ok()?;
    let mut strings = HashMap::new();
    let mut pending: Vec<(String, toml::Value)> = root.into_iter().collect();
    while let Some((key, value)) = pending.pop() {
        match value {
            toml::Value::String(text) => {
                strings.insert(key, text);
            }
            toml::Value::Table(section) => {
                pending.extend(
                    section
                        .into_iter()
                        .map(|(child, v)| (format!("{key}.{child}"), v)),
                );
            }
            _ => tracing::debug!(key = %key, "non-string language pack entry ignored"),
        }
    }
    (!strings.is_empty()).then_some(strings)
}

fn pt(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando o programa.",
        MAIN_MENU_TITLE => "\n=== Proposta Solar ===",
        MAIN_MENU_NEW_PROPOSAL => "1) Nova proposta",
        MAIN_MENU_SETTINGS => "2) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Selecione: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        PROPOSAL_HEADING => "\n-- Nova proposta --",
        PROMPT_CUSTOMER => "Cliente: ",
        PROMPT_CONSUMPTION => "Consumo mensal [kWh]: ",
        PROMPT_MODULES_COST => "Valor dos módulos [R$]: ",
        PROMPT_LABOR_COST => "Valor da mão de obra [R$]: ",
        PROMPT_INVERTER => "Descrição do inversor: ",
        REPORT_TITLE => "PROPOSTA COMERCIAL - ENERGIA SOLAR",
        REPORT_CUSTOMER => "Cliente:",
        REPORT_INVERTER => "Inversor:",
        REPORT_PANEL_COUNT => "Quantidade de placas:",
        REPORT_INSTALLED_POWER => "Potência instalada:",
        REPORT_ANNUAL_GENERATION => "Geração anual:",
        REPORT_INVESTMENT => "Investimento total:",
        REPORT_MONTHLY_HEADING => "Produção de energia",
        REPORT_COL_MONTH => "Mês",
        REPORT_COL_GENERATION => "Geração (kWh)",
        REPORT_PAYBACK_HEADING => "Retorno do investimento",
        REPORT_COL_YEAR => "Ano",
        REPORT_COL_BALANCE => "Saldo",
        REPORT_COL_MONTHLY_SAVINGS => "Economia mensal",
        REPORT_COL_ANNUAL_SAVINGS => "Economia anual",
        REPORT_BREAKEVEN => "Retorno do investimento no ano:",
        REPORT_BREAKEVEN_NONE => "Retorno não alcançado no período de anos:",
        REPORT_TOTAL_SAVINGS => "Economia acumulada ao final do período:",
        REPORT_ZERO_PANELS => "Atenção: consumo abaixo da geração de uma placa; nenhuma placa proposta.",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual:",
        SETTINGS_CURRENT_HORIZON => "Período de análise (anos):",
        SETTINGS_PROMPT_LANGUAGE => "Idioma (pt/en/ko, Enter mantém): ",
        SETTINGS_PROMPT_HORIZON => "Período em anos (Enter mantém): ",
        SETTINGS_INVALID => "Valor inválido; configuração mantida.",
        SETTINGS_SAVED => "Configurações salvas.",
        ERROR_INVALID_NUMBER => "Digite um número.",
        ERROR_IO => "entrada/saída",
        ERROR_CONFIG => "configuração",
        ERROR_JSON => "JSON",
        ERROR_LOGGING => "registro de log",
        ERROR_INVALID_FIELD => "valor inválido:",
        ERROR_EMPTY_CUSTOMER => "O nome do cliente é obrigatório.",
        ERROR_CALIBRATION => "valor de calibração inválido:",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Solar Proposal ===",
        MAIN_MENU_NEW_PROPOSAL => "1) New proposal",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        PROPOSAL_HEADING => "\n-- New proposal --",
        PROMPT_CUSTOMER => "Customer: ",
        PROMPT_CONSUMPTION => "Monthly consumption [kWh]: ",
        PROMPT_MODULES_COST => "Modules cost: ",
        PROMPT_LABOR_COST => "Labor cost: ",
        PROMPT_INVERTER => "Inverter description: ",
        REPORT_TITLE => "COMMERCIAL PROPOSAL - SOLAR ENERGY",
        REPORT_CUSTOMER => "Customer:",
        REPORT_INVERTER => "Inverter:",
        REPORT_PANEL_COUNT => "Panel count:",
        REPORT_INSTALLED_POWER => "Installed power:",
        REPORT_ANNUAL_GENERATION => "Annual generation:",
        REPORT_INVESTMENT => "Total investment:",
        REPORT_MONTHLY_HEADING => "Energy production",
        REPORT_COL_MONTH => "Month",
        REPORT_COL_GENERATION => "Generation (kWh)",
        REPORT_PAYBACK_HEADING => "Return on investment",
        REPORT_COL_YEAR => "Year",
        REPORT_COL_BALANCE => "Balance",
        REPORT_COL_MONTHLY_SAVINGS => "Monthly savings",
        REPORT_COL_ANNUAL_SAVINGS => "Annual savings",
        REPORT_BREAKEVEN => "Payback reached in year:",
        REPORT_BREAKEVEN_NONE => "Payback not reached within years:",
        REPORT_TOTAL_SAVINGS => "Cumulative savings at end of horizon:",
        REPORT_ZERO_PANELS => "Warning: consumption is below one panel's yield; no panels proposed.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_CURRENT_HORIZON => "Analysis horizon (years):",
        SETTINGS_PROMPT_LANGUAGE => "Language (pt/en/ko, enter to keep): ",
        SETTINGS_PROMPT_HORIZON => "Horizon in years (enter to keep): ",
        SETTINGS_INVALID => "Invalid value; setting unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_IO => "input/output",
        ERROR_CONFIG => "configuration",
        ERROR_JSON => "JSON",
        ERROR_LOGGING => "logging",
        ERROR_INVALID_FIELD => "invalid value:",
        ERROR_EMPTY_CUSTOMER => "Customer name must not be empty.",
        ERROR_CALIBRATION => "invalid calibration value:",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 태양광 제안서 ===",
        MAIN_MENU_NEW_PROPOSAL => "1) 새 제안서",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROPOSAL_HEADING => "\n-- 새 제안서 --",
        PROMPT_CUSTOMER => "고객명: ",
        PROMPT_CONSUMPTION => "월 소비량 [kWh]: ",
        PROMPT_MODULES_COST => "모듈 비용: ",
        PROMPT_LABOR_COST => "시공 비용: ",
        PROMPT_INVERTER => "인버터 사양: ",
        REPORT_TITLE => "태양광 발전 제안서",
        REPORT_CUSTOMER => "고객:",
        REPORT_INVERTER => "인버터:",
        REPORT_PANEL_COUNT => "패널 수량:",
        REPORT_INSTALLED_POWER => "설치 용량:",
        REPORT_ANNUAL_GENERATION => "연간 발전량:",
        REPORT_INVESTMENT => "총 투자비:",
        REPORT_MONTHLY_HEADING => "월별 발전량",
        REPORT_COL_MONTH => "월",
        REPORT_COL_GENERATION => "발전량 (kWh)",
        REPORT_PAYBACK_HEADING => "투자 회수",
        REPORT_COL_YEAR => "연차",
        REPORT_COL_BALANCE => "누적 잔액",
        REPORT_COL_MONTHLY_SAVINGS => "월 절감액",
        REPORT_COL_ANNUAL_SAVINGS => "연 절감액",
        REPORT_BREAKEVEN => "회수 연차:",
        REPORT_BREAKEVEN_NONE => "분석 기간 내 회수 불가, 기간(년):",
        REPORT_TOTAL_SAVINGS => "분석 기간 말 누적 절감액:",
        REPORT_ZERO_PANELS => "주의: 소비량이 패널 1장 발전량보다 작아 제안 패널이 없습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_CURRENT_HORIZON => "분석 기간(년):",
        SETTINGS_PROMPT_LANGUAGE => "언어 (pt/en/ko, 엔터 시 유지): ",
        SETTINGS_PROMPT_HORIZON => "분석 기간(년, 엔터 시 유지): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_IO => "입출력",
        ERROR_CONFIG => "설정",
        ERROR_JSON => "JSON",
        ERROR_LOGGING => "로거 초기화",
        ERROR_INVALID_FIELD => "잘못된 값:",
        ERROR_EMPTY_CUSTOMER => "고객명을 입력하세요.",
        ERROR_CALIBRATION => "잘못된 보정 상수:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_follow_language() {
        assert_eq!(month_name(Language::Pt, 1), "Janeiro");
        assert_eq!(month_name(Language::Pt, 3), "Março");
        assert_eq!(month_name(Language::En, 12), "December");
        assert_eq!(month_name(Language::Ko, 7), "7월");
        assert_eq!(month_name(Language::En, 0), "");
        assert_eq!(month_name(Language::En, 13), "");
    }

    #[test]
    fn unknown_codes_fall_back_to_portuguese() {
        assert_eq!(Language::from_code("xx"), Language::Pt);
        assert_eq!(Language::from_code("en-US"), Language::En);
        assert_eq!(Translator::new("de").t(keys::ERROR_PREFIX), "Erro");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("en"), Some("ko")), "en");
        assert_eq!(resolve_language(Some("auto"), Some("ko-KR")), "ko-kr");
    }

    #[test]
    fn override_pack_is_flattened() {
        let pack = "[report]\ntitle = \"Custom\"\n[report.nested]\nkey = \"Deep\"\nwidth = 3\n";
        let map = flatten_pack(pack).unwrap_or_default();
        assert_eq!(map.get("report.title").map(String::as_str), Some("Custom"));
        assert_eq!(map.get("report.nested.key").map(String::as_str), Some("Deep"));
        assert!(!map.contains_key("report.nested.width"));
        assert_eq!(flatten_pack("width = 3"), None);
    }

    #[test]
    fn every_error_key_is_translated() {
        for key in [
            keys::ERROR_IO,
            keys::ERROR_CONFIG,
            keys::ERROR_INVALID_FIELD,
            keys::ERROR_EMPTY_CUSTOMER,
            keys::ERROR_CALIBRATION,
        ] {
            assert!(en(key).is_some(), "{key}");
            assert!(ko(key).is_some(), "{key}");
            assert_ne!(pt(key), "[missing translation]", "{key}");
        }
    }
}
