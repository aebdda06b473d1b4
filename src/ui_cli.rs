use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::proposal::{self, ProposalInput};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewProposal,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_NEW_PROPOSAL));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::NewProposal),
        "2" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 새 제안서 입력을 받아 계산하고 보고서를 출력한다.
pub fn handle_new_proposal(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROPOSAL_HEADING));
    let customer = read_line(tr.t(keys::PROMPT_CUSTOMER))?;
    let consumption_kwh = read_f64(tr, tr.t(keys::PROMPT_CONSUMPTION))?;
    let modules_cost = read_f64(tr, tr.t(keys::PROMPT_MODULES_COST))?;
    let labor_cost = read_f64(tr, tr.t(keys::PROMPT_LABOR_COST))?;
    let inverter = read_line(tr.t(keys::PROMPT_INVERTER))?;

    let input = ProposalInput {
        customer: customer.trim().to_string(),
        consumption_kwh,
        modules_cost,
        labor_cost,
        inverter_description: inverter.trim().to_string(),
        horizon_years: None,
    };
    let proposal = proposal::build_proposal(&input, cfg, tr.language())?;
    println!();
    print!("{}", report::render_proposal(&proposal, tr));
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language.as_deref().unwrap_or(tr.language_code())
    );
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_HORIZON),
        cfg.horizon_years
    );

    let mut language_changed = false;
    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    let lang = lang.trim().to_lowercase();
    if !lang.is_empty() {
        if ["pt", "en", "ko"].iter().any(|c| lang.starts_with(c)) {
            cfg.language = Some(lang);
            language_changed = true;
        } else {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
        }
    }

    let horizon = read_line(tr.t(keys::SETTINGS_PROMPT_HORIZON))?;
    if !horizon.trim().is_empty() {
        match horizon
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|y| proposal::require_horizon(y).ok())
        {
            Some(years) => cfg.horizon_years = years,
            None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }
    Ok(language_changed)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력이 닫혀 0바이트를 읽으면 `UnexpectedEof`로 끝낸다.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<String, AppError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match parse_number(&s) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 숫자를 해석한다. 쉼표가 있으면 pt-BR 표기(46.028,29)로 보고
/// 천 단위 점을 지운 뒤 쉼표를 소수점으로 바꾼다.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.contains(',') {
        s.replace('.', "").replace(',', ".").parse().ok()
    } else {
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_map_from_digits() {
        assert_eq!(parse_menu_choice(" 1\n"), Some(MenuChoice::NewProposal));
        assert_eq!(parse_menu_choice("2"), Some(MenuChoice::Settings));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn decimal_comma_is_accepted() {
        assert_eq!(parse_number("46028,29\n"), Some(46028.29));
        assert_eq!(parse_number("4560"), Some(4560.0));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn thousands_separator_is_accepted() {
        assert_eq!(parse_number("46.028,29"), Some(46028.29));
        assert_eq!(parse_number("1.234.567,8"), Some(1234567.8));
        assert_eq!(parse_number("30.000,00"), Some(30000.0));
        assert_eq!(parse_number("76028.29"), Some(76028.29));
    }

    #[test]
    fn closed_input_ends_with_eof() {
        let mut empty = io::Cursor::new(Vec::<u8>::new());
        let err = read_line_from(&mut empty).unwrap_err();
        assert!(err.is_eof());

        let mut one_line = io::Cursor::new(b"1\n".to_vec());
        assert_eq!(read_line_from(&mut one_line).ok().as_deref(), Some("1\n"));
        assert!(read_line_from(&mut one_line).unwrap_err().is_eof());
    }

    #[test]
    fn blank_line_is_not_eof() {
        let mut blank = io::Cursor::new(b"\n".to_vec());
        assert_eq!(read_line_from(&mut blank).ok().as_deref(), Some("\n"));
    }
}
