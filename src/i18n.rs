use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_CONFIG: &str = "error.config";
    pub const ERROR_CONFIG_PARSE: &str = "error.config_parse";
    pub const ERROR_CONFIG_SERIALIZE: &str = "error.config_serialize";
    pub const ERROR_INPUT: &str = "error.input";
    pub const ERROR_FLOW_NOT_POSITIVE: &str = "error.flow_not_positive";
    pub const ERROR_HEAD_NOT_POSITIVE: &str = "error.head_not_positive";
    pub const ERROR_EFFICIENCY_NOT_POSITIVE: &str = "error.efficiency_not_positive";
    pub const ERROR_POWER_OUT_OF_RANGE: &str = "error.power_out_of_range";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_SUBTITLE: &str = "general.app_subtitle";

    pub const INPUT_DENSITY: &str = "input.fluid_density";
    pub const INPUT_FLOW: &str = "input.flow_rate";
    pub const INPUT_HEAD: &str = "input.head";
    pub const INPUT_EFFICIENCY: &str = "input.efficiency";

    pub const RESULT_POWER: &str = "result.power";
    pub const RESULT_HYDRAULIC: &str = "result.hydraulic_power";
    pub const WARN_INVALID_INPUT: &str = "warning.invalid_input";
    pub const GAUGE_TITLE: &str = "gauge.title";

    pub const FORMULA_TITLE: &str = "formula.title";
    pub const FORMULA_RHO: &str = "formula.rho";
    pub const FORMULA_G: &str = "formula.g";
    pub const FORMULA_Q: &str = "formula.q";
    pub const FORMULA_H: &str = "formula.h";
    pub const FORMULA_ETA: &str = "formula.eta";

    pub const PROMPT_KEEP_DEFAULT: &str = "prompt.keep_default";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const NOTICE_CLAMPED: &str = "notice.clamped";

    pub const BUTTON_RESET: &str = "button.reset";
    pub const SETTINGS_TITLE: &str = "settings.title";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_LANG_AUTO: &str = "settings.language_auto";
    pub const SETTINGS_LANG_PACK_DIR: &str = "settings.lang_pack_dir";
    pub const SETTINGS_FONT: &str = "settings.font";
    pub const SETTINGS_FONT_PICK: &str = "settings.font_pick";
    pub const SETTINGS_SHOW_GAUGE: &str = "settings.show_gauge";
    pub const SETTINGS_SAVE: &str = "settings.save";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if let Some(dir) = pack_dir {
            tracing::debug!(
                dir,
                lang = lang_code,
                loaded = overrides.is_some(),
                "language pack lookup"
            );
        }
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

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).map(String::as_str))
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 한국어 번역이 없으면 영어를 쓴다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// 번역 템플릿의 `{name}` 자리에 값을 채운다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{name}` 형태의 자리표시자를 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        ERROR_IO => "입출력 오류",
        ERROR_CONFIG => "설정 오류",
        ERROR_CONFIG_PARSE => "설정 파싱 오류",
        ERROR_CONFIG_SERIALIZE => "설정 직렬화 오류",
        ERROR_INPUT => "입력 오류",
        ERROR_FLOW_NOT_POSITIVE => "유량은 0보다 커야 합니다.",
        ERROR_HEAD_NOT_POSITIVE => "양정은 0보다 커야 합니다.",
        ERROR_EFFICIENCY_NOT_POSITIVE => "효율은 0보다 커야 합니다.",
        ERROR_POWER_OUT_OF_RANGE => "계산 결과가 표현 범위를 벗어났습니다.",
        APP_TITLE => "펌프 동력 계산기",
        APP_SUBTITLE => "기계·토목 설비용 펌프 축동력을 계산합니다.",
        INPUT_DENSITY => "유체 밀도 (kg/m³)",
        INPUT_FLOW => "유량 (m³/h)",
        INPUT_HEAD => "펌프 양정 (m)",
        INPUT_EFFICIENCY => "펌프 효율 (%)",
        RESULT_POWER => "필요 펌프 동력: {power}",
        RESULT_HYDRAULIC => "수동력(효율 반영 전): {power}",
        WARN_INVALID_INPUT => "펌프 동력을 계산하려면 올바른 입력값을 넣으세요.",
        GAUGE_TITLE => "펌프 동력 (kW)",
        FORMULA_TITLE => "사용 공식",
        FORMULA_RHO => "ρ = 유체 밀도 (kg/m³)",
        FORMULA_G => "g = 중력가속도 (9.81 m/s²)",
        FORMULA_Q => "Q = 유량 (m³/s)",
        FORMULA_H => "H = 펌프 양정 (m)",
        FORMULA_ETA => "η = 펌프 효율 (소수)",
        PROMPT_KEEP_DEFAULT => "{label} [엔터={default}]: ",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        NOTICE_CLAMPED => "{label} 값을 허용 범위로 조정했습니다: {value}",
        BUTTON_RESET => "기본값으로",
        SETTINGS_TITLE => "설정",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_LANG_AUTO => "시스템 설정",
        SETTINGS_LANG_PACK_DIR => "언어팩 폴더",
        SETTINGS_FONT => "사용자 폰트",
        SETTINGS_FONT_PICK => "폰트 선택…",
        SETTINGS_SHOW_GAUGE => "게이지 표시",
        SETTINGS_SAVE => "저장",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        ERROR_IO => "I/O error",
        ERROR_CONFIG => "Config error",
        ERROR_CONFIG_PARSE => "Config parse error",
        ERROR_CONFIG_SERIALIZE => "Config serialize error",
        ERROR_INPUT => "Input error",
        ERROR_FLOW_NOT_POSITIVE => "Flow rate must be greater than 0.",
        ERROR_HEAD_NOT_POSITIVE => "Head must be greater than 0.",
        ERROR_EFFICIENCY_NOT_POSITIVE => "Efficiency must be greater than 0.",
        ERROR_POWER_OUT_OF_RANGE => "The result is too large to represent.",
        APP_TITLE => "Power Pump Calculator",
        APP_SUBTITLE => {
            "This tool calculates pump shaft power for mechanical & civil engineering applications."
        }
        INPUT_DENSITY => "Fluid Density (kg/m³)",
        INPUT_FLOW => "Flow Rate (m³/h)",
        INPUT_HEAD => "Pump Head (m)",
        INPUT_EFFICIENCY => "Pump Efficiency (%)",
        RESULT_POWER => "Required Pump Power: {power}",
        RESULT_HYDRAULIC => "Hydraulic power (before losses): {power}",
        WARN_INVALID_INPUT => "Please enter valid input values to calculate pump power.",
        GAUGE_TITLE => "Pump Power (kW)",
        FORMULA_TITLE => "Formula Used",
        FORMULA_RHO => "ρ = Fluid density (kg/m³)",
        FORMULA_G => "g = Gravity (9.81 m/s²)",
        FORMULA_Q => "Q = Flow rate (m³/s)",
        FORMULA_H => "H = Pump head (m)",
        FORMULA_ETA => "η = Pump efficiency (decimal)",
        PROMPT_KEEP_DEFAULT => "{label} [Enter={default}]: ",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        NOTICE_CLAMPED => "{label} adjusted to the allowed range: {value}",
        BUTTON_RESET => "Reset to defaults",
        SETTINGS_TITLE => "Settings",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_LANG_AUTO => "System",
        SETTINGS_LANG_PACK_DIR => "Language pack folder",
        SETTINGS_FONT => "Custom font",
        SETTINGS_FONT_PICK => "Pick font…",
        SETTINGS_SHOW_GAUGE => "Show gauge",
        SETTINGS_SAVE => "Save",
        SETTINGS_SAVED => "Settings saved.",
        _ => "[missing translation]",
    }
}
