//! 사용된 공식과 기호 설명.

use crate::i18n::{keys, Translator};

/// 축동력 공식.
pub const FORMULA: &str = "P = ρ·g·Q·H / η";

/// 기호 설명 줄을 번역하여 반환한다.
pub fn legend(tr: &Translator) -> Vec<&str> {
    [
        keys::FORMULA_RHO,
        keys::FORMULA_G,
        keys::FORMULA_Q,
        keys::FORMULA_H,
        keys::FORMULA_ETA,
    ]
    .iter()
    .map(|k| tr.t(k))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_mentions_gravity_constant() {
        let tr = Translator::new("en");
        let lines = legend(&tr);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("9.81"));
    }
}
