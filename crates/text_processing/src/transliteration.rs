//! Phonetic transliteration between Latin and Cyrillic
//!
//! Job and parameter names on the CI server are mostly Latin, while speech
//! recognition and synthesis work in the locale's own script. The tables
//! approximate how a Latin word is pronounced, not a reversible
//! romanization standard.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use voice_ci_core::Locale;

/// Latin multigraphs, longest first
static LATIN_MULTIGRAPHS: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sch", "щ"),
    ("tch", "ч"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ts", "ц"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("th", "т"),
    ("ph", "ф"),
    ("ck", "к"),
    ("qu", "кв"),
    ("ya", "я"),
    ("yu", "ю"),
    ("yo", "ё"),
    ("ee", "и"),
    ("oo", "у"),
];

static LATIN_TO_CYRILLIC: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert('a', "а");
    map.insert('b', "б");
    map.insert('c', "к");
    map.insert('d', "д");
    map.insert('e', "е");
    map.insert('f', "ф");
    map.insert('g', "г");
    map.insert('h', "х");
    map.insert('i', "и");
    map.insert('j', "дж");
    map.insert('k', "к");
    map.insert('l', "л");
    map.insert('m', "м");
    map.insert('n', "н");
    map.insert('o', "о");
    map.insert('p', "п");
    map.insert('q', "к");
    map.insert('r', "р");
    map.insert('s', "с");
    map.insert('t', "т");
    map.insert('u', "у");
    map.insert('v', "в");
    map.insert('w', "в");
    map.insert('x', "кс");
    map.insert('y', "и");
    map.insert('z', "з");
    map
});

static CYRILLIC_TO_LATIN: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert('а', "a");
    map.insert('б', "b");
    map.insert('в', "v");
    map.insert('г', "g");
    map.insert('д', "d");
    map.insert('е', "e");
    map.insert('ё', "yo");
    map.insert('ж', "zh");
    map.insert('з', "z");
    map.insert('и', "i");
    map.insert('й', "y");
    map.insert('к', "k");
    map.insert('л', "l");
    map.insert('м', "m");
    map.insert('н', "n");
    map.insert('о', "o");
    map.insert('п', "p");
    map.insert('р', "r");
    map.insert('с', "s");
    map.insert('т', "t");
    map.insert('у', "u");
    map.insert('ф', "f");
    map.insert('х', "kh");
    map.insert('ц', "ts");
    map.insert('ч', "ch");
    map.insert('ш', "sh");
    map.insert('щ', "shch");
    map.insert('ъ', "");
    map.insert('ы', "y");
    map.insert('ь', "");
    map.insert('э', "e");
    map.insert('ю', "yu");
    map.insert('я', "ya");
    map
});

static TO_CYRILLIC: Transliterator = Transliterator {
    target: Locale::Russian,
};
static TO_LATIN: Transliterator = Transliterator {
    target: Locale::English,
};

/// Script converter towards a locale's script
///
/// Characters already in the target script, digits, and punctuation pass
/// through unchanged. Capitalization of the source letter is carried to the
/// first output letter.
#[derive(Debug)]
pub struct Transliterator {
    target: Locale,
}

impl Transliterator {
    /// Shared transliterator for a target locale
    pub fn for_locale(locale: Locale) -> &'static Transliterator {
        match locale {
            Locale::Russian => &TO_CYRILLIC,
            Locale::English => &TO_LATIN,
        }
    }

    /// Transliterate a single word
    pub fn transliterate(&self, word: &str) -> String {
        match self.target {
            Locale::Russian => latin_to_cyrillic(word),
            Locale::English => cyrillic_to_latin(word),
        }
    }
}

fn latin_to_cyrillic(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
    let mut out = String::with_capacity(word.len() * 2);
    let mut i = 0;

    'outer: while i < chars.len() {
        let upper = chars[i].is_ascii_uppercase();

        for (graph, replacement) in LATIN_MULTIGRAPHS {
            let len = graph.len();
            if i + len <= lower.len() && lower[i..i + len].iter().copied().eq(graph.chars()) {
                push_cased(&mut out, replacement, upper);
                i += len;
                continue 'outer;
            }
        }

        let c = lower[i];
        let replacement = match c {
            // soft c before front vowels
            'c' if matches!(lower.get(i + 1), Some('e' | 'i' | 'y')) => Some("с"),
            // y closing a vowel is a glide
            'y' if i > 0 && is_latin_vowel(lower[i - 1]) => Some("й"),
            _ => LATIN_TO_CYRILLIC.get(&c).copied(),
        };

        match replacement {
            Some(r) => push_cased(&mut out, r, upper),
            None => out.push(chars[i]),
        }
        i += 1;
    }

    out
}

fn cyrillic_to_latin(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        match CYRILLIC_TO_LATIN.get(&lower) {
            Some(r) => push_cased(&mut out, r, c != lower),
            None => out.push(c),
        }
    }
    out
}

fn is_latin_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn push_cased(out: &mut String, replacement: &str, upper: bool) {
    if !upper {
        out.push_str(replacement);
        return;
    }
    let mut chars = replacement.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ru(word: &str) -> String {
        Transliterator::for_locale(Locale::Russian).transliterate(word)
    }

    fn en(word: &str) -> String {
        Transliterator::for_locale(Locale::English).transliterate(word)
    }

    #[test]
    fn test_latin_to_cyrillic_basic() {
        assert_eq!(ru("deploy"), "деплой");
        assert_eq!(ru("test"), "тест");
        assert_eq!(ru("build"), "буилд");
    }

    #[test]
    fn test_multigraphs() {
        assert_eq!(ru("shell"), "шелл");
        assert_eq!(ru("check"), "чек");
        assert_eq!(ru("python"), "питон");
        assert_eq!(ru("zhuk"), "жук");
    }

    #[test]
    fn test_soft_c() {
        assert_eq!(ru("service"), "сервисе");
        assert_eq!(ru("cat"), "кат");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(ru("Jenkins"), "Дженкинс");
        assert_eq!(ru("CI"), "СИ");
    }

    #[test]
    fn test_non_letters_pass_through() {
        assert_eq!(ru("web-app2"), "веб-апп2");
        assert_eq!(ru("деплой"), "деплой");
        assert_eq!(ru(":"), ":");
    }

    #[test]
    fn test_cyrillic_to_latin() {
        assert_eq!(en("сборка"), "sborka");
        assert_eq!(en("Задача"), "Zadacha");
        assert_eq!(en("объект"), "obekt");
        assert_eq!(en("deploy"), "deploy");
    }
}
